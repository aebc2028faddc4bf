use crate::error::{HuffmanCodecError, Result};

/// Default chunk size: 256 KiB.
pub const DEFAULT_CHUNK_SIZE: u32 = 256 * 1024;

/// Default maximum code length.
pub const DEFAULT_MAX_CODE_LENGTH: u8 = 11;

/// Tunables for [`HuffmanEncoder`](crate::huffman::encoder::HuffmanEncoder).
///
/// Kept as a small value type rather than bare constructor parameters so
/// callers can validate once and reuse across many encoder instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanCodecConfig {
    chunk_size: u32,
    max_code_length: u8,
}

impl HuffmanCodecConfig {
    /// Validates and constructs a config. `chunk_size` must be nonzero and
    /// a whole number of kilobytes representable in 16 bits on the wire
    /// (`chunk_size / 1024 <= u16::MAX`); `max_code_length` must be in
    /// `1..=15`.
    pub fn new(chunk_size: u32, max_code_length: u8) -> Result<Self> {
        if chunk_size == 0 {
            return Err(HuffmanCodecError::InvalidParameter(
                "chunk_size must be nonzero",
            ));
        }
        if chunk_size % 1024 != 0 || chunk_size / 1024 > u16::MAX as u32 {
            return Err(HuffmanCodecError::InvalidParameter(
                "chunk_size must be a whole number of kilobytes representable in 16 bits",
            ));
        }
        if max_code_length == 0 || max_code_length > 15 {
            return Err(HuffmanCodecError::InvalidParameter(
                "max_code_length must be in 1..=15",
            ));
        }
        Ok(Self {
            chunk_size,
            max_code_length,
        })
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn max_code_length(&self) -> u8 {
        self.max_code_length
    }

    pub fn chunk_size_kb(&self) -> u16 {
        (self.chunk_size / 1024) as u16
    }
}

impl Default for HuffmanCodecConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_code_length: DEFAULT_MAX_CODE_LENGTH,
        }
    }
}
