use std::io::{ErrorKind, Read};

use crate::error::{HuffmanCodecError, Result};

use super::{MAGIC, REMAINDER_MASK};

/// A bit-granular cursor over a byte source.
///
/// Mirrors [`BitStreamWriter`](super::BitStreamWriter): bits are staged
/// MSB-aligned in a 64-bit `buffer`, refilled up to 8 bytes at a time from
/// the source. On EOF the reader learns the exact number of real bits left
/// in the last refill and trims off the header-declared trailing remainder
/// so pad bits are never handed back as data.
pub struct BitStreamReader<R: Read> {
    source: R,
    buffer: u64,
    /// Number of valid, not-yet-consumed bits in `buffer`, MSB-aligned.
    position: u8,
    remainder: u8,
    /// True once the source has returned EOF and the header's trailing
    /// remainder has been trimmed out of `position`.
    source_exhausted: bool,
    failed: bool,
}

impl<R: Read> BitStreamReader<R> {
    pub fn new(mut source: R) -> Result<Self> {
        let mut header = [0u8; 1];
        let n = read_fully(&mut source, &mut header)?;
        if n == 0 {
            return Err(HuffmanCodecError::CorruptStream(
                "stream is shorter than the bit-stream header",
            ));
        }
        if header[0] >> 3 != MAGIC {
            return Ok(Self {
                source,
                buffer: 0,
                position: 0,
                remainder: 0,
                source_exhausted: true,
                failed: true,
            });
        }
        Ok(Self {
            source,
            buffer: 0,
            position: 0,
            remainder: header[0] & REMAINDER_MASK,
            source_exhausted: false,
            failed: false,
        })
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Returns up to `n` bits (fewer only once the stream is ending)
    /// left-aligned in the low `returned` bits of the result, without
    /// consuming them. Does not validate magic; call only after
    /// construction succeeds without [`has_failed`](Self::has_failed).
    pub fn peek_bits(&mut self, n: u8) -> Result<(u64, u8)> {
        debug_assert!((1..=64).contains(&n));
        if self.failed {
            return Ok((0, 0));
        }
        self.ensure_filled(n)?;
        let got = self.position.min(n);
        let value = if got == 0 {
            0
        } else {
            self.buffer >> (64 - got)
        };
        Ok((value, got))
    }

    pub fn discard_bits(&mut self, n: u8) -> Result<()> {
        if self.failed {
            return Ok(());
        }
        let n = n.min(self.position);
        self.buffer = if n == 64 { 0 } else { self.buffer << n };
        self.position -= n;
        Ok(())
    }

    pub fn read_bits(&mut self, n: u8) -> Result<(u64, u8)> {
        let (value, got) = self.peek_bits(n)?;
        self.discard_bits(got)?;
        Ok((value, got))
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let (v, got) = self.read_bits(8)?;
        if got != 8 {
            return Err(HuffmanCodecError::CorruptStream(
                "stream ended inside a codec-header field",
            ));
        }
        Ok(v as u8)
    }

    pub fn read_word(&mut self) -> Result<u16> {
        let (v, got) = self.read_bits(16)?;
        if got != 16 {
            return Err(HuffmanCodecError::CorruptStream(
                "stream ended inside a codec-header field",
            ));
        }
        Ok(v as u16)
    }

    /// True once the source has hit EOF and every remaining bit in the
    /// buffer is trailing padding rather than real data.
    pub fn fully_consumed(&mut self) -> bool {
        if self.failed {
            return true;
        }
        if !self.source_exhausted {
            // Top the buffer all the way off, not just by one bit: only a
            // real read attempt discovers EOF, and any bits already
            // buffered beyond `need` would otherwise hide that attempt
            // (they might be nothing but the header's trailing padding).
            if self.ensure_filled(64).is_err() {
                return true;
            }
        }
        self.source_exhausted && self.position == 0
    }

    /// Tops `buffer`/`position` up to at least `need` bits if possible,
    /// reading whole bytes from the source. Leaves `position < need` only
    /// if the source is exhausted.
    fn ensure_filled(&mut self, need: u8) -> Result<()> {
        while self.position < need && !self.source_exhausted {
            let free_bits = 64 - self.position;
            let free_bytes = (free_bits / 8) as usize;
            if free_bytes == 0 {
                break;
            }
            let mut chunk = [0u8; 8];
            let read = match self.source.read(&mut chunk[..free_bytes]) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Err(HuffmanCodecError::SourceReadFailed(e));
                }
            };
            if read == 0 {
                self.source_exhausted = true;
                // Trim the header-declared pad bits out of what's left so
                // they're never handed back to the caller as data.
                self.position = self.position.saturating_sub(self.remainder);
                break;
            }
            let mut value: u64 = 0;
            for &b in &chunk[..read] {
                value = (value << 8) | b as u64;
            }
            let shift = 64 - self.position - (read as u8) * 8;
            self.buffer |= value << shift;
            self.position += (read as u8) * 8;
        }
        Ok(())
    }
}

fn read_fully<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match source.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(HuffmanCodecError::SourceReadFailed(e)),
        }
    }
    Ok(total)
}
