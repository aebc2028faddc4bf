use std::error::Error;
use std::fmt::Display;
use std::io::ErrorKind;

/// Error types that may occur while encoding or decoding a Huffman stream.
///
/// Reads and writes against the underlying byte source/sink are folded into
/// [`HuffmanCodecError::SourceReadFailed`] and
/// [`HuffmanCodecError::SinkWriteFailed`] at the call site, since a bare
/// `std::io::Error` cannot by itself tell a reader failure from a writer
/// failure.
#[derive(Debug)]
pub enum HuffmanCodecError {
    /// The underlying byte source returned an error on read (distinct from EOF).
    SourceReadFailed(std::io::Error),
    /// The underlying byte sink returned an error on write.
    SinkWriteFailed(std::io::Error),
    /// The bit-stream header's magic field did not match on decode.
    BadMagic,
    /// The codec header's version field is not recognized by this decoder.
    UnsupportedVersion(u8),
    /// A caller-supplied parameter is out of range.
    InvalidParameter(&'static str),
    /// The encoded stream is structurally invalid (failed Kraft check, bad
    /// chunk header, truncated table or payload).
    CorruptStream(&'static str),
    /// The length-limiting algorithm could not bring the Kraft sum back
    /// under the limit. Should not happen for any `max_code_length >=
    /// ceil(log2(alphabet_size))`; kept as a guard rather than a panic.
    LengthLimitingFailed,
}

impl Error for HuffmanCodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HuffmanCodecError::SourceReadFailed(e) => Some(e),
            HuffmanCodecError::SinkWriteFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for HuffmanCodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HuffmanCodecError::SourceReadFailed(e) => write!(f, "source read failed: {e}"),
            HuffmanCodecError::SinkWriteFailed(e) => write!(f, "sink write failed: {e}"),
            HuffmanCodecError::BadMagic => f.write_str("bit-stream header magic mismatch"),
            HuffmanCodecError::UnsupportedVersion(v) => {
                write!(f, "unsupported codec header version: {v}")
            }
            HuffmanCodecError::InvalidParameter(why) => write!(f, "invalid parameter: {why}"),
            HuffmanCodecError::CorruptStream(why) => write!(f, "corrupt stream: {why}"),
            HuffmanCodecError::LengthLimitingFailed => {
                f.write_str("length-limiting failed to restore the Kraft inequality")
            }
        }
    }
}

impl From<HuffmanCodecError> for std::io::Error {
    fn from(e: HuffmanCodecError) -> Self {
        match e {
            HuffmanCodecError::SourceReadFailed(e) | HuffmanCodecError::SinkWriteFailed(e) => e,
            other => std::io::Error::new(ErrorKind::InvalidData, other),
        }
    }
}

/// Result type for the Huffman coding subsystem.
pub type Result<T> = std::result::Result<T, HuffmanCodecError>;
