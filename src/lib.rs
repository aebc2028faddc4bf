//! A self-describing bit-stream framing layer plus a chunked,
//! length-limited canonical Huffman encoder/decoder.
//!
//! Encoding and decoding go through [`huffman::HuffmanEncoder`] and
//! [`huffman::HuffmanDecoder`]; both are built on the bit-granular cursor
//! in [`bitstream`]. See the crate's `DESIGN.md` for the wire format and
//! the invariants each layer is responsible for.

pub mod bitstream;
pub mod config;
pub mod error;
pub mod huffman;

pub use config::HuffmanCodecConfig;
pub use error::{HuffmanCodecError, Result};
pub use huffman::{HuffmanDecoder, HuffmanEncoder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_and_decoder_agree_on_a_small_buffer() {
        let mut encoder = HuffmanEncoder::with_defaults();
        let encoded = encoder.encode_bytes(b"the quick brown fox").unwrap();

        let mut decoder = HuffmanDecoder::new();
        let decoded = decoder.decode_bytes(&encoded).unwrap();

        assert_eq!(decoded, b"the quick brown fox");
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut encoder = HuffmanEncoder::with_defaults();
        let mut encoded = encoder.encode_bytes(b"abc").unwrap();
        encoded[0] ^= 0xFF;

        let mut decoder = HuffmanDecoder::new();
        let err = decoder.decode_bytes(&encoded).unwrap_err();
        assert!(matches!(err, HuffmanCodecError::BadMagic));
    }
}
