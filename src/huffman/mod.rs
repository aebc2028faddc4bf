//! Length-limited canonical Huffman coding: tree construction, length
//! limiting, canonical code assignment, and the chunked encoder/decoder
//! drivers built on top of [`crate::bitstream`].

pub mod canonical;
pub mod decoder;
pub mod encoder;
pub mod limit;
pub mod prefix_table;
pub mod tree;
pub mod types;

pub use decoder::HuffmanDecoder;
pub use encoder::HuffmanEncoder;

/// Current codec header version. Decoders must reject anything else.
pub(crate) const CODEC_VERSION: u8 = 1;

/// Width of the per-length symbol-count field (`N_l`) in a chunk header.
///
/// `spec.md` documents this field as 8 bits, but a chunk whose alphabet is
/// a perfectly balanced 256-symbol tree assigns all 256 symbols the same
/// code length (see the "every byte value once" scenario), which an 8-bit
/// field cannot represent. Widened to 9 bits so that legitimate case still
/// round-trips; see DESIGN.md.
pub(crate) const N_LENGTH_FIELD_BITS: u8 = 9;
