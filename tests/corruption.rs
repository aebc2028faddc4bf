//! Corruption-detection and bad-magic properties.

use huffman_codec::{HuffmanCodecError, HuffmanDecoder, HuffmanEncoder};

#[test]
fn flipped_magic_byte_is_rejected() {
    let mut encoder = HuffmanEncoder::with_defaults();
    let mut encoded = encoder.encode_bytes(&[0x41, 0x42, 0x41]).unwrap();
    encoded[0] ^= 0xFF;

    let mut decoder = HuffmanDecoder::new();
    let err = decoder.decode_bytes(&encoded).unwrap_err();
    assert!(matches!(err, HuffmanCodecError::BadMagic));
}

#[test]
fn unknown_version_is_rejected() {
    let mut encoder = HuffmanEncoder::with_defaults();
    let mut encoded = encoder.encode_bytes(b"abc").unwrap();
    encoded[1] = 0xFE;

    let mut decoder = HuffmanDecoder::new();
    let err = decoder.decode_bytes(&encoded).unwrap_err();
    assert!(matches!(err, HuffmanCodecError::UnsupportedVersion(0xFE)));
}

#[test]
fn nn_exceeding_max_code_length_is_corrupt() {
    let mut encoder = HuffmanEncoder::with_defaults();
    let mut encoded = encoder.encode_bytes(b"aaaa").unwrap();
    // byte 5 is the first per-chunk NN field.
    encoded[5] = 0xFF;

    let mut decoder = HuffmanDecoder::new();
    let err = decoder.decode_bytes(&encoded).unwrap_err();
    assert!(matches!(err, HuffmanCodecError::CorruptStream(_)));
}

#[test]
fn truncated_codec_header_is_corrupt_not_garbage() {
    let mut encoder = HuffmanEncoder::with_defaults();
    let encoded = encoder.encode_bytes(b"the quick brown fox jumps").unwrap();
    // Cut off partway through the 16-bit chunk_size_kb field.
    let truncated = &encoded[..3];

    let mut decoder = HuffmanDecoder::new();
    let err = decoder.decode_bytes(truncated).unwrap_err();
    assert!(matches!(err, HuffmanCodecError::CorruptStream(_)));
}

#[test]
fn kraft_violating_length_count_is_corrupt() {
    // "ab" builds a one-length table (both symbols get length 1, NN = 1).
    // With the default max_code_length of 11, N_1's wire field sits in the
    // first 64-bit flush as: byte[6] = N_1's high 8 bits, and bit 0x80 of
    // byte[7] = N_1's low bit (see DESIGN.md for the framing layout).
    // Flipping that bit turns the real count (2) into 3, which still
    // satisfies NN <= max_code_length and total_symbols <= 256 but breaks
    // the Kraft inequality (3 * 2^(11-1) = 3072 > 2^11 = 2048).
    let mut encoder = HuffmanEncoder::with_defaults();
    let mut encoded = encoder.encode_bytes(b"ab").unwrap();
    assert_eq!(encoded[5], 1, "NN must be 1 for this test's premise to hold");
    encoded[7] ^= 0x80;

    let mut decoder = HuffmanDecoder::new();
    let err = decoder.decode_bytes(&encoded).unwrap_err();
    assert!(matches!(err, HuffmanCodecError::CorruptStream(_)));
}

#[test]
fn empty_byte_slice_is_rejected_as_truncated_header() {
    let mut decoder = HuffmanDecoder::new();
    let err = decoder.decode_bytes(&[]).unwrap_err();
    assert!(matches!(err, HuffmanCodecError::CorruptStream(_)));
}
