//! Kraft-McMillan length limiting.
//!
//! Clips any code length above `max_code_length` and rebalances the table
//! so the Kraft sum is restored to at most `2^max_code_length`, by
//! repeatedly lengthening the longest record that still has room to grow.
//! This is the scheme Charles Bloom describes for length-limited Huffman
//! codes; any algorithm preserving the Kraft, length-bound, and
//! determinism invariants is an acceptable substitute.

use super::types::CodeTable;
use crate::error::{HuffmanCodecError, Result};

/// `Sigma 2^(max_code_length - length_i)`, as a fixed-point integer with
/// `max_code_length` fractional bits. Legal values are `<= 2^max_code_length`.
pub fn kraft_sum(table: &CodeTable, max_code_length: u8) -> u64 {
    table
        .iter()
        .map(|r| 1u64 << (max_code_length - r.length))
        .sum()
}

/// Clips lengths to `max_code_length` and redistributes until the Kraft
/// sum is feasible again. Returns [`HuffmanCodecError::LengthLimitingFailed`]
/// if no record can be lengthened further and the sum is still too large
/// (only possible for a `max_code_length` too small for the alphabet).
pub fn clip_and_limit(table: &mut CodeTable, max_code_length: u8) -> Result<()> {
    for record in table.iter_mut() {
        if record.length > max_code_length {
            record.length = max_code_length;
        }
    }

    let limit = 1u64 << max_code_length;
    loop {
        let sum = kraft_sum(table, max_code_length);
        if sum <= limit {
            return Ok(());
        }

        let longest = table
            .iter_mut()
            .filter(|r| r.length < max_code_length)
            .max_by_key(|r| r.length);

        match longest {
            Some(record) => record.length += 1,
            None => {
                log::warn!(
                    "length limiting failed: kraft sum {sum} exceeds {limit} at max_code_length {max_code_length}"
                );
                return Err(HuffmanCodecError::LengthLimitingFailed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::types::CodeRecord;

    fn table_of(lengths: &[u8]) -> CodeTable {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &length)| CodeRecord {
                symbol: i as u8,
                code: 0,
                length,
            })
            .collect()
    }

    #[test]
    fn already_feasible_table_is_untouched() {
        let mut table = table_of(&[1, 2, 3, 3]);
        clip_and_limit(&mut table, 4).unwrap();
        assert_eq!(
            table.iter().map(|r| r.length).collect::<Vec<_>>(),
            vec![1, 2, 3, 3]
        );
    }

    #[test]
    fn clips_then_redistributes() {
        // 16 symbols each length 8 has kraft sum 16 * 2^(4-8)... use max=5 instead.
        let mut lengths = vec![6u8; 20];
        lengths.extend(vec![1u8, 2]);
        let mut table = table_of(&lengths);
        clip_and_limit(&mut table, 5).unwrap();
        assert!(table.iter().all(|r| r.length <= 5 && r.length >= 1));
        assert!(kraft_sum(&table, 5) <= 1u64 << 5);
    }

    #[test]
    fn infeasible_limit_reports_failure() {
        let mut table = table_of(&[1, 1, 1, 1, 1]);
        let err = clip_and_limit(&mut table, 1).unwrap_err();
        assert!(matches!(err, HuffmanCodecError::LengthLimitingFailed));
    }
}
