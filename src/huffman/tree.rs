//! Histogram, tree growth, and standard (un-length-limited) code lengths.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::types::{Arena, CodeRecord, CodeTable, Frequency, Node, ALPHABET_SIZE};
use crate::error::{HuffmanCodecError, Result};

/// Counts each symbol's occurrences in `chunk`.
pub fn histogram(chunk: &[u8]) -> [Frequency; ALPHABET_SIZE] {
    let mut counts = [0u64; ALPHABET_SIZE];
    for &b in chunk {
        counts[b as usize] += 1;
    }
    counts
}

/// Grows a Huffman tree from a histogram and returns one `(symbol, length)`
/// record per symbol with nonzero frequency, already in canonical order
/// (length ascending, then symbol ascending).
///
/// A chunk with exactly one distinct symbol is a degenerate case: the tree
/// has a single leaf at depth 0, which would otherwise assign `length = 0`.
/// It is forced to 1 instead so the symbol still has a real code.
pub fn build_standard_lengths(counts: &[Frequency; ALPHABET_SIZE]) -> Result<CodeTable> {
    let mut arena: Arena = Arena::new();
    let mut heap: BinaryHeap<Reverse<(Frequency, u16)>> = BinaryHeap::new();

    for (symbol, &frequency) in counts.iter().enumerate() {
        if frequency == 0 {
            continue;
        }
        let idx = arena.len() as u16;
        arena
            .try_push(Node::Leaf {
                symbol: symbol as u8,
                frequency,
            })
            .map_err(|_| HuffmanCodecError::CorruptStream("huffman node arena overflow"))?;
        heap.push(Reverse((frequency, idx)));
    }

    if heap.is_empty() {
        return Ok(CodeTable::new());
    }

    while heap.len() > 1 {
        let Reverse((freq_a, a)) = heap.pop().unwrap();
        let Reverse((freq_b, b)) = heap.pop().unwrap();
        let idx = arena.len() as u16;
        arena
            .try_push(Node::Internal {
                frequency: freq_a + freq_b,
                left: a,
                right: b,
            })
            .map_err(|_| HuffmanCodecError::CorruptStream("huffman node arena overflow"))?;
        heap.push(Reverse((freq_a + freq_b, idx)));
    }

    let Reverse((_, root)) = heap.pop().unwrap();

    let mut table = CodeTable::new();
    let mut stack: Vec<(u16, u8)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        match arena[node as usize] {
            Node::Leaf { symbol, .. } => {
                let length = depth.max(1);
                table
                    .try_push(CodeRecord {
                        symbol,
                        code: 0,
                        length,
                    })
                    .map_err(|_| HuffmanCodecError::CorruptStream("code table overflow"))?;
            }
            Node::Internal { left, right, .. } => {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
    }

    super::canonical::sort_canonical(&mut table);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_each_byte() {
        let counts = histogram(b"aab");
        assert_eq!(counts[b'a' as usize], 2);
        assert_eq!(counts[b'b' as usize], 1);
        assert_eq!(counts.iter().sum::<u64>(), 3);
    }

    #[test]
    fn degenerate_single_symbol_gets_length_one() {
        let counts = histogram(b"aaaa");
        let table = build_standard_lengths(&counts).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].symbol, b'a');
        assert_eq!(table[0].length, 1);
    }

    #[test]
    fn two_symbols_get_length_one_each() {
        let counts = histogram(b"abab");
        let table = build_standard_lengths(&counts).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.length == 1));
    }

    #[test]
    fn empty_chunk_yields_empty_table() {
        let counts = histogram(b"");
        let table = build_standard_lengths(&counts).unwrap();
        assert!(table.is_empty());
    }
}
