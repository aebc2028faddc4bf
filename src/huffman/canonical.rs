//! Canonical ordering and canonical code assignment.

use super::types::CodeTable;

/// Sorts by `length` ascending, then `symbol` ascending. Binding order for
/// both the wire encoding of the code table and canonical code assignment.
pub fn sort_canonical(table: &mut CodeTable) {
    table.sort_by(|a, b| a.length.cmp(&b.length).then(a.symbol.cmp(&b.symbol)));
}

/// Assigns consecutive numeric codes to an already-canonically-sorted
/// table: the first code of the shortest length is 0, and within each
/// length codes are consecutive integers.
pub fn assign_codes(table: &mut CodeTable) {
    if table.is_empty() {
        return;
    }
    let mut code: u32 = 0;
    let mut prev_length = table[0].length;
    for record in table.iter_mut() {
        code <<= record.length - prev_length;
        record.code = code as u16;
        code += 1;
        prev_length = record.length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::types::CodeRecord;

    fn rec(symbol: u8, length: u8) -> CodeRecord {
        CodeRecord {
            symbol,
            code: 0,
            length,
        }
    }

    #[test]
    fn sorts_by_length_then_symbol() {
        let mut table: CodeTable = vec![rec(5, 2), rec(1, 1), rec(2, 1)].into_iter().collect();
        sort_canonical(&mut table);
        let ordered: Vec<_> = table.iter().map(|r| (r.length, r.symbol)).collect();
        assert_eq!(ordered, vec![(1, 1), (1, 2), (2, 5)]);
    }

    #[test]
    fn codes_are_consecutive_within_a_length() {
        let mut table: CodeTable = vec![rec(1, 1), rec(2, 2), rec(3, 3), rec(4, 3)]
            .into_iter()
            .collect();
        sort_canonical(&mut table);
        assign_codes(&mut table);
        let codes: Vec<_> = table.iter().map(|r| (r.length, r.code)).collect();
        assert_eq!(codes, vec![(1, 0), (2, 2), (3, 6), (3, 7)]);
    }
}
