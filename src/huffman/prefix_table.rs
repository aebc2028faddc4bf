//! Flat decode lookup table, sized `2^max_code_length`.
//!
//! For a code `c` of length `l`, every index whose top `l` bits equal `c`
//! (there are `2^(max_code_length - l)` of them) stores the matching
//! record. Decoding then costs one peek plus one table index, regardless
//! of code length.

use super::types::{CodeRecord, CodeTable};

pub struct PrefixTable {
    entries: Vec<CodeRecord>,
    max_code_length: u8,
}

impl PrefixTable {
    pub fn new(max_code_length: u8) -> Self {
        Self {
            entries: vec![CodeRecord::default(); 1usize << max_code_length],
            max_code_length,
        }
    }

    /// Resizes in place only if `max_code_length` changed since the last
    /// stream, per the decoder's "resize lazily per stream" contract.
    pub fn resize(&mut self, max_code_length: u8) {
        if max_code_length != self.max_code_length || self.entries.len() != 1usize << max_code_length
        {
            *self = Self::new(max_code_length);
        }
    }

    /// Populates every index whose top bits match a code in `table`.
    /// `table` must already carry canonical codes (see
    /// [`super::canonical::assign_codes`]).
    pub fn build(&mut self, table: &CodeTable) {
        for r in self.entries.iter_mut() {
            *r = CodeRecord::default();
        }
        for record in table {
            let shift = self.max_code_length - record.length;
            let start = (record.code as usize) << shift;
            let end = start + (1usize << shift);
            self.entries[start..end].fill(*record);
        }
    }

    pub fn lookup(&self, index: usize) -> CodeRecord {
        self.entries[index]
    }

    pub fn max_code_length(&self) -> u8 {
        self.max_code_length
    }
}
