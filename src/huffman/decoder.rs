//! Chunk-at-a-time decoder driver: read header -> read code table ->
//! materialize prefix table -> decode symbols -> flush.

use std::io::{Read, Write};

use crate::bitstream::BitStreamReader;
use crate::error::{HuffmanCodecError, Result};

use super::prefix_table::PrefixTable;
use super::types::{CodeRecord, CodeTable};
use super::{canonical, CODEC_VERSION, N_LENGTH_FIELD_BITS};

pub struct HuffmanDecoder {
    chunk_buffer: Vec<u8>,
    prefix_table: Option<PrefixTable>,
    code_table: CodeTable,
}

impl HuffmanDecoder {
    pub fn new() -> Self {
        Self {
            chunk_buffer: Vec::new(),
            prefix_table: None,
            code_table: CodeTable::new(),
        }
    }

    pub fn decode_stream<R: Read, W: Write>(&mut self, source: R, mut sink: W) -> Result<()> {
        let mut reader = BitStreamReader::new(source)?;
        if reader.has_failed() {
            return Err(HuffmanCodecError::BadMagic);
        }

        let version = reader.read_byte()?;
        if version != CODEC_VERSION {
            return Err(HuffmanCodecError::UnsupportedVersion(version));
        }

        let chunk_size_kb = reader.read_word()?;
        let max_code_length = reader.read_byte()?;
        if max_code_length == 0 || max_code_length >= 16 {
            return Err(HuffmanCodecError::InvalidParameter(
                "max_code_length out of range",
            ));
        }

        let chunk_size = chunk_size_kb as usize * 1024;
        if chunk_size == 0 {
            return Err(HuffmanCodecError::InvalidParameter("chunk_size is zero"));
        }
        self.chunk_buffer.clear();
        self.chunk_buffer.resize(chunk_size, 0);
        match &mut self.prefix_table {
            Some(t) => t.resize(max_code_length),
            None => self.prefix_table = Some(PrefixTable::new(max_code_length)),
        }

        while !reader.fully_consumed() {
            self.decode_chunk(&mut reader, max_code_length, &mut sink)?;
        }
        Ok(())
    }

    pub fn decode_bytes(&mut self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut sink = Vec::new();
        self.decode_stream(std::io::Cursor::new(bytes), &mut sink)?;
        Ok(sink)
    }

    pub fn decode_file(
        &mut self,
        in_path: &std::path::Path,
        out_path: &std::path::Path,
    ) -> Result<()> {
        let source = std::fs::File::open(in_path).map_err(HuffmanCodecError::SourceReadFailed)?;
        let sink = std::fs::File::create(out_path).map_err(HuffmanCodecError::SinkWriteFailed)?;
        self.decode_stream(source, sink)
    }

    fn decode_chunk<R: Read, W: Write>(
        &mut self,
        reader: &mut BitStreamReader<R>,
        max_code_length: u8,
        sink: &mut W,
    ) -> Result<()> {
        let nn = reader.read_byte()?;
        if nn == 0 || nn > max_code_length {
            return Err(HuffmanCodecError::CorruptStream(
                "chunk's NN exceeds max_code_length",
            ));
        }

        let mut counts = vec![0u32; nn as usize + 1];
        for slot in counts.iter_mut().skip(1) {
            let (v, got) = reader.read_bits(N_LENGTH_FIELD_BITS)?;
            if got != N_LENGTH_FIELD_BITS {
                return Err(HuffmanCodecError::CorruptStream("truncated code table"));
            }
            *slot = v as u32;
        }

        let total_symbols: u32 = counts.iter().sum();
        if total_symbols == 0 || total_symbols > 256 {
            return Err(HuffmanCodecError::CorruptStream(
                "chunk symbol count out of range",
            ));
        }

        let kraft: u64 = counts
            .iter()
            .enumerate()
            .skip(1)
            .map(|(len, &n)| n as u64 * (1u64 << (max_code_length - len as u8)))
            .sum();
        if kraft > 1u64 << max_code_length {
            return Err(HuffmanCodecError::CorruptStream(
                "chunk code lengths violate the Kraft inequality",
            ));
        }

        self.code_table.clear();
        for (length, &count) in counts.iter().enumerate().skip(1) {
            for _ in 0..count {
                let symbol = reader.read_byte()?;
                self.code_table
                    .try_push(CodeRecord {
                        symbol,
                        code: 0,
                        length: length as u8,
                    })
                    .map_err(|_| HuffmanCodecError::CorruptStream("code table overflow"))?;
            }
        }

        canonical::assign_codes(&mut self.code_table);
        let prefix_table = self.prefix_table.as_mut().expect("resized in decode_stream");
        prefix_table.build(&self.code_table);

        let mut produced = 0usize;
        while produced < self.chunk_buffer.len() {
            let (bits, got) = reader.peek_bits(max_code_length)?;
            if got == 0 {
                if reader.fully_consumed() {
                    break;
                }
                return Err(HuffmanCodecError::CorruptStream(
                    "truncated payload: peek returned 0 bits before all symbols decoded",
                ));
            }
            let index = (bits << (max_code_length - got)) as usize;
            let record = prefix_table.lookup(index);
            self.chunk_buffer[produced] = record.symbol;
            reader.discard_bits(record.length)?;
            produced += 1;
            if reader.fully_consumed() {
                break;
            }
        }

        sink.write_all(&self.chunk_buffer[..produced])
            .map_err(HuffmanCodecError::SinkWriteFailed)?;
        log::trace!("decoded chunk of {produced} bytes");
        Ok(())
    }
}

impl Default for HuffmanDecoder {
    fn default() -> Self {
        Self::new()
    }
}
