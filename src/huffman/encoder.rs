//! Chunk-at-a-time encoder driver: histogram -> tree -> codes -> limit ->
//! canonicalize -> emit header -> emit code table -> emit symbols.

use std::io::{Read, Seek, Write};

use crate::bitstream::BitStreamWriter;
use crate::config::HuffmanCodecConfig;
use crate::error::{HuffmanCodecError, Result};

use super::types::CodeTable;
use super::{canonical, limit, tree, CODEC_VERSION, N_LENGTH_FIELD_BITS};

pub struct HuffmanEncoder {
    config: HuffmanCodecConfig,
    chunk_buffer: Vec<u8>,
}

impl HuffmanEncoder {
    pub fn new(config: HuffmanCodecConfig) -> Self {
        let chunk_buffer = vec![0u8; config.chunk_size() as usize];
        Self {
            config,
            chunk_buffer,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(HuffmanCodecConfig::default())
    }

    pub fn encode_stream<R: Read, W: Write + Seek>(&mut self, mut source: R, sink: W) -> Result<()> {
        let mut writer = BitStreamWriter::new(sink)?;
        writer.write_byte(CODEC_VERSION)?;
        writer.write_word(self.config.chunk_size_kb())?;
        writer.write_byte(self.config.max_code_length())?;

        loop {
            let n = fill_chunk(&mut source, &mut self.chunk_buffer)?;
            if n == 0 {
                break;
            }
            log::trace!("encoding chunk of {n} bytes");
            encode_chunk(
                &self.chunk_buffer[..n],
                self.config.max_code_length(),
                &mut writer,
            )?;
        }

        writer.finish()?;
        Ok(())
    }

    pub fn encode_bytes(&mut self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut sink = std::io::Cursor::new(Vec::new());
        self.encode_stream(std::io::Cursor::new(bytes), &mut sink)?;
        Ok(sink.into_inner())
    }

    pub fn encode_file(&mut self, in_path: &std::path::Path, out_path: &std::path::Path) -> Result<()> {
        let source = std::fs::File::open(in_path).map_err(HuffmanCodecError::SourceReadFailed)?;
        let sink = std::fs::File::create(out_path).map_err(HuffmanCodecError::SinkWriteFailed)?;
        self.encode_stream(source, sink)
    }
}

fn fill_chunk<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match source.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(HuffmanCodecError::SourceReadFailed(e)),
        }
    }
    Ok(total)
}

fn encode_chunk<W: Write + Seek>(
    chunk: &[u8],
    max_code_length: u8,
    writer: &mut BitStreamWriter<W>,
) -> Result<()> {
    let counts = tree::histogram(chunk);
    let mut table: CodeTable = tree::build_standard_lengths(&counts)?;

    limit::clip_and_limit(&mut table, max_code_length)?;
    canonical::sort_canonical(&mut table);
    canonical::assign_codes(&mut table);

    emit_code_table(&table, writer)?;
    emit_symbols(chunk, &table, writer)?;
    Ok(())
}

fn emit_code_table<W: Write + Seek>(
    table: &CodeTable,
    writer: &mut BitStreamWriter<W>,
) -> Result<()> {
    let nn = table.iter().map(|r| r.length).max().unwrap_or(0);
    writer.write_byte(nn)?;

    let mut counts_by_length = vec![0u32; nn as usize + 1];
    for r in table {
        counts_by_length[r.length as usize] += 1;
    }
    for &count in &counts_by_length[1..=nn as usize] {
        writer.write_bits(count as u64, N_LENGTH_FIELD_BITS)?;
    }
    for r in table {
        writer.write_byte(r.symbol)?;
    }
    Ok(())
}

fn emit_symbols<W: Write + Seek>(
    chunk: &[u8],
    table: &CodeTable,
    writer: &mut BitStreamWriter<W>,
) -> Result<()> {
    let mut lookup = [None; 256];
    for r in table {
        lookup[r.symbol as usize] = Some((r.code, r.length));
    }
    for &b in chunk {
        let (code, length) = lookup[b as usize].expect("symbol absent from its own chunk's table");
        writer.write_bits(code as u64, length)?;
    }
    Ok(())
}
