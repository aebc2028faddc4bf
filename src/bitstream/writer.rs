use std::io::{Seek, SeekFrom, Write};

use crate::error::{HuffmanCodecError, Result};

use super::header_byte;

#[cfg(test)]
use super::REMAINDER_MASK;

/// A bit-granular cursor over a byte sink.
///
/// Bits accumulate MSB-first into a 64-bit staging word (`buffer`); once 64
/// bits have been written the word is flushed to the sink as 8 big-endian
/// bytes. A placeholder header byte is written at construction time and
/// patched in place by [`finish`](BitStreamWriter::finish) once the true
/// trailing-bit remainder is known, mirroring how the original C++
/// `BitStreamWriter` rewrites its header on an `ostream`.
///
/// Once a write to the sink fails the writer enters a sticky failed state:
/// further bit writes are silent no-ops and `finish()` reports the failure.
pub struct BitStreamWriter<W: Write + Seek> {
    sink: W,
    buffer: u64,
    /// Number of valid bits currently staged in `buffer`, MSB-aligned.
    position: u8,
    header_pos: u64,
    failed: bool,
}

impl<W: Write + Seek> BitStreamWriter<W> {
    pub fn new(mut sink: W) -> Result<Self> {
        let header_pos = sink
            .stream_position()
            .map_err(HuffmanCodecError::SinkWriteFailed)?;
        sink.write_all(&[header_byte(0)])
            .map_err(HuffmanCodecError::SinkWriteFailed)?;
        Ok(Self {
            sink,
            buffer: 0,
            position: 0,
            header_pos,
            failed: false,
        })
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Appends the low `n` bits of `value`, most-significant bit first.
    /// `n` must be in `1..=64`.
    pub fn write_bits(&mut self, value: u64, n: u8) -> Result<()> {
        debug_assert!((1..=64).contains(&n));
        if self.failed {
            return Ok(());
        }
        let masked = mask(value, n);
        let space = 64 - self.position;
        if n <= space {
            self.buffer |= masked << (space - n);
            self.position += n;
            if self.position == 64 {
                self.flush_buffer()?;
            }
        } else {
            let hi_bits = space;
            let hi = masked >> (n - hi_bits);
            self.buffer |= hi;
            self.position = 64;
            self.flush_buffer()?;
            let lo_n = n - hi_bits;
            self.buffer = mask(masked, lo_n) << (64 - lo_n);
            self.position = lo_n;
        }
        Ok(())
    }

    pub fn write_byte(&mut self, b: u8) -> Result<()> {
        self.write_bits(b as u64, 8)
    }

    pub fn write_word(&mut self, w: u16) -> Result<()> {
        self.write_bits(w as u64, 16)
    }

    fn flush_buffer(&mut self) -> Result<()> {
        let bytes = self.buffer.to_be_bytes();
        if let Err(e) = self.sink.write_all(&bytes) {
            self.failed = true;
            return Err(HuffmanCodecError::SinkWriteFailed(e));
        }
        self.buffer = 0;
        self.position = 0;
        Ok(())
    }

    /// Flushes any partial trailing byte, patches the header's remainder
    /// field, and reports whether every write to the sink succeeded.
    pub fn finish(mut self) -> Result<W> {
        if self.failed {
            return Err(HuffmanCodecError::SinkWriteFailed(std::io::Error::new(
                std::io::ErrorKind::Other,
                "bit-stream writer already failed",
            )));
        }
        let remainder = if self.position == 0 {
            0
        } else {
            let whole_bytes = (self.position as u32).div_ceil(8) as u8;
            let bytes = self.buffer.to_be_bytes();
            if let Err(e) = self.sink.write_all(&bytes[..whole_bytes as usize]) {
                self.failed = true;
                return Err(HuffmanCodecError::SinkWriteFailed(e));
            }
            (8 - (self.position % 8)) % 8
        };
        self.sink
            .seek(SeekFrom::Start(self.header_pos))
            .map_err(HuffmanCodecError::SinkWriteFailed)?;
        self.sink
            .write_all(&[header_byte(remainder)])
            .map_err(HuffmanCodecError::SinkWriteFailed)?;
        self.sink
            .seek(SeekFrom::End(0))
            .map_err(HuffmanCodecError::SinkWriteFailed)?;
        Ok(self.sink)
    }
}

fn mask(value: u64, n: u8) -> u64 {
    if n >= 64 {
        value
    } else {
        value & ((1u64 << n) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_stream_header_has_zero_remainder() {
        let writer = BitStreamWriter::new(Cursor::new(Vec::new())).unwrap();
        let sink = writer.finish().unwrap().into_inner();
        assert_eq!(sink[0], header_byte(0));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn single_bit_sets_remainder_to_seven() {
        let mut w = BitStreamWriter::new(Cursor::new(Vec::new())).unwrap();
        w.write_bits(0, 1).unwrap();
        let sink = w.finish().unwrap().into_inner();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0] & REMAINDER_MASK, 7);
    }

    #[test]
    fn exact_byte_has_zero_remainder() {
        let mut w = BitStreamWriter::new(Cursor::new(Vec::new())).unwrap();
        w.write_byte(0xAB).unwrap();
        let sink = w.finish().unwrap().into_inner();
        assert_eq!(sink, vec![header_byte(0), 0xAB]);
    }

    #[test]
    fn crosses_64_bit_boundary() {
        let mut w = BitStreamWriter::new(Cursor::new(Vec::new())).unwrap();
        for _ in 0..9 {
            w.write_byte(0xFF).unwrap();
        }
        let sink = w.finish().unwrap().into_inner();
        assert_eq!(sink.len(), 1 + 9);
        assert!(sink[1..].iter().all(|&b| b == 0xFF));
    }
}
