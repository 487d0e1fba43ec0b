//! Block-oriented IQ stream reader, adapted from the teacher's
//! `IQRecording::read_iq_file` (original `recording.rs`) buffered-reader
//! loop: instead of seeking to an arbitrary sample offset, `gps_corr`
//! consumes one `2*N`-byte block at a time from a file or stdin, so this
//! reader is a simple sequential block iterator with short-read detection
//! (spec.md §6/§7).

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::AcqError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IqFormat {
    U8,
    S8,
}

impl std::str::FromStr for IqFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "u8" => Ok(IqFormat::U8),
            "s8" => Ok(IqFormat::S8),
            other => Err(format!("unknown IQ format '{other}' (expected u8 or s8)")),
        }
    }
}

/// Reads fixed `2*N`-byte blocks from any `Read` source.
pub struct BlockReader<R: Read> {
    inner: R,
    block_bytes: usize,
    buf: Vec<u8>,
}

impl<R: Read> BlockReader<R> {
    pub fn new(inner: R, n: usize) -> Self {
        let block_bytes = 2 * n;
        Self {
            inner,
            block_bytes,
            buf: vec![0u8; block_bytes],
        }
    }

    /// Reads one block. Returns `Ok(None)` on a clean end-of-stream at a
    /// block boundary, `Err` on a short read (spec.md §7 I/O short read).
    pub fn read_block(&mut self) -> Result<Option<&[u8]>, AcqError> {
        let mut total = 0usize;
        while total < self.block_bytes {
            let n = self
                .inner
                .read(&mut self.buf[total..])
                .map_err(|e| AcqError::Io(e.to_string()))?;
            if n == 0 {
                break;
            }
            total += n;
        }

        if total == 0 {
            return Ok(None);
        }
        if total != self.block_bytes {
            return Err(AcqError::ShortRead {
                wanted: self.block_bytes,
                got: total,
            });
        }
        Ok(Some(&self.buf[..self.block_bytes]))
    }
}

/// Opens `path` for block reading, or stdin if `path` is `None`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>, AcqError> {
    match path {
        Some(p) => {
            let file =
                File::open(p).map_err(|e| AcqError::IoOpen(format!("{}: {e}", p.display())))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_full_blocks_then_clean_eof() {
        let data = vec![1u8; 20]; // two blocks of N=5 (2*5=10 bytes each)
        let mut reader = BlockReader::new(Cursor::new(data), 5);

        assert!(reader.read_block().unwrap().is_some());
        assert!(reader.read_block().unwrap().is_some());
        assert!(reader.read_block().unwrap().is_none());
    }

    #[test]
    fn short_read_is_an_error() {
        let data = vec![1u8; 7]; // N=5 needs 10 bytes
        let mut reader = BlockReader::new(Cursor::new(data), 5);
        let err = reader.read_block().unwrap_err();
        assert!(matches!(err, AcqError::ShortRead { wanted: 10, got: 7 }));
    }
}
