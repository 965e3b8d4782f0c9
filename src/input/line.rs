use std::io::BufRead;

use super::{Record, RecordReader, decode, terminator_len};
use crate::error::Result;

/// One record per line, held as a single field. No splitting, no quoting.
/// Reuses a read buffer across records to minimise allocations.
pub struct LineReader {
    buf: Vec<u8>,
}

impl Default for LineReader {
    fn default() -> Self {
        LineReader { buf: Vec::with_capacity(256) }
    }
}

impl LineReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordReader for LineReader {
    fn next_record(&mut self, reader: &mut dyn BufRead) -> Result<Option<Record>> {
        self.buf.clear();
        if reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let end = self.buf.len() - terminator_len(&self.buf);
        let text = decode(self.buf[..end].to_vec());
        Ok(Some(Record::new(vec![text])))
    }
}
