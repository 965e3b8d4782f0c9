pub mod csv;
pub mod line;

use std::io::BufRead;

use crate::error::Result;

/// One parsed unit of input: an ordered sequence of string fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Record { fields }
    }

    /// The record with no fields, returned when nothing is loaded.
    pub const fn empty() -> Self {
        Record { fields: Vec::new() }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.fields.get(i).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Record { fields: iter.into_iter().map(Into::into).collect() }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Strategy for reading one record from a byte stream.
/// `CsvReader` splits delimited text; `LineReader` yields whole lines.
pub trait RecordReader {
    /// Read the next record, or `None` at end of data.
    fn next_record(&mut self, reader: &mut dyn BufRead) -> Result<Option<Record>>;

    /// The stream was repositioned to its start.
    fn reset(&mut self) {}
}

/// Decode raw field bytes, replacing invalid UTF-8.
pub(crate) fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Length of the trailing `\n` or `\r\n`, if any.
pub(crate) fn terminator_len(buf: &[u8]) -> usize {
    match buf {
        [.., b'\r', b'\n'] => 2,
        [.., b'\n'] => 1,
        _ => 0,
    }
}
