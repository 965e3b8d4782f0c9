use std::io::BufRead;

use log::warn;

use super::{Record, RecordReader, decode, terminator_len};
use crate::config::{QuotePolicy, ReaderOptions};
use crate::error::{Error, Result};

/// RFC 4180 style delimited-text record reader.
///
/// Handles:
/// - a configurable single-byte delimiter and quote character
/// - quoted fields (embedded delimiters, line breaks, escaped `""`)
/// - CRLF and LF line endings
///
/// Reading is byte-oriented, so the quote state machine runs over raw
/// bytes and only completed fields are decoded.
pub struct CsvReader {
    delimiter: u8,
    quote: u8,
    policy: QuotePolicy,
    line: usize,
    buf: Vec<u8>,
}

impl CsvReader {
    pub fn new(delimiter: u8) -> Self {
        CsvReader {
            delimiter,
            quote: b'"',
            policy: QuotePolicy::Strict,
            line: 0,
            buf: Vec::with_capacity(256),
        }
    }

    /// Convenience constructor for standard CSV (comma-delimited).
    pub fn comma() -> Self {
        Self::new(b',')
    }

    pub fn from_options(options: &ReaderOptions) -> Result<Self> {
        let (delimiter, quote) = options.validate()?;
        Ok(Self::new(delimiter)
            .with_quote(quote)
            .with_policy(options.get_quote_policy()))
    }

    #[must_use]
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: QuotePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of physical lines consumed since the last reset.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl RecordReader for CsvReader {
    fn next_record(&mut self, reader: &mut dyn BufRead) -> Result<Option<Record>> {
        self.buf.clear();
        if reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let start_line = self.line;

        let mut splitter = FieldSplitter::new(self.delimiter, self.quote);
        loop {
            let end = self.buf.len() - terminator_len(&self.buf);
            splitter.feed(&self.buf[..end]);
            if !splitter.in_quotes() {
                break;
            }

            // The line break sits inside a quoted field: keep it and pull
            // in the next physical line.
            splitter.feed(&self.buf[end..]);
            self.buf.clear();
            if reader.read_until(b'\n', &mut self.buf)? == 0 {
                match self.policy {
                    QuotePolicy::Strict => {
                        return Err(Error::MalformedRecord { line: start_line });
                    }
                    QuotePolicy::Lenient => {
                        warn!(
                            "unterminated quote in record starting at line {}, keeping the rest of the data as one field",
                            start_line
                        );
                        break;
                    }
                }
            }
            self.line += 1;
        }

        Ok(Some(Record::new(splitter.finish())))
    }

    fn reset(&mut self) {
        self.line = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote seen inside a quoted field: either an escape or the close.
    QuoteInQuoted,
}

/// Incremental field splitter. Fed one physical line at a time so a
/// quoted field may span several lines.
struct FieldSplitter {
    delimiter: u8,
    quote: u8,
    state: State,
    field: Vec<u8>,
    fields: Vec<String>,
}

impl FieldSplitter {
    fn new(delimiter: u8, quote: u8) -> Self {
        FieldSplitter {
            delimiter,
            quote,
            state: State::FieldStart,
            field: Vec::new(),
            fields: Vec::new(),
        }
    }

    fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            match self.state {
                State::FieldStart if b == self.quote => self.state = State::Quoted,
                State::FieldStart | State::Unquoted if b == self.delimiter => self.end_field(),
                State::FieldStart | State::Unquoted => {
                    self.field.push(b);
                    self.state = State::Unquoted;
                }
                State::Quoted if b == self.quote => self.state = State::QuoteInQuoted,
                State::Quoted => self.field.push(b),
                State::QuoteInQuoted if b == self.quote => {
                    self.field.push(b);
                    self.state = State::Quoted;
                }
                State::QuoteInQuoted if b == self.delimiter => self.end_field(),
                // `"ab"c` keeps the trailing text literally
                State::QuoteInQuoted => {
                    self.field.push(b);
                    self.state = State::Unquoted;
                }
            }
        }
    }

    fn in_quotes(&self) -> bool {
        self.state == State::Quoted
    }

    fn end_field(&mut self) {
        let raw = std::mem::take(&mut self.field);
        self.fields.push(decode(raw));
        self.state = State::FieldStart;
    }

    fn finish(mut self) -> Vec<String> {
        self.end_field();
        self.fields
    }
}
