//! Reader configuration: delimiter, quote character and what to do with
//! a quoted field that never closes.

use std::path::Path;

use crate::error::{Error, Result};

/// What the CSV strategy does when the data ends inside a quoted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotePolicy {
    /// Fail the read with `Error::MalformedRecord`.
    #[default]
    Strict,
    /// Keep everything up to end of data as the field's content.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    delimiter: char,
    quote: char,
    quote_policy: QuotePolicy,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            delimiter: ',',
            quote: '"',
            quote_policy: QuotePolicy::Strict,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a delimiter from the file extension: tab for `.tsv`/`.tab`,
    /// comma for everything else.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("tsv") | Some("tab") => Self::default().delimiter('\t'),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    #[must_use]
    pub fn quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    pub fn get_delimiter(&self) -> char {
        self.delimiter
    }

    pub fn get_quote_policy(&self) -> QuotePolicy {
        self.quote_policy
    }

    /// Check the options and return the delimiter and quote as bytes.
    pub fn validate(&self) -> Result<(u8, u8)> {
        let delimiter = single_byte("delimiter", self.delimiter)?;
        let quote = single_byte("quote", self.quote)?;
        if delimiter == quote {
            return Err(Error::InvalidOptions(format!(
                "delimiter and quote are both {:?}",
                self.delimiter
            )));
        }
        Ok((delimiter, quote))
    }
}

fn single_byte(what: &str, c: char) -> Result<u8> {
    if !c.is_ascii() {
        return Err(Error::InvalidOptions(format!("{} {:?} is not ASCII", what, c)));
    }
    if c == '\n' || c == '\r' {
        return Err(Error::InvalidOptions(format!("{} cannot be a line break", what)));
    }
    Ok(c as u8)
}
