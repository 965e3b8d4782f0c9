use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The data source could not be opened at construction time.
    #[error("the file \"{}\" cannot be read: {source}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A quoted field was still open when the data ran out.
    /// `line` is the 1-based line on which the record started.
    #[error("unterminated quoted field in record starting at line {line}")]
    MalformedRecord { line: usize },

    #[error("invalid reader options: {0}")]
    InvalidOptions(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
