pub mod cli;
pub mod config;
pub mod cursor;
pub mod error;
pub mod header;
pub mod input;
pub mod print;
pub mod reader;

pub use config::{QuotePolicy, ReaderOptions};
pub use cursor::{Cursor, Walk, drive};
pub use error::{Error, Result};
pub use input::Record;
pub use reader::SequentialRecordReader;
