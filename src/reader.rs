use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::config::ReaderOptions;
use crate::cursor::{Cursor, Walk};
use crate::error::{Error, Result};
use crate::input::csv::CsvReader;
use crate::input::{Record, RecordReader};

static EMPTY: Record = Record::empty();

/// What the cursor currently holds.
#[derive(Debug)]
enum Slot {
    /// Nothing read since construction.
    Unloaded,
    Loaded(Record),
    /// End of data observed.
    End,
}

/// Forward-only, single-pass cursor over the records of a data source.
///
/// The source is opened on construction and held until the first time
/// [`is_valid`](Self::is_valid) observes the end of data, until
/// [`close`](Self::close) is called, or until the reader is dropped. Once
/// released it is never reopened: the reader stays exhausted.
///
/// Iteration follows the [`Cursor`] protocol:
///
/// ```no_run
/// use csvwalk::SequentialRecordReader;
///
/// let mut csv = SequentialRecordReader::open("cats.csv")?;
/// csv.rewind()?;
/// while csv.is_valid() {
///     println!("{}: {:?}", csv.key(), csv.current());
///     csv.advance()?;
/// }
/// # Ok::<(), csvwalk::Error>(())
/// ```
pub struct SequentialRecordReader<R = CsvReader, S = File> {
    path: PathBuf,
    handle: Option<BufReader<S>>,
    records: R,
    row_counter: usize,
    slot: Slot,
}

impl SequentialRecordReader<CsvReader, File> {
    /// Open a comma-delimited file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &ReaderOptions::default())
    }

    pub fn open_with(path: impl AsRef<Path>, options: &ReaderOptions) -> Result<Self> {
        let records = CsvReader::from_options(options)?;
        Self::open_with_reader(path, records)
    }
}

impl<R: RecordReader> SequentialRecordReader<R, File> {
    /// Open `path` and read it with the given record strategy.
    pub fn open_with_reader(path: impl AsRef<Path>, records: R) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source: io::Error| Error::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unavailable)?;
        if file.metadata().map_err(unavailable)?.is_dir() {
            return Err(unavailable(io::Error::other("is a directory")));
        }
        debug!("opened {}", path.display());
        Ok(Self::from_source(path, file, records))
    }
}

impl<R: RecordReader, S: Read + Seek> SequentialRecordReader<R, S> {
    /// Wrap an already-open source. `name` is only used for diagnostics.
    pub fn from_source(name: impl Into<PathBuf>, source: S, records: R) -> Self {
        SequentialRecordReader {
            path: name.into(),
            handle: Some(BufReader::new(source)),
            records,
            row_counter: 0,
            slot: Slot::Unloaded,
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Release the source early. The reader behaves as exhausted afterwards.
    /// Returns whether a handle was actually released.
    pub fn close(&mut self) -> bool {
        self.slot = Slot::End;
        let released = self.handle.take().is_some();
        if released {
            debug!("closed {} early at row {}", self.path.display(), self.row_counter);
        }
        released
    }

    /// Reposition to the start of the source and load the first record.
    /// A no-op once the source has been released.
    pub fn rewind(&mut self) -> Result<()> {
        let Some(handle) = self.handle.as_mut() else {
            debug!("rewind on closed {}, staying exhausted", self.path.display());
            return Ok(());
        };
        handle.seek(SeekFrom::Start(0))?;
        self.records.reset();
        self.row_counter = 0;
        self.slot = Slot::Unloaded;
        self.load()
    }

    /// The current record, or an empty record when nothing is loaded or
    /// the data is exhausted.
    pub fn current(&self) -> &Record {
        match &self.slot {
            Slot::Loaded(record) => record,
            Slot::Unloaded | Slot::End => &EMPTY,
        }
    }

    pub fn key(&self) -> usize {
        self.row_counter
    }

    /// Load the next record. Does nothing once the source is released.
    pub fn advance(&mut self) -> Result<()> {
        if self.handle.is_none() {
            return Ok(());
        }
        self.load()?;
        self.row_counter += 1;
        Ok(())
    }

    /// Whether the cursor points at a record.
    ///
    /// Observing the end of data releases the source as a side effect, so
    /// a loop driven by this check needs no explicit close.
    pub fn is_valid(&mut self) -> bool {
        if let Slot::End = self.slot {
            if self.handle.take().is_some() {
                debug!("closed {} after {} records", self.path.display(), self.row_counter);
            }
            return false;
        }
        self.handle.is_some()
    }

    /// Iterate over `(key, record)` pairs from the start of the source.
    pub fn records(&mut self) -> Walk<'_, Self> {
        Walk::new(self)
    }

    fn load(&mut self) -> Result<()> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(());
        };
        match self.records.next_record(handle) {
            Ok(Some(record)) => self.slot = Slot::Loaded(record),
            Ok(None) => {
                trace!("end of data in {}", self.path.display());
                self.slot = Slot::End;
            }
            Err(e) => {
                self.slot = Slot::End;
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<R: RecordReader, S: Read + Seek> Cursor for SequentialRecordReader<R, S> {
    type Item = Record;

    fn rewind(&mut self) -> Result<()> {
        SequentialRecordReader::rewind(self)
    }

    fn current(&self) -> &Record {
        SequentialRecordReader::current(self)
    }

    fn key(&self) -> usize {
        SequentialRecordReader::key(self)
    }

    fn advance(&mut self) -> Result<()> {
        SequentialRecordReader::advance(self)
    }

    fn is_valid(&mut self) -> bool {
        SequentialRecordReader::is_valid(self)
    }
}
