//! Header-row interpretation for callers that treat the first record as
//! column names.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::input::Record;

#[derive(Debug, Clone)]
pub struct Header {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Header {
    /// Build from a header record. With duplicate names the first column wins.
    pub fn from_record(record: &Record) -> Self {
        let names: Vec<String> = record.fields().to_vec();
        let mut index = FxHashMap::default();
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Header { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column name for position `i`, if the header is that wide.
    pub fn label(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(String::as_str)
    }

    /// Resolve column names to a projection, in the order given.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<Projection> {
        let positions = columns
            .iter()
            .map(|c| {
                let c = c.as_ref();
                self.position(c).ok_or_else(|| Error::UnknownColumn(c.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Projection { positions })
    }
}

/// Chosen column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    positions: Vec<usize>,
}

impl Projection {
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Pick the projected fields out of `record`. Short records yield
    /// empty strings for the missing columns.
    pub fn apply(&self, record: &Record) -> Record {
        self.positions
            .iter()
            .map(|&i| record.get(i).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Header {
        Header::from_record(&Record::from_iter(["name", "age", "color", "name"]))
    }

    #[test]
    fn lookup_by_name() {
        let h = header();
        assert_eq!(h.position("age"), Some(1));
        assert_eq!(h.position("missing"), None);
        assert_eq!(h.label(2), Some("color"));
        assert_eq!(h.label(9), None);
    }

    #[test]
    fn duplicate_name_resolves_to_first() {
        assert_eq!(header().position("name"), Some(0));
    }

    #[test]
    fn projection_reorders_and_pads() {
        let p = header().select(&["color", "name"]).unwrap();
        assert_eq!(p.positions(), [2, 0]);
        let row = Record::from_iter(["Tom", "3", "grey"]);
        assert_eq!(p.apply(&row).fields(), ["grey", "Tom"]);
        let short = Record::from_iter(["Kitty"]);
        assert_eq!(p.apply(&short).fields(), ["", "Kitty"]);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = header().select(&["weight"]).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(ref c) if c == "weight"));
    }
}
