//! Rendering records as keyed blocks for the command line.

use std::io::Write;

use regex::Regex;

use crate::cursor::{Cursor, drive};
use crate::error::Result;
use crate::header::{Header, Projection};
use crate::input::Record;

#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// First record holds column names and is not printed.
    pub header: bool,
    /// Columns to print, in order. Needs `header`.
    pub select: Vec<String>,
    /// Print only records with a field matching this.
    pub pattern: Option<Regex>,
}

/// Walk `cursor` from the start and print every record that passes the
/// filter. Keys are the cursor's own, so with a header the first data
/// record is key 1. Returns the number of records printed.
pub fn print_records<C, W>(cursor: &mut C, options: &PrintOptions, out: &mut W) -> Result<usize>
where
    C: Cursor<Item = Record> + ?Sized,
    W: Write + ?Sized,
{
    let mut header: Option<Header> = None;
    let mut projection: Option<Projection> = None;
    let mut printed = 0;

    drive(cursor, |key, record| {
        if options.header && header.is_none() {
            let h = Header::from_record(record);
            if !options.select.is_empty() {
                projection = Some(h.select(options.select.as_slice())?);
            }
            header = Some(h);
            return Ok(());
        }

        if let Some(re) = &options.pattern {
            if !record.iter().any(|f| re.is_match(f)) {
                return Ok(());
            }
        }

        printed += 1;
        match &projection {
            Some(p) => {
                let labels: Vec<&str> = p
                    .positions()
                    .iter()
                    .filter_map(|&i| header.as_ref().and_then(|h| h.label(i)))
                    .collect();
                write_record(out, key, &p.apply(record), Some(&labels))
            }
            None => {
                let labels = header
                    .as_ref()
                    .map(|h| h.names().iter().map(String::as_str).collect::<Vec<_>>());
                write_record(out, key, record, labels.as_deref())
            }
        }
    })?;
    Ok(printed)
}

/// Print one record as a keyed block:
///
/// ```text
/// 1 => (
///     [name] => Tom
///     [age] => 3
/// )
/// ```
///
/// Columns without a label are keyed by position.
pub fn write_record<W: Write + ?Sized>(
    out: &mut W,
    key: usize,
    record: &Record,
    labels: Option<&[&str]>,
) -> Result<()> {
    writeln!(out, "{} => (", key)?;
    for (i, field) in record.iter().enumerate() {
        match labels.and_then(|l| l.get(i)) {
            Some(label) => writeln!(out, "    [{}] => {}", label, field)?,
            None => writeln!(out, "    [{}] => {}", i, field)?,
        }
    }
    writeln!(out, ")")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::input::csv::CsvReader;
    use crate::reader::SequentialRecordReader;
    use std::io::Cursor as Bytes;

    const CATS: &str = "name,age,motto\nTom,3,\"chase, catch\"\nKitty,5,naps\nFelix,2,\"line one\nline two\"\n";

    /// Helper: print `data` with `options`, return the output and count.
    fn render(data: &str, options: &PrintOptions) -> Result<(String, usize)> {
        let src = Bytes::new(data.as_bytes().to_vec());
        let mut reader = SequentialRecordReader::from_source("mem.csv", src, CsvReader::comma());
        let mut out = Vec::new();
        let printed = print_records(&mut reader, options, &mut out)?;
        Ok((String::from_utf8(out).unwrap(), printed))
    }

    #[test]
    fn positional_keys_without_header() {
        let (out, printed) = render("a,b\n1,2\n", &PrintOptions::default()).unwrap();
        assert_eq!(printed, 2);
        assert_eq!(
            out,
            "0 => (\n    [0] => a\n    [1] => b\n)\n1 => (\n    [0] => 1\n    [1] => 2\n)\n"
        );
    }

    #[test]
    fn header_labels_columns_and_is_skipped() {
        let options = PrintOptions { header: true, ..Default::default() };
        let (out, printed) = render("name,age\nTom,3\n", &options).unwrap();
        assert_eq!(printed, 1);
        assert_eq!(out, "1 => (\n    [name] => Tom\n    [age] => 3\n)\n");
    }

    #[test]
    fn columns_past_the_header_use_positions() {
        let options = PrintOptions { header: true, ..Default::default() };
        let (out, _) = render("name\nTom,3\n", &options).unwrap();
        assert_eq!(out, "1 => (\n    [name] => Tom\n    [1] => 3\n)\n");
    }

    #[test]
    fn projection_follows_selected_order() {
        let options = PrintOptions {
            header: true,
            select: vec!["motto".into(), "name".into()],
            ..Default::default()
        };
        let (out, printed) = render(CATS, &options).unwrap();
        assert_eq!(printed, 3);
        assert!(out.starts_with("1 => (\n    [motto] => chase, catch\n    [name] => Tom\n)\n"));
        assert!(out.ends_with("3 => (\n    [motto] => line one\nline two\n    [name] => Felix\n)\n"));
    }

    #[test]
    fn match_filters_records_and_keeps_keys() {
        let options = PrintOptions {
            header: true,
            select: vec!["motto".into(), "name".into()],
            pattern: Some(Regex::new("Kitty").unwrap()),
        };
        let (out, printed) = render(CATS, &options).unwrap();
        assert_eq!(printed, 1);
        assert_eq!(out, "2 => (\n    [motto] => naps\n    [name] => Kitty\n)\n");
    }

    #[test]
    fn header_is_taken_even_if_it_does_not_match() {
        let options = PrintOptions {
            header: true,
            pattern: Some(Regex::new("^Tom$").unwrap()),
            ..Default::default()
        };
        let (out, printed) = render(CATS, &options).unwrap();
        assert_eq!(printed, 1);
        assert!(out.contains("[name] => Tom"));
    }

    #[test]
    fn match_without_header_checks_every_record() {
        let options = PrintOptions {
            pattern: Some(Regex::new("^\\d+$").unwrap()),
            ..Default::default()
        };
        let (_, printed) = render(CATS, &options).unwrap();
        assert_eq!(printed, 3);
    }

    #[test]
    fn unknown_selected_column_fails() {
        let options = PrintOptions {
            header: true,
            select: vec!["weight".into()],
            ..Default::default()
        };
        let err = render(CATS, &options).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(ref c) if c == "weight"));
    }

    #[test]
    fn empty_record_prints_empty_block() {
        let mut out = Vec::new();
        write_record(&mut out, 7, &Record::empty(), None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7 => (\n)\n");
    }
}
