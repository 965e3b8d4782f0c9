use std::path::PathBuf;

use clap::Parser;
use regex::Regex;

use crate::config::{QuotePolicy, ReaderOptions};
use crate::print::PrintOptions;

#[derive(Parser, Debug)]
#[command(name = "csvwalk", version)]
#[command(about = "Walk the records of a delimited text file and print each one")]
pub struct Args {
    /// Delimited text file to read
    pub file: PathBuf,

    /// Field delimiter, a single character (`\t` for tab).
    /// Defaults to tab for .tsv/.tab files and comma otherwise.
    #[arg(short = 'd', long, value_parser = parse_char)]
    pub delimiter: Option<char>,

    /// Quote character for fields containing delimiters or line breaks.
    /// Defaults to `"`.
    #[arg(short = 'q', long, value_parser = parse_char)]
    pub quote: Option<char>,

    /// Keep an unterminated quoted field instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// One record per line, without field splitting
    #[arg(long, conflicts_with_all = ["delimiter", "quote", "lenient"])]
    pub lines: bool,

    /// Treat the first record as column names
    #[arg(short = 'H', long)]
    pub header: bool,

    /// Comma-separated columns to print (needs --header)
    #[arg(short = 's', long, value_delimiter = ',', requires = "header")]
    pub select: Vec<String>,

    /// Print only records with a field matching this regex
    #[arg(short = 'm', long = "match", value_parser = Regex::new)]
    pub pattern: Option<Regex>,
}

impl Args {
    pub fn reader_options(&self) -> ReaderOptions {
        let mut options = ReaderOptions::for_path(&self.file);
        if let Some(d) = self.delimiter {
            options = options.delimiter(d);
        }
        if let Some(q) = self.quote {
            options = options.quote(q);
        }
        if self.lenient {
            options = options.quote_policy(QuotePolicy::Lenient);
        }
        options
    }

    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            header: self.header,
            select: self.select.clone(),
            pattern: self.pattern.clone(),
        }
    }
}

/// Parse a single character, accepting the usual backslash escapes.
fn parse_char(s: &str) -> Result<char, String> {
    let c = match s {
        "\\t" => '\t',
        "\\\\" => '\\',
        "\\0" => '\0',
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(format!("expected a single character, got {:?}", s)),
            }
        }
    };
    Ok(c)
}
