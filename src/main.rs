use std::io::{self, BufWriter, Write};
use std::process;

use clap::Parser;

use csvwalk::cli::Args;
use csvwalk::input::line::LineReader;
use csvwalk::print::print_records;
use csvwalk::{Result, SequentialRecordReader};

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("csvwalk: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let options = args.print_options();

    if args.lines {
        let mut reader = SequentialRecordReader::open_with_reader(&args.file, LineReader::new())?;
        print_records(&mut reader, &options, &mut out)?;
    } else {
        let mut reader = SequentialRecordReader::open_with(&args.file, &args.reader_options())?;
        print_records(&mut reader, &options, &mut out)?;
    }

    out.flush()?;
    Ok(())
}
