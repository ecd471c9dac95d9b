//! Example: compare two XML localization files
//!
//! Usage: cargo run --example compare <old.xml> <new.xml>

use std::env;
use std::io;

use xml_tcomp::{compare, write_plain, FileIndex};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <old.xml> <new.xml>", args[0]);
        std::process::exit(1);
    }

    eprintln!("Indexing old: {}", args[1]);
    let old = FileIndex::from_file(&args[1])?;

    eprintln!("Indexing new: {}", args[2]);
    let new = FileIndex::from_file(&args[2])?;

    let result = compare(&old, &new);
    write_plain(&mut io::stdout(), &result)?;

    Ok(())
}
