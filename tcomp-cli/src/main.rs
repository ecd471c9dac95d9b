//! XML Localization Tag Comparison CLI
//!
//! Compares `<t id>` entries between two XML files and reports which
//! ids were added, removed, or changed.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use xml_tcomp::{compare, export_csv, missing_ids, write_plain, write_visual, FileIndex};

/// XML Localization Tag Comparison Tool
#[derive(Parser)]
#[command(name = "tcomp")]
#[command(version)]
#[command(about = "Compares <t id> entries between two XML files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare entry texts and print a full report
    #[command(visible_alias = "c")]
    Compare {
        /// Old file
        old: String,
        /// New file
        new: String,

        /// Write the change list to changes_<old-stem>.csv
        #[arg(long)]
        export: bool,
    },

    /// Show changed entries with a colorized character diff
    #[command(visible_alias = "v")]
    Visual {
        /// Old file
        old: String,
        /// New file
        new: String,
    },

    /// List ids present in the first file but missing from the second
    #[command(visible_alias = "i")]
    Ids {
        /// First file
        first: String,
        /// Second file
        second: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare { old, new, export } => run_compare(&old, &new, export),
        Commands::Visual { old, new } => run_visual(&old, &new),
        Commands::Ids { first, second } => run_ids(&first, &second),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs the full comparison with the plain report.
fn run_compare(
    old_path: &str,
    new_path: &str,
    export: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Processing files:\n  Old: {}\n  New: {}", old_path, new_path);

    let old = FileIndex::from_file(old_path)?;
    let new = FileIndex::from_file(new_path)?;
    let result = compare(&old, &new);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_plain(&mut out, &result)?;

    if export {
        if result.changes.is_empty() {
            eprintln!("Nothing to export.");
        } else {
            // Export failures are reported without discarding the
            // report already printed above.
            match export_csv(&result, old_path) {
                Ok(path) => eprintln!("Changes exported to {}", path.display()),
                Err(e) => eprintln!("Error exporting to CSV: {}", e),
            }
        }
    }

    Ok(())
}

/// Runs the comparison with the visual report.
fn run_visual(old_path: &str, new_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let old = FileIndex::from_file(old_path)?;
    let new = FileIndex::from_file(new_path)?;
    let result = compare(&old, &new);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_visual(&mut out, &result, old_path, new_path)?;

    Ok(())
}

/// Runs the id-only comparison.
fn run_ids(first_path: &str, second_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let first = FileIndex::from_file(first_path)?;
    let second = FileIndex::from_file(second_path)?;

    let missing = missing_ids(&first, &second);
    if missing.is_empty() {
        println!("All IDs from first file exist in second file");
    } else {
        println!("Found {} missing IDs in second file:", missing.len());
        for id in &missing {
            println!("{}", id);
        }
    }

    Ok(())
}
