//! Comparison of `<t id>` entries between two XML localization files.
//!
//! Each input file holds localizable strings as `<t id="NNN">text</t>`
//! elements. This library builds an id → trimmed-text index from each
//! file, computes which ids were added, removed, or changed, and
//! renders the result as a plain report, a colorized character-level
//! diff, or a CSV export.
//!
//! # Pipeline
//!
//! parse → compare → report: [`FileIndex`] extracts the entries of one
//! file, [`compare`] derives a [`ComparisonResult`] from two indexes,
//! and the [`report`] module renders it.

pub mod chardiff;
pub mod compare;
pub mod constants;
pub mod error;
pub mod index;
pub mod report;

// Re-export commonly used types
pub use chardiff::{char_edits, EditKind, EditRun};
pub use compare::{compare, id_order, missing_ids, ChangeRecord, ComparisonResult, Entry};
pub use constants::*;
pub use error::{Error, Result};
pub use index::{index_file, FileIndex};
pub use report::{csv_filename, export_csv, write_csv, write_plain, write_visual};
