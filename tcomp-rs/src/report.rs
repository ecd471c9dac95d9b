//! Report rendering: plain text, colorized visual diff, CSV export.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::chardiff::{char_edits, EditKind};
use crate::compare::ComparisonResult;
use crate::constants::{CSV_HEADER, SIDE_BY_SIDE_LIMIT};
use crate::error::{Error, Result};

/// Writes the plain comparison report.
///
/// Summary counts first, then changed entries with old/new text and a
/// length-change line when lengths differ, then added and removed
/// entries. Sections for empty lists are omitted.
pub fn write_plain<W: Write>(out: &mut W, result: &ComparisonResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "COMPARISON RESULTS")?;
    writeln!(out, "{}", "=".repeat(50))?;

    writeln!(out, "\nSummary:")?;
    writeln!(out, "  Total strings in old file: {}", result.old_total)?;
    writeln!(out, "  Total strings in new file: {}", result.new_total)?;
    writeln!(out, "  Common strings: {}", result.common.len())?;
    writeln!(out, "  Changed strings: {}", result.changes.len())?;
    writeln!(out, "  Added strings: {}", result.added.len())?;
    writeln!(out, "  Removed strings: {}", result.removed.len())?;

    if result.changes.is_empty() {
        writeln!(out, "\nNo changes found in common strings.")?;
    } else {
        writeln!(out, "\nFound {} changed strings:", result.changes.len())?;
        writeln!(out, "{}", "-".repeat(50))?;
        for change in &result.changes {
            writeln!(out, "\nID: {}", change.id)?;
            writeln!(out, "  Old: {}", change.old)?;
            writeln!(out, "  New: {}", change.new)?;
            if change.len_delta() != 0 {
                writeln!(
                    out,
                    "  Length change: {} → {} chars",
                    change.old.chars().count(),
                    change.new.chars().count()
                )?;
            }
        }
    }

    if !result.added.is_empty() {
        writeln!(out, "\nAdded strings ({}):", result.added.len())?;
        for entry in &result.added {
            writeln!(out, "  ID {}: {}", entry.id, entry.text)?;
        }
    }

    if !result.removed.is_empty() {
        writeln!(out, "\nRemoved strings ({}):", result.removed.len())?;
        for entry in &result.removed {
            writeln!(out, "  ID {}: {}", entry.id, entry.text)?;
        }
    }

    Ok(())
}

/// Writes the visual report.
///
/// Changed entries whose texts are both shorter than
/// [`SIDE_BY_SIDE_LIMIT`] are shown side by side; longer ones as a
/// character diff with deletions in red and insertions in green.
pub fn write_visual<W: Write>(
    out: &mut W,
    result: &ComparisonResult,
    old_path: &str,
    new_path: &str,
) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(out, "Visual Comparison: {} vs {}", old_path, new_path)?;
    writeln!(out, "{}", "=".repeat(60))?;

    for change in &result.changes {
        writeln!(out, "\n{}", format!("ID: {}", change.id).yellow())?;
        if change.old.chars().count() < SIDE_BY_SIDE_LIMIT
            && change.new.chars().count() < SIDE_BY_SIDE_LIMIT
        {
            writeln!(out, "  Old: {}", change.old)?;
            writeln!(out, "  New: {}", change.new)?;
        } else {
            writeln!(out, "  Changes:")?;
            writeln!(out, "  {}", render_char_diff(&change.old, &change.new))?;
        }
    }

    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(out, "Changed strings: {}", result.changes.len())?;
    writeln!(out, "{}", "=".repeat(60))?;

    Ok(())
}

/// Renders a character edit script, deletions red and insertions green.
fn render_char_diff(old: &str, new: &str) -> String {
    let mut rendered = String::new();
    for run in char_edits(old, new) {
        match run.kind {
            EditKind::Unchanged => rendered.push_str(&run.text),
            EditKind::Deleted => rendered.push_str(&run.text.red().to_string()),
            EditKind::Inserted => rendered.push_str(&run.text.green().to_string()),
        }
    }
    rendered
}

/// Name of the CSV export file for a given old-file path.
pub fn csv_filename(old_path: &str) -> String {
    let stem = Path::new(old_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("changes_{}.csv", stem)
}

/// Exports the change list as CSV into the current working directory.
///
/// Returns the path of the written file.
pub fn export_csv(result: &ComparisonResult, old_path: &str) -> Result<PathBuf> {
    let filename = PathBuf::from(csv_filename(old_path));
    let file = File::create(&filename).map_err(Error::Export)?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, result).map_err(Error::Export)?;
    out.flush().map_err(Error::Export)?;
    Ok(filename)
}

/// Writes CSV rows for every change record.
///
/// Two rows per change (`Old` then `New`) followed by a blank line.
/// Double quotes are doubled and embedded newlines become the literal
/// two-character sequence `\n`; only the text field is quoted. This is
/// the format long produced here, not RFC 4180.
pub fn write_csv<W: Write>(out: &mut W, result: &ComparisonResult) -> io::Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for change in &result.changes {
        writeln!(out, "{},Old, \"{}\"", change.id, csv_escape(&change.old))?;
        writeln!(out, "{},New, \"{}\"", change.id, csv_escape(&change.new))?;
        writeln!(out)?;
    }
    Ok(())
}

fn csv_escape(text: &str) -> String {
    text.replace('"', "\"\"").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::index::FileIndex;

    fn result_from(old_xml: &str, new_xml: &str) -> ComparisonResult {
        let old = FileIndex::from_xml(old_xml).unwrap();
        let new = FileIndex::from_xml(new_xml).unwrap();
        compare(&old, &new)
    }

    fn render_plain(result: &ComparisonResult) -> String {
        let mut buf = Vec::new();
        write_plain(&mut buf, result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_report_summary() {
        let result = result_from(
            r#"<r><t id="1">Hello</t><t id="2">World</t></r>"#,
            r#"<r><t id="1">Hello</t><t id="2">World!</t><t id="3">New</t></r>"#,
        );
        let report = render_plain(&result);

        assert!(report.contains("Total strings in old file: 2"));
        assert!(report.contains("Total strings in new file: 3"));
        assert!(report.contains("Common strings: 2"));
        assert!(report.contains("Changed strings: 1"));
        assert!(report.contains("Added strings: 1"));
        assert!(report.contains("Removed strings: 0"));
        assert!(report.contains("ID: 2"));
        assert!(report.contains("Old: World"));
        assert!(report.contains("New: World!"));
        assert!(report.contains("Length change: 5 → 6 chars"));
        assert!(report.contains("ID 3: New"));
    }

    #[test]
    fn test_plain_report_no_changes() {
        let xml = r#"<r><t id="1">same</t></r>"#;
        let report = render_plain(&result_from(xml, xml));

        assert!(report.contains("No changes found in common strings."));
        assert!(!report.contains("Added strings ("));
        assert!(!report.contains("Removed strings ("));
    }

    #[test]
    fn test_plain_report_ids_in_numeric_order() {
        let result = result_from(
            r#"<r><t id="10">j</t><t id="2">b</t><t id="1">a</t></r>"#,
            r#"<r></r>"#,
        );
        let report = render_plain(&result);

        let pos_1 = report.find("ID 1: a").unwrap();
        let pos_2 = report.find("ID 2: b").unwrap();
        let pos_10 = report.find("ID 10: j").unwrap();
        assert!(pos_1 < pos_2 && pos_2 < pos_10);
    }

    #[test]
    fn test_visual_report_side_by_side() {
        let result = result_from(
            r#"<r><t id="1">short old</t></r>"#,
            r#"<r><t id="1">short new</t></r>"#,
        );
        let mut buf = Vec::new();
        write_visual(&mut buf, &result, "old.xml", "new.xml").unwrap();
        let report = String::from_utf8(buf).unwrap();

        assert!(report.contains("Visual Comparison: old.xml vs new.xml"));
        assert!(report.contains("Old: short old"));
        assert!(report.contains("New: short new"));
        assert!(!report.contains("Changes:"));
        assert!(report.contains("Changed strings: 1"));
    }

    #[test]
    fn test_visual_report_char_diff_for_long_texts() {
        // 50 characters on both sides forces the character diff path.
        let old_text = "a".repeat(SIDE_BY_SIDE_LIMIT);
        let new_text = format!("{}b", "a".repeat(SIDE_BY_SIDE_LIMIT));
        let result = result_from(
            &format!(r#"<r><t id="1">{}</t></r>"#, old_text),
            &format!(r#"<r><t id="1">{}</t></r>"#, new_text),
        );

        let mut buf = Vec::new();
        write_visual(&mut buf, &result, "a.xml", "b.xml").unwrap();
        let report = String::from_utf8(buf).unwrap();

        assert!(report.contains("Changes:"));
        assert!(!report.contains("Old: "));
    }

    #[test]
    fn test_csv_format() {
        let result = result_from(
            r#"<r><t id="2">World</t></r>"#,
            r#"<r><t id="2">World!</t></r>"#,
        );
        let mut buf = Vec::new();
        write_csv(&mut buf, &result).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert_eq!(
            csv,
            "ID,Type,Text\n2,Old, \"World\"\n2,New, \"World!\"\n\n"
        );
    }

    #[test]
    fn test_csv_escaping() {
        let result = result_from(
            r#"<r><t id="1">say &quot;hi&quot;</t></r>"#,
            r#"<r><t id="1">say &quot;bye&quot;
now</t></r>"#,
        );
        let mut buf = Vec::new();
        write_csv(&mut buf, &result).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert!(csv.contains(r#"1,Old, "say ""hi""""#));
        assert!(csv.contains(r#"1,New, "say ""bye""\nnow""#));
    }

    #[test]
    fn test_csv_filename() {
        assert_eq!(csv_filename("path/to/0001.xml"), "changes_0001.csv");
        assert_eq!(csv_filename("english.xml"), "changes_english.csv");
    }
}
