//! Set comparison of two file indexes.
//!
//! Derives which ids are common, added, or removed, and which common
//! ids changed their text. All listings are sorted with [`id_order`].

use std::cmp::Ordering;

use crate::index::FileIndex;

/// A single id with its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub text: String,
}

/// A common id whose trimmed text differs between the two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub id: String,
    pub old: String,
    pub new: String,
}

impl ChangeRecord {
    /// Character length delta from old to new text.
    pub fn len_delta(&self) -> isize {
        self.new.chars().count() as isize - self.old.chars().count() as isize
    }
}

/// Outcome of comparing two file indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    /// Distinct ids in the old file.
    pub old_total: usize,
    /// Distinct ids in the new file.
    pub new_total: usize,
    /// Ids present in both files, ascending.
    pub common: Vec<String>,
    /// Common ids whose text differs, ascending by id.
    pub changes: Vec<ChangeRecord>,
    /// Ids only in the new file, with their new text, ascending by id.
    pub added: Vec<Entry>,
    /// Ids only in the old file, with their old text, ascending by id.
    pub removed: Vec<Entry>,
}

/// Orders ids for display.
///
/// Ids that parse as integers sort ascending by numeric value and come
/// first; non-numeric ids follow, sorted lexicographically.
pub fn id_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Compares two file indexes.
pub fn compare(old: &FileIndex, new: &FileIndex) -> ComparisonResult {
    let mut common = Vec::new();
    let mut removed = Vec::new();
    for id in old.ids() {
        if new.contains(id) {
            common.push(id.to_string());
        } else {
            removed.push(Entry {
                id: id.to_string(),
                text: old.get(id).unwrap_or("").to_string(),
            });
        }
    }

    let mut added = Vec::new();
    for id in new.ids() {
        if !old.contains(id) {
            added.push(Entry {
                id: id.to_string(),
                text: new.get(id).unwrap_or("").to_string(),
            });
        }
    }

    common.sort_by(|a, b| id_order(a, b));
    added.sort_by(|a, b| id_order(&a.id, &b.id));
    removed.sort_by(|a, b| id_order(&a.id, &b.id));

    // Changes inherit the sorted order of the common list.
    let mut changes = Vec::new();
    for id in &common {
        let old_text = old.get(id).unwrap_or("");
        let new_text = new.get(id).unwrap_or("");
        if old_text != new_text {
            changes.push(ChangeRecord {
                id: id.clone(),
                old: old_text.to_string(),
                new: new_text.to_string(),
            });
        }
    }

    ComparisonResult {
        old_total: old.len(),
        new_total: new.len(),
        common,
        changes,
        added,
        removed,
    }
}

/// Ids present in `old` but absent from `new`, ascending.
///
/// This is the reduced id-only mode: no text comparison is performed.
pub fn missing_ids(old: &FileIndex, new: &FileIndex) -> Vec<String> {
    let mut missing: Vec<String> = old
        .ids()
        .filter(|id| !new.contains(id))
        .map(str::to_string)
        .collect();
    missing.sort_by(|a, b| id_order(a, b));
    missing
}
