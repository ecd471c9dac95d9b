//! Character-level edit scripts for changed strings.

use similar::{ChangeTag, TextDiff};

/// Classification of a run of characters in an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Present in both strings.
    Unchanged,
    /// Present only in the old string.
    Deleted,
    /// Present only in the new string.
    Inserted,
}

/// A maximal run of consecutive characters with the same classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRun {
    pub kind: EditKind,
    pub text: String,
}

/// Computes a character-level edit script from `old` to `new`.
///
/// Consecutive characters with the same classification are coalesced
/// into a single run.
pub fn char_edits(old: &str, new: &str) -> Vec<EditRun> {
    let diff = TextDiff::from_chars(old, new);
    let mut runs: Vec<EditRun> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => EditKind::Unchanged,
            ChangeTag::Delete => EditKind::Deleted,
            ChangeTag::Insert => EditKind::Inserted,
        };
        match runs.last_mut() {
            Some(run) if run.kind == kind => run.text.push_str(change.value()),
            _ => runs.push(EditRun {
                kind,
                text: change.value().to_string(),
            }),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(kind: EditKind, text: &str) -> EditRun {
        EditRun {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_identical_strings() {
        let edits = char_edits("same", "same");
        assert_eq!(edits, vec![run(EditKind::Unchanged, "same")]);
    }

    #[test]
    fn test_appended_character() {
        let edits = char_edits("World", "World!");
        assert_eq!(
            edits,
            vec![run(EditKind::Unchanged, "World"), run(EditKind::Inserted, "!")]
        );
    }

    #[test]
    fn test_deleted_run() {
        let edits = char_edits("abcdef", "abef");
        assert_eq!(
            edits,
            vec![
                run(EditKind::Unchanged, "ab"),
                run(EditKind::Deleted, "cd"),
                run(EditKind::Unchanged, "ef"),
            ]
        );
    }

    #[test]
    fn test_empty_old_string() {
        let edits = char_edits("", "new");
        assert_eq!(edits, vec![run(EditKind::Inserted, "new")]);
    }

    #[test]
    fn test_empty_both() {
        assert!(char_edits("", "").is_empty());
    }

    #[test]
    fn test_reconstructs_both_sides() {
        let old = "The quick brown fox";
        let new = "The slow brown wolf";
        let edits = char_edits(old, new);

        let rebuilt_old: String = edits
            .iter()
            .filter(|r| r.kind != EditKind::Inserted)
            .map(|r| r.text.as_str())
            .collect();
        let rebuilt_new: String = edits
            .iter()
            .filter(|r| r.kind != EditKind::Deleted)
            .map(|r| r.text.as_str())
            .collect();

        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }
}
