//! Status engine output: per-path classifications and their renderings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a path's working state differs from the last snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Present in the working tree, never committed.
    Untracked,
    /// Staged but not committed. Only produced by a staging tier.
    Added,
    /// Committed, and the working content hashes differently.
    Modified,
    /// Committed, but absent from the working tree.
    Deleted,
    /// Committed, working content hashes the same.
    Unmodified,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Self::Untracked => "untracked",
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Unmodified => "unmodified",
        }
    }

    /// Two-column code in the style of `git status --porcelain`.
    ///
    /// `None` for unmodified entries, which porcelain output never lists.
    pub fn porcelain_code(self) -> Option<&'static str> {
        match self {
            Self::Untracked => Some("??"),
            Self::Added => Some("A "),
            Self::Modified => Some(" M"),
            Self::Deleted => Some(" D"),
            Self::Unmodified => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One path and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub path: String,
    pub classification: Classification,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, classification: Classification) -> Self {
        Self {
            path: path.into(),
            classification,
        }
    }
}

/// Per-classification counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub untracked: usize,
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub unmodified: usize,
}

/// Ordered status output.
///
/// Entries are sorted by path. `Display` renders one `<label> <path>` line
/// per entry, which is what a host prints for humans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<StatusEntry>", into = "Vec<StatusEntry>")]
pub struct StatusReport {
    entries: Vec<StatusEntry>,
}

impl StatusReport {
    /// Build a report, sorting entries by path.
    pub fn new(mut entries: Vec<StatusEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Self { entries }
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<StatusEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when nothing differs from the snapshot.
    pub fn is_clean(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.classification == Classification::Unmodified)
    }

    /// Classification of `path`, if the report lists it.
    pub fn get(&self, path: &str) -> Option<Classification> {
        self.entries
            .binary_search_by(|e| e.path.as_str().cmp(path))
            .ok()
            .map(|i| self.entries[i].classification)
    }

    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for entry in &self.entries {
            match entry.classification {
                Classification::Untracked => summary.untracked += 1,
                Classification::Added => summary.added += 1,
                Classification::Modified => summary.modified += 1,
                Classification::Deleted => summary.deleted += 1,
                Classification::Unmodified => summary.unmodified += 1,
            }
        }
        summary
    }

    /// Render as `git status --porcelain` would: `XY path` per changed entry.
    pub fn porcelain(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            if let Some(code) = entry.classification.porcelain_code() {
                out.push_str(code);
                out.push(' ');
                out.push_str(&entry.path);
                out.push('\n');
            }
        }
        out
    }
}

impl From<Vec<StatusEntry>> for StatusReport {
    fn from(entries: Vec<StatusEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<StatusReport> for Vec<StatusEntry> {
    fn from(report: StatusReport) -> Self {
        report.entries
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "nothing to commit, working tree clean");
        }
        for entry in &self.entries {
            writeln!(f, "{} {}", entry.classification, entry.path)?;
        }
        Ok(())
    }
}

impl IntoIterator for StatusReport {
    type Item = StatusEntry;
    type IntoIter = std::vec::IntoIter<StatusEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatusReport {
    type Item = &'a StatusEntry;
    type IntoIter = std::slice::Iter<'a, StatusEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> StatusReport {
        StatusReport::new(vec![
            StatusEntry::new("z.txt", Classification::Untracked),
            StatusEntry::new("a.txt", Classification::Modified),
            StatusEntry::new("m.txt", Classification::Deleted),
            StatusEntry::new("k.txt", Classification::Unmodified),
        ])
    }

    #[rstest]
    #[case::untracked(Classification::Untracked, "untracked", Some("??"))]
    #[case::added(Classification::Added, "added", Some("A "))]
    #[case::modified(Classification::Modified, "modified", Some(" M"))]
    #[case::deleted(Classification::Deleted, "deleted", Some(" D"))]
    #[case::unmodified(Classification::Unmodified, "unmodified", None)]
    fn labels_and_codes(
        #[case] classification: Classification,
        #[case] label: &str,
        #[case] code: Option<&str>,
    ) {
        assert_eq!(classification.label(), label);
        assert_eq!(classification.to_string(), label);
        assert_eq!(classification.porcelain_code(), code);
    }

    #[test]
    fn new_sorts_by_path() {
        let paths: Vec<_> = sample().entries().iter().map(|e| e.path.clone()).collect();
        assert_eq!(paths, vec!["a.txt", "k.txt", "m.txt", "z.txt"]);
    }

    #[test]
    fn display_one_line_per_entry() {
        assert_eq!(
            sample().to_string(),
            "modified a.txt\nunmodified k.txt\ndeleted m.txt\nuntracked z.txt\n"
        );
    }

    #[test]
    fn display_clean() {
        assert_eq!(
            StatusReport::default().to_string(),
            "nothing to commit, working tree clean\n"
        );
        let only_unmodified =
            StatusReport::new(vec![StatusEntry::new("a", Classification::Unmodified)]);
        assert!(only_unmodified.is_clean());
        assert!(!only_unmodified.is_empty());
    }

    #[test]
    fn porcelain_skips_unmodified() {
        assert_eq!(sample().porcelain(), " M a.txt\n D m.txt\n?? z.txt\n");
    }

    #[test]
    fn get_and_summary() {
        let report = sample();
        assert_eq!(report.get("m.txt"), Some(Classification::Deleted));
        assert_eq!(report.get("nope"), None);
        assert_eq!(
            report.summary(),
            StatusSummary {
                untracked: 1,
                added: 0,
                modified: 1,
                deleted: 1,
                unmodified: 1,
            }
        );
    }

    #[test]
    fn json_is_ordered_array() {
        let report = StatusReport::new(vec![
            StatusEntry::new("b", Classification::Deleted),
            StatusEntry::new("a", Classification::Untracked),
        ]);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"[{"path":"a","classification":"untracked"},{"path":"b","classification":"deleted"}]"#
        );
    }

    #[test]
    fn deserialize_restores_path_order() {
        let json = r#"[
            {"path":"c","classification":"untracked"},
            {"path":"b","classification":"modified"},
            {"path":"a","classification":"deleted"}
        ]"#;
        let report: StatusReport = serde_json::from_str(json).unwrap();
        let paths: Vec<_> = report.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
        assert_eq!(report.get("c"), Some(Classification::Untracked));
        assert_eq!(report.get("a"), Some(Classification::Deleted));
    }
}
