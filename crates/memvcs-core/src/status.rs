//! Status engine: classify every path by diffing the working tree against a
//! snapshot.
//!
//! ```text
//!                 in snapshot        not in snapshot
//! present         Modified/Unmodified  Untracked
//! absent/never    Deleted              (not listed)
//! ```
//!
//! Identity is the content hash. Rewriting a committed file with the same
//! bytes leaves it unmodified; there are no mtimes to fool.

use std::collections::BTreeSet;

use memvcs_types::{
    Classification, ContentHash, Result, StatusEntry, StatusReport, VfsError,
};
use serde::Deserialize;

use crate::snapshot::SnapshotIndex;
use crate::store::hash_bytes;
use crate::vfs::{Vfs, WorkingEntry};

/// Options for status computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusOptions {
    /// Also list unmodified paths. Off by default, like `git status`.
    pub include_unmodified: bool,
}

impl StatusOptions {
    /// List every known path, unmodified ones included.
    pub fn full() -> Self {
        Self {
            include_unmodified: true,
        }
    }
}

/// Compute status with default options.
pub fn status(vfs: &Vfs, snapshot: &SnapshotIndex) -> Result<StatusReport> {
    status_with(vfs, snapshot, StatusOptions::default())
}

/// Compute status.
///
/// Never mutates either input. A committed entry whose object is missing
/// from the store aborts the whole computation with `CorruptState`; no
/// partial report is returned.
pub fn status_with(
    vfs: &Vfs,
    snapshot: &SnapshotIndex,
    options: StatusOptions,
) -> Result<StatusReport> {
    let mut paths: BTreeSet<&str> = vfs.paths().collect();
    paths.extend(snapshot.paths());

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let working = working_hash(vfs, path)?;
        let classification = match (working, snapshot.lookup(path)) {
            (Some(_), None) => Classification::Untracked,
            (None, Some(_)) => Classification::Deleted,
            (Some(current), Some(committed)) if current == committed => Classification::Unmodified,
            (Some(_), Some(_)) => Classification::Modified,
            (None, None) => continue,
        };
        if classification == Classification::Unmodified && !options.include_unmodified {
            continue;
        }
        entries.push(StatusEntry::new(path, classification));
    }

    tracing::debug!(
        candidates = vfs.len() + snapshot.len(),
        reported = entries.len(),
        "computed status"
    );
    Ok(StatusReport::new(entries))
}

/// Hash of the working content at `path`, or `None` if it doesn't exist.
fn working_hash(vfs: &Vfs, path: &str) -> Result<Option<ContentHash>> {
    match vfs.entry(path) {
        None | Some(WorkingEntry::Absent) => Ok(None),
        Some(WorkingEntry::Bytes(data)) => Ok(Some(hash_bytes(data))),
        Some(WorkingEntry::Committed(hash)) => {
            if vfs.store().contains(hash) {
                Ok(Some(*hash))
            } else {
                tracing::warn!(path = %path, hash = %hash.short(), "committed entry missing from store");
                Err(VfsError::corrupt(path, *hash))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ContentStore, MemoryStore};
    use memvcs_types::ErrorKind;
    use std::sync::Arc;

    fn classes(report: &StatusReport) -> Vec<(&str, Classification)> {
        report
            .entries()
            .iter()
            .map(|e| (e.path.as_str(), e.classification))
            .collect()
    }

    #[test]
    fn empty_is_empty() {
        let vfs = Vfs::new(MemoryStore::shared());
        let report = status(&vfs, &SnapshotIndex::new()).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn mixed_tree() {
        let store = MemoryStore::shared();
        let snapshot: SnapshotIndex = [
            ("same.txt".to_string(), store.put(b"same")),
            ("changed.txt".to_string(), store.put(b"old")),
            ("removed.txt".to_string(), store.put(b"bye")),
            ("never-loaded.txt".to_string(), store.put(b"?")),
        ]
        .into_iter()
        .collect();

        let mut vfs = Vfs::new(Arc::clone(&store));
        vfs.write("same.txt", b"same");
        vfs.write("changed.txt", b"new");
        vfs.write("removed.txt", b"bye");
        vfs.remove("removed.txt");
        vfs.write("new.txt", b"fresh");

        let report = status(&vfs, &snapshot).unwrap();
        assert_eq!(
            classes(&report),
            vec![
                ("changed.txt", Classification::Modified),
                ("never-loaded.txt", Classification::Deleted),
                ("new.txt", Classification::Untracked),
                ("removed.txt", Classification::Deleted),
            ]
        );

        let full = status_with(&vfs, &snapshot, StatusOptions::full()).unwrap();
        assert_eq!(full.get("same.txt"), Some(Classification::Unmodified));
        assert_eq!(full.len(), 5);
    }

    #[test]
    fn removed_untracked_path_is_not_listed() {
        let mut vfs = Vfs::new(MemoryStore::shared());
        vfs.write("tmp.txt", b"x");
        vfs.remove("tmp.txt");
        assert!(status(&vfs, &SnapshotIndex::new()).unwrap().is_empty());
    }

    #[test]
    fn committed_entry_compares_by_hash() {
        let store = MemoryStore::shared();
        let other = store.put(b"other");
        let mut vfs = Vfs::new(Arc::clone(&store));
        vfs.write("a.txt", b"content");
        let head = vfs.commit().unwrap();

        // Same committed entry against a snapshot that recorded different content.
        let stale: SnapshotIndex = [("a.txt".to_string(), other)].into_iter().collect();
        assert_eq!(status(&vfs, &head).unwrap().len(), 0);
        assert_eq!(
            status(&vfs, &stale).unwrap().get("a.txt"),
            Some(Classification::Modified)
        );
    }

    /// Backend that can lose objects, standing in for a bad restore.
    #[derive(Debug, Default)]
    struct ForgetfulStore {
        inner: MemoryStore,
        forgotten: parking_lot::Mutex<Vec<ContentHash>>,
    }

    impl ForgetfulStore {
        fn forget(&self, hash: ContentHash) {
            self.forgotten.lock().push(hash);
        }
    }

    impl ContentStore for ForgetfulStore {
        fn put(&self, data: &[u8]) -> ContentHash {
            self.inner.put(data)
        }

        fn get(&self, hash: &ContentHash) -> Result<Arc<[u8]>> {
            if self.forgotten.lock().contains(hash) {
                return Err(VfsError::ObjectNotFound { hash: *hash });
            }
            self.inner.get(hash)
        }

        fn contains(&self, hash: &ContentHash) -> bool {
            !self.forgotten.lock().contains(hash) && self.inner.contains(hash)
        }

        fn len(&self) -> usize {
            self.inner.len()
        }

        fn hashes(&self) -> Vec<ContentHash> {
            self.inner.hashes()
        }
    }

    #[test]
    fn missing_object_is_corrupt_state() {
        let store = Arc::new(ForgetfulStore::default());
        let mut vfs = Vfs::new(store.clone());
        vfs.write("a.txt", b"kept");
        vfs.write("b.txt", b"lost");
        vfs.write("c.txt", b"new");
        let head = vfs.commit().unwrap();
        vfs.write("c.txt", b"newer");
        assert_eq!(status(&vfs, &head).unwrap().len(), 1);

        store.forget(head.lookup("b.txt").unwrap());

        let err = status(&vfs, &head).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptState);
        assert!(matches!(err, VfsError::CorruptState { ref path, .. } if path == "b.txt"));

        let err = vfs.read("b.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptState);

        // commit refuses too, leaving live bytes where they were
        assert_eq!(vfs.commit().unwrap_err().kind(), ErrorKind::CorruptState);
        assert_eq!(vfs.entry("c.txt"), Some(&WorkingEntry::Bytes(b"newer".to_vec())));
    }
}
