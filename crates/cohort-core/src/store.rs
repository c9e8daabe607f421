//! Document store: tri-state YAML reads, atomic writes, and the sidecar
//! lock that serializes read-modify-write cycles on shared documents.

use crate::error::Result;
use crate::io::atomic_write;
use crate::paths::sidecar_lock_path;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// DocState
// ---------------------------------------------------------------------------

/// Outcome of reading a persisted document.
///
/// A missing file is a legitimate first-run state and distinct from a read
/// or parse failure, which surfaces as an error instead of an empty value.
#[derive(Debug)]
pub enum DocState<T> {
    Present(T),
    Absent,
}

impl<T> DocState<T> {
    /// Apply the absent-means-empty convention.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            DocState::Present(v) => v,
            DocState::Absent => T::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Read / write
// ---------------------------------------------------------------------------

pub fn read_doc<T: DeserializeOwned>(path: &Path) -> Result<DocState<T>> {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(DocState::Absent),
        Err(e) => return Err(e.into()),
    };
    let value = serde_yaml::from_str(&data)?;
    Ok(DocState::Present(value))
}

pub fn write_doc<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    atomic_write(path, data.as_bytes())
}

// ---------------------------------------------------------------------------
// DocLock
// ---------------------------------------------------------------------------

/// Exclusive advisory lock on a document's sidecar `.lock` file.
///
/// Held across an entire read-modify-write cycle so two processes mutating
/// the same shared document never lose each other's writes. The sidecar is
/// locked rather than the document itself because the document is replaced
/// by atomic rename, which would orphan a lock on the old inode.
///
/// Blocking: cycles are a read, an in-memory mutation, and one write, so a
/// waiter is delayed microseconds, not seconds. Released on drop.
#[derive(Debug)]
pub struct DocLock {
    file: File,
    path: PathBuf,
}

impl DocLock {
    pub fn acquire(doc: &Path) -> Result<Self> {
        let path = sidecar_lock_path(doc);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()?;
        tracing::debug!("acquired document lock: {}", path.display());
        Ok(Self { file, path })
    }
}

impl Drop for DocLock {
    fn drop(&mut self) {
        // Closing the descriptor releases the lock even if unlock fails.
        let _ = self.file.unlock();
        tracing::debug!("released document lock: {}", self.path.display());
    }
}

/// Run `f` on the current document value while holding its sidecar lock,
/// then persist whatever `f` returns in its place.
pub fn update_doc<T, R>(path: &Path, f: impl FnOnce(&mut T) -> R) -> Result<R>
where
    T: Serialize + DeserializeOwned + Default,
{
    let _guard = DocLock::acquire(path)?;
    let mut value: T = read_doc(path)?.unwrap_or_default();
    let out = f(&mut value);
    write_doc(path, &value)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Doc {
        items: Vec<String>,
    }

    #[test]
    fn read_absent_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let state: DocState<Doc> = read_doc(&dir.path().join("missing.yaml")).unwrap();
        assert!(matches!(state, DocState::Absent));
    }

    #[test]
    fn read_corrupt_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        std::fs::write(&path, "items: {not: [a, list}").unwrap();
        assert!(read_doc::<Doc>(&path).is_err());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        let doc = Doc {
            items: vec!["a".to_string(), "b".to_string()],
        };
        write_doc(&path, &doc).unwrap();
        let state: DocState<Doc> = read_doc(&path).unwrap();
        match state {
            DocState::Present(loaded) => assert_eq!(loaded, doc),
            DocState::Absent => panic!("expected document"),
        }
    }

    #[test]
    fn update_doc_creates_from_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        update_doc::<Doc, _>(&path, |d| d.items.push("x".to_string())).unwrap();
        let doc: Doc = read_doc(&path).unwrap().unwrap_or_default();
        assert_eq!(doc.items, vec!["x".to_string()]);
    }

    #[test]
    fn concurrent_updates_all_survive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || {
                    update_doc::<Doc, _>(&path, |d| d.items.push(format!("item-{i}"))).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let doc: Doc = read_doc(&path).unwrap().unwrap_or_default();
        assert_eq!(doc.items.len(), 8, "a concurrent write was lost");
    }

    #[test]
    fn doc_lock_released_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        drop(DocLock::acquire(&path).unwrap());
        // Re-acquisition would deadlock if the first lock leaked.
        drop(DocLock::acquire(&path).unwrap());
    }
}
