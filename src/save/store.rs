//! Snapshot storage backends.
//!
//! `SaveStore` abstracts where the serialized snapshot blob lives. The file
//! backend writes through a temporary sibling and renames it into place, so
//! a crash mid-write leaves either the old save or the new one, never a
//! torn file. The memory backend backs tests and embedders with their own
//! persistence.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Where serialized snapshots are kept.
pub trait SaveStore {
    /// Read the stored blob, `None` if no save exists.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the stored blob.
    fn write(&mut self, blob: &[u8]) -> io::Result<()>;

    /// Remove the stored blob. Removing a non-existent save is not an error.
    fn delete(&mut self) -> io::Result<()>;
}

/// File-backed store with atomic replacement.
#[derive(Clone, Debug)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    /// Create a store at the given path. Nothing is touched until the first
    /// write or delete.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The save file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SaveStore for FileSaveStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, blob: &[u8]) -> io::Result<()> {
        let tmp = self.tmp_path();
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &self.path)
    }

    fn delete(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory store for tests and custom persistence.
#[derive(Clone, Debug, Default)]
pub struct MemorySaveStore {
    blob: Option<Vec<u8>>,
}

impl MemorySaveStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a blob is stored.
    #[must_use]
    pub fn has_save(&self) -> bool {
        self.blob.is_some()
    }
}

impl SaveStore for MemorySaveStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &[u8]) -> io::Result<()> {
        self.blob = Some(blob.to_vec());
        Ok(())
    }

    fn delete(&mut self) -> io::Result<()> {
        self.blob = None;
        Ok(())
    }
}
