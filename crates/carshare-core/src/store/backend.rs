//! Byte-level backends for the record store.

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace, warn};

use super::Result;
use crate::error::StoreError;

/// Whole-collection storage: read everything, write everything.
pub trait RecordBackend {
    /// Guard held for the duration of one load-modify-store cycle.
    type Lock;

    /// Acquire exclusive access for a mutation.
    fn lock(&self) -> Result<Self::Lock>;

    /// Read the stored bytes; `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored bytes.
    fn store(&self, bytes: &[u8]) -> Result<()>;
}

/// JSON file on disk.
///
/// Writes go to a temporary file next to the target which is then renamed
/// over it, so a failed write leaves the previous collection intact.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    use_lock: bool,
}

impl FileBackend {
    /// Create a backend for `path`, with locking enabled.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            use_lock: true,
        }
    }

    /// Set whether mutations take the `<file>.lock` lock file.
    pub fn with_locking(mut self, use_lock: bool) -> Self {
        self.use_lock = use_lock;
        self
    }

    /// Path of the collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the lock file guarding the collection.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl RecordBackend for FileBackend {
    type Lock = Option<FileLock>;

    fn lock(&self) -> Result<Self::Lock> {
        if !self.use_lock {
            return Ok(None);
        }

        fs::create_dir_all(self.parent_dir())?;
        let lock_path = self.lock_path();

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                // Guard first, so a failed PID write still removes the file
                let lock = FileLock { path: lock_path };
                writeln!(file, "{}", std::process::id())?;
                trace!("Acquired store lock {}", lock.path.display());
                Ok(Some(lock))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::Locked(lock_path)),
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, bytes: &[u8]) -> Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(bytes)?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

/// Lock file removed when dropped.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove store lock {}: {}", self.path.display(), e);
        }
    }
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: RefCell<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing bytes.
    pub fn with_contents(bytes: Vec<u8>) -> Self {
        Self {
            contents: RefCell::new(Some(bytes)),
        }
    }

    /// Currently stored bytes.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.contents.borrow().clone()
    }
}

impl RecordBackend for MemoryBackend {
    type Lock = ();

    fn lock(&self) -> Result<Self::Lock> {
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.contents())
    }

    fn store(&self, bytes: &[u8]) -> Result<()> {
        *self.contents.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}
