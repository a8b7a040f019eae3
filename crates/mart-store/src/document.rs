//! # JSON Document Files
//!
//! Every store keeps its whole state in one JSON file. This module is the
//! only place that touches those files.
//!
//! ## Read-Modify-Write Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    JsonDocument::update(f)                              │
//! │                                                                         │
//! │  lock (one mutex per document)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read whole file ──► missing / malformed? ──► T::default()             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  f(&mut doc) ──► Err? ──► return Err, file untouched                   │
//! │       │                                                                 │
//! │       ▼ Ok                                                              │
//! │  write .<name>.tmp ──► rename over <name>                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unlock                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - No cache: every call reads the file again
//! - `create_if_absent` only ever writes a file that does not exist
//! - In-process writers to the same document are serialized
//! - A crash mid-save leaves either the old or the new document, never half
//! - Another *process* writing the same file still races (last writer wins)

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// One JSON file holding one whole logical document of type `T`.
#[derive(Debug)]
pub struct JsonDocument<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a handle for the document at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonDocument {
            path: path.into(),
            lock: Mutex::new(()),
            _doc: PhantomData,
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document.
    ///
    /// ## Returns
    /// * `Ok(Some(doc))` - File exists and parses
    /// * `Ok(None)` - File missing, empty, or malformed (logged)
    /// * `Err(StoreError::Io)` - File exists but cannot be read
    pub fn read(&self) -> StoreResult<Option<T>> {
        let _guard = self.guard();
        self.read_unlocked()
    }

    /// Replaces the whole document.
    pub fn save(&self, doc: &T) -> StoreResult<()> {
        let _guard = self.guard();
        self.write_unlocked(doc)
    }

    /// Writes `init()` only if the file does not exist.
    ///
    /// An existing file is never replaced, not even an empty or malformed
    /// one. Returns `true` if it wrote.
    pub fn create_if_absent<F>(&self, init: F) -> StoreResult<bool>
    where
        F: FnOnce() -> StoreResult<T>,
    {
        let _guard = self.guard();
        match fs::metadata(&self.path) {
            Ok(_) => return Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&self.path, e)),
        }
        self.write_unlocked(&init()?)?;
        Ok(true)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The mutex guards no data, so a panic in another holder cannot
        // leave anything half-updated in memory.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_unlocked(&self) -> StoreResult<Option<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Document missing, using default");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match serde_json::from_slice(&bytes) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Malformed document, treating as empty"
                );
                Ok(None)
            }
        }
    }

    fn write_unlocked(&self, doc: &T) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.tmp_path();

        fs::write(&tmp, &bytes).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Document saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Reads the document, substituting the empty default when absent.
    pub fn load(&self) -> StoreResult<T> {
        Ok(self.read()?.unwrap_or_default())
    }

    /// Runs one full read-modify-write cycle.
    ///
    /// The document is rewritten only if `f` returns `Ok`, so a failed
    /// operation leaves the file exactly as it was.
    pub fn update<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut T) -> StoreResult<R>,
    {
        let _guard = self.guard();
        let mut doc = self.read_unlocked()?.unwrap_or_default();
        let result = f(&mut doc)?;
        self.write_unlocked(&doc)?;
        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
