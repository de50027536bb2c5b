//! JSON-file thread store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::ThreadData;
use crate::ThreadStoreError;

/// Key-value storage for conversation threads.
pub trait ThreadStore {
    /// Load a thread; `Ok(None)` when the id has never been saved.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadStoreError`] on I/O or parse failure.
    fn load(&self, thread_id: &str) -> Result<Option<ThreadData>, ThreadStoreError>;

    /// Save (create or replace) a thread.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadStoreError`] on I/O or serialization failure.
    fn save(&self, thread_id: &str, data: &ThreadData) -> Result<(), ThreadStoreError>;

    /// Delete a thread; deleting an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadStoreError`] on I/O failure.
    fn delete(&self, thread_id: &str) -> Result<(), ThreadStoreError>;

    /// List all stored thread ids, in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadStoreError`] on I/O failure.
    fn list(&self) -> Result<Vec<String>, ThreadStoreError>;
}

/// One `{thread_id}.json` file per thread under a base directory.
pub struct JsonThreadStore {
    dir: PathBuf,
}

impl JsonThreadStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ThreadStoreError::Io`] if the directory cannot be created.
    pub fn new(dir: &Path) -> Result<Self, ThreadStoreError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, thread_id: &str) -> Result<PathBuf, ThreadStoreError> {
        // Thread ids become file names; reject anything that could escape
        // the store directory.
        if thread_id.is_empty()
            || !thread_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ThreadStoreError::InvalidThreadId(thread_id.to_owned()));
        }
        Ok(self.dir.join(format!("{thread_id}.json")))
    }
}

impl ThreadStore for JsonThreadStore {
    fn load(&self, thread_id: &str) -> Result<Option<ThreadData>, ThreadStoreError> {
        let path = self.path_for(thread_id)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ThreadStoreError::Io(e)),
        }
    }

    fn save(&self, thread_id: &str, data: &ThreadData) -> Result<(), ThreadStoreError> {
        let path = self.path_for(thread_id)?;
        let raw = serde_json::to_string_pretty(data)?;
        fs::write(path, raw)?;
        Ok(())
    }

    fn delete(&self, thread_id: &str) -> Result<(), ThreadStoreError> {
        let path = self.path_for(thread_id)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ThreadStoreError::Io(e)),
        }
    }

    fn list(&self) -> Result<Vec<String>, ThreadStoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_owned());
                }
            }
        }
        Ok(ids)
    }
}
