use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use crate::foundation::error::{AppError, AppResult};

/// String key-value storage the session is mirrored into.
///
/// Implementations decide durability; callers treat every failure as non-fatal.
pub trait Repository {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    /// Insert or replace a value.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
    /// Delete a key; absent keys are not an error.
    fn remove(&mut self, key: &str) -> AppResult<()>;
    /// Delete every key.
    fn clear(&mut self) -> AppResult<()>;
}

/// Volatile repository backed by a sorted map.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    entries: BTreeMap<String, String>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Repository for MemoryRepository {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Repository persisted as a single JSON object on disk.
///
/// The whole file is rewritten on every mutation.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileRepository {
    /// Open `path`, starting empty when the file does not exist.
    ///
    /// An unreadable or corrupt file is logged and treated as empty; it is overwritten by the
    /// next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding session store");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn read_entries(path: &Path) -> AppResult<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let f = File::open(path).map_err(|e| {
            AppError::storage(format!("open session store '{}': {e}", path.display()))
        })?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("create store dir '{}': {e}", parent.display()))
            })?;
        }
        let f = File::create(&self.path).map_err(|e| {
            AppError::storage(format!("write session store '{}': {e}", self.path.display()))
        })?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, &self.entries)?;
        w.flush()
            .map_err(|e| AppError::storage(format!("flush session store: {e}")))
    }
}

impl Repository for FileRepository {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.entries.clear();
        self.flush()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/repository.rs"]
mod tests;
