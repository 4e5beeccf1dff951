use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::utils::paths::{app_data_dir, canonical_name, ensure_dir, store_dir_in, write_atomic};

use super::{KeyValueStore, Result};

const STORE_EXTENSION: &str = "kv";

/// Key-value store keeping each key in its own file under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Opens the store under the application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(store_dir_in(&app_data_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(key), STORE_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        write_atomic(&path, value)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "store entry written");
        Ok(())
    }
}
