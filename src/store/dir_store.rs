use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::store::{SampleStore, StoreError};

/// Store backed by a directory holding one file per record, named by key.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Opens an existing directory as a store.
    pub fn open(path: impl AsRef<Path>) -> Result<DirStore, StoreError> {
        let root = path.as_ref().to_path_buf();
        let meta = fs::metadata(&root).map_err(|e| StoreError::Open {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;
        if !meta.is_dir() {
            return Err(StoreError::Open {
                path: root.display().to_string(),
                reason: "not a directory".into(),
            });
        }
        info!(path = %root.display(), "opened sample store");
        Ok(DirStore { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Keys must be plain file names; anything that could escape the store
    /// directory is refused.
    fn record_path(&self, key: &str) -> Option<PathBuf> {
        let plain = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        plain.then(|| self.root.join(key))
    }

    pub fn put(&self, key: &str, record: &[u8]) -> Result<(), StoreError> {
        let path = self.record_path(key).ok_or_else(|| StoreError::Write {
            key: key.to_owned(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "invalid key"),
        })?;
        fs::write(path, record).map_err(|source| StoreError::Write { key: key.to_owned(), source })
    }
}

impl SampleStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let Some(path) = self.record_path(key) else {
            return Ok(None);
        };
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { key: key.to_owned(), source }),
        }
    }
}
