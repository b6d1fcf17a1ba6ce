use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::StoreError;

/// One file per key under a data directory, named after the key.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.tmp"));
        std::fs::write(&tmp, value).map_err(|e| io_error(key, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_error(key, e))?;
        log::debug!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }
}
