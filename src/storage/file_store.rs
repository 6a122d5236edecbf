use crate::storage::{KeyValueStore, StorageError};
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs;
use tracing::{instrument, trace};

/// Stores every key as a JSON file in a single directory.
#[derive(Debug)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        FileStore { directory: directory.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let is_valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !is_valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.directory.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => {
                trace!("Read {} byte(s) from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { source, path }),
        }
    }

    // Written next to the target and renamed over it, so a crash mid-write leaves the old value intact
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.directory).await.map_err(|source| StorageError::Io {
            source,
            path: self.directory.clone(),
        })?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &bytes).await.map_err(|source| StorageError::Io {
            source,
            path: temp_path.clone(),
        })?;
        fs::rename(&temp_path, &path).await.map_err(|source| StorageError::Io { source, path: path.clone() })?;

        trace!("Wrote {} byte(s) to {}", bytes.len(), path.display());
        Ok(())
    }
}
