use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Durable byte storage addressed by key. `set` overwrites the previous value.
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    async fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{} ({})", source, path.display())]
    Io { source: io::Error, path: PathBuf },
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}
