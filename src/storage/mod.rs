mod file_store;
mod key_value_store;
mod memory_store;

pub use file_store::FileStore;
pub use key_value_store::{KeyValueStore, StorageError};
pub use memory_store::MemoryStore;
