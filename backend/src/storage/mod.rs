//! Key-value backends for the native server

mod file;

pub use file::FileStore;

use std::sync::Arc;

use shared::{MemoryStore, StoreAdapter, StoreError};

use crate::config::{StorageBackend, StorageConfig};

/// Open the configured backend and wrap it in a store adapter
pub fn open_store(config: &StorageConfig) -> Result<StoreAdapter, StoreError> {
    let adapter = match config.backend {
        StorageBackend::Memory => {
            let store = match config.quota_bytes {
                Some(quota) => MemoryStore::with_quota(quota),
                None => MemoryStore::new(),
            };
            StoreAdapter::new(Arc::new(store))
        }
        StorageBackend::File => {
            let store = FileStore::open(&config.data_dir, config.quota_bytes)?;
            StoreAdapter::new(Arc::new(store))
        }
    };

    tracing::info!(backend = ?config.backend, "Opened storage backend");
    Ok(adapter)
}
