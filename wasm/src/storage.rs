//! Browser `localStorage` backend

use shared::{KeyValueStore, StoreError};
use wasm_bindgen::{JsCast, JsValue};

/// `window.localStorage`, looked up on every call.
///
/// Holding no JS handles keeps the backend `Send + Sync`; the browser build
/// is single-threaded so the lookup is the only cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    /// Fails when storage is disabled (private mode, sandboxed iframe)
    pub fn probe() -> Result<Self, StoreError> {
        storage()?;
        Ok(Self)
    }
}

fn storage() -> Result<web_sys::Storage, StoreError> {
    let window =
        web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
    window
        .local_storage()
        .map_err(|e| StoreError::Unavailable(describe(&e)))?
        .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
}

fn describe(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(error.name()), String::from(error.message()));
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl KeyValueStore for LocalStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        storage()?
            .get_item(key)
            .map_err(|e| StoreError::Io(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        storage()?
            .set_item(key, value)
            // A full store surfaces here as "QuotaExceededError: ..."
            .map_err(|e| StoreError::Io(describe(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Io(describe(&e)))
    }
}
