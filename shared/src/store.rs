//! Persistent store adapter
//!
//! Wraps a string key-value backend (browser `localStorage`, a directory of
//! JSON files, or memory) with JSON encoding, a `last update` side key and
//! change notifications for every key in the `ayurherb_` namespace.
//!
//! There is no locking across execution contexts: two writers sharing a
//! backend race and the last write wins. Notifications are the only
//! consistency aid and they are eventually consistent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;
use crate::types::StorageEvent;

pub const NAMESPACE: &str = "ayurherb_";
pub const COLLECTIONS_KEY: &str = "ayurherb_collections";
pub const PROCESSING_STEPS_KEY: &str = "ayurherb_processing_steps";
pub const LAB_RESULTS_KEY: &str = "ayurherb_lab_results";
pub const LAST_UPDATE_KEY: &str = "ayurherb_last_update";
/// Derived batch snapshot written by older dashboard builds; only ever removed
pub const LEGACY_BATCHES_KEY: &str = "ayurherb_batches";

/// A string key-value backend
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process backend with an optional byte quota, mirroring browser storage limits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota_bytes: Some(quota_bytes),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

type Listener = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// JSON adapter over a [`KeyValueStore`] with change notifications.
///
/// Cloning is cheap and clones share the backend and the subscriber set.
#[derive(Clone)]
pub struct StoreAdapter {
    backend: Arc<dyn KeyValueStore>,
    listeners: Arc<Mutex<Listeners>>,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for StoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAdapter").finish_non_exhaustive()
    }
}

impl StoreAdapter {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            listeners: Arc::default(),
            write_lock: Arc::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Decode the value at `key`. Absent, unreadable or malformed values all
    /// yield `T::default()`; the last two are logged.
    pub fn read<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.read_raw(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding malformed stored value");
                T::default()
            }
        }
    }

    /// Raw stored string, `None` when absent or unreadable
    pub fn read_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to read from storage");
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read_raw(key).is_some()
    }

    /// Encode and store `value`, stamp the last-update key, then notify
    /// subscribers (including those in this context).
    pub fn write<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let event = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.store_encoded(key, value)?
        };
        self.notify(event);
        Ok(())
    }

    /// Read-modify-write of the value at `key`.
    ///
    /// Updates through the same adapter are applied one at a time in call
    /// order. When `mutate` fails nothing is written and no event fires.
    pub fn update<T, R, E, F>(&self, key: &str, mutate: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default,
        E: From<StoreError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let (output, event) = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            let mut value: T = self.read(key);
            let output = mutate(&mut value)?;
            let event = self.store_encoded(key, &value)?;
            (output, event)
        };
        self.notify(event);
        Ok(output)
    }

    /// Store `initial` only if `key` is absent. Returns whether it was written.
    pub fn initialize<T>(&self, key: &str, initial: impl FnOnce() -> T) -> Result<bool, StoreError>
    where
        T: Serialize,
    {
        let event = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            if self.contains(key) {
                return Ok(false);
            }
            self.store_encoded(key, &initial())?
        };
        self.notify(event);
        Ok(true)
    }

    fn store_encoded<T>(&self, key: &str, value: &T) -> Result<StorageEvent, StoreError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value).map_err(|e| {
            tracing::error!(key, error = %e, "Failed to serialize value for storage");
            StoreError::from(e)
        })?;

        if let Err(e) = self.backend.set(key, &json) {
            tracing::error!(key, error = %e, "Failed to write to storage");
            return Err(e);
        }
        if key != LAST_UPDATE_KEY {
            self.stamp_last_update();
        }

        tracing::debug!(key, bytes = json.len(), "Stored value");
        Ok(StorageEvent::changed(key, json))
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(e) = self.backend.remove(key) {
                tracing::error!(key, error = %e, "Failed to remove from storage");
                return Err(e);
            }
        }
        self.notify(StorageEvent::removed(key));
        Ok(())
    }

    /// Time of the last successful write, if any
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.read::<Option<DateTime<Utc>>>(LAST_UPDATE_KEY)
    }

    fn stamp_last_update(&self) {
        let now = Utc::now();
        let encoded = match serde_json::to_string(&now) {
            Ok(encoded) => encoded,
            Err(_) => return,
        };
        // The stamp is advisory; a failure here must not fail the data write.
        if let Err(e) = self.backend.set(LAST_UPDATE_KEY, &encoded) {
            tracing::warn!(error = %e, "Failed to stamp last update");
        }
    }

    /// Deliver `event` to every subscriber if its key is namespaced.
    ///
    /// Called for local writes and by hosts forwarding changes made in
    /// other execution contexts.
    pub fn notify(&self, event: StorageEvent) {
        if !event.key.starts_with(NAMESPACE) {
            return;
        }
        let listeners: Vec<Listener> = {
            let guard = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            guard.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        for listener in listeners {
            listener(&event);
        }
    }

    /// Register a callback for namespaced change events.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&StorageEvent) + Send + Sync + 'static,
    {
        let mut guard = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let id = guard.next_id;
        guard.next_id += 1;
        guard.entries.push((id, Arc::new(callback)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

/// Disposer returned by [`StoreAdapter::subscribe`]
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}

    /// Keep the callback registered for the adapter's whole lifetime
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut guard = listeners.lock().unwrap_or_else(PoisonError::into_inner);
            guard.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_read_absent_key_is_empty() {
        let adapter = StoreAdapter::in_memory();
        let values: Vec<String> = adapter.read(COLLECTIONS_KEY);
        assert!(values.is_empty());
        assert!(!adapter.contains(COLLECTIONS_KEY));
    }

    #[test]
    fn test_read_malformed_is_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(COLLECTIONS_KEY, "{not json").unwrap();
        let adapter = StoreAdapter::new(backend);

        let values: Vec<String> = adapter.read(COLLECTIONS_KEY);
        assert!(values.is_empty());
    }

    #[test]
    fn test_write_stamps_last_update() {
        let adapter = StoreAdapter::in_memory();
        assert!(adapter.last_update().is_none());

        adapter.write(COLLECTIONS_KEY, &vec!["a"]).unwrap();
        assert!(adapter.last_update().is_some());
    }

    #[test]
    fn test_quota_fault_is_reported() {
        let adapter = StoreAdapter::new(Arc::new(MemoryStore::with_quota(32)));
        let big = vec!["x".repeat(64)];
        let result = adapter.write(COLLECTIONS_KEY, &big);
        assert!(matches!(result, Err(StoreError::QuotaExceeded { .. })));
        assert!(!adapter.contains(COLLECTIONS_KEY));
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let adapter = StoreAdapter::in_memory();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let subscription = adapter.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        adapter.write(COLLECTIONS_KEY, &Vec::<String>::new()).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        subscription.unsubscribe();
        adapter.write(COLLECTIONS_KEY, &Vec::<String>::new()).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(adapter.subscriber_count(), 0);
    }

    #[test]
    fn test_foreign_keys_are_not_broadcast() {
        let adapter = StoreAdapter::in_memory();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let _subscription = adapter.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        adapter.write("theme", &"dark").unwrap();
        adapter.notify(StorageEvent::changed("other_app_key", "1".to_string()));
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_notifies_with_no_value() {
        let adapter = StoreAdapter::in_memory();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let _subscription = adapter.subscribe(move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        adapter.write(COLLECTIONS_KEY, &vec![1]).unwrap();
        adapter.remove(COLLECTIONS_KEY).unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].new_value.as_deref(), Some("[1]"));
        assert_eq!(events[1], StorageEvent::removed(COLLECTIONS_KEY));
    }
}
