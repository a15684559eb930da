//! The collection read/write contract exported to the dashboard UI

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::derivation::{active_batches, processed_batches};
use shared::{
    validate_new_collection, Collection, CollectionRepository, CollectionStatus, NewCollection,
    ProcessingLog, StorageEvent, StoreAdapter, Subscription,
};
use wasm_bindgen::prelude::*;

use crate::storage::LocalStorageBackend;

thread_local! {
    /// JS callbacks by subscription id. Store listeners must be `Send`, so
    /// they carry only the id and look the function up here.
    static CALLBACKS: RefCell<HashMap<u32, js_sys::Function>> = RefCell::new(HashMap::new());
}

#[derive(Serialize)]
struct CollectionOutcome<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<&'a Collection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Browser handle on the shared store
#[wasm_bindgen]
pub struct Dashboard {
    store: StoreAdapter,
    collections: CollectionRepository,
    processing: ProcessingLog,
    subscriptions: HashMap<u32, Subscription>,
    next_subscription: u32,
}

impl Dashboard {
    /// Dashboard over any store; seeds the demo dataset on first access
    pub fn with_store(store: StoreAdapter) -> Self {
        Self {
            collections: CollectionRepository::new(store.clone()),
            processing: ProcessingLog::new(store.clone()),
            store,
            subscriptions: HashMap::new(),
            next_subscription: 1,
        }
    }

    pub fn collections_json(&self) -> Result<String, String> {
        to_json(&self.collections.list())
    }

    pub fn add_collection_json(&self, input: &str) -> Result<String, String> {
        let input: NewCollection =
            serde_json::from_str(input).map_err(|e| format!("Invalid collection: {}", e))?;
        validate_new_collection(&input)?;

        let collection = self
            .collections
            .insert_new(input, Utc::now())
            .map_err(|e| e.to_string())?;
        to_json(&CollectionOutcome {
            success: true,
            collection: Some(&collection),
            error: None,
        })
    }

    /// Unknown ids and rejected transitions come back as `success: false`
    pub fn update_status_json(&self, id: &str, status: &str) -> Result<String, String> {
        let status: CollectionStatus = status.parse()?;
        match self.collections.update_status(id, status) {
            Ok(collection) => to_json(&CollectionOutcome {
                success: true,
                collection: Some(&collection),
                error: None,
            }),
            Err(e) => {
                web_sys_warn(&e.to_string());
                to_json(&CollectionOutcome {
                    success: false,
                    collection: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }

    pub fn batches_json(&self) -> Result<String, String> {
        to_json(&active_batches(&self.collections.list(), &self.processing.all()))
    }

    pub fn processed_batches_json(&self) -> Result<String, String> {
        to_json(&processed_batches(&self.collections.list(), &self.processing.all()))
    }

    pub fn clear(&self) -> Result<(), String> {
        self.collections.clear_all().map_err(|e| e.to_string())
    }

    /// Register a listener; returns the id to pass to [`Dashboard::remove_listener`]
    pub fn add_listener<F>(&mut self, callback: F) -> u32
    where
        F: Fn(&StorageEvent) + Send + Sync + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscriptions.insert(id, self.store.subscribe(callback));
        id
    }

    pub fn remove_listener(&mut self, id: u32) -> bool {
        match self.subscriptions.remove(&id) {
            Some(subscription) => {
                subscription.unsubscribe();
                true
            }
            None => false,
        }
    }
}

#[wasm_bindgen]
impl Dashboard {
    /// Open the dashboard over `localStorage` and follow writes from other tabs
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Dashboard, JsValue> {
        let backend = LocalStorageBackend::probe().map_err(|e| JsError::new(&e.to_string()))?;
        let store = StoreAdapter::new(Arc::new(backend));
        forward_storage_events(store.clone())?;
        Ok(Self::with_store(store))
    }

    #[wasm_bindgen(js_name = getCollections)]
    pub fn get_collections(&self) -> Result<String, JsValue> {
        self.collections_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = addCollection)]
    pub fn add_collection(&self, input: &str) -> Result<String, JsValue> {
        self.add_collection_json(input).map_err(js_error)
    }

    #[wasm_bindgen(js_name = updateCollectionStatus)]
    pub fn update_collection_status(&self, id: &str, status: &str) -> Result<String, JsValue> {
        self.update_status_json(id, status).map_err(js_error)
    }

    #[wasm_bindgen(js_name = getBatches)]
    pub fn get_batches(&self) -> Result<String, JsValue> {
        self.batches_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = getProcessedBatches)]
    pub fn get_processed_batches(&self) -> Result<String, JsValue> {
        self.processed_batches_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = clearAllBatches)]
    pub fn clear_all_batches(&self) -> Result<(), JsValue> {
        self.clear().map_err(js_error)
    }

    /// ISO-8601 time of the last write, if any
    #[wasm_bindgen(js_name = lastUpdate)]
    pub fn last_update(&self) -> Option<String> {
        self.store.last_update().map(|t| t.to_rfc3339())
    }

    /// Call `callback(eventJson)` on every change to an `ayurherb_` key
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.next_subscription;
        CALLBACKS.with(|callbacks| callbacks.borrow_mut().insert(id, callback));
        self.add_listener(move |event| deliver(id, event))
    }

    pub fn unsubscribe(&mut self, id: u32) -> bool {
        CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&id));
        self.remove_listener(id)
    }
}

fn deliver(id: u32, event: &StorageEvent) {
    let Some(callback) = CALLBACKS.with(|callbacks| callbacks.borrow().get(&id).cloned()) else {
        return;
    };
    let payload = match serde_json::to_string(event) {
        Ok(payload) => payload,
        Err(e) => {
            web_sys_warn(&format!("Failed to encode change event: {}", e));
            return;
        }
    };
    if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&payload)) {
        web_sys::console::error_2(&JsValue::from_str("ayurherb subscriber threw"), &e);
    }
}

/// Forward `storage` events (writes made by other tabs) to the adapter's subscribers
fn forward_storage_events(store: StoreAdapter) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let listener = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
        // `key` is null when another tab called localStorage.clear()
        if let Some(key) = event.key() {
            store.notify(StorageEvent {
                key,
                new_value: event.new_value(),
            });
        }
    });
    window.add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())?;
    // Lives as long as the page
    listener.forget();
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn js_error(message: String) -> JsValue {
    web_sys_warn(&message);
    JsError::new(&message).into()
}

#[cfg(target_arch = "wasm32")]
fn web_sys_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn web_sys_warn(_message: &str) {}
