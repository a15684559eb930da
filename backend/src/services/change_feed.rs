//! Broadcast of storage change events
//!
//! Bridges store adapter notifications onto a tokio broadcast channel so any
//! number of connected dashboards can follow writes, the way browser tabs
//! follow each other through the `storage` event.

use shared::{StorageEvent, StoreAdapter};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StorageEvent>,
}

impl ChangeFeed {
    /// Start forwarding every namespaced change on `store`
    pub fn attach(store: &StoreAdapter) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let forward = sender.clone();
        store
            .subscribe(move |event| {
                // No receivers is fine; nobody is watching right now.
                let _ = forward.send(event.clone());
            })
            .detach();
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
