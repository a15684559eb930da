//! The dashboard facade: every service behind one handle

use std::sync::Arc;

use shared::{CollectionRepository, LabResultLog, ProcessingLog, StorageEvent, StoreAdapter};
use tokio::sync::broadcast;

use crate::config::Config;
use crate::services::{
    AuthService, BatchService, ChangeFeed, CollectionService, LabService, Ledger,
    ProcessingService, ReportingService, SimulatedLedger, UploadService,
};

/// Facade over the repositories, constructed once at startup
#[derive(Clone)]
pub struct Api {
    pub auth: AuthService,
    pub collections: CollectionService,
    pub batches: BatchService,
    pub processing: ProcessingService,
    pub lab: LabService,
    pub reports: ReportingService,
    pub uploads: UploadService,
    pub changes: ChangeFeed,
    store: StoreAdapter,
}

impl Api {
    pub fn new(store: StoreAdapter, config: &Config) -> Self {
        let ledger: Arc<dyn Ledger> = Arc::new(SimulatedLedger::new(&config.ledger));
        Self::with_ledger(store, config, ledger)
    }

    /// Build the facade around a specific ledger implementation
    pub fn with_ledger(store: StoreAdapter, config: &Config, ledger: Arc<dyn Ledger>) -> Self {
        let latency = config.latency;
        let collections = if config.storage.seed_demo_data {
            CollectionRepository::new(store.clone())
        } else {
            CollectionRepository::without_seed(store.clone())
        };
        let processing = ProcessingLog::new(store.clone());
        let lab = LabResultLog::new(store.clone());

        Self {
            auth: AuthService::new(&config.jwt, latency),
            collections: CollectionService::new(collections.clone(), latency),
            batches: BatchService::new(collections.clone(), processing.clone(), latency),
            processing: ProcessingService::new(
                collections.clone(),
                processing.clone(),
                ledger.clone(),
                latency,
            ),
            lab: LabService::new(collections.clone(), lab.clone(), ledger, latency),
            reports: ReportingService::new(collections, processing, lab, latency),
            uploads: UploadService::new(latency),
            changes: ChangeFeed::attach(&store),
            store,
        }
    }

    /// Storage change events from this process and any forwarded ones
    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.changes.subscribe()
    }

    pub fn store(&self) -> &StoreAdapter {
        &self.store
    }
}
