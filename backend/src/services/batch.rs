//! Batch service: derived active and processed batch views

use shared::derivation::{active_batches, find_batch, processed_batches};
use shared::{ActiveBatch, Batch, CollectionRepository, ProcessedBatch, ProcessingLog};

use crate::config::LatencyConfig;
use crate::error::{AppError, AppResult};
use crate::services::simulate_latency;

#[derive(Clone)]
pub struct BatchService {
    collections: CollectionRepository,
    processing: ProcessingLog,
    latency: LatencyConfig,
}

impl BatchService {
    pub fn new(
        collections: CollectionRepository,
        processing: ProcessingLog,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            collections,
            processing,
            latency,
        }
    }

    /// Synced/verified collections awaiting custom processing
    pub async fn get_batches(&self) -> AppResult<Vec<ActiveBatch>> {
        simulate_latency(self.latency.read()).await;

        let batches = active_batches(&self.collections.list(), &self.processing.all());
        tracing::debug!(count = batches.len(), "Derived active batches");
        Ok(batches)
    }

    /// Batches with custom processing steps and their progress
    pub async fn get_processed_batches(&self) -> AppResult<Vec<ProcessedBatch>> {
        simulate_latency(self.latency.read()).await;

        let batches = processed_batches(&self.collections.list(), &self.processing.all());
        tracing::debug!(count = batches.len(), "Derived processed batches");
        Ok(batches)
    }

    pub async fn get_batch_by_id(&self, batch_id: &str) -> AppResult<Batch> {
        simulate_latency(self.latency.read()).await;

        find_batch(&self.collections.list(), &self.processing.all(), batch_id)
            .ok_or_else(|| AppError::NotFound(format!("Batch {}", batch_id)))
    }
}
