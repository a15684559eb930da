//! Processing step log, keyed by batch id

use std::collections::BTreeMap;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::ProcessingStep;
use crate::store::{StoreAdapter, PROCESSING_STEPS_KEY};

/// Custom processing steps per batch id, in insertion order
pub type StepsByBatch = BTreeMap<String, Vec<ProcessingStep>>;

/// Append-only store of processing steps
#[derive(Debug, Clone)]
pub struct ProcessingLog {
    store: StoreAdapter,
}

impl ProcessingLog {
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    pub fn all(&self) -> StepsByBatch {
        self.store.read(PROCESSING_STEPS_KEY)
    }

    pub fn steps_for(&self, batch_id: &str) -> Vec<ProcessingStep> {
        self.all().remove(batch_id).unwrap_or_default()
    }

    /// Append a step and return how many custom steps the batch now has
    pub fn append(&self, batch_id: &str, step: ProcessingStep) -> RepositoryResult<usize> {
        let count = self
            .store
            .update(PROCESSING_STEPS_KEY, |steps: &mut StepsByBatch| {
                let list = steps.entry(batch_id.to_string()).or_default();
                list.push(step);
                Ok::<_, RepositoryError>(list.len())
            })?;

        tracing::info!(batch_id, count, "Recorded processing step");
        Ok(count)
    }
}
