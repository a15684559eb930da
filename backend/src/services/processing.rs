//! Processing service: custom processing steps anchored on the simulated ledger

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::{CollectionRepository, LedgerReceipt, NewProcessingStep, ProcessingLog, ProcessingStep};
use validator::Validate;

use crate::config::LatencyConfig;
use crate::error::{AppError, AppResult};
use crate::services::ledger::{Ledger, LedgerEvent};
use crate::services::simulate_latency;

#[derive(Clone)]
pub struct ProcessingService {
    collections: CollectionRepository,
    processing: ProcessingLog,
    ledger: Arc<dyn Ledger>,
    latency: LatencyConfig,
}

/// Result of recording a processing step
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStepResponse {
    pub success: bool,
    pub batch_id: String,
    pub step: ProcessingStep,
    /// Simulated; see [`crate::services::ledger`]
    pub blockchain: LedgerReceipt,
}

impl ProcessingService {
    pub fn new(
        collections: CollectionRepository,
        processing: ProcessingLog,
        ledger: Arc<dyn Ledger>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            collections,
            processing,
            ledger,
            latency,
        }
    }

    /// Append a step to a batch; moves the batch into the processed view
    pub async fn add_processing_step(
        &self,
        batch_id: &str,
        input: NewProcessingStep,
    ) -> AppResult<ProcessingStepResponse> {
        simulate_latency(self.latency.ledger()).await;

        input.validate().map_err(|e| {
            AppError::ValidationError(shared::describe_validation_errors(&e))
        })?;
        if self.collections.find_by_batch(batch_id).is_none() {
            return Err(AppError::NotFound(format!("Batch {}", batch_id)));
        }

        let step = input.into_step(Utc::now());
        self.processing.append(batch_id, step.clone())?;

        let blockchain = self.ledger.record(LedgerEvent::ProcessingStep {
            batch_id,
            step: step.step_type.label(),
        });

        Ok(ProcessingStepResponse {
            success: true,
            batch_id: batch_id.to_string(),
            step,
            blockchain,
        })
    }

    pub async fn get_processing_steps(&self, batch_id: &str) -> AppResult<Vec<ProcessingStep>> {
        simulate_latency(self.latency.read()).await;
        Ok(self.processing.steps_for(batch_id))
    }
}
