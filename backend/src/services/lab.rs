//! Lab testing service

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::{validate_new_lab_result, CollectionRepository, LabResult, LabResultLog, LedgerReceipt, NewLabResult};
use uuid::Uuid;

use crate::config::LatencyConfig;
use crate::error::{AppError, AppResult};
use crate::services::ledger::{Ledger, LedgerEvent};
use crate::services::simulate_latency;

#[derive(Clone)]
pub struct LabService {
    collections: CollectionRepository,
    results: LabResultLog,
    ledger: Arc<dyn Ledger>,
    latency: LatencyConfig,
}

#[derive(Debug, Serialize)]
pub struct LabResultResponse {
    pub success: bool,
    pub result: LabResult,
    pub blockchain: LedgerReceipt,
}

impl LabService {
    pub fn new(
        collections: CollectionRepository,
        results: LabResultLog,
        ledger: Arc<dyn Ledger>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            collections,
            results,
            ledger,
            latency,
        }
    }

    pub async fn add_lab_result(&self, batch_id: &str, input: NewLabResult) -> AppResult<LabResultResponse> {
        simulate_latency(self.latency.ledger()).await;

        validate_new_lab_result(&input).map_err(AppError::ValidationError)?;
        if self.collections.find_by_batch(batch_id).is_none() {
            return Err(AppError::NotFound(format!("Batch {}", batch_id)));
        }

        let id = format!("LAB-{}", Uuid::new_v4().simple().to_string()[..8].to_uppercase());
        let result = input.into_result(id, batch_id, Utc::now());
        self.results.append(result.clone())?;

        let blockchain = self.ledger.record(LedgerEvent::LabResult {
            batch_id,
            test: &result.test_type,
        });

        Ok(LabResultResponse {
            success: true,
            result,
            blockchain,
        })
    }

    pub async fn get_lab_results(&self, batch_id: &str) -> AppResult<Vec<LabResult>> {
        simulate_latency(self.latency.read()).await;
        Ok(self.results.results_for(batch_id))
    }
}
