//! Collection service: farmer submissions and their status

use chrono::Utc;
use serde::Serialize;
use shared::{
    validate_new_collection, Collection, CollectionRepository, CollectionStatus, NewCollection,
};

use crate::config::LatencyConfig;
use crate::error::{AppError, AppResult};
use crate::services::simulate_latency;

#[derive(Clone)]
pub struct CollectionService {
    repository: CollectionRepository,
    latency: LatencyConfig,
}

/// Result of a submission or status change
#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub success: bool,
    pub collection: Collection,
}

/// Result of a bulk operation
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl CollectionService {
    pub fn new(repository: CollectionRepository, latency: LatencyConfig) -> Self {
        Self {
            repository,
            latency,
        }
    }

    /// All collections in storage order
    pub async fn get_collections(&self) -> AppResult<Vec<Collection>> {
        simulate_latency(self.latency.read()).await;
        Ok(self.repository.list())
    }

    /// Record a new submission with generated `id` and `batch_id`
    pub async fn add_collection(&self, input: NewCollection) -> AppResult<CollectionResponse> {
        simulate_latency(self.latency.write()).await;

        validate_new_collection(&input).map_err(AppError::ValidationError)?;

        let collection = self.repository.insert_new(input, Utc::now())?;
        tracing::info!(
            id = %collection.id,
            batch_id = %collection.batch_id,
            herb = %collection.herb,
            "Collection submitted"
        );

        Ok(CollectionResponse {
            success: true,
            collection,
        })
    }

    pub async fn update_collection_status(
        &self,
        id: &str,
        status: CollectionStatus,
    ) -> AppResult<CollectionResponse> {
        simulate_latency(self.latency.write()).await;

        let collection = self.repository.update_status(id, status)?;
        Ok(CollectionResponse {
            success: true,
            collection,
        })
    }

    /// Wipe the collection list; the demo dataset returns on the next read
    pub async fn clear_all_batches(&self) -> AppResult<ActionResponse> {
        simulate_latency(self.latency.write()).await;

        self.repository.clear_all()?;
        Ok(ActionResponse {
            success: true,
            message: "All batches cleared".to_string(),
        })
    }
}
