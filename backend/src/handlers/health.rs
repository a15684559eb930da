//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub last_update: Option<String>,
    /// Open `/api/v1/events` streams
    pub event_subscribers: usize,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = match state.config.storage.backend {
        crate::config::StorageBackend::Memory => "memory",
        crate::config::StorageBackend::File => "file",
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.to_string(),
        last_update: state.api.store().last_update().map(|t| t.to_rfc3339()),
        event_subscribers: state.api.changes.receiver_count(),
    })
}
