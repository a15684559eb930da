//! Processing step handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::NewProcessingStep;

use crate::handlers::DataResponse;
use crate::AppState;

/// Record a processing step on a batch
pub async fn add_processing_step(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
    Json(input): Json<NewProcessingStep>,
) -> impl IntoResponse {
    match state.api.processing.add_processing_step(&batch_id, input).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Custom steps recorded for a batch, oldest first
pub async fn list_processing_steps(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> impl IntoResponse {
    match state.api.processing.get_processing_steps(&batch_id).await {
        Ok(steps) => (StatusCode::OK, Json(DataResponse::new(steps))).into_response(),
        Err(e) => e.into_response(),
    }
}
