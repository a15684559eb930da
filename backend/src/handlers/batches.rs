//! Batch view handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::handlers::DataResponse;
use crate::AppState;

pub async fn list_batches(State(state): State<AppState>) -> impl IntoResponse {
    match state.api.batches.get_batches().await {
        Ok(batches) => (StatusCode::OK, Json(DataResponse::new(batches))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_processed_batches(State(state): State<AppState>) -> impl IntoResponse {
    match state.api.batches.get_processed_batches().await {
        Ok(batches) => (StatusCode::OK, Json(DataResponse::new(batches))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get one batch, tagged with the view it is in
pub async fn get_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> impl IntoResponse {
    match state.api.batches.get_batch_by_id(&batch_id).await {
        Ok(batch) => (StatusCode::OK, Json(DataResponse::new(batch))).into_response(),
        Err(e) => e.into_response(),
    }
}
