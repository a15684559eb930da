//! Collection HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use shared::{CollectionStatus, NewCollection};

use crate::handlers::DataResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: CollectionStatus,
}

/// List all collections in storage order
pub async fn list_collections(State(state): State<AppState>) -> impl IntoResponse {
    match state.api.collections.get_collections().await {
        Ok(collections) => (StatusCode::OK, Json(DataResponse::new(collections))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Submit a new collection
pub async fn add_collection(
    State(state): State<AppState>,
    Json(input): Json<NewCollection>,
) -> impl IntoResponse {
    match state.api.collections.add_collection(input).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Change a collection's status
pub async fn update_collection_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> impl IntoResponse {
    match state
        .api
        .collections
        .update_collection_status(&id, body.status)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Wipe all collections
pub async fn clear_all_batches(State(state): State<AppState>) -> impl IntoResponse {
    match state.api.collections.clear_all_batches().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}
