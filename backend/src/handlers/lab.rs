//! Lab result handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::NewLabResult;

use crate::handlers::DataResponse;
use crate::AppState;

pub async fn add_lab_result(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
    Json(input): Json<NewLabResult>,
) -> impl IntoResponse {
    match state.api.lab.add_lab_result(&batch_id, input).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_lab_results(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> impl IntoResponse {
    match state.api.lab.get_lab_results(&batch_id).await {
        Ok(results) => (StatusCode::OK, Json(DataResponse::new(results))).into_response(),
        Err(e) => e.into_response(),
    }
}
