//! File upload handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::DataResponse;
use crate::services::upload::MAX_UPLOAD_BYTES;
use crate::AppState;

/// Request body cap for uploads: base64 of the largest accepted file plus
/// room for the JSON envelope and file name
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES.div_ceil(3) * 4 + 64 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    /// Base64 (standard alphabet) file content
    pub content: String,
}

pub async fn upload_file(
    State(state): State<AppState>,
    Json(body): Json<UploadRequest>,
) -> impl IntoResponse {
    let content = match STANDARD.decode(body.content.as_bytes()) {
        Ok(content) => content,
        Err(e) => {
            return AppError::Validation {
                field: "content".to_string(),
                message: format!("Content is not valid base64: {}", e),
            }
            .into_response()
        }
    };

    match state.api.uploads.upload_file(&body.file_name, &content).await {
        Ok(receipt) => (StatusCode::CREATED, Json(DataResponse::new(receipt))).into_response(),
        Err(e) => e.into_response(),
    }
}
