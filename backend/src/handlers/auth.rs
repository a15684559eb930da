//! Authentication handlers

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::Serialize;
use shared::Credentials;

use crate::error::{AppError, AppResult};
use crate::services::auth::LoginResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    pub username: String,
    pub role: String,
    pub expires_at: i64,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.api.auth.login(credentials).await?;
    Ok(Json(response))
}

/// Decode the bearer token issued at login
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<SessionResponse>> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Token("Missing or invalid Authorization header".to_string()))?;

    let claims = state.api.auth.validate_token(token)?;
    Ok(Json(SessionResponse {
        success: true,
        username: claims.sub,
        role: claims.role,
        expires_at: claims.exp,
    }))
}
