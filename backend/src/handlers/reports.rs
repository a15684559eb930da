//! Dashboard and report handlers

use axum::{extract::State, Json};
use shared::{ComplianceReport, DashboardStats, EnvironmentalReport, HarvestSummary};

use crate::error::AppResult;
use crate::handlers::DataResponse;
use crate::AppState;

pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = state.api.reports.get_dashboard_stats().await?;
    Ok(Json(DataResponse::new(stats)))
}

/// Per-herb harvest totals
pub async fn get_harvest_report(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<HarvestSummary>>>> {
    let report = state.api.reports.get_harvest_data().await?;
    Ok(Json(DataResponse::new(report)))
}

pub async fn get_environmental_report(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<EnvironmentalReport>>> {
    let report = state.api.reports.get_environmental_report().await?;
    Ok(Json(DataResponse::new(report)))
}

pub async fn get_compliance_report(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ComplianceReport>>> {
    let report = state.api.reports.get_ayush_compliance().await?;
    Ok(Json(DataResponse::new(report)))
}
