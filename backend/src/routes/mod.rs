//! Route definitions for the AyurHerb dashboard API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/dashboard/stats", get(handlers::get_dashboard_stats))
        .nest("/collections", collection_routes())
        .nest("/batches", batch_routes())
        .nest("/reports", report_routes())
        .route(
            "/uploads",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(handlers::UPLOAD_BODY_LIMIT)),
        )
        .route("/events", get(handlers::stream_events))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/session", get(handlers::current_session))
}

/// Collection routes
fn collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_collections)
                .post(handlers::add_collection)
                .delete(handlers::clear_all_batches),
        )
        .route("/:id/status", put(handlers::update_collection_status))
}

/// Batch view, processing and lab routes
fn batch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_batches))
        .route("/processed", get(handlers::list_processed_batches))
        .route("/:batch_id", get(handlers::get_batch))
        .route(
            "/:batch_id/processing",
            get(handlers::list_processing_steps).post(handlers::add_processing_step),
        )
        .route(
            "/:batch_id/lab-results",
            get(handlers::list_lab_results).post(handlers::add_lab_result),
        )
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/harvest", get(handlers::get_harvest_report))
        .route("/environmental", get(handlers::get_environmental_report))
        .route("/compliance", get(handlers::get_compliance_report))
}
