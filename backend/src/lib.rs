//! AyurHerb traceability dashboard - backend
//!
//! The simulated backend behind the dashboard: async services with
//! artificial latency over the shared repositories, a simulated ledger, a
//! file-backed store and an HTTP API with a live change feed.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::StoreAdapter;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod storage;

pub use config::Config;
pub use services::Api;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<Api>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: StoreAdapter, config: Config) -> Self {
        Self {
            api: Arc::new(Api::new(store, &config)),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AyurHerb Traceability API v1"
}
