//! Simulated backend services for the AyurHerb dashboard
//!
//! Each service delegates to the shared repositories and waits out an
//! artificial delay first, so the dashboard's loading states behave as they
//! would against a real backend and chain.

pub mod api;
pub mod auth;
pub mod batch;
pub mod change_feed;
pub mod collection;
pub mod lab;
pub mod ledger;
pub mod processing;
pub mod reporting;
pub mod upload;

pub use api::Api;
pub use auth::AuthService;
pub use batch::BatchService;
pub use change_feed::ChangeFeed;
pub use collection::CollectionService;
pub use lab::LabService;
pub use ledger::{Ledger, LedgerEvent, SimulatedLedger};
pub use processing::ProcessingService;
pub use reporting::ReportingService;
pub use upload::UploadService;

use std::time::Duration;

/// Suspend for the operation's artificial latency
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
