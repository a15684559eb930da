//! HTTP handlers for the dashboard API

mod auth;
mod batches;
mod collections;
mod events;
mod health;
mod lab;
mod processing;
mod reports;
mod uploads;

pub use auth::*;
pub use batches::*;
pub use collections::*;
pub use events::*;
pub use health::*;
pub use lab::*;
pub use processing::*;
pub use reports::*;
pub use uploads::*;

use serde::Serialize;

/// Success envelope for list and report payloads
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
