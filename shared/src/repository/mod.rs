//! Repositories over the persisted lists
//!
//! Every operation reads fresh from the store adapter; nothing is cached.
//! Expected failures (unknown id, rejected transition) come back as
//! [`RepositoryError`](crate::error::RepositoryError) values, never panics.

mod collections;
mod lab;
mod processing;

pub use collections::CollectionRepository;
pub use lab::{LabResultLog, LabResultsByBatch};
pub use processing::{ProcessingLog, StepsByBatch};
