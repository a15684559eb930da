//! Shared types and core logic for the AyurHerb traceability dashboard
//!
//! This crate holds the data model, the persistent store adapter, the
//! repositories and the batch derivation engine. It is synchronous and is
//! used by both the backend server and the browser (WASM) build.

pub mod analytics;
pub mod derivation;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use repository::*;
pub use store::{KeyValueStore, MemoryStore, StoreAdapter, Subscription};
pub use types::*;
pub use validation::*;
