//! WebAssembly bindings for the AyurHerb traceability dashboard
//!
//! Runs the shared collection store in the browser on top of
//! `localStorage`. Writes from other tabs arrive through the window
//! `storage` event and reach the same subscribers as local writes.
//! Values cross the JS boundary as JSON strings.

mod dashboard;
mod storage;

pub use dashboard::Dashboard;
pub use storage::LocalStorageBackend;
