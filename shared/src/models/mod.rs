//! Domain models for the AyurHerb traceability dashboard

mod batch;
mod collection;
mod lab;
mod ledger;
mod processing;
mod report;
mod user;

pub use batch::*;
pub use collection::*;
pub use lab::*;
pub use ledger::*;
pub use processing::*;
pub use report::*;
pub use user::*;
