//! Application services

pub mod family;
pub mod store;

pub use family::{FamilyService, InitOutcome};
pub use store::TreeStore;
