//! Domain layer: the family tree model, its file format and the default seed
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod codec;
pub mod entities;
pub mod error;
pub mod render;

pub use arena::FamilyTree;
pub use builder::SeedBuilder;
pub use entities::{Individual, PersonId, LIVING_SENTINEL};
pub use error::{DomainError, DomainResult};
