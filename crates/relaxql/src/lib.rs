//! # relaxql: one-call association declarations
//!
//! Wraps an ORM's association-definition API so that a single declaration
//! registers the forward association on the source model and, unless told
//! otherwise, the matching inverse association on the target model.
//!
//! The ORM itself stays external: models are reached through the
//! [`AssociationModel`] trait. An in-memory adapter ([`InMemoryModel`]) is
//! included for tests and demos.

pub mod config;
pub mod declare;
pub mod diagnostics;
pub mod error;
pub mod inflection;
pub mod manifest;
pub mod memory;
pub mod metadata;
pub mod model;
pub mod options;
pub mod registry;
pub mod relation;
pub mod request;

// Re-export core traits and types
pub use config::*;
pub use declare::*;
pub use diagnostics::*;
pub use error::*;
pub use manifest::*;
pub use memory::*;
pub use metadata::*;
pub use model::*;
pub use options::*;
pub use registry::*;
pub use relation::*;
pub use request::*;
