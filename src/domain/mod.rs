//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM).
//! Only trait definitions, plain records and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::CatalogError;
pub use repositories::*;
