//! Infrastructure layer - Framework implementations
//!
//! This layer contains the SeaORM repository implementations behind the
//! domain traits.

pub mod repositories;

pub use repositories::*;
