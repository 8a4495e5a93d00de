//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum CatalogError {
    /// Record not found for the given id
    NotFound,
    /// Missing or malformed required field
    Validation(String),
    /// A referenced id does not exist at write time
    Referential(String),
    /// Uniqueness or foreign-key violation surfaced by the store
    Constraint(String),
    /// Any other database/persistence error
    Database(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound => write!(f, "Record not found"),
            CatalogError::Validation(msg) => write!(f, "Validation error: {}", msg),
            CatalogError::Referential(msg) => write!(f, "Referential error: {}", msg),
            CatalogError::Constraint(msg) => write!(f, "Constraint error: {}", msg),
            CatalogError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for CatalogError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotFound(_) => CatalogError::NotFound,
            other => {
                let msg = other.to_string();
                if msg.contains("constraint") || msg.contains("CONSTRAINT") {
                    CatalogError::Constraint(msg)
                } else {
                    CatalogError::Database(msg)
                }
            }
        }
    }
}
