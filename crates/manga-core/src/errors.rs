//! Cross-cutting error types.
//!
//! Transport, storage, and configuration errors live in their own crates.
//! A unified error is deferred to `manga-cli`, where everything converges
//! into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any SiteManga crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value could not be parsed into the expected type.
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: String },
}
