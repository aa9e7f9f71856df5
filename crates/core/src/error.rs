//! Domain error type shared across the workspace.

use crate::types::DbId;

/// Errors produced by core validation and lookups.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup failed.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity type name, e.g. `"Artwork"`.
        entity: &'static str,
        /// The ID that was looked up.
        id: DbId,
    },

    /// A style slug did not resolve to any registered style.
    #[error("Unknown style slug '{0}'")]
    UnknownStyle(String),

    /// Input failed validation.
    #[error("{0}")]
    Validation(String),

    /// An unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
