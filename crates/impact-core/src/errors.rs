//! Cross-cutting error types.
//!
//! Domain-specific errors (`StorageError`, `ConfigError`) live in their
//! respective crates. Core operations are total; these errors only surface
//! from the fallible primitives underneath them.

use thiserror::Error;

/// Errors that can be raised by any crate in the workspace.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lifecycle transition was attempted that is not allowed.
    #[error("Invalid state transition: {kind} {id} from {from} to {to}")]
    InvalidTransition {
        kind: String,
        id: String,
        from: String,
        to: String,
    },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
