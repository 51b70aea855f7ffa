//! Error types for impact-engine.
//!
//! None of these cross the public service boundary: storage errors are
//! absorbed by [`crate::persistence::Persistence`] and tracking errors by
//! [`crate::queue::ChangeSender::track`].

use thiserror::Error;

/// Errors from a key-value storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium could not be read or written.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be represented on this medium.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The medium refused the operation (full, disabled, detached).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from submitting a change for tracking.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Nothing is receiving tracked changes; the change is lost.
    #[error("No change handler registered; change to {asset_id} dropped")]
    MissingHandler { asset_id: String },
}
