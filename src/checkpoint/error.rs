//! Checkpoint error types.

use thiserror::Error;

/// Failure of the underlying encoding, by format.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary: {0}")]
    Binary(#[from] bincode::Error),
}

/// Errors raised while saving or restoring a machine's position.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[source] CodecError),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[source] CodecError),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint names a state the structure does not know.
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
