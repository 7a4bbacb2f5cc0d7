//! Protocol error types.

use thiserror::Error;

/// Result alias for fallible codec operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while producing wire frames.
///
/// Decoding never fails through this type: undecodable input is reported as
/// [`crate::Inbound::Malformed`] instead.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// JSON serialization failed.
    #[error("JSON encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}
