use thiserror::Error;

use crate::types::Timestamp;

/// Unified error type for key encoding, range building and the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Argument rejected before any encoding took place.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Key does not match the codec's fixed layout.
    #[error("Malformed key: {0}")]
    MalformedKey(String),
    /// Time interval with `from` after `to`.
    #[error("Invalid range: from {from} is after to {to}")]
    InvalidRange { from: Timestamp, to: Timestamp },
    /// Stored row bytes could not be decoded.
    #[error("Corruption: {0}")]
    Corruption(String),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
