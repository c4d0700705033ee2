//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the pure domain logic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid id: {value}")]
    InvalidId { value: String },

    #[error("duplicate id {id} in ordering")]
    DuplicateId { id: i64 },

    #[error("id {id} does not belong to this scope")]
    ForeignId { id: i64 },

    #[error("id {id} is missing from ordering")]
    MissingId { id: i64 },

    #[error("srs level {level} is outside 0..={max}")]
    LevelOutOfRange { level: i64, max: u8 },
}
