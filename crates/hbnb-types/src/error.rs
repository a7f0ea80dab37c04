use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown kind: {0}")]
    UnknownKind(String),

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("entity id cannot be empty")]
    EmptyId,

    #[error("malformed composite key: {0}")]
    MalformedKey(String),
}
