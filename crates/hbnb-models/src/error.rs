use hbnb_types::TypeError;

/// Errors from building or rendering entities.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A field was supplied with a value the entity cannot hold: an explicit
    /// null, an empty id, a value of the wrong type, or inconsistent timestamps.
    #[error("invalid argument for '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    /// The kind name does not belong to the closed set of known kinds.
    #[error("unknown kind: {0}")]
    UnknownKind(String),

    /// A timestamp string was not valid ISO-8601.
    #[error("parse error: {0}")]
    Parse(#[from] TypeError),

    /// Conversion to the mapping form failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ModelError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for the invalid-argument condition.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
