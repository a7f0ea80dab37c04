use std::path::PathBuf;

use hbnb_models::ModelError;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error reading or writing the storage file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The registry could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The storage file exists but is not a mapping of entity mappings.
    #[error("corrupt storage file {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// One entry of the storage file could not be rebuilt.
    #[error("invalid entry {key}: {source}")]
    Entry {
        key: String,
        #[source]
        source: ModelError,
    },

    /// Building or rendering an entity failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A thread panicked while holding the registry lock.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(&'static str),

    /// The storage configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StorageError>;
