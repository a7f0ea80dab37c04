//! Entity storage for the HBnB object store.
//!
//! A store keeps every live entity in a registry keyed by `"<Kind>.<id>"`
//! and can write the whole registry to a single JSON document, or read such
//! a document back and rebuild typed entities through the closed kind
//! dispatch table in `hbnb-models`.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FileStorage`] -- lock-guarded [`Registry`] persisted to one JSON file
//!
//! # Design Rules
//!
//! 1. There is no global store. Callers own a store and pass it by reference
//!    to everything that creates or saves entities.
//! 2. Every persist rewrites the entire file with a direct write.
//! 3. A missing file on reload is a first run, not an error.
//! 4. A present but unreadable file is always surfaced: as a warning and a
//!    [`ReloadReport::Skipped`] under [`ReloadPolicy::Lenient`], as an error
//!    under [`ReloadPolicy::Strict`]. The registry is left untouched.
//! 5. Persist failures are always returned to the caller.

pub mod config;
pub mod error;
pub mod file;
pub mod registry;
pub mod traits;

pub use config::{ReloadPolicy, StorageConfig};
pub use error::{StorageError, StoreResult};
pub use file::FileStorage;
pub use registry::Registry;
pub use traits::{ObjectStore, ReloadReport};
