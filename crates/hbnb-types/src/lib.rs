//! Foundation types for the HBnB object store.
//!
//! Every other HBnB crate depends on `hbnb-types`. Nothing here touches the
//! filesystem or holds state; these are the values the entity model and the
//! store pass around.
//!
//! # Key Types
//!
//! - [`Kind`]: the closed set of entity kinds (`User`, `Place`, ...)
//! - [`EntityId`]: opaque, non-empty entity identifier (UUID v4 when generated)
//! - [`Timestamp`]: microsecond-precision audit timestamp with ISO-8601 form
//! - [`Fields`]: the plain mapping an entity is built from and rendered to

pub mod error;
pub mod identity;
pub mod kind;
pub mod temporal;

pub use error::TypeError;
pub use identity::EntityId;
pub use kind::{composite_key, split_key, Kind, CLASS_FIELD};
pub use temporal::Timestamp;

/// Plain attribute mapping, the JSON-object form of an entity.
pub type Fields = serde_json::Map<String, serde_json::Value>;
