//! Entity model for the HBnB object store.
//!
//! Every entity shares the identity and audit fields of [`BaseModel`] and adds
//! a fixed set of kind-specific fields with plain defaults (empty string,
//! zero, empty list). Entities convert to and from a flat JSON mapping; the
//! mapping carries a `__class__` discriminant naming the kind.
//!
//! # Kinds
//!
//! - [`BaseModel`]: identity and timestamps only
//! - [`User`], [`State`], [`City`], [`Amenity`], [`Place`], [`Review`]
//!
//! [`Entity`] is the closed tagged variant over all kinds, and
//! [`Entity::from_fields`] is the dispatch table used on reload.
//!
//! Building an entity here does not register it anywhere; stores do that.

pub mod base;
pub mod entity;
pub mod error;
mod fields;
pub mod kinds;

pub use base::{BaseModel, Model};
pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use kinds::{Amenity, City, Place, Review, State, User};
