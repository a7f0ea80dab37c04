use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::identity::EntityId;

/// Name of the discriminant field carried by the mapping form of an entity.
pub const CLASS_FIELD: &str = "__class__";

/// The closed set of entity kinds known to the store.
///
/// The variant name is the kind name used in composite keys and in the
/// discriminant field, so `Kind::Place` is written as `"Place"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl Kind {
    /// Every kind, base kind first.
    pub const ALL: [Kind; 7] = [
        Kind::BaseModel,
        Kind::User,
        Kind::State,
        Kind::City,
        Kind::Amenity,
        Kind::Place,
        Kind::Review,
    ];

    /// The kind name as it appears in keys and in `__class__`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Amenity => "Amenity",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = TypeError;

    /// Kind names are matched exactly; `"user"` is not a kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TypeError::UnknownKind(s.to_string()))
    }
}

/// Build the registry key `"<Kind>.<id>"` for an entity.
pub fn composite_key(kind: Kind, id: &EntityId) -> String {
    format!("{kind}.{id}")
}

/// Split a composite key at its first `.` into kind and id.
///
/// The id part may itself contain dots; only the prefix names the kind.
pub fn split_key(key: &str) -> Result<(Kind, &str), TypeError> {
    let (prefix, id) = key
        .split_once('.')
        .ok_or_else(|| TypeError::MalformedKey(key.to_string()))?;
    if id.is_empty() {
        return Err(TypeError::MalformedKey(key.to_string()));
    }
    Ok((prefix.parse()?, id))
}
