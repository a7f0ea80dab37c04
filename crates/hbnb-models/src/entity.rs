use std::fmt;

use hbnb_types::{EntityId, Fields, Kind, CLASS_FIELD};
use serde_json::Value;

use crate::base::{BaseModel, Model};
use crate::error::{ModelError, ModelResult};
use crate::kinds::{Amenity, City, Place, Review, State, User};

/// Any entity, tagged by kind.
///
/// This is the value stores hold. The set of variants is closed: an entity
/// can only be rebuilt for a kind listed in [`Kind`].
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    BaseModel(BaseModel),
    User(User),
    State(State),
    City(City),
    Amenity(Amenity),
    Place(Place),
    Review(Review),
}

type Constructor = fn(Fields) -> ModelResult<Entity>;

fn construct<M: Model + Into<Entity>>(fields: Fields) -> ModelResult<Entity> {
    M::from_fields(fields).map(Into::into)
}

/// The kind dispatch table.
fn constructor(kind: Kind) -> Constructor {
    match kind {
        Kind::BaseModel => construct::<BaseModel>,
        Kind::User => construct::<User>,
        Kind::State => construct::<State>,
        Kind::City => construct::<City>,
        Kind::Amenity => construct::<Amenity>,
        Kind::Place => construct::<Place>,
        Kind::Review => construct::<Review>,
    }
}

/// Apply `$body` to the record inside any variant.
macro_rules! with_record {
    ($entity:expr, $record:ident => $body:expr) => {
        match $entity {
            Entity::BaseModel($record) => $body,
            Entity::User($record) => $body,
            Entity::State($record) => $body,
            Entity::City($record) => $body,
            Entity::Amenity($record) => $body,
            Entity::Place($record) => $body,
            Entity::Review($record) => $body,
        }
    };
}

impl Entity {
    /// A fresh entity of `kind` with default fields.
    pub fn new(kind: Kind) -> Self {
        match kind {
            Kind::BaseModel => BaseModel::fresh().into(),
            Kind::User => User::fresh().into(),
            Kind::State => State::fresh().into(),
            Kind::City => City::fresh().into(),
            Kind::Amenity => Amenity::fresh().into(),
            Kind::Place => Place::fresh().into(),
            Kind::Review => Review::fresh().into(),
        }
    }

    /// Build an entity of `kind` from a plain mapping.
    ///
    /// See [`Model::from_fields`] for the field rules. Any `__class__` in
    /// `fields` is ignored; `kind` decides.
    pub fn from_fields(kind: Kind, fields: Fields) -> ModelResult<Self> {
        constructor(kind)(fields)
    }

    /// Build an entity from a kind name, rejecting names outside [`Kind`].
    pub fn from_named(kind: &str, fields: Fields) -> ModelResult<Self> {
        let kind = kind
            .parse::<Kind>()
            .map_err(|_| ModelError::UnknownKind(kind.to_string()))?;
        Self::from_fields(kind, fields)
    }

    /// Rebuild an entity from its mapping form, selecting the kind from the
    /// `__class__` discriminant.
    pub fn from_mapping(fields: Fields) -> ModelResult<Self> {
        let kind = match fields.get(CLASS_FIELD) {
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(ModelError::invalid(CLASS_FIELD, "expected a string")),
            None => return Err(ModelError::invalid(CLASS_FIELD, "missing discriminant")),
        };
        Self::from_named(&kind, fields)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::BaseModel(_) => Kind::BaseModel,
            Self::User(_) => Kind::User,
            Self::State(_) => Kind::State,
            Self::City(_) => Kind::City,
            Self::Amenity(_) => Kind::Amenity,
            Self::Place(_) => Kind::Place,
            Self::Review(_) => Kind::Review,
        }
    }

    pub fn base(&self) -> &BaseModel {
        with_record!(self, record => record.base())
    }

    pub fn base_mut(&mut self) -> &mut BaseModel {
        with_record!(self, record => record.base_mut())
    }

    pub fn id(&self) -> &EntityId {
        self.base().id()
    }

    /// The registry key `"<Kind>.<id>"`.
    pub fn key(&self) -> String {
        with_record!(self, record => record.key())
    }

    /// Advance `updated_at`; see [`BaseModel::touch`].
    pub fn touch(&mut self) -> ModelResult<()> {
        self.base_mut().touch()
    }

    /// See [`Model::validate`].
    pub fn validate(&self) -> ModelResult<()> {
        with_record!(self, record => record.validate())
    }

    /// The mapping form, including `__class__`.
    pub fn to_mapping(&self) -> ModelResult<Fields> {
        with_record!(self, record => record.to_mapping())
    }

    /// Assign one kind-specific field by name.
    ///
    /// Identity fields cannot be assigned; unknown names are rejected.
    pub fn set_field(&mut self, name: &str, value: Value) -> ModelResult<()> {
        if matches!(name, "id" | "created_at" | "updated_at" | CLASS_FIELD) {
            return Err(ModelError::invalid(name, "field is read-only"));
        }
        let known = with_record!(self, record => record.set_field(name, value))?;
        if known {
            Ok(())
        } else {
            Err(ModelError::invalid(
                name,
                format!("{} has no such field", self.kind()),
            ))
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_place(&self) -> Option<&Place> {
        match self {
            Self::Place(place) => Some(place),
            _ => None,
        }
    }
}

impl fmt::Display for Entity {
    /// `[<Kind>] (<id>) <attributes>`, attributes being the mapping form
    /// without the discriminant. Renders unvalidated records too.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes =
            with_record!(self, record => serde_json::to_value(record)).map_err(|_| fmt::Error)?;
        write!(f, "[{}] ({}) {}", self.kind(), self.id(), attributes)
    }
}

macro_rules! impl_from_record {
    ($($record:ident),*) => {
        $(
            impl From<$record> for Entity {
                fn from(record: $record) -> Self {
                    Self::$record(record)
                }
            }
        )*
    };
}

impl_from_record!(BaseModel, User, State, City, Amenity, Place, Review);
