use std::fmt;

use hbnb_types::{composite_key, EntityId, Fields, Kind, Timestamp, CLASS_FIELD};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ModelError, ModelResult};

/// Identity and audit fields shared by every entity.
///
/// The id never changes after construction. `created_at <= updated_at`
/// holds for every value of this type; [`BaseModel::touch`] is the only way
/// to move `updated_at`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BaseModel {
    id: EntityId,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl BaseModel {
    /// Fresh identity, `created_at == updated_at == now`.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: EntityId::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Advance `updated_at` to now, strictly past its previous value.
    ///
    /// Fails, leaving the record unchanged, when `updated_at` is already the
    /// latest representable timestamp.
    pub fn touch(&mut self) -> ModelResult<()> {
        self.updated_at = Timestamp::now_after(self.updated_at)
            .map_err(|e| ModelError::invalid("updated_at", e.to_string()))?;
        Ok(())
    }

    /// Remove and validate the identity fields from `fields`.
    ///
    /// Absent fields take defaults: a generated id, `created_at = now`,
    /// `updated_at = created_at`. Explicit nulls are rejected. The
    /// discriminant field is dropped without being checked.
    pub(crate) fn take_from(fields: &mut Fields) -> ModelResult<Self> {
        fields.remove(CLASS_FIELD);

        let id = match fields.remove("id") {
            None => EntityId::generate(),
            Some(Value::String(s)) => {
                EntityId::parse(s).map_err(|e| ModelError::invalid("id", e.to_string()))?
            }
            Some(Value::Null) => return Err(ModelError::invalid("id", "must not be null")),
            Some(_) => return Err(ModelError::invalid("id", "expected a string")),
        };

        let created_at = take_timestamp(fields, "created_at")?.unwrap_or_else(Timestamp::now);
        let updated_at = take_timestamp(fields, "updated_at")?.unwrap_or(created_at);
        if updated_at < created_at {
            return Err(ModelError::invalid(
                "updated_at",
                format!("{updated_at} precedes created_at {created_at}"),
            ));
        }

        Ok(Self {
            id,
            created_at,
            updated_at,
        })
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

fn take_timestamp(fields: &mut Fields, name: &str) -> ModelResult<Option<Timestamp>> {
    match fields.remove(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(Timestamp::parse(&s)?)),
        Some(Value::Null) => Err(ModelError::invalid(name, "must not be null")),
        Some(_) => Err(ModelError::invalid(name, "expected an ISO-8601 string")),
    }
}

/// Behaviour shared by every concrete entity kind.
///
/// Implementors are fixed records: [`Model::FIELDS`] lists the kind-specific
/// field names and [`Model::set_field`] assigns one of them from a JSON value.
pub trait Model: Clone + fmt::Debug + PartialEq + Serialize {
    /// The kind this record represents.
    const KIND: Kind;

    /// Names of the kind-specific fields, in declaration order.
    const FIELDS: &'static [&'static str];

    /// A record with the given identity and every kind field at its default.
    fn with_base(base: BaseModel) -> Self;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    /// Assign a kind-specific field. Returns `Ok(false)` when `name` is not
    /// one of [`Model::FIELDS`].
    fn set_field(&mut self, name: &str, value: Value) -> ModelResult<bool>;

    /// Check that every field can be written to the mapping form and read
    /// back unchanged.
    fn validate(&self) -> ModelResult<()> {
        Ok(())
    }

    /// A record with fresh identity and default fields.
    fn fresh() -> Self {
        Self::with_base(BaseModel::new())
    }

    /// Build a record from a plain mapping.
    ///
    /// Identity fields follow [`BaseModel`] rules; every known kind field
    /// present is assigned; unknown keys are ignored.
    fn from_fields(mut fields: Fields) -> ModelResult<Self> {
        let base = BaseModel::take_from(&mut fields)?;
        let mut record = Self::with_base(base);
        for (name, value) in fields {
            if !record.set_field(&name, value)? {
                debug!(kind = %Self::KIND, field = %name, "ignoring unknown field");
            }
        }
        Ok(record)
    }

    /// The mapping form: every field, ISO-8601 timestamps, and `__class__`.
    ///
    /// Fails when [`Model::validate`] does.
    fn to_mapping(&self) -> ModelResult<Fields> {
        self.validate()?;
        let value =
            serde_json::to_value(self).map_err(|e| ModelError::Serialization(e.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Err(ModelError::Serialization(format!(
                "{} did not serialize to a mapping",
                Self::KIND
            )));
        };
        fields.insert(
            CLASS_FIELD.to_string(),
            Value::String(Self::KIND.as_str().to_string()),
        );
        Ok(fields)
    }

    /// The registry key `"<Kind>.<id>"`.
    fn key(&self) -> String {
        composite_key(Self::KIND, self.base().id())
    }
}

impl Model for BaseModel {
    const KIND: Kind = Kind::BaseModel;
    const FIELDS: &'static [&'static str] = &[];

    fn with_base(base: BaseModel) -> Self {
        base
    }

    fn base(&self) -> &BaseModel {
        self
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        self
    }

    fn set_field(&mut self, _name: &str, _value: Value) -> ModelResult<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn new_has_equal_timestamps() {
        let base = BaseModel::new();
        assert!(!base.id().as_str().is_empty());
        assert_eq!(base.created_at(), base.updated_at());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(BaseModel::new().id(), BaseModel::new().id());
    }

    #[test]
    fn touch_strictly_increases() {
        let mut base = BaseModel::new();
        let before = base.updated_at();
        base.touch().unwrap();
        let first = base.updated_at();
        base.touch().unwrap();
        assert!(before < first);
        assert!(first < base.updated_at());
        assert!(base.created_at() <= base.updated_at());
    }

    #[test]
    fn touch_at_latest_timestamp_fails_unchanged() {
        let latest = "+262142-12-31T23:59:59.999999";
        let mut base = BaseModel::from_fields(fields(json!({ "created_at": latest }))).unwrap();
        let before = base.clone();

        let err = base.touch().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(base, before);
    }

    #[test]
    fn empty_fields_generate_identity() {
        let base = BaseModel::from_fields(Fields::new()).unwrap();
        assert!(!base.id().as_str().is_empty());
        assert_eq!(base.created_at(), base.updated_at());
    }

    #[test]
    fn supplied_identity_is_kept() {
        let base = BaseModel::from_fields(fields(json!({
            "id": "123",
            "created_at": "2023-01-01T00:00:00",
            "updated_at": "2023-01-02T00:00:00.5",
        })))
        .unwrap();
        assert_eq!(base.id().as_str(), "123");
        assert_eq!(base.created_at().to_iso(), "2023-01-01T00:00:00.000000");
        assert_eq!(base.updated_at().to_iso(), "2023-01-02T00:00:00.500000");
    }

    #[test]
    fn missing_updated_at_copies_created_at() {
        let base = BaseModel::from_fields(fields(json!({
            "created_at": "2023-01-01T00:00:00",
        })))
        .unwrap();
        assert_eq!(base.created_at(), base.updated_at());
    }

    #[test]
    fn explicit_nulls_are_invalid_arguments() {
        for name in ["id", "created_at", "updated_at"] {
            let mut map = Fields::new();
            map.insert(name.to_string(), Value::Null);
            let err = BaseModel::from_fields(map).unwrap_err();
            assert!(err.is_invalid_argument(), "{name}: {err}");
            assert!(err.to_string().contains(name));
        }
    }

    #[test]
    fn empty_id_is_invalid_argument() {
        let err = BaseModel::from_fields(fields(json!({ "id": "" }))).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn malformed_timestamp_is_parse_error() {
        let err = BaseModel::from_fields(fields(json!({ "created_at": "not a date" }))).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn updated_before_created_is_rejected() {
        let err = BaseModel::from_fields(fields(json!({
            "created_at": "2023-01-02T00:00:00",
            "updated_at": "2023-01-01T00:00:00",
        })))
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn mapping_has_iso_timestamps_and_class() {
        let base = BaseModel::new();
        let map = base.to_mapping().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map["id"], json!(base.id().as_str()));
        assert_eq!(map["created_at"], json!(base.created_at().to_iso()));
        assert_eq!(map["updated_at"], json!(base.updated_at().to_iso()));
        assert_eq!(map[CLASS_FIELD], json!("BaseModel"));
    }

    #[test]
    fn class_field_is_ignored_on_construction() {
        let base = BaseModel::from_fields(fields(json!({ "__class__": "User", "id": "x" }))).unwrap();
        assert_eq!(base.key(), "BaseModel.x");
    }
}
