use hbnb_types::Kind;
use serde::Serialize;
use serde_json::Value;

use crate::base::{BaseModel, Model};
use crate::error::{ModelError, ModelResult};
use crate::fields;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    #[serde(flatten)]
    base: BaseModel,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Model for User {
    const KIND: Kind = Kind::User;
    const FIELDS: &'static [&'static str] = &["email", "password", "first_name", "last_name"];

    fn with_base(base: BaseModel) -> Self {
        Self {
            base,
            email: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn set_field(&mut self, name: &str, value: Value) -> ModelResult<bool> {
        match name {
            "email" => self.email = fields::string(name, value)?,
            "password" => self.password = fields::string(name, value)?,
            "first_name" => self.first_name = fields::string(name, value)?,
            "last_name" => self.last_name = fields::string(name, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct State {
    #[serde(flatten)]
    base: BaseModel,
    pub name: String,
}

impl Model for State {
    const KIND: Kind = Kind::State;
    const FIELDS: &'static [&'static str] = &["name"];

    fn with_base(base: BaseModel) -> Self {
        Self {
            base,
            name: String::new(),
        }
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn set_field(&mut self, name: &str, value: Value) -> ModelResult<bool> {
        match name {
            "name" => self.name = fields::string(name, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// City
// ---------------------------------------------------------------------------

/// A city, linked to its state by `state_id`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct City {
    #[serde(flatten)]
    base: BaseModel,
    pub state_id: String,
    pub name: String,
}

impl Model for City {
    const KIND: Kind = Kind::City;
    const FIELDS: &'static [&'static str] = &["state_id", "name"];

    fn with_base(base: BaseModel) -> Self {
        Self {
            base,
            state_id: String::new(),
            name: String::new(),
        }
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn set_field(&mut self, name: &str, value: Value) -> ModelResult<bool> {
        match name {
            "state_id" => self.state_id = fields::string(name, value)?,
            "name" => self.name = fields::string(name, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Amenity
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Amenity {
    #[serde(flatten)]
    base: BaseModel,
    pub name: String,
}

impl Model for Amenity {
    const KIND: Kind = Kind::Amenity;
    const FIELDS: &'static [&'static str] = &["name"];

    fn with_base(base: BaseModel) -> Self {
        Self {
            base,
            name: String::new(),
        }
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn set_field(&mut self, name: &str, value: Value) -> ModelResult<bool> {
        match name {
            "name" => self.name = fields::string(name, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Place
// ---------------------------------------------------------------------------

/// A rentable place.
///
/// Counts are non-negative integers; coordinates are plain floats with no
/// range check.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Place {
    #[serde(flatten)]
    base: BaseModel,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_rooms: u32,
    pub number_bathrooms: u32,
    pub max_guest: u32,
    pub price_by_night: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub amenity_ids: Vec<String>,
}

impl Model for Place {
    const KIND: Kind = Kind::Place;
    const FIELDS: &'static [&'static str] = &[
        "city_id",
        "user_id",
        "name",
        "description",
        "number_rooms",
        "number_bathrooms",
        "max_guest",
        "price_by_night",
        "latitude",
        "longitude",
        "amenity_ids",
    ];

    fn with_base(base: BaseModel) -> Self {
        Self {
            base,
            city_id: String::new(),
            user_id: String::new(),
            name: String::new(),
            description: String::new(),
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: 0.0,
            longitude: 0.0,
            amenity_ids: Vec::new(),
        }
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn set_field(&mut self, name: &str, value: Value) -> ModelResult<bool> {
        match name {
            "city_id" => self.city_id = fields::string(name, value)?,
            "user_id" => self.user_id = fields::string(name, value)?,
            "name" => self.name = fields::string(name, value)?,
            "description" => self.description = fields::string(name, value)?,
            "number_rooms" => self.number_rooms = fields::count(name, value)?,
            "number_bathrooms" => self.number_bathrooms = fields::count(name, value)?,
            "max_guest" => self.max_guest = fields::count(name, value)?,
            "price_by_night" => self.price_by_night = fields::count(name, value)?,
            "latitude" => self.latitude = fields::float(name, value)?,
            "longitude" => self.longitude = fields::float(name, value)?,
            "amenity_ids" => self.amenity_ids = fields::string_list(name, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// JSON has no NaN or infinity, so coordinates must be finite.
    fn validate(&self) -> ModelResult<()> {
        for (name, value) in [("latitude", self.latitude), ("longitude", self.longitude)] {
            if !value.is_finite() {
                return Err(ModelError::invalid(name, format!("{value} is not a finite number")));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// A user's review of a place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Review {
    #[serde(flatten)]
    base: BaseModel,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

impl Model for Review {
    const KIND: Kind = Kind::Review;
    const FIELDS: &'static [&'static str] = &["place_id", "user_id", "text"];

    fn with_base(base: BaseModel) -> Self {
        Self {
            base,
            place_id: String::new(),
            user_id: String::new(),
            text: String::new(),
        }
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn set_field(&mut self, name: &str, value: Value) -> ModelResult<bool> {
        match name {
            "place_id" => self.place_id = fields::string(name, value)?,
            "user_id" => self.user_id = fields::string(name, value)?,
            "text" => self.text = fields::string(name, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use hbnb_types::{Fields, CLASS_FIELD};
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn user_defaults_are_empty() {
        let user = User::fresh();
        assert_eq!(user.email, "");
        assert_eq!(user.password, "");
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "");
    }

    #[test]
    fn place_defaults() {
        let place = Place::fresh();
        assert_eq!(place.city_id, "");
        assert_eq!(place.user_id, "");
        assert_eq!(place.name, "");
        assert_eq!(place.description, "");
        assert_eq!(place.number_rooms, 0);
        assert_eq!(place.number_bathrooms, 0);
        assert_eq!(place.max_guest, 0);
        assert_eq!(place.price_by_night, 0);
        assert_eq!(place.latitude, 0.0);
        assert_eq!(place.longitude, 0.0);
        assert!(place.amenity_ids.is_empty());
    }

    #[test]
    fn place_rejects_non_finite_coordinates() {
        let mut place = Place::fresh();
        assert!(place.validate().is_ok());

        place.longitude = f64::INFINITY;
        let err = place.to_mapping().unwrap_err();
        assert!(matches!(err, ModelError::InvalidArgument { ref field, .. } if field == "longitude"));

        place.longitude = 2.35;
        place.latitude = f64::NAN;
        let err = place.validate().unwrap_err();
        assert!(matches!(err, ModelError::InvalidArgument { ref field, .. } if field == "latitude"));
    }

    #[test]
    fn place_from_fields_assigns_known_fields() {
        let place = Place::from_fields(fields(json!({
            "id": "123",
            "created_at": "2023-01-01T00:00:00",
            "updated_at": "2023-01-01T00:00:00",
            "name": "Test",
            "number_rooms": 3,
            "latitude": 48.85,
            "amenity_ids": ["wifi", "pool"],
            "__class__": "Place",
        })))
        .unwrap();
        assert_eq!(place.base().id().as_str(), "123");
        assert_eq!(place.name, "Test");
        assert_eq!(place.number_rooms, 3);
        assert_eq!(place.latitude, 48.85);
        assert_eq!(place.amenity_ids, vec!["wifi", "pool"]);
        assert_eq!(place.description, "");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let city = City::from_fields(fields(json!({ "name": "Lyon", "mayor": "nobody" }))).unwrap();
        assert_eq!(city.name, "Lyon");
        assert!(!city.to_mapping().unwrap().contains_key("mayor"));
    }

    #[test]
    fn null_kind_field_is_invalid_argument() {
        let err = Review::from_fields(fields(json!({ "text": null }))).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn wrongly_typed_field_is_invalid_argument() {
        let err = Place::from_fields(fields(json!({ "max_guest": "four" }))).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("max_guest"));
    }

    #[test]
    fn mapping_lists_every_field_once() {
        let mapping = Place::fresh().to_mapping().unwrap();
        for name in Place::FIELDS {
            assert!(mapping.contains_key(*name), "missing {name}");
        }
        for name in ["id", "created_at", "updated_at", CLASS_FIELD] {
            assert!(mapping.contains_key(name));
        }
        assert_eq!(mapping.len(), Place::FIELDS.len() + 4);
        assert_eq!(mapping[CLASS_FIELD], json!("Place"));
    }

    #[test]
    fn mapping_does_not_mutate() {
        let state = State::fresh();
        let before = state.clone();
        let _ = state.to_mapping().unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn keys_use_kind_prefix() {
        let amenity = Amenity::fresh();
        assert_eq!(amenity.key(), format!("Amenity.{}", amenity.base().id()));
    }
}
