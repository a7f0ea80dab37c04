use std::collections::BTreeMap;

use hbnb_models::Entity;
use hbnb_types::{composite_key, EntityId, Fields, Kind};

use crate::error::StoreResult;

/// Outcome of a successful [`ObjectStore::reload`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReloadReport {
    /// No storage file exists yet; the registry is unchanged.
    NotFound,
    /// `count` entries were read and inserted into the registry.
    Loaded { count: usize },
    /// The file exists but could not be used; the registry is unchanged.
    Skipped { reason: String },
}

/// Registry of live entities with whole-registry persistence.
///
/// Implementations must be thread-safe: `register` and the snapshot taken by
/// `persist` are serialized against each other, so no registration is lost
/// and no persist sees a half-updated registry.
pub trait ObjectStore: Send + Sync {
    /// A snapshot of every registered entity, keyed by `"<Kind>.<id>"`.
    fn all(&self) -> StoreResult<BTreeMap<String, Entity>>;

    /// Look up one entity by composite key.
    fn get(&self, key: &str) -> StoreResult<Option<Entity>>;

    /// Insert or overwrite `entity` under its composite key. Returns the key.
    /// Entities that fail [`Entity::validate`] are rejected.
    fn register(&self, entity: Entity) -> StoreResult<String>;

    /// Write the mapping form of every registered entity to storage,
    /// replacing whatever was there.
    fn persist(&self) -> StoreResult<()>;

    /// Read previously persisted entities into the registry.
    fn reload(&self) -> StoreResult<ReloadReport>;

    /// Build an entity of `kind` from `fields` and register it.
    fn create(&self, kind: Kind, fields: Fields) -> StoreResult<Entity> {
        let entity = Entity::from_fields(kind, fields)?;
        self.register(entity.clone())?;
        Ok(entity)
    }

    /// Advance `updated_at`, register the entity's current state, and
    /// persist the whole registry.
    ///
    /// An entity that fails validation is rejected before it is touched or
    /// registered.
    fn save(&self, entity: &mut Entity) -> StoreResult<()> {
        entity.validate()?;
        entity.touch()?;
        self.register(entity.clone())?;
        self.persist()
    }

    /// Look up an entity by kind and id.
    fn find(&self, kind: Kind, id: &EntityId) -> StoreResult<Option<Entity>> {
        self.get(&composite_key(kind, id))
    }

    /// Every registered entity of one kind, in key order.
    fn all_of_kind(&self, kind: Kind) -> StoreResult<Vec<Entity>> {
        Ok(self
            .all()?
            .into_values()
            .filter(|entity| entity.kind() == kind)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test: ensure the trait is object-safe
    fn _assert_object_store_object_safe(_: &dyn ObjectStore) {}

    #[test]
    fn reload_report_equality() {
        assert_eq!(ReloadReport::Loaded { count: 2 }, ReloadReport::Loaded { count: 2 });
        assert_ne!(ReloadReport::NotFound, ReloadReport::Loaded { count: 0 });
    }
}
