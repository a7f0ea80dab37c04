//! Lock-guarded in-memory entity registry.

use std::collections::BTreeMap;
use std::sync::RwLock;

use hbnb_models::Entity;

use crate::error::{StorageError, StoreResult};

/// In-memory map from composite key to entity.
///
/// All access goes through an `RwLock`, so a registry can be shared between
/// threads. Entities are cloned on the way in and out; callers never hold a
/// reference into the map. Iteration is in key order.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<BTreeMap<String, Entity>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `entity` under its own key. Returns the key.
    pub fn insert(&self, entity: Entity) -> StoreResult<String> {
        let key = entity.key();
        self.write("registry.insert")?.insert(key.clone(), entity);
        Ok(key)
    }

    /// Insert every `(key, entity)` pair under one write lock.
    ///
    /// Keys are used as given; they come from a persisted document and are
    /// kept even when they differ from the entity's own key.
    pub fn extend(&self, entries: Vec<(String, Entity)>) -> StoreResult<()> {
        self.write("registry.extend")?.extend(entries);
        Ok(())
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<Entity>> {
        Ok(self.read("registry.get")?.get(key).cloned())
    }

    /// A consistent copy of every entry.
    pub fn snapshot(&self) -> StoreResult<BTreeMap<String, Entity>> {
        Ok(self.read("registry.snapshot")?.clone())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read("registry.len")?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read("registry.is_empty")?.is_empty())
    }

    /// Drop every entry.
    pub fn clear(&self) -> StoreResult<()> {
        self.write("registry.clear")?.clear();
        Ok(())
    }

    fn read(
        &self,
        context: &'static str,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, BTreeMap<String, Entity>>> {
        self.entries
            .read()
            .map_err(|_| StorageError::LockPoisoned(context))
    }

    fn write(
        &self,
        context: &'static str,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Entity>>> {
        self.entries
            .write()
            .map_err(|_| StorageError::LockPoisoned(context))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use hbnb_types::Kind;

    use super::*;

    #[test]
    fn starts_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty().unwrap());
        assert!(registry.snapshot().unwrap().is_empty());
    }

    #[test]
    fn insert_uses_entity_key() {
        let registry = Registry::new();
        let user = Entity::new(Kind::User);
        let key = registry.insert(user.clone()).unwrap();
        assert_eq!(key, format!("User.{}", user.id()));
        assert_eq!(registry.get(&key).unwrap(), Some(user));
    }

    #[test]
    fn insert_overwrites_same_key() {
        let registry = Registry::new();
        let mut city = Entity::new(Kind::City);
        registry.insert(city.clone()).unwrap();
        city.set_field("name", "Paris".into()).unwrap();
        let key = registry.insert(city.clone()).unwrap();

        assert_eq!(registry.len().unwrap(), 1);
        assert_eq!(registry.get(&key).unwrap(), Some(city));
    }

    #[test]
    fn extend_keeps_given_keys() {
        let registry = Registry::new();
        let state = Entity::new(Kind::State);
        registry
            .extend(vec![("State.legacy".to_string(), state.clone())])
            .unwrap();
        assert_eq!(registry.get("State.legacy").unwrap(), Some(state));
    }

    #[test]
    fn snapshot_is_detached() {
        let registry = Registry::new();
        registry.insert(Entity::new(Kind::Amenity)).unwrap();
        let snapshot = registry.snapshot().unwrap();
        registry.clear().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn concurrent_inserts_are_not_lost() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..50 {
                        registry.insert(Entity::new(Kind::Review)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len().unwrap(), 400);
    }
}
