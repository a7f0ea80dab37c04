use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use hbnb_models::{Entity, ModelError};
use hbnb_types::{split_key, Fields, Kind, CLASS_FIELD};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{ReloadPolicy, StorageConfig};
use crate::error::{StorageError, StoreResult};
use crate::registry::Registry;
use crate::traits::{ObjectStore, ReloadReport};

/// Registry persisted as one JSON document.
///
/// On-disk format:
/// ```text
/// {
///   "<Kind>.<id>": { "id": ..., "created_at": ..., "updated_at": ...,
///                    <kind fields>..., "__class__": "<Kind>" },
///   ...
/// }
/// ```
///
/// Every persist rewrites the whole file in place. Concurrent processes
/// writing the same path race and the last persist wins.
pub struct FileStorage {
    config: StorageConfig,
    registry: Registry,
    /// Held across snapshot and write so persists land in snapshot order.
    persist_lock: Mutex<()>,
}

impl FileStorage {
    /// Create an empty store backed by the configured path. Nothing is read
    /// until [`ObjectStore::reload`] is called.
    pub fn new(config: StorageConfig) -> Self {
        info!(path = %config.path.display(), policy = ?config.reload_policy, "file storage opened");
        Self {
            config,
            registry: Registry::new(),
            persist_lock: Mutex::new(()),
        }
    }

    /// Create an empty store at `path` with default settings.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn len(&self) -> StoreResult<usize> {
        self.registry.len()
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        self.registry.is_empty()
    }

    /// Drop every registered entity without touching the file.
    pub fn clear(&self) -> StoreResult<()> {
        self.registry.clear()
    }

    fn encode(snapshot: &BTreeMap<String, Entity>) -> StoreResult<Vec<u8>> {
        let mut document = Fields::new();
        for (key, entity) in snapshot {
            document.insert(key.clone(), Value::Object(entity.to_mapping()?));
        }
        serde_json::to_vec(&Value::Object(document))
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Decode a whole document. Any bad entry fails the whole decode.
    fn decode(&self, bytes: &[u8]) -> StoreResult<Vec<(String, Entity)>> {
        let corrupt = |reason: String| StorageError::Corrupt {
            path: self.config.path.clone(),
            reason,
        };

        let document: Value = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
        let Value::Object(document) = document else {
            return Err(corrupt("top level is not a mapping".into()));
        };

        let mut entries = Vec::with_capacity(document.len());
        for (key, value) in document {
            let Value::Object(fields) = value else {
                return Err(corrupt(format!("entry {key} is not a mapping")));
            };
            let entity = match entry_kind(&key, &fields) {
                Ok(kind) => Entity::from_fields(kind, fields),
                Err(e) => Err(e),
            }
            .map_err(|source| StorageError::Entry {
                key: key.clone(),
                source,
            })?;
            if key != entity.key() {
                warn!(
                    key = %key,
                    entity_key = %entity.key(),
                    "entry key does not match its kind and id; keeping the stored key"
                );
            }
            entries.push((key, entity));
        }
        Ok(entries)
    }

    /// `Ok(None)` when the file does not exist.
    fn load(&self) -> StoreResult<Option<Vec<(String, Entity)>>> {
        match fs::read(&self.config.path) {
            Ok(bytes) => self.decode(&bytes).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Kind of a persisted entry: the `__class__` discriminant, or the key
/// prefix when the discriminant is absent.
fn entry_kind(key: &str, fields: &Fields) -> Result<Kind, ModelError> {
    match fields.get(CLASS_FIELD) {
        Some(Value::String(name)) => name
            .parse()
            .map_err(|_| ModelError::UnknownKind(name.clone())),
        Some(_) => Err(ModelError::InvalidArgument {
            field: CLASS_FIELD.to_string(),
            reason: "expected a string".into(),
        }),
        None => split_key(key).map(|(kind, _)| kind).map_err(ModelError::from),
    }
}

impl ObjectStore for FileStorage {
    fn all(&self) -> StoreResult<BTreeMap<String, Entity>> {
        self.registry.snapshot()
    }

    fn get(&self, key: &str) -> StoreResult<Option<Entity>> {
        self.registry.get(key)
    }

    fn register(&self, entity: Entity) -> StoreResult<String> {
        entity.validate()?;
        let key = self.registry.insert(entity)?;
        debug!(key = %key, "entity registered");
        Ok(key)
    }

    fn persist(&self) -> StoreResult<()> {
        let _guard = self
            .persist_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file.persist"))?;

        let snapshot = self.registry.snapshot()?;
        let bytes = Self::encode(&snapshot)?;

        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.config.path, &bytes)?;

        debug!(
            count = snapshot.len(),
            bytes = bytes.len(),
            path = %self.config.path.display(),
            "registry persisted"
        );
        Ok(())
    }

    fn reload(&self) -> StoreResult<ReloadReport> {
        match self.load() {
            Ok(None) => {
                debug!(path = %self.config.path.display(), "no storage file; nothing to reload");
                Ok(ReloadReport::NotFound)
            }
            Ok(Some(entries)) => {
                let count = entries.len();
                self.registry.extend(entries)?;
                info!(count, path = %self.config.path.display(), "registry reloaded");
                Ok(ReloadReport::Loaded { count })
            }
            Err(err) => match self.config.reload_policy {
                ReloadPolicy::Strict => Err(err),
                ReloadPolicy::Lenient => {
                    warn!(
                        path = %self.config.path.display(),
                        error = %err,
                        "storage file unusable; registry left unchanged"
                    );
                    Ok(ReloadReport::Skipped {
                        reason: err.to_string(),
                    })
                }
            },
        }
    }
}

impl std::fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.config.path)
            .field("reload_policy", &self.config.reload_policy)
            .field("entry_count", &self.registry.len().unwrap_or(0))
            .finish()
    }
}
