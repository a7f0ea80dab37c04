use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StoreResult};

/// What reload does when the storage file exists but cannot be used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Log a warning, report the skip, and keep the registry as it was.
    #[default]
    Lenient,
    /// Return the error to the caller.
    Strict,
}

/// Configuration for a [`FileStorage`](crate::FileStorage).
///
/// Loadable from TOML; every key is optional:
///
/// ```toml
/// path = "data/file.json"
/// reload_policy = "strict"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Location of the JSON document holding the registry.
    pub path: PathBuf,
    pub reload_policy: ReloadPolicy,
}

impl StorageConfig {
    /// Default configuration pointing at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_reload_policy(mut self, policy: ReloadPolicy) -> Self {
        self.reload_policy = policy;
        self
    }

    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        toml::from_str(s).map_err(|e| StorageError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("file.json"),
            reload_policy: ReloadPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StorageConfig::default();
        assert_eq!(c.path, PathBuf::from("file.json"));
        assert_eq!(c.reload_policy, ReloadPolicy::Lenient);
    }

    #[test]
    fn parse_full_toml() {
        let c = StorageConfig::from_toml_str(
            r#"
            path = "/var/lib/hbnb/objects.json"
            reload_policy = "strict"
            "#,
        )
        .unwrap();
        assert_eq!(c.path, PathBuf::from("/var/lib/hbnb/objects.json"));
        assert_eq!(c.reload_policy, ReloadPolicy::Strict);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let c = StorageConfig::from_toml_str("").unwrap();
        assert_eq!(c, StorageConfig::default());
        let c = StorageConfig::from_toml_str("path = \"x.json\"").unwrap();
        assert_eq!(c, StorageConfig::new("x.json"));
    }

    #[test]
    fn bad_policy_is_config_error() {
        let err = StorageConfig::from_toml_str("reload_policy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hbnb.toml");
        fs::write(&path, "reload_policy = \"strict\"\n").unwrap();
        let c = StorageConfig::from_file(&path).unwrap();
        assert_eq!(c.reload_policy, ReloadPolicy::Strict);
        assert_eq!(c.path, PathBuf::from("file.json"));

        let missing = StorageConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, StorageError::Io(_)));
    }

    #[test]
    fn builder_sets_policy() {
        let c = StorageConfig::new("a.json").with_reload_policy(ReloadPolicy::Strict);
        assert_eq!(c.reload_policy, ReloadPolicy::Strict);
    }
}
