//! Secret stores
//!
//! `Secret <name>` references are resolved through a [`SecretStore`]. A store
//! either supplies the value or fails the run; there is no fallback to the
//! literal.
//!
//! Resolved values are never logged.

use crate::error::{CloudError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Default environment variable prefix for [`EnvSecretStore`]
pub const DEFAULT_SECRET_PREFIX: &str = "STRATUM_SECRET_";

/// Source of secret values
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Return the named secret, or [`CloudError::SecretNotConfigured`]
    async fn require_secret(&self, name: &str) -> Result<String>;
}

/// Reads secrets from environment variables
///
/// `dbPassword` with the default prefix is read from `STRATUM_SECRET_DBPASSWORD`,
/// `app:db-password` from `STRATUM_SECRET_APP_DB_PASSWORD`.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
    prefix: String,
}

impl EnvSecretStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Environment variable consulted for `name`
    pub fn variable_name(&self, name: &str) -> String {
        let normalized: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", self.prefix, normalized)
    }
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET_PREFIX)
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn require_secret(&self, name: &str) -> Result<String> {
        let variable = self.variable_name(name);
        match std::env::var(&variable) {
            Ok(value) => {
                debug!(secret = %name, variable = %variable, "Resolved secret from environment");
                Ok(value)
            }
            Err(_) => Err(CloudError::SecretNotConfigured(format!(
                "{} (set {})",
                name, variable
            ))),
        }
    }
}

/// In-memory secrets, optionally loaded from a YAML file of `name: value` pairs
#[derive(Debug, Clone, Default)]
pub struct MapSecretStore {
    secrets: HashMap<String, String>,
}

impl MapSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.secrets.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Load a flat YAML mapping of secret names to values
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let secrets: HashMap<String, String> = serde_yaml::from_str(&content)?;
        debug!(
            path = %path.as_ref().display(),
            count = secrets.len(),
            "Loaded secrets file"
        );
        Ok(Self { secrets })
    }
}

#[async_trait]
impl SecretStore for MapSecretStore {
    async fn require_secret(&self, name: &str) -> Result<String> {
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| CloudError::SecretNotConfigured(name.to_string()))
    }
}

/// Tries each store in order; the first one that has the secret wins
#[derive(Default)]
pub struct ChainSecretStore {
    stores: Vec<Box<dyn SecretStore>>,
}

impl ChainSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: impl SecretStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }
}

#[async_trait]
impl SecretStore for ChainSecretStore {
    async fn require_secret(&self, name: &str) -> Result<String> {
        for store in &self.stores {
            match store.require_secret(name).await {
                Ok(value) => return Ok(value),
                Err(CloudError::SecretNotConfigured(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(CloudError::SecretNotConfigured(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_variable_name() {
        let store = EnvSecretStore::default();
        assert_eq!(
            store.variable_name("dbPassword"),
            "STRATUM_SECRET_DBPASSWORD"
        );
        assert_eq!(
            store.variable_name("app:db-password"),
            "STRATUM_SECRET_APP_DB_PASSWORD"
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_env_store_present() {
        let store = EnvSecretStore::new("TEST_STRATUM_");
        let value = temp_env::async_with_vars(
            [("TEST_STRATUM_API_KEY", Some("s3cr3t"))],
            store.require_secret("api-key"),
        )
        .await
        .unwrap();
        assert_eq!(value, "s3cr3t");
    }

    #[tokio::test]
    #[serial]
    async fn test_env_store_missing() {
        let store = EnvSecretStore::new("TEST_STRATUM_");
        let result = temp_env::async_with_vars(
            [("TEST_STRATUM_MISSING", None::<&str>)],
            store.require_secret("missing"),
        )
        .await;

        match result {
            Err(CloudError::SecretNotConfigured(msg)) => {
                assert!(msg.contains("TEST_STRATUM_MISSING"));
            }
            other => panic!("Expected SecretNotConfigured, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_map_store() {
        let store = MapSecretStore::new().with_secret("db", "pw");
        assert_eq!(store.require_secret("db").await.unwrap(), "pw");
        assert!(matches!(
            store.require_secret("other").await,
            Err(CloudError::SecretNotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_map_store_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("secrets.yaml");
        std::fs::write(&path, "dbPassword: hunter2\napiKey: abc\n").unwrap();

        let store = MapSecretStore::from_yaml_file(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.require_secret("dbPassword").await.unwrap(), "hunter2");
    }

    #[test]
    fn test_map_store_from_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("secrets.yaml");
        std::fs::write(&path, "- not\n- a map\n").unwrap();

        assert!(matches!(
            MapSecretStore::from_yaml_file(&path),
            Err(CloudError::Yaml(_))
        ));
    }

    #[tokio::test]
    async fn test_chain_store_first_hit_wins() {
        let store = ChainSecretStore::new()
            .with_store(MapSecretStore::new().with_secret("a", "from-first"))
            .with_store(
                MapSecretStore::new()
                    .with_secret("a", "from-second")
                    .with_secret("b", "only-second"),
            );

        assert_eq!(store.require_secret("a").await.unwrap(), "from-first");
        assert_eq!(store.require_secret("b").await.unwrap(), "only-second");
        assert!(store.require_secret("c").await.is_err());
    }
}
