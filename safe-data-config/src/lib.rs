//! Configuration loading for safe-data
//!
//! Collects settings from environment variables, `.env` files and JSON/TOML
//! files into one record of untrusted [`Value`]s, then hands them to schemas.
//! Nothing is trusted until it has been parsed:
//!
//! ```
//! use safe_data_config::{ConfigManager, FileFormat};
//! use safe_data_schema::{NumberSchema, SchemaOptions, StringSchema};
//!
//! let config = ConfigManager::new();
//! config.load_str("PORT=8080\nHOST=0.0.0.0", FileFormat::Env).unwrap();
//!
//! let port = NumberSchema::create_with(SchemaOptions::new().with_cast(true)).int();
//! assert_eq!(config.parse_key("PORT", &port).unwrap(), 8080.0);
//!
//! let user = StringSchema::create().optional();
//! assert_eq!(config.parse_key("USER", &user).unwrap(), None);
//! ```

pub mod env;
pub mod error;
pub mod loader;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use safe_data_schema::{Record, Schema, Value};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared, thread-safe configuration record.
///
/// Later loads overwrite earlier keys. Clones share the same record.
#[derive(Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<Record<Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Record<Value>> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Record<Value>> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn extend(&self, entries: Record<Value>) {
        let mut config = self.write();
        for (key, value) in entries {
            config.insert(key, value);
        }
    }

    /// Load variables from the process environment.
    pub fn load_env(&self) -> Result<()> {
        self.load_env_from(&EnvLoader::new(self.env_prefix.clone()))
    }

    /// Load variables through a given loader, e.g. one built with
    /// [`EnvLoader::from_pairs`].
    pub fn load_env_from(&self, loader: &EnvLoader) -> Result<()> {
        let vars = loader.load()?;
        safe_data_log::debug!(target: "safe_data::config", "Loaded {} environment variables", vars.len());

        self.extend(vars.into_iter().map(|(key, value)| (key, Value::String(value))).collect());
        Ok(())
    }

    /// Load a `.env` file without touching the process environment.
    ///
    /// With no path, `.env` is searched for from the current directory
    /// upwards and a missing file is not an error. Variables go through the
    /// same prefix filter as [`load_env`](Self::load_env).
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        let iter = match path {
            Some(path) => dotenvy::from_path_iter(path).map_err(|e| ConfigError::Load(e.to_string()))?,
            None => match dotenvy::dotenv_iter() {
                Ok(iter) => iter,
                Err(error) if error.not_found() => {
                    safe_data_log::debug!(target: "safe_data::config", "No .env file found");
                    return Ok(());
                }
                Err(error) => return Err(ConfigError::Load(error.to_string())),
            },
        };

        let pairs = iter
            .collect::<std::result::Result<Vec<(String, String)>, _>>()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        self.load_env_from(&EnvLoader::from_pairs(self.env_prefix.clone(), pairs))
    }

    /// Load a configuration file, its format picked from the extension.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        safe_data_log::debug!(target: "safe_data::config", "Loaded configuration file {}", path.display());
        self.load_value(value)
    }

    /// Load configuration from a string in the given format.
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<()> {
        self.load_value(ConfigLoader::new(format).parse(content)?)
    }

    fn load_value(&self, value: Value) -> Result<()> {
        match value {
            Value::Object(entries) => {
                self.extend(entries);
                Ok(())
            }
            other => Err(ConfigError::Parse(format!(
                "Expected a table of settings, found {}",
                other.type_name()
            ))),
        }
    }

    /// Set a configuration value
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.write().insert(key.into(), value.into());
    }

    /// Copy every key of `other` into this manager.
    pub fn merge(&self, other: &ConfigManager) {
        if Arc::ptr_eq(&self.config, &other.config) {
            return;
        }
        let entries = other.read().clone();
        self.extend(entries);
    }

    /// The raw, unvalidated value of `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    /// Deserialize the raw value of `key` with serde, without a schema.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.get(key).ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;
        serde_json::from_value(value.to_json()).map_err(|e| ConfigError::Parse(format!("{}: {}", key, e)))
    }

    /// Check if a key exists
    pub fn has(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// All keys, in load order
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// The whole record as an object value.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.read().clone())
    }

    /// Parse the value of `key` with `schema`. A missing key is parsed as
    /// `Undefined`, so optional schemas accept it.
    pub fn parse_key<S: Schema>(&self, key: &str, schema: &S) -> Result<S::Output> {
        let value = self.get(key).unwrap_or(Value::Undefined);
        schema.parse(&value).map_err(|error| {
            safe_data_log::warn!(target: "safe_data::config", "Invalid configuration key {}: {}", key, error);
            ConfigError::Validation(error)
        })
    }

    /// Parse the whole record with `schema`.
    pub fn load_validated<S: Schema>(&self, schema: &S) -> Result<S::Output> {
        Ok(schema.parse(&self.snapshot())?)
    }
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("keys", &self.keys())
            .field("env_prefix", &self.env_prefix)
            .finish()
    }
}
