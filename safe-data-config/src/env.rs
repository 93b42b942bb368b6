// Environment variable loading

use crate::{ConfigError, Result};
use safe_data_schema::Record;
use std::env;

/// Reads environment variables, optionally restricted to a prefix.
///
/// With prefix `APP`, `APP_DATABASE_URL` is loaded as `database_url`;
/// `APPLE` is ignored.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    prefix: Option<String>,
    pairs: Option<Vec<(String, String)>>,
}

impl EnvLoader {
    /// Create a loader over the process environment
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix, pairs: None }
    }

    /// Create a loader over a fixed set of variables instead of the process
    /// environment.
    pub fn from_pairs<K, V>(prefix: Option<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix,
            pairs: Some(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn vars(&self) -> Vec<(String, String)> {
        match &self.pairs {
            Some(pairs) => pairs.clone(),
            None => env::vars().collect(),
        }
    }

    fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        match &self.prefix {
            Some(prefix) => key
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|rest| !rest.is_empty()),
            None => Some(key),
        }
    }

    /// Load all matching variables, prefix stripped and keys lowercased.
    /// Keys come out sorted.
    pub fn load(&self) -> Result<Record<String>> {
        let mut vars: Vec<(String, String)> = self
            .vars()
            .into_iter()
            .filter_map(|(key, value)| self.strip(&key).map(|name| (name.to_lowercase(), value)))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(vars.into_iter().collect())
    }

    /// Load a specific variable; `key` is upper-cased and prefixed.
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        match &self.pairs {
            Some(pairs) => pairs
                .iter()
                .find(|(name, _)| *name == full_key)
                .map(|(_, value)| value.clone())
                .ok_or(ConfigError::Env(env::VarError::NotPresent)),
            None => env::var(&full_key).map_err(ConfigError::Env),
        }
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(prefix: Option<&str>) -> EnvLoader {
        EnvLoader::from_pairs(
            prefix.map(str::to_string),
            [
                ("APP_PORT", "8080"),
                ("APP_DATABASE_URL", "postgres://localhost"),
                ("APPLE", "fruit"),
                ("APP_", "empty name"),
                ("HOME", "/root"),
            ],
        )
    }

    #[test]
    fn test_load_with_prefix() {
        let vars = loader(Some("APP")).load().unwrap();
        assert_eq!(vars.keys().collect::<Vec<_>>(), vec!["database_url", "port"]);
        assert_eq!(vars["port"], "8080");
    }

    #[test]
    fn test_load_without_prefix() {
        let vars = loader(None).load().unwrap();
        assert_eq!(vars.len(), 5);
        assert_eq!(vars["apple"], "fruit");
    }

    #[test]
    fn test_load_var() {
        let loader = loader(Some("APP"));
        assert_eq!(loader.load_var("database_url").unwrap(), "postgres://localhost");
        assert!(matches!(
            loader.load_var("missing"),
            Err(ConfigError::Env(env::VarError::NotPresent))
        ));
        assert_eq!(loader.load_var_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_process_environment_missing_var() {
        let loader = EnvLoader::new(Some("SAFE_DATA_TEST".to_string()));
        assert!(loader.load_var("MISSING_VAR_67890").is_err());
    }
}
