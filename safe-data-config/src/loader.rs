// Configuration file loaders

use crate::{ConfigError, Result};
use safe_data_schema::{Record, Value};
use std::fs;
use std::path::Path;

/// Largest integer an `f64` holds exactly; larger TOML integers become bigints.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Turns file contents into an untrusted [`Value`] for schema validation.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Pick the format from the file extension. `.env` files have no
    /// extension, so a file named `.env` (or `.env.local`) counts as one.
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
        if file_name == ".env" || file_name.starts_with(".env.") {
            return Ok(Self::new(FileFormat::Env));
        }

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::Load(format!("No file extension found: {}", path.display())))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::Load(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load configuration from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        safe_data_log::trace!(target: "safe_data::config", "Reading {}", path.display());
        let content = fs::read_to_string(path)?;

        self.parse(&content)
    }

    /// Parse configuration from string
    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => parse_json(content),
            FileFormat::Toml => parse_toml(content),
            FileFormat::Env => parse_env(content),
        }
    }
}

fn parse_json(content: &str) -> Result<Value> {
    Value::from_json_str(content).map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))
}

fn parse_toml(content: &str) -> Result<Value> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))?;
    Ok(from_toml(toml::Value::Table(table)))
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(n) if n.unsigned_abs() <= MAX_SAFE_INTEGER => Value::Number(n as f64),
        toml::Value::Integer(n) => Value::BigInt(i128::from(n)),
        toml::Value::Float(n) => Value::Number(n),
        toml::Value::Boolean(b) => Value::Bool(b),
        // Kept textual; validate with the ISO date/time rules.
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml(value)))
                .collect(),
        ),
    }
}

/// `.env` syntax as read by `dotenvy`, the same parser behind
/// [`ConfigManager::load_dotenv`](crate::ConfigManager::load_dotenv).
fn parse_env(content: &str) -> Result<Value> {
    let mut map = Record::new();
    for pair in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = pair.map_err(|e| ConfigError::Parse(format!("ENV parse error: {}", e)))?;
        map.insert(key, Value::String(value));
    }
    Ok(Value::Object(map))
}
