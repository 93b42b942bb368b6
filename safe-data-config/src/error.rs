// Error types for configuration loading

use safe_data_schema::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl ConfigError {
    /// The schema failure behind a `Validation` error.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ConfigError::Validation(error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::Parse("unexpected token".to_string());
        assert_eq!(err.to_string(), "Failed to parse configuration: unexpected token");
    }

    #[test]
    fn test_validation_conversion() {
        let err: ConfigError = ValidationError::new("NUMBER_MIN", "too small").into();
        assert_eq!(err.to_string(), "Invalid configuration: too small");
        assert_eq!(err.validation().map(ValidationError::code), Some("NUMBER_MIN"));
        assert!(ConfigError::KeyNotFound("port".to_string()).validation().is_none());
    }
}
