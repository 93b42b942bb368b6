//! Integration tests for safe-data-config

use safe_data_config::*;
use safe_data_schema::{
    ArraySchema, BooleanSchema, EnumSchema, NumberSchema, Pattern, SchemaOptions, ShapeSchema, StringSchema, Value,
    codes,
};
use std::env;
use std::fs;
use tempfile::TempDir;

fn cast() -> SchemaOptions {
    SchemaOptions::new().with_cast(true)
}

#[test]
fn test_env_loader_process_environment() {
    // Unique names; the process environment is shared between tests.
    unsafe {
        env::set_var("SAFEDATA_IT_DATABASE_URL", "postgres://localhost");
        env::set_var("SAFEDATA_IT_POOL_SIZE", "16");
    }

    let loader = EnvLoader::new(Some("SAFEDATA_IT".to_string()));
    assert_eq!(loader.load_var("database_url").unwrap(), "postgres://localhost");

    let manager = ConfigManager::with_prefix("SAFEDATA_IT");
    manager.load_env().unwrap();
    let pool = NumberSchema::create_with(cast()).int().min(1.0);
    assert_eq!(manager.parse_key("pool_size", &pool).unwrap(), 16.0);

    unsafe {
        env::remove_var("SAFEDATA_IT_DATABASE_URL");
        env::remove_var("SAFEDATA_IT_POOL_SIZE");
    }
}

#[test]
fn test_load_files_by_extension() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("base.json");
    let toml_path = dir.path().join("override.toml");
    fs::write(&json_path, r#"{"name": "api", "debug": false, "tags": ["a"]}"#).unwrap();
    fs::write(&toml_path, "debug = true\ntags = [\"a\", \"b\"]\n").unwrap();

    let manager = ConfigManager::new();
    manager.load_file(&json_path).unwrap();
    manager.load_file(&toml_path).unwrap();

    let debug = BooleanSchema::create();
    let tags = ArraySchema::create(StringSchema::create()).max_items(4);
    assert!(manager.parse_key("debug", &debug).unwrap());
    assert_eq!(manager.parse_key("tags", &tags).unwrap(), vec!["a", "b"]);
}

#[test]
fn test_dotenv_does_not_touch_process_environment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "# local overrides\nSAFEDATA_DOTENV_MODE=\"production\"\nSAFEDATA_DOTENV_WORKERS=4\n").unwrap();

    let manager = ConfigManager::with_prefix("SAFEDATA_DOTENV");
    manager.load_dotenv(Some(&path)).unwrap();

    assert_eq!(manager.keys(), vec!["mode", "workers"]);
    assert!(env::var("SAFEDATA_DOTENV_MODE").is_err());

    let mode = EnumSchema::create(["development", "production"]);
    assert_eq!(manager.parse_key("mode", &mode).unwrap(), "production");
}

#[test]
fn test_env_files_and_dotenv_parse_alike() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    fs::write(
        &path,
        "# shared\nexport greeting=\"hello\\nworld\"\nliteral='a \\n b'\nurl=\"postgres://u:p@h/db?x=1\"\n",
    )
    .unwrap();

    let from_file = ConfigManager::new();
    from_file.load_file(&path).unwrap();
    let from_dotenv = ConfigManager::new();
    from_dotenv.load_dotenv(Some(&path)).unwrap();

    assert_eq!(from_file.get("greeting"), Some(Value::from("hello\nworld")));
    assert_eq!(from_file.get("literal"), Some(Value::from("a \\n b")));
    for key in ["greeting", "literal", "url"] {
        assert_eq!(from_file.get(key), from_dotenv.get(key), "{}", key);
    }
}

#[test]
fn test_dotenv_missing_explicit_path_is_an_error() {
    let manager = ConfigManager::new();
    let result = manager.load_dotenv(Some(std::path::Path::new("/nonexistent/.env")));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_validated_service_settings() {
    let manager = ConfigManager::new();
    manager
        .load_str(
            r#"
            host = "api.example.com"
            port = "8443"
            admin = "ops@example.com"
            "#,
            FileFormat::Toml,
        )
        .unwrap();

    let settings = ShapeSchema::create()
        .field("host", StringSchema::create().not_blank())
        .field("port", NumberSchema::create_with(cast()).int().min(1.0).max(65535.0))
        .field("admin", StringSchema::create().pattern(Pattern::Email))
        .field("timeout", NumberSchema::create().positive().optional());

    let record = manager.load_validated(&settings).unwrap();
    assert_eq!(record.get("port"), Some(&Value::from(8443)));
    assert!(!record.contains_key("timeout"));

    manager.set("admin", "not-an-email");
    let error = manager.load_validated(&settings).unwrap_err();
    let failure = error.validation().unwrap();
    assert_eq!(failure.code(), codes::SHAPE_FIELD_INVALID);
    assert_eq!(failure.detail("key"), Some(&serde_json::json!("admin")));
    assert_eq!(failure.root_cause().code(), codes::STRING_PATTERN);
}

#[test]
fn test_schema_options_from_configuration() {
    let manager = ConfigManager::new();
    manager
        .load_str(r#"{"options": {"cast": true, "typeError": "retries must be numeric"}}"#, FileFormat::Json)
        .unwrap();

    let options: SchemaOptions = manager.get_as("options").unwrap();
    let retries = NumberSchema::create_with(options).int();

    manager.set("retries", "three");
    let error = manager.parse_key("retries", &retries).unwrap_err();
    assert_eq!(error.to_string(), "Invalid configuration: retries must be numeric");
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::KeyNotFound("test_key".to_string());
    assert!(err.to_string().contains("test_key"));
}
