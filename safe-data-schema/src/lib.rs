//! Schema engine for safe-data
//!
//! Turns untrusted, dynamically typed [`Value`]s (parsed JSON, configuration,
//! environment variables) into typed Rust data, or a [`ValidationError`]
//! carrying a stable code, a message, structured details and a cause chain.
//!
//! # Examples
//!
//! ## Scalars
//!
//! ```
//! use safe_data_schema::{NumberSchema, SchemaOptions, Value, codes};
//!
//! let port = NumberSchema::create_with(SchemaOptions::new().with_cast(true))
//!     .int()
//!     .min(1.0)
//!     .max(65535.0);
//!
//! assert_eq!(port.parse(&Value::from("8080")), Ok(8080.0));
//!
//! let error = port.parse(&Value::from("80.5")).unwrap_err();
//! assert_eq!(error.code(), codes::NUMBER_INT);
//! assert_eq!(error.message, "Must be an integer.");
//! ```
//!
//! ## Presence
//!
//! Relaxing a schema changes its output type, so absent values show up as
//! `None`:
//!
//! ```
//! use safe_data_schema::{StringSchema, Value};
//!
//! let nickname = StringSchema::create().not_blank().nullish();
//! assert_eq!(nickname.parse(&Value::Null), Ok(None));
//! assert_eq!(nickname.parse(&Value::from("neo")), Ok(Some("neo".to_string())));
//! ```
//!
//! ## Composites
//!
//! ```
//! use safe_data_schema::{NumberSchema, ObjectSchema, Value, codes};
//!
//! let limits = ObjectSchema::create(NumberSchema::create().positive());
//! let input = Value::from_json_str(r#"{"cpu": 2, "memory": -1}"#).unwrap();
//!
//! let error = limits.parse(&input).unwrap_err();
//! assert_eq!(error.code(), codes::OBJECT_VALUE_INVALID);
//! assert_eq!(error.message, "Invalid value of 'memory' key: Must be a positive number.");
//! assert_eq!(error.root_cause().code(), codes::NUMBER_POSITIVE);
//! ```
//!
//! ## Validators and mapping
//!
//! Validators are keyed by code: adding one whose code is already configured
//! replaces it in place. The mapper runs last.
//!
//! ```
//! use safe_data_schema::{StringSchema, Value, codes};
//!
//! let slug = StringSchema::create()
//!     .min_length(2)
//!     .max_length(10)
//!     .min_length(3)
//!     .map(|s| s.to_lowercase());
//!
//! assert_eq!(slug.rule_codes(), vec![codes::STRING_MIN_LENGTH, codes::STRING_MAX_LENGTH]);
//! assert_eq!(slug.parse(&Value::from("Rust")), Ok("rust".to_string()));
//! assert!(!slug.is_valid(&Value::from("ab")));
//! ```

pub mod codes;
mod errors;
mod format;
mod message;
mod patterns;
mod pipeline;
pub mod presence;
mod rules;
mod schema;
mod value;

pub use errors::*;
pub use format::{format_value, format_values, number_to_string};
pub use message::*;
pub use patterns::Pattern;
pub use pipeline::Pipeline;
pub use rules::*;
pub use schema::*;
pub use value::{Instance, Record, Value};
