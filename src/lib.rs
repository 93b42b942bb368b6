//! safe-data: runtime validation of untrusted values
//!
//! Schemas are immutable: every configuration method returns a new schema,
//! so one definition can be shared between threads and extended freely.
//! Parsing yields typed data or a [`ValidationError`] with a stable code.
//!
//! ```
//! use safe_data::prelude::*;
//!
//! let user = ShapeSchema::create()
//!     .field("name", StringSchema::create().not_blank())
//!     .field("role", EnumSchema::create(["admin", "member"]))
//!     .field("age", NumberSchema::create().int().min(0.0).optional());
//!
//! let input = Value::from_json_str(r#"{"name": "Ada", "role": "admin"}"#).unwrap();
//! let record = user.parse(&input).unwrap();
//! assert_eq!(record.get("role"), Some(&Value::from("admin")));
//! assert!(!record.contains_key("age"));
//! ```

// Re-export the schema engine
pub use safe_data_schema::*;

// Diagnostic logging
pub use safe_data_log as log;

#[cfg(feature = "config")]
pub use safe_data_config as config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ArraySchema,
        BigIntSchema,
        BooleanSchema,
        EnumSchema,
        InstanceSchema,
        NumberSchema,
        ObjectSchema,
        Pattern,
        Record,
        Schema,
        SchemaExt,
        SchemaOptions,
        ShapeSchema,
        StringSchema,
        UnionSchema,
        ValidationError,
        Value,
        codes,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{ConfigError, ConfigManager, FileFormat};
}
