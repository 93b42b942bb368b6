// Shape schema: an object with a fixed set of named fields

use super::{Kind, Schema, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::{Result, ValidationError};
use crate::message::KeyParams;
use crate::presence::{Presence, Required};
use crate::value::{Record, Value};
use indexmap::IndexMap;
use std::sync::Arc;

type FieldParser = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Named fields, each with its own schema.
///
/// Fields are parsed in declaration order. A field missing from the input is
/// parsed as `Undefined` and left out of the output when its schema lets it
/// through as absent. Keys without a field are dropped, or rejected once the
/// shape is [`strict`](TypeSchema::strict).
#[derive(Clone, Default)]
pub struct ShapeKind {
    fields: IndexMap<String, FieldParser>,
    strict: bool,
}

pub type ShapeSchema<O = Record<Value>, P = Required> = TypeSchema<ShapeKind, O, P>;

impl ShapeKind {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl std::fmt::Debug for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeKind")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("strict", &self.strict)
            .finish()
    }
}

impl Kind for ShapeKind {
    type Input = Record<Value>;

    const NAME: &'static str = "object";
    const TYPE: &'static str = codes::SHAPE_TYPE;
    const REQUIRED: &'static str = codes::SHAPE_REQUIRED;
    const CUSTOM: &'static str = codes::SHAPE_CUSTOM;

    fn type_message(&self) -> String {
        "The value must be an object.".to_string()
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<Record<Value>> {
        let Value::Object(entries) = value else {
            return Err(self.type_error(value, options));
        };

        if self.strict {
            if let Some(key) = entries.keys().find(|key| !self.fields.contains_key(*key)) {
                return Err(ValidationError::new(
                    codes::SHAPE_UNKNOWN_KEY,
                    format!("Unknown key '{}'.", key),
                )
                .with_params(&KeyParams { key: key.clone() }));
            }
        }

        let mut output = Record::with_capacity(self.fields.len());
        for (name, parse) in &self.fields {
            let input = entries.get(name);
            let parsed = parse(input.unwrap_or(&Value::Undefined)).map_err(|cause| {
                ValidationError::new(
                    codes::SHAPE_FIELD_INVALID,
                    format!("Invalid value of '{}' field: {}", name, cause.message),
                )
                .with_params(&KeyParams { key: name.clone() })
                .with_cause(cause)
            })?;
            if input.is_none() && parsed.is_absent() {
                continue;
            }
            output.insert(name.clone(), parsed);
        }
        Ok(output)
    }
}

impl TypeSchema<ShapeKind, Record<Value>, Required> {
    pub fn create() -> Self {
        Self::create_with(SchemaOptions::default())
    }

    pub fn create_with(options: SchemaOptions) -> Self {
        schema_of(ShapeKind::default(), options)
    }
}

impl<O: 'static, P: Presence> TypeSchema<ShapeKind, O, P> {
    /// Declare (or redeclare, keeping its position) a field.
    pub fn field<S>(&self, name: impl Into<String>, schema: S) -> Self
    where
        S: Schema + 'static,
        S::Output: Into<Value>,
    {
        let parse: FieldParser = Arc::new(move |value: &Value| schema.parse(value).map(Into::into));
        let name = name.into();
        self.with_kind(|kind| {
            kind.fields.insert(name, parse);
        })
    }

    /// Reject keys that are not declared fields.
    pub fn strict(&self) -> Self {
        self.with_kind(|kind| kind.strict = true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, BooleanSchema, NumberSchema, StringSchema};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct User {
        name: String,
        age: Option<f64>,
    }

    fn user_shape() -> ShapeSchema {
        ShapeSchema::create()
            .field("name", StringSchema::create().not_blank())
            .field("age", NumberSchema::create().int().positive().optional())
    }

    fn input(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_parses_declared_fields() {
        let output = user_shape().parse(&input(json!({"age": 30, "name": "Ada"}))).unwrap();
        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(output["age"], Value::from(30));
    }

    #[test]
    fn test_missing_optional_fields_are_omitted() {
        let output = user_shape().parse(&input(json!({"name": "Ada"}))).unwrap();
        assert_eq!(output.len(), 1);
        assert!(!output.contains_key("age"));
    }

    #[test]
    fn test_missing_required_field() {
        let error = user_shape().parse(&input(json!({"age": 3}))).unwrap_err();
        assert_eq!(error.code(), codes::SHAPE_FIELD_INVALID);
        assert_eq!(error.message, "Invalid value of 'name' field: The value is required.");
        assert_eq!(error.detail("key"), Some(&json!("name")));
        assert_eq!(error.root_cause().code(), codes::STRING_REQUIRED);
    }

    #[test]
    fn test_unknown_keys() {
        let value = input(json!({"name": "Ada", "admin": true}));
        let output = user_shape().parse(&value).unwrap();
        assert!(!output.contains_key("admin"));

        let error = user_shape().strict().parse(&value).unwrap_err();
        assert_eq!(error.code(), codes::SHAPE_UNKNOWN_KEY);
        assert_eq!(error.message, "Unknown key 'admin'.");
        assert_eq!(error.detail("key"), Some(&json!("admin")));
    }

    #[test]
    fn test_nested_composites() {
        let shape = ShapeSchema::create()
            .field("tags", ArraySchema::create(StringSchema::create()).max_items(2))
            .field("active", BooleanSchema::create());

        let error = shape.parse(&input(json!({"tags": ["a", 1], "active": true}))).unwrap_err();
        let chain: Vec<&str> = error.chain().map(ValidationError::code).collect();
        assert_eq!(
            chain,
            vec![codes::SHAPE_FIELD_INVALID, codes::ARRAY_ITEM_INVALID, codes::STRING_TYPE]
        );
    }

    #[test]
    fn test_redeclared_field_keeps_position() {
        let shape = user_shape().field("name", StringSchema::create().min_length(5));
        assert_eq!(shape.kind().field_names().collect::<Vec<_>>(), vec!["name", "age"]);
        assert!(!shape.is_valid(&input(json!({"name": "Ada"}))));
    }

    #[test]
    fn test_map_into_struct() {
        let schema = user_shape().map(|record| User {
            name: record.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
            age: record.get("age").and_then(Value::as_f64),
        });

        assert_eq!(
            schema.parse(&input(json!({"name": "Ada", "age": 36}))),
            Ok(User {
                name: "Ada".to_string(),
                age: Some(36.0),
            })
        );
        assert_eq!(
            schema.parse(&input(json!({"name": "Bob"}))).map(|user| user.age),
            Ok(None)
        );
    }

    #[test]
    fn test_rejects_arrays() {
        let error = user_shape().parse(&Value::array(["Ada"])).unwrap_err();
        assert_eq!(error.code(), codes::SHAPE_TYPE);
        assert_eq!(error.message, "The value must be an object.");
    }
}
