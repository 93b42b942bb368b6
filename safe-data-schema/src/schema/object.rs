// Object (record) schema

use super::{Kind, Schema, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::{Result, ValidationError};
use crate::message::{KeyParams, Message, ValueParams};
use crate::presence::{Presence, Required};
use crate::value::{Record, Value};
use std::sync::Arc;

type KeyCheck = Arc<dyn Fn(&str) -> Result<()> + Send + Sync>;

const OBJECT_MESSAGE: &str = "The value must be an object.";

/// A string-keyed record whose values all satisfy one schema.
///
/// Members are parsed in the input's key order and the first failure aborts
/// the parse. The output is a new record; the input is never modified.
pub struct ObjectKind<V> {
    values: Arc<V>,
    keys: Option<KeyCheck>,
    key_error: Option<Message<KeyParams>>,
    value_error: Option<Message<ValueParams>>,
}

pub type ObjectSchema<V, P = Required> = TypeSchema<ObjectKind<V>, Record<<V as Schema>::Output>, P>;

impl<V> ObjectKind<V> {
    pub fn new(values: V) -> Self {
        Self {
            values: Arc::new(values),
            keys: None,
            key_error: None,
            value_error: None,
        }
    }

    fn key_failure(&self, key: &str, cause: ValidationError) -> ValidationError {
        let params = KeyParams { key: key.to_string() };
        let message = match &self.key_error {
            Some(message) => message.render(&params),
            None => compose(format!("Invalid object key '{}'", key), &cause),
        };
        ValidationError::new(codes::OBJECT_KEY_INVALID, message)
            .with_params(&params)
            .with_cause(cause)
    }

    fn value_failure(&self, key: &str, value: &Value, cause: ValidationError) -> ValidationError {
        let params = ValueParams {
            key: key.to_string(),
            value: value.clone(),
        };
        let message = match &self.value_error {
            Some(message) => message.render(&params),
            None => compose(format!("Invalid value of '{}' key", key), &cause),
        };
        ValidationError::new(codes::OBJECT_VALUE_INVALID, message)
            .with_params(&params)
            .with_cause(cause)
    }
}

fn compose(prefix: String, cause: &ValidationError) -> String {
    if cause.message.is_empty() {
        prefix
    } else {
        format!("{}: {}", prefix, cause.message)
    }
}

impl<V> Clone for ObjectKind<V> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            keys: self.keys.clone(),
            key_error: self.key_error.clone(),
            value_error: self.value_error.clone(),
        }
    }
}

impl<V> std::fmt::Debug for ObjectKind<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectKind")
            .field("values", &std::any::type_name::<V>())
            .field("keys", &self.keys.is_some())
            .finish_non_exhaustive()
    }
}

impl<V> Kind for ObjectKind<V>
where
    V: Schema + 'static,
    V::Output: 'static,
{
    type Input = Record<V::Output>;

    const NAME: &'static str = "object";
    const TYPE: &'static str = codes::OBJECT_TYPE;
    const REQUIRED: &'static str = codes::OBJECT_REQUIRED;
    const CUSTOM: &'static str = codes::OBJECT_CUSTOM;

    fn type_message(&self) -> String {
        OBJECT_MESSAGE.to_string()
    }

    fn required_message(&self) -> String {
        OBJECT_MESSAGE.to_string()
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<Self::Input> {
        let Value::Object(entries) = value else {
            return Err(self.type_error(value, options));
        };

        let mut output = Record::with_capacity(entries.len());
        for (key, item) in entries {
            if let Some(keys) = &self.keys {
                keys(key).map_err(|cause| self.key_failure(key, cause))?;
            }
            let parsed = self
                .values
                .parse(item)
                .map_err(|cause| self.value_failure(key, item, cause))?;
            output.insert(key.clone(), parsed);
        }
        Ok(output)
    }
}

impl<V> TypeSchema<ObjectKind<V>, Record<V::Output>, Required>
where
    V: Schema + 'static,
    V::Output: 'static,
{
    pub fn create(values: V) -> Self {
        Self::create_with(values, SchemaOptions::default())
    }

    pub fn create_with(values: V, options: SchemaOptions) -> Self {
        schema_of(ObjectKind::new(values), options)
    }
}

impl<V, O, P> TypeSchema<ObjectKind<V>, O, P>
where
    V: Schema + 'static,
    V::Output: 'static,
    O: 'static,
    P: Presence,
{
    /// Validate every key with `schema` before its value. The key schema's
    /// output is discarded; keys are kept as they are.
    pub fn key_schema<S>(&self, schema: S) -> Self
    where
        S: Schema + 'static,
    {
        let check: KeyCheck = Arc::new(move |key: &str| -> Result<()> {
            schema.parse(&Value::from(key)).map(|_| ())
        });
        self.with_kind(|kind| kind.keys = Some(check))
    }

    /// Replace the message of key failures.
    pub fn key_error(&self, message: impl Into<Message<KeyParams>>) -> Self {
        let message = message.into();
        self.with_kind(|kind| kind.key_error = Some(message))
    }

    /// Replace the message of value failures.
    pub fn value_error(&self, message: impl Into<Message<ValueParams>>) -> Self {
        let message = message.into();
        self.with_kind(|kind| kind.value_error = Some(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, StringSchema};
    use serde_json::json;

    fn input(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_parses_every_member() {
        let schema = ObjectSchema::create(NumberSchema::create());
        let output = schema.parse(&input(json!({"b": 2, "a": 1}))).unwrap();

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(output["a"], 1.0);
    }

    #[test]
    fn test_rejects_non_objects() {
        let schema = ObjectSchema::create(NumberSchema::create());
        for value in [Value::array([1]), Value::from("x"), Value::from(1)] {
            let error = schema.parse(&value).unwrap_err();
            assert_eq!(error.code(), codes::OBJECT_TYPE);
            assert_eq!(error.message, "The value must be an object.");
        }

        let error = schema.parse(&Value::Null).unwrap_err();
        assert_eq!(error.code(), codes::OBJECT_REQUIRED);
        assert_eq!(error.message, "The value must be an object.");
    }

    #[test]
    fn test_value_failure_wraps_cause() {
        let schema = ObjectSchema::create(NumberSchema::create());
        let error = schema.parse(&input(json!({"a": "1", "b": 2}))).unwrap_err();

        assert_eq!(error.code(), codes::OBJECT_VALUE_INVALID);
        assert_eq!(error.message, "Invalid value of 'a' key: Must be a number.");
        assert_eq!(error.detail("key"), Some(&json!("a")));
        assert_eq!(error.detail("value"), Some(&json!("1")));
        assert_eq!(error.root_cause().code(), codes::NUMBER_TYPE);
    }

    #[test]
    fn test_fail_fast_in_key_order() {
        let schema = ObjectSchema::create(NumberSchema::create().min(0.0));
        let error = schema.parse(&input(json!({"ok": 1, "first": -1, "second": "x"}))).unwrap_err();
        assert_eq!(error.detail("key"), Some(&json!("first")));
        assert_eq!(error.root_cause().code(), codes::NUMBER_MIN);
    }

    #[test]
    fn test_key_schema() {
        let schema = ObjectSchema::create(NumberSchema::create())
            .key_schema(StringSchema::create().min_length(2));
        assert!(schema.is_valid(&input(json!({"ab": 1}))));

        let error = schema.parse(&input(json!({"ab": 1, "c": 2}))).unwrap_err();
        assert_eq!(error.code(), codes::OBJECT_KEY_INVALID);
        assert_eq!(
            error.message,
            "Invalid object key 'c': The value must contain at least 2 characters."
        );
        assert_eq!(error.detail("key"), Some(&json!("c")));
        assert_eq!(error.cause.as_deref().map(|c| c.code()), Some(codes::STRING_MIN_LENGTH));
    }

    #[test]
    fn test_key_and_value_codes_differ() {
        assert_ne!(codes::OBJECT_KEY_INVALID, codes::OBJECT_VALUE_INVALID);
    }

    #[test]
    fn test_custom_member_messages() {
        let schema = ObjectSchema::create(NumberSchema::create())
            .key_schema(StringSchema::create().max_length(3))
            .key_error(Message::from_fn(|p: &KeyParams| format!("bad key {}", p.key)))
            .value_error("bad value");

        assert_eq!(schema.parse(&input(json!({"long": 1}))).unwrap_err().message, "bad key long");
        assert_eq!(schema.parse(&input(json!({"k": true}))).unwrap_err().message, "bad value");
    }

    #[test]
    fn test_nested_objects_keep_cause_chain() {
        let schema = ObjectSchema::create(ObjectSchema::create(NumberSchema::create().int()));
        let error = schema.parse(&input(json!({"outer": {"inner": 1.5}}))).unwrap_err();

        let chain: Vec<&str> = error.chain().map(ValidationError::code).collect();
        assert_eq!(
            chain,
            vec![codes::OBJECT_VALUE_INVALID, codes::OBJECT_VALUE_INVALID, codes::NUMBER_INT]
        );
        assert_eq!(
            error.message,
            "Invalid value of 'outer' key: Invalid value of 'inner' key: Must be an integer."
        );
    }

    #[test]
    fn test_optional_members() {
        let schema = ObjectSchema::create(StringSchema::create().nullable());
        let output = schema.parse(&input(json!({"a": null, "b": "x"}))).unwrap();
        assert_eq!(output["a"], None);
        assert_eq!(output["b"], Some("x".to_string()));
    }

    #[test]
    fn test_input_is_not_modified() {
        let value = input(json!({"name": " padded "}));
        let schema = ObjectSchema::create(StringSchema::create_with(SchemaOptions::new().with_trim(true)));
        let output = schema.parse(&value).unwrap();

        assert_eq!(output["name"], "padded");
        assert_eq!(value.get("name"), Some(&Value::from(" padded ")));
    }

    #[test]
    fn test_map_and_custom() {
        let total = ObjectSchema::create(NumberSchema::create())
            .custom(|record| {
                if record.is_empty() { Err("empty record") } else { Ok(record) }
            })
            .map(|record| record.values().sum::<f64>());

        assert_eq!(total.parse(&input(json!({"a": 1, "b": 2.5}))), Ok(3.5));
        assert_eq!(total.parse(&input(json!({}))).unwrap_err().code(), codes::OBJECT_CUSTOM);
    }
}
