// Boolean schema

use super::{Kind, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::Result;
use crate::message::{Message, render_or};
use crate::presence::{Presence, Required};
use crate::value::Value;

/// Strict `true` / `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanKind;

pub type BooleanSchema<O = bool, P = Required> = TypeSchema<BooleanKind, O, P>;

impl Kind for BooleanKind {
    type Input = bool;

    const NAME: &'static str = "boolean";
    const TYPE: &'static str = codes::BOOLEAN_TYPE;
    const REQUIRED: &'static str = codes::BOOLEAN_REQUIRED;
    const CUSTOM: &'static str = codes::BOOLEAN_CUSTOM;

    fn type_message(&self) -> String {
        "The value must be a boolean.".to_string()
    }

    fn cast(&self, value: &Value, _options: &SchemaOptions) -> Option<Value> {
        let cast = match value {
            Value::Undefined | Value::Null => false,
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" => true,
                "false" | "no" | "0" => false,
                _ => return None,
            },
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(n) => *n != 0,
            _ => return None,
        };
        Some(Value::Bool(cast))
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<bool> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(self.type_error(other, options)),
        }
    }
}

impl TypeSchema<BooleanKind, bool, Required> {
    pub fn create() -> Self {
        Self::create_with(SchemaOptions::default())
    }

    pub fn create_with(options: SchemaOptions) -> Self {
        schema_of(BooleanKind, options)
    }
}

impl<O: 'static, P: Presence> TypeSchema<BooleanKind, O, P> {
    /// Only `true` passes.
    pub fn truthy(&self) -> Self {
        self.truthy_rule(None)
    }

    pub fn truthy_with(&self, message: impl Into<Message<()>>) -> Self {
        self.truthy_rule(Some(message.into()))
    }

    /// Only `false` passes.
    pub fn falsy(&self) -> Self {
        self.falsy_rule(None)
    }

    pub fn falsy_with(&self, message: impl Into<Message<()>>) -> Self {
        self.falsy_rule(Some(message.into()))
    }

    fn truthy_rule(&self, message: Option<Message<()>>) -> Self {
        let message = render_or(message, &(), |_| "The value must be true.".to_string());
        self.guard(codes::BOOLEAN_TRUTHY, message, (), |value: &bool| *value)
    }

    fn falsy_rule(&self, message: Option<Message<()>>) -> Self {
        let message = render_or(message, &(), |_| "The value must be false.".to_string());
        self.guard(codes::BOOLEAN_FALSY, message, (), |value: &bool| !*value)
    }
}
