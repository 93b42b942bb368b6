// String schema

use super::{Kind, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::Result;
use crate::format::number_to_string;
use crate::message::{LengthParams, Message, NonEmptyParams, PatternParams};
use crate::presence::{Presence, Required};
use crate::rules::{Matches, MaxLength, MinLength, NonEmpty};
use crate::value::Value;
use regex::Regex;

#[derive(Debug, Clone, Copy, Default)]
pub struct StringKind;

pub type StringSchema<O = String, P = Required> = TypeSchema<StringKind, O, P>;

impl Kind for StringKind {
    type Input = String;

    const NAME: &'static str = "string";
    const TYPE: &'static str = codes::STRING_TYPE;
    const REQUIRED: &'static str = codes::STRING_REQUIRED;
    const CUSTOM: &'static str = codes::STRING_CUSTOM;

    fn type_message(&self) -> String {
        "The value must be a string.".to_string()
    }

    fn cast(&self, value: &Value, _options: &SchemaOptions) -> Option<Value> {
        let cast = match value {
            Value::Undefined | Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::BigInt(n) => n.to_string(),
            Value::Date(d) => d.to_rfc3339(),
            _ => return None,
        };
        Some(Value::String(cast))
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<String> {
        match value {
            Value::String(s) if options.trim => Ok(s.trim().to_string()),
            Value::String(s) => Ok(s.clone()),
            other => Err(self.type_error(other, options)),
        }
    }
}

impl TypeSchema<StringKind, String, Required> {
    pub fn create() -> Self {
        Self::create_with(SchemaOptions::default())
    }

    pub fn create_with(options: SchemaOptions) -> Self {
        schema_of(StringKind, options)
    }
}

impl<O: 'static, P: Presence> TypeSchema<StringKind, O, P> {
    /// Rejects `""`.
    pub fn not_empty(&self) -> Self {
        self.rule_as::<str, _>(codes::STRING_NOT_EMPTY, NonEmpty::new())
    }

    pub fn not_empty_with(&self, message: impl Into<Message<NonEmptyParams>>) -> Self {
        self.rule_as::<str, _>(codes::STRING_NOT_EMPTY, NonEmpty::new().with_message(message))
    }

    /// Rejects `""` and whitespace-only strings. Shares the code of
    /// [`not_empty`](Self::not_empty), so one replaces the other.
    pub fn not_blank(&self) -> Self {
        self.rule_as::<str, _>(codes::STRING_NOT_EMPTY, NonEmpty::ignoring_whitespace())
    }

    pub fn not_blank_with(&self, message: impl Into<Message<NonEmptyParams>>) -> Self {
        self.rule_as::<str, _>(
            codes::STRING_NOT_EMPTY,
            NonEmpty::ignoring_whitespace().with_message(message),
        )
    }

    /// At least `length` characters.
    pub fn min_length(&self, length: usize) -> Self {
        self.rule_as::<str, _>(codes::STRING_MIN_LENGTH, MinLength::new(length))
    }

    pub fn min_length_with(&self, length: usize, message: impl Into<Message<LengthParams>>) -> Self {
        self.rule_as::<str, _>(codes::STRING_MIN_LENGTH, MinLength::new(length).with_message(message))
    }

    /// At most `length` characters.
    pub fn max_length(&self, length: usize) -> Self {
        self.rule_as::<str, _>(codes::STRING_MAX_LENGTH, MaxLength::new(length))
    }

    pub fn max_length_with(&self, length: usize, message: impl Into<Message<LengthParams>>) -> Self {
        self.rule_as::<str, _>(codes::STRING_MAX_LENGTH, MaxLength::new(length).with_message(message))
    }

    /// Must match a regular expression or a catalog [`Pattern`](crate::Pattern).
    pub fn pattern(&self, pattern: impl Into<Regex>) -> Self {
        self.rule_as::<str, _>(codes::STRING_PATTERN, Matches::new(pattern))
    }

    pub fn pattern_with(&self, pattern: impl Into<Regex>, message: impl Into<Message<PatternParams>>) -> Self {
        self.rule_as::<str, _>(codes::STRING_PATTERN, Matches::new(pattern).with_message(message))
    }
}
