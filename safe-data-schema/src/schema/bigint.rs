// BigInt schema

use super::{Kind, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::Result;
use crate::message::{MaxParams, Message, MinParams, render_or};
use crate::presence::{Presence, Required};
use crate::value::Value;

// 2^127; integral floats at or beyond it do not fit an i128.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Arbitrary-size integers, represented as `i128`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntKind;

pub type BigIntSchema<O = i128, P = Required> = TypeSchema<BigIntKind, O, P>;

impl Kind for BigIntKind {
    type Input = i128;

    const NAME: &'static str = "bigint";
    const TYPE: &'static str = codes::BIGINT_TYPE;
    const REQUIRED: &'static str = codes::BIGINT_REQUIRED;
    const CUSTOM: &'static str = codes::BIGINT_CUSTOM;

    fn type_message(&self) -> String {
        "The value must be a bigint.".to_string()
    }

    fn cast(&self, value: &Value, _options: &SchemaOptions) -> Option<Value> {
        let cast = match value {
            Value::Undefined | Value::Null => 0,
            Value::Bool(b) => i128::from(*b),
            Value::Number(n) if n.fract() == 0.0 && (-I128_BOUND..I128_BOUND).contains(n) => *n as i128,
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() { 0 } else { s.parse().ok()? }
            }
            _ => return None,
        };
        Some(Value::BigInt(cast))
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<i128> {
        match value {
            Value::BigInt(n) => Ok(*n),
            other => Err(self.type_error(other, options)),
        }
    }
}

impl TypeSchema<BigIntKind, i128, Required> {
    pub fn create() -> Self {
        Self::create_with(SchemaOptions::default())
    }

    pub fn create_with(options: SchemaOptions) -> Self {
        schema_of(BigIntKind, options)
    }
}

impl<O: 'static, P: Presence> TypeSchema<BigIntKind, O, P> {
    /// Zero or above.
    pub fn positive(&self) -> Self {
        self.positive_rule(None)
    }

    pub fn positive_with(&self, message: impl Into<Message<()>>) -> Self {
        self.positive_rule(Some(message.into()))
    }

    pub fn min(&self, min: i128) -> Self {
        self.min_rule(min, None)
    }

    pub fn min_with(&self, min: i128, message: impl Into<Message<MinParams<Value>>>) -> Self {
        self.min_rule(min, Some(message.into()))
    }

    pub fn max(&self, max: i128) -> Self {
        self.max_rule(max, None)
    }

    pub fn max_with(&self, max: i128, message: impl Into<Message<MaxParams<Value>>>) -> Self {
        self.max_rule(max, Some(message.into()))
    }

    fn positive_rule(&self, message: Option<Message<()>>) -> Self {
        let message = render_or(message, &(), |_| "Must be a positive bigint.".to_string());
        self.guard(codes::BIGINT_POSITIVE, message, (), |value: &i128| *value >= 0)
    }

    // Bounds go through `Value` so details beyond the safe integer range
    // serialize as strings.
    fn min_rule(&self, min: i128, message: Option<Message<MinParams<Value>>>) -> Self {
        let params = MinParams { min: Value::BigInt(min) };
        let message = render_or(message, &params, |_| {
            format!("The bigint must be greater than or equal to {}.", min)
        });
        self.guard(codes::BIGINT_MIN, message, params, move |value: &i128| *value >= min)
    }

    fn max_rule(&self, max: i128, message: Option<Message<MaxParams<Value>>>) -> Self {
        let params = MaxParams { max: Value::BigInt(max) };
        let message = render_or(message, &params, |_| {
            format!("The bigint must be less than or equal to {}.", max)
        });
        self.guard(codes::BIGINT_MAX, message, params, move |value: &i128| *value <= max)
    }
}
