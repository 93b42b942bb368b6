// Number schema

use super::{Kind, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::Result;
use crate::format::number_to_string;
use crate::message::{MaxParams, Message, MinParams, render_or};
use crate::presence::{Presence, Required};
use crate::value::Value;

/// Finite `f64`. `NaN` and infinities are type errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberKind;

pub type NumberSchema<O = f64, P = Required> = TypeSchema<NumberKind, O, P>;

/// Numeric value of a string, with the same leniency as JavaScript's
/// `Number()`: surrounding whitespace is ignored, an empty string is zero and
/// `0x`/`0o`/`0b` prefixes select the radix. Anything else is `NaN`.
fn parse_number(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u128::from_str_radix(&s[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    match s {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')) => {
            s.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

impl Kind for NumberKind {
    type Input = f64;

    const NAME: &'static str = "number";
    const TYPE: &'static str = codes::NUMBER_TYPE;
    const REQUIRED: &'static str = codes::NUMBER_REQUIRED;
    const CUSTOM: &'static str = codes::NUMBER_CUSTOM;

    fn type_message(&self) -> String {
        "Must be a number.".to_string()
    }

    fn cast(&self, value: &Value, _options: &SchemaOptions) -> Option<Value> {
        let cast = match value {
            Value::Undefined | Value::Null => 0.0,
            Value::BigInt(n) => *n as f64,
            Value::String(s) => parse_number(s),
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Date(d) => d.timestamp_millis() as f64,
            _ => return None,
        };
        Some(Value::Number(cast))
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<f64> {
        match value {
            Value::Number(n) if n.is_finite() => Ok(*n),
            other => Err(self.type_error(other, options)),
        }
    }
}

impl TypeSchema<NumberKind, f64, Required> {
    pub fn create() -> Self {
        Self::create_with(SchemaOptions::default())
    }

    pub fn create_with(options: SchemaOptions) -> Self {
        schema_of(NumberKind, options)
    }
}

impl<O: 'static, P: Presence> TypeSchema<NumberKind, O, P> {
    /// No fractional part.
    pub fn int(&self) -> Self {
        self.int_rule(None)
    }

    pub fn int_with(&self, message: impl Into<Message<()>>) -> Self {
        self.int_rule(Some(message.into()))
    }

    /// Zero or above.
    pub fn positive(&self) -> Self {
        self.positive_rule(None)
    }

    pub fn positive_with(&self, message: impl Into<Message<()>>) -> Self {
        self.positive_rule(Some(message.into()))
    }

    /// `value >= min`
    pub fn min(&self, min: f64) -> Self {
        self.min_rule(min, None)
    }

    pub fn min_with(&self, min: f64, message: impl Into<Message<MinParams>>) -> Self {
        self.min_rule(min, Some(message.into()))
    }

    /// `value <= max`
    pub fn max(&self, max: f64) -> Self {
        self.max_rule(max, None)
    }

    pub fn max_with(&self, max: f64, message: impl Into<Message<MaxParams>>) -> Self {
        self.max_rule(max, Some(message.into()))
    }

    /// `value > min`
    pub fn greater_than(&self, min: f64) -> Self {
        self.greater_than_rule(min, None)
    }

    pub fn greater_than_with(&self, min: f64, message: impl Into<Message<MinParams>>) -> Self {
        self.greater_than_rule(min, Some(message.into()))
    }

    /// `value < max`
    pub fn less_than(&self, max: f64) -> Self {
        self.less_than_rule(max, None)
    }

    pub fn less_than_with(&self, max: f64, message: impl Into<Message<MaxParams>>) -> Self {
        self.less_than_rule(max, Some(message.into()))
    }

    fn int_rule(&self, message: Option<Message<()>>) -> Self {
        let message = render_or(message, &(), |_| "Must be an integer.".to_string());
        self.guard(codes::NUMBER_INT, message, (), |value: &f64| value.fract() == 0.0)
    }

    fn positive_rule(&self, message: Option<Message<()>>) -> Self {
        let message = render_or(message, &(), |_| "Must be a positive number.".to_string());
        self.guard(codes::NUMBER_POSITIVE, message, (), |value: &f64| *value >= 0.0)
    }

    fn min_rule(&self, min: f64, message: Option<Message<MinParams>>) -> Self {
        let params = MinParams { min };
        let message = render_or(message, &params, |p| {
            format!("The number must be greater than or equal to {}.", number_to_string(p.min))
        });
        self.guard(codes::NUMBER_MIN, message, params, move |value: &f64| *value >= min)
    }

    fn max_rule(&self, max: f64, message: Option<Message<MaxParams>>) -> Self {
        let params = MaxParams { max };
        let message = render_or(message, &params, |p| {
            format!("The number must be less than or equal to {}.", number_to_string(p.max))
        });
        self.guard(codes::NUMBER_MAX, message, params, move |value: &f64| *value <= max)
    }

    fn greater_than_rule(&self, min: f64, message: Option<Message<MinParams>>) -> Self {
        let params = MinParams { min };
        let message = render_or(message, &params, |p| {
            format!("The value must be greater than {}.", number_to_string(p.min))
        });
        self.guard(codes::NUMBER_GREATER_THAN, message, params, move |value: &f64| *value > min)
    }

    fn less_than_rule(&self, max: f64, message: Option<Message<MaxParams>>) -> Self {
        let params = MaxParams { max };
        let message = render_or(message, &params, |p| {
            format!("The value must be less than {}.", number_to_string(p.max))
        });
        self.guard(codes::NUMBER_LESS_THAN, message, params, move |value: &f64| *value < max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn cast_schema() -> NumberSchema {
        NumberSchema::create_with(SchemaOptions::new().with_cast(true))
    }

    #[test]
    fn test_rejects_non_finite_and_non_numbers() {
        let schema = NumberSchema::create();
        assert_eq!(schema.parse(&Value::from(-3.25)), Ok(-3.25));

        for value in [
            Value::from(f64::NAN),
            Value::from(f64::INFINITY),
            Value::from(f64::NEG_INFINITY),
            Value::from("1"),
            Value::bigint(1),
            Value::from(true),
        ] {
            let error = schema.parse(&value).unwrap_err();
            assert_eq!(error.code(), codes::NUMBER_TYPE, "{}", value);
            assert_eq!(error.message, "Must be a number.");
        }
    }

    #[test]
    fn test_cast() {
        let schema = cast_schema();
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let cases = [
            (Value::Null, 0.0),
            (Value::Undefined, 0.0),
            (Value::bigint(12), 12.0),
            (Value::from("12"), 12.0),
            (Value::from("12.5"), 12.5),
            (Value::from(" 7 "), 7.0),
            (Value::from(""), 0.0),
            (Value::from("0x1F"), 31.0),
            (Value::from("0b101"), 5.0),
            (Value::from("1e3"), 1000.0),
            (Value::from(true), 1.0),
            (Value::from(false), 0.0),
            (Value::date(date), date.timestamp_millis() as f64),
        ];
        for (input, expected) in cases {
            assert_eq!(schema.parse(&input), Ok(expected), "{}", input);
        }
    }

    #[test]
    fn test_cast_failures_are_type_errors() {
        let schema = cast_schema();
        for input in ["abc", "12px", "Infinity", "nan", "inf", "0xZZ", "1_000"] {
            assert_eq!(
                schema.parse(&Value::from(input)).unwrap_err().code(),
                codes::NUMBER_TYPE,
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_cast_is_identity_on_numbers() {
        assert_eq!(cast_schema().parse(&Value::from(5)), Ok(5.0));
    }

    #[test]
    fn test_int() {
        let schema = NumberSchema::create().int();
        assert_eq!(schema.parse(&Value::from(10)), Ok(10.0));
        assert_eq!(schema.parse(&Value::from(10.5)).unwrap_err().code(), codes::NUMBER_INT);
        assert_eq!(
            NumberSchema::create().int_with("integer required").parse(&Value::from(0.1)).unwrap_err().message,
            "integer required"
        );
    }

    #[test]
    fn test_positive_accepts_zero() {
        let schema = NumberSchema::create().positive();
        assert_eq!(schema.parse(&Value::from(0)), Ok(0.0));
        let error = schema.parse(&Value::from(-1)).unwrap_err();
        assert_eq!(error.code(), codes::NUMBER_POSITIVE);
        assert_eq!(error.message, "Must be a positive number.");
    }

    #[test]
    fn test_min_max() {
        let schema = NumberSchema::create().min(10.0).max(20.0);
        assert!(schema.is_valid(&Value::from(10)));
        assert!(schema.is_valid(&Value::from(20)));

        let error = schema.parse(&Value::from(5)).unwrap_err();
        assert_eq!(error.code(), codes::NUMBER_MIN);
        assert_eq!(error.message, "The number must be greater than or equal to 10.");
        assert_eq!(error.detail("min"), Some(&json!(10.0)));

        let error = schema.parse(&Value::from(21)).unwrap_err();
        assert_eq!(error.code(), codes::NUMBER_MAX);
        assert_eq!(error.message, "The number must be less than or equal to 20.");
    }

    #[test]
    fn test_exclusive_bounds_have_their_own_codes() {
        let schema = NumberSchema::create().greater_than(10.0).less_than(20.0);
        assert_eq!(schema.parse(&Value::from(15)), Ok(15.0));

        let error = schema.parse(&Value::from(10)).unwrap_err();
        assert_eq!(error.code(), codes::NUMBER_GREATER_THAN);
        assert_eq!(error.message, "The value must be greater than 10.");

        let error = schema.parse(&Value::from(20)).unwrap_err();
        assert_eq!(error.code(), codes::NUMBER_LESS_THAN);
        assert_eq!(error.message, "The value must be less than 20.");
    }

    #[test]
    fn test_message_factories() {
        let schema = NumberSchema::create()
            .min_with(10.0, Message::from_fn(|p: &MinParams| format!("at least {}", p.min)))
            .max_with(20.0, "too big");
        assert_eq!(schema.parse(&Value::from(1)).unwrap_err().message, "at least 10");
        assert_eq!(schema.parse(&Value::from(30)).unwrap_err().message, "too big");
    }

    #[test]
    fn test_rule_replacement_keeps_latest_bound() {
        let schema = NumberSchema::create().min(1.0).max(100.0).min(10.0);
        assert_eq!(schema.rule_codes(), vec![codes::NUMBER_MIN, codes::NUMBER_MAX]);
        assert_eq!(schema.parse(&Value::from(5)).unwrap_err().code(), codes::NUMBER_MIN);
        assert_eq!(
            schema.parse(&Value::from(5)).unwrap_err().message,
            "The number must be greater than or equal to 10."
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let schema = NumberSchema::create().int().positive();
        assert_eq!(schema.parse(&Value::from(-1.5)).unwrap_err().code(), codes::NUMBER_INT);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("  42  "), 42.0);
        assert_eq!(parse_number("-0.5"), -0.5);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("0o17"), 15.0);
        assert!(parse_number("infinity").is_nan());
        assert!(parse_number("1,5").is_nan());
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    }
}
