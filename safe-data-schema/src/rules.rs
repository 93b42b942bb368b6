// Standalone validation rules

use crate::codes::rule as codes;
use crate::errors::{Result, ValidationError};
use crate::format::format_value;
use crate::message::{
    ItemsParams, LengthParams, MaxParams, Message, MinParams, NonEmptyParams, PatternParams,
    RangeParams, TypeParams,
};
use crate::patterns::Pattern;
use crate::value::Value;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt::Display;

/// A reusable check on an already type-checked value.
///
/// Any rule can be attached to a schema with `.rule(...)`; it is stored under
/// its [`code`](Rule::code), so attaching a second rule of the same kind
/// replaces the first one.
pub trait Rule<T: ?Sized>: Send + Sync + 'static {
    fn code(&self) -> &'static str;

    fn check(&self, value: &T) -> Result<()>;
}

fn fail<P: Serialize>(code: &'static str, message: &str, params: &P) -> ValidationError {
    ValidationError::new(code, message).with_params(params)
}

/// Rejects `undefined` and `null`.
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Required {
    pub fn new() -> Self {
        Self {
            message: "The value is required.".to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<()>>) -> Self {
        self.message = message.into().render(&());
        self
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule<Value> for Required {
    fn code(&self) -> &'static str {
        codes::REQUIRED
    }

    fn check(&self, value: &Value) -> Result<()> {
        if value.is_absent() {
            Err(ValidationError::new(codes::REQUIRED, self.message.clone()))
        } else {
            Ok(())
        }
    }
}

/// Requires a given runtime type name (see [`Value::type_name`]).
#[derive(Debug, Clone)]
pub struct TypeOf {
    expected: &'static str,
    message: Option<Message<TypeParams>>,
}

impl TypeOf {
    pub fn new(expected: &'static str) -> Self {
        Self {
            expected,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<TypeParams>>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule<Value> for TypeOf {
    fn code(&self) -> &'static str {
        codes::INVALID_TYPE
    }

    fn check(&self, value: &Value) -> Result<()> {
        let received = value.type_name();
        if received == self.expected {
            return Ok(());
        }
        let params = TypeParams {
            expected: self.expected,
            received,
        };
        let message = match &self.message {
            Some(message) => message.render(&params),
            None => format!("Expected {}, received {}.", self.expected, received),
        };
        Err(fail(codes::INVALID_TYPE, &message, &params))
    }
}

/// Rejects empty strings, and optionally whitespace-only strings.
#[derive(Debug, Clone)]
pub struct NonEmpty {
    ignore_whitespace: bool,
    message: String,
}

impl NonEmpty {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Treat whitespace-only strings as empty
    pub fn ignoring_whitespace() -> Self {
        Self::build(true)
    }

    fn build(ignore_whitespace: bool) -> Self {
        let message = if ignore_whitespace {
            "The value must be a non-empty string and contain not only whitespace characters."
        } else {
            "The value must be a non-empty string."
        };
        Self {
            ignore_whitespace,
            message: message.to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<NonEmptyParams>>) -> Self {
        self.message = message.into().render(&self.params());
        self
    }

    fn params(&self) -> NonEmptyParams {
        NonEmptyParams {
            ignore_whitespace: self.ignore_whitespace,
        }
    }
}

impl Default for NonEmpty {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule<str> for NonEmpty {
    fn code(&self) -> &'static str {
        codes::EMPTY_STRING
    }

    fn check(&self, value: &str) -> Result<()> {
        let checked = if self.ignore_whitespace { value.trim() } else { value };
        if checked.is_empty() {
            Err(fail(codes::EMPTY_STRING, &self.message, &self.params()))
        } else {
            Ok(())
        }
    }
}

/// Minimum string length, in characters
#[derive(Debug, Clone)]
pub struct MinLength {
    length: usize,
    message: String,
}

impl MinLength {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            message: format!("The value must contain at least {} characters.", length),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<LengthParams>>) -> Self {
        self.message = message.into().render(&LengthParams { length: self.length });
        self
    }
}

impl Rule<str> for MinLength {
    fn code(&self) -> &'static str {
        codes::STRING_TOO_SHORT
    }

    fn check(&self, value: &str) -> Result<()> {
        if value.chars().count() < self.length {
            Err(fail(codes::STRING_TOO_SHORT, &self.message, &LengthParams { length: self.length }))
        } else {
            Ok(())
        }
    }
}

/// Maximum string length, in characters
#[derive(Debug, Clone)]
pub struct MaxLength {
    length: usize,
    message: String,
}

impl MaxLength {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            message: format!("The value must contain at most {} characters.", length),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<LengthParams>>) -> Self {
        self.message = message.into().render(&LengthParams { length: self.length });
        self
    }
}

impl Rule<str> for MaxLength {
    fn code(&self) -> &'static str {
        codes::STRING_TOO_LONG
    }

    fn check(&self, value: &str) -> Result<()> {
        if value.chars().count() > self.length {
            Err(fail(codes::STRING_TOO_LONG, &self.message, &LengthParams { length: self.length }))
        } else {
            Ok(())
        }
    }
}

/// Requires a match of a regular expression or a catalog [`Pattern`].
#[derive(Debug, Clone)]
pub struct Matches {
    regex: Regex,
    message: String,
}

impl Matches {
    pub fn new(pattern: impl Into<Regex>) -> Self {
        Self {
            regex: pattern.into(),
            message: "The value does not match the required pattern.".to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<PatternParams>>) -> Self {
        self.message = message.into().render(&self.params());
        self
    }

    fn params(&self) -> PatternParams {
        PatternParams {
            pattern: self.regex.as_str().to_string(),
        }
    }
}

impl Rule<str> for Matches {
    fn code(&self) -> &'static str {
        codes::STRING_PATTERN
    }

    fn check(&self, value: &str) -> Result<()> {
        if self.regex.is_match(value) {
            Ok(())
        } else {
            Err(fail(codes::STRING_PATTERN, &self.message, &self.params()))
        }
    }
}

macro_rules! pattern_rule {
    ($(#[$doc:meta])* $name:ident, $pattern:expr, $code:expr, $default:literal, $calendar:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            message: String,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    message: $default.to_string(),
                }
            }

            pub fn with_message(mut self, message: impl Into<Message<()>>) -> Self {
                self.message = message.into().render(&());
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Rule<str> for $name {
            fn code(&self) -> &'static str {
                $code
            }

            fn check(&self, value: &str) -> Result<()> {
                let calendar: fn(&str) -> bool = $calendar;
                if $pattern.is_match(value) && calendar(value) {
                    Ok(())
                } else {
                    Err(ValidationError::new($code, self.message.clone()))
                }
            }
        }
    };
}

// Day-of-month validity; the pattern only bounds days to 01-31.
fn is_calendar_date(value: &str) -> bool {
    value
        .get(..10)
        .is_some_and(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok())
}

pattern_rule!(
    /// A decimal number written as a string, e.g. `"-12.5"`
    NumericString,
    Pattern::Float,
    codes::INVALID_NUMERIC_STRING,
    "The value must be a numeric string.",
    |_| true
);

pattern_rule!(
    /// `YYYY-MM-DD` naming a real calendar day
    IsoDate,
    Pattern::DateIso,
    codes::INVALID_ISO_DATE,
    "The value must be a valid ISO date.",
    is_calendar_date
);

pattern_rule!(
    IsoTime,
    Pattern::TimeIso,
    codes::INVALID_ISO_TIME,
    "The value must be a valid ISO time.",
    |_| true
);

pattern_rule!(
    IsoDateTime,
    Pattern::DateTimeIso,
    codes::INVALID_ISO_DATETIME,
    "The value must be a valid ISO date-time.",
    is_calendar_date
);

/// Inclusive lower bound
#[derive(Debug, Clone)]
pub struct Min<T = f64> {
    min: T,
    message: String,
}

impl<T: Copy + Display + Serialize> Min<T> {
    pub fn new(min: T) -> Self {
        Self {
            min,
            message: format!("The value must be greater than or equal to {}.", min),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<MinParams<T>>>) -> Self {
        self.message = message.into().render(&MinParams { min: self.min });
        self
    }
}

impl<T> Rule<T> for Min<T>
where
    T: PartialOrd + Copy + Serialize + Send + Sync + 'static,
{
    fn code(&self) -> &'static str {
        codes::TOO_SMALL
    }

    fn check(&self, value: &T) -> Result<()> {
        if *value < self.min {
            Err(fail(codes::TOO_SMALL, &self.message, &MinParams { min: self.min }))
        } else {
            Ok(())
        }
    }
}

/// Inclusive upper bound
#[derive(Debug, Clone)]
pub struct Max<T = f64> {
    max: T,
    message: String,
}

impl<T: Copy + Display + Serialize> Max<T> {
    pub fn new(max: T) -> Self {
        Self {
            max,
            message: format!("The value must be less than or equal to {}.", max),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<MaxParams<T>>>) -> Self {
        self.message = message.into().render(&MaxParams { max: self.max });
        self
    }
}

impl<T> Rule<T> for Max<T>
where
    T: PartialOrd + Copy + Serialize + Send + Sync + 'static,
{
    fn code(&self) -> &'static str {
        codes::TOO_BIG
    }

    fn check(&self, value: &T) -> Result<()> {
        if *value > self.max {
            Err(fail(codes::TOO_BIG, &self.message, &MaxParams { max: self.max }))
        } else {
            Ok(())
        }
    }
}

/// Inclusive range
#[derive(Debug, Clone)]
pub struct Range<T = f64> {
    min: T,
    max: T,
    message: String,
}

impl<T: Copy + Display + Serialize> Range<T> {
    pub fn new(min: T, max: T) -> Self {
        Self {
            min,
            max,
            message: format!("The value must be between {} and {}.", min, max),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<RangeParams<T>>>) -> Self {
        self.message = message.into().render(&self.params());
        self
    }

    fn params(&self) -> RangeParams<T> {
        RangeParams {
            min: self.min,
            max: self.max,
        }
    }
}

impl<T> Rule<T> for Range<T>
where
    T: PartialOrd + Copy + Display + Serialize + Send + Sync + 'static,
{
    fn code(&self) -> &'static str {
        codes::OUT_OF_RANGE
    }

    fn check(&self, value: &T) -> Result<()> {
        if *value < self.min || *value > self.max {
            Err(fail(codes::OUT_OF_RANGE, &self.message, &self.params()))
        } else {
            Ok(())
        }
    }
}

/// Rejects numbers with a fractional part.
#[derive(Debug, Clone)]
pub struct Integer {
    message: String,
}

impl Integer {
    pub fn new() -> Self {
        Self {
            message: "The value must be an integer.".to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<()>>) -> Self {
        self.message = message.into().render(&());
        self
    }
}

impl Default for Integer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule<f64> for Integer {
    fn code(&self) -> &'static str {
        codes::NOT_INTEGER
    }

    fn check(&self, value: &f64) -> Result<()> {
        if value.is_finite() && value.fract() == 0.0 {
            Ok(())
        } else {
            Err(ValidationError::new(codes::NOT_INTEGER, self.message.clone())
                .with_detail("value", format_value(&Value::Number(*value))))
        }
    }
}

/// Minimum number of array items
#[derive(Debug, Clone)]
pub struct MinItems {
    count: usize,
    message: String,
}

impl MinItems {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            message: format!("The array must contain at least {} items.", count),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<ItemsParams>>) -> Self {
        self.message = message.into().render(&ItemsParams { count: self.count });
        self
    }
}

impl<T: 'static> Rule<[T]> for MinItems {
    fn code(&self) -> &'static str {
        codes::TOO_FEW_ITEMS
    }

    fn check(&self, items: &[T]) -> Result<()> {
        if items.len() < self.count {
            Err(fail(codes::TOO_FEW_ITEMS, &self.message, &ItemsParams { count: self.count }))
        } else {
            Ok(())
        }
    }
}

/// Maximum number of array items
#[derive(Debug, Clone)]
pub struct MaxItems {
    count: usize,
    message: String,
}

impl MaxItems {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            message: format!("The array must contain at most {} items.", count),
        }
    }

    pub fn with_message(mut self, message: impl Into<Message<ItemsParams>>) -> Self {
        self.message = message.into().render(&ItemsParams { count: self.count });
        self
    }
}

impl<T: 'static> Rule<[T]> for MaxItems {
    fn code(&self) -> &'static str {
        codes::TOO_MANY_ITEMS
    }

    fn check(&self, items: &[T]) -> Result<()> {
        if items.len() > self.count {
            Err(fail(codes::TOO_MANY_ITEMS, &self.message, &ItemsParams { count: self.count }))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required() {
        let rule = Required::new();
        assert!(rule.check(&Value::from(0)).is_ok());
        assert_eq!(rule.check(&Value::Null).unwrap_err().code(), codes::REQUIRED);
        assert_eq!(
            Required::new().with_message("need it").check(&Value::Undefined).unwrap_err().message,
            "need it"
        );
    }

    #[test]
    fn test_type_of() {
        let rule = TypeOf::new("string");
        assert!(rule.check(&Value::from("x")).is_ok());

        let error = rule.check(&Value::from(1)).unwrap_err();
        assert_eq!(error.code(), codes::INVALID_TYPE);
        assert_eq!(error.message, "Expected string, received number.");
        assert_eq!(error.detail("received"), Some(&json!("number")));
    }

    #[test]
    fn test_non_empty() {
        assert!(NonEmpty::new().check(" ").is_ok());
        assert!(NonEmpty::new().check("").is_err());

        let error = NonEmpty::ignoring_whitespace().check("  \t").unwrap_err();
        assert_eq!(error.code(), codes::EMPTY_STRING);
        assert_eq!(
            error.message,
            "The value must be a non-empty string and contain not only whitespace characters."
        );
        assert_eq!(error.detail("ignoreWhitespace"), Some(&json!(true)));
    }

    #[test]
    fn test_lengths_count_characters() {
        assert!(MinLength::new(3).check("äöü").is_ok());
        assert!(MaxLength::new(3).check("äöü").is_ok());

        let error = MinLength::new(4).check("äöü").unwrap_err();
        assert_eq!(error.code(), codes::STRING_TOO_SHORT);
        assert_eq!(error.detail("length"), Some(&json!(4)));
        assert_eq!(MaxLength::new(2).check("abc").unwrap_err().code(), codes::STRING_TOO_LONG);
    }

    #[test]
    fn test_length_message_factory() {
        let rule = MinLength::new(8)
            .with_message(Message::from_fn(|p: &LengthParams| format!("need {} chars", p.length)));
        assert_eq!(rule.check("short").unwrap_err().message, "need 8 chars");
    }

    #[test]
    fn test_matches_regex_and_pattern() {
        let custom = Matches::new(Regex::new("^a+$").unwrap());
        assert!(custom.check("aaa").is_ok());
        assert_eq!(custom.check("b").unwrap_err().detail("pattern"), Some(&json!("^a+$")));

        assert!(Matches::new(Pattern::Email).check("a@a.ac").is_ok());
        assert!(Matches::new(Pattern::Email).check("a@a").is_err());
    }

    #[test]
    fn test_iso_rules_check_calendar() {
        assert!(IsoDate::new().check("2024-02-29").is_ok());
        assert!(IsoDate::new().check("2023-02-29").is_err());
        assert!(IsoDate::new().check("2023-04-31").is_err());
        assert!(IsoTime::new().check("23:59:59.999Z").is_ok());
        assert!(IsoDateTime::new().check("2024-02-29T10:00").is_ok());
        assert_eq!(
            IsoDateTime::new().check("2023-02-30 10:00").unwrap_err().code(),
            codes::INVALID_ISO_DATETIME
        );
    }

    #[test]
    fn test_numeric_string() {
        assert!(NumericString::new().check("-12.5").is_ok());
        assert!(NumericString::new().check("12e3").is_err());
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(Min::new(10.0).check(&10.0).is_ok());
        let error = Min::new(10.0).check(&9.5).unwrap_err();
        assert_eq!(error.code(), codes::TOO_SMALL);
        assert_eq!(error.message, "The value must be greater than or equal to 10.");
        assert_eq!(error.detail("min"), Some(&json!(10.0)));

        assert!(Max::new(3_i64).check(&4).is_err());
        assert!(Range::new(1.0, 2.0).check(&1.5).is_ok());
        assert_eq!(Range::new(1.0, 2.0).check(&2.5).unwrap_err().code(), codes::OUT_OF_RANGE);
    }

    #[test]
    fn test_integer() {
        assert!(Integer::new().check(&3.0).is_ok());
        assert!(Integer::new().check(&3.5).is_err());
        assert!(Integer::new().check(&f64::INFINITY).is_err());
    }

    #[test]
    fn test_item_counts() {
        let items = vec![1, 2, 3];
        assert!(MinItems::new(3).check(items.as_slice()).is_ok());
        assert_eq!(MaxItems::new(2).check(items.as_slice()).unwrap_err().code(), codes::TOO_MANY_ITEMS);
        assert_eq!(MinItems::new(4).check(items.as_slice()).unwrap_err().detail("count"), Some(&json!(4)));
    }
}
