// Named pattern catalog

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const DATE: &str = r"[0-9]{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01])";

const TIME: &str = r"(?:[01][0-9]|2[0-3]):[0-5][0-9](?::[0-5][0-9](?:\.[0-9]{1,3})?)?(?:Z|[+-](?:[01][0-9]|2[0-3])(?::[0-5][0-9])?)?";

static ALPHANUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static POSITIVE_INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

static FLOAT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(?:\.[0-9]+)?$").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$").unwrap()
});

static DATE_ISO_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{}$", DATE)).unwrap());

static TIME_ISO_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{}$", TIME)).unwrap());

static DATE_TIME_ISO_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{}[T ]{}$", DATE, TIME)).unwrap());

/// A named regular expression from the built-in catalog.
///
/// Any pattern converts into a [`Regex`], so it can be used wherever a string
/// schema or rule accepts one:
///
/// ```
/// use safe_data_schema::{Pattern, StringSchema, Value};
///
/// let schema = StringSchema::create().pattern(Pattern::Email);
/// assert!(schema.is_valid(&Value::from("john@example.com")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// ASCII letters and digits
    Alphanumeric,
    /// Unsigned decimal digits, leading zeros allowed
    PositiveInteger,
    /// Optionally signed decimal digits
    Integer,
    /// Optionally signed decimal with an optional fraction, no exponent
    Float,
    Email,
    /// `YYYY-MM-DD`
    DateIso,
    /// `HH:MM[:SS[.fff]]` with an optional `Z` or `+HH[:MM]` zone
    TimeIso,
    /// Date and time separated by `T` or a space
    DateTimeIso,
}

impl Pattern {
    pub fn regex(&self) -> &'static Regex {
        match self {
            Pattern::Alphanumeric => &ALPHANUMERIC_REGEX,
            Pattern::PositiveInteger => &POSITIVE_INTEGER_REGEX,
            Pattern::Integer => &INTEGER_REGEX,
            Pattern::Float => &FLOAT_REGEX,
            Pattern::Email => &EMAIL_REGEX,
            Pattern::DateIso => &DATE_ISO_REGEX,
            Pattern::TimeIso => &TIME_ISO_REGEX,
            Pattern::DateTimeIso => &DATE_TIME_ISO_REGEX,
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Alphanumeric => "alphanumeric",
            Pattern::PositiveInteger => "positiveInteger",
            Pattern::Integer => "integer",
            Pattern::Float => "float",
            Pattern::Email => "email",
            Pattern::DateIso => "dateISO",
            Pattern::TimeIso => "timeISO",
            Pattern::DateTimeIso => "dateTimeISO",
        }
    }

    /// Look a pattern up by its catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.name() == name)
    }

    pub fn all() -> &'static [Pattern] {
        &[
            Pattern::Alphanumeric,
            Pattern::PositiveInteger,
            Pattern::Integer,
            Pattern::Float,
            Pattern::Email,
            Pattern::DateIso,
            Pattern::TimeIso,
            Pattern::DateTimeIso,
        ]
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Pattern> for Regex {
    fn from(pattern: Pattern) -> Self {
        pattern.regex().clone()
    }
}
