// Validation errors

use serde::Serialize;
use std::borrow::Cow;

/// Structured parameters attached to an error.
pub type Details = serde_json::Map<String, serde_json::Value>;

/// Error type accepted from user callbacks (`custom`, `try_map`).
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// The single failure type surfaced by every schema and rule.
///
/// `code` is a stable machine identifier, `message` is for humans, `details`
/// carries the parameters of the failing rule and `cause` the wrapped inner
/// failure when a composite schema rejected one of its members.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub code: Cow<'static, str>,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,

    #[source]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ValidationError>>,
}

impl ValidationError {
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    /// Replace the details
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Add a single detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details
            .get_or_insert_with(Details::new)
            .insert(key.into(), value.into());
        self
    }

    /// Merge the fields of a serializable parameter struct into the details.
    ///
    /// Parameters that do not serialize to a non-empty JSON object are ignored.
    pub fn with_params<P: Serialize + ?Sized>(mut self, params: &P) -> Self {
        if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(params) {
            if !map.is_empty() {
                self.details.get_or_insert_with(Details::new).extend(map);
            }
        }
        self
    }

    /// Wrap an inner failure
    pub fn with_cause(mut self, cause: ValidationError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.as_ref().and_then(|details| details.get(key))
    }

    /// This error followed by its causes, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &ValidationError> {
        std::iter::successors(Some(self), |error| error.cause.as_deref())
    }

    /// The innermost, most specific failure.
    pub fn root_cause(&self) -> &ValidationError {
        self.chain().last().unwrap_or(self)
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Normalize a callback failure.
    ///
    /// A `ValidationError` raised inside the callback propagates unchanged;
    /// anything else is wrapped under `fallback_code`.
    pub fn from_callback(error: CallbackError, fallback_code: &'static str) -> Self {
        match error.downcast::<ValidationError>() {
            Ok(error) => *error,
            Err(other) => ValidationError::new(fallback_code, other.to_string()),
        }
    }
}
