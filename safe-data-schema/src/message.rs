// Error messages and rule parameters

use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A configurable error message: literal text, or a factory that receives the
/// parameters of the failing rule.
///
/// ```
/// use safe_data_schema::{MinParams, Message};
///
/// let fixed: Message<MinParams> = "too small".into();
/// let dynamic = Message::from_fn(|p: &MinParams| format!("at least {}", p.min));
///
/// assert_eq!(fixed.render(&MinParams { min: 3.0 }), "too small");
/// assert_eq!(dynamic.render(&MinParams { min: 3.0 }), "at least 3");
/// ```
pub enum Message<P> {
    Text(String),
    Factory(Arc<dyn Fn(&P) -> String + Send + Sync>),
}

impl<P> Message<P> {
    pub fn from_fn<F>(factory: F) -> Self
    where
        F: Fn(&P) -> String + Send + Sync + 'static,
    {
        Message::Factory(Arc::new(factory))
    }

    pub fn render(&self, params: &P) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Factory(factory) => factory(params),
        }
    }
}

impl<P> Clone for Message<P> {
    fn clone(&self) -> Self {
        match self {
            Message::Text(text) => Message::Text(text.clone()),
            Message::Factory(factory) => Message::Factory(Arc::clone(factory)),
        }
    }
}

impl<P> fmt::Debug for Message<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Message::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl<P> From<&str> for Message<P> {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl<P> From<String> for Message<P> {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

/// Render a message override, or the default when none was given.
pub(crate) fn render_or<P>(message: Option<Message<P>>, params: &P, default: impl FnOnce(&P) -> String) -> String {
    match message {
        Some(message) => message.render(params),
        None => default(params),
    }
}

// Rule parameters. They render messages and are attached to errors as details.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinParams<T = f64> {
    pub min: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxParams<T = f64> {
    pub max: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeParams<T = f64> {
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthParams {
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternParams {
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonEmptyParams {
    pub ignore_whitespace: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsParams {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParams {
    pub expected: &'static str,
    pub received: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuesParams {
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyParams {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueParams {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexParams {
    pub index: usize,
}
