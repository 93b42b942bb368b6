// Array schema

use super::{Kind, Schema, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::{Result, ValidationError};
use crate::message::{IndexParams, ItemsParams, Message};
use crate::presence::{Presence, Required};
use crate::rules::{MaxItems, MinItems};
use crate::value::Value;
use std::sync::Arc;

/// A list whose items all satisfy one schema.
pub struct ArrayKind<S> {
    items: Arc<S>,
    item_error: Option<Message<IndexParams>>,
}

pub type ArraySchema<S, P = Required> = TypeSchema<ArrayKind<S>, Vec<<S as Schema>::Output>, P>;

impl<S> ArrayKind<S> {
    pub fn new(items: S) -> Self {
        Self {
            items: Arc::new(items),
            item_error: None,
        }
    }

    fn item_failure(&self, index: usize, cause: ValidationError) -> ValidationError {
        let params = IndexParams { index };
        let message = match &self.item_error {
            Some(message) => message.render(&params),
            None => format!("Invalid array item at index {}: {}", index, cause.message),
        };
        ValidationError::new(codes::ARRAY_ITEM_INVALID, message)
            .with_params(&params)
            .with_cause(cause)
    }
}

impl<S> Clone for ArrayKind<S> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            item_error: self.item_error.clone(),
        }
    }
}

impl<S> std::fmt::Debug for ArrayKind<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayKind")
            .field("items", &std::any::type_name::<S>())
            .finish_non_exhaustive()
    }
}

impl<S> Kind for ArrayKind<S>
where
    S: Schema + 'static,
    S::Output: 'static,
{
    type Input = Vec<S::Output>;

    const NAME: &'static str = "array";
    const TYPE: &'static str = codes::ARRAY_TYPE;
    const REQUIRED: &'static str = codes::ARRAY_REQUIRED;
    const CUSTOM: &'static str = codes::ARRAY_CUSTOM;

    fn type_message(&self) -> String {
        "The value must be an array.".to_string()
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<Self::Input> {
        let Value::Array(items) = value else {
            return Err(self.type_error(value, options));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.items
                    .parse(item)
                    .map_err(|cause| self.item_failure(index, cause))
            })
            .collect()
    }
}

impl<S> TypeSchema<ArrayKind<S>, Vec<S::Output>, Required>
where
    S: Schema + 'static,
    S::Output: 'static,
{
    pub fn create(items: S) -> Self {
        Self::create_with(items, SchemaOptions::default())
    }

    pub fn create_with(items: S, options: SchemaOptions) -> Self {
        schema_of(ArrayKind::new(items), options)
    }
}

impl<S, O, P> TypeSchema<ArrayKind<S>, O, P>
where
    S: Schema + 'static,
    S::Output: 'static,
    O: 'static,
    P: Presence,
{
    /// At least `count` items.
    pub fn min_items(&self, count: usize) -> Self {
        self.rule_as::<[S::Output], _>(codes::ARRAY_MIN_ITEMS, MinItems::new(count))
    }

    pub fn min_items_with(&self, count: usize, message: impl Into<Message<ItemsParams>>) -> Self {
        self.rule_as::<[S::Output], _>(codes::ARRAY_MIN_ITEMS, MinItems::new(count).with_message(message))
    }

    /// At most `count` items.
    pub fn max_items(&self, count: usize) -> Self {
        self.rule_as::<[S::Output], _>(codes::ARRAY_MAX_ITEMS, MaxItems::new(count))
    }

    pub fn max_items_with(&self, count: usize, message: impl Into<Message<ItemsParams>>) -> Self {
        self.rule_as::<[S::Output], _>(codes::ARRAY_MAX_ITEMS, MaxItems::new(count).with_message(message))
    }

    /// Replace the message of item failures.
    pub fn item_error(&self, message: impl Into<Message<IndexParams>>) -> Self {
        let message = message.into();
        self.with_kind(|kind| kind.item_error = Some(message))
    }
}
