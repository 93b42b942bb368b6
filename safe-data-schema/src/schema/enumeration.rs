// Enum schema

use super::{Kind, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::{Result, ValidationError};
use crate::format::format_values;
use crate::message::ValuesParams;
use crate::presence::Required;
use crate::value::Value;
use std::sync::Arc;

/// One of a fixed list of values. The output is the matching list entry.
pub struct EnumKind<T> {
    values: Arc<[T]>,
    keys: Arc<[Value]>,
}

pub type EnumSchema<T, O = T, P = Required> = TypeSchema<EnumKind<T>, O, P>;

impl<T: Clone + Into<Value>> EnumKind<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        let keys: Vec<Value> = values.iter().cloned().map(Into::into).collect();
        Self {
            values: values.into(),
            keys: keys.into(),
        }
    }
}

impl<T> EnumKind<T> {
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Clone for EnumKind<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<T> std::fmt::Debug for EnumKind<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumKind").field("values", &self.keys).finish()
    }
}

impl<T> Kind for EnumKind<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Input = T;

    const NAME: &'static str = "enum";
    const TYPE: &'static str = codes::ENUM_TYPE;
    const REQUIRED: &'static str = codes::ENUM_REQUIRED;
    const CUSTOM: &'static str = codes::ENUM_CUSTOM;

    fn type_message(&self) -> String {
        format!("Must be one of {}", format_values(&self.keys))
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<T> {
        self.keys
            .iter()
            .position(|key| key == value)
            .map(|index| self.values[index].clone())
            .ok_or_else(|| self.type_error(value, options))
    }

    fn type_error(&self, _value: &Value, options: &SchemaOptions) -> ValidationError {
        let message = options
            .type_error
            .clone()
            .unwrap_or_else(|| self.type_message());
        ValidationError::new(codes::ENUM_TYPE, message).with_params(&ValuesParams {
            values: self.keys.to_vec(),
        })
    }
}

impl<T> TypeSchema<EnumKind<T>, T, Required>
where
    T: Clone + Into<Value> + Send + Sync + 'static,
{
    pub fn create(values: impl IntoIterator<Item = T>) -> Self {
        Self::create_with(values, SchemaOptions::default())
    }

    pub fn create_with(values: impl IntoIterator<Item = T>, options: SchemaOptions) -> Self {
        schema_of(EnumKind::new(values), options)
    }
}
