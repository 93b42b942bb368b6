// Instance schema

use super::{Kind, SchemaOptions, TypeSchema, schema_of};
use crate::codes;
use crate::errors::Result;
use crate::presence::Required;
use crate::value::Value;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// A host object of concrete type `T`, carried as [`Value::Instance`].
pub struct InstanceKind<T> {
    marker: PhantomData<fn() -> T>,
}

pub type InstanceSchema<T, O = Arc<T>, P = Required> = TypeSchema<InstanceKind<T>, O, P>;

impl<T> InstanceKind<T> {
    pub fn new() -> Self {
        Self { marker: PhantomData }
    }
}

impl<T> Default for InstanceKind<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InstanceKind<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for InstanceKind<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstanceKind<{}>", std::any::type_name::<T>())
    }
}

impl<T: Any + Send + Sync> Kind for InstanceKind<T> {
    type Input = Arc<T>;

    const NAME: &'static str = "instance";
    const TYPE: &'static str = codes::INSTANCE_TYPE;
    const REQUIRED: &'static str = codes::INSTANCE_REQUIRED;
    const CUSTOM: &'static str = codes::INSTANCE_CUSTOM;

    fn type_message(&self) -> String {
        format!("The value must be an instance of {}.", short_name::<T>())
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<Arc<T>> {
        value
            .as_instance()
            .and_then(|instance| instance.downcast::<T>())
            .ok_or_else(|| self.type_error(value, options))
    }
}

/// Type name without its module path.
fn short_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    let base = name.split('<').next().unwrap_or(name);
    match base.rfind("::") {
        Some(index) => &name[index + 2..],
        None => name,
    }
}

impl<T: Any + Send + Sync> TypeSchema<InstanceKind<T>, Arc<T>, Required> {
    pub fn create() -> Self {
        Self::create_with(SchemaOptions::default())
    }

    pub fn create_with(options: SchemaOptions) -> Self {
        schema_of(InstanceKind::new(), options)
    }
}
