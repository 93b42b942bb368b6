//! Schemas
//!
//! Every schema is a [`TypeSchema`]: a [`Kind`] (what type is expected and how
//! it is cast and checked) combined with the configuration shared by all
//! kinds. That is the options, a presence marker, the validator pipeline and
//! the mapper.
//! Configuration methods take `&self` and return a new schema; nothing is
//! ever mutated after construction.
//!
//! `parse` always runs the same steps in the same order:
//!
//! 1. cast (only with `SchemaOptions::cast`)
//! 2. presence: accepted absent values short-circuit, others are `*_REQUIRED`
//! 3. the kind's type check (and member parsing for composites)
//! 4. validators, in insertion order, stopping at the first failure
//! 5. the mapper

mod array;
mod bigint;
mod boolean;
mod enumeration;
mod instance;
mod number;
mod object;
mod shape;
mod string;
mod union;

pub use array::{ArrayKind, ArraySchema};
pub use bigint::{BigIntKind, BigIntSchema};
pub use boolean::{BooleanKind, BooleanSchema};
pub use enumeration::{EnumKind, EnumSchema};
pub use instance::{InstanceKind, InstanceSchema};
pub use number::{NumberKind, NumberSchema};
pub use object::{ObjectKind, ObjectSchema};
pub use shape::{ShapeKind, ShapeSchema};
pub use string::{StringKind, StringSchema};
pub use union::{UnionKind, UnionSchema};

use crate::codes;
use crate::errors::{CallbackError, Result, ValidationError};
use crate::message::TypeParams;
use crate::pipeline::Pipeline;
use crate::presence::{Nullish, Presence, Required};
use crate::rules::Rule;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::marker::PhantomData;
use std::sync::Arc;

const REQUIRED_MESSAGE: &str = "The value is required.";

/// Anything that turns an untrusted [`Value`] into a typed output.
pub trait Schema: Send + Sync {
    type Output;

    fn parse(&self, value: &Value) -> Result<Self::Output>;

    fn is_valid(&self, value: &Value) -> bool {
        self.parse(value).is_ok()
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    type Output = S::Output;

    fn parse(&self, value: &Value) -> Result<Self::Output> {
        (**self).parse(value)
    }
}

/// Type-erased, shareable schema.
pub type BoxedSchema<O> = Arc<dyn Schema<Output = O>>;

pub trait SchemaExt: Schema + Sized + 'static {
    fn boxed(self) -> BoxedSchema<Self::Output> {
        Arc::new(self)
    }
}

impl<S: Schema + 'static> SchemaExt for S {}

/// Construction options shared by all kinds.
///
/// Deserializable, so schemas can be configured from data:
///
/// ```
/// use safe_data_schema::SchemaOptions;
///
/// let options: SchemaOptions = serde_json::from_str(r#"{"cast": true, "typeError": "bad"}"#).unwrap();
/// assert!(options.cast);
/// assert_eq!(options.type_error.as_deref(), Some("bad"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaOptions {
    /// Coerce the input before checking it (boolean, number, string, bigint)
    pub cast: bool,
    /// Trim surrounding whitespace after the type check (string)
    pub trim: bool,
    /// Replaces the default type error message
    pub type_error: Option<String>,
    /// Replaces the default required error message
    pub required_error: Option<String>,
}

impl SchemaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cast(mut self, cast: bool) -> Self {
        self.cast = cast;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_type_error(mut self, message: impl Into<String>) -> Self {
        self.type_error = Some(message.into());
        self
    }

    pub fn with_required_error(mut self, message: impl Into<String>) -> Self {
        self.required_error = Some(message.into());
        self
    }
}

/// The per-type half of a schema.
pub trait Kind: Clone + Send + Sync + 'static {
    /// The type-checked representation handed to validators and the mapper.
    type Input: 'static;

    /// Type name used in `expected` details
    const NAME: &'static str;
    const TYPE: &'static str;
    const REQUIRED: &'static str;
    const CUSTOM: &'static str;

    fn type_message(&self) -> String;

    fn required_message(&self) -> String {
        REQUIRED_MESSAGE.to_string()
    }

    /// Coerce `value`; `None` leaves it unchanged.
    fn cast(&self, _value: &Value, _options: &SchemaOptions) -> Option<Value> {
        None
    }

    fn check(&self, value: &Value, options: &SchemaOptions) -> Result<Self::Input>;

    fn type_error(&self, value: &Value, options: &SchemaOptions) -> ValidationError {
        let message = options
            .type_error
            .clone()
            .unwrap_or_else(|| self.type_message());
        ValidationError::new(Self::TYPE, message).with_params(&TypeParams {
            expected: Self::NAME,
            received: value.type_name(),
        })
    }
}

type Mapper<I, O> = Arc<dyn Fn(I) -> Result<O> + Send + Sync>;

/// An immutable schema of kind `K`, producing `O` under presence `P`.
pub struct TypeSchema<K: Kind, O, P = Required> {
    kind: K,
    options: SchemaOptions,
    validators: Pipeline<K::Input>,
    mapper: Mapper<K::Input, O>,
    presence: PhantomData<fn() -> P>,
}

impl<K: Kind, O, P> Clone for TypeSchema<K, O, P> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            options: self.options.clone(),
            validators: self.validators.clone(),
            mapper: Arc::clone(&self.mapper),
            presence: PhantomData,
        }
    }
}

impl<K: Kind + std::fmt::Debug, O, P> std::fmt::Debug for TypeSchema<K, O, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeSchema")
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("validators", &self.validators)
            .field("presence", &std::any::type_name::<P>())
            .finish_non_exhaustive()
    }
}

/// A fresh required schema whose output is the kind's input.
pub(crate) fn schema_of<K: Kind>(kind: K, options: SchemaOptions) -> TypeSchema<K, K::Input, Required> {
    TypeSchema {
        kind,
        options,
        validators: Pipeline::new(),
        mapper: Arc::new(Ok::<K::Input, ValidationError>),
        presence: PhantomData,
    }
}

impl<K: Kind, O: 'static, P: Presence> TypeSchema<K, O, P> {
    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Codes of the configured validators, in evaluation order.
    pub fn rule_codes(&self) -> Vec<&str> {
        self.validators.codes().collect()
    }

    /// Let `undefined` through.
    pub fn optional(&self) -> TypeSchema<K, O, P::WithOptional> {
        self.with_presence()
    }

    /// Let `null` through.
    pub fn nullable(&self) -> TypeSchema<K, O, P::WithNullable> {
        self.with_presence()
    }

    pub fn nullish(&self) -> TypeSchema<K, O, Nullish> {
        self.with_presence()
    }

    /// Reject both `undefined` and `null`, whatever was configured before.
    pub fn required(&self) -> TypeSchema<K, O, Required> {
        self.with_presence()
    }

    /// Like [`required`](Self::required), with a custom message.
    pub fn required_with(&self, message: impl Into<String>) -> TypeSchema<K, O, Required> {
        let mut next = self.required();
        next.options.required_error = Some(message.into());
        next
    }

    /// Replace the mapper. The new mapper receives the validated value, not
    /// the output of a previous mapper.
    pub fn map<U, F>(&self, mapper: F) -> TypeSchema<K, U, P>
    where
        U: 'static,
        F: Fn(K::Input) -> U + Send + Sync + 'static,
    {
        self.with_mapper::<U>(Arc::new(move |value: K::Input| -> Result<U> { Ok(mapper(value)) }))
    }

    /// Replace the mapper with a fallible one.
    ///
    /// A `ValidationError` returned by the mapper surfaces unchanged, any
    /// other error becomes `UNKNOWN_ERROR`.
    pub fn try_map<U, E, F>(&self, mapper: F) -> TypeSchema<K, U, P>
    where
        U: 'static,
        E: Into<CallbackError>,
        F: Fn(K::Input) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        self.with_mapper::<U>(Arc::new(move |value: K::Input| -> Result<U> {
            mapper(value).map_err(|error| ValidationError::from_callback(error.into(), codes::UNKNOWN_ERROR))
        }))
    }

    /// Add (or replace) the custom validator.
    ///
    /// Non-validation errors are reported under the kind's `*_CUSTOM` code.
    pub fn custom<E, F>(&self, validator: F) -> Self
    where
        E: Into<CallbackError>,
        F: Fn(K::Input) -> std::result::Result<K::Input, E> + Send + Sync + 'static,
    {
        self.with_validator(K::CUSTOM, move |value: K::Input| -> Result<K::Input> {
            validator(value).map_err(|error| ValidationError::from_callback(error.into(), K::CUSTOM))
        })
    }

    /// Attach a standalone rule, keyed by its code.
    pub fn rule<T, R>(&self, rule: R) -> Self
    where
        T: ?Sized + 'static,
        R: Rule<T>,
        K::Input: Borrow<T>,
    {
        let code = rule.code();
        self.rule_as(code, rule)
    }

    /// Attach a rule under a schema-specific code; its errors are re-coded.
    pub(crate) fn rule_as<T, R>(&self, code: &'static str, rule: R) -> Self
    where
        T: ?Sized + 'static,
        R: Rule<T>,
        K::Input: Borrow<T>,
    {
        self.with_validator(code, move |value: K::Input| -> Result<K::Input> {
            match rule.check(<K::Input as Borrow<T>>::borrow(&value)) {
                Ok(()) => Ok(value),
                Err(error) => Err(ValidationError {
                    code: code.into(),
                    ..error
                }),
            }
        })
    }

    /// Add a validator that accepts the value when `accept` holds and fails
    /// with `code`, `message` and `params` otherwise.
    pub(crate) fn guard<Params, F>(&self, code: &'static str, message: String, params: Params, accept: F) -> Self
    where
        Params: Serialize + Send + Sync + 'static,
        F: Fn(&K::Input) -> bool + Send + Sync + 'static,
    {
        self.with_validator(code, move |value: K::Input| -> Result<K::Input> {
            if accept(&value) {
                Ok(value)
            } else {
                Err(ValidationError::new(code, message.clone()).with_params(&params))
            }
        })
    }

    pub(crate) fn with_validator<F>(&self, code: &'static str, validator: F) -> Self
    where
        F: Fn(K::Input) -> Result<K::Input> + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.validators = self.validators.with(code, validator);
        next
    }

    pub(crate) fn with_kind(&self, configure: impl FnOnce(&mut K)) -> Self {
        let mut next = self.clone();
        configure(&mut next.kind);
        next
    }

    fn with_presence<Q: Presence>(&self) -> TypeSchema<K, O, Q> {
        TypeSchema {
            kind: self.kind.clone(),
            options: self.options.clone(),
            validators: self.validators.clone(),
            mapper: Arc::clone(&self.mapper),
            presence: PhantomData,
        }
    }

    fn with_mapper<U>(&self, mapper: Mapper<K::Input, U>) -> TypeSchema<K, U, P> {
        TypeSchema {
            kind: self.kind.clone(),
            options: self.options.clone(),
            validators: self.validators.clone(),
            mapper,
            presence: PhantomData,
        }
    }

    fn run(&self, value: &Value) -> Result<P::Output<O>> {
        let cast = if self.options.cast {
            self.kind.cast(value, &self.options)
        } else {
            None
        };
        let value = cast.as_ref().unwrap_or(value);

        if value.is_absent() {
            if P::allows(value) {
                if let Some(absent) = P::absent::<O>() {
                    return Ok(absent);
                }
            }
            let message = self
                .options
                .required_error
                .clone()
                .unwrap_or_else(|| self.kind.required_message());
            return Err(ValidationError::new(K::REQUIRED, message));
        }

        let input = self.kind.check(value, &self.options)?;
        let input = self.validators.run(input)?;
        let output = (self.mapper)(input)?;
        Ok(P::present(output))
    }

    /// Parse `value`; same as [`Schema::parse`].
    pub fn parse(&self, value: &Value) -> Result<P::Output<O>> {
        Schema::parse(self, value)
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        Schema::is_valid(self, value)
    }
}

impl<K: Kind, O: 'static, P: Presence> Schema for TypeSchema<K, O, P> {
    type Output = P::Output<O>;

    fn parse(&self, value: &Value) -> Result<Self::Output> {
        self.run(value).inspect_err(|error| {
            safe_data_log::trace!(
                target: "safe_data::schema",
                "{} schema rejected {} value: [{}] {}",
                K::NAME,
                value.type_name(),
                error.code,
                error.message
            );
        })
    }
}
