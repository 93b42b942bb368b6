// Ordered validator pipeline

use crate::errors::Result;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type ValidatorFn<T> = Arc<dyn Fn(T) -> Result<T> + Send + Sync>;

/// Validators keyed by code, run in insertion order.
///
/// Adding a validator under a code that is already present replaces the old
/// one in its original position, so `.min(1).min(10)` checks only `10`.
pub struct Pipeline<T> {
    validators: IndexMap<Cow<'static, str>, ValidatorFn<T>>,
}

impl<T> Pipeline<T> {
    pub fn new() -> Self {
        Self {
            validators: IndexMap::new(),
        }
    }

    /// A copy of this pipeline with `validator` stored under `code`.
    pub fn with<F>(&self, code: impl Into<Cow<'static, str>>, validator: F) -> Self
    where
        F: Fn(T) -> Result<T> + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.validators.insert(code.into(), Arc::new(validator));
        next
    }

    /// Run every validator in order, stopping at the first failure.
    pub fn run(&self, value: T) -> Result<T> {
        self.validators
            .values()
            .try_fold(value, |value, validate| validate(value))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(|code| &**code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.validators.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.codes()).finish()
    }
}
