//! Type-level nullability.
//!
//! A schema's presence marker decides which absent values it lets through and
//! what its parse output looks like: a [`Required`] number schema yields `f64`,
//! every relaxed one yields `Option<f64>` where `None` is the accepted absent
//! value.
//!
//! | marker       | `undefined` | `null` | output      |
//! |--------------|-------------|--------|-------------|
//! | [`Required`] | rejected    | rejected | `T`       |
//! | [`Optional`] | accepted    | rejected | `Option<T>` |
//! | [`Nullable`] | rejected    | accepted | `Option<T>` |
//! | [`Nullish`]  | accepted    | accepted | `Option<T>` |

use crate::value::Value;

pub trait Presence: Send + Sync + 'static {
    /// `undefined` passes through
    const OPTIONAL: bool;
    /// `null` passes through
    const NULLABLE: bool;

    type Output<T>;

    /// Marker after `.optional()`
    type WithOptional: Presence;
    /// Marker after `.nullable()`
    type WithNullable: Presence;

    fn present<T>(value: T) -> Self::Output<T>;

    /// The output for an accepted absent value, if this marker has one.
    fn absent<T>() -> Option<Self::Output<T>>;

    /// Whether `value` is an absent value this marker lets through.
    fn allows(value: &Value) -> bool {
        (Self::OPTIONAL && value.is_undefined()) || (Self::NULLABLE && value.is_null())
    }
}

/// Both `undefined` and `null` are rejected (the default).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Required;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Optional;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nullable;

/// Optional and nullable at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nullish;

impl Presence for Required {
    const OPTIONAL: bool = false;
    const NULLABLE: bool = false;

    type Output<T> = T;
    type WithOptional = Optional;
    type WithNullable = Nullable;

    fn present<T>(value: T) -> T {
        value
    }

    fn absent<T>() -> Option<T> {
        None
    }
}

macro_rules! relaxed {
    ($marker:ty, $optional:expr, $nullable:expr, $with_optional:ty, $with_nullable:ty) => {
        impl Presence for $marker {
            const OPTIONAL: bool = $optional;
            const NULLABLE: bool = $nullable;

            type Output<T> = Option<T>;
            type WithOptional = $with_optional;
            type WithNullable = $with_nullable;

            fn present<T>(value: T) -> Option<T> {
                Some(value)
            }

            fn absent<T>() -> Option<Option<T>> {
                Some(None)
            }
        }
    };
}

relaxed!(Optional, true, false, Optional, Nullish);
relaxed!(Nullable, false, true, Nullish, Nullable);
relaxed!(Nullish, true, true, Nullish, Nullish);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows() {
        assert!(!Required::allows(&Value::Undefined));
        assert!(!Required::allows(&Value::Null));

        assert!(Optional::allows(&Value::Undefined));
        assert!(!Optional::allows(&Value::Null));

        assert!(!Nullable::allows(&Value::Undefined));
        assert!(Nullable::allows(&Value::Null));

        assert!(Nullish::allows(&Value::Undefined));
        assert!(Nullish::allows(&Value::Null));
    }

    #[test]
    fn test_present_values_are_never_absent() {
        assert!(!Nullish::allows(&Value::from(0)));
        assert!(!Nullish::allows(&Value::from("")));
    }

    #[test]
    fn test_outputs() {
        assert_eq!(Required::present(5), 5);
        assert_eq!(Required::absent::<i32>(), None);
        assert_eq!(Optional::present(5), Some(5));
        assert_eq!(Nullish::absent::<i32>(), Some(None));
    }

    #[test]
    fn test_transitions_combine_flags() {
        fn flags<P: Presence>() -> (bool, bool) {
            (P::OPTIONAL, P::NULLABLE)
        }

        assert_eq!(flags::<<Required as Presence>::WithOptional>(), (true, false));
        assert_eq!(flags::<<Optional as Presence>::WithNullable>(), (true, true));
        assert_eq!(flags::<<Nullable as Presence>::WithOptional>(), (true, true));
        assert_eq!(flags::<<Nullable as Presence>::WithNullable>(), (false, true));
        assert_eq!(flags::<<Nullish as Presence>::WithOptional>(), (true, true));
    }
}
