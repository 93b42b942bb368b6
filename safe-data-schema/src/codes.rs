//! Stable error codes.
//!
//! Schema codes are grouped by kind (`NUMBER_MIN`, `STRING_PATTERN`, ...).
//! The lower-case codes in [`rule`] belong to the standalone rules and are
//! shared by every schema that uses them.

pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

pub const BOOLEAN_TYPE: &str = "BOOLEAN_TYPE";
pub const BOOLEAN_REQUIRED: &str = "BOOLEAN_REQUIRED";
pub const BOOLEAN_TRUTHY: &str = "BOOLEAN_TRUTHY";
pub const BOOLEAN_FALSY: &str = "BOOLEAN_FALSY";
pub const BOOLEAN_CUSTOM: &str = "BOOLEAN_CUSTOM";

pub const NUMBER_TYPE: &str = "NUMBER_TYPE";
pub const NUMBER_REQUIRED: &str = "NUMBER_REQUIRED";
pub const NUMBER_INT: &str = "NUMBER_INT";
pub const NUMBER_POSITIVE: &str = "NUMBER_POSITIVE";
pub const NUMBER_MIN: &str = "NUMBER_MIN";
pub const NUMBER_MAX: &str = "NUMBER_MAX";
pub const NUMBER_GREATER_THAN: &str = "NUMBER_GREATER_THAN";
pub const NUMBER_LESS_THAN: &str = "NUMBER_LESS_THAN";
pub const NUMBER_CUSTOM: &str = "NUMBER_CUSTOM";

pub const STRING_TYPE: &str = "STRING_TYPE";
pub const STRING_REQUIRED: &str = "STRING_REQUIRED";
pub const STRING_NOT_EMPTY: &str = "STRING_NOT_EMPTY";
pub const STRING_MIN_LENGTH: &str = "STRING_MIN_LENGTH";
pub const STRING_MAX_LENGTH: &str = "STRING_MAX_LENGTH";
pub const STRING_PATTERN: &str = "STRING_PATTERN";
pub const STRING_CUSTOM: &str = "STRING_CUSTOM";

pub const ENUM_TYPE: &str = "ENUM_TYPE";
pub const ENUM_REQUIRED: &str = "ENUM_REQUIRED";
pub const ENUM_CUSTOM: &str = "ENUM_CUSTOM";

pub const OBJECT_TYPE: &str = "OBJECT_TYPE";
pub const OBJECT_REQUIRED: &str = "OBJECT_REQUIRED";
pub const OBJECT_KEY_INVALID: &str = "OBJECT_KEY_INVALID";
pub const OBJECT_VALUE_INVALID: &str = "OBJECT_VALUE_INVALID";
pub const OBJECT_CUSTOM: &str = "OBJECT_CUSTOM";

pub const ARRAY_TYPE: &str = "ARRAY_TYPE";
pub const ARRAY_REQUIRED: &str = "ARRAY_REQUIRED";
pub const ARRAY_ITEM_INVALID: &str = "ARRAY_ITEM_INVALID";
pub const ARRAY_MIN_ITEMS: &str = "ARRAY_MIN_ITEMS";
pub const ARRAY_MAX_ITEMS: &str = "ARRAY_MAX_ITEMS";
pub const ARRAY_CUSTOM: &str = "ARRAY_CUSTOM";

pub const UNION_TYPE: &str = "UNION_TYPE";
pub const UNION_REQUIRED: &str = "UNION_REQUIRED";
pub const UNION_CUSTOM: &str = "UNION_CUSTOM";

pub const INSTANCE_TYPE: &str = "INSTANCE_TYPE";
pub const INSTANCE_REQUIRED: &str = "INSTANCE_REQUIRED";
pub const INSTANCE_CUSTOM: &str = "INSTANCE_CUSTOM";

pub const BIGINT_TYPE: &str = "BIGINT_TYPE";
pub const BIGINT_REQUIRED: &str = "BIGINT_REQUIRED";
pub const BIGINT_POSITIVE: &str = "BIGINT_POSITIVE";
pub const BIGINT_MIN: &str = "BIGINT_MIN";
pub const BIGINT_MAX: &str = "BIGINT_MAX";
pub const BIGINT_CUSTOM: &str = "BIGINT_CUSTOM";

pub const SHAPE_TYPE: &str = "SHAPE_TYPE";
pub const SHAPE_REQUIRED: &str = "SHAPE_REQUIRED";
pub const SHAPE_FIELD_INVALID: &str = "SHAPE_FIELD_INVALID";
pub const SHAPE_UNKNOWN_KEY: &str = "SHAPE_UNKNOWN_KEY";
pub const SHAPE_CUSTOM: &str = "SHAPE_CUSTOM";

/// Codes raised by the standalone rules in [`crate::rules`].
pub mod rule {
    pub const REQUIRED: &str = "required";
    pub const INVALID_TYPE: &str = "invalid_type";
    pub const EMPTY_STRING: &str = "empty_string";
    pub const STRING_TOO_SHORT: &str = "string_too_short";
    pub const STRING_TOO_LONG: &str = "string_too_long";
    pub const STRING_PATTERN: &str = "string_pattern";
    pub const TOO_SMALL: &str = "too_small";
    pub const TOO_BIG: &str = "too_big";
    pub const NOT_INTEGER: &str = "not_integer";
    pub const OUT_OF_RANGE: &str = "out_of_range";
    pub const TOO_FEW_ITEMS: &str = "too_few_items";
    pub const TOO_MANY_ITEMS: &str = "too_many_items";
    pub const INVALID_NUMERIC_STRING: &str = "invalid_numeric_string";
    pub const INVALID_ISO_DATE: &str = "invalid_iso_date";
    pub const INVALID_ISO_TIME: &str = "invalid_iso_time";
    pub const INVALID_ISO_DATETIME: &str = "invalid_iso_datetime";
}
