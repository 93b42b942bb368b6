//! Fuzz target for schema parsing.
//!
//! Builds arbitrary values and runs them through every schema kind with
//! casting on and off. Parsing must never panic, must be deterministic and
//! must return well-formed errors.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use safe_data_schema::{
    ArraySchema, BigIntSchema, BooleanSchema, EnumSchema, NumberSchema, ObjectSchema, Record, Schema,
    SchemaOptions, ShapeSchema, StringSchema, UnionSchema, ValidationError, Value,
};

/// Arbitrary input value, depth-limited by the byte budget.
#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Array(Vec<FuzzValue>),
    Object(Vec<(String, FuzzValue)>),
}

impl From<FuzzValue> for Value {
    fn from(value: FuzzValue) -> Self {
        match value {
            FuzzValue::Undefined => Value::Undefined,
            FuzzValue::Null => Value::Null,
            FuzzValue::Bool(b) => Value::Bool(b),
            FuzzValue::Number(n) => Value::Number(n),
            FuzzValue::BigInt(n) => Value::BigInt(n),
            FuzzValue::String(s) => Value::String(s),
            FuzzValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            FuzzValue::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Record<Value>>(),
            ),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    value: FuzzValue,
    cast: bool,
    trim: bool,
    min: f64,
    length: u8,
}

fn check<S: Schema>(schema: &S, value: &Value)
where
    S::Output: PartialEq + std::fmt::Debug,
{
    let first = schema.parse(value);
    let second = schema.parse(value);
    assert_eq!(first, second, "parsing is not deterministic");

    if let Err(error) = first {
        assert_well_formed(&error);
    }
}

fn assert_well_formed(error: &ValidationError) {
    for link in error.chain() {
        assert!(!link.code().is_empty());
    }
}

fuzz_target!(|input: FuzzInput| {
    let options = SchemaOptions::new().with_cast(input.cast).with_trim(input.trim);
    let value = Value::from(input.value);
    let min = if input.min.is_finite() { input.min } else { 0.0 };

    check(&BooleanSchema::create_with(options.clone()).nullish(), &value);
    check(&NumberSchema::create_with(options.clone()).int().min(min).optional(), &value);
    check(
        &StringSchema::create_with(options.clone())
            .not_blank()
            .max_length(usize::from(input.length))
            .nullable(),
        &value,
    );
    check(&EnumSchema::create_with(["a", "b", "c"], options.clone()), &value);
    check(&BigIntSchema::create_with(options.clone()).positive(), &value);
    check(&ArraySchema::create(NumberSchema::create_with(options.clone())).max_items(64), &value);
    check(&ObjectSchema::create(StringSchema::create().optional()), &value);
    check(
        &UnionSchema::create(NumberSchema::create().map(|n| n.to_string())).or(StringSchema::create()),
        &value,
    );
    check(
        &ShapeSchema::create_with(options.clone())
            .field("id", NumberSchema::create().int())
            .field("name", StringSchema::create().optional())
            .strict(),
        &value,
    );
});
