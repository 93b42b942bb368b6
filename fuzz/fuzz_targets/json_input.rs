//! Fuzz target for JSON documents.
//!
//! Raw bytes are read as JSON and parsed with a nested document schema.
//! Malformed JSON is skipped; well-formed JSON must never panic the engine.

#![no_main]

use libfuzzer_sys::fuzz_target;

use safe_data_schema::{
    ArraySchema, BooleanSchema, NumberSchema, ObjectSchema, SchemaOptions, ShapeSchema, StringSchema, Value,
};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let value = Value::from(json);

    let cast = SchemaOptions::new().with_cast(true);
    let document = ShapeSchema::create()
        .field("name", StringSchema::create_with(cast.clone().with_trim(true)).not_blank())
        .field("enabled", BooleanSchema::create_with(cast.clone()).optional())
        .field("limits", ObjectSchema::create(NumberSchema::create_with(cast).positive()).optional())
        .field("tags", ArraySchema::create(StringSchema::create()).max_items(16).nullish());

    if let Err(error) = document.parse(&value) {
        // Errors always serialize
        let _ = error.to_json();
        let _ = error.root_cause().code();
    }
    let _ = value.to_json();
});
