//! Fuzz target for the pattern catalog.
//!
//! Every catalog regex must accept or reject arbitrary text without
//! panicking, and the string schema must agree with the raw regex.

#![no_main]

use libfuzzer_sys::fuzz_target;

use safe_data_schema::{Pattern, StringSchema, Value, codes};

fuzz_target!(|data: &str| {
    // Skip huge inputs
    if data.len() > 4096 {
        return;
    }

    let value = Value::from(data);
    for pattern in Pattern::all() {
        let matched = pattern.is_match(data);
        assert_eq!(Pattern::from_name(pattern.name()), Some(*pattern));

        match StringSchema::create().pattern(*pattern).parse(&value) {
            Ok(parsed) => {
                assert!(matched);
                assert_eq!(parsed, data);
            }
            Err(error) => {
                assert!(!matched);
                assert_eq!(error.code(), codes::STRING_PATTERN);
            }
        }
    }
});
