// Value formatting for error messages

use crate::value::Value;

/// Canonical textual form of a number.
///
/// Integral values print without a fraction, non-finite values print as
/// `NaN`, `Infinity` and `-Infinity`, and negative zero prints as `0`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Display form of a value: strings quoted, bigints suffixed with `n`,
/// arrays and objects as JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::BigInt(n) => format!("{}n", n),
        Value::String(s) => format!("'{}'", s),
        Value::Date(d) => d.to_rfc3339(),
        Value::Array(_) | Value::Object(_) => value.to_json().to_string(),
        Value::Instance(instance) => format!("[instance {}]", instance.type_name()),
    }
}

/// `[a, b, c]` list of formatted values.
pub fn format_values(values: &[Value]) -> String {
    let formatted: Vec<String> = values.iter().map(format_value).collect();
    format!("[{}]", formatted.join(", "))
}
