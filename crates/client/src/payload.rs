//! Upstream response bodies, passed through without modeling.

use serde_json::Value;

/// Body of a successful upstream response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed body of a JSON response.
    Json(Value),
    /// Raw body of a non-JSON response.
    Text(String),
    /// JSON response with an empty body.
    Empty,
}

impl Payload {
    /// Convert into a JSON value. Text becomes a JSON string, empty becomes `null`.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Empty => Value::Null,
        }
    }

    /// Pretty-printed JSON text with two-space indentation.
    ///
    /// Integral floats print without a fraction (`100.0` renders as `100`).
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Json(value) => {
                let mut value = value.clone();
                integral_floats_to_ints(&mut value);
                serde_json::to_string_pretty(&value)
            }
            Self::Text(text) => serde_json::to_string_pretty(text),
            Self::Empty => serde_json::to_string_pretty(&Value::Null),
        }
    }
}

// Largest magnitude every integer below which is exact in an f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn integral_floats_to_ints(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER {
                    *n = (f as i64).into();
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_floats_to_ints),
        Value::Object(map) => map.values_mut().for_each(integral_floats_to_ints),
        _ => {}
    }
}
