//! Query-string parameters for upstream requests.

use std::fmt;

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_number(n)),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<serde_json::Number> for QueryValue {
    fn from(value: serde_json::Number) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered query parameters. Entries without a value are skipped when the
/// request URL is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. `None` records the key without a value.
    pub fn param<V: Into<QueryValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.entries.push((name.into(), value.map(Into::into)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key/value pairs to put on the URL.
    ///
    /// Absent values are dropped. A repeated key keeps the position of its
    /// first occurrence and the value of its last.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let Some(value) = value else { continue };
            let value = value.to_string();
            match pairs.iter_mut().find(|(k, _)| k == name) {
                Some(existing) => existing.1 = value,
                None => pairs.push((name.clone(), value)),
            }
        }
        pairs
    }
}

/// Render a JSON number the way it reads as text: integral values never
/// carry a fractional part, so `42.0` becomes `42`.
pub fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
