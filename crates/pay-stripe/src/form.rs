//! # Form Encoding
//!
//! Stripe takes `application/x-www-form-urlencoded` bodies with nested
//! values spelled in bracket notation (`line_items[0][quantity]=2`).

use serde_json::{Map, Value};

/// Ordered list of form fields for a Stripe request
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormParams {
    fields: Vec<(String, String)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single field
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Append a JSON object as `prefix[key]=value`, keys sorted
    pub fn push_object(&mut self, prefix: &str, map: &Map<String, Value>) -> &mut Self {
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in entries {
            self.push_value(&format!("{}[{}]", prefix, key), value);
        }
        self
    }

    /// Append an arbitrary JSON value, flattening objects and arrays.
    ///
    /// Empty objects and arrays contribute no fields. `null` is sent as an
    /// empty string.
    pub fn push_value(&mut self, key: &str, value: &Value) -> &mut Self {
        match value {
            Value::Null => {
                self.push(key, "");
            }
            Value::Bool(b) => {
                self.push(key, b.to_string());
            }
            Value::Number(n) => {
                self.push(key, n.to_string());
            }
            Value::String(s) => {
                self.push(key, s.clone());
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.push_value(&format!("{}[{}]", key, i), item);
                }
            }
            Value::Object(map) => {
                for (name, item) in map {
                    self.push_value(&format!("{}[{}]", key, name), item);
                }
            }
        }
        self
    }

    /// Append a sequence under `prefix[i]`
    pub fn push_list(&mut self, prefix: &str, items: &[Value]) -> &mut Self {
        for (i, item) in items.iter().enumerate() {
            self.push_value(&format!("{}[{}]", prefix, i), item);
        }
        self
    }

    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.fields
    }
}
