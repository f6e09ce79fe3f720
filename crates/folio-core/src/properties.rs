//! Property system for extensible node attributes.

use std::collections::HashMap;

/// Property key holding the characters of a text node.
pub const TEXT_CONTENT: &str = "content";

/// A collection of properties (key-value pairs).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(HashMap<String, PropValue>);

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Properties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Set a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`Properties::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a property.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Get a string property.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(PropValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get an integer property.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(PropValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Get a boolean property.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(PropValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Check if a property exists.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a property and return its value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    /// Iterate over properties.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.0.iter()
    }

    /// Check if the property set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every entry of `filter` is present here with an equal value.
    ///
    /// An empty filter matches everything.
    pub fn matches(&self, filter: &Properties) -> bool {
        filter.iter().all(|(k, v)| self.get(k) == Some(v))
    }
}

// Conversions
impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<i64> for PropValue {
    fn from(i: i64) -> Self {
        PropValue::Int(i)
    }
}

impl From<i32> for PropValue {
    fn from(i: i32) -> Self {
        PropValue::Int(i as i64)
    }
}

impl From<u8> for PropValue {
    fn from(i: u8) -> Self {
        PropValue::Int(i as i64)
    }
}

impl From<f64> for PropValue {
    fn from(f: f64) -> Self {
        PropValue::Float(f)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let props = Properties::new()
            .with("level", 2i64)
            .with("ordered", true)
            .with("url", "https://example.com");
        assert_eq!(props.get_int("level"), Some(2));
        assert_eq!(props.get_bool("ordered"), Some(true));
        assert_eq!(props.get_str("url"), Some("https://example.com"));
        assert_eq!(props.get_str("level"), None);
    }

    #[test]
    fn test_matches_filter() {
        let props = Properties::new().with("level", 2i64).with("id", "intro");
        assert!(props.matches(&Properties::new()));
        assert!(props.matches(&Properties::new().with("level", 2i64)));
        assert!(!props.matches(&Properties::new().with("level", 3i64)));
        assert!(!props.matches(&Properties::new().with("missing", true)));
    }
}
