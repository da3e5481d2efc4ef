//! A string-keyed property bag with explicit accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ErrorKind, LbfError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    values: Map<String, Value>,
}

impl PropertyBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Like [`get`](Self::get), but a missing property is an error.
    pub fn require(&self, name: &str) -> Result<&Value, LbfError> {
        self.values.get(name).ok_or_else(|| {
            LbfError::new(
                ErrorKind::UndefinedProperty,
                format!("property '{name}' is not defined"),
            )
        })
    }

    /// Set `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl From<Map<String, Value>> for PropertyBag {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get() {
        let mut bag = PropertyBag::new();
        assert!(bag.set("title", "Home").is_none());
        assert_eq!(bag.get("title"), Some(&json!("Home")));
        assert_eq!(bag.set("title", "Index"), Some(json!("Home")));
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn missing_property_is_none_or_error() {
        let bag = PropertyBag::new();
        assert!(bag.get("nope").is_none());
        let err = bag.require("nope").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UndefinedProperty));
    }

    #[test]
    fn remove_clears_property() {
        let mut bag = PropertyBag::new();
        bag.set("count", 3);
        assert!(bag.contains("count"));
        assert_eq!(bag.remove("count"), Some(json!(3)));
        assert!(bag.is_empty());
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut bag = PropertyBag::new();
        bag.set("a", true);
        assert_eq!(serde_json::to_value(&bag).unwrap(), json!({"a": true}));
    }
}
