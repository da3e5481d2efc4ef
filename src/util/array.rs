//! Re-indexing of value lists.
//!
//! [`index_by`] turns a list of records into a mapping keyed by one of
//! their fields, the way request handlers turn database rows into lookup
//! tables keyed by id.

use serde_json::{Map, Value};

use crate::error::{ErrorKind, LbfError};

/// Re-index `items` by the value each one stores under `key`.
///
/// Mappings are looked up by field name and lists by numeric index. With
/// `remove_value`, the key is removed from each stored value. Later items
/// with the same key replace earlier ones but keep the earlier position.
pub fn index_by(key: &str, items: &[Value], remove_value: bool) -> Result<Map<String, Value>, LbfError> {
    let mut indexed = Map::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
        let (index, value) = match item {
            Value::Object(fields) => {
                let Some(found) = fields.get(key) else {
                    return Err(LbfError::new(
                        ErrorKind::PropertyNotInObject,
                        format!("item {position} has no field '{key}'"),
                    ));
                };
                let index = key_string(found, position)?;
                let mut fields = fields.clone();
                if remove_value {
                    fields.remove(key);
                }
                (index, Value::Object(fields))
            }
            Value::Array(elements) => {
                let slot = key
                    .parse::<usize>()
                    .ok()
                    .filter(|slot| *slot < elements.len())
                    .ok_or_else(|| {
                        LbfError::new(
                            ErrorKind::IndexNotInArray,
                            format!("item {position} has no index '{key}'"),
                        )
                    })?;
                let index = key_string(&elements[slot], position)?;
                let mut elements = elements.clone();
                if remove_value {
                    elements.remove(slot);
                }
                (index, Value::Array(elements))
            }
            scalar => {
                return Err(LbfError::new(
                    ErrorKind::ScalarVariable,
                    format!("item {position} is a scalar ({scalar}), expected a list or mapping"),
                ));
            }
        };
        indexed.insert(index, value);
    }

    Ok(indexed)
}

fn key_string(value: &Value, position: usize) -> Result<String, LbfError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
        other => Err(LbfError::new(
            ErrorKind::InvalidInput,
            format!("item {position} cannot be indexed by {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Value> {
        vec![json!({"id": 1, "v": "a"}), json!({"id": 2, "v": "b"})]
    }

    #[test]
    fn indexes_by_field() {
        let indexed = index_by("id", &rows(), false).unwrap();
        assert_eq!(indexed.len(), 2);
        assert_eq!(indexed["1"], json!({"id": 1, "v": "a"}));
        assert_eq!(indexed["2"], json!({"id": 2, "v": "b"}));
    }

    #[test]
    fn remove_value_drops_the_key() {
        let indexed = index_by("id", &rows(), true).unwrap();
        assert_eq!(indexed["1"], json!({"v": "a"}));
        assert_eq!(indexed["2"], json!({"v": "b"}));
    }

    #[test]
    fn keeps_insertion_order() {
        let items = vec![json!({"id": 10}), json!({"id": 2}), json!({"id": 7})];
        let indexed = index_by("id", &items, false).unwrap();
        let keys: Vec<&str> = indexed.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["10", "2", "7"]);
    }

    #[test]
    fn later_duplicates_win() {
        let items = vec![json!({"id": "x", "v": 1}), json!({"id": "x", "v": 2})];
        let indexed = index_by("id", &items, false).unwrap();
        assert_eq!(indexed.len(), 1);
        assert_eq!(indexed["x"]["v"], 2);
    }

    #[test]
    fn lists_are_indexed_by_position() {
        let items = vec![json!(["a", "first"]), json!(["b", "second"])];
        let indexed = index_by("0", &items, true).unwrap();
        assert_eq!(indexed["a"], json!(["first"]));
        assert_eq!(indexed["b"], json!(["second"]));
    }

    #[test]
    fn scalar_element_is_rejected() {
        let items = vec![json!({"id": 1}), json!(42)];
        let err = index_by("id", &items, false).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ScalarVariable));
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = index_by("id", &[json!({"name": "x"})], false).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::PropertyNotInObject));

        let err = index_by("3", &[json!(["x"])], false).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::IndexNotInArray));
    }

    #[test]
    fn non_scalar_key_is_invalid_input() {
        let err = index_by("id", &[json!({"id": [1, 2]})], false).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidInput));
    }
}
