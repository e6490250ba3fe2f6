//! Shape validation for ZTP documents.
//!
//! [`validate`] is the gate in front of every persistence and export path.
//! It never repairs data. Rules are checked one at a time over the whole
//! collection and the first failing rule wins:
//!
//! 1. the document is an array of objects
//! 2. no object value anywhere inside an entry is empty
//! 3. no key anywhere inside an entry is empty or whitespace-only
//! 4. `stack`, where present, is an object
//! 5. `subst`, where present, is an object
//! 6. nothing is nested deeper than one object of scalars
//! 7. at most one entry lacks a `stack` key

use crate::error::ShapeError;
use crate::model::{STACK_KEY, SUBST_KEY};
use serde_json::{Map, Value};

type JsonObject = Map<String, Value>;

/// Validate a parsed JSON document against the record model.
pub fn validate(document: &Value) -> Result<(), ShapeError> {
    let entries = as_entries(document)?;

    check_empty_objects(&entries)?;
    check_empty_keys(&entries)?;
    check_group_key(&entries, STACK_KEY, &ShapeError::InvalidStackShape)?;
    check_group_key(&entries, SUBST_KEY, &ShapeError::InvalidSubstShape)?;
    check_nesting(&entries)?;
    check_defaults(&entries)?;

    tracing::debug!(entries = entries.len(), "document shape validated");
    Ok(())
}

fn as_entries(document: &Value) -> Result<Vec<&JsonObject>, ShapeError> {
    let Value::Array(items) = document else {
        return Err(ShapeError::ExpectingArrayOfObjects);
    };
    items
        .iter()
        .map(|item| item.as_object().ok_or(ShapeError::ExpectingArrayOfObjects))
        .collect()
}

fn check_empty_objects(entries: &[&JsonObject]) -> Result<(), ShapeError> {
    let found = entries
        .iter()
        .flat_map(|entry| entry.values())
        .any(contains_empty_object);
    if found {
        return Err(ShapeError::EmptyObjectNotAllowed);
    }
    Ok(())
}

fn contains_empty_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty() || map.values().any(contains_empty_object),
        Value::Array(items) => items.iter().any(contains_empty_object),
        _ => false,
    }
}

fn check_empty_keys(entries: &[&JsonObject]) -> Result<(), ShapeError> {
    if entries.iter().any(|entry| has_blank_key(entry)) {
        return Err(ShapeError::EmptyKeyNotAllowed);
    }
    Ok(())
}

fn has_blank_key(map: &JsonObject) -> bool {
    map.iter().any(|(key, value)| {
        key.trim().is_empty()
            || match value {
                Value::Object(nested) => has_blank_key(nested),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_object)
                    .any(has_blank_key),
                _ => false,
            }
    })
}

fn check_group_key(
    entries: &[&JsonObject],
    key: &str,
    violation: &ShapeError,
) -> Result<(), ShapeError> {
    let misshaped = entries
        .iter()
        .filter_map(|entry| entry.get(key))
        .any(|value| !value.is_object());
    if misshaped {
        return Err(violation.clone());
    }
    Ok(())
}

fn check_nesting(entries: &[&JsonObject]) -> Result<(), ShapeError> {
    for entry in entries {
        for (key, value) in *entry {
            let supported = match value {
                Value::Array(_) => false,
                Value::Object(nested) => nested.values().all(is_scalar),
                _ => true,
            };
            if !supported {
                return Err(ShapeError::UnsupportedValue { key: key.clone() });
            }
        }
    }
    Ok(())
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn check_defaults(entries: &[&JsonObject]) -> Result<(), ShapeError> {
    let defaults = entries
        .iter()
        .filter(|entry| !entry.contains_key(STACK_KEY))
        .count();
    if defaults > 1 {
        return Err(ShapeError::TooManyDefaults);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_default_plus_stack() {
        let doc = json!([{"name": "default"}, {"stack": {"ip": "10.0.0.1"}, "name": "r1"}]);
        assert_eq!(validate(&doc), Ok(()));
    }

    #[test]
    fn test_accepts_single_empty_entry() {
        assert_eq!(validate(&json!([{}])), Ok(()));
        assert_eq!(validate(&json!([])), Ok(()));
    }

    #[test]
    fn test_rejects_bare_object() {
        assert_eq!(
            validate(&json!({"stack": {"ip": "1.2.3.4"}})),
            Err(ShapeError::ExpectingArrayOfObjects)
        );
    }

    #[test]
    fn test_rejects_non_object_elements() {
        assert_eq!(
            validate(&json!([{"stack": {"a": "b"}}, "r1"])),
            Err(ShapeError::ExpectingArrayOfObjects)
        );
        assert_eq!(
            validate(&json!([[]])),
            Err(ShapeError::ExpectingArrayOfObjects)
        );
    }

    #[test]
    fn test_rejects_empty_nested_object() {
        assert_eq!(
            validate(&json!([{"stack": {}}])),
            Err(ShapeError::EmptyObjectNotAllowed)
        );
    }

    #[test]
    fn test_rejects_empty_and_blank_keys() {
        assert_eq!(
            validate(&json!([{"": "x"}])),
            Err(ShapeError::EmptyKeyNotAllowed)
        );
        assert_eq!(
            validate(&json!([{"stack": {"  ": "x"}}])),
            Err(ShapeError::EmptyKeyNotAllowed)
        );
    }

    #[test]
    fn test_rejects_two_defaults() {
        assert_eq!(
            validate(&json!([{"name": "a"}, {"name": "b"}])),
            Err(ShapeError::TooManyDefaults)
        );
    }

    #[test]
    fn test_rejects_scalar_stack_and_subst() {
        assert_eq!(
            validate(&json!([{"stack": "r1"}])),
            Err(ShapeError::InvalidStackShape)
        );
        assert_eq!(
            validate(&json!([{"stack": {"ip": "1"}, "subst": true}])),
            Err(ShapeError::InvalidSubstShape)
        );
    }

    #[test]
    fn test_rejects_deep_nesting_and_arrays() {
        assert_eq!(
            validate(&json!([{"stack": {"ip": {"v4": "1.2.3.4"}}}])),
            Err(ShapeError::UnsupportedValue {
                key: "stack".to_string()
            })
        );
        assert_eq!(
            validate(&json!([{"stack": {"ip": "1"}, "vlans": [10, 20]}])),
            Err(ShapeError::UnsupportedValue {
                key: "vlans".to_string()
            })
        );
    }

    #[test]
    fn test_precedence_empty_object_before_empty_key() {
        // Both rule 2 and rule 3 fire, on different entries.
        let doc = json!([{"": "x", "stack": {"a": "b"}}, {"stack": {}}]);
        assert_eq!(validate(&doc), Err(ShapeError::EmptyObjectNotAllowed));
    }

    #[test]
    fn test_precedence_empty_key_before_defaults() {
        let doc = json!([{"name": "a"}, {"name": "b", " ": "c"}]);
        assert_eq!(validate(&doc), Err(ShapeError::EmptyKeyNotAllowed));
    }

    #[test]
    fn test_precedence_array_check_before_everything() {
        let doc = json!([{"stack": {}}, 7]);
        assert_eq!(validate(&doc), Err(ShapeError::ExpectingArrayOfObjects));
    }
}
