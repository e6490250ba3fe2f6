//! The ordered collection of entries persisted as one document.

use super::entry::{Entry, FieldValue, Group, Scalar};
use crate::error::ShapeError;
use crate::validation;
use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

/// Ordered sequence of entries. Order is significant and always preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    entries: Vec<Entry>,
}

impl Collection {
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// The document served when nothing has been stored yet: `[{}]`.
    #[must_use]
    pub fn empty_document() -> Self {
        Self::new(vec![Entry::new()])
    }

    /// Validate a parsed JSON document and convert it into the typed model.
    pub fn from_json(document: &Value) -> Result<Self, ShapeError> {
        validation::validate(document)?;

        let items = document
            .as_array()
            .ok_or(ShapeError::ExpectingArrayOfObjects)?;
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let object = item.as_object().ok_or(ShapeError::ExpectingArrayOfObjects)?;
            let mut entry = Entry::new();
            for (key, value) in object {
                entry.insert(key.clone(), field_from_json(key, value)?);
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.entries.iter().map(Entry::to_json).collect())
    }

    /// Check a collection built in code (or by CSV import) against the record model.
    pub fn validate(&self) -> Result<(), ShapeError> {
        validation::validate(&self.to_json())
    }

    /// Pretty-printed JSON with the given indent width, keys in insertion order.
    pub fn to_pretty_json(&self, indent: usize) -> serde_json::Result<Vec<u8>> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry without a `stack` key, if any.
    #[must_use]
    pub fn default_entry(&self) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.is_default())
    }
}

fn field_from_json(key: &str, value: &Value) -> Result<FieldValue, ShapeError> {
    if let Value::Object(nested) = value {
        let mut group = Group::with_capacity(nested.len());
        for (field, leaf) in nested {
            let scalar = Scalar::from_json(leaf).ok_or_else(|| ShapeError::UnsupportedValue {
                key: key.to_string(),
            })?;
            group.insert(field.clone(), scalar);
        }
        return Ok(FieldValue::Group(group));
    }
    Scalar::from_json(value)
        .map(FieldValue::Scalar)
        .ok_or_else(|| ShapeError::UnsupportedValue {
            key: key.to_string(),
        })
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Entry> for Collection {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        Self::from_json(&document).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!([
            {"name": "default", "subst": {"domain": "example.net"}},
            {"stack": {"ip": "10.0.0.1", "mask": "24"}, "name": "r1", "enabled": true},
        ])
    }

    #[test]
    fn test_from_json_preserves_order() {
        let collection = Collection::from_json(&sample()).expect("valid sample");
        assert_eq!(collection.len(), 2);

        let keys: Vec<_> = collection.entries()[1].keys().cloned().collect();
        assert_eq!(keys, vec!["stack", "name", "enabled"]);

        let stack = collection.entries()[1].stack().expect("stack group");
        let fields: Vec<_> = stack.keys().cloned().collect();
        assert_eq!(fields, vec!["ip", "mask"]);
    }

    #[test]
    fn test_json_roundtrip_is_exact() {
        let collection = Collection::from_json(&sample()).unwrap();
        assert_eq!(collection.to_json(), sample());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let err = Collection::from_json(&json!([{"a": 1}, {"b": 2}])).unwrap_err();
        assert_eq!(err, ShapeError::TooManyDefaults);
    }

    #[test]
    fn test_default_entry() {
        let collection = Collection::from_json(&sample()).unwrap();
        let default = collection.default_entry().expect("one default");
        assert_eq!(default.get("name"), Some(&FieldValue::from("default")));
        assert!(Collection::empty_document().default_entry().is_some());
    }

    #[test]
    fn test_validate_built_collection() {
        let collection: Collection = vec![Entry::new(), Entry::new()].into_iter().collect();
        assert_eq!(collection.validate(), Err(ShapeError::TooManyDefaults));
        assert_eq!(Collection::empty_document().validate(), Ok(()));
    }

    #[test]
    fn test_pretty_json_uses_requested_indent() {
        let collection = Collection::from_json(&json!([{"stack": {"ip": "1.2.3.4"}}])).unwrap();
        let text = String::from_utf8(collection.to_pretty_json(4).unwrap()).unwrap();
        insta::assert_snapshot!(text, @r#"
        [
            {
                "stack": {
                    "ip": "1.2.3.4"
                }
            }
        ]
        "#);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Collection = serde_json::from_str(r#"[{"stack": {"ip": "1"}}]"#).unwrap();
        assert_eq!(ok.len(), 1);

        let err = serde_json::from_str::<Collection>(r#"{"stack": {"ip": "1"}}"#).unwrap_err();
        assert!(err.to_string().contains("Expecting JSON array of objects"));
    }
}
