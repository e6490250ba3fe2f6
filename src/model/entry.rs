//! Entry-level types: scalars, nested groups and the ordered entry map.

use indexmap::IndexMap;
use indexmap::map::Entry as MapEntry;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Key whose presence marks an entry as a named stack configuration.
pub const STACK_KEY: &str = "stack";

/// Key holding per-entry substitution variables.
pub const SUBST_KEY: &str = "subst";

/// A leaf value inside an entry or a nested group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Text(String),
    Bool(bool),
    /// Numbers are kept verbatim from JSON; CSV import never produces them.
    Number(Number),
    Null,
}

impl Scalar {
    /// Convert a JSON leaf. Arrays and objects are not scalars.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::Null => Some(Self::Null),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Null => Value::Null,
        }
    }

    /// Text used for this value in a CSV cell.
    ///
    /// `true` becomes `True`; `false` and `null` render as an empty cell and
    /// are therefore indistinguishable from an absent value after export.
    #[must_use]
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Bool(true) => Cow::Borrowed("True"),
            Self::Bool(false) | Self::Null => Cow::Borrowed(""),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

/// Nested object of scalars, in insertion order.
pub type Group = IndexMap<String, Scalar>;

/// Value stored under a top-level entry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(Scalar),
    Group(Group),
}

impl FieldValue {
    #[must_use]
    pub const fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Scalar(_) => None,
        }
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Group(_) => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(scalar) => scalar.to_json(),
            Self::Group(group) => Value::Object(
                group
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Scalar(s.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Scalar(b.into())
    }
}

impl From<Group> for FieldValue {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Group(group) => group.serialize(serializer),
        }
    }
}

/// Returned by [`Entry::merge_group_field`] when the group name is already
/// taken by a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConflict {
    pub group: String,
}

/// One configuration record: an insertion-ordered map of top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    fields: IndexMap<String, FieldValue>,
}

impl Entry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a top-level value, keeping the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Add `field: value` to the nested group `group`, creating it on first use.
    pub fn merge_group_field(
        &mut self,
        group: &str,
        field: impl Into<String>,
        value: Scalar,
    ) -> Result<(), GroupConflict> {
        match self.fields.entry(group.to_string()) {
            MapEntry::Vacant(slot) => {
                let mut nested = Group::new();
                nested.insert(field.into(), value);
                slot.insert(FieldValue::Group(nested));
                Ok(())
            }
            MapEntry::Occupied(mut slot) => match slot.get_mut() {
                FieldValue::Group(nested) => {
                    nested.insert(field.into(), value);
                    Ok(())
                }
                FieldValue::Scalar(_) => Err(GroupConflict {
                    group: group.to_string(),
                }),
            },
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The default entry is the one without a `stack` key.
    #[must_use]
    pub fn is_default(&self) -> bool {
        !self.contains_key(STACK_KEY)
    }

    /// The `stack` group, when present and well formed.
    #[must_use]
    pub fn stack(&self) -> Option<&Group> {
        self.get(STACK_KEY).and_then(FieldValue::as_group)
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Entry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
