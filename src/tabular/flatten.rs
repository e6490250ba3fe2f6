//! Collection to table (export direction).

use super::FlatTable;
use crate::model::{Collection, FieldValue};
use indexmap::IndexSet;

/// Separator between a group name and a field name in column headers.
pub const GROUP_SEPARATOR: char = '/';

/// Flatten a collection into columns and one positional row per entry.
///
/// Scalars keep their key as column name; a nested group contributes one
/// `group/field` column per field. Columns are the union over all entries
/// in first-seen order. Cells an entry does not fill are left blank.
#[must_use]
pub fn flatten(collection: &Collection) -> FlatTable {
    let mut columns: IndexSet<String> = IndexSet::new();
    let mut cells_per_entry = Vec::with_capacity(collection.len());

    for entry in collection {
        let mut cells = Vec::with_capacity(entry.len());
        for (key, value) in entry.iter() {
            match value {
                FieldValue::Group(group) => {
                    for (field, scalar) in group {
                        let column = format!("{key}{GROUP_SEPARATOR}{field}");
                        let (index, _) = columns.insert_full(column);
                        cells.push((index, scalar.render().into_owned()));
                    }
                }
                FieldValue::Scalar(scalar) => {
                    let (index, _) = columns.insert_full(key.clone());
                    cells.push((index, scalar.render().into_owned()));
                }
            }
        }
        cells_per_entry.push(cells);
    }

    let rows = cells_per_entry
        .into_iter()
        .map(|cells| {
            let mut row = vec![String::new(); columns.len()];
            for (index, text) in cells {
                row[index] = text;
            }
            row
        })
        .collect();

    tracing::debug!(
        entries = collection.len(),
        columns = columns.len(),
        "flattened collection"
    );
    FlatTable::new(columns.into_iter().collect(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(doc: &serde_json::Value) -> Collection {
        Collection::from_json(doc).expect("valid test document")
    }

    #[test]
    fn test_flatten_stack_and_bool() {
        let table = flatten(&collection(&json!([{"stack": {"ip": "1.2.3.4"}, "enabled": true}])));
        assert_eq!(table.columns(), ["stack/ip", "enabled"]);
        assert_eq!(table.rows(), [vec!["1.2.3.4", "True"]]);
    }

    #[test]
    fn test_columns_are_union_in_first_seen_order() {
        let table = flatten(&collection(&json!([
            {"name": "default", "subst": {"domain": "lab"}},
            {"stack": {"ip": "10.0.0.1"}, "name": "r1", "subst": {"domain": "prod", "ntp": "10.0.0.9"}},
        ])));
        assert_eq!(
            table.columns(),
            ["name", "subst/domain", "stack/ip", "subst/ntp"]
        );
        assert_eq!(table.rows()[0], vec!["default", "lab", "", ""]);
        assert_eq!(table.rows()[1], vec!["r1", "prod", "10.0.0.1", "10.0.0.9"]);
    }

    #[test]
    fn test_false_and_null_render_blank() {
        let table = flatten(&collection(&json!([{"stack": {"ip": "1"}, "a": false, "b": null, "c": 5}])));
        assert_eq!(table.rows()[0], vec!["1", "", "", "5"]);
    }

    #[test]
    fn test_empty_document_has_no_columns() {
        let table = flatten(&Collection::empty_document());
        assert!(table.columns().is_empty());
        assert_eq!(table.rows().len(), 1);
        assert!(table.rows()[0].is_empty());
    }

    #[test]
    fn test_colliding_column_keeps_first_position_and_last_value() {
        let table = flatten(&collection(&json!([{"a/b": "flat", "a": {"b": "nested"}, "stack": {"x": "1"}}])));
        assert_eq!(table.columns(), ["a/b", "stack/x"]);
        assert_eq!(table.rows()[0], vec!["nested", "1"]);
    }
}
