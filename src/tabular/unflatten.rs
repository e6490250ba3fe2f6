//! Table to collection (import direction).

use super::FlatTable;
use super::flatten::GROUP_SEPARATOR;
use crate::error::{Result, ZtpError};
use crate::model::{Collection, Entry, FieldValue, Scalar};
use indexmap::IndexMap;

/// Cell text that imports as boolean `true`.
pub const TRUE_LITERAL: &str = "True";

/// Rebuild entries from header-named rows.
///
/// A column named `group/field` with a non-blank cell is merged into the
/// nested group `group`. Every other column becomes a top-level key: the
/// literal `True` turns into a boolean, a blank cell omits the key, and any
/// other text is kept as a string. Fails when a group name is also used as a
/// plain column holding a value in the same row.
pub fn unflatten(table: &FlatTable) -> Result<Collection> {
    let mut collection = Collection::default();
    for (index, row) in table.rows().iter().enumerate() {
        let entry = unflatten_row(table.columns(), row).map_err(|conflict| {
            ZtpError::malformed_upload(format!(
                "row {}: column '{conflict}' is used both as a value and as a group",
                index + 2
            ))
        })?;
        collection.push(entry);
    }
    tracing::debug!(entries = collection.len(), "unflattened table");
    Ok(collection)
}

fn unflatten_row(columns: &[String], row: &[String]) -> std::result::Result<Entry, String> {
    // Duplicate header names keep the first position and the last value.
    let cells: IndexMap<&str, &str> = columns
        .iter()
        .zip(row)
        .map(|(column, cell)| (column.as_str(), cell.as_str()))
        .collect();

    let mut entry = Entry::new();
    for (key, value) in cells {
        if !value.is_empty()
            && let Some((group, field)) = split_group_column(key)
        {
            entry
                .merge_group_field(group, field, Scalar::from(value))
                .map_err(|conflict| conflict.group)?;
            continue;
        }

        let scalar = match value {
            "" => continue,
            TRUE_LITERAL => Scalar::Bool(true),
            text => Scalar::from(text),
        };
        if matches!(entry.get(key), Some(FieldValue::Group(_))) {
            return Err(key.to_string());
        }
        entry.insert(key, scalar);
    }
    Ok(entry)
}

/// `group/field` with exactly one separator and both parts non-empty.
fn split_group_column(column: &str) -> Option<(&str, &str)> {
    let (group, field) = column.split_once(GROUP_SEPARATOR)?;
    if group.is_empty() || field.is_empty() || field.contains(GROUP_SEPARATOR) {
        return None;
    }
    Some((group, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(columns: &[&str], rows: &[&[&str]]) -> FlatTable {
        FlatTable::new(
            columns.iter().map(ToString::to_string).collect(),
            rows.iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        )
    }

    #[test]
    fn test_unflatten_stack_and_bool() {
        let collection =
            unflatten(&table(&["stack/ip", "enabled"], &[&["1.2.3.4", "True"]])).unwrap();
        assert_eq!(
            collection.to_json(),
            json!([{"stack": {"ip": "1.2.3.4"}, "enabled": true}])
        );
    }

    #[test]
    fn test_blank_cells_omit_keys() {
        let collection = unflatten(&table(
            &["name", "stack/ip", "stack/mask"],
            &[&["", "10.0.0.1", ""], &["r2", "", ""]],
        ))
        .unwrap();
        assert_eq!(
            collection.to_json(),
            json!([{"stack": {"ip": "10.0.0.1"}}, {"name": "r2"}])
        );
    }

    #[test]
    fn test_numbers_and_other_literals_stay_strings() {
        let collection = unflatten(&table(
            &["vlan", "flag", "off", "stack/enabled"],
            &[&["42", "true", "False", "True"]],
        ))
        .unwrap();
        assert_eq!(
            collection.to_json(),
            json!([{"vlan": "42", "flag": "true", "off": "False", "stack": {"enabled": "True"}}])
        );
    }

    #[test]
    fn test_group_fields_merge_in_first_seen_order() {
        let collection = unflatten(&table(
            &["subst/a", "name", "subst/b", "subst/a"],
            &[&["1", "r1", "2", "3"]],
        ))
        .unwrap();
        assert_eq!(
            collection.to_json(),
            json!([{"subst": {"a": "3", "b": "2"}, "name": "r1"}])
        );
    }

    #[test]
    fn test_ragged_rows() {
        let collection = unflatten(&table(
            &["name", "stack/ip"],
            &[&["r1"], &["r2", "10.0.0.2", "surplus"]],
        ))
        .unwrap();
        assert_eq!(
            collection.to_json(),
            json!([{"name": "r1"}, {"name": "r2", "stack": {"ip": "10.0.0.2"}}])
        );
    }

    #[test]
    fn test_columns_that_are_not_groups() {
        let collection = unflatten(&table(
            &["/ip", "stack/", "a/b/c", "plain"],
            &[&["1", "2", "3", "4"]],
        ))
        .unwrap();
        assert_eq!(
            collection.to_json(),
            json!([{"/ip": "1", "stack/": "2", "a/b/c": "3", "plain": "4"}])
        );
    }

    #[test]
    fn test_group_and_scalar_conflict() {
        let err = unflatten(&table(&["stack", "stack/ip"], &[&["x", "1"]])).unwrap_err();
        assert!(matches!(err, ZtpError::MalformedUpload(_)));
        assert!(err.to_string().contains("row 2"));

        let err = unflatten(&table(&["stack/ip", "stack"], &[&["1", "x"]])).unwrap_err();
        assert!(err.to_string().contains("'stack'"));
    }

    #[test]
    fn test_no_rows() {
        let collection = unflatten(&table(&["name"], &[])).unwrap();
        assert!(collection.is_empty());
    }
}
