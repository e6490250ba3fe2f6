//! CSV export and import of ZTP collections.
//!
//! Export flattens each entry into one row of `;`-separated cells, naming
//! nested fields `group/field`. Import reverses this heuristically: CSV has
//! no types, so only the literal `True` comes back as a boolean and blank
//! cells drop their key.
//!
//! ```
//! use serde_json::json;
//! use ztp_tools::model::Collection;
//! use ztp_tools::tabular::{export_csv, import_csv};
//!
//! let doc = json!([{"stack": {"ip": "1.2.3.4"}, "enabled": true}]);
//! let collection = Collection::from_json(&doc).unwrap();
//!
//! let csv = export_csv(&collection);
//! assert_eq!(csv, "stack/ip;enabled\n1.2.3.4;True\n");
//! assert_eq!(import_csv(csv.as_bytes()).unwrap(), collection);
//! ```

pub mod codec;
mod flatten;
mod unflatten;

pub use flatten::{GROUP_SEPARATOR, flatten};
pub use unflatten::{TRUE_LITERAL, unflatten};

use crate::error::{Result, ZtpError};
use crate::model::Collection;

/// Byte order mark some spreadsheet tools put in front of UTF-8 exports.
const UTF8_BOM: char = '\u{feff}';

/// Header names plus positional rows.
///
/// Rows produced by [`flatten`] always have one cell per column; rows read
/// from an upload may be shorter or longer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FlatTable {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Render as delimited text, header first.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        codec::write_record(&mut out, &self.columns);
        for row in &self.rows {
            codec::write_record(&mut out, row);
        }
        out
    }

    /// Parse delimited text whose first record is the header. Blank lines are skipped.
    pub fn from_csv(text: &str) -> Result<Self> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let mut records = codec::read_records(text)
            .map_err(|e| ZtpError::malformed_upload(e.to_string()))?
            .into_iter()
            .filter(|record| !record.is_empty());
        let columns = records
            .next()
            .ok_or_else(|| ZtpError::malformed_upload("missing CSV header row"))?;
        Ok(Self::new(columns, records.collect()))
    }
}

/// Flatten and serialize a collection.
#[must_use]
pub fn export_csv(collection: &Collection) -> String {
    flatten(collection).to_csv()
}

/// Decode uploaded bytes, rebuild the collection and validate it.
pub fn import_csv(bytes: &[u8]) -> Result<Collection> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ZtpError::malformed_upload(format!("upload is not valid UTF-8: {e}")))?;
    let table = FlatTable::from_csv(text)?;
    let collection = unflatten(&table)?;
    collection.validate()?;
    Ok(collection)
}
