//! Record model for ZTP documents.
//!
//! A document is a [`Collection`]: an ordered list of [`Entry`] records. Each
//! entry maps keys to a [`Scalar`] or to one nested [`Group`] of scalars.
//! All maps are insertion ordered, because key order decides the CSV column
//! order on export.
//!
//! ```
//! use serde_json::json;
//! use ztp_tools::model::Collection;
//!
//! let doc = json!([{"name": "default"}, {"stack": {"ip": "10.0.0.1"}, "name": "r1"}]);
//! let collection = Collection::from_json(&doc).unwrap();
//! assert_eq!(collection.len(), 2);
//! assert_eq!(collection.to_json(), doc);
//! ```

mod collection;
mod entry;

pub use collection::Collection;
pub use entry::{Entry, FieldValue, Group, GroupConflict, STACK_KEY, SUBST_KEY, Scalar};
