//! JSON file backed document store.

use super::{DocumentStore, write_atomic};
use crate::error::{Result, ZtpError};
use crate::model::Collection;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Indent width of the persisted document.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Stores the collection as a pretty-printed JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    indent: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            indent: DEFAULT_JSON_INDENT,
        }
    }

    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Collection> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no document yet, serving empty entry");
                return Ok(Collection::empty_document());
            }
            Err(e) => return Err(ZtpError::io(&self.path, e)),
        };

        let document: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ZtpError::corrupt(&self.path, e.to_string()))?;
        let collection = Collection::from_json(&document)
            .map_err(|e| ZtpError::corrupt(&self.path, e.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            entries = collection.len(),
            "document loaded"
        );
        Ok(collection)
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        if let Err(shape) = collection.validate() {
            tracing::warn!(path = %self.path.display(), reason = %shape, "rejected document write");
            return Err(shape.into());
        }
        let bytes = collection.to_pretty_json(self.indent)?;
        write_atomic(&self.path, &bytes)?;

        tracing::info!(
            path = %self.path.display(),
            entries = collection.len(),
            "document saved"
        );
        Ok(())
    }
}
