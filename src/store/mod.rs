//! Persistence of the ZTP document and the status log.
//!
//! The [`DocumentStore`] trait is the seam between the boundary operations
//! and storage. Implementations validate before writing and never leave a
//! partially written document behind.

mod file;
mod memory;
pub mod status;

pub use file::{DEFAULT_JSON_INDENT, JsonFileStore};
pub use memory::MemoryStore;
pub use status::StatusLog;

use crate::error::{Result, ZtpError};
use crate::model::Collection;
use serde_json::Value;
use std::io::Write as _;
use std::path::Path;

/// Whole-document load/save of a collection.
pub trait DocumentStore {
    /// Load the stored collection, or `[{}]` when nothing has been stored.
    fn load(&self) -> Result<Collection>;

    /// Validate and persist `collection`, replacing the previous document.
    ///
    /// On any error the previously stored document is left untouched.
    fn save(&self, collection: &Collection) -> Result<()>;

    /// Validate a raw JSON document, then save it.
    fn save_json(&self, document: &Value) -> Result<Collection> {
        let collection = Collection::from_json(document)?;
        self.save(&collection)?;
        Ok(collection)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load(&self) -> Result<Collection> {
        (**self).load()
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        (**self).save(collection)
    }
}

/// Replace `path` with `bytes` via a synced temp file in the same directory.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| ZtpError::io(dir, e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".ztp-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| ZtpError::io(dir, e))?;
    temp.write_all(bytes).map_err(|e| ZtpError::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| ZtpError::io(temp.path(), e))?;
    temp.persist(path).map_err(|e| ZtpError::io(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "file replaced atomically");
    Ok(())
}
