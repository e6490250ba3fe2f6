//! In-memory document store.

use super::DocumentStore;
use crate::error::Result;
use crate::model::Collection;
use std::sync::{Mutex, PoisonError};

/// Keeps the collection in process memory. Useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<Collection>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `collection`, unvalidated.
    #[must_use]
    pub fn with_document(collection: Collection) -> Self {
        Self {
            document: Mutex::new(Some(collection)),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Collection> {
        let guard = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone().unwrap_or_else(Collection::empty_document))
    }

    fn save(&self, collection: &Collection) -> Result<()> {
        collection.validate()?;
        let mut guard = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(collection.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;

    #[test]
    fn test_fresh_store_serves_empty_entry() {
        assert_eq!(MemoryStore::new().load().unwrap(), Collection::empty_document());
    }

    #[test]
    fn test_invalid_save_keeps_previous() {
        let store = MemoryStore::new();
        let mut entry = Entry::new();
        entry.insert("name", "default");
        let good = Collection::new(vec![entry]);
        store.save(&good).unwrap();

        let bad = Collection::new(vec![Entry::new(), Entry::new()]);
        assert!(store.save(&bad).is_err());
        assert_eq!(store.load().unwrap(), good);
    }

    #[test]
    fn test_preloaded_document_is_served_as_is() {
        let mut entry = Entry::new();
        entry.insert("stack", "not-a-group");
        let preloaded = Collection::new(vec![entry]);

        let store = MemoryStore::with_document(preloaded.clone());
        assert_eq!(store.load().unwrap(), preloaded);
    }
}
