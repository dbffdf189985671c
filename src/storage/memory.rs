use std::collections::HashMap;
use std::sync::Mutex;

use super::{Backend, StorageError};

/// Backend keeping every collection in a process-local map. Used by
/// tests and as the default substrate before a file store is wired in.
#[derive(Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<String, String>>,
}

impl Backend for MemoryBackend {
    fn get(&self, collection: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .collections
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(map.get(collection).cloned())
    }

    fn set(&self, collection: &str, payload: &str) -> Result<(), StorageError> {
        let mut map = self
            .collections
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        map.insert(collection.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, collection: &str) -> Result<(), StorageError> {
        let mut map = self
            .collections
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        map.remove(collection);
        Ok(())
    }
}
