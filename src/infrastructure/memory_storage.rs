use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::errors::CartError;
use crate::domain::ports::SnapshotStorage;

/// Process-local storage, used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for InMemorySnapshotStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CartError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CartError::Storage("snapshot lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CartError::Storage("snapshot lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
