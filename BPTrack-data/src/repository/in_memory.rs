use std::sync::{Arc, Mutex};

use indexmap::IndexMap;

use super::errors::RepositoryError;
use crate::models::reading::StoredReading;

/// In-memory storage for readings, keyed by id in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    readings: Arc<Mutex<IndexMap<String, StoredReading>>>,
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reading in memory
    pub fn store_reading(&self, reading: StoredReading) -> Result<StoredReading, RepositoryError> {
        let mut store = self.readings.lock()?;
        store.insert(reading.id.clone(), reading.clone());
        Ok(reading)
    }

    /// Swap the reading stored under `reading.id`, keeping its position
    pub fn replace_reading(&self, reading: StoredReading) -> Result<StoredReading, RepositoryError> {
        let mut store = self.readings.lock()?;
        match store.get_mut(&reading.id) {
            Some(slot) => {
                *slot = reading.clone();
                Ok(reading)
            }
            None => Err(RepositoryError::NotFound(reading.id)),
        }
    }

    /// Remove a reading, returning it
    pub fn remove_reading(&self, id: &str) -> Result<StoredReading, RepositoryError> {
        let mut store = self.readings.lock()?;
        store
            .shift_remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    /// Get all readings in insertion order
    pub fn get_all(&self) -> Result<Vec<StoredReading>, RepositoryError> {
        let store = self.readings.lock()?;
        Ok(store.values().cloned().collect())
    }

    /// Get a reading by ID
    pub fn get_by_id(&self, id: &str) -> Result<Option<StoredReading>, RepositoryError> {
        let store = self.readings.lock()?;
        Ok(store.get(id).cloned())
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.readings.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.readings.lock()?.is_empty())
    }
}
