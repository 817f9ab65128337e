use chrono::DateTime;
use tracing::debug;
use uuid::Uuid;

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use crate::models::reading::{NewStoredReading, StoredReading};

/// Repository trait for blood pressure readings
pub trait ReadingRepositoryTrait: Send + Sync {
    /// Store a new reading and assign it an id
    fn create(&self, request: NewStoredReading) -> Result<StoredReading, RepositoryError>;

    /// Replace the reading with the given id by a new value
    fn replace(&self, id: &str, request: NewStoredReading) -> Result<StoredReading, RepositoryError>;

    /// Delete a reading by ID
    fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// Get a reading by ID
    fn get_by_id(&self, id: &str) -> Result<Option<StoredReading>, RepositoryError>;

    /// Get all readings in insertion order
    fn get_all(&self) -> Result<Vec<StoredReading>, RepositoryError>;

    /// Number of stored readings
    fn count(&self) -> Result<usize, RepositoryError>;
}

/// Repository for blood pressure readings backed by in-memory storage.
///
/// Each instance owns its own collection; clones share it.
#[derive(Debug, Clone, Default)]
pub struct ReadingRepository {
    storage: InMemoryStorage,
}

impl ReadingRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }
}

/// Reject timestamps that are not RFC 3339
fn check_timestamp(timestamp: &str) -> Result<(), RepositoryError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|_| ())
        .map_err(|e| RepositoryError::DateParse(format!("{}: {}", timestamp, e)))
}

impl ReadingRepositoryTrait for ReadingRepository {
    fn create(&self, request: NewStoredReading) -> Result<StoredReading, RepositoryError> {
        check_timestamp(&request.timestamp)?;

        let id = Uuid::new_v4().to_string();
        debug!("Storing reading {}", id);
        self.storage.store_reading(request.into_stored(id))
    }

    fn replace(&self, id: &str, request: NewStoredReading) -> Result<StoredReading, RepositoryError> {
        check_timestamp(&request.timestamp)?;

        debug!("Replacing reading {}", id);
        self.storage.replace_reading(request.into_stored(id.to_string()))
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        debug!("Deleting reading {}", id);
        self.storage.remove_reading(id).map(|_| ())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<StoredReading>, RepositoryError> {
        self.storage.get_by_id(id)
    }

    fn get_all(&self) -> Result<Vec<StoredReading>, RepositoryError> {
        self.storage.get_all()
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        self.storage.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(systolic: u16, timestamp: &str) -> NewStoredReading {
        NewStoredReading {
            systolic,
            diastolic: 80,
            heart_rate: 72,
            note: Some("after coffee".to_string()),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_create_assigns_uuid() {
        let repo = ReadingRepository::new();
        let stored = repo.create(request(120, "2024-03-01T08:00:00Z")).unwrap();

        assert!(Uuid::parse_str(&stored.id).is_ok());
        assert_eq!(stored.systolic, 120);
        assert_eq!(stored.note.as_deref(), Some("after coffee"));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_bad_timestamp() {
        let repo = ReadingRepository::new();
        let result = repo.create(request(120, "2024-03-01 08:00:00"));

        assert!(matches!(result, Err(RepositoryError::DateParse(_))));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_replace_by_identity() {
        let repo = ReadingRepository::new();
        let original = repo.create(request(120, "2024-03-01T08:00:00Z")).unwrap();

        let replaced = repo
            .replace(&original.id, request(135, "2024-03-01T08:05:00Z"))
            .unwrap();

        assert_eq!(replaced.id, original.id);
        let fetched = repo.get_by_id(&original.id).unwrap().unwrap();
        assert_eq!(fetched.systolic, 135);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_unknown_reading() {
        let repo = ReadingRepository::new();
        let result = repo.delete("not-a-reading");
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[test]
    fn test_clones_share_storage() {
        let repo = ReadingRepository::new();
        let handle = repo.clone();
        repo.create(request(120, "2024-03-01T08:00:00Z")).unwrap();

        assert_eq!(handle.get_all().unwrap().len(), 1);
    }
}
