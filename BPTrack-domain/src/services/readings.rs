use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

use bp_track_data::repository::{ReadingRepositoryTrait, RepositoryError};

use crate::entities::blood_pressure::{NewReading, Period, Reading, ReadingSummary, RecordedReading};
use crate::entities::conversions;
use crate::services::errors::AnalysisError;
use crate::services::bucketer::within_period;
use crate::services::summary::summarize;

/// Reading service errors
#[derive(Debug, Error)]
pub enum ReadingServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// Analysis error
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Trait for reading service operations
pub trait ReadingServiceTrait {
    /// Validate a new reading request
    fn validate_new_reading(&self, request: &NewReading) -> Result<(), ReadingServiceError>;

    /// Record a new reading
    fn record(&self, request: NewReading) -> Result<RecordedReading, ReadingServiceError>;

    /// Replace the reading with the given id by a new value
    fn replace(&self, id: &str, request: NewReading) -> Result<RecordedReading, ReadingServiceError>;

    /// Remove a reading
    fn remove(&self, id: &str) -> Result<(), ReadingServiceError>;

    /// Get a reading by ID
    fn get_reading(&self, id: &str) -> Result<RecordedReading, ReadingServiceError>;

    /// All readings, oldest first
    fn all_readings(&self) -> Result<Vec<RecordedReading>, ReadingServiceError>;

    /// Summary of the readings taken within `period` up to `now`
    fn summary(&self, period: Period, now: DateTime<Utc>) -> Result<ReadingSummary, ReadingServiceError>;
}

/// Reading service over an explicitly supplied repository
pub struct ReadingService<R: ReadingRepositoryTrait> {
    repository: R,
}

impl<R: ReadingRepositoryTrait> ReadingService<R> {
    /// Create a new reading service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> ReadingServiceError {
        match err {
            RepositoryError::NotFound(msg) => ReadingServiceError::NotFound(msg),
            RepositoryError::DateParse(msg) => ReadingServiceError::ValidationError(msg),
            _ => ReadingServiceError::RepositoryError(err.to_string()),
        }
    }

    fn to_domain(
        &self,
        stored: bp_track_data::models::StoredReading,
    ) -> Result<RecordedReading, ReadingServiceError> {
        conversions::convert_to_domain_reading(stored).map_err(|e| {
            warn!("Stored reading could not be converted: {}", e);
            ReadingServiceError::RepositoryError(e)
        })
    }
}

impl<R: ReadingRepositoryTrait> ReadingServiceTrait for ReadingService<R> {
    fn validate_new_reading(&self, request: &NewReading) -> Result<(), ReadingServiceError> {
        // Use the validator crate's validation
        if let Err(validation_errors) = request.validate() {
            let mut fields: Vec<_> = validation_errors.field_errors().into_iter().collect();
            fields.sort_by_key(|(field, _)| *field);

            let error_message = fields
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(ReadingServiceError::ValidationError(error_message));
        }

        if let Some(timestamp) = request.timestamp {
            if timestamp > Utc::now() {
                return Err(ReadingServiceError::ValidationError(
                    "Timestamp cannot be in the future".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn record(&self, request: NewReading) -> Result<RecordedReading, ReadingServiceError> {
        self.validate_new_reading(&request)?;

        let data_request = conversions::convert_to_data_new_reading(&request, Utc::now());
        let stored = self
            .repository
            .create(data_request)
            .map_err(|e| self.map_repo_error(e))?;

        info!("Recorded reading {}", stored.id);
        self.to_domain(stored)
    }

    fn replace(&self, id: &str, request: NewReading) -> Result<RecordedReading, ReadingServiceError> {
        self.validate_new_reading(&request)?;

        let data_request = conversions::convert_to_data_new_reading(&request, Utc::now());
        let stored = self
            .repository
            .replace(id, data_request)
            .map_err(|e| self.map_repo_error(e))?;

        info!("Replaced reading {}", id);
        self.to_domain(stored)
    }

    fn remove(&self, id: &str) -> Result<(), ReadingServiceError> {
        self.repository
            .delete(id)
            .map_err(|e| self.map_repo_error(e))?;

        info!("Removed reading {}", id);
        Ok(())
    }

    fn get_reading(&self, id: &str) -> Result<RecordedReading, ReadingServiceError> {
        let stored = self
            .repository
            .get_by_id(id)
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                ReadingServiceError::NotFound(format!("Reading with ID {} not found", id))
            })?;

        self.to_domain(stored)
    }

    fn all_readings(&self) -> Result<Vec<RecordedReading>, ReadingServiceError> {
        let mut readings = self
            .repository
            .get_all()
            .map_err(|e| self.map_repo_error(e))?
            .into_iter()
            .map(|stored| self.to_domain(stored))
            .collect::<Result<Vec<_>, _>>()?;

        // Stable, so readings sharing a timestamp stay in insertion order
        readings.sort_by_key(|recorded| recorded.reading.timestamp);
        Ok(readings)
    }

    fn summary(&self, period: Period, now: DateTime<Utc>) -> Result<ReadingSummary, ReadingServiceError> {
        let readings: Vec<Reading> = self
            .all_readings()?
            .into_iter()
            .map(|recorded| recorded.reading)
            .collect();
        let recent = within_period(&readings, period, now);

        Ok(summarize(&recent, period)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_track_data::models::{NewStoredReading, StoredReading};
    use chrono::{Duration, TimeZone};
    use mockall::mock;

    mock! {
        pub Repository {}

        impl ReadingRepositoryTrait for Repository {
            fn create(&self, request: NewStoredReading) -> Result<StoredReading, RepositoryError>;
            fn replace(&self, id: &str, request: NewStoredReading) -> Result<StoredReading, RepositoryError>;
            fn delete(&self, id: &str) -> Result<(), RepositoryError>;
            fn get_by_id(&self, id: &str) -> Result<Option<StoredReading>, RepositoryError>;
            fn get_all(&self) -> Result<Vec<StoredReading>, RepositoryError>;
            fn count(&self) -> Result<usize, RepositoryError>;
        }
    }

    fn new_reading(systolic: u16, diastolic: u16) -> NewReading {
        NewReading {
            systolic,
            diastolic,
            heart_rate: 72,
            note: None,
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()),
        }
    }

    fn stored(id: &str, systolic: u16, timestamp: &str) -> StoredReading {
        StoredReading {
            id: id.to_string(),
            systolic,
            diastolic: 80,
            heart_rate: 70,
            note: None,
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_validate_new_reading_valid() {
        let service = ReadingService::new(MockRepository::new());
        assert!(service.validate_new_reading(&new_reading(120, 80)).is_ok());
    }

    #[test]
    fn test_validate_new_reading_out_of_range() {
        let service = ReadingService::new(MockRepository::new());

        let error = service
            .validate_new_reading(&new_reading(300, 30))
            .unwrap_err()
            .to_string();

        assert!(error.contains("Systolic must be between 40 and 250"), "{}", error);
        assert!(error.contains("Diastolic must be between 40 and 250"), "{}", error);
    }

    #[test]
    fn test_validate_accepts_diastolic_above_systolic() {
        let service = ReadingService::new(MockRepository::new());
        assert!(service.validate_new_reading(&new_reading(90, 100)).is_ok());
    }

    #[test]
    fn test_validate_rejects_future_timestamp() {
        let service = ReadingService::new(MockRepository::new());
        let request = NewReading {
            timestamp: Some(Utc::now() + Duration::days(1)),
            ..new_reading(120, 80)
        };

        let error = service.validate_new_reading(&request).unwrap_err();
        assert!(error.to_string().contains("future"));
    }

    #[test]
    fn test_record_does_not_touch_repository_when_invalid() {
        let mut repo = MockRepository::new();
        repo.expect_create().never();
        let service = ReadingService::new(repo);

        let result = service.record(new_reading(20, 80));
        assert!(matches!(result, Err(ReadingServiceError::ValidationError(_))));
    }

    #[test]
    fn test_record_converts_stored_reading() {
        let mut repo = MockRepository::new();
        repo.expect_create()
            .withf(|request| request.systolic == 132 && request.timestamp.starts_with("2024-05-01T08:00:00"))
            .times(1)
            .returning(|request| Ok(request.into_stored("abc".to_string())));
        let service = ReadingService::new(repo);

        let recorded = service.record(new_reading(132, 85)).unwrap();

        assert_eq!(recorded.id, "abc");
        assert_eq!(recorded.reading.systolic, 132);
        assert_eq!(recorded.reading.timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_replace_unknown_id_maps_to_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_replace()
            .withf(|id, _| id.to_string() == "missing")
            .returning(|id, _| Err(RepositoryError::NotFound(id.to_string())));
        let service = ReadingService::new(repo);

        let result = service.replace("missing", new_reading(120, 80));
        assert!(matches!(result, Err(ReadingServiceError::NotFound(_))));
    }

    #[test]
    fn test_get_reading_missing() {
        let mut repo = MockRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        let service = ReadingService::new(repo);

        let error = service.get_reading("nope").unwrap_err();
        assert!(error.to_string().contains("nope"));
    }

    #[test]
    fn test_lock_errors_surface_as_repository_errors() {
        let mut repo = MockRepository::new();
        repo.expect_get_all()
            .returning(|| Err(RepositoryError::Lock("poisoned".to_string())));
        let service = ReadingService::new(repo);

        let result = service.all_readings();
        assert!(matches!(result, Err(ReadingServiceError::RepositoryError(_))));
    }

    #[test]
    fn test_all_readings_sorted_oldest_first() {
        let mut repo = MockRepository::new();
        repo.expect_get_all().returning(|| {
            Ok(vec![
                stored("late", 140, "2024-05-02T08:00:00Z"),
                stored("early", 120, "2024-05-01T08:00:00Z"),
                stored("tie", 125, "2024-05-01T08:00:00Z"),
            ])
        });
        let service = ReadingService::new(repo);

        let ids: Vec<String> = service
            .all_readings()
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, vec!["early", "tie", "late"]);
    }

    #[test]
    fn test_summary_without_readings() {
        let mut repo = MockRepository::new();
        repo.expect_get_all().returning(|| Ok(Vec::new()));
        let service = ReadingService::new(repo);

        let result = service.summary(Period::Week, Utc::now());
        assert!(matches!(
            result,
            Err(ReadingServiceError::Analysis(AnalysisError::EmptyInput))
        ));
    }

    #[test]
    fn test_summary_over_stored_readings() {
        let mut repo = MockRepository::new();
        repo.expect_get_all().returning(|| {
            Ok(vec![
                stored("a", 120, "2024-05-01T08:00:00Z"),
                stored("b", 140, "2024-05-02T08:00:00Z"),
            ])
        });
        let service = ReadingService::new(repo);

        let now = Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();

        let summary = service.summary(Period::Week, now).unwrap();
        assert_eq!(summary.stats.average.systolic, 130);
        assert_eq!(summary.series.len(), 2);
    }

    #[test]
    fn test_summary_excludes_readings_outside_period() {
        let mut repo = MockRepository::new();
        repo.expect_get_all().returning(|| {
            Ok(vec![
                stored("old", 190, "2024-01-05T08:00:00Z"),
                stored("today", 110, "2024-10-06T08:00:00Z"),
            ])
        });
        let service = ReadingService::new(repo);
        let now = Utc.with_ymd_and_hms(2024, 10, 6, 12, 0, 0).unwrap();

        let summary = service.summary(Period::Day, now).unwrap();

        assert_eq!(summary.stats.count, 1);
        assert_eq!(summary.stats.max.systolic, 110);
        assert_eq!(summary.series.len(), 1);
        assert_eq!(summary.series[0].systolic, 110);
    }

    #[test]
    fn test_summary_with_only_stale_readings() {
        let mut repo = MockRepository::new();
        repo.expect_get_all()
            .returning(|| Ok(vec![stored("old", 130, "2024-01-05T08:00:00Z")]));
        let service = ReadingService::new(repo);
        let now = Utc.with_ymd_and_hms(2024, 10, 6, 12, 0, 0).unwrap();

        let result = service.summary(Period::Month, now);
        assert!(matches!(
            result,
            Err(ReadingServiceError::Analysis(AnalysisError::EmptyInput))
        ));
    }

    #[test]
    fn test_date_parse_errors_map_to_validation() {
        let mut repo = MockRepository::new();
        repo.expect_create()
            .returning(|_| Err(RepositoryError::DateParse("bad timestamp".to_string())));
        let service = ReadingService::new(repo);

        let result = service.record(new_reading(120, 80));
        assert!(matches!(result, Err(ReadingServiceError::ValidationError(_))));
    }
}
