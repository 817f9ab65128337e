use bp_track_data::models::reading::{NewStoredReading, StoredReading};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::entities::blood_pressure::{NewReading, Reading, RecordedReading};

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Parse an RFC 3339 timestamp into UTC
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("Invalid timestamp format: {}", timestamp))
}

/// Convert from data model to domain entity
pub fn convert_to_domain_reading(stored: StoredReading) -> Result<RecordedReading, String> {
    let timestamp = parse_timestamp(&stored.timestamp)?;

    Ok(RecordedReading {
        id: stored.id,
        reading: Reading {
            systolic: stored.systolic,
            diastolic: stored.diastolic,
            heart_rate: stored.heart_rate,
            timestamp,
            note: stored.note,
        },
    })
}

/// Convert a validated request to the data model, stamping `now` when no timestamp was given
pub fn convert_to_data_new_reading(request: &NewReading, now: DateTime<Utc>) -> NewStoredReading {
    NewStoredReading {
        systolic: request.systolic,
        diastolic: request.diastolic,
        heart_rate: request.heart_rate,
        note: request.note.clone(),
        timestamp: request
            .timestamp
            .unwrap_or(now)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
