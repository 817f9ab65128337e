use serde::{Deserialize, Serialize};

/// Storage model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReading {
    /// Unique identifier assigned by the repository
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Heart rate in beats per minute
    pub heart_rate: u16,

    /// Optional note attached to the reading
    pub note: Option<String>,

    /// When the reading was taken, RFC 3339
    pub timestamp: String,
}

/// Input data for storing a new reading or replacing an existing one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStoredReading {
    pub systolic: u16,
    pub diastolic: u16,
    pub heart_rate: u16,
    pub note: Option<String>,
    pub timestamp: String,
}

impl NewStoredReading {
    /// Attach an id, producing the stored form
    pub fn into_stored(self, id: String) -> StoredReading {
        StoredReading {
            id,
            systolic: self.systolic,
            diastolic: self.diastolic,
            heart_rate: self.heart_rate,
            note: self.note,
            timestamp: self.timestamp,
        }
    }
}
