use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// A single blood pressure measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Systolic blood pressure in mmHg (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg (the lower number)
    pub diastolic: u16,

    /// Heart rate in beats per minute
    pub heart_rate: u16,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Reading {
    pub fn new(systolic: u16, diastolic: u16, heart_rate: u16, timestamp: DateTime<Utc>) -> Self {
        Self {
            systolic,
            diastolic,
            heart_rate,
            timestamp,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A reading together with the id its collection knows it by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedReading {
    pub id: String,
    #[serde(flatten)]
    pub reading: Reading,
}

/// Request payload for recording a reading.
///
/// The ranges are advisory input checks; the engine itself accepts any value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewReading {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 40, max = 250, message = "Systolic must be between 40 and 250"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 40, max = 250, message = "Diastolic must be between 40 and 250"))]
    pub diastolic: u16,

    /// Heart rate in beats per minute
    #[validate(range(min = 20, max = 250, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: u16,

    /// Optional note about the reading
    #[validate(length(max = 1000, message = "Note cannot exceed 1000 characters"))]
    pub note: Option<String>,

    /// When the reading was taken. Defaults to the current time if not provided.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Blood pressure category, in canonical enumeration order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Systolic 90-120 and diastolic 60-80
    Normal,

    /// Systolic 120-130 or diastolic 80-90
    Elevated,

    /// Systolic 130-180 or diastolic 90-120
    High,

    /// Systolic ≥ 180 or diastolic ≥ 120
    Crisis,

    /// Systolic ≤ 90 or diastolic ≤ 60
    Low,
}

impl Category {
    /// Every category in canonical order
    pub const ALL: [Category; 5] = [
        Category::Normal,
        Category::Elevated,
        Category::High,
        Category::Crisis,
        Category::Low,
    ];

    /// Position within [`Category::ALL`]
    pub fn index(self) -> usize {
        match self {
            Category::Normal => 0,
            Category::Elevated => 1,
            Category::High => 2,
            Category::Crisis => 3,
            Category::Low => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Normal => "Normal",
            Category::Elevated => "Elevated",
            Category::High => "High",
            Category::Crisis => "Crisis",
            Category::Low => "Low",
        }
    }

    /// Short guidance shown next to a classified reading
    pub fn description(self) -> &'static str {
        match self {
            Category::Normal => "Blood pressure is in the healthy range.",
            Category::Elevated => "Blood pressure is above normal; keep monitoring.",
            Category::High => "Blood pressure is high; consider talking to a doctor.",
            Category::Crisis => "Blood pressure is dangerously high; seek medical help now.",
            Category::Low => "Blood pressure is below normal.",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of recent systolic change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

/// Rounded mean of each measured field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Averages {
    pub systolic: u16,
    pub diastolic: u16,
    pub heart_rate: u16,
}

/// Aggregate statistics over a non-empty set of readings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    /// Rounded averages of every field
    pub average: Averages,

    /// Reading with the highest systolic value (first one on ties)
    pub max: Reading,

    /// Reading with the lowest systolic value (first one on ties)
    pub min: Reading,

    /// Direction of the last few readings
    pub trend: Trend,

    /// Category of the average systolic/diastolic pair
    pub category: Category,

    /// Number of readings analyzed
    pub count: usize,
}

/// Charting granularity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Buckets by hour of day
    Day,
    /// Buckets by day of week
    Week,
    /// Buckets by day of month
    Month,
    /// Buckets by month of year
    Year,
}

impl Period {
    /// Look-back window used when filtering records to this period
    pub fn span(self) -> Duration {
        match self {
            Period::Day => Duration::days(1),
            Period::Week => Duration::days(7),
            Period::Month => Duration::days(30),
            Period::Year => Duration::days(365),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a period name is not recognised
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown period '{0}', expected one of day, week, month, year")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// One aggregated point of a trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    /// Display label of the bucket, e.g. "08:00", "Mon", "14", "Mar"
    pub time: String,

    /// Bucket key: hour, weekday from Sunday, day of month, or zero-based month
    pub key: u32,

    pub systolic: u16,
    pub diastolic: u16,
    pub heart_rate: u16,

    /// Earliest timestamp within the bucket
    pub timestamp: DateTime<Utc>,
}

/// Share of readings falling into one category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionEntry {
    pub category: Category,
    pub count: usize,
    /// Rounded independently; entries may not total exactly 100
    pub percentage: u8,
}

/// Everything a dashboard needs for one period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadingSummary {
    pub period: Period,
    pub stats: Stats,
    pub series: Vec<TrendPoint>,
    pub distribution: Vec<DistributionEntry>,
}
