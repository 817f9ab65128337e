// Domain entities and value objects
pub mod blood_pressure;
pub mod conversions;

// Re-export common types for easier imports
pub use blood_pressure::{
    Averages, Category, DistributionEntry, NewReading, ParsePeriodError, Period, Reading,
    ReadingSummary, RecordedReading, Stats, Trend, TrendPoint,
};
