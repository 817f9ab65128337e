// BPTrack Domain
// Classification, statistics and trend bucketing for blood pressure readings

// Domain entities
pub mod entities;

// Engine components and the reading service
pub mod services;

// Simulated data generation
pub mod simulation;

pub use entities::{
    Averages, Category, DistributionEntry, NewReading, Period, Reading, ReadingSummary,
    RecordedReading, Stats, Trend, TrendPoint,
};
pub use services::{analyze, bucket, bucket_in, classify, distribution, AnalysisError};
