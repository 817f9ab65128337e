// Domain services
// The engine components are free functions over caller-supplied readings.
pub mod aggregator;
pub mod bucketer;
pub mod classifier;
pub mod distribution;
pub mod errors;
pub mod ranges;
pub mod readings;
pub mod summary;

// Re-export the engine entry points
pub use aggregator::{analyze, trend};
pub use bucketer::{bucket, bucket_in, within_period};
pub use classifier::{classify, classify_reading};
pub use distribution::distribution;
pub use errors::AnalysisError;
pub use readings::{ReadingService, ReadingServiceError, ReadingServiceTrait};
pub use summary::{summarize, summarize_in};
