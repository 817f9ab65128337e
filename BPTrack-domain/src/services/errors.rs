use thiserror::Error;

/// Errors raised by the analysis engine
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The collection held no readings, so nothing can be computed
    #[error("Insufficient data: no readings available to analyze")]
    EmptyInput,
}
