use chrono::{TimeZone, Utc};

use crate::entities::blood_pressure::{Period, Reading, ReadingSummary};
use crate::services::aggregator::analyze;
use crate::services::bucketer::bucket_in;
use crate::services::distribution::distribution;
use crate::services::errors::AnalysisError;

/// Stats, trend series and distribution for one period, bucketed in UTC
pub fn summarize(readings: &[Reading], period: Period) -> Result<ReadingSummary, AnalysisError> {
    summarize_in(readings, period, &Utc)
}

/// Stats, trend series and distribution for one period, bucketed in `tz`
pub fn summarize_in<Tz: TimeZone>(
    readings: &[Reading],
    period: Period,
    tz: &Tz,
) -> Result<ReadingSummary, AnalysisError> {
    let stats = analyze(readings)?;
    let distribution = distribution(readings)?;
    let series = bucket_in(readings, period, tz);

    Ok(ReadingSummary {
        period,
        stats,
        series,
        distribution,
    })
}
