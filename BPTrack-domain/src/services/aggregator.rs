use tracing::debug;

use crate::entities::blood_pressure::{Averages, Reading, Stats, Trend};
use crate::services::classifier::classify;
use crate::services::errors::AnalysisError;

/// How many of the most recent readings the trend looks at
pub const TREND_WINDOW: usize = 5;

/// Systolic change (mmHg) below which the trend counts as stable
pub const TREND_THRESHOLD: i32 = 5;

/// Calculate statistics over a set of readings.
///
/// Max and min are picked by systolic value; on ties the earliest reading in
/// input order wins. The trend is taken over the input order as given.
pub fn analyze(readings: &[Reading]) -> Result<Stats, AnalysisError> {
    let (first, rest) = readings.split_first().ok_or(AnalysisError::EmptyInput)?;

    let mut systolic_sum = u64::from(first.systolic);
    let mut diastolic_sum = u64::from(first.diastolic);
    let mut heart_rate_sum = u64::from(first.heart_rate);
    let mut max = first;
    let mut min = first;

    for reading in rest {
        systolic_sum += u64::from(reading.systolic);
        diastolic_sum += u64::from(reading.diastolic);
        heart_rate_sum += u64::from(reading.heart_rate);

        if reading.systolic > max.systolic {
            max = reading;
        }
        if reading.systolic < min.systolic {
            min = reading;
        }
    }

    let count = readings.len() as u64;
    let average = Averages {
        systolic: rounded_mean(systolic_sum, count),
        diastolic: rounded_mean(diastolic_sum, count),
        heart_rate: rounded_mean(heart_rate_sum, count),
    };
    let trend = trend(readings);

    debug!(
        count,
        systolic = average.systolic,
        diastolic = average.diastolic,
        ?trend,
        "Analyzed readings"
    );

    Ok(Stats {
        average,
        max: max.clone(),
        min: min.clone(),
        trend,
        category: classify(average.systolic, average.diastolic),
        count: readings.len(),
    })
}

/// Direction of the last [`TREND_WINDOW`] readings, judged on systolic
pub fn trend(readings: &[Reading]) -> Trend {
    let window = &readings[readings.len().saturating_sub(TREND_WINDOW)..];

    match (window.first(), window.last()) {
        (Some(first), Some(last)) => {
            let change = i32::from(last.systolic) - i32::from(first.systolic);
            if change.abs() < TREND_THRESHOLD {
                Trend::Stable
            } else if change > 0 {
                Trend::Rising
            } else {
                Trend::Falling
            }
        }
        _ => Trend::Stable,
    }
}

/// Mean rounded half-up. `count` must be non-zero.
fn rounded_mean(sum: u64, count: u64) -> u16 {
    // The mean of u16 values always fits back into a u16
    ((sum * 2 + count) / (count * 2)) as u16
}
