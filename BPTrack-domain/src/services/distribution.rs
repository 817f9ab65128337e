use tracing::debug;

use crate::entities::blood_pressure::{Category, DistributionEntry, Reading};
use crate::services::classifier::classify_reading;
use crate::services::errors::AnalysisError;

/// Share of readings per category.
///
/// Always returns all five categories in canonical order, zero counts
/// included. Each percentage is rounded on its own, so the total may drift
/// from 100 by a point or two.
pub fn distribution(readings: &[Reading]) -> Result<Vec<DistributionEntry>, AnalysisError> {
    if readings.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut counts = [0usize; Category::ALL.len()];
    for reading in readings {
        counts[classify_reading(reading).index()] += 1;
    }

    let total = readings.len();
    debug!(total, ?counts, "Computed category distribution");

    Ok(Category::ALL
        .iter()
        .map(|&category| {
            let count = counts[category.index()];
            DistributionEntry {
                category,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect())
}

/// `count / total * 100` rounded half-up
fn percentage(count: usize, total: usize) -> u8 {
    ((count * 200 + total) / (total * 2)) as u8
}
