use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use tracing::debug;

use crate::entities::blood_pressure::{Period, Reading, TrendPoint};
use crate::services::aggregator::analyze;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Group readings into period buckets, with calendar fields taken in UTC.
///
/// See [`bucket_in`].
pub fn bucket(readings: &[Reading], period: Period) -> Vec<TrendPoint> {
    bucket_in(readings, period, &Utc)
}

/// Group readings into period buckets and emit one averaged point per
/// non-empty bucket, in natural period order.
///
/// Hour, weekday, day and month are read in `tz`. For [`Period::Month`] the
/// bucket count is the length of the month holding the most recent reading;
/// readings on later days than that month has are dropped. Empty buckets are
/// left out rather than zero-filled.
pub fn bucket_in<Tz: TimeZone>(readings: &[Reading], period: Period, tz: &Tz) -> Vec<TrendPoint> {
    let mut sorted: Vec<&Reading> = readings.iter().collect();
    // Stable sort keeps input order between equal timestamps
    sorted.sort_by_key(|reading| reading.timestamp);

    let Some(latest) = sorted.last() else {
        return Vec::new();
    };

    let slots = slot_count(period, &latest.timestamp.with_timezone(tz));
    let mut buckets: Vec<Vec<Reading>> = vec![Vec::new(); slots];

    for reading in sorted {
        let slot = slot_of(period, &reading.timestamp.with_timezone(tz));
        if let Some(bucket) = buckets.get_mut(slot) {
            bucket.push(reading.clone());
        }
    }

    let series: Vec<TrendPoint> = buckets
        .iter()
        .enumerate()
        .filter_map(|(slot, bucket)| {
            let stats = analyze(bucket).ok()?;
            Some(TrendPoint {
                time: slot_label(period, slot),
                key: slot_key(period, slot),
                systolic: stats.average.systolic,
                diastolic: stats.average.diastolic,
                heart_rate: stats.average.heart_rate,
                timestamp: bucket[0].timestamp,
            })
        })
        .collect();

    debug!(%period, readings = readings.len(), points = series.len(), "Bucketed readings");
    series
}

/// Keep readings taken within `period.span()` before `now`, `now` included
pub fn within_period(readings: &[Reading], period: Period, now: DateTime<Utc>) -> Vec<Reading> {
    let start = now - period.span();
    readings
        .iter()
        .filter(|reading| reading.timestamp > start && reading.timestamp <= now)
        .cloned()
        .collect()
}

fn slot_count<Tz: TimeZone>(period: Period, reference: &DateTime<Tz>) -> usize {
    match period {
        Period::Day => 24,
        Period::Week => 7,
        Period::Month => days_in_month(reference.year(), reference.month()),
        Period::Year => 12,
    }
}

/// Zero-based slot index for a timestamp
fn slot_of<Tz: TimeZone>(period: Period, at: &DateTime<Tz>) -> usize {
    let index = match period {
        Period::Day => at.hour(),
        Period::Week => at.weekday().num_days_from_sunday(),
        Period::Month => at.day0(),
        Period::Year => at.month0(),
    };
    index as usize
}

/// Bucket key as exposed on a point; days of month count from 1
fn slot_key(period: Period, slot: usize) -> u32 {
    match period {
        Period::Month => slot as u32 + 1,
        _ => slot as u32,
    }
}

fn slot_label(period: Period, slot: usize) -> String {
    match period {
        Period::Day => format!("{:02}:00", slot),
        Period::Week => WEEKDAY_LABELS[slot].to_string(),
        Period::Month => (slot + 1).to_string(),
        Period::Year => MONTH_LABELS[slot].to_string(),
    }
}

fn days_in_month(year: i32, month: u32) -> usize {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as usize,
        _ => 31,
    }
}
