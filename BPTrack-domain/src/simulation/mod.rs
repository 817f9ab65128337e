//! Simulated readings for demos and first-run screens.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::entities::blood_pressure::Reading;

/// Generate `count` plausible readings, oldest first, the last one taken at
/// `end` and each `spacing` apart. Timestamps that would fall before the
/// earliest representable instant are clamped to it.
pub fn simulate_readings<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    end: DateTime<Utc>,
    spacing: Duration,
) -> Vec<Reading> {
    (0..count)
        .map(|i| {
            Reading::new(
                rng.gen_range(95..=165),
                rng.gen_range(60..=100),
                rng.gen_range(55..=100),
                steps_before(end, spacing, count - 1 - i),
            )
        })
        .collect()
}

fn steps_before(end: DateTime<Utc>, spacing: Duration, steps: usize) -> DateTime<Utc> {
    i32::try_from(steps)
        .ok()
        .and_then(|steps| spacing.checked_mul(steps))
        .and_then(|back| end.checked_sub_signed(back))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Hourly readings ending now, drawn from the thread-local generator
pub fn simulate_recent_readings(count: usize) -> Vec<Reading> {
    simulate_readings(&mut rand::thread_rng(), count, Utc::now(), Duration::hours(1))
}
