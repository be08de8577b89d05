// Slot snapping for drop-derived start times

use chrono::{DateTime, TimeZone, Utc};

/// Fallback when a configured granularity is out of range.
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 15;

/// Round `ts` to the nearest multiple of `granularity_minutes`, zeroing
/// seconds and sub-second precision. Ties round up, and the carry
/// propagates into the next hour or day as needed.
///
/// Only applied when a start time is derived from a pointer position;
/// explicit duration nudges already move in granularity-sized steps.
pub fn snap_to_slot(ts: DateTime<Utc>, granularity_minutes: u32) -> DateTime<Utc> {
    let granularity = if (1..=1440).contains(&granularity_minutes) {
        granularity_minutes
    } else {
        log::warn!(
            "Snap granularity {} out of range, using {}",
            granularity_minutes,
            DEFAULT_GRANULARITY_MINUTES
        );
        DEFAULT_GRANULARITY_MINUTES
    };

    let step = i64::from(granularity) * 60;
    let rounded = (ts.timestamp() + step / 2).div_euclid(step) * step;
    Utc.timestamp_opt(rounded, 0).single().unwrap_or(ts)
}
