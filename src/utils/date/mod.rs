// Date utility functions
// Day windows in the event's declared timezone

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// One rendered day: `[start, end)` in UTC, where the bounds are local
/// midnight to next local midnight in the view's declared timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Build the window for `date` in `tz`.
    pub fn for_date(date: NaiveDate, tz: Tz) -> Self {
        Self {
            start: local_midnight(date, tz),
            end: local_midnight(date + Duration::days(1), tz),
        }
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }

    /// Fraction of the day at which `ts` falls, clamped into [0, 1].
    pub fn fraction_of(&self, ts: DateTime<Utc>) -> f64 {
        let day_secs = self.length().num_seconds();
        if day_secs <= 0 {
            return 0.0;
        }
        let offset = (ts - self.start).num_seconds();
        (offset as f64 / day_secs as f64).clamp(0.0, 1.0)
    }

    /// Inverse of [`Self::fraction_of`]: the timestamp a horizontal
    /// fraction of the rendered lane maps back to. Used when a drop
    /// position is converted into a candidate start time.
    pub fn timestamp_at_fraction(&self, fraction: f64) -> DateTime<Utc> {
        let day_secs = self.length().num_seconds();
        let offset = (fraction.clamp(0.0, 1.0) * day_secs as f64).round() as i64;
        self.start + Duration::seconds(offset.clamp(0, day_secs))
    }

    /// Half-open overlap with an activity interval.
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && self.start < end
    }
}

/// Local midnight of `date` in `tz`, as UTC.
///
/// A DST transition can make midnight ambiguous or nonexistent; the
/// earliest valid interpretation wins, and a nonexistent midnight falls
/// forward to the transition's resolved wall time.
fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
            dt.with_timezone(&Utc)
        }
        chrono::LocalResult::None => {
            // Midnight skipped by a DST gap; advance in half-hour steps
            // until a representable local time is found.
            let mut candidate = naive;
            for _ in 0..4 {
                candidate += Duration::minutes(30);
                if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            Utc.from_utc_datetime(&naive)
        }
    }
}

/// Parse a declared timezone name, defaulting to UTC when missing or
/// unknown.
pub fn resolve_timezone(name: Option<&str>) -> Tz {
    match name {
        Some(raw) => raw.parse::<Tz>().unwrap_or_else(|_| {
            log::warn!("Unknown timezone {:?}, falling back to UTC", raw);
            chrono_tz::UTC
        }),
        None => chrono_tz::UTC,
    }
}
