// Test fixtures - reusable scheduling data
// Provides consistent activities, lanes, and snapshots across test files

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use court_scheduler::models::activity::{Activity, ActivityKind, Version};
use court_scheduler::models::lane::{Lane, LaneKey};
use court_scheduler::models::settings::SchedulerConfig;
use court_scheduler::utils::date::DayWindow;

/// The reference day used throughout the suite: 2025-06-14, UTC.
pub fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

pub fn utc_window() -> DayWindow {
    DayWindow::for_date(test_day(), chrono_tz::UTC)
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 14, hour, minute, 0).unwrap()
}

/// Horizontal fraction of the test day at which `hour:minute` falls.
pub fn fraction_at(hour: u32, minute: u32) -> f64 {
    f64::from(hour * 60 + minute) / 1440.0
}

pub fn config() -> SchedulerConfig {
    SchedulerConfig::default()
}

/// A match on a court, with a version token.
pub fn match_on_court(id: i64, court_id: i64, start_h: u32, start_m: u32, minutes: i64) -> Activity {
    let start = at(start_h, start_m);
    let mut activity = Activity::new(
        ActivityKind::Match,
        id,
        start,
        start + chrono::Duration::minutes(minutes),
        format!("Match #{}", id),
    )
    .unwrap();
    activity.court_id = Some(court_id);
    activity.version = Some(Version::new(format!("v{}", id)));
    activity
}

/// A match not yet assigned to any court.
pub fn unassigned_match(id: i64, start_h: u32, minutes: i64) -> Activity {
    let start = at(start_h, 0);
    let mut activity = Activity::new(
        ActivityKind::Match,
        id,
        start,
        start + chrono::Duration::minutes(minutes),
        format!("Match #{}", id),
    )
    .unwrap();
    activity.version = Some(Version::new(format!("v{}", id)));
    activity
}

/// A court block with a version token.
pub fn block_on_court(id: i64, court_id: i64, start_h: u32, start_m: u32, minutes: i64) -> Activity {
    let start = at(start_h, start_m);
    let mut activity = Activity::new(
        ActivityKind::Block,
        id,
        start,
        start + chrono::Duration::minutes(minutes),
        "Maintenance",
    )
    .unwrap();
    activity.court_id = Some(court_id);
    activity.version = Some(Version::new(format!("v{}", id)));
    activity
}

/// An empty lane for the given court.
pub fn court_lane(court_id: i64) -> Lane {
    Lane::new(
        LaneKey::Court(court_id),
        format!("Court {}", court_id),
        Some(court_id),
    )
}
