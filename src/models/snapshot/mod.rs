// Snapshot module
// Wire records from the authoritative calendar store and their
// normalization into activities

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::activity::{Activity, ActivityKind, Version, DEFAULT_MATCH_DURATION_MINUTES};
use super::conflict::ConflictRecord;

/// Court block as returned by the store's read endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtBlockRecord {
    pub id: i64,
    #[serde(default)]
    pub court_id: Option<i64>,
    pub start_at: String,
    pub end_at: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Player unavailability window as returned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub id: i64,
    #[serde(default)]
    pub player_profile_id: Option<i64>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_email: Option<String>,
    pub start_at: String,
    pub end_at: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Scheduled match as returned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: i64,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub planned_start_at: Option<String>,
    #[serde(default)]
    pub planned_end_at: Option<String>,
    #[serde(default)]
    pub planned_duration_minutes: Option<i64>,
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(default)]
    pub court_name: Option<String>,
    #[serde(default)]
    pub court_number: Option<i64>,
    #[serde(default)]
    pub round_label: Option<String>,
    #[serde(default)]
    pub group_label: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Everything the read endpoint returns for one scheduling context.
///
/// Owned by the store and refetched wholesale after every successful
/// mutation; the engine never patches it in place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    #[serde(default)]
    pub blocks: Vec<CourtBlockRecord>,
    #[serde(default)]
    pub availabilities: Vec<AvailabilityRecord>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    #[serde(default)]
    pub conflicts: Vec<ConflictRecord>,
    #[serde(default)]
    pub event_starts_at: Option<String>,
    #[serde(default)]
    pub event_ends_at: Option<String>,
    #[serde(default)]
    pub event_timezone: Option<String>,
    #[serde(default)]
    pub buffer_minutes: Option<i64>,
}

impl ScheduleSnapshot {
    /// Normalize every record into an [`Activity`]. Records with
    /// unparseable or inverted time windows are dropped with a warning;
    /// malformed input is not an error the organizer must act on.
    pub fn activities(&self) -> Vec<Activity> {
        let mut out = Vec::with_capacity(self.blocks.len() + self.availabilities.len() + self.matches.len());
        out.extend(self.blocks.iter().filter_map(CourtBlockRecord::to_activity));
        out.extend(self.availabilities.iter().filter_map(AvailabilityRecord::to_activity));
        out.extend(self.matches.iter().filter_map(MatchRecord::to_activity));
        out
    }

    /// The event's declared overall time window, when both ends parse.
    pub fn event_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_timestamp(self.event_starts_at.as_deref()?)?;
        let end = parse_timestamp(self.event_ends_at.as_deref()?)?;
        Some((start, end))
    }
}

impl CourtBlockRecord {
    pub fn to_activity(&self) -> Option<Activity> {
        let start = parse_timestamp(&self.start_at);
        let end = parse_timestamp(&self.end_at);
        let (Some(start), Some(end)) = (start, end) else {
            log::warn!("Dropping block {}: unparseable time window", self.id);
            return None;
        };
        if end <= start {
            log::warn!("Dropping block {}: end not after start", self.id);
            return None;
        }

        let label = self
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "Blocked".to_string());

        Some(Activity {
            kind: ActivityKind::Block,
            id: self.id,
            start,
            end,
            court_id: self.court_id,
            court_name: None,
            court_number: None,
            label,
            version: self.updated_at.clone().map(Version::new),
        })
    }
}

impl AvailabilityRecord {
    pub fn to_activity(&self) -> Option<Activity> {
        let start = parse_timestamp(&self.start_at);
        let end = parse_timestamp(&self.end_at);
        let (Some(start), Some(end)) = (start, end) else {
            log::warn!("Dropping availability {}: unparseable time window", self.id);
            return None;
        };
        if end <= start {
            log::warn!("Dropping availability {}: end not after start", self.id);
            return None;
        }

        let label = self
            .player_name
            .as_deref()
            .or(self.player_email.as_deref())
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "Player unavailable".to_string());

        Some(Activity {
            kind: ActivityKind::Availability,
            id: self.id,
            start,
            end,
            court_id: None,
            court_name: None,
            court_number: None,
            label,
            version: self.updated_at.clone().map(Version::new),
        })
    }
}

impl MatchRecord {
    /// Planned window of the match: the planned start wins over the live
    /// start time; a missing end is derived from the planned duration
    /// (default 60 minutes).
    pub fn window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self
            .planned_start_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.start_time.as_deref().and_then(parse_timestamp))?;

        let planned_end = self
            .planned_end_at
            .as_deref()
            .and_then(parse_timestamp)
            .filter(|end| *end > start);

        let end = planned_end.unwrap_or_else(|| {
            let minutes = self
                .planned_duration_minutes
                .filter(|m| *m > 0)
                .unwrap_or(DEFAULT_MATCH_DURATION_MINUTES);
            start + Duration::minutes(minutes)
        });

        Some((start, end))
    }

    pub fn to_activity(&self) -> Option<Activity> {
        let Some((start, end)) = self.window() else {
            log::warn!("Dropping match {}: no usable start time", self.id);
            return None;
        };

        let label = match (self.round_label.as_deref(), self.group_label.as_deref()) {
            (Some(round), Some(group)) => format!("{} · {}", round, group),
            (Some(round), None) => round.to_string(),
            (None, Some(group)) => group.to_string(),
            (None, None) => format!("Match #{}", self.id),
        };

        Some(Activity {
            kind: ActivityKind::Match,
            id: self.id,
            start,
            end,
            court_id: self.court_id,
            court_name: self.court_name.clone(),
            court_number: self.court_number,
            label,
            version: self.updated_at.clone().map(Version::new),
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
