// Lane module
// Derived horizontal tracks; recomputed per render pass, never persisted

use super::activity::{Activity, ActivityKind};

/// Identity of a lane in the timeline.
///
/// Resolution order for an activity: explicit court id, then court
/// display name, then numeric court label, then a kind-specific fallback
/// bucket, so every activity always lands in exactly one lane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LaneKey {
    Court(i64),
    CourtName(String),
    CourtNumber(i64),
    Bucket(ActivityKind),
}

impl LaneKey {
    /// Resolve the lane an activity belongs to.
    pub fn for_activity(activity: &Activity) -> LaneKey {
        if let Some(court_id) = activity.court_id {
            return LaneKey::Court(court_id);
        }
        if let Some(name) = activity.court_name.as_deref() {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                return LaneKey::CourtName(trimmed.to_string());
            }
        }
        if let Some(number) = activity.court_number {
            return LaneKey::CourtNumber(number);
        }
        LaneKey::Bucket(activity.kind)
    }

    /// Fallback buckets sort after real courts; the availability bucket
    /// renders last, matching the calendar's bottom row.
    pub fn bucket_rank(&self) -> u8 {
        match self {
            LaneKey::Court(_) | LaneKey::CourtName(_) | LaneKey::CourtNumber(_) => 0,
            LaneKey::Bucket(ActivityKind::Block) => 1,
            LaneKey::Bucket(ActivityKind::Match) => 2,
            LaneKey::Bucket(ActivityKind::Availability) => 3,
        }
    }
}

/// A known court, used to seed its lane even when no activity occupies it
/// yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneHint {
    pub court_id: i64,
    pub label: String,
}

/// One horizontal track of the timeline: a court, or a fallback bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub key: LaneKey,
    pub label: String,
    pub court_id: Option<i64>,
    /// Items sorted by start ascending; ties keep input order.
    pub items: Vec<Activity>,
}

impl Lane {
    pub fn new(key: LaneKey, label: impl Into<String>, court_id: Option<i64>) -> Self {
        Self {
            key,
            label: label.into(),
            court_id,
            items: Vec::new(),
        }
    }
}

/// Display label for the lane an activity resolves to, derived from the
/// best court information the activity carries.
pub fn lane_label_for(activity: &Activity) -> String {
    if let Some(name) = activity.court_name.as_deref() {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    if let Some(number) = activity.court_number {
        return format!("Court {}", number);
    }
    if let Some(court_id) = activity.court_id {
        return format!("Court #{}", court_id);
    }
    match activity.kind {
        ActivityKind::Block => "Unassigned blocks".to_string(),
        ActivityKind::Availability => "Player availability".to_string(),
        ActivityKind::Match => "Unassigned matches".to_string(),
    }
}
