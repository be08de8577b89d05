// Activity module
// Normalized view over the three schedulable entity kinds

use chrono::{DateTime, Duration, Utc};

/// Fallback planned duration for matches that declare neither a planned
/// end nor a duration.
pub const DEFAULT_MATCH_DURATION_MINUTES: i64 = 60;

/// The three schedulable entity kinds on a club calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    /// Court unavailable (maintenance, private booking, ...).
    Block,
    /// Player-declared unavailability window.
    Availability,
    /// Scheduled contest between two pairings.
    Match,
}

impl ActivityKind {
    /// Stable lowercase name, used for marker keys and the wire protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Block => "block",
            ActivityKind::Availability => "availability",
            ActivityKind::Match => "match",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque per-activity version token used for compare-and-swap mutations.
///
/// The authoritative store issues these; the engine only ever passes them
/// back verbatim and compares for equality. They must never be parsed or
/// ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(String);

impl Version {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Version {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// A time-bound entry on the calendar, normalized from one of the three
/// wire record shapes.
///
/// Activities are owned by the authoritative store; this engine reads
/// them, lays them out, and mutates them only through the store's
/// versioned mutation path. Invariant: `start < end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Court the activity occupies; absent for player availabilities and
    /// for matches not yet assigned a court.
    pub court_id: Option<i64>,
    /// Display name of the court, when the record carries one.
    pub court_name: Option<String>,
    /// Numeric court label, used when no id or name is known.
    pub court_number: Option<i64>,
    pub label: String,
    pub version: Option<Version>,
}

impl Activity {
    /// Create an activity with the required fields, validating the time
    /// window.
    pub fn new(
        kind: ActivityKind,
        id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        label: impl Into<String>,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("Activity end time must be after start time".to_string());
        }

        Ok(Self {
            kind,
            id,
            start,
            end,
            court_id: None,
            court_name: None,
            court_number: None,
            label: label.into(),
            version: None,
        })
    }

    /// Duration of the activity.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open interval overlap test against another activity.
    pub fn overlaps(&self, other: &Activity) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Marker key for a `(kind, id)` pair, e.g. `"block-7"`.
pub fn marker_key(kind: ActivityKind, id: i64) -> String {
    format!("{}-{}", kind.as_str(), id)
}
