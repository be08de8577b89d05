// Conflict module
// Authoritative conflict taxonomy and severity mapping

use serde::Deserialize;

use super::activity::ActivityKind;

/// Conflict categories computed by the authoritative store.
///
/// The rule set that produces these lives server-side; the engine treats
/// the categories as stable and only maps them onto activities for
/// display. Unknown categories deserialize as [`ConflictType::Unknown`]
/// so a newer server does not break an older client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Two blocks double-book the same court.
    BlockBlock,
    /// A block coincides with a scheduled match on the same court.
    BlockMatch,
    /// A pairing/player is committed to two overlapping matches.
    PlayerMatch,
    /// A match overlaps a player's declared unavailability.
    AvailabilityMatch,
    /// A match falls outside the event's overall time window.
    OutsideEventWindow,
    #[serde(other)]
    Unknown,
}

/// How strongly a conflict should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Genuine double booking; rendered blocking (red).
    Blocking,
    /// Heads-up only; rendered as a warning (amber).
    Advisory,
}

impl ConflictType {
    pub fn severity(&self) -> Severity {
        match self {
            ConflictType::BlockBlock | ConflictType::BlockMatch | ConflictType::PlayerMatch => {
                Severity::Blocking
            }
            ConflictType::AvailabilityMatch
            | ConflictType::OutsideEventWindow
            | ConflictType::Unknown => Severity::Advisory,
        }
    }

    /// The activity kinds of the `(a, b)` id pair carried by a conflict
    /// record of this type, or `None` when the type is not recognized.
    pub fn subject_kinds(&self) -> Option<(ActivityKind, ActivityKind)> {
        match self {
            ConflictType::BlockBlock => Some((ActivityKind::Block, ActivityKind::Block)),
            ConflictType::BlockMatch => Some((ActivityKind::Block, ActivityKind::Match)),
            ConflictType::PlayerMatch => Some((ActivityKind::Match, ActivityKind::Match)),
            ConflictType::AvailabilityMatch => {
                Some((ActivityKind::Availability, ActivityKind::Match))
            }
            ConflictType::OutsideEventWindow => Some((ActivityKind::Match, ActivityKind::Match)),
            ConflictType::Unknown => None,
        }
    }
}

/// One conflict edge as reported by the authoritative store.
#[derive(Debug, Clone, Deserialize)]
pub struct ConflictRecord {
    #[serde(rename = "type")]
    pub conflict_type: ConflictType,
    #[serde(rename = "aId")]
    pub a_id: i64,
    #[serde(rename = "bId")]
    pub b_id: i64,
    pub summary: String,
}

impl ConflictRecord {
    /// The marker subjects this record attaches to, as `(kind, id)`
    /// pairs. `outside_event_window` reports the same match as both ids
    /// and yields a single subject; unrecognized types yield none.
    pub fn subjects(&self) -> Vec<(ActivityKind, i64)> {
        let Some((a_kind, b_kind)) = self.conflict_type.subject_kinds() else {
            return Vec::new();
        };
        if self.conflict_type == ConflictType::OutsideEventWindow || (a_kind == b_kind && self.a_id == self.b_id) {
            return vec![(a_kind, self.a_id)];
        }
        vec![(a_kind, self.a_id), (b_kind, self.b_id)]
    }
}
