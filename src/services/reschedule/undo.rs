// Single-slot undo for the last successful reschedule

use chrono::{DateTime, Utc};

use crate::models::activity::{Activity, ActivityKind, Version};
use crate::services::store::MutationRequest;

/// Snapshot of an activity's schedulable state as it was immediately
/// before the last successful mutation.
///
/// The version is the one observed before that mutation, so replaying
/// the snapshot is itself a compare-and-swap against whatever the store
/// considers current at undo time; an intervening edit by someone else
/// rejects the undo the same way it would reject any other mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUndo {
    pub kind: ActivityKind,
    pub id: i64,
    pub prev_start: DateTime<Utc>,
    pub prev_end: DateTime<Utc>,
    pub prev_court_id: Option<i64>,
    pub prev_duration_minutes: i64,
    pub prev_version: Option<Version>,
}

impl PendingUndo {
    /// Capture an activity's pre-mutation state.
    pub fn capture(activity: &Activity) -> Self {
        Self {
            kind: activity.kind,
            id: activity.id,
            prev_start: activity.start,
            prev_end: activity.end,
            prev_court_id: activity.court_id,
            prev_duration_minutes: activity.duration().num_minutes(),
            prev_version: activity.version.clone(),
        }
    }

    /// The mutation that restores the captured state.
    pub fn to_request(&self) -> MutationRequest {
        MutationRequest {
            kind: self.kind,
            id: Some(self.id),
            start_at: self.prev_start,
            end_at: self.prev_end,
            court_id: self.prev_court_id,
            version: self.prev_version.clone(),
        }
    }
}

/// Holds zero or one [`PendingUndo`].
///
/// Written only by the reschedule controller's success path; each new
/// mutation overwrites the slot, and a view-context change clears it.
/// Undo is scoped to "the last action in this view", not globally
/// durable.
#[derive(Debug, Default)]
pub struct UndoManager {
    slot: Option<PendingUndo>,
}

impl UndoManager {
    pub fn record(&mut self, snapshot: PendingUndo) {
        self.slot = Some(snapshot);
    }

    pub fn peek(&self) -> Option<&PendingUndo> {
        self.slot.as_ref()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
