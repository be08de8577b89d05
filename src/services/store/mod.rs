// Store service
// Seam to the authoritative calendar store: read, mutate, delete

pub mod error;
pub mod http;

use chrono::{DateTime, Utc};

use crate::models::activity::{ActivityKind, Version};
use crate::models::snapshot::ScheduleSnapshot;

pub use error::StoreError;
pub use http::HttpScheduleStore;

/// Which scheduling context to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleScope {
    pub event_id: i64,
}

/// One versioned create-or-update against the store.
///
/// Creation omits `id`; updates carry it and should carry `version` when
/// known so the store can compare-and-swap.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    pub kind: ActivityKind,
    pub id: Option<i64>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub court_id: Option<i64>,
    pub version: Option<Version>,
}

/// What a successful mutation returned.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub id: i64,
    /// The entity's new version token, when the store reports one.
    pub version: Option<Version>,
}

/// The authoritative store, as seen by this engine.
///
/// All methods are synchronous; the surrounding shell drives them from
/// its own event loop and uses the controller's busy flag to keep the
/// scheduling surface disabled while a call is outstanding.
pub trait ScheduleStore {
    /// Fetch the full snapshot for a scheduling context.
    fn fetch(&self, scope: &ScheduleScope) -> Result<ScheduleSnapshot, StoreError>;

    /// Create or update an activity under compare-and-swap.
    fn mutate(&self, request: &MutationRequest) -> Result<MutationOutcome, StoreError>;

    /// Remove a block or availability. Matches are never deleted through
    /// this path, only rescheduled or unassigned.
    fn delete(&self, kind: ActivityKind, id: i64) -> Result<(), StoreError>;
}
