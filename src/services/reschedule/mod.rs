// Reschedule service
// Orchestrates drag/drop and nudge interactions against the store:
// validate, issue a versioned mutation, then request a full refresh

pub mod undo;

use chrono::{DateTime, Duration, Utc};

use crate::models::activity::{Activity, ActivityKind, Version};
use crate::models::lane::Lane;
use crate::models::settings::SchedulerConfig;
use crate::services::layout::snap::snap_to_slot;
use crate::services::store::{MutationRequest, ScheduleStore, StoreError};
use crate::utils::date::DayWindow;

pub use undo::{PendingUndo, UndoManager};

/// How strongly a banner should be styled by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// Message surfaced to the dashboard shell. Failures never propagate
/// beyond the controller; this is the only channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self { severity: NoticeSeverity::Info, message: message.into() }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self { severity: NoticeSeverity::Warning, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { severity: NoticeSeverity::Error, message: message.into() }
    }
}

/// How an interaction resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    /// The store accepted the mutation; a refresh has been requested.
    Settled,
    /// Rejected locally or by the store; nothing changed.
    Rejected,
    /// Ignored: no drag in progress, or another mutation is in flight.
    Skipped,
}

/// Identity and window captured when a drag begins; the mutation built
/// at drop time uses this version, not whatever a refresh may have
/// delivered in between.
#[derive(Debug, Clone, PartialEq)]
struct DragContext {
    kind: ActivityKind,
    id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    court_id: Option<i64>,
    version: Option<Version>,
}

/// Direction for a slot nudge on an item's end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Extend,
    Shrink,
}

/// State machine driving reschedule interactions.
///
/// idle → dragging → dropped → mutating → settled | rejected. The
/// controller never patches activity lists locally: a settled mutation
/// raises the refresh flag and the shell refetches, so the rendered
/// state cannot diverge from the authoritative store.
pub struct RescheduleController<'a, S: ScheduleStore> {
    store: &'a S,
    config: SchedulerConfig,
    drag: Option<DragContext>,
    in_flight: bool,
    undo: UndoManager,
    notice: Option<Notice>,
    needs_refresh: bool,
}

impl<'a, S: ScheduleStore> RescheduleController<'a, S> {
    pub fn new(store: &'a S, config: SchedulerConfig) -> Self {
        Self {
            store,
            config,
            drag: None,
            in_flight: false,
            undo: UndoManager::default(),
            notice: None,
            needs_refresh: false,
        }
    }

    /// Coarse mutex over the scheduling surface: while true, the shell
    /// keeps drag, nudge, and the create/edit forms disabled.
    pub fn busy(&self) -> bool {
        self.in_flight
    }

    pub fn banner(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.notice = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn pending_undo(&self) -> Option<&PendingUndo> {
        self.undo.peek()
    }

    /// True once after every settled mutation; consuming it obliges the
    /// shell to refetch the snapshot.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_refresh)
    }

    /// idle → dragging. Returns false while a mutation is in flight.
    pub fn begin_drag(&mut self, activity: &Activity) -> bool {
        if self.in_flight {
            log::debug!("Drag ignored: mutation in flight");
            return false;
        }
        self.drag = Some(DragContext {
            kind: activity.kind,
            id: activity.id,
            start: activity.start,
            end: activity.end,
            court_id: activity.court_id,
            version: activity.version.clone(),
        });
        true
    }

    /// dragging → idle without a request.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// dragging → dropped → mutating → settled | rejected.
    ///
    /// `fraction` is the drop's horizontal position within the lane's
    /// rendered width. The new start is the snapped inversion of that
    /// fraction; duration is always preserved on a plain drag, and the
    /// court changes only when the drop lane is a different court.
    pub fn drop_on_lane(
        &mut self,
        lane: &Lane,
        fraction: f64,
        window: &DayWindow,
    ) -> MutationStatus {
        let Some(ctx) = self.drag.take() else {
            log::debug!("Drop ignored: no drag in progress");
            return MutationStatus::Skipped;
        };

        // A match that has no court yet cannot be relocated by drag.
        if ctx.kind == ActivityKind::Match && ctx.court_id.is_none() {
            self.notice = Some(Notice::warning(
                "Assign a court to this match before moving it on the calendar.",
            ));
            return MutationStatus::Rejected;
        }

        let new_start = snap_to_slot(
            window.timestamp_at_fraction(fraction),
            self.config.slot_granularity_minutes,
        );
        let duration = ctx.end - ctx.start;

        let request = MutationRequest {
            kind: ctx.kind,
            id: Some(ctx.id),
            start_at: new_start,
            end_at: new_start + duration,
            court_id: lane.court_id.or(ctx.court_id),
            version: ctx.version.clone(),
        };

        let undo = PendingUndo {
            kind: ctx.kind,
            id: ctx.id,
            prev_start: ctx.start,
            prev_end: ctx.end,
            prev_court_id: ctx.court_id,
            prev_duration_minutes: (ctx.end - ctx.start).num_minutes(),
            prev_version: ctx.version,
        };

        let status = self.submit(&request);
        if status == MutationStatus::Settled {
            self.undo.record(undo);
        }
        status
    }

    /// Adjust an item's end by one granularity unit, start held fixed.
    /// Bypasses the drag gesture but follows the identical mutate /
    /// settle / reject path, including the undo snapshot.
    pub fn nudge_end(&mut self, activity: &Activity, direction: NudgeDirection) -> MutationStatus {
        let step = Duration::minutes(i64::from(self.config.slot_granularity_minutes));
        let new_end = match direction {
            NudgeDirection::Extend => activity.end + step,
            NudgeDirection::Shrink => activity.end - step,
        };

        if new_end <= activity.start {
            self.notice = Some(Notice::warning(
                "An entry cannot shrink below one slot.",
            ));
            return MutationStatus::Rejected;
        }

        let request = MutationRequest {
            kind: activity.kind,
            id: Some(activity.id),
            start_at: activity.start,
            end_at: new_end,
            court_id: activity.court_id,
            version: activity.version.clone(),
        };

        let status = self.submit(&request);
        if status == MutationStatus::Settled {
            self.undo.record(PendingUndo::capture(activity));
        }
        status
    }

    /// Replay the last snapshot through the mutation path. The snapshot
    /// carries the version observed before the action being undone, so a
    /// stale undo is rejected by the store like any other mutation and
    /// is never retried with a guessed version.
    pub fn undo(&mut self) -> MutationStatus {
        let Some(snapshot) = self.undo.peek().cloned() else {
            log::debug!("Undo ignored: empty slot");
            return MutationStatus::Skipped;
        };

        let status = self.submit(&snapshot.to_request());
        if status == MutationStatus::Settled {
            self.undo.clear();
        }
        status
    }

    /// Create a court block. No undo snapshot: only reschedule-type
    /// mutations are revertible.
    pub fn create_block(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        court_id: Option<i64>,
    ) -> MutationStatus {
        self.create(ActivityKind::Block, start, end, court_id)
    }

    /// Declare a player unavailability window.
    pub fn create_availability(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> MutationStatus {
        self.create(ActivityKind::Availability, start, end, None)
    }

    fn create(
        &mut self,
        kind: ActivityKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        court_id: Option<i64>,
    ) -> MutationStatus {
        if end <= start {
            self.notice = Some(Notice::warning("The end time must be after the start time."));
            return MutationStatus::Rejected;
        }

        self.submit(&MutationRequest {
            kind,
            id: None,
            start_at: start,
            end_at: end,
            court_id,
            version: None,
        })
    }

    /// Remove a block or availability. Matches never leave the calendar
    /// through this path.
    pub fn delete_activity(&mut self, kind: ActivityKind, id: i64) -> MutationStatus {
        if kind == ActivityKind::Match {
            self.notice = Some(Notice::warning(
                "Matches cannot be deleted here; reschedule or unassign them instead.",
            ));
            return MutationStatus::Rejected;
        }
        if self.in_flight {
            self.notice = Some(Notice::info("Another change is still being saved."));
            return MutationStatus::Skipped;
        }

        self.in_flight = true;
        let result = self.store.delete(kind, id);
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.needs_refresh = true;
                self.notice = None;
                MutationStatus::Settled
            }
            Err(err) => {
                self.notice = Some(notice_for(&err));
                MutationStatus::Rejected
            }
        }
    }

    /// The viewing context (tab, selected day) changed: the undo slot,
    /// any banner, and any half-finished drag are all void.
    pub fn context_changed(&mut self) {
        self.drag = None;
        self.undo.clear();
        self.notice = None;
    }

    /// mutating → settled | rejected. At most one mutation is ever in
    /// flight; no local list is touched either way.
    fn submit(&mut self, request: &MutationRequest) -> MutationStatus {
        if self.in_flight {
            self.notice = Some(Notice::info("Another change is still being saved."));
            return MutationStatus::Skipped;
        }

        self.in_flight = true;
        log::debug!(
            "Submitting {} mutation for {:?}",
            request.kind,
            request.id
        );
        let result = self.store.mutate(request);
        self.in_flight = false;

        match result {
            Ok(_) => {
                self.needs_refresh = true;
                self.notice = None;
                MutationStatus::Settled
            }
            Err(err) => {
                log::warn!("Mutation rejected for {:?}: {}", request.id, err);
                self.notice = Some(notice_for(&err));
                MutationStatus::Rejected
            }
        }
    }
}

/// Map a store failure onto the banner the shell displays.
fn notice_for(err: &StoreError) -> Notice {
    match err {
        StoreError::Precondition(message) => Notice::warning(message.clone()),
        StoreError::Conflict(message) => {
            Notice::warning(format!("{} Pick a different slot or court.", message))
        }
        StoreError::StaleVersion => Notice::warning(
            "This entry was edited elsewhere. Refresh to load the latest schedule.",
        ),
        StoreError::Locked => {
            Notice::info("Another session is editing this entry. Try again shortly.")
        }
        StoreError::Transport(message) => {
            Notice::error(format!("The change was not saved: {}", message))
        }
    }
}
