// Integration tests for the reschedule controller against a mocked store

mod fixtures;

use chrono::Duration;
use mockall::mock;
use mockall::Sequence;

use court_scheduler::models::activity::ActivityKind;
use court_scheduler::models::snapshot::ScheduleSnapshot;
use court_scheduler::services::reschedule::{
    MutationStatus, NoticeSeverity, NudgeDirection, RescheduleController,
};
use court_scheduler::services::store::{
    MutationOutcome, MutationRequest, ScheduleScope, ScheduleStore, StoreError,
};

use fixtures::{at, block_on_court, config, court_lane, fraction_at, match_on_court, unassigned_match, utc_window};

mock! {
    Store {}

    impl ScheduleStore for Store {
        fn fetch(&self, scope: &ScheduleScope) -> Result<ScheduleSnapshot, StoreError>;
        fn mutate(&self, request: &MutationRequest) -> Result<MutationOutcome, StoreError>;
        fn delete(&self, kind: ActivityKind, id: i64) -> Result<(), StoreError>;
    }
}

fn accepted(id: i64) -> MutationOutcome {
    MutationOutcome {
        id,
        version: Some(court_scheduler::models::activity::Version::new("v-next")),
    }
}

#[test]
fn test_drag_preserves_duration_and_carries_drag_start_version() {
    let activity = match_on_court(9, 3, 10, 0, 90);
    let original_duration = activity.duration();

    let mut store = MockStore::new();
    store
        .expect_mutate()
        .withf(move |request| {
            request.kind == ActivityKind::Match
                && request.id == Some(9)
                && request.start_at == at(10, 45)
                && request.end_at - request.start_at == original_duration
                && request.court_id == Some(5)
                && request.version.as_ref().map(|v| v.as_str()) == Some("v9")
        })
        .times(1)
        .returning(|_| Ok(accepted(9)));

    let mut controller = RescheduleController::new(&store, config());
    assert!(controller.begin_drag(&activity));

    // Pointer lands at 10:40; a 15-minute grid snaps that to 10:45
    let status = controller.drop_on_lane(&court_lane(5), fraction_at(10, 40), &utc_window());

    assert_eq!(status, MutationStatus::Settled);
    assert!(controller.take_refresh_request());
    assert!(controller.banner().is_none());

    let undo = controller.pending_undo().expect("undo snapshot recorded");
    assert_eq!(undo.prev_start, at(10, 0));
    assert_eq!(undo.prev_court_id, Some(3));
}

#[test]
fn test_unassigned_match_drag_never_reaches_the_store() {
    let activity = unassigned_match(4, 10, 60);

    let mut store = MockStore::new();
    store.expect_mutate().times(0);

    let mut controller = RescheduleController::new(&store, config());
    assert!(controller.begin_drag(&activity));
    let status = controller.drop_on_lane(&court_lane(5), fraction_at(12, 0), &utc_window());

    assert_eq!(status, MutationStatus::Rejected);
    let banner = controller.banner().expect("corrective banner");
    assert_eq!(banner.severity, NoticeSeverity::Warning);
    assert!(banner.message.contains("court"));
    assert!(!controller.take_refresh_request());
    assert!(controller.pending_undo().is_none());
}

#[test]
fn test_drop_snaps_to_nearest_slot_boundary() {
    // A block dropped with the pointer implying 10:40 must land on 10:30
    // or 10:45, never 10:40.
    let activity = block_on_court(1, 3, 10, 30, 15);

    let mut store = MockStore::new();
    store
        .expect_mutate()
        .withf(|request| request.start_at == at(10, 30) || request.start_at == at(10, 45))
        .times(1)
        .returning(|_| Ok(accepted(1)));

    let mut controller = RescheduleController::new(&store, config());
    controller.begin_drag(&activity);
    let status = controller.drop_on_lane(&court_lane(3), fraction_at(10, 40), &utc_window());
    assert_eq!(status, MutationStatus::Settled);
}

#[test]
fn test_undo_replays_pre_drag_state_with_pre_drag_version() {
    let activity = match_on_court(9, 3, 10, 0, 60);
    let mut sequence = Sequence::new();

    let mut store = MockStore::new();
    store
        .expect_mutate()
        .withf(|request| request.start_at == at(14, 0))
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(accepted(9)));
    store
        .expect_mutate()
        .withf(|request| {
            request.id == Some(9)
                && request.start_at == at(10, 0)
                && request.end_at == at(11, 0)
                && request.court_id == Some(3)
                // The version captured before the drag, not the one the
                // store returned afterwards
                && request.version.as_ref().map(|v| v.as_str()) == Some("v9")
        })
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| Ok(accepted(9)));

    let mut controller = RescheduleController::new(&store, config());
    controller.begin_drag(&activity);
    assert_eq!(
        controller.drop_on_lane(&court_lane(3), fraction_at(14, 0), &utc_window()),
        MutationStatus::Settled
    );
    assert!(controller.can_undo());

    assert_eq!(controller.undo(), MutationStatus::Settled);
    assert!(!controller.can_undo());
    assert!(controller.take_refresh_request());
}

#[test]
fn test_stale_version_rejection_leaves_undo_untouched() {
    let nudged = block_on_court(1, 3, 9, 0, 60);
    let dragged = match_on_court(9, 3, 10, 0, 60);

    let mut store = MockStore::new();
    store
        .expect_mutate()
        .withf(|request| request.kind == ActivityKind::Block)
        .times(1)
        .returning(|_| Ok(accepted(1)));
    store
        .expect_mutate()
        .withf(|request| request.kind == ActivityKind::Match)
        .times(1)
        .returning(|_| Err(StoreError::StaleVersion));

    let mut controller = RescheduleController::new(&store, config());

    // A successful nudge seeds the undo slot
    assert_eq!(
        controller.nudge_end(&nudged, NudgeDirection::Extend),
        MutationStatus::Settled
    );
    assert!(controller.take_refresh_request());
    let seeded = controller.pending_undo().cloned().expect("seeded undo");

    // A stale drag afterwards must change nothing
    controller.begin_drag(&dragged);
    let status = controller.drop_on_lane(&court_lane(3), fraction_at(12, 0), &utc_window());

    assert_eq!(status, MutationStatus::Rejected);
    assert!(!controller.take_refresh_request());
    assert_eq!(controller.pending_undo(), Some(&seeded));
    let banner = controller.banner().expect("stale banner");
    assert!(banner.message.contains("edited elsewhere"));
}

#[test]
fn test_nudge_extends_end_and_keeps_start_fixed() {
    let activity = match_on_court(9, 3, 10, 0, 60);

    let mut store = MockStore::new();
    store
        .expect_mutate()
        .withf(|request| {
            request.start_at == at(10, 0) && request.end_at == at(10, 0) + Duration::minutes(75)
        })
        .times(1)
        .returning(|_| Ok(accepted(9)));

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.nudge_end(&activity, NudgeDirection::Extend),
        MutationStatus::Settled
    );
    assert!(controller.can_undo());
}

#[test]
fn test_nudge_cannot_shrink_below_one_slot() {
    let activity = block_on_court(1, 3, 10, 0, 15);

    let mut store = MockStore::new();
    store.expect_mutate().times(0);

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.nudge_end(&activity, NudgeDirection::Shrink),
        MutationStatus::Rejected
    );
    assert!(controller.banner().is_some());
}

#[test]
fn test_conflict_rejection_surfaces_store_message() {
    let activity = block_on_court(1, 3, 10, 0, 60);

    let mut store = MockStore::new();
    store
        .expect_mutate()
        .returning(|_| Err(StoreError::Conflict("A block already covers this slot.".to_string())));

    let mut controller = RescheduleController::new(&store, config());
    controller.begin_drag(&activity);
    let status = controller.drop_on_lane(&court_lane(3), fraction_at(11, 0), &utc_window());

    assert_eq!(status, MutationStatus::Rejected);
    let banner = controller.banner().expect("conflict banner");
    assert!(banner.message.contains("A block already covers this slot."));
    assert_eq!(banner.severity, NoticeSeverity::Warning);
}

#[test]
fn test_locked_rejection_is_transient() {
    let activity = block_on_court(1, 3, 10, 0, 60);

    let mut store = MockStore::new();
    store.expect_mutate().returning(|_| Err(StoreError::Locked));

    let mut controller = RescheduleController::new(&store, config());
    controller.begin_drag(&activity);
    controller.drop_on_lane(&court_lane(3), fraction_at(11, 0), &utc_window());

    let banner = controller.banner().expect("lock banner");
    assert_eq!(banner.severity, NoticeSeverity::Info);
    assert!(banner.message.contains("Try again"));
}

#[test]
fn test_context_change_clears_undo_and_banner() {
    let activity = match_on_court(9, 3, 10, 0, 60);

    let mut store = MockStore::new();
    store.expect_mutate().returning(|_| Ok(accepted(9)));

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.nudge_end(&activity, NudgeDirection::Extend),
        MutationStatus::Settled
    );
    assert!(controller.can_undo());

    controller.context_changed();
    assert!(!controller.can_undo());
    assert!(controller.banner().is_none());
    // Nothing left to undo
    assert_eq!(controller.undo(), MutationStatus::Skipped);
}

#[test]
fn test_drop_without_drag_is_ignored() {
    let mut store = MockStore::new();
    store.expect_mutate().times(0);

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.drop_on_lane(&court_lane(3), 0.5, &utc_window()),
        MutationStatus::Skipped
    );
}

#[test]
fn test_cancelled_drag_issues_nothing() {
    let activity = match_on_court(9, 3, 10, 0, 60);

    let mut store = MockStore::new();
    store.expect_mutate().times(0);

    let mut controller = RescheduleController::new(&store, config());
    controller.begin_drag(&activity);
    controller.cancel_drag();
    assert_eq!(
        controller.drop_on_lane(&court_lane(3), 0.5, &utc_window()),
        MutationStatus::Skipped
    );
}

#[test]
fn test_delete_match_is_rejected_before_any_request() {
    let mut store = MockStore::new();
    store.expect_delete().times(0);

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.delete_activity(ActivityKind::Match, 9),
        MutationStatus::Rejected
    );
    assert!(controller.banner().is_some());
}

#[test]
fn test_delete_block_settles_and_requests_refresh() {
    let mut store = MockStore::new();
    store
        .expect_delete()
        .withf(|kind, id| *kind == ActivityKind::Block && *id == 7)
        .times(1)
        .returning(|_, _| Ok(()));

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.delete_activity(ActivityKind::Block, 7),
        MutationStatus::Settled
    );
    assert!(controller.take_refresh_request());
    // Deletion is not revertible through the undo slot
    assert!(!controller.can_undo());
}

#[test]
fn test_create_block_validates_window_client_side() {
    let mut store = MockStore::new();
    store.expect_mutate().times(0);

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.create_block(at(11, 0), at(10, 0), Some(3)),
        MutationStatus::Rejected
    );
}

#[test]
fn test_create_availability_omits_id_and_court() {
    let mut store = MockStore::new();
    store
        .expect_mutate()
        .withf(|request| {
            request.kind == ActivityKind::Availability
                && request.id.is_none()
                && request.court_id.is_none()
                && request.version.is_none()
        })
        .times(1)
        .returning(|_| Ok(accepted(11)));

    let mut controller = RescheduleController::new(&store, config());
    assert_eq!(
        controller.create_availability(at(9, 0), at(12, 0)),
        MutationStatus::Settled
    );
    assert!(!controller.can_undo());
}

#[test]
fn test_transport_failure_keeps_calendar_untouched() {
    let activity = match_on_court(9, 3, 10, 0, 60);

    let mut store = MockStore::new();
    store
        .expect_mutate()
        .returning(|_| Err(StoreError::Transport("connection reset".to_string())));

    let mut controller = RescheduleController::new(&store, config());
    controller.begin_drag(&activity);
    let status = controller.drop_on_lane(&court_lane(3), fraction_at(12, 0), &utc_window());

    assert_eq!(status, MutationStatus::Rejected);
    assert!(!controller.take_refresh_request());
    assert!(controller.pending_undo().is_none());
    assert_eq!(
        controller.banner().map(|b| b.severity),
        Some(NoticeSeverity::Error)
    );
}
