// Conflict presentation service
// Merges the authoritative conflict list with a local same-lane overlap
// check into per-item markers

use std::collections::HashMap;

use crate::models::activity::{marker_key, Activity, ActivityKind};
use crate::models::conflict::{ConflictRecord, ConflictType, Severity};
use crate::models::lane::Lane;

/// Lookup from marker key (`"{kind}-{id}"`) to the authoritative
/// conflict types affecting that activity. Built once per data refresh.
#[derive(Debug, Default)]
pub struct ConflictIndex {
    by_key: HashMap<String, Vec<ConflictType>>,
}

impl ConflictIndex {
    pub fn build(conflicts: &[ConflictRecord]) -> Self {
        let mut by_key: HashMap<String, Vec<ConflictType>> = HashMap::new();
        for record in conflicts {
            let subjects = record.subjects();
            if subjects.is_empty() {
                log::debug!(
                    "Conflict type without known subjects ignored for markers: {}",
                    record.summary
                );
                continue;
            }
            for (kind, id) in subjects {
                by_key
                    .entry(marker_key(kind, id))
                    .or_default()
                    .push(record.conflict_type.clone());
            }
        }
        Self { by_key }
    }

    pub fn types_for(&self, kind: ActivityKind, id: i64) -> &[ConflictType] {
        self.by_key
            .get(&marker_key(kind, id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Visual conflict state of one rendered item. The authoritative signals
/// and the local overlap ring are additive, not mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConflictMarker {
    /// At least one blocking-severity conflict from the store.
    pub hard: bool,
    /// At least one advisory-severity conflict from the store.
    pub advisory: bool,
    /// Same-lane interval overlap detected locally, ahead of the next
    /// authoritative refresh.
    pub local_overlap: bool,
    pub types: Vec<ConflictType>,
}

impl ConflictMarker {
    pub fn is_clear(&self) -> bool {
        !self.hard && !self.advisory && !self.local_overlap
    }
}

/// Whether `item` overlaps any other activity in the same lane, using the
/// half-open rule. Purely advisory feedback for the brief window where
/// the authoritative list has not caught up with an edit.
pub fn lane_overlaps(lane: &Lane, item: &Activity) -> bool {
    lane.items
        .iter()
        .filter(|other| !(other.kind == item.kind && other.id == item.id))
        .any(|other| item.overlaps(other))
}

/// Combine both signals for one item.
pub fn marker_for(index: &ConflictIndex, lane: &Lane, item: &Activity) -> ConflictMarker {
    let types = index.types_for(item.kind, item.id).to_vec();
    let hard = types.iter().any(|t| t.severity() == Severity::Blocking);
    let advisory = types.iter().any(|t| t.severity() == Severity::Advisory);

    ConflictMarker {
        hard,
        advisory,
        local_overlap: lane_overlaps(lane, item),
        types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lane::LaneKey;
    use chrono::{TimeZone, Utc};

    fn activity(kind: ActivityKind, id: i64, start_m: u32, end_m: u32) -> Activity {
        Activity::new(
            kind,
            id,
            Utc.with_ymd_and_hms(2025, 6, 14, 10, start_m, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 14, 11, end_m, 0).unwrap(),
            "item",
        )
        .unwrap()
    }

    fn conflict(conflict_type: ConflictType, a_id: i64, b_id: i64) -> ConflictRecord {
        ConflictRecord {
            conflict_type,
            a_id,
            b_id,
            summary: "test".to_string(),
        }
    }

    #[test]
    fn test_player_match_marks_both_matches() {
        let index = ConflictIndex::build(&[conflict(ConflictType::PlayerMatch, 1, 2)]);
        assert_eq!(index.types_for(ActivityKind::Match, 1), &[ConflictType::PlayerMatch]);
        assert_eq!(index.types_for(ActivityKind::Match, 2), &[ConflictType::PlayerMatch]);
        assert!(index.types_for(ActivityKind::Block, 1).is_empty());
    }

    #[test]
    fn test_block_match_marks_across_kinds() {
        let index = ConflictIndex::build(&[conflict(ConflictType::BlockMatch, 7, 42)]);
        assert_eq!(index.types_for(ActivityKind::Block, 7), &[ConflictType::BlockMatch]);
        assert_eq!(index.types_for(ActivityKind::Match, 42), &[ConflictType::BlockMatch]);
    }

    #[test]
    fn test_marker_combines_severities() {
        let index = ConflictIndex::build(&[
            conflict(ConflictType::PlayerMatch, 1, 2),
            conflict(ConflictType::OutsideEventWindow, 1, 1),
        ]);
        let item = activity(ActivityKind::Match, 1, 0, 0);
        let lane = Lane::new(LaneKey::Court(3), "Court 3", Some(3));
        let marker = marker_for(&index, &lane, &item);
        assert!(marker.hard);
        assert!(marker.advisory);
        assert!(!marker.local_overlap);
        assert_eq!(marker.types.len(), 2);
    }

    #[test]
    fn test_local_overlap_is_symmetric() {
        let a = activity(ActivityKind::Match, 1, 0, 0);
        let b = activity(ActivityKind::Block, 2, 30, 30);
        let mut lane = Lane::new(LaneKey::Court(3), "Court 3", Some(3));
        lane.items = vec![a.clone(), b.clone()];

        assert_eq!(lane_overlaps(&lane, &a), lane_overlaps(&lane, &b));
        assert!(lane_overlaps(&lane, &a));
    }

    #[test]
    fn test_item_does_not_overlap_itself() {
        let a = activity(ActivityKind::Match, 1, 0, 0);
        let mut lane = Lane::new(LaneKey::Court(3), "Court 3", Some(3));
        lane.items = vec![a.clone()];
        assert!(!lane_overlaps(&lane, &a));
    }

    #[test]
    fn test_marker_clear_when_no_signals() {
        let index = ConflictIndex::default();
        let item = activity(ActivityKind::Match, 1, 0, 0);
        let lane = Lane::new(LaneKey::Court(3), "Court 3", Some(3));
        assert!(marker_for(&index, &lane, &item).is_clear());
    }
}
