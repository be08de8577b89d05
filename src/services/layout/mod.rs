// Layout service
// Lane assignment, span geometry, and slot snapping for the timeline

pub mod geometry;
pub mod snap;

use std::collections::HashMap;

use crate::models::activity::Activity;
use crate::models::lane::{lane_label_for, Lane, LaneHint, LaneKey};

/// Group a flat activity list into ordered lanes.
///
/// Hints seed lanes for known courts so an empty court still renders.
/// Every activity lands in exactly one lane (court, named court, numeric
/// court, or kind bucket), and each lane's items end up sorted by start
/// ascending; start ties keep input order, since simultaneous same-lane
/// activities are a conflict surfaced elsewhere, not a tie to break here.
pub fn assign_lanes(activities: &[Activity], hints: &[LaneHint]) -> Vec<Lane> {
    let mut lanes: Vec<Lane> = Vec::with_capacity(hints.len() + 4);
    let mut index: HashMap<LaneKey, usize> = HashMap::new();

    for hint in hints {
        let key = LaneKey::Court(hint.court_id);
        if index.contains_key(&key) {
            continue;
        }
        index.insert(key.clone(), lanes.len());
        lanes.push(Lane::new(key, hint.label.clone(), Some(hint.court_id)));
    }

    for activity in activities {
        let key = LaneKey::for_activity(activity);
        let lane_index = match index.get(&key) {
            Some(existing) => *existing,
            None => {
                let lane = Lane::new(key.clone(), lane_label_for(activity), activity.court_id);
                index.insert(key, lanes.len());
                lanes.push(lane);
                lanes.len() - 1
            }
        };
        lanes[lane_index].items.push(activity.clone());
    }

    // Court lanes keep hint/discovery order; fallback buckets go last,
    // availability at the very bottom.
    let mut ordered: Vec<(usize, Lane)> = lanes.into_iter().enumerate().collect();
    ordered.sort_by_key(|(position, lane)| (lane.key.bucket_rank(), *position));

    let mut lanes: Vec<Lane> = ordered.into_iter().map(|(_, lane)| lane).collect();
    for lane in &mut lanes {
        lane.items.sort_by_key(|item| item.start);
    }
    lanes
}
