// View service
// The pure rendering contract: activities + conflicts + a day window in,
// lanes with geometry and conflict markers out

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::models::activity::Activity;
use crate::models::lane::{Lane, LaneHint, LaneKey};
use crate::models::settings::SchedulerConfig;
use crate::models::snapshot::ScheduleSnapshot;
use crate::services::conflict::{marker_for, ConflictIndex, ConflictMarker};
use crate::services::layout::assign_lanes;
use crate::services::layout::geometry::{span_geometry, SpanGeometry};
use crate::utils::date::{resolve_timezone, DayWindow};

/// One activity ready to render: placement plus conflict state.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub activity: Activity,
    pub geometry: SpanGeometry,
    pub marker: ConflictMarker,
}

/// One lane of the rendered day.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneView {
    pub key: LaneKey,
    pub label: String,
    pub court_id: Option<i64>,
    pub items: Vec<ItemView>,
}

/// Everything the shell needs to paint one day of the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub timezone: Tz,
    pub window: DayWindow,
    pub lanes: Vec<LaneView>,
}

/// Build the day view. Pure function of its inputs, recomputed on every
/// render pass and never mutated in place.
///
/// Lanes come from the lane assigner; activities outside the day window
/// are filtered out; each remaining item gets its span geometry and the
/// merged authoritative/local conflict marker.
pub fn build_day_view(
    snapshot: &ScheduleSnapshot,
    date: NaiveDate,
    hints: &[LaneHint],
    config: &SchedulerConfig,
) -> DayView {
    let timezone = resolve_timezone(snapshot.event_timezone.as_deref());
    let window = DayWindow::for_date(date, timezone);

    let activities = snapshot.activities();
    let conflict_index = ConflictIndex::build(&snapshot.conflicts);
    let lanes = assign_lanes(&activities, hints);

    let lanes = lanes
        .into_iter()
        .map(|lane| {
            let day_lane = day_slice(&lane, &window);
            let items = day_lane
                .items
                .iter()
                .map(|activity| ItemView {
                    geometry: span_geometry(activity, &window, config),
                    marker: marker_for(&conflict_index, &day_lane, activity),
                    activity: activity.clone(),
                })
                .collect();
            LaneView {
                key: day_lane.key,
                label: day_lane.label,
                court_id: day_lane.court_id,
                items,
            }
        })
        .collect();

    DayView {
        date,
        timezone,
        window,
        lanes,
    }
}

/// Restrict a lane to the items intersecting the rendered day, so the
/// local overlap check only sees same-day neighbours.
fn day_slice(lane: &Lane, window: &DayWindow) -> Lane {
    let mut sliced = Lane::new(lane.key.clone(), lane.label.clone(), lane.court_id);
    sliced.items = lane
        .items
        .iter()
        .filter(|item| window.intersects(item.start, item.end))
        .cloned()
        .collect();
    sliced
}
