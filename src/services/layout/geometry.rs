// Span geometry: normalized horizontal placement within a day window

use crate::models::activity::Activity;
use crate::models::settings::SchedulerConfig;
use crate::utils::date::DayWindow;

/// Horizontal placement of an activity within its lane, as percentages
/// of the lane's rendered width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanGeometry {
    pub left_pct: f64,
    pub width_pct: f64,
}

impl SpanGeometry {
    pub fn right_pct(&self) -> f64 {
        self.left_pct + self.width_pct
    }
}

/// Map an activity's `[start, end)` into lane coordinates.
///
/// Both edges clamp into the day; the width never drops below the
/// configured minimum so very short activities remain interactable, and
/// the span is pulled left rather than spilling past 100.
pub fn span_geometry(
    activity: &Activity,
    window: &DayWindow,
    config: &SchedulerConfig,
) -> SpanGeometry {
    let left = window.fraction_of(activity.start) * 100.0;
    let right = window.fraction_of(activity.end) * 100.0;

    let min_width = config.min_span_width_pct.clamp(0.0, 100.0);
    let width = (right - left).max(min_width);

    let left = if left + width > 100.0 {
        (100.0 - width).max(0.0)
    } else {
        left
    };

    SpanGeometry {
        left_pct: left,
        width_pct: width.min(100.0),
    }
}
