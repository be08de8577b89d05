// Settings module
// Scheduler tuning knobs, loadable from an optional config file

use serde::Deserialize;

/// Tunables for layout and rescheduling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Grid granularity in minutes; drop targets snap to multiples of
    /// this. Must be within 1..=1440.
    pub slot_granularity_minutes: u32,
    /// Floor on rendered span width so very short activities stay
    /// clickable.
    pub min_span_width_pct: f64,
    /// Timeout for calls against the authoritative store.
    pub request_timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            slot_granularity_minutes: 15,
            min_span_width_pct: 6.0,
            request_timeout_secs: 20,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.slot_granularity_minutes == 0 || self.slot_granularity_minutes > 1440 {
            return Err(format!(
                "slot_granularity_minutes must be within 1..=1440, got {}",
                self.slot_granularity_minutes
            ));
        }
        if !(0.0..=100.0).contains(&self.min_span_width_pct) {
            return Err(format!(
                "min_span_width_pct must be within 0..=100, got {}",
                self.min_span_width_pct
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be positive".to_string());
        }
        Ok(())
    }
}
