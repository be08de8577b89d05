// Court Scheduler
// Main entry point: fetch a scheduling context and print today's lanes

use anyhow::{anyhow, Context, Result};
use chrono::Utc;

use court_scheduler::services::settings;
use court_scheduler::services::store::{HttpScheduleStore, ScheduleScope, ScheduleStore};
use court_scheduler::services::view::build_day_view;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .ok_or_else(|| anyhow!("Usage: court-scheduler <base-url> <event-id> [YYYY-MM-DD]"))?;
    let event_id: i64 = args
        .next()
        .ok_or_else(|| anyhow!("Usage: court-scheduler <base-url> <event-id> [YYYY-MM-DD]"))?
        .parse()
        .context("event-id must be an integer")?;
    let date = match args.next() {
        Some(raw) => raw.parse().context("date must be YYYY-MM-DD")?,
        None => Utc::now().date_naive(),
    };

    let config = settings::load();
    let scope = ScheduleScope { event_id };
    let store = HttpScheduleStore::new(base_url.as_str(), scope, &config)?;

    log::info!("Fetching calendar for event {} on {}", event_id, date);
    let snapshot = store
        .fetch(&scope)
        .map_err(|e| anyhow!("Calendar fetch failed: {}", e))?;

    let view = build_day_view(&snapshot, date, &[], &config);
    println!("{} ({})", view.date, view.timezone);

    for lane in &view.lanes {
        println!("\n{}", lane.label);
        for item in &lane.items {
            let mut flags = String::new();
            if item.marker.hard {
                flags.push_str(" [conflict]");
            } else if item.marker.advisory {
                flags.push_str(" [warning]");
            }
            if item.marker.local_overlap {
                flags.push_str(" [overlap]");
            }
            println!(
                "  {:>5.1}% +{:>4.1}%  {}{}",
                item.geometry.left_pct, item.geometry.width_pct, item.activity.label, flags
            );
        }
    }

    Ok(())
}
