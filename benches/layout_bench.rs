// Benchmark for day layout
// Measures lane assignment and span geometry over a busy tournament day

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use court_scheduler::models::activity::{Activity, ActivityKind};
use court_scheduler::models::lane::LaneHint;
use court_scheduler::models::settings::SchedulerConfig;
use court_scheduler::services::layout::assign_lanes;
use court_scheduler::services::layout::geometry::span_geometry;
use court_scheduler::utils::date::DayWindow;

fn busy_day(activity_count: usize, court_count: i64) -> Vec<Activity> {
    let base = Utc.with_ymd_and_hms(2025, 6, 14, 8, 0, 0).unwrap();
    (0..activity_count)
        .map(|i| {
            let kind = match i % 3 {
                0 => ActivityKind::Match,
                1 => ActivityKind::Block,
                _ => ActivityKind::Availability,
            };
            let start = base + Duration::minutes((i as i64 * 17) % 720);
            let mut activity = Activity::new(
                kind,
                i as i64,
                start,
                start + Duration::minutes(30 + (i as i64 % 4) * 15),
                format!("activity-{}", i),
            )
            .expect("valid window");
            if kind != ActivityKind::Availability {
                activity.court_id = Some(i as i64 % court_count + 1);
            }
            activity
        })
        .collect()
}

fn bench_assign_lanes(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_lanes");
    let hints: Vec<LaneHint> = (1..=8)
        .map(|id| LaneHint {
            court_id: id,
            label: format!("Court {}", id),
        })
        .collect();

    for count in [50, 200, 1000].iter() {
        let activities = busy_day(*count, 8);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| assign_lanes(black_box(&activities), black_box(&hints)));
        });
    }
    group.finish();
}

fn bench_span_geometry(c: &mut Criterion) {
    let window = DayWindow::for_date(
        chrono::NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date"),
        chrono_tz::UTC,
    );
    let config = SchedulerConfig::default();
    let activities = busy_day(1000, 8);

    c.bench_function("span_geometry_1000", |b| {
        b.iter(|| {
            for activity in &activities {
                black_box(span_geometry(activity, &window, &config));
            }
        });
    });
}

criterion_group!(benches, bench_assign_lanes, bench_span_geometry);
criterion_main!(benches);
