use criterion::{Criterion, criterion_group, criterion_main};
use ipgraph::{
    aggregation::Aggregator,
    palette::{ColorAssignmentState, FixedPalette},
    timezone::TimezoneConfig,
    types::{BlacklistHistory, DailyDate, EventRecord, KeyValueLine, MeasureKind},
    window::{DEFAULT_WINDOW_DAYS, DateWindow},
};
use std::hint::black_box;

const CATEGORIES: &[&str] = &[
    "ReconScanning",
    "AttemptLogin",
    "AttemptExploit",
    "AvailabilityDDoS",
    "IntrusionBotnet",
];

fn today() -> DailyDate {
    DailyDate::parse_label("2024-01-10").unwrap()
}

fn create_test_records(count: usize) -> Vec<EventRecord> {
    (0..count)
        .map(|i| {
            let date = today().days_before((i % 40) as u32).unwrap().label();
            let record = EventRecord::new(date).with_category(CATEGORIES[i % CATEGORIES.len()]);
            // Mix numeric and text measures like the backend does
            if i % 2 == 0 {
                record.with_count(i as f64)
            } else {
                record.with_count(i.to_string().as_str())
            }
        })
        .collect()
}

fn create_test_blacklists(lists: usize, hits: usize) -> Vec<BlacklistHistory> {
    (0..lists)
        .map(|l| {
            let h = (0..hits)
                .map(|i| format!("{}T{:02}:00:00", today().days_before((i % 35) as u32).unwrap().label(), i % 24))
                .collect();
            BlacklistHistory::new(format!("list-{l}"), h)
        })
        .collect()
}

fn benchmark_category_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_aggregation");
    let aggregator = Aggregator::new(
        DateWindow::new(DEFAULT_WINDOW_DAYS, today()).unwrap(),
        TimezoneConfig::utc(),
    );

    for size in [100, 1000, 10000] {
        let records = create_test_records(size);
        group.bench_function(format!("aggregate_{size}_records"), |b| {
            b.iter(|| {
                black_box(aggregator.aggregate_by_category(
                    black_box(&records),
                    MeasureKind::Count,
                    &mut FixedPalette,
                ))
            });
        });
    }

    group.finish();
}

fn benchmark_presence_aggregation(c: &mut Criterion) {
    let aggregator = Aggregator::new(
        DateWindow::new(DEFAULT_WINDOW_DAYS, today()).unwrap(),
        TimezoneConfig::utc(),
    );
    let lists = create_test_blacklists(20, 200);

    c.bench_function("presence_20_lists_200_hits", |b| {
        b.iter(|| {
            let mut colors = ColorAssignmentState::seeded(1);
            black_box(aggregator.aggregate_presence(black_box(&lists), &mut colors))
        });
    });
}

fn benchmark_keyed_aggregation(c: &mut Criterion) {
    let aggregator = Aggregator::new(
        DateWindow::new(DEFAULT_WINDOW_DAYS, today()).unwrap(),
        TimezoneConfig::utc(),
    );
    let lines: Vec<KeyValueLine> = (0..5000)
        .filter_map(|i| KeyValueLine::parse(&format!("10.0.{}.{}\t{}", i % 16, i % 250, i % 7)))
        .collect();

    c.bench_function("keyed_5000_lines", |b| {
        b.iter(|| black_box(aggregator.aggregate_by_key(black_box(&lines), "# of rep")));
    });
}

criterion_group!(
    benches,
    benchmark_category_aggregation,
    benchmark_presence_aggregation,
    benchmark_keyed_aggregation
);
criterion_main!(benches);
