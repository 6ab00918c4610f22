//! Common test utilities and helpers for ipgraph tests
//!
//! Builders for realistic dashboard input and helpers for writing it to
//! temporary files.

use ipgraph::{
    aggregation::Aggregator,
    data_loader::{DataLoader, InputSource},
    timezone::TimezoneConfig,
    types::{BlacklistHistory, DailyDate, EventRecord},
    window::DateWindow,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Categories the dashboard knows colours for
#[allow(dead_code)]
pub const TEST_CATEGORIES: &[&str] = &[
    "ReconScanning",
    "AttemptLogin",
    "AvailabilityDDoS",
    "IntrusionBotnet",
];

/// Fixed "today" used across tests
pub const TODAY: &str = "2024-01-10";

#[allow(dead_code)]
pub fn today() -> DailyDate {
    DailyDate::parse_label(TODAY).unwrap()
}

/// Aggregator over `n + 1` days ending on [`TODAY`], in UTC
#[allow(dead_code)]
pub fn aggregator(n: u32) -> Aggregator {
    Aggregator::new(DateWindow::new(n, today()).unwrap(), TimezoneConfig::utc())
}

/// Label of the day `days` before [`TODAY`]
#[allow(dead_code)]
pub fn day_label(days: u32) -> String {
    today().days_before(days).unwrap().label()
}

/// Event record `days` before [`TODAY`]
#[allow(dead_code)]
pub fn event(days: u32, category: &str, count: f64) -> EventRecord {
    EventRecord::new(day_label(days))
        .with_category(category)
        .with_count(count)
}

/// Blacklist with one hit per given day offset, at noon
#[allow(dead_code)]
pub fn blacklist(name: &str, days: &[u32]) -> BlacklistHistory {
    BlacklistHistory::new(
        name,
        days.iter()
            .map(|d| format!("{}T12:00:00", day_label(*d)))
            .collect(),
    )
}

/// Write `content` to a temporary file and return a loader for it
///
/// The file is kept alive by the returned handle.
#[allow(dead_code)]
pub fn loader_for(content: &str) -> (NamedTempFile, DataLoader) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    let loader = DataLoader::new(InputSource::File(file.path().to_path_buf()));
    (file, loader)
}
