//! Aggregation module for bucketing records into chart series
//!
//! Every dated chart follows the same steps: look the record's day up in
//! the [`DateWindow`], skip it if absent, find or create the series it
//! belongs to, and add its measure into the matching slot. Records that
//! cannot be placed are skipped without error.
//!
//! # Examples
//!
//! ```
//! use ipgraph::aggregation::Aggregator;
//! use ipgraph::palette::FixedPalette;
//! use ipgraph::timezone::TimezoneConfig;
//! use ipgraph::types::{DailyDate, EventRecord, MeasureKind};
//! use ipgraph::window::DateWindow;
//!
//! let today = DailyDate::parse_label("2024-01-10").unwrap();
//! let aggregator = Aggregator::new(DateWindow::new(2, today).unwrap(), TimezoneConfig::utc());
//!
//! let records = vec![
//!     EventRecord::new("2024-01-09").with_category("A").with_count(3.0),
//!     EventRecord::new("2024-01-09").with_category("A").with_count(2.0),
//!     EventRecord::new("2024-01-11").with_category("A").with_count(99.0),
//! ];
//! let chart = aggregator.aggregate_by_category(&records, MeasureKind::Count, &mut FixedPalette);
//!
//! assert_eq!(chart.labels, ["2024-01-08", "2024-01-09", "2024-01-10"]);
//! assert_eq!(chart.series[0].name, "A");
//! assert_eq!(chart.series[0].values, [0.0, 5.0, 0.0]);
//! ```

use ipgraph_core::chart::{ChartData, Series};
use ipgraph_core::palette::{ColorPolicy, DEFAULT_OPACITY, FixedPalette};
use ipgraph_core::timezone::TimezoneConfig;
use ipgraph_core::types::{BlacklistHistory, EventRecord, KeyValueLine, MeasureKind};
use ipgraph_core::window::{DateWindow, LabelFormat};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Category whose fixed colour fills single-series charts
pub const SINGLE_SERIES_CATEGORY: &str = "ReconScanning";

/// Kept/skipped record counts of one aggregation run
#[derive(Debug, Clone, Copy, Default)]
struct AggregationStats {
    kept: usize,
    skipped: usize,
}

impl AggregationStats {
    fn keep(&mut self) {
        self.kept += 1;
    }

    fn skip(&mut self) {
        self.skipped += 1;
    }
}

/// Accumulator for category-partitioned series
///
/// Series are created on first sighting of a category, coloured once,
/// and kept in first-seen order.
struct SeriesAccumulator<'c> {
    slots: usize,
    opacity: f64,
    colors: &'c mut dyn ColorPolicy,
    series: Vec<Series>,
    index: HashMap<String, usize>,
}

impl<'c> SeriesAccumulator<'c> {
    fn new(slots: usize, opacity: f64, colors: &'c mut dyn ColorPolicy) -> Self {
        Self {
            slots,
            opacity,
            colors,
            series: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn series_for(&mut self, category: &str) -> &mut Series {
        let pos = match self.index.get(category).copied() {
            Some(pos) => pos,
            None => {
                let color = self.colors.color(category, self.opacity);
                trace!("New series '{}' coloured {}", category, color);
                self.series.push(Series::zeroed(category, self.slots, color));
                self.index.insert(category.to_string(), self.series.len() - 1);
                self.series.len() - 1
            }
        };
        &mut self.series[pos]
    }

    fn add(&mut self, category: &str, slot: usize, value: f64) {
        self.series_for(category).values[slot] += value;
    }

    /// Mark a slot as "seen at least once"; never exceeds 1
    fn mark(&mut self, category: &str, slot: usize) {
        let cell = &mut self.series_for(category).values[slot];
        if *cell == 0.0 {
            *cell = 1.0;
        }
    }

    fn into_series(self) -> Vec<Series> {
        self.series
    }
}

/// Main aggregation engine
///
/// Holds the date window shared by every chart built during one request.
#[derive(Debug, Clone)]
pub struct Aggregator {
    window: DateWindow,
    timezone_config: TimezoneConfig,
    opacity: f64,
    label_format: LabelFormat,
}

impl Aggregator {
    /// Create a new Aggregator
    pub fn new(window: DateWindow, timezone_config: TimezoneConfig) -> Self {
        Self {
            window,
            timezone_config,
            opacity: DEFAULT_OPACITY,
            label_format: LabelFormat::Iso,
        }
    }

    /// Fill opacity of series colours
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Display format of the x-axis labels of dated charts
    pub fn with_label_format(mut self, label_format: LabelFormat) -> Self {
        self.label_format = label_format;
        self
    }

    /// Get the date window shared by every chart
    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    /// Get the timezone configuration
    pub fn timezone_config(&self) -> &TimezoneConfig {
        &self.timezone_config
    }

    /// Colour of a non-partitioned chart's single series
    pub fn single_series_color(&self) -> String {
        FixedPalette.color(SINGLE_SERIES_CATEGORY, self.opacity)
    }

    fn labels(&self) -> Vec<String> {
        self.window.display_labels(self.label_format)
    }

    /// Window slot and measure of a record, None when it cannot be placed
    fn place(&self, record: &EventRecord, measure: MeasureKind) -> Option<(usize, f64)> {
        let slot = record.date.as_deref().and_then(|d| self.window.position(d))?;
        let value = record.measure(measure)?;
        Some((slot, value))
    }

    /// Sum a measure per day, one series per category
    pub fn aggregate_by_category<'a>(
        &self,
        records: impl IntoIterator<Item = &'a EventRecord>,
        measure: MeasureKind,
        colors: &mut dyn ColorPolicy,
    ) -> ChartData {
        let mut acc = SeriesAccumulator::new(self.window.len(), self.opacity, colors);
        let mut stats = AggregationStats::default();

        for record in records {
            match self.place(record, measure) {
                Some((slot, value)) => {
                    acc.add(record.category_or_unknown(), slot, value);
                    stats.keep();
                }
                None => stats.skip(),
            }
        }

        let series = acc.into_series();
        debug!(
            "Bucketed {} records ({} skipped) into {} {} series",
            stats.kept,
            stats.skipped,
            series.len(),
            measure
        );
        ChartData {
            labels: self.labels(),
            series,
        }
    }

    /// Sum a measure per day into one series named `name`
    ///
    /// The series is present even when no record falls inside the window.
    pub fn aggregate_total<'a>(
        &self,
        records: impl IntoIterator<Item = &'a EventRecord>,
        measure: MeasureKind,
        name: &str,
    ) -> ChartData {
        let mut series = Series::zeroed(name, self.window.len(), self.single_series_color());
        let mut stats = AggregationStats::default();

        for record in records {
            match self.place(record, measure) {
                Some((slot, value)) => {
                    series.values[slot] += value;
                    stats.keep();
                }
                None => stats.skip(),
            }
        }

        debug!(
            "Summed {} into '{}' from {} records ({} skipped)",
            measure,
            name,
            stats.kept,
            stats.skipped
        );
        ChartData {
            labels: self.labels(),
            series: vec![series],
        }
    }

    /// Days on which each blacklist listed the IP
    ///
    /// A slot is 1 if at least one hit fell on that day, however many did.
    pub fn aggregate_presence<'a>(
        &self,
        histories: impl IntoIterator<Item = &'a BlacklistHistory>,
        colors: &mut dyn ColorPolicy,
    ) -> ChartData {
        let mut acc = SeriesAccumulator::new(self.window.len(), self.opacity, colors);
        let mut stats = AggregationStats::default();

        for history in histories {
            for day in history.hit_dates(&self.timezone_config) {
                match day.and_then(|d| self.window.position_of(&d)) {
                    Some(slot) => {
                        acc.mark(&history.name, slot);
                        stats.keep();
                    }
                    None => stats.skip(),
                }
            }
        }

        let series = acc.into_series();
        debug!(
            "Marked {} blacklist hits ({} skipped) across {} lists",
            stats.kept,
            stats.skipped,
            series.len()
        );
        ChartData {
            labels: self.labels(),
            series,
        }
    }

    /// Sum values per key, keys in first-seen order
    ///
    /// This chart has no date axis: the labels are the keys themselves.
    pub fn aggregate_by_key<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a KeyValueLine>,
        name: &str,
    ) -> ChartData {
        let mut labels: Vec<String> = Vec::new();
        let mut values: Vec<f64> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for line in lines {
            let pos = *index.entry(line.key.as_str()).or_insert_with(|| {
                labels.push(line.key.clone());
                values.push(0.0);
                labels.len() - 1
            });
            values[pos] += line.value;
        }

        debug!("Summed values for {} keys", labels.len());
        ChartData {
            labels,
            series: vec![Series {
                name: name.to_string(),
                values,
                color: self.single_series_color(),
            }],
        }
    }
}
