//! Chart assembly
//!
//! Glue between input loading, aggregation and the chart presets: one
//! [`ChartRequest`] describes a chart, [`build_chart`] turns it into a
//! [`ChartSpec`] ready for an output formatter.
//!
//! The colour policy belongs to the session, not to a chart. Create it once
//! with [`ChartRequest::color_policy`] and pass the same one to every
//! [`build_chart`] call so a category keeps its colour across charts.

use crate::aggregation::Aggregator;
use crate::cli::PaletteChoice;
use crate::data_loader::DataLoader;
use ipgraph_core::chart::{ChartKind, ChartSpec};
use ipgraph_core::error::Result;
use ipgraph_core::palette::{ColorAssignmentState, ColorPolicy, FixedPalette};
use ipgraph_core::types::{BlacklistHistory, EventRecord, MeasureKind};
use tracing::info;

/// Everything needed to build one chart
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub kind: ChartKind,
    /// Measure summed by record-based charts
    pub measure: MeasureKind,
    /// Name of the single series of non-partitioned charts
    pub series_name: String,
    pub palette: PaletteChoice,
    pub seed: Option<u64>,
}

impl ChartRequest {
    /// Request with the dashboard's defaults for a chart
    pub fn new(kind: ChartKind) -> Self {
        let measure = match kind {
            ChartKind::Dshield => MeasureKind::Targets,
            ChartKind::Reputation => MeasureKind::Reputation,
            _ => MeasureKind::Count,
        };
        Self {
            kind,
            measure,
            series_name: kind.series_name().to_string(),
            palette: PaletteChoice::default_for(kind),
            seed: None,
        }
    }

    pub fn with_measure(mut self, measure: MeasureKind) -> Self {
        self.measure = measure;
        self
    }

    pub fn with_series_name(mut self, name: impl Into<String>) -> Self {
        self.series_name = name.into();
        self
    }

    /// Palette override; `None` keeps the chart's default
    pub fn with_palette(mut self, palette: Option<PaletteChoice>) -> Self {
        if let Some(palette) = palette {
            self.palette = palette;
        }
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Fresh colour policy for a session built from this request
    pub fn color_policy(&self) -> Box<dyn ColorPolicy> {
        match (self.palette, self.seed) {
            (PaletteChoice::Fixed, _) => Box::new(FixedPalette),
            (PaletteChoice::Random, Some(seed)) => Box::new(ColorAssignmentState::seeded(seed)),
            (PaletteChoice::Random, None) => Box::new(ColorAssignmentState::new()),
        }
    }
}

/// Load the request's input and aggregate it into a chart
///
/// Category colours come from `colors`, which keeps whatever it assigns
/// for later calls.
pub fn build_chart(
    request: &ChartRequest,
    loader: &DataLoader,
    aggregator: Aggregator,
    colors: &mut dyn ColorPolicy,
) -> Result<ChartSpec> {
    let aggregator = aggregator.with_label_format(request.kind.label_format());

    let data = match request.kind {
        ChartKind::Events => {
            let records: Vec<EventRecord> = loader.load_records()?;
            aggregator.aggregate_by_category(&records, request.measure, colors)
        }
        ChartKind::Dshield | ChartKind::Reputation => {
            let records: Vec<EventRecord> = loader.load_records()?;
            aggregator.aggregate_total(&records, request.measure, &request.series_name)
        }
        ChartKind::Blacklist => {
            let histories: Vec<BlacklistHistory> = loader.load_records()?;
            aggregator.aggregate_presence(&histories, colors)
        }
        ChartKind::Keyed => {
            let lines = loader.load_lines()?;
            aggregator.aggregate_by_key(&lines, &request.series_name)
        }
    };

    info!(
        "Built {} chart with {} labels and {} series",
        request.kind,
        data.labels.len(),
        data.series.len()
    );
    Ok(ChartSpec::new(request.kind, data))
}
