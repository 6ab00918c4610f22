//! Chart payload handed to the rendering collaborator
//!
//! Aggregation produces [`ChartData`]: x-axis labels plus named, coloured
//! series aligned to those labels. A [`ChartSpec`] bundles that data with
//! the display options of one dashboard chart.

use crate::window::LabelFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One chart layer: a named numeric sequence aligned to the labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    /// `rgba()` fill colour
    pub color: String,
}

impl Series {
    /// Zero-filled series with `len` slots
    pub fn zeroed(name: impl Into<String>, len: usize, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![0.0; len],
            color: color.into(),
        }
    }

    /// Sum of all slots
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Labels and series ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            series: Vec::new(),
        }
    }

    /// Series by name
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Sum of every series' slot at each label
    pub fn column_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.labels.len()];
        for series in &self.series {
            for (total, value) in totals.iter_mut().zip(&series.values) {
                *total += value;
            }
        }
        totals
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.values.iter().all(|v| *v == 0.0))
    }
}

/// Legend placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Tooltip grouping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipMode {
    /// All series at the hovered x position
    #[default]
    Index,
    /// Only the hovered bar
    Nearest,
}

/// Static display configuration of a bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub stacked: bool,
    pub min: f64,
    pub legend_position: LegendPosition,
    pub tooltip_mode: TooltipMode,
    pub y_axis_label: String,
    /// Decimal places of y-axis ticks
    pub tick_precision: u32,
    pub begin_at_zero: bool,
    pub animation: bool,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub border_width: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            stacked: true,
            min: 0.0,
            legend_position: LegendPosition::Bottom,
            tooltip_mode: TooltipMode::Index,
            y_axis_label: "Number of events".to_string(),
            tick_precision: 0,
            begin_at_zero: true,
            animation: false,
            responsive: true,
            maintain_aspect_ratio: false,
            border_width: 1,
        }
    }
}

/// The dashboard charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Events per day, stacked by category
    Events,
    /// DShield targets per day
    Dshield,
    /// Reputation per day
    Reputation,
    /// Days an IP was listed, per blacklist
    Blacklist,
    /// Values per key (IP), no date axis
    Keyed,
}

impl ChartKind {
    /// Canvas element the chart is drawn into
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartKind::Events => "plot-events",
            ChartKind::Dshield => "plot-dshield",
            ChartKind::Reputation => "plot-rep",
            ChartKind::Blacklist => "plot-bl",
            ChartKind::Keyed => "plot-ips",
        }
    }

    /// Display format of the date axis
    pub fn label_format(&self) -> LabelFormat {
        match self {
            ChartKind::Events => LabelFormat::Short,
            _ => LabelFormat::Iso,
        }
    }

    /// Name of the single series of a non-partitioned chart
    pub fn series_name(&self) -> &'static str {
        match self {
            ChartKind::Dshield => "# of reports",
            _ => "# of rep",
        }
    }

    /// Options the dashboard uses for this chart
    pub fn default_options(&self) -> ChartOptions {
        ChartOptions {
            stacked: !matches!(self, ChartKind::Keyed),
            ..ChartOptions::default()
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Events => write!(f, "events"),
            ChartKind::Dshield => write!(f, "dshield"),
            ChartKind::Reputation => write!(f, "reputation"),
            ChartKind::Blacklist => write!(f, "blacklist"),
            ChartKind::Keyed => write!(f, "keyed"),
        }
    }
}

/// A fully specified chart: what to draw, where, and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub canvas: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartSpec {
    /// Chart with the kind's default canvas and options
    pub fn new(kind: ChartKind, data: ChartData) -> Self {
        Self {
            kind,
            canvas: kind.canvas_id().to_string(),
            data,
            options: kind.default_options(),
        }
    }
}
