//! Output formatting module for ipgraph
//!
//! This module provides formatters for displaying chart data in different formats:
//! - JSON: the bar-chart configuration (`type`, `data.labels`,
//!   `data.datasets`, `options`) handed to the rendering library
//! - Table: one row per label and one column per series, for terminals
//!
//! # Examples
//!
//! ```
//! use ipgraph_core::chart::{ChartData, ChartKind, ChartSpec, Series};
//! use ipgraph_terminal::output::{OutputFormatter, get_formatter};
//!
//! let mut data = ChartData::new(vec!["2024-01-09".to_string(), "2024-01-10".to_string()]);
//! data.series.push(Series {
//!     name: "# of reports".to_string(),
//!     values: vec![3.0, 0.0],
//!     color: "rgba(170,255,255,0.5)".to_string(),
//! });
//! let chart = ChartSpec::new(ChartKind::Dshield, data);
//!
//! let json = get_formatter(true, false).format_chart(&chart);
//! assert!(json.contains("\"plot-dshield\""));
//! ```

use colored::Colorize;
use ipgraph_core::chart::{ChartKind, ChartSpec, LegendPosition, TooltipMode};
use prettytable::{Cell, Row, Table, format, row};
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render one chart
    fn format_chart(&self, chart: &ChartSpec) -> String;
}

/// JSON formatter producing a bar-chart configuration
pub struct JsonFormatter;

impl JsonFormatter {
    /// Chart configuration as a JSON value
    pub fn chart_config(chart: &ChartSpec) -> Value {
        let opts = &chart.options;
        let datasets: Vec<Value> = chart
            .data
            .series
            .iter()
            .map(|s| {
                json!({
                    "label": s.name,
                    "data": s.values,
                    "backgroundColor": s.color,
                    "borderWidth": opts.border_width,
                })
            })
            .collect();

        json!({
            "canvas": chart.canvas,
            "type": "bar",
            "data": {
                "labels": chart.data.labels,
                "datasets": datasets,
            },
            "options": {
                "animation": opts.animation,
                "responsive": opts.responsive,
                "maintainAspectRatio": opts.maintain_aspect_ratio,
                "scales": {
                    "xAxes": [{ "stacked": opts.stacked }],
                    "yAxes": [{
                        "min": opts.min,
                        "stacked": opts.stacked,
                        "scaleLabel": {
                            "display": true,
                            "labelString": opts.y_axis_label,
                        },
                        "ticks": {
                            "precision": opts.tick_precision,
                            "beginAtZero": opts.begin_at_zero,
                        },
                    }],
                },
                "legend": { "position": legend_position(opts.legend_position) },
                "tooltips": { "mode": tooltip_mode(opts.tooltip_mode) },
            },
        })
    }
}

fn legend_position(position: LegendPosition) -> &'static str {
    match position {
        LegendPosition::Top => "top",
        LegendPosition::Bottom => "bottom",
        LegendPosition::Left => "left",
        LegendPosition::Right => "right",
    }
}

fn tooltip_mode(mode: TooltipMode) -> &'static str {
    match mode {
        TooltipMode::Index => "index",
        TooltipMode::Nearest => "nearest",
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_chart(&self, chart: &ChartSpec) -> String {
        serde_json::to_string_pretty(&Self::chart_config(chart)).unwrap_or_else(|e| {
            warn!("Failed to serialize {} chart: {}", chart.kind, e);
            format!("{{\"error\": \"{e}\"}}")
        })
    }
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Whether to print the colour legend with ANSI colours
    pub colored_output: bool,
}

impl TableFormatter {
    pub fn new(colored_output: bool) -> Self {
        Self { colored_output }
    }

    /// Integers without decimals, everything else with two
    fn format_value(value: f64) -> String {
        if value.fract() == 0.0 {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        }
    }

    /// RGB channels of an `rgba(r,g,b,a)` string
    fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
        let inner = color.strip_prefix("rgba(")?.strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>());
        match (channels.next(), channels.next(), channels.next()) {
            (Some(Ok(r)), Some(Ok(g)), Some(Ok(b))) => Some((r, g, b)),
            _ => None,
        }
    }

    /// One swatch line per series
    fn format_legend(&self, chart: &ChartSpec) -> String {
        let mut legend = String::new();
        for series in &chart.data.series {
            let swatch = match (self.colored_output, Self::parse_rgb(&series.color)) {
                (true, Some((r, g, b))) => "■".truecolor(r, g, b).to_string(),
                _ => "■".to_string(),
            };
            legend.push_str(&format!("{swatch} {} ({})\n", series.name, series.color));
        }
        legend
    }
}

impl OutputFormatter for TableFormatter {
    fn format_chart(&self, chart: &ChartSpec) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        let axis = if chart.kind == ChartKind::Keyed {
            "Key"
        } else {
            "Date"
        };
        let mut titles = Row::new(vec![Cell::new(axis).style_spec("b")]);
        for series in &chart.data.series {
            titles.add_cell(Cell::new(&series.name).style_spec("b"));
        }
        titles.add_cell(Cell::new("Total").style_spec("b"));
        table.set_titles(titles);

        let totals = chart.data.column_totals();
        for (i, label) in chart.data.labels.iter().enumerate() {
            let mut row = Row::new(vec![Cell::new(label)]);
            for series in &chart.data.series {
                let value = series.values.get(i).copied().unwrap_or(0.0);
                row.add_cell(Cell::new(&Self::format_value(value)).style_spec("r"));
            }
            row.add_cell(Cell::new(&Self::format_value(totals[i])).style_spec("r"));
            table.add_row(row);
        }

        let mut total_row = row![b -> "TOTAL"];
        for series in &chart.data.series {
            total_row.add_cell(Cell::new(&Self::format_value(series.total())).style_spec("br"));
        }
        total_row.add_cell(
            Cell::new(&Self::format_value(totals.iter().sum())).style_spec("br"),
        );
        table.add_row(total_row);

        let mut output = format!("{} ({})\n", chart.kind, chart.canvas);
        output.push_str(&table.to_string());
        if chart.data.series.is_empty() {
            output.push_str("No data in range\n");
        } else {
            output.push('\n');
            output.push_str(&self.format_legend(chart));
        }
        output
    }
}

/// Get appropriate formatter based on output format
pub fn get_formatter(json: bool, colored_output: bool) -> Box<dyn OutputFormatter> {
    debug!("Selecting formatter (json: {}, colored: {})", json, colored_output);
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(colored_output))
    }
}
