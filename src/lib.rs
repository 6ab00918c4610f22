//! ipgraph - Daily bucketed charts of per-IP security events
//!
//! This library provides functionality to:
//! - Build a window of calendar days ending today in a chosen timezone
//! - Bucket dated event records into per-day, per-category series
//! - Mark the days on which an IP appeared on each blacklist
//! - Sum tab-separated key/value lines into a per-key chart
//! - Colour series from a fixed category table or a session-stable random palette
//! - Render the result as a terminal table or as chart configuration JSON
//!
//! # Examples
//!
//! ```no_run
//! use ipgraph::{
//!     aggregation::Aggregator,
//!     charts::{ChartRequest, build_chart},
//!     chart::ChartKind,
//!     data_loader::{DataLoader, InputSource},
//!     timezone::TimezoneConfig,
//!     window::DateWindow,
//! };
//!
//! fn main() -> ipgraph::Result<()> {
//!     let tz = TimezoneConfig::from_cli(Some("Europe/Prague"), false)?;
//!     let aggregator = Aggregator::new(DateWindow::ending_today(30, &tz)?, tz);
//!     let loader = DataLoader::new(InputSource::from_arg("events.json"));
//!
//!     let request = ChartRequest::new(ChartKind::Events);
//!     let mut colors = request.color_policy();
//!     let spec = build_chart(&request, &loader, aggregator, colors.as_mut())?;
//!     println!("{} series", spec.data.series.len());
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod charts;
pub mod cli;
pub mod data_loader;

// Re-export the core modules so callers need a single dependency
pub use ipgraph_core::{chart, error, palette, timezone, types, window};
pub use ipgraph_terminal::output;

// Re-export commonly used types
pub use error::{IpgraphError, Result};
pub use types::{BlacklistHistory, DailyDate, EventRecord, KeyValueLine, MeasureKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
