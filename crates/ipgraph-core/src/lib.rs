//! Core types, traits, and utilities for ipgraph
//!
//! This crate provides the foundational types, error handling, timezone
//! configuration, date windows, colour palettes and chart payload types
//! used by all other ipgraph crates.

pub mod chart;
pub mod error;
pub mod palette;
pub mod timezone;
pub mod types;
pub mod window;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use chart::{ChartData, ChartKind, ChartOptions, ChartSpec, Series};
pub use error::{IpgraphError, Result};
pub use palette::{ColorAssignmentState, ColorPolicy, FixedPalette, Rgb};
pub use types::{BlacklistHistory, CategoryName, DailyDate, EventRecord, KeyValueLine, Measure};
pub use window::DateWindow;
