//! Terminal output formatting for ipgraph
//!
//! This crate turns a [`ipgraph_core::ChartSpec`] into either the JSON
//! configuration a bar-chart library consumes or a plain terminal table.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
