//! Data loader module for reading chart input
//!
//! Record-based charts read either a JSON array of records or JSONL (one
//! record per line). The keyed chart reads raw `KEY<TAB>VALUE` lines.
//! Input comes from a file or, when the path is `-`, from stdin.
//!
//! # Examples
//!
//! ```no_run
//! use ipgraph::data_loader::{DataLoader, InputSource};
//! use ipgraph::types::EventRecord;
//!
//! # fn example() -> ipgraph::Result<()> {
//! let loader = DataLoader::new(InputSource::from_arg("events.json"));
//! let records: Vec<EventRecord> = loader.load_records()?;
//! println!("Loaded {} records", records.len());
//! # Ok(())
//! # }
//! ```

use ipgraph_core::error::{IpgraphError, Result};
use ipgraph_core::types::KeyValueLine;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where input is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Path used in error messages
    fn display_path(&self) -> &Path {
        match self {
            InputSource::Stdin => Path::new("<stdin>"),
            InputSource::File(path) => path,
        }
    }

    fn read_to_string(&self) -> Result<String> {
        match self {
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
            InputSource::File(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

/// Reads records or lines from one input source
pub struct DataLoader {
    source: InputSource,
}

impl DataLoader {
    pub fn new(source: InputSource) -> Self {
        Self { source }
    }

    /// Load JSON records (array or JSONL)
    pub fn load_records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let text = self.source.read_to_string()?;
        let records = parse_records(&text, self.source.display_path())?;
        debug!(
            "Loaded {} records from {}",
            records.len(),
            self.source.display_path().display()
        );
        Ok(records)
    }

    /// Load `KEY<TAB>VALUE` lines, dropping malformed ones
    pub fn load_lines(&self) -> Result<Vec<KeyValueLine>> {
        let text = self.source.read_to_string()?;
        Ok(parse_lines(&text))
    }
}

/// Parse a JSON array, or JSONL when the text does not start with `[`
///
/// Text that starts with `[` but is not a JSON array is an error. Any
/// single record that does not decode, whether an array element or a
/// JSONL line, is skipped with a warning and the rest are still used.
pub fn parse_records<T: DeserializeOwned>(text: &str, origin: &Path) -> Result<Vec<T>> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let elements: Vec<Value> =
            serde_json::from_str(trimmed).map_err(|e| IpgraphError::Parse {
                file: origin.to_path_buf(),
                error: e.to_string(),
            })?;
        let mut records = Vec::with_capacity(elements.len());
        for (i, element) in elements.into_iter().enumerate() {
            match serde_json::from_value::<T>(element) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "Failed to parse record {} in {}: {}",
                        i + 1,
                        origin.display(),
                        e
                    );
                }
            }
        }
        return Ok(records);
    }

    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    "Failed to parse line {} in {}: {}",
                    i + 1,
                    origin.display(),
                    e
                );
            }
        }
    }
    Ok(records)
}

/// Parse tab-separated key/value lines, skipping blank and malformed ones
pub fn parse_lines(text: &str) -> Vec<KeyValueLine> {
    let mut dropped = 0usize;
    let lines: Vec<KeyValueLine> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| {
            let parsed = KeyValueLine::parse(l);
            if parsed.is_none() {
                dropped += 1;
            }
            parsed
        })
        .collect();
    debug!("Parsed {} key/value lines ({} dropped)", lines.len(), dropped);
    lines
}
