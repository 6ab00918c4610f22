//! Error types for ipgraph
//!
//! This module defines the error types used throughout the ipgraph library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Malformed *records* are never errors: they are skipped during
//! aggregation. Only unusable configuration or unreadable input surface here.
//!
//! # Example
//!
//! ```
//! use ipgraph_core::error::{IpgraphError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to IpgraphError
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ipgraph operations
#[derive(Error, Debug)]
pub enum IpgraphError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in ipgraph
///
/// # Example
///
/// ```
/// use ipgraph_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, IpgraphError>;
