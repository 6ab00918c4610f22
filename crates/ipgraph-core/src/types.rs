//! Core domain types for ipgraph
//!
//! This module contains the records the dashboard feeds into the
//! aggregator, plus strongly-typed wrappers for calendar days, categories
//! and numeric measures.

use crate::error::{IpgraphError, Result};
use crate::timezone::TimezoneConfig;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label format of a calendar day, used as both bucket key and x-axis label
pub const DAY_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Calendar day used as a bucket key
///
/// # Examples
/// ```
/// use ipgraph_core::types::DailyDate;
///
/// let day = DailyDate::parse_label("2024-01-09").unwrap();
/// assert_eq!(day.label(), "2024-01-09");
/// assert_eq!(day.format("%b %-d"), "Jan 9");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DailyDate(NaiveDate);

impl DailyDate {
    /// Create a new DailyDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// Parse a `YYYY-MM-DD` label
    pub fn parse_label(label: &str) -> Result<Self> {
        NaiveDate::parse_from_str(label.trim(), DAY_LABEL_FORMAT)
            .map(Self)
            .map_err(|_| IpgraphError::InvalidDate(format!("'{label}'. Expected YYYY-MM-DD")))
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }

    /// Format as YYYY-MM-DD
    pub fn label(&self) -> String {
        self.format(DAY_LABEL_FORMAT)
    }

    /// The day `days` days earlier, None past the start of the calendar
    pub fn days_before(&self, days: u32) -> Option<Self> {
        self.0
            .checked_sub_days(Days::new(u64::from(days)))
            .map(Self)
    }
}

impl fmt::Display for DailyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification tag of an event (e.g. attack type)
///
/// # Examples
/// ```
/// use ipgraph_core::types::CategoryName;
///
/// let cat = CategoryName::new("ReconScanning");
/// assert_eq!(cat.as_str(), "ReconScanning");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Bucket used for records that carry no category
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A numeric measure as delivered by the server
///
/// Some fields arrive as JSON numbers, others as text. Text is parsed
/// explicitly so that summing never degrades into string concatenation.
///
/// # Examples
/// ```
/// use ipgraph_core::types::Measure;
///
/// assert_eq!(Measure::Text(" 2.5 ".into()).value(), Some(2.5));
/// assert_eq!(Measure::Text("n/a".into()).value(), None);
/// assert_eq!(Measure::Number(3.0).value(), Some(3.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
}

impl Measure {
    /// Numeric value, or None for non-numeric or non-finite input
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            Measure::Number(n) => *n,
            Measure::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for Measure {
    fn from(v: f64) -> Self {
        Measure::Number(v)
    }
}

impl From<&str> for Measure {
    fn from(s: &str) -> Self {
        Measure::Text(s.to_string())
    }
}

/// Which numeric field of an [`EventRecord`] gets bucketed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureKind {
    /// Number of events (`n`)
    #[default]
    Count,
    /// Number of targets reported (`targets`)
    Targets,
    /// Reputation score (`reputation`)
    Reputation,
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureKind::Count => write!(f, "count"),
            MeasureKind::Targets => write!(f, "targets"),
            MeasureKind::Reputation => write!(f, "reputation"),
        }
    }
}

/// One dated security-event record
///
/// Field aliases accept the short keys the web backend emits
/// (`cat`, `n`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Day label, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, alias = "cat", skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryName>,
    #[serde(default, alias = "n", skip_serializing_if = "Option::is_none")]
    pub count: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<Measure>,
}

impl EventRecord {
    /// Record dated `date` with no category and no measures
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(CategoryName::new(category));
        self
    }

    pub fn with_count(mut self, count: impl Into<Measure>) -> Self {
        self.count = Some(count.into());
        self
    }

    pub fn with_targets(mut self, targets: impl Into<Measure>) -> Self {
        self.targets = Some(targets.into());
        self
    }

    pub fn with_reputation(mut self, reputation: impl Into<Measure>) -> Self {
        self.reputation = Some(reputation.into());
        self
    }

    /// Numeric value of the selected measure
    pub fn measure(&self, kind: MeasureKind) -> Option<f64> {
        let field = match kind {
            MeasureKind::Count => &self.count,
            MeasureKind::Targets => &self.targets,
            MeasureKind::Reputation => &self.reputation,
        };
        field.as_ref().and_then(Measure::value)
    }

    /// Category name, or [`CategoryName::UNKNOWN`] when absent
    pub fn category_or_unknown(&self) -> &str {
        self.category
            .as_ref()
            .map(CategoryName::as_str)
            .unwrap_or(CategoryName::UNKNOWN)
    }
}

/// Listing history of an IP on one blacklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlacklistHistory {
    /// Blacklist name
    #[serde(alias = "n")]
    pub name: String,
    /// Timestamps at which the IP was seen on the list
    #[serde(default, alias = "h")]
    pub hits: Vec<String>,
}

impl BlacklistHistory {
    pub fn new(name: impl Into<String>, hits: Vec<String>) -> Self {
        Self {
            name: name.into(),
            hits,
        }
    }

    /// Calendar day of each hit, None where the timestamp is unparseable
    pub fn hit_dates<'a>(
        &'a self,
        tz: &'a TimezoneConfig,
    ) -> impl Iterator<Item = Option<DailyDate>> + 'a {
        self.hits.iter().map(move |hit| parse_timestamp_date(hit, tz))
    }
}

/// Calendar day of a timestamp string
///
/// Offset-carrying timestamps (RFC 3339) are converted into `tz`; naive
/// timestamps and bare dates are taken as already local.
pub fn parse_timestamp_date(raw: &str, tz: &TimezoneConfig) -> Option<DailyDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(tz.date_of(&dt.with_timezone(&Utc)));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(DailyDate::new(naive.date()));
        }
    }
    NaiveDate::parse_from_str(raw, DAY_LABEL_FORMAT)
        .ok()
        .map(DailyDate::new)
}

/// One `KEY<TAB>VALUE` line of the keyed chart input
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueLine {
    pub key: String,
    pub value: f64,
}

impl KeyValueLine {
    /// Parse a tab-separated line
    ///
    /// Returns None for lines without a tab, with an empty key, or whose
    /// value is not a finite number. Fields past the second are ignored.
    ///
    /// ```
    /// use ipgraph_core::types::KeyValueLine;
    ///
    /// let line = KeyValueLine::parse("192.0.2.1\t0.75").unwrap();
    /// assert_eq!(line.key, "192.0.2.1");
    /// assert_eq!(line.value, 0.75);
    /// assert!(KeyValueLine::parse("192.0.2.1\thigh").is_none());
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split('\t');
        let key = fields.next()?.trim();
        let value = Measure::Text(fields.next()?.to_string()).value()?;
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value,
        })
    }
}
