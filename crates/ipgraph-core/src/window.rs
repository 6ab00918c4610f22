//! Rolling window of calendar days
//!
//! A [`DateWindow`] is the x-axis of every dated chart and, at the same
//! time, the bucketing key: a record lands in slot `i` exactly when its
//! date label equals the window's `i`-th label.

use crate::error::{IpgraphError, Result};
use crate::timezone::TimezoneConfig;
use crate::types::DailyDate;
use std::collections::HashMap;

/// Default number of days before today shown in a chart
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Largest accepted window, about a century of days
pub const MAX_WINDOW_DAYS: u32 = 36_600;

/// How day labels are rendered on the x-axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFormat {
    /// `2024-01-09`
    #[default]
    Iso,
    /// `Jan 9`
    Short,
}

impl LabelFormat {
    fn pattern(self) -> &'static str {
        match self {
            LabelFormat::Iso => crate::types::DAY_LABEL_FORMAT,
            LabelFormat::Short => "%b %-d",
        }
    }
}

/// N+1 consecutive calendar days ending at "today", oldest first
///
/// # Examples
/// ```
/// use ipgraph_core::types::DailyDate;
/// use ipgraph_core::window::DateWindow;
///
/// let today = DailyDate::parse_label("2024-01-10").unwrap();
/// let window = DateWindow::new(2, today).unwrap();
/// assert_eq!(window.labels(), ["2024-01-08", "2024-01-09", "2024-01-10"]);
/// assert_eq!(window.position("2024-01-09"), Some(1));
/// assert_eq!(window.position("2024-01-11"), None);
/// ```
#[derive(Debug, Clone)]
pub struct DateWindow {
    days: Vec<DailyDate>,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl DateWindow {
    /// Window of `n_days + 1` days ending at `today`
    ///
    /// Fails when `n_days` exceeds [`MAX_WINDOW_DAYS`] or the window would
    /// start before the earliest representable date.
    pub fn new(n_days: u32, today: DailyDate) -> Result<Self> {
        if n_days > MAX_WINDOW_DAYS {
            return Err(IpgraphError::InvalidArgument(format!(
                "window of {n_days} days exceeds the maximum of {MAX_WINDOW_DAYS}"
            )));
        }
        let days = (0..=n_days)
            .rev()
            .map(|i| today.days_before(i))
            .collect::<Option<Vec<DailyDate>>>()
            .ok_or_else(|| {
                IpgraphError::InvalidArgument(format!(
                    "window of {n_days} days before {today} starts before the earliest date"
                ))
            })?;
        let labels: Vec<String> = days.iter().map(DailyDate::label).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Ok(Self {
            days,
            labels,
            index,
        })
    }

    /// Window ending at the current day of the configured timezone
    pub fn ending_today(n_days: u32, tz: &TimezoneConfig) -> Result<Self> {
        Self::new(n_days, tz.today())
    }

    /// Number of slots (N+1)
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[DailyDate] {
        &self.days
    }

    /// `YYYY-MM-DD` labels, oldest first
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels rendered for display
    pub fn display_labels(&self, format: LabelFormat) -> Vec<String> {
        match format {
            LabelFormat::Iso => self.labels.clone(),
            LabelFormat::Short => self
                .days
                .iter()
                .map(|d| d.format(format.pattern()))
                .collect(),
        }
    }

    /// Slot of a date label, None when outside the window or malformed
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Slot of a calendar day
    pub fn position_of(&self, day: &DailyDate) -> Option<usize> {
        self.position(&day.label())
    }

    /// Last day of the window
    pub fn today(&self) -> Option<&DailyDate> {
        self.days.last()
    }
}
