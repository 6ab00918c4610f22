//! CLI interface for ipgraph
//!
//! This module defines the command-line interface using clap. Each
//! subcommand builds one dashboard chart from the records on `--input`.
//!
//! # Example
//!
//! ```bash
//! # Events per day and category for the last 30 days, as chart JSON
//! ipgraph events --input events.json --json
//!
//! # DShield report counts over a two-week window ending on a fixed day
//! ipgraph dshield --input dshield.json --days 14 --today 2024-01-10
//!
//! # Blacklist history with reproducible colours
//! ipgraph blacklist --input bl.json --seed 7
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use ipgraph_core::chart::ChartKind;
use ipgraph_core::error::{IpgraphError, Result};
use ipgraph_core::palette::DEFAULT_OPACITY;
use ipgraph_core::types::{DailyDate, MeasureKind};
use ipgraph_core::window::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

/// Bucket per-IP security events into daily chart series
#[derive(Parser, Debug, Clone)]
#[command(name = "ipgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input file (JSON array or JSONL; tab-separated lines for `keyed`), `-` for stdin
    #[arg(long, short = 'i', default_value = "-", global = true)]
    pub input: String,

    /// Number of days before today covered by the chart
    #[arg(
        long,
        short = 'n',
        env = "IPGRAPH_DAYS",
        default_value_t = DEFAULT_WINDOW_DAYS,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_WINDOW_DAYS)),
        global = true
    )]
    pub days: u32,

    /// Last day of the window (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Timezone whose calendar days bound the window (e.g. "Europe/Prague", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', env = "IPGRAPH_TIMEZONE", global = true)]
    pub timezone: Option<String>,

    /// Use UTC for day boundaries (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Colour policy for category series; defaults per chart
    #[arg(long, value_enum, global = true)]
    pub palette: Option<PaletteChoice>,

    /// Seed for the random palette
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Fill opacity of series colours, between 0 and 1
    #[arg(long, default_value_t = DEFAULT_OPACITY, global = true)]
    pub opacity: f64,

    /// Output the chart configuration as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Chart to build
    #[command(subcommand)]
    pub command: Command,
}

/// Available charts
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Events per day, stacked by category
    Events {
        /// Record field summed per day
        #[arg(long, value_enum, default_value = "count")]
        measure: MeasureArg,
    },
    /// DShield targets per day
    Dshield,
    /// Reputation score per day
    Reputation,
    /// Days on which each blacklist listed the IP
    Blacklist,
    /// Values per key from KEY<TAB>VALUE lines
    Keyed {
        /// Series name
        #[arg(long, default_value = "# of rep")]
        label: String,
    },
}

impl Command {
    pub fn kind(&self) -> ChartKind {
        match self {
            Command::Events { .. } => ChartKind::Events,
            Command::Dshield => ChartKind::Dshield,
            Command::Reputation => ChartKind::Reputation,
            Command::Blacklist => ChartKind::Blacklist,
            Command::Keyed { .. } => ChartKind::Keyed,
        }
    }
}

/// Colour policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaletteChoice {
    /// Fixed colours for known categories, gray otherwise
    Fixed,
    /// Random colour per category, stable for the session
    Random,
}

impl PaletteChoice {
    /// Palette the dashboard uses for a chart
    pub fn default_for(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Blacklist => PaletteChoice::Random,
            _ => PaletteChoice::Fixed,
        }
    }
}

/// Measure selection for the events chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MeasureArg {
    Count,
    Targets,
    Reputation,
}

impl From<MeasureArg> for MeasureKind {
    fn from(arg: MeasureArg) -> Self {
        match arg {
            MeasureArg::Count => MeasureKind::Count,
            MeasureArg::Targets => MeasureKind::Targets,
            MeasureArg::Reputation => MeasureKind::Reputation,
        }
    }
}

/// Parse the `--today` argument
pub fn parse_today(value: &str) -> Result<DailyDate> {
    DailyDate::parse_label(value)
}

/// Reject opacities outside [0, 1]
pub fn validate_opacity(opacity: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(opacity)
    } else {
        Err(IpgraphError::InvalidArgument(format!(
            "opacity must be between 0 and 1, got {opacity}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ipgraph", "events"]).unwrap();
        assert_eq!(cli.input, "-");
        assert_eq!(cli.opacity, DEFAULT_OPACITY);
        assert!(!cli.json);
        assert!(matches!(
            cli.command,
            Command::Events {
                measure: MeasureArg::Count
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ipgraph", "dshield", "--input", "d.json", "--days", "7", "--utc", "--json",
        ])
        .unwrap();
        assert_eq!(cli.input, "d.json");
        assert_eq!(cli.days, 7);
        assert!(cli.utc);
        assert!(cli.json);
        assert_eq!(cli.command.kind(), ChartKind::Dshield);
    }

    #[test]
    fn test_keyed_label_and_palette() {
        let cli = Cli::try_parse_from([
            "ipgraph", "keyed", "--label", "score", "--palette", "random", "--seed", "3",
        ])
        .unwrap();
        assert_eq!(cli.palette, Some(PaletteChoice::Random));
        assert_eq!(cli.seed, Some(3));
        match cli.command {
            Command::Keyed { label } => assert_eq!(label, "score"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_days_above_maximum_rejected() {
        let too_many = (MAX_WINDOW_DAYS + 1).to_string();
        assert!(Cli::try_parse_from(["ipgraph", "events", "--days", too_many.as_str()]).is_err());
        assert!(Cli::try_parse_from(["ipgraph", "events", "--days", "200000000"]).is_err());

        let max = MAX_WINDOW_DAYS.to_string();
        let cli = Cli::try_parse_from(["ipgraph", "events", "--days", max.as_str()]).unwrap();
        assert_eq!(cli.days, MAX_WINDOW_DAYS);
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["ipgraph", "pie"]).is_err());
    }

    #[test]
    fn test_default_palette_per_chart() {
        assert_eq!(
            PaletteChoice::default_for(ChartKind::Blacklist),
            PaletteChoice::Random
        );
        assert_eq!(
            PaletteChoice::default_for(ChartKind::Events),
            PaletteChoice::Fixed
        );
    }

    #[test]
    fn test_parse_today() {
        assert_eq!(parse_today("2024-01-10").unwrap().label(), "2024-01-10");
        assert!(parse_today("10/01/2024").is_err());
    }

    #[test]
    fn test_validate_opacity() {
        assert_eq!(validate_opacity(0.5).unwrap(), 0.5);
        assert!(validate_opacity(1.5).is_err());
        assert!(validate_opacity(f64::NAN).is_err());
    }
}
