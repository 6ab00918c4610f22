//! ipgraph - Daily bucketed charts of per-IP security events

use clap::Parser;
use ipgraph::{
    aggregation::Aggregator,
    charts::{ChartRequest, build_chart},
    cli::{Cli, Command, parse_today, validate_opacity},
    data_loader::{DataLoader, InputSource},
    error::Result,
    output::get_formatter,
    timezone::TimezoneConfig,
    window::DateWindow,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the chart request for a subcommand
fn chart_request(cli: &Cli) -> ChartRequest {
    let request = ChartRequest::new(cli.command.kind())
        .with_palette(cli.palette)
        .with_seed(cli.seed);

    match &cli.command {
        Command::Events { measure } => request.with_measure((*measure).into()),
        Command::Keyed { label } => request.with_series_name(label.clone()),
        Command::Dshield | Command::Reputation | Command::Blacklist => request,
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first to check for quiet flag
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ipgraph=info"))
    };

    // Logs go to stderr so stdout stays clean for --json
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opacity = validate_opacity(cli.opacity)?;
    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    let today = match &cli.today {
        Some(value) => parse_today(value)?,
        None => tz_config.today(),
    };
    let window = DateWindow::new(cli.days, today)?;
    info!("Charting {} days ending {}", window.len(), today);

    let aggregator = Aggregator::new(window, tz_config).with_opacity(opacity);
    let loader = DataLoader::new(InputSource::from_arg(&cli.input));
    let request = chart_request(&cli);
    let mut colors = request.color_policy();

    let spec = build_chart(&request, &loader, aggregator, colors.as_mut())?;

    let colored_output =
        is_terminal::is_terminal(std::io::stdout()) && std::env::var_os("NO_COLOR").is_none();
    let formatter = get_formatter(cli.json, colored_output);
    println!("{}", formatter.format_chart(&spec));

    Ok(())
}
