//! Integration tests for ipgraph
//!
//! These exercise the full path from input text to rendered chart output.

mod common;

use common::{aggregator, blacklist, day_label, event, loader_for};
use ipgraph::{
    chart::ChartKind,
    charts::{ChartRequest, build_chart},
    cli::PaletteChoice,
    output::{JsonFormatter, OutputFormatter, TableFormatter},
    palette::{ColorAssignmentState, FixedPalette},
    types::{EventRecord, MeasureKind},
};

#[test]
fn test_end_to_end_window_example() {
    let agg = aggregator(2);
    let records = vec![
        EventRecord::new("2024-01-09").with_category("A").with_count(3.0),
        EventRecord::new("2024-01-09").with_category("A").with_count(2.0),
        EventRecord::new("2024-01-11").with_category("A").with_count(99.0),
    ];

    let chart = agg.aggregate_by_category(&records, MeasureKind::Count, &mut FixedPalette);

    assert_eq!(chart.labels, ["2024-01-08", "2024-01-09", "2024-01-10"]);
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].name, "A");
    assert_eq!(chart.series[0].values, [0.0, 5.0, 0.0]);
}

#[test]
fn test_default_window_has_31_days() {
    let agg = aggregator(ipgraph::window::DEFAULT_WINDOW_DAYS);
    let window = agg.window();
    assert_eq!(window.len(), 31);
    assert_eq!(window.labels()[0], "2023-12-11");
    assert_eq!(window.labels()[30], "2024-01-10");
}

#[test]
fn test_series_lengths_match_window() {
    let agg = aggregator(6);
    let records: Vec<EventRecord> = (0..10)
        .map(|d| event(d, common::TEST_CATEGORIES[d as usize % 4], 1.0))
        .collect();

    let chart = agg.aggregate_by_category(&records, MeasureKind::Count, &mut FixedPalette);

    assert_eq!(chart.series.len(), 4);
    for series in &chart.series {
        assert_eq!(series.values.len(), 7);
    }
    // Days 7..=9 fall before the window
    let kept: f64 = chart.series.iter().map(|s| s.total()).sum();
    assert_eq!(kept, 7.0);
}

#[test]
fn test_blacklist_presence_across_lists() {
    let agg = aggregator(3);
    let lists = vec![
        blacklist("spamhaus", &[0, 0, 0, 2]),
        blacklist("dnsbl", &[1, 10]),
    ];
    let mut colors = ColorAssignmentState::seeded(11);

    let chart = agg.aggregate_presence(&lists, &mut colors);

    let spamhaus = chart.series_named("spamhaus").unwrap();
    assert_eq!(spamhaus.values, [0.0, 1.0, 0.0, 1.0]);
    let dnsbl = chart.series_named("dnsbl").unwrap();
    assert_eq!(dnsbl.values, [0.0, 0.0, 1.0, 0.0]);
    assert!(chart.series.iter().flat_map(|s| &s.values).all(|v| *v <= 1.0));
}

#[test]
fn test_random_colours_stable_across_charts() {
    let agg = aggregator(3);
    let mut colors = ColorAssignmentState::seeded(99);

    let first = agg.aggregate_presence(&[blacklist("a", &[0])], &mut colors);
    let second = agg.aggregate_presence(&[blacklist("b", &[1]), blacklist("a", &[2])], &mut colors);

    assert_eq!(
        first.series_named("a").unwrap().color,
        second.series_named("a").unwrap().color
    );
    assert_eq!(colors.len(), 2);
}

#[test]
fn test_dshield_chart_json_output() {
    let (_file, loader) = loader_for(&format!(
        "{{\"date\":\"{}\",\"targets\":4}}\n{{\"date\":\"{}\",\"targets\":\"6\"}}\n",
        day_label(0),
        day_label(0)
    ));
    let request = ChartRequest::new(ChartKind::Dshield);
    let spec = build_chart(&request, &loader, aggregator(2), &mut FixedPalette).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format_chart(&spec)).unwrap();

    assert_eq!(json["canvas"], "plot-dshield");
    assert_eq!(json["type"], "bar");
    assert_eq!(json["data"]["labels"][2], "2024-01-10");
    let dataset = &json["data"]["datasets"][0];
    assert_eq!(dataset["label"], "# of reports");
    assert_eq!(dataset["data"][2], 10.0);
    assert_eq!(dataset["backgroundColor"], "rgba(170,255,255,0.5)");
    assert_eq!(json["options"]["legend"]["position"], "bottom");
    assert_eq!(json["options"]["tooltips"]["mode"], "index");
}

#[test]
fn test_events_chart_table_output() {
    let (_file, loader) = loader_for(
        r#"[
            {"date":"2024-01-09","cat":"AttemptLogin","n":3},
            {"date":"2024-01-10","cat":"ReconScanning","n":"2"},
            {"date":"2024-01-10","cat":"AttemptLogin","n":1}
        ]"#,
    );
    let request = ChartRequest::new(ChartKind::Events);
    let spec = build_chart(&request, &loader, aggregator(1), &mut FixedPalette).unwrap();
    let table = TableFormatter::new(false).format_chart(&spec);

    assert!(table.contains("Jan 9"));
    assert!(table.contains("Jan 10"));
    assert!(table.contains("AttemptLogin"));
    assert!(table.contains("ReconScanning"));
    assert!(table.contains("TOTAL"));
}

#[test]
fn test_events_chart_with_targets_measure() {
    let (_file, loader) = loader_for(
        "{\"date\":\"2024-01-10\",\"cat\":\"AttemptExploit\",\"n\":1,\"targets\":20}\n",
    );
    let request = ChartRequest::new(ChartKind::Events).with_measure(MeasureKind::Targets);
    let spec = build_chart(&request, &loader, aggregator(0), &mut FixedPalette).unwrap();
    assert_eq!(spec.data.series[0].values, [20.0]);
}

#[test]
fn test_keyed_chart_drops_non_numeric_values() {
    let (_file, loader) = loader_for("10.0.0.1\t5\n10.0.0.2\tunknown\n10.0.0.3\t1.5\n10.0.0.1\t1\n");
    let request = ChartRequest::new(ChartKind::Keyed);
    let spec = build_chart(&request, &loader, aggregator(30), &mut FixedPalette).unwrap();

    assert_eq!(spec.data.labels, ["10.0.0.1", "10.0.0.3"]);
    assert_eq!(spec.data.series[0].values, [6.0, 1.5]);
    assert!(!spec.options.stacked);
}

#[test]
fn test_fixed_palette_override_for_blacklists() {
    let (_file, loader) = loader_for(r#"[{"n":"AttemptLogin","h":["2024-01-10"]}]"#);
    let request = ChartRequest::new(ChartKind::Blacklist).with_palette(Some(PaletteChoice::Fixed));
    let mut colors = request.color_policy();
    let spec = build_chart(&request, &loader, aggregator(1), colors.as_mut()).unwrap();
    assert_eq!(spec.data.series[0].color, "rgba(111,217,46,0.5)");
}

#[test]
fn test_mistyped_record_in_array_is_skipped() {
    let (_file, loader) = loader_for(
        r#"[{"date":"2024-01-10","cat":"A","n":3},{"date":20240110,"cat":"A","n":1},{"date":"2024-01-09","cat":"A","n":true}]"#,
    );
    let request = ChartRequest::new(ChartKind::Events);
    let spec = build_chart(&request, &loader, aggregator(2), &mut FixedPalette).unwrap();

    assert_eq!(spec.data.series.len(), 1);
    assert_eq!(spec.data.series[0].name, "A");
    assert_eq!(spec.data.series[0].values, [0.0, 0.0, 3.0]);
}

#[test]
fn test_malformed_json_array_is_an_error() {
    let (_file, loader) = loader_for("[{\"date\": ");
    let result = build_chart(
        &ChartRequest::new(ChartKind::Events),
        &loader,
        aggregator(1),
        &mut FixedPalette,
    );
    assert!(matches!(result, Err(ipgraph::IpgraphError::Parse { .. })));
}
