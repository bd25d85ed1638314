//! End-to-end pass over the whole pipeline: CSV text in, filtered and
//! aggregated chart data out, plus the export surface.

use std::collections::BTreeSet;

use ui::charts::{present, ChartKind, ChartSpec};
use ui::core::aggregate;
use ui::core::dataset::Dataset;
use ui::core::export;
use ui::core::filters::{self, FilterState};
use ui::core::theme::Theme;

const SCENARIO_CSV: &str = "\
Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales
Super Mario Bros.,NES,1985,Platform,Nintendo,29.08,3.58,6.81,0.77,40.24
Grand Theft Auto V,PS3,2013,Action,Rockstar,7.01,9.27,0.97,4.14,21.40
FIFA Street,PS3,2006,Sports,EA,4.00,4.00,1.00,1.00,10.00
";

fn scenario_dataset() -> Dataset {
    let records = ui::core::dataset::parse_records(SCENARIO_CSV.as_bytes()).unwrap();
    Dataset::from_records(records)
}

#[test]
fn ps3_window_filters_aggregates_and_ranks() {
    let dataset = scenario_dataset();

    let mut state = FilterState::initial(&dataset);
    state.select_all(&dataset);
    state.year_lo = 1990;
    state.year_hi = 2020;
    state.platforms = BTreeSet::from(["PS3".to_string()]);

    let view = filters::apply(&dataset, &state);
    let names: Vec<&str> = view.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Grand Theft Auto V", "FIFA Street"]);

    let platforms = aggregate::by_platform(&view, 10);
    assert_eq!(platforms.len(), 1);
    assert_eq!(platforms[0].0, "PS3");
    assert!((platforms[0].1 - 31.40).abs() < 1e-9);

    let top = aggregate::top_n(&view, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].publisher, "Rockstar");
}

#[test]
fn filtered_view_flows_into_a_renderable_chart() {
    let dataset = scenario_dataset();
    let mut state = FilterState::initial(&dataset);
    state.select_all(&dataset);

    let view = filters::apply(&dataset, &state);
    let yearly = aggregate::by_year(&view);
    let spec = ChartSpec::new(ChartKind::Line, "Trend", Theme::Dark)
        .axis_labels("Year", "Global Sales (millions)")
        .categories(yearly.iter().map(|(year, _)| year.to_string()).collect())
        .series("Global Sales", yearly.iter().map(|(_, s)| *s).collect());

    let scene = present(&spec).unwrap();
    assert!(!scene.placeholder);
}

#[test]
fn zero_row_selection_stays_calm_end_to_end() {
    let dataset = scenario_dataset();
    let mut state = FilterState::initial(&dataset);
    state.select_all(&dataset);
    state.genres.clear();

    let view = filters::apply(&dataset, &state);
    assert!(view.is_empty());

    // Aggregations return empty tables rather than failing.
    assert!(aggregate::by_year(&view).is_empty());
    assert!(aggregate::by_genre(&view).is_empty());

    // The chart renders a placeholder, not an error.
    let spec = ChartSpec::new(ChartKind::Bar, "Empty", Theme::Light);
    assert!(present(&spec).unwrap().placeholder);

    // The download is the header line alone.
    let csv = export::view_to_csv(&view);
    assert_eq!(
        csv,
        "Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales\n"
    );
}

#[test]
fn export_reproduces_the_scenario_rows() {
    let dataset = scenario_dataset();
    let mut state = FilterState::initial(&dataset);
    state.select_all(&dataset);
    state.year_lo = 1990;
    state.year_hi = 2020;
    state.platforms = BTreeSet::from(["PS3".to_string()]);

    let csv = export::view_to_csv(&filters::apply(&dataset, &state));
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Grand Theft Auto V,PS3,2013,Action,Rockstar,"));
    assert!(lines[2].starts_with("FIFA Street,PS3,2006,Sports,EA,"));
}

#[test]
fn bundled_sample_feeds_the_full_dashboard_path() {
    let dataset = ui::core::dataset::load_embedded().unwrap();

    let state = FilterState::initial(&dataset);
    assert_eq!(state.platforms.len(), 5);
    assert_eq!(state.genres.len(), 5);
    assert_eq!(state.publisher, "All");

    let view = filters::apply(&dataset, &state);
    assert!(!view.is_empty());

    // Every tab's headline aggregation has something to draw.
    assert!(!aggregate::by_year(&view).is_empty());
    assert!(!aggregate::by_genre(&view).is_empty());
    assert!(aggregate::by_region(&view).total() > 0.0);
    assert!(!aggregate::cross(&view, aggregate::CrossDim::Platform, 6)
        .series
        .is_empty());
}
