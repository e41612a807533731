//! Integration test: run the sample county fixtures through the full pipeline and export to SVG.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use choro_core::{ChartConfig, Fips, build_chart};
use choro_export::{SvgMetadata, to_svg};

fn fixture(name: &str) -> String {
    // Locate the fixtures relative to the workspace root.
    let workspace_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    let path = workspace_root.join("assets/fixtures").join(name);
    assert!(path.exists(), "fixture not found at {path:?}");
    std::fs::read_to_string(&path).unwrap()
}

fn sample() -> choro_core::Chart {
    build_chart(
        &fixture("counties-sample.json"),
        &fixture("education-sample.json"),
        &ChartConfig::default(),
    )
    .expect("sample chart should build")
}

#[test]
fn sample_joins_matched_counties_and_reports_the_rest() {
    let chart = sample();
    assert_eq!(chart.view().len(), 4);
    assert_eq!(chart.unmatched(), &[Fips(99999)]);
    assert_eq!(
        chart.county(Fips(6037)).map(|c| c.location.as_str()),
        Some("Los Angeles County, CA")
    );
}

#[test]
fn sample_scale_starts_at_dataset_minimum() {
    // Jefferson, MS has no geometry but still sets the minimum.
    let chart = sample();
    let first = chart.scale().breaks()[0];
    assert!((first - 2.6).abs() < 1e-9, "first break {first}");
}

#[test]
fn sample_paths_are_decoded_from_quantized_arcs() {
    let chart = sample();
    let square = chart.shape(Fips(1001)).unwrap();
    assert_eq!(square.path, "M0.0,0.0L10.0,0.0L10.0,10.0L0.0,10.0Z");
    let stitched = chart.shape(Fips(48453)).unwrap();
    assert_eq!(stitched.path, "M40.0,0.0L50.0,0.0L50.0,10.0L40.0,10.0Z");
    let multi = chart.shape(Fips(6037)).unwrap();
    assert_eq!(multi.path.matches('M').count(), 2);
}

#[test]
fn sample_svg_has_every_county_and_legend_band() {
    let config = ChartConfig::default();
    let svg = to_svg(&sample(), &config, &SvgMetadata::from_config(&config));

    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert_eq!(svg.matches(r#"class="county""#).count(), 4);
    assert_eq!(svg.matches("<rect").count(), 8);
    assert!(svg.contains(r#"data-location="Travis County, TX""#));
    assert!(!svg.contains(r#"data-fips="99999""#));
}

#[test]
fn sample_svg_dims_counties_outside_the_selected_band() {
    let config = ChartConfig::default();
    let chart = sample();
    let band = chart.scale().band_index(23.5);
    let selected = chart.toggle(band).unwrap();

    let shown: Vec<_> = selected
        .view()
        .iter()
        .filter(|c| c.selected)
        .map(|c| c.id.0)
        .collect();
    assert_eq!(shown, vec![1001, 1003, 6037]);

    let svg = to_svg(&selected, &config, &SvgMetadata::default());
    assert_eq!(svg.matches(r#"fill="rgb(37 33 33)""#).count(), 1);
    assert_eq!(svg.matches("legend-item selected").count(), 1);
}
