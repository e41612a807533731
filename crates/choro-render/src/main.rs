//! choro-render: CLI tool for offline chart rendering and legend inspection.
//!
//! Reads a county TopoJSON document and an education dataset from disk,
//! builds the chart, optionally replays legend clicks, and prints a
//! legend report. Useful for:
//!
//! - Producing a static SVG of the map without a browser
//! - Checking how a dataset distributes over the color bands
//! - Inspecting which counties a legend selection keeps
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin choro-render -- [OPTIONS] <TOPOLOGY> <EDUCATION>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use choro_core::{Chart, ChartConfig, Color, Fips, Pointer, Tooltip, build_chart};
use clap::Parser;
use serde::Serialize;
use tracing::Level;

/// Offline renderer for the county education choropleth.
///
/// Builds the chart from local copies of the two source documents and
/// prints a per-band legend report.
#[derive(Parser)]
#[command(name = "choro-render", version)]
struct Cli {
    /// Path to the county TopoJSON document.
    topology: PathBuf,

    /// Path to the education records JSON document.
    education: PathBuf,

    /// Write the rendered SVG to this file.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Click legend band INDEX (0-based). Repeat to replay several clicks
    /// in order; clicking the marked band again clears the selection.
    #[arg(long = "select", value_name = "INDEX")]
    select: Vec<usize>,

    /// Show the tooltip text for the county with this FIPS code.
    #[arg(long, value_name = "FIPS")]
    hover: Option<u32>,

    /// Name of the topology object holding the counties.
    #[arg(long, default_value_t = ChartConfig::DEFAULT_TOPOLOGY_OBJECT.to_owned())]
    object: String,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = ChartConfig::DEFAULT_WIDTH)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = ChartConfig::DEFAULT_HEIGHT)]
    height: u32,

    /// Output the legend report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Full chart config as a JSON string.
    ///
    /// When provided, `--object`, `--width` and `--height` are ignored.
    /// Missing fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn config_from_cli(cli: &Cli) -> Result<ChartConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(ChartConfig {
        topology_object: cli.object.clone(),
        width: cli.width,
        height: cli.height,
        ..ChartConfig::default()
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// One legend band in the report.
#[derive(Debug, Serialize)]
struct BandReport {
    index: usize,
    lower: f64,
    upper: f64,
    color: Color,
    label: String,
    /// Counties colored with this band.
    counties: usize,
    marked: bool,
}

/// Summary of a chart state.
#[derive(Debug, Serialize)]
struct Report {
    counties: usize,
    selected: usize,
    unmatched: Vec<Fips>,
    marked: Option<usize>,
    bands: Vec<BandReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<Tooltip>,
}

impl Report {
    fn new(chart: &Chart, tooltip: Option<Tooltip>) -> Self {
        let scale = chart.scale();
        let mut per_band = vec![0usize; chart.legend().len()];
        for county in chart.view() {
            if let Some(n) = per_band.get_mut(scale.band_index(county.edu)) {
                *n += 1;
            }
        }
        let selection = chart.selection();
        let bands = chart
            .legend()
            .iter()
            .zip(per_band)
            .map(|(band, counties)| BandReport {
                index: band.index,
                lower: band.lower,
                upper: band.upper,
                color: band.color.clone(),
                label: band.label(),
                counties,
                marked: selection.is_marked(band.index),
            })
            .collect();

        Self {
            counties: chart.view().len(),
            selected: chart.view().iter().filter(|c| c.selected).count(),
            unmatched: chart.unmatched().to_vec(),
            marked: selection.marked(),
            bands,
            tooltip,
        }
    }

    fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Counties: {} ({} selected, {} geometries unmatched)",
            self.counties,
            self.selected,
            self.unmatched.len()
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<3} {:>8} {:>8} {:<10} {:>6} {:>9}",
            "#", "Lower", "Upper", "Color", "Label", "Counties"
        );
        let _ = writeln!(out, "{}", "-".repeat(50));
        for band in &self.bands {
            let marker = if band.marked { " *" } else { "" };
            let _ = writeln!(
                out,
                "{:<3} {:>8.2} {:>8.2} {:<10} {:>6} {:>9}{marker}",
                band.index,
                band.lower,
                band.upper,
                band.color.as_str(),
                band.label,
                band.counties
            );
        }
        if let Some(ref tip) = self.tooltip {
            let _ = writeln!(out);
            let _ = writeln!(out, "Tooltip: {}", tip.text);
        }
        out
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let read = |path: &PathBuf| {
        std::fs::read_to_string(path).map_err(|e| format!("Error reading {}: {e}", path.display()))
    };
    let (topology, education) = match (read(&cli.topology), read(&cli.education)) {
        (Ok(t), Ok(e)) => (t, e),
        (Err(msg), _) | (_, Err(msg)) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut chart = match build_chart(&topology, &education, &config) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Chart error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for &band in &cli.select {
        chart = match chart.toggle(band) {
            Ok(next) => next,
            Err(e) => {
                eprintln!("Selection error: {e}");
                return ExitCode::FAILURE;
            }
        };
    }

    let tooltip = match cli.hover.map(Fips) {
        Some(id) => match chart.county(id) {
            Some(county) => Some(Tooltip::show(
                county,
                Pointer::default(),
                config.tooltip_offset,
            )),
            None => {
                eprintln!("No county with FIPS {id}");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let report = Report::new(&chart, tooltip);
    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report.table());
    }

    if let Some(ref svg_path) = cli.output {
        let metadata = choro_export::SvgMetadata::from_config(&config);
        let svg = choro_export::to_svg(&chart, &config, &metadata);
        match std::fs::write(svg_path, &svg) {
            Ok(()) => {
                eprintln!(
                    "SVG written to {} ({} bytes)",
                    svg_path.display(),
                    svg.len(),
                );
            }
            Err(e) => {
                eprintln!("Error writing SVG to {}: {e}", svg_path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOPOLOGY: &str = r#"{
        "type": "Topology",
        "arcs": [
            [[0, 0], [10, 0], [10, 10], [0, 0]],
            [[20, 0], [30, 0], [30, 10], [20, 0]],
            [[40, 0], [50, 0], [50, 10], [40, 0]]
        ],
        "objects": {
            "counties": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": 1001, "arcs": [[0]]},
                    {"type": "Polygon", "id": 48453, "arcs": [[1]]},
                    {"type": "Polygon", "id": 77777, "arcs": [[2]]}
                ]
            }
        }
    }"#;

    const EDUCATION: &str = r#"[
        {"fips": 1001, "state": "AL", "area_name": "Autauga County", "bachelorsOrHigher": 23.5},
        {"fips": 48453, "state": "TX", "area_name": "Travis County", "bachelorsOrHigher": 41.3},
        {"fips": 28063, "state": "MS", "area_name": "Jefferson County", "bachelorsOrHigher": 2.6}
    ]"#;

    fn chart() -> Chart {
        build_chart(TOPOLOGY, EDUCATION, &ChartConfig::default()).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn select_flag_repeats() {
        let cli = Cli::try_parse_from([
            "choro-render",
            "t.json",
            "e.json",
            "--select",
            "2",
            "--select",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.select, vec![2, 2]);
    }

    #[test]
    fn config_json_overrides_flags() {
        let cli = Cli::try_parse_from([
            "choro-render",
            "t.json",
            "e.json",
            "--width",
            "10",
            "--config-json",
            r#"{"width": 800}"#,
        ])
        .unwrap();
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, ChartConfig::DEFAULT_HEIGHT);
    }

    #[test]
    fn bad_config_json_is_reported() {
        let cli =
            Cli::try_parse_from(["choro-render", "t.json", "e.json", "--config-json", "{"]).unwrap();
        assert!(config_from_cli(&cli).unwrap_err().contains("--config-json"));
    }

    #[test]
    fn report_counts_counties_per_band() {
        let c = chart();
        let report = Report::new(&c, None);
        assert_eq!(report.counties, 2);
        assert_eq!(report.selected, 2);
        assert_eq!(report.unmatched, vec![Fips(77777)]);
        assert_eq!(report.bands.len(), 8);
        assert_eq!(report.bands.iter().map(|b| b.counties).sum::<usize>(), 2);
        assert_eq!(report.marked, None);
    }

    #[test]
    fn report_reflects_selection() {
        let c = chart();
        let band = c.scale().band_index(41.3);
        let report = Report::new(&c.toggle(band).unwrap(), None);
        assert_eq!(report.marked, Some(band));
        assert_eq!(report.selected, 1);
        assert!(report.bands[band].marked);
        assert!(report.table().contains(" *"));
    }

    #[test]
    fn report_includes_tooltip_text() {
        let c = chart();
        let county = c.county(Fips(48453)).unwrap();
        let tip = Tooltip::show(county, Pointer::default(), Pointer::new(10.0, 5.0));
        let report = Report::new(&c, Some(tip));
        assert!(report.table().contains("Tooltip: Travis County, TX: 41.3%"));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"tooltip\""));
    }
}
