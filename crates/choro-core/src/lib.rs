//! choro-core: Pure choropleth model (sans-IO).
//!
//! Turns a county TopoJSON document and an education dataset into a
//! drawable chart through:
//! topology decode -> education parse -> threshold scale -> join ->
//! selection.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! JSON strings and returns structured data. All browser/filesystem
//! interaction lives in `choro-io` and the binaries.

pub mod chart;
pub mod education;
pub mod normalize;
pub mod path;
pub mod scale;
pub mod scene;
pub mod selection;
pub mod tooltip;
pub mod topology;
pub mod types;

pub use chart::Chart;
pub use scale::{ColorBand, ThresholdScale};
pub use scene::{DrawOp, MapScene, ShapePhase};
pub use selection::Selection;
pub use tooltip::Tooltip;
pub use types::{
    ChartConfig, ChoroError, Color, County, CountyFeature, CountyShape, EducationRecord, Fips,
    LegendLayout, Pointer,
};

/// Build the initial chart from the two raw documents.
///
/// # Steps
///
/// 1. Decode county geometries from the topology object named by
///    `config.topology_object`
/// 2. Parse and validate education records
/// 3. Derive the threshold scale from the minimum percentage
/// 4. Join geometry with records, every county selected
///
/// # Errors
///
/// Returns [`ChoroError::InvalidConfig`] if `config` fails validation.
/// Returns [`ChoroError::TopologyParse`] or one of the topology variants if
/// the county document is malformed.
/// Returns [`ChoroError::EducationParse`] or
/// [`ChoroError::PercentageOutOfRange`] if the education document is
/// malformed.
/// Returns [`ChoroError::EmptyEducation`] if there are no records.
/// Returns [`ChoroError::NoCounties`] if no geometry matches a record.
pub fn build_chart(
    topology_json: &str,
    education_json: &str,
    config: &ChartConfig,
) -> Result<Chart, ChoroError> {
    config.validate()?;
    let features = topology::decode_features(topology_json, &config.topology_object)?;
    let records = education::parse_records(education_json)?;
    Chart::new(features, &records, config)
}
