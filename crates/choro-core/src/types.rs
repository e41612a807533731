//! Shared types for the choro choropleth model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Re-export the geometry type so downstream crates can hold county
/// shapes without depending on `geo` directly.
pub use geo::MultiPolygon;

/// A county FIPS code, the join key between geometry and education data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fips(pub u32);

impl fmt::Display for Fips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A CSS color string (e.g. `#f7fbff` or `rgb(37 33 33)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Create a color from any CSS color string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The CSS color string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One education record as published in the remote dataset.
///
/// Read-only input; never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    /// County identifier matching the topology geometry `id`.
    pub fips: Fips,
    /// Percentage of adults with a bachelor's degree or higher (0-100).
    #[serde(rename = "bachelorsOrHigher")]
    pub bachelors_or_higher: f64,
    /// County name, e.g. `Autauga County`.
    pub area_name: String,
    /// Two-letter state abbreviation.
    pub state: String,
}

/// A decoded county geometry from the topology document.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyFeature {
    /// Geometry identifier (FIPS code).
    pub id: Fips,
    /// County outline in screen coordinates.
    pub geometry: MultiPolygon<f64>,
}

/// The drawable part of a joined county: geometry plus precomputed
/// SVG path data. Shared between chart states.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyShape {
    /// Geometry identifier (FIPS code).
    pub id: Fips,
    /// County outline in screen coordinates.
    pub geometry: MultiPolygon<f64>,
    /// SVG path `d` attribute for `geometry`.
    pub path: String,
}

/// A normalized county record: geometry id joined with its education
/// record and display attributes.
///
/// A new record is produced on every selection change; existing records
/// are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct County {
    /// Geometry identifier (FIPS code).
    pub id: Fips,
    /// Fill color assigned by the threshold scale.
    pub fill: Color,
    /// Bachelor's-or-higher percentage.
    pub edu: f64,
    /// Human-readable `"<area>, <state>"` label.
    pub location: String,
    /// Whether the county falls in the selected legend band (or no band is
    /// selected).
    pub selected: bool,
}

/// A pointer position in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pointer {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Pointer {
    /// Create a new pointer position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry of the legend strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendLayout {
    /// Width of each band rectangle.
    pub item_width: f64,
    /// Height of each band rectangle.
    pub item_height: f64,
    /// Top offset of the legend group inside the canvas. The horizontal
    /// offset is half the canvas width.
    pub offset_y: f64,
    /// Distance the band label is pulled back from the right edge of its
    /// rectangle.
    pub label_inset: f64,
}

impl LegendLayout {
    /// Left edge of band rectangle `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn item_x(&self, index: usize) -> f64 {
        self.item_width * index as f64
    }

    /// Anchor of the label under band `index`: near the right edge of its
    /// rectangle, one item height below it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn label_position(&self, index: usize) -> Pointer {
        Pointer::new(
            self.item_width * (index + 1) as f64 - self.label_inset,
            2.0f64.mul_add(self.item_height, -5.0),
        )
    }
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            item_width: 40.0,
            item_height: 20.0,
            offset_y: 20.0,
            label_inset: 7.0,
        }
    }
}

/// Chart configuration.
///
/// All parameters have defaults reproducing the published chart: the
/// freeCodeCamp county datasets, a 1000 x 600 canvas, the eight-step
/// `Blues` scheme and 650 ms fill transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// URL of the county TopoJSON document.
    pub county_url: String,
    /// URL of the education records document.
    pub education_url: String,
    /// Name of the topology object holding county geometries.
    pub topology_object: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Page heading.
    pub title: String,
    /// Descriptive copy shown under the heading.
    pub description: String,
    /// Band colors, lowest band first. The number of colors is the number
    /// of legend bands.
    pub scheme: Vec<Color>,
    /// Fill for counties outside the selected legend band.
    pub unselected_fill: Color,
    /// Fill transition duration in milliseconds.
    pub transition_ms: u32,
    /// Legend geometry.
    pub legend: LegendLayout,
    /// Tooltip offset from the pointer.
    pub tooltip_offset: Pointer,
}

impl ChartConfig {
    /// Default county topology URL.
    pub const DEFAULT_COUNTY_URL: &'static str =
        "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/counties.json";

    /// Default education dataset URL.
    pub const DEFAULT_EDUCATION_URL: &'static str = "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/for_user_education.json";

    /// Default topology object holding the counties.
    pub const DEFAULT_TOPOLOGY_OBJECT: &'static str = "counties";

    /// Default canvas width.
    pub const DEFAULT_WIDTH: u32 = 1000;

    /// Default canvas height.
    pub const DEFAULT_HEIGHT: u32 = 600;

    /// Default page heading.
    pub const DEFAULT_TITLE: &'static str = "United States Educational Attainment";

    /// Default descriptive copy.
    pub const DEFAULT_DESCRIPTION: &'static str = "Percentage of adults age 25 and older with a bachelor's degree or higher (2010-2014)";

    /// d3 `schemeBlues[8]`.
    pub const DEFAULT_SCHEME: [&'static str; 8] = [
        "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594",
    ];

    /// Default fill for deselected counties.
    pub const DEFAULT_UNSELECTED_FILL: &'static str = "rgb(37 33 33)";

    /// Default fill transition duration.
    pub const DEFAULT_TRANSITION_MS: u32 = 650;

    /// Default tooltip offset from the pointer.
    pub const DEFAULT_TOOLTIP_OFFSET: Pointer = Pointer::new(10.0, 5.0);

    /// Check the invariants the renderers rely on.
    ///
    /// # Errors
    ///
    /// Returns [`ChoroError::InvalidConfig`] if the canvas has a zero
    /// dimension, the scheme has fewer than two colors, or a legend item
    /// has a non-positive size.
    pub fn validate(&self) -> Result<(), ChoroError> {
        if self.width == 0 || self.height == 0 {
            return Err(ChoroError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.scheme.len() < 2 {
            return Err(ChoroError::InvalidConfig(format!(
                "color scheme needs at least 2 colors, got {}",
                self.scheme.len()
            )));
        }
        if !(self.legend.item_width > 0.0 && self.legend.item_height > 0.0) {
            return Err(ChoroError::InvalidConfig(format!(
                "legend items must have a positive size, got {}x{}",
                self.legend.item_width, self.legend.item_height
            )));
        }
        Ok(())
    }

    /// Horizontal offset of the legend group: the middle of the canvas.
    #[must_use]
    pub fn legend_offset_x(&self) -> f64 {
        f64::from(self.width) / 2.0
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            county_url: Self::DEFAULT_COUNTY_URL.to_owned(),
            education_url: Self::DEFAULT_EDUCATION_URL.to_owned(),
            topology_object: Self::DEFAULT_TOPOLOGY_OBJECT.to_owned(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            title: Self::DEFAULT_TITLE.to_owned(),
            description: Self::DEFAULT_DESCRIPTION.to_owned(),
            scheme: Self::DEFAULT_SCHEME.iter().copied().map(Color::from).collect(),
            unselected_fill: Color::from(Self::DEFAULT_UNSELECTED_FILL),
            transition_ms: Self::DEFAULT_TRANSITION_MS,
            legend: LegendLayout::default(),
            tooltip_offset: Self::DEFAULT_TOOLTIP_OFFSET,
        }
    }
}

/// Errors that can occur while building or updating a chart.
#[derive(Debug, thiserror::Error)]
pub enum ChoroError {
    /// The topology document is not valid TopoJSON.
    #[error("failed to parse topology: {0}")]
    TopologyParse(#[source] serde_json::Error),

    /// The education document is not a valid record array.
    #[error("failed to parse education records: {0}")]
    EducationParse(#[source] serde_json::Error),

    /// The topology has no object with the requested name.
    #[error("topology has no object named {0:?}")]
    MissingObject(String),

    /// The requested topology object is not a geometry collection.
    #[error("topology object {0:?} is not a geometry collection")]
    NotACollection(String),

    /// A geometry references an arc that does not exist.
    #[error("arc index {index} is out of range ({len} arcs)")]
    ArcOutOfRange {
        /// The raw (possibly negative) arc reference.
        index: i64,
        /// Number of arcs in the topology.
        len: usize,
    },

    /// An arc position has fewer than two coordinates.
    #[error("arc {arc} has a position with fewer than two coordinates")]
    MalformedPosition {
        /// Index of the offending arc.
        arc: usize,
    },

    /// A geometry id is a string that is not a number.
    #[error("geometry id {0:?} is not a numeric FIPS code")]
    InvalidId(String),

    /// The education dataset is empty, so no scale can be derived.
    #[error("education dataset is empty")]
    EmptyEducation,

    /// An education percentage is not a finite value in `[0, 100]`.
    #[error("county {fips} has percentage {value} outside [0, 100]")]
    PercentageOutOfRange {
        /// County identifier.
        fips: Fips,
        /// The offending value.
        value: f64,
    },

    /// No geometry could be joined with an education record.
    #[error("no county geometry matched an education record")]
    NoCounties,

    /// A legend band index does not exist.
    #[error("legend band {index} does not exist ({len} bands)")]
    UnknownBand {
        /// Requested band.
        index: usize,
        /// Number of bands.
        len: usize,
    },

    /// Chart configuration is invalid.
    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn default_config_has_eight_bands() {
        assert_eq!(ChartConfig::default().scheme.len(), 8);
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let config = ChartConfig {
            width: 0,
            ..ChartConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChoroError::InvalidConfig(_))
        ));
    }

    #[test]
    fn single_color_scheme_is_rejected() {
        let config = ChartConfig {
            scheme: vec![Color::from("#000")],
            ..ChartConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChoroError::InvalidConfig(_))
        ));
    }

    #[test]
    fn legend_offset_is_half_the_width() {
        assert!((ChartConfig::default().legend_offset_x() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn education_record_uses_dataset_field_names() {
        let json = r#"{"fips":1001,"state":"AL","area_name":"Autauga County","bachelorsOrHigher":21.9}"#;
        let record: EducationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fips, Fips(1001));
        assert!((record.bachelors_or_higher - 21.9).abs() < f64::EPSILON);
        assert_eq!(record.area_name, "Autauga County");
    }

    #[test]
    fn config_json_fills_missing_fields_with_defaults() {
        let config: ChartConfig = serde_json::from_str(r#"{"width": 800}"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, ChartConfig::DEFAULT_HEIGHT);
        assert_eq!(config.transition_ms, 650);
    }

    #[test]
    fn legend_layout_positions_items_and_labels() {
        let layout = LegendLayout::default();
        assert!((layout.item_x(3) - 120.0).abs() < f64::EPSILON);
        let label = layout.label_position(0);
        assert!((label.x - 33.0).abs() < f64::EPSILON);
        assert!((label.y - 35.0).abs() < f64::EPSILON);
        let last = layout.label_position(7);
        assert!((last.x - 313.0).abs() < f64::EPSILON);
    }
}
