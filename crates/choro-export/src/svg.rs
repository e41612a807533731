//! SVG export serializer.
//!
//! Converts a [`Chart`] into an SVG string using the [`svg`] crate for
//! document construction and XML escaping.
//!
//! Each county becomes a `<path class="county">` carrying its FIPS code,
//! percentage and location as `data-*` attributes and its display fill,
//! so a deselected county is written with the unselected color. The
//! legend is a `<g id="legend">` of band rectangles and labels placed the
//! same way the live page places them.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements for
//! accessibility and to help file managers identify exported files.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::Text as TextNode;
use svg::node::element::{Description, Group, Path, Rectangle, Text, Title};

use choro_core::{Chart, ChartConfig, ColorBand, County, CountyShape};

/// Metadata to embed in the SVG document.
///
/// Both fields are optional.  When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,
}

impl<'a> SvgMetadata<'a> {
    /// Metadata carrying the chart's heading and description copy.
    #[must_use]
    pub fn from_config(config: &'a ChartConfig) -> Self {
        Self {
            title: Some(&config.title),
            description: Some(&config.description),
        }
    }
}

/// Format a legend threshold for the `data-*Threshold` attributes.
fn threshold(value: f64) -> String {
    format!("{value:.2}")
}

fn county_path(shape: &CountyShape, county: &County, chart: &Chart) -> Path {
    Path::new()
        .set("class", "county")
        .set("d", shape.path.as_str())
        .set("data-fips", county.id.0)
        .set("data-education", county.edu)
        .set("data-location", county.location.as_str())
        .set("fill", chart.display_fill(county).as_str())
}

fn legend_rect(band: &ColorBand, marked: bool, config: &ChartConfig) -> Rectangle {
    let layout = &config.legend;
    let class = if marked {
        "legend-item selected"
    } else {
        "legend-item"
    };
    Rectangle::new()
        .set("class", class)
        .set("x", layout.item_x(band.index))
        .set("width", layout.item_width)
        .set("height", layout.item_height)
        .set("fill", band.color.as_str())
        .set("data-lowerThreshold", threshold(band.lower))
        .set("data-higherThreshold", threshold(band.upper))
}

fn legend_label(band: &ColorBand, config: &ChartConfig) -> Text {
    let at = config.legend.label_position(band.index);
    Text::new(band.label())
        .set("class", "legend-item-text")
        .set("x", at.x)
        .set("y", at.y)
}

/// Serialize a chart into an SVG document string.
///
/// The document is `config.width` x `config.height` with a matching
/// `viewBox`; county paths are already in that coordinate space. Paths
/// are written in draw order, followed by the legend group translated to
/// `(width / 2, legend.offset_y)`. The band carrying the selection
/// marker gets the extra `selected` class.
///
/// # Examples
///
/// ```
/// use choro_core::{ChartConfig, build_chart};
/// use choro_export::{SvgMetadata, to_svg};
///
/// let topology = r#"{"type": "Topology",
///     "arcs": [[[0, 0], [10, 0], [10, 10], [0, 0]]],
///     "objects": {"counties": {"type": "GeometryCollection",
///         "geometries": [{"type": "Polygon", "id": 1001, "arcs": [[0]]}]}}}"#;
/// let education = r#"[{"fips": 1001, "state": "AL",
///     "area_name": "Autauga County", "bachelorsOrHigher": 23.5}]"#;
///
/// let config = ChartConfig::default();
/// let chart = build_chart(topology, education, &config).unwrap();
/// let svg = to_svg(&chart, &config, &SvgMetadata::from_config(&config));
/// assert!(svg.contains(r#"data-location="Autauga County, AL""#));
/// assert!(svg.contains(r#"<g id="legend""#));
/// ```
#[must_use]
pub fn to_svg(chart: &Chart, config: &ChartConfig, metadata: &SvgMetadata<'_>) -> String {
    let (w, h) = (config.width, config.height);
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(TextNode::new(description)));
    }

    let mut counties = Group::new().set("id", "counties");
    for (shape, county) in chart.shapes().iter().zip(chart.view()) {
        counties = counties.add(county_path(shape, county, chart));
    }
    doc = doc.add(counties);

    let selection = chart.selection();
    let mut legend = Group::new().set("id", "legend").set(
        "transform",
        format!(
            "translate({}, {})",
            config.legend_offset_x(),
            config.legend.offset_y
        ),
    );
    for band in chart.legend() {
        legend = legend
            .add(legend_rect(band, selection.is_marked(band.index), config))
            .add(legend_label(band, config));
    }
    doc = doc.add(legend);

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use choro_core::{Fips, build_chart};

    use super::*;

    const TOPOLOGY: &str = r#"{
        "type": "Topology",
        "arcs": [
            [[0, 0], [10, 0], [10, 10], [0, 0]],
            [[20, 0], [30, 0], [30, 10], [20, 0]]
        ],
        "objects": {
            "counties": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": 1001, "arcs": [[0]]},
                    {"type": "Polygon", "id": 48453, "arcs": [[1]]}
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

    fn no_meta() -> SvgMetadata<'static> {
        SvgMetadata::default()
    }

    // --- Document structure ---

    #[test]
    fn svg_has_xml_declaration() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn viewbox_reflects_canvas_size() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert!(svg.contains(r#"width="1000""#));
        assert!(svg.contains(r#"height="600""#));
        assert!(svg.contains(r#"viewBox="0 0 1000 600""#));
    }

    #[test]
    fn title_and_desc_emitted_from_config() {
        let config = ChartConfig::default();
        let svg = to_svg(&chart(), &config, &SvgMetadata::from_config(&config));
        assert!(svg.contains("<title>United States Educational Attainment</title>"));
        assert!(svg.contains("<desc>Percentage of adults age 25"));
    }

    #[test]
    fn title_and_desc_omitted_when_none() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert!(!svg.contains("<title>"));
        assert!(!svg.contains("<desc>"));
    }

    #[test]
    fn special_characters_in_title_are_escaped() {
        let meta = SvgMetadata {
            title: Some("A & B <county>"),
            ..SvgMetadata::default()
        };
        let svg = to_svg(&chart(), &ChartConfig::default(), &meta);
        assert!(svg.contains("A &amp; B &lt;county&gt;"));
    }

    // --- Counties ---

    #[test]
    fn one_path_per_joined_county() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert_eq!(svg.matches(r#"class="county""#).count(), 2);
    }

    #[test]
    fn county_paths_carry_data_attributes() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert!(svg.contains(r#"data-fips="48453""#));
        assert!(svg.contains(r#"data-education="41.3""#));
        assert!(svg.contains(r#"data-location="Travis County, TX""#));
    }

    #[test]
    fn county_fill_matches_scale() {
        let c = chart();
        let expected = c.scale().apply(41.3).as_str().to_owned();
        let svg = to_svg(&c, &ChartConfig::default(), &no_meta());
        assert!(svg.contains(&format!(r#"fill="{expected}""#)));
    }

    #[test]
    fn deselected_counties_use_unselected_fill() {
        let c = chart();
        let band = c.scale().band_index(41.3);
        let selected = c.toggle(band).unwrap();
        let svg = to_svg(&selected, &ChartConfig::default(), &no_meta());
        assert_eq!(svg.matches(r#"fill="rgb(37 33 33)""#).count(), 1);
        assert!(selected.county(Fips(1001)).is_some_and(|county| !county.selected));
    }

    // --- Legend ---

    #[test]
    fn legend_group_is_centered() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert!(svg.contains(r#"id="legend""#));
        assert!(svg.contains(r#"transform="translate(500, 20)""#));
    }

    #[test]
    fn legend_has_one_rect_and_label_per_band() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert_eq!(svg.matches(r#"class="legend-item""#).count(), 8);
        assert_eq!(svg.matches(r#"class="legend-item-text""#).count(), 8);
    }

    #[test]
    fn legend_thresholds_use_two_decimals() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        assert!(svg.contains(r#"data-lowerThreshold="0.00""#));
        assert!(svg.contains(r#"data-higherThreshold="2.60""#));
        assert!(svg.contains(r#"data-higherThreshold="100.00""#));
    }

    #[test]
    fn legend_labels_are_rounded_upper_bounds() {
        let svg = to_svg(&chart(), &ChartConfig::default(), &no_meta());
        let labels: Vec<_> = svg
            .split(r#"class="legend-item-text""#)
            .skip(1)
            .filter_map(|rest| {
                let start = rest.find('>')? + 1;
                let end = rest.find("</text>")?;
                Some(rest[start..end].trim().to_owned())
            })
            .collect();
        assert_eq!(
            labels,
            ["3%", "17%", "31%", "45%", "60%", "74%", "88%", "100%"]
        );
    }

    #[test]
    fn marked_band_gets_selected_class() {
        let c = chart().toggle(2).unwrap();
        let svg = to_svg(&c, &ChartConfig::default(), &no_meta());
        assert_eq!(svg.matches(r#"class="legend-item selected""#).count(), 1);
        assert_eq!(svg.matches(r#"class="legend-item""#).count(), 7);
    }

    #[test]
    fn threshold_formatting() {
        assert_eq!(threshold(16.514_285), "16.51");
        assert_eq!(threshold(0.0), "0.00");
    }
}
