//! SVG path data for county outlines.
//!
//! Each ring becomes a closed subpath: `M` for the first coordinate, `L`
//! for the rest, `Z` to close. The closing coordinate that `geo` stores
//! at the end of every ring is not repeated.

use std::fmt::Write;

use geo::{LineString, MultiPolygon};

/// Build an SVG path `d` attribute from a county outline.
///
/// Exterior and interior rings are emitted in order, so the default
/// `nonzero` fill rule renders holes correctly for rings wound the way
/// TopoJSON stores them. Coordinates are formatted to 1 decimal place
/// (0.1 px precision). Rings with fewer than three distinct points are
/// skipped.
///
/// # Examples
///
/// ```
/// use choro_core::path::path_data;
/// use geo::{MultiPolygon, polygon};
///
/// let square = MultiPolygon::new(vec![polygon![
///     (x: 0.0, y: 0.0),
///     (x: 10.0, y: 0.0),
///     (x: 10.0, y: 10.0),
/// ]]);
/// assert_eq!(path_data(&square), "M0.0,0.0L10.0,0.0L10.0,10.0Z");
/// ```
#[must_use]
pub fn path_data(geometry: &MultiPolygon<f64>) -> String {
    let mut d = String::new();
    for polygon in geometry {
        write_ring(&mut d, polygon.exterior());
        for interior in polygon.interiors() {
            write_ring(&mut d, interior);
        }
    }
    d
}

fn write_ring(d: &mut String, ring: &LineString<f64>) {
    let coords = ring.0.as_slice();
    // Drop the repeated closing coordinate; `Z` closes the subpath.
    let open = match coords {
        [rest @ .., last] if coords.len() > 1 && rest.first() == Some(last) => rest,
        _ => coords,
    };
    if open.len() < 3 {
        return;
    }
    for (i, c) in open.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{:.1},{:.1}", c.x, c.y);
    }
    d.push('Z');
}
