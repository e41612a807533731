//! TopoJSON decoding: turn a topology object into county features.
//!
//! A topology stores shared boundary lines ("arcs") once; polygons refer
//! to them by index. Decoding expands those references into closed rings
//! and builds one [`CountyFeature`] per geometry of the requested
//! collection. Only polygonal geometry is supported, which is all a
//! county map contains.
//!
//! The county topology is pre-projected into screen space, so no map
//! projection is applied here.

use std::collections::HashMap;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;

use crate::types::{ChoroError, CountyFeature, Fips};

/// Quantization transform of a topology.
#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<Transform>,
    objects: HashMap<String, RawObject>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
}

/// Geometry id: numeric in the published data, but TopoJSON allows
/// strings (e.g. zero-padded `"01001"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u32),
    Text(String),
}

impl RawId {
    fn to_fips(&self) -> Result<Fips, ChoroError> {
        match self {
            Self::Number(n) => Ok(Fips(*n)),
            Self::Text(s) => s
                .trim()
                .parse()
                .map(Fips)
                .map_err(|_| ChoroError::InvalidId(s.clone())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawObject {
    GeometryCollection {
        geometries: Vec<RawObject>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        id: Option<RawId>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        id: Option<RawId>,
    },
    #[serde(other)]
    Unsupported,
}

/// Decode the named object of a TopoJSON document into county features.
///
/// Geometries of the object's collection are returned in document order.
/// Geometries without an `id` and non-polygonal geometries are skipped
/// with a warning, since they cannot be joined or filled.
///
/// # Errors
///
/// - [`ChoroError::TopologyParse`] if `json` is not a TopoJSON topology.
/// - [`ChoroError::MissingObject`] if `object` is not in `objects`.
/// - [`ChoroError::NotACollection`] if the object is not a
///   `GeometryCollection`.
/// - [`ChoroError::ArcOutOfRange`] / [`ChoroError::MalformedPosition`]
///   for broken arc data.
/// - [`ChoroError::InvalidId`] for a non-numeric string id.
pub fn decode_features(json: &str, object: &str) -> Result<Vec<CountyFeature>, ChoroError> {
    let mut topology: RawTopology =
        serde_json::from_str(json).map_err(ChoroError::TopologyParse)?;

    let arcs = decode_arcs(&topology.arcs, topology.transform)?;

    let raw = topology
        .objects
        .remove(object)
        .ok_or_else(|| ChoroError::MissingObject(object.to_owned()))?;
    let RawObject::GeometryCollection { geometries } = raw else {
        return Err(ChoroError::NotACollection(object.to_owned()));
    };

    let mut features = Vec::with_capacity(geometries.len());
    let mut skipped = 0usize;
    for geometry in geometries {
        let (id, polygons) = match geometry {
            RawObject::Polygon { arcs: rings, id } => (id, vec![rings]),
            RawObject::MultiPolygon { arcs: polygons, id } => (id, polygons),
            RawObject::GeometryCollection { .. } | RawObject::Unsupported => {
                skipped += 1;
                continue;
            }
        };
        let Some(id) = id else {
            skipped += 1;
            continue;
        };
        let id = id.to_fips()?;
        let geometry = build_multi_polygon(&polygons, &arcs)?;
        features.push(CountyFeature { id, geometry });
    }

    if skipped > 0 {
        tracing::warn!(object, skipped, "skipped geometries without id or polygon type");
    }
    tracing::debug!(object, features = features.len(), arcs = arcs.len(), "decoded topology");

    Ok(features)
}

/// Expand every arc to absolute coordinates.
///
/// With a transform, positions are delta-encoded quantized integers:
/// each position is added to the previous one before scaling.
fn decode_arcs(
    raw: &[Vec<Vec<f64>>],
    transform: Option<Transform>,
) -> Result<Vec<Vec<Coord<f64>>>, ChoroError> {
    raw.iter()
        .enumerate()
        .map(|(arc, positions)| {
            let (mut x, mut y) = (0.0, 0.0);
            positions
                .iter()
                .map(|p| {
                    let [px, py, ..] = p.as_slice() else {
                        return Err(ChoroError::MalformedPosition { arc });
                    };
                    Ok(match transform {
                        Some(t) => {
                            x += px;
                            y += py;
                            Coord {
                                x: x.mul_add(t.scale[0], t.translate[0]),
                                y: y.mul_add(t.scale[1], t.translate[1]),
                            }
                        }
                        None => Coord { x: *px, y: *py },
                    })
                })
                .collect()
        })
        .collect()
}

/// Stitch arc references into a ring.
///
/// Negative references (`!i`) traverse arc `i` backwards. Consecutive
/// arcs share an endpoint, which is emitted only once.
fn stitch_ring(refs: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<Vec<Coord<f64>>, ChoroError> {
    let mut points: Vec<Coord<f64>> = Vec::new();
    for &r in refs {
        let (index, reversed) = if r < 0 { (!r, true) } else { (r, false) };
        let arc = usize::try_from(index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or(ChoroError::ArcOutOfRange {
                index: r,
                len: arcs.len(),
            })?;
        points.pop();
        if reversed {
            points.extend(arc.iter().rev());
        } else {
            points.extend(arc.iter());
        }
    }
    if let Some(&first) = points.first()
        && points.len() < 4
    {
        points.push(first);
    }
    Ok(points)
}

fn build_multi_polygon(
    polygons: &[Vec<Vec<i64>>],
    arcs: &[Vec<Coord<f64>>],
) -> Result<MultiPolygon<f64>, ChoroError> {
    let mut out = Vec::with_capacity(polygons.len());
    for rings in polygons {
        let mut rings = rings
            .iter()
            .map(|refs| stitch_ring(refs, arcs).map(LineString::new))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();
        let Some(exterior) = rings.next() else {
            continue;
        };
        out.push(Polygon::new(exterior, rings.collect()));
    }
    Ok(MultiPolygon::new(out))
}
