//! Join county geometry with education records.
//!
//! Produces one normalized [`County`] and one drawable [`CountyShape`] per
//! geometry that has a matching record. Geometries without a record are
//! skipped and reported rather than failing the whole chart.

use std::collections::HashMap;

use crate::path::path_data;
use crate::scale::ThresholdScale;
use crate::types::{County, CountyFeature, CountyShape, EducationRecord, Fips};

/// Result of joining geometry with education records.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    /// Normalized records in geometry order, all initially selected.
    pub counties: Vec<County>,
    /// Drawable shapes, index-aligned with `counties`.
    pub shapes: Vec<CountyShape>,
    /// Ids of geometries with no education record.
    pub unmatched: Vec<Fips>,
}

/// Format the tooltip/legend location label for a record.
#[must_use]
pub fn location_label(record: &EducationRecord) -> String {
    format!("{}, {}", record.area_name, record.state)
}

/// Join `features` with `records` by FIPS code.
///
/// When a FIPS code appears more than once in `records`, the first
/// occurrence wins. Each matched feature gets its fill from `scale`, its
/// percentage, a `"<area>, <state>"` location and `selected = true`.
#[must_use]
pub fn normalize(
    features: Vec<CountyFeature>,
    records: &[EducationRecord],
    scale: &ThresholdScale,
) -> JoinOutcome {
    let mut by_fips: HashMap<Fips, &EducationRecord> = HashMap::with_capacity(records.len());
    for record in records {
        by_fips.entry(record.fips).or_insert(record);
    }

    let mut counties = Vec::with_capacity(features.len());
    let mut shapes = Vec::with_capacity(features.len());
    let mut unmatched = Vec::new();

    for feature in features {
        let Some(record) = by_fips.get(&feature.id) else {
            unmatched.push(feature.id);
            continue;
        };
        let edu = record.bachelors_or_higher;
        counties.push(County {
            id: feature.id,
            fill: scale.apply(edu).clone(),
            edu,
            location: location_label(record),
            selected: true,
        });
        shapes.push(CountyShape {
            id: feature.id,
            path: path_data(&feature.geometry),
            geometry: feature.geometry,
        });
    }

    if !unmatched.is_empty() {
        tracing::warn!(
            count = unmatched.len(),
            first = %unmatched[0],
            "geometries without an education record were skipped"
        );
    }

    JoinOutcome {
        counties,
        shapes,
        unmatched,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use geo::{MultiPolygon, polygon};

    use super::*;
    use crate::types::{ChartConfig, Color};

    fn feature(id: u32) -> CountyFeature {
        CountyFeature {
            id: Fips(id),
            geometry: MultiPolygon::new(vec![polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
            ]]),
        }
    }

    fn record(fips: u32, edu: f64, area: &str, state: &str) -> EducationRecord {
        EducationRecord {
            fips: Fips(fips),
            bachelors_or_higher: edu,
            area_name: area.to_owned(),
            state: state.to_owned(),
        }
    }

    fn scale() -> ThresholdScale {
        ThresholdScale::from_minimum(2.6, ChartConfig::default().scheme).unwrap()
    }

    #[test]
    fn joined_record_has_location_and_percentage() {
        let records = [record(1001, 23.5, "Autauga", "AL")];
        let out = normalize(vec![feature(1001)], &records, &scale());
        assert_eq!(out.counties.len(), 1);
        let county = &out.counties[0];
        assert_eq!(county.location, "Autauga, AL");
        assert!((county.edu - 23.5).abs() < f64::EPSILON);
        assert!(county.selected);
        assert_eq!(county.fill, *scale().apply(23.5));
    }

    #[test]
    fn unmatched_geometry_is_skipped_and_reported() {
        let records = [record(1001, 23.5, "Autauga", "AL")];
        let out = normalize(vec![feature(1001), feature(99999)], &records, &scale());
        assert_eq!(out.counties.len(), 1);
        assert_eq!(out.shapes.len(), 1);
        assert_eq!(out.unmatched, vec![Fips(99999)]);
    }

    #[test]
    fn output_follows_geometry_order() {
        let records = [
            record(3, 50.0, "C", "TX"),
            record(1, 10.0, "A", "AL"),
            record(2, 30.0, "B", "CA"),
        ];
        let out = normalize(vec![feature(1), feature(2), feature(3)], &records, &scale());
        let ids: Vec<_> = out.counties.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let shape_ids: Vec<_> = out.shapes.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, shape_ids);
    }

    #[test]
    fn first_duplicate_record_wins() {
        let records = [record(7, 10.0, "First", "AL"), record(7, 90.0, "Second", "AL")];
        let out = normalize(vec![feature(7)], &records, &scale());
        assert_eq!(out.counties[0].location, "First, AL");
    }

    #[test]
    fn shapes_carry_path_data() {
        let records = [record(1, 10.0, "A", "AL")];
        let out = normalize(vec![feature(1)], &records, &scale());
        assert!(out.shapes[0].path.starts_with('M'));
        assert!(out.shapes[0].path.ends_with('Z'));
    }

    #[test]
    fn records_without_geometry_are_ignored() {
        let records = [record(1, 10.0, "A", "AL"), record(2, 20.0, "B", "AL")];
        let out = normalize(vec![feature(1)], &records, &scale());
        assert_eq!(out.counties.len(), 1);
        assert!(out.unmatched.is_empty());
        assert_ne!(out.counties[0].fill, Color::from(""));
    }
}
