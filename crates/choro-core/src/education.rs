//! Education dataset parsing and validation.

use crate::types::{ChoroError, EducationRecord};

/// Parse the education records document.
///
/// The document is a JSON array of objects with `fips`,
/// `bachelorsOrHigher`, `area_name` and `state` fields; any other fields
/// are ignored.
///
/// # Errors
///
/// Returns [`ChoroError::EducationParse`] for malformed JSON and
/// [`ChoroError::PercentageOutOfRange`] if any percentage is not a finite
/// value in `[0, 100]`.
pub fn parse_records(json: &str) -> Result<Vec<EducationRecord>, ChoroError> {
    let records: Vec<EducationRecord> =
        serde_json::from_str(json).map_err(ChoroError::EducationParse)?;
    for record in &records {
        validate_percentage(record)?;
    }
    Ok(records)
}

/// Percentages must be finite and within `[0, 100]`; nothing is clamped.
fn validate_percentage(record: &EducationRecord) -> Result<(), ChoroError> {
    let value = record.bachelors_or_higher;
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ChoroError::PercentageOutOfRange {
            fips: record.fips,
            value,
        })
    }
}

/// The smallest `bachelorsOrHigher` value in the dataset.
///
/// # Errors
///
/// Returns [`ChoroError::EmptyEducation`] if `records` is empty.
pub fn minimum_percentage(records: &[EducationRecord]) -> Result<f64, ChoroError> {
    records
        .iter()
        .map(|r| r.bachelors_or_higher)
        .reduce(f64::min)
        .ok_or(ChoroError::EmptyEducation)
}
