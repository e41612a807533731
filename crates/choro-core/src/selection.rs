//! Legend selection state machine.
//!
//! At most one legend band is marked at a time. Clicking the marked band
//! clears the mark; clicking any other band moves the mark there. The
//! per-county `selected` flags are recomputed from scratch after every
//! transition.

use serde::{Deserialize, Serialize};

use crate::scale::ColorBand;
use crate::types::County;

/// Which legend band, if any, is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    marked: Option<usize>,
}

impl Selection {
    /// No band marked: every county is shown in its true color.
    pub const NONE: Self = Self { marked: None };

    /// The marked band, if any.
    #[must_use]
    pub const fn marked(self) -> Option<usize> {
        self.marked
    }

    /// Whether `band` carries the selected marker.
    #[must_use]
    pub fn is_marked(self, band: usize) -> bool {
        self.marked == Some(band)
    }

    /// The state after clicking `band`.
    #[must_use]
    pub fn toggle(self, band: usize) -> Self {
        if self.is_marked(band) {
            Self::NONE
        } else {
            Self {
                marked: Some(band),
            }
        }
    }
}

/// Recompute every county's `selected` flag.
///
/// With a band, a county is selected when its percentage lies within the
/// band's inclusive bounds, rounded to two decimals as in the legend; without one, every county is selected. The
/// input is never modified.
#[must_use]
pub fn apply_selection(counties: &[County], band: Option<&ColorBand>) -> Vec<County> {
    counties
        .iter()
        .map(|county| County {
            selected: band.is_none_or(|b| b.contains(county.edu)),
            ..county.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Fips};

    fn county(id: u32, edu: f64) -> County {
        County {
            id: Fips(id),
            fill: Color::from("#fff"),
            edu,
            location: format!("County {id}, ST"),
            selected: true,
        }
    }

    fn band(lower: f64, upper: f64) -> ColorBand {
        ColorBand {
            index: 3,
            lower,
            upper,
            color: Color::from("#9ecae1"),
        }
    }

    #[test]
    fn first_click_marks_band() {
        let s = Selection::NONE.toggle(2);
        assert_eq!(s.marked(), Some(2));
    }

    #[test]
    fn clicking_marked_band_clears_it() {
        let s = Selection::NONE.toggle(2).toggle(2);
        assert_eq!(s, Selection::NONE);
    }

    #[test]
    fn clicking_other_band_moves_the_mark() {
        let s = Selection::NONE.toggle(2).toggle(5);
        assert!(s.is_marked(5));
        assert!(!s.is_marked(2));
        let marked = (0..8).filter(|&b| s.is_marked(b)).count();
        assert_eq!(marked, 1, "exactly one band may be marked");
    }

    #[test]
    fn band_selects_counties_within_inclusive_bounds() {
        let counties = [county(1, 10.0), county(2, 20.0), county(3, 30.0), county(4, 31.0)];
        let view = apply_selection(&counties, Some(&band(20.0, 30.0)));
        let flags: Vec<_> = view.iter().map(|c| c.selected).collect();
        assert_eq!(flags, vec![false, true, true, false]);
    }

    #[test]
    fn band_bounds_are_rounded_to_two_decimals() {
        // Published as 20.00 and 30.00.
        let counties = [
            county(1, 19.999),
            county(2, 20.002),
            county(3, 29.999),
            county(4, 30.001),
        ];
        let view = apply_selection(&counties, Some(&band(20.004, 29.996)));
        let flags: Vec<_> = view.iter().map(|c| c.selected).collect();
        assert_eq!(flags, vec![false, true, true, false]);
    }

    #[test]
    fn no_band_selects_everything() {
        let mut counties = vec![county(1, 10.0), county(2, 90.0)];
        counties[1].selected = false;
        let view = apply_selection(&counties, None);
        assert!(view.iter().all(|c| c.selected));
    }

    #[test]
    fn input_is_left_untouched() {
        let counties = [county(1, 10.0)];
        let view = apply_selection(&counties, Some(&band(50.0, 60.0)));
        assert!(counties[0].selected);
        assert!(!view[0].selected);
    }
}
