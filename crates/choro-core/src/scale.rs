//! Threshold color scale: numeric percentage to one of N discrete colors.
//!
//! The domain is a sorted list of breakpoints; band `i` covers
//! `[break[i-1], break[i])`, with the first band open below and the last
//! band open above. The inverse maps a color back to its band extent,
//! which is what the legend is built from.

use serde::Serialize;

use crate::types::{ChoroError, Color};

/// Upper end of the percentage domain.
pub const PERCENT_MAX: f64 = 100.0;

/// One legend band: a contiguous percentage range and its color.
///
/// Open ends of the scale are clamped to `[0, 100]`, so for all `i`,
/// `bands[i].upper == bands[i + 1].lower`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBand {
    /// Position of the band in the legend, lowest first.
    pub index: usize,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Upper bound (exclusive for coloring, inclusive for selection).
    pub upper: f64,
    /// Fill color of the band.
    pub color: Color,
}

impl ColorBand {
    /// Whether `value` lies within `[lower, upper]`, with both bounds
    /// rounded to the two decimals the legend publishes as its thresholds.
    ///
    /// Both ends are inclusive, so a value sitting exactly on a breakpoint
    /// belongs to two adjacent bands for selection purposes.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= hundredths(self.lower) && value <= hundredths(self.upper)
    }

    /// Legend label: the rounded upper bound, e.g. `"16%"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}%", self.upper.round())
    }
}

/// A stepped mapping from percentages to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    breaks: Vec<f64>,
    colors: Vec<Color>,
}

impl ThresholdScale {
    /// Create a scale from explicit breakpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ChoroError::InvalidConfig`] unless there is at least one
    /// color, exactly one more color than breakpoints, and the breakpoints
    /// are finite and non-decreasing.
    pub fn new(breaks: Vec<f64>, colors: Vec<Color>) -> Result<Self, ChoroError> {
        if colors.is_empty() {
            return Err(ChoroError::InvalidConfig(
                "threshold scale needs at least 1 color".to_owned(),
            ));
        }
        if colors.len() != breaks.len() + 1 {
            return Err(ChoroError::InvalidConfig(format!(
                "{} breakpoints need {} colors, got {}",
                breaks.len(),
                breaks.len() + 1,
                colors.len()
            )));
        }
        if breaks.iter().any(|b| !b.is_finite()) || breaks.windows(2).any(|w| w[0] > w[1]) {
            return Err(ChoroError::InvalidConfig(format!(
                "breakpoints must be finite and non-decreasing: {breaks:?}"
            )));
        }
        Ok(Self { breaks, colors })
    }

    /// Build the scale from the dataset minimum: breakpoints start at `min`
    /// and advance by a fixed `100 / (n - 1)` for `n` colors, stopping
    /// before 100.
    ///
    /// Breakpoint `i` is `min + i * step`, computed by multiplication so
    /// rounding error does not accumulate. A high minimum yields fewer than
    /// `n - 1` breakpoints; the scale then keeps only the lowest
    /// `breaks + 1` colors.
    ///
    /// # Errors
    ///
    /// Returns [`ChoroError::InvalidConfig`] if `min` is not finite or
    /// `colors` has fewer than two entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use choro_core::{Color, ThresholdScale};
    ///
    /// let colors = ["#eee", "#999", "#333"].map(Color::from).to_vec();
    /// let scale = ThresholdScale::from_minimum(40.0, colors).unwrap();
    /// // Step 50: 40 is kept, 90 is kept, 140 is past the end.
    /// assert_eq!(scale.breaks(), &[40.0, 90.0]);
    /// assert_eq!(scale.apply(89.9).as_str(), "#999");
    /// assert_eq!(scale.apply(90.0).as_str(), "#333");
    /// ```
    pub fn from_minimum(min: f64, mut colors: Vec<Color>) -> Result<Self, ChoroError> {
        if !min.is_finite() {
            return Err(ChoroError::InvalidConfig(format!(
                "scale minimum must be finite, got {min}"
            )));
        }
        if colors.len() < 2 {
            return Err(ChoroError::InvalidConfig(format!(
                "threshold scale needs at least 2 colors, got {}",
                colors.len()
            )));
        }
        let steps = colors.len() - 1;
        #[allow(clippy::cast_precision_loss)]
        let step = PERCENT_MAX / steps as f64;
        #[allow(clippy::cast_precision_loss)]
        let breaks: Vec<f64> = (0..steps)
            .map(|i| step.mul_add(i as f64, min))
            .take_while(|b| *b < PERCENT_MAX)
            .collect();
        colors.truncate(breaks.len() + 1);
        tracing::debug!(min, step, bands = colors.len(), "built threshold scale");
        Self::new(breaks, colors)
    }

    /// The breakpoints, ascending.
    #[must_use]
    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    /// The band colors, lowest band first.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Index of the band `value` falls into: the number of breakpoints
    /// less than or equal to `value`.
    #[must_use]
    pub fn band_index(&self, value: f64) -> usize {
        self.breaks.partition_point(|b| *b <= value)
    }

    /// Color for `value`.
    #[must_use]
    pub fn apply(&self, value: f64) -> &Color {
        &self.colors[self.band_index(value)]
    }

    /// Raw extent of the first band with `color`; the open ends are
    /// infinite.
    #[must_use]
    pub fn invert_extent(&self, color: &Color) -> Option<(f64, f64)> {
        let i = self.colors.iter().position(|c| c == color)?;
        let lower = if i == 0 {
            f64::NEG_INFINITY
        } else {
            self.breaks[i - 1]
        };
        let upper = self.breaks.get(i).copied().unwrap_or(f64::INFINITY);
        Some((lower, upper))
    }

    /// Extent of the first band with `color`, with the open lower end
    /// replaced by 0 and the open upper end by 100 for display.
    #[must_use]
    pub fn invert(&self, color: &Color) -> Option<[f64; 2]> {
        self.invert_extent(color)
            .map(|(lower, upper)| [clamp_open(lower, 0.0), clamp_open(upper, PERCENT_MAX)])
    }

    /// One [`ColorBand`] per color, lowest first, with display bounds.
    #[must_use]
    pub fn bands(&self) -> Vec<ColorBand> {
        let last = self.colors.len() - 1;
        self.colors
            .iter()
            .enumerate()
            .map(|(index, color)| ColorBand {
                index,
                lower: if index == 0 { 0.0 } else { self.breaks[index - 1] },
                upper: if index == last {
                    PERCENT_MAX
                } else {
                    self.breaks[index]
                },
                color: color.clone(),
            })
            .collect()
    }
}

fn hundredths(bound: f64) -> f64 {
    (bound * 100.0).round() / 100.0
}

fn clamp_open(bound: f64, replacement: f64) -> f64 {
    if bound.is_finite() { bound } else { replacement }
}
