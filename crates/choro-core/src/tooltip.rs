//! Floating tooltip that follows the pointer over a county.

use serde::Serialize;

use crate::types::{County, Pointer};

/// Opacity of a visible tooltip.
pub const VISIBLE_OPACITY: f64 = 0.9;

/// Tooltip display state.
///
/// Hiding only drops the opacity; the last text and position stay so the
/// fade-out does not flash empty content.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Tooltip {
    /// Left edge in client pixels.
    pub left: f64,
    /// Top edge in client pixels.
    pub top: f64,
    /// Current opacity: [`VISIBLE_OPACITY`] or 0.
    pub opacity: f64,
    /// Percentage of the hovered county, exposed for inspection.
    pub education: Option<f64>,
    /// `"<location>: <percentage>%"`.
    pub text: String,
}

impl Tooltip {
    /// Show the tooltip for `county`, offset from the pointer.
    #[must_use]
    pub fn show(county: &County, pointer: Pointer, offset: Pointer) -> Self {
        Self {
            left: pointer.x + offset.x,
            top: pointer.y + offset.y,
            opacity: VISIBLE_OPACITY,
            education: Some(county.edu),
            text: tooltip_text(&county.location, county.edu),
        }
    }

    /// Hide the tooltip, keeping its last content.
    #[must_use]
    pub fn hide(self) -> Self {
        Self {
            opacity: 0.0,
            ..self
        }
    }

    /// Whether the tooltip is showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Tooltip text for a county.
///
/// The percentage prints in its shortest form, so `41.3` stays `41.3` and
/// `23.0` prints as `23`.
///
/// # Examples
///
/// ```
/// use choro_core::tooltip::tooltip_text;
///
/// assert_eq!(tooltip_text("Travis, TX", 41.3), "Travis, TX: 41.3%");
/// assert_eq!(tooltip_text("Autauga, AL", 23.0), "Autauga, AL: 23%");
/// ```
#[must_use]
pub fn tooltip_text(location: &str, edu: f64) -> String {
    format!("{location}: {edu}%")
}
