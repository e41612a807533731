//! Chart state: everything needed to draw the map and legend.
//!
//! A [`Chart`] is an immutable value. Legend interaction produces a new
//! chart via [`Chart::toggle`] instead of mutating shared state, so the
//! renderers and handlers can be exercised without a live document.
//! Data that never changes after load (shapes, base records, legend) is
//! reference-counted and shared between states.

use std::collections::HashMap;
use std::rc::Rc;

use crate::education::minimum_percentage;
use crate::normalize::{JoinOutcome, normalize};
use crate::scale::{ColorBand, ThresholdScale};
use crate::selection::{Selection, apply_selection};
use crate::types::{ChartConfig, ChoroError, Color, County, CountyFeature, CountyShape, EducationRecord, Fips};

/// Immutable chart state.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    scale: Rc<ThresholdScale>,
    legend: Rc<[ColorBand]>,
    shapes: Rc<[CountyShape]>,
    index: Rc<HashMap<Fips, usize>>,
    base: Rc<[County]>,
    view: Rc<[County]>,
    selection: Selection,
    unselected_fill: Color,
    unmatched: Rc<[Fips]>,
}

impl Chart {
    /// Build the initial chart: derive the scale from the data minimum,
    /// join geometry with records and select every county.
    ///
    /// # Errors
    ///
    /// - [`ChoroError::InvalidConfig`] if `config` fails validation.
    /// - [`ChoroError::EmptyEducation`] if `records` is empty.
    /// - [`ChoroError::NoCounties`] if no geometry matches a record.
    pub fn new(
        features: Vec<CountyFeature>,
        records: &[EducationRecord],
        config: &ChartConfig,
    ) -> Result<Self, ChoroError> {
        config.validate()?;
        let min = minimum_percentage(records)?;
        let scale = ThresholdScale::from_minimum(min, config.scheme.clone())?;

        let JoinOutcome {
            counties,
            shapes,
            unmatched,
        } = normalize(features, records, &scale);
        if counties.is_empty() {
            return Err(ChoroError::NoCounties);
        }

        let index = counties
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect::<HashMap<_, _>>();
        let legend: Rc<[ColorBand]> = scale.bands().into();
        let base: Rc<[County]> = counties.into();

        tracing::info!(
            counties = base.len(),
            unmatched = unmatched.len(),
            min,
            "chart built"
        );

        Ok(Self {
            scale: Rc::new(scale),
            legend,
            shapes: shapes.into(),
            index: Rc::new(index),
            view: Rc::clone(&base),
            base,
            selection: Selection::NONE,
            unselected_fill: config.unselected_fill.clone(),
            unmatched: unmatched.into(),
        })
    }

    /// The chart after clicking legend band `band`.
    ///
    /// Clicking the marked band shows every county again; clicking any
    /// other band dims the counties outside it. The returned chart shares
    /// all static data with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ChoroError::UnknownBand`] if `band` is not a legend index.
    pub fn toggle(&self, band: usize) -> Result<Self, ChoroError> {
        if band >= self.legend.len() {
            return Err(ChoroError::UnknownBand {
                index: band,
                len: self.legend.len(),
            });
        }
        let selection = self.selection.toggle(band);
        let view: Rc<[County]> = match selection.marked() {
            Some(i) => apply_selection(&self.base, self.legend.get(i)).into(),
            None => Rc::clone(&self.base),
        };
        tracing::debug!(band, marked = ?selection.marked(), "legend toggled");
        Ok(Self {
            view,
            selection,
            ..self.clone()
        })
    }

    /// The color scale.
    #[must_use]
    pub fn scale(&self) -> &ThresholdScale {
        &self.scale
    }

    /// Legend bands, lowest first.
    #[must_use]
    pub fn legend(&self) -> &[ColorBand] {
        &self.legend
    }

    /// Drawable shapes, index-aligned with [`view`](Self::view).
    #[must_use]
    pub fn shapes(&self) -> &[CountyShape] {
        &self.shapes
    }

    /// Current county records with their `selected` flags.
    #[must_use]
    pub fn view(&self) -> &[County] {
        &self.view
    }

    /// Current legend selection.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Geometry ids that had no education record.
    #[must_use]
    pub fn unmatched(&self) -> &[Fips] {
        &self.unmatched
    }

    /// Fill used for counties outside the selected band.
    #[must_use]
    pub const fn unselected_fill(&self) -> &Color {
        &self.unselected_fill
    }

    /// The current record for `id`.
    #[must_use]
    pub fn county(&self, id: Fips) -> Option<&County> {
        self.index.get(&id).map(|&i| &self.view[i])
    }

    /// The drawable shape for `id`.
    #[must_use]
    pub fn shape(&self, id: Fips) -> Option<&CountyShape> {
        self.index.get(&id).map(|&i| &self.shapes[i])
    }

    /// The color `county` is drawn with: its own fill when selected,
    /// otherwise the unselected fill.
    #[must_use]
    pub fn display_fill<'a>(&'a self, county: &'a County) -> &'a Color {
        display_fill(county, &self.unselected_fill)
    }
}

/// The color `county` is drawn with given the unselected fill.
#[must_use]
pub fn display_fill<'a>(county: &'a County, unselected: &'a Color) -> &'a Color {
    if county.selected {
        &county.fill
    } else {
        unselected
    }
}
