//! Shape lifecycle: diff the drawn map against a new view.
//!
//! Each county shape moves through
//! `absent -> entering -> steady -> updating -> steady`. [`diff`] compares
//! what is currently drawn with the next view and emits the minimal list
//! of [`DrawOp`]s; [`MapScene::apply`] records those ops and
//! [`MapScene::settle`] marks the end of the fill transition. Shapes are
//! keyed by FIPS code, so a selection change recolors existing shapes
//! instead of recreating them.

use std::collections::{HashMap, HashSet};

use crate::chart::display_fill;
use crate::types::{Color, County, Fips};

/// Where a drawn shape is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePhase {
    /// Just created; fading in to its fill.
    Entering,
    /// At rest.
    Steady,
    /// Transitioning to a new fill.
    Updating,
}

impl ShapePhase {
    /// CSS class for the phase, if it has one.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Entering => Some("entering"),
            Self::Steady => None,
            Self::Updating => Some("updating"),
        }
    }
}

/// One drawn county shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Join key.
    pub id: Fips,
    /// Fill the shape is drawn with (or transitioning to).
    pub fill: Color,
    /// Lifecycle phase.
    pub phase: ShapePhase,
}

/// A drawing instruction produced by [`diff`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Create the shape and fade it in to `fill`.
    Enter {
        /// Join key.
        id: Fips,
        /// Target fill.
        fill: Color,
    },
    /// Transition an existing shape's fill.
    Recolor {
        /// Join key.
        id: Fips,
        /// Current fill.
        from: Color,
        /// Target fill.
        to: Color,
    },
    /// Remove the shape.
    Exit {
        /// Join key.
        id: Fips,
    },
}

/// The set of shapes currently drawn, in draw order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapScene {
    shapes: Vec<Shape>,
    index: HashMap<Fips, usize>,
}

impl MapScene {
    /// An empty scene: nothing drawn yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawn shapes in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The drawn shape for `id`.
    #[must_use]
    pub fn get(&self, id: Fips) -> Option<&Shape> {
        self.index.get(&id).map(|&i| &self.shapes[i])
    }

    /// Number of drawn shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Whether any shape is mid-transition.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.shapes.iter().any(|s| s.phase != ShapePhase::Steady)
    }

    /// Record `ops` in the scene.
    ///
    /// Entered shapes are appended in op order; recolored shapes keep
    /// their position; exited shapes are removed.
    pub fn apply(&mut self, ops: &[DrawOp]) {
        let mut removed = false;
        for op in ops {
            match op {
                DrawOp::Enter { id, fill } => {
                    if let Some(&i) = self.index.get(id) {
                        self.shapes[i].fill = fill.clone();
                        self.shapes[i].phase = ShapePhase::Entering;
                    } else {
                        self.index.insert(*id, self.shapes.len());
                        self.shapes.push(Shape {
                            id: *id,
                            fill: fill.clone(),
                            phase: ShapePhase::Entering,
                        });
                    }
                }
                DrawOp::Recolor { id, to, .. } => {
                    if let Some(&i) = self.index.get(id) {
                        self.shapes[i].fill = to.clone();
                        self.shapes[i].phase = ShapePhase::Updating;
                    }
                }
                DrawOp::Exit { id } => {
                    removed |= self.index.remove(id).is_some();
                }
            }
        }
        if removed {
            let index = &self.index;
            self.shapes.retain(|s| index.contains_key(&s.id));
            self.reindex();
        }
    }

    /// End all transitions: every shape becomes [`ShapePhase::Steady`].
    pub fn settle(&mut self) {
        for shape in &mut self.shapes {
            shape.phase = ShapePhase::Steady;
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .shapes
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
    }
}

/// Compare the drawn `scene` with the next `view`.
///
/// Counties not yet drawn enter with their display fill; drawn counties
/// whose display fill changed are recolored; drawn shapes missing from
/// `view` exit. Counties whose fill is unchanged produce no op.
///
/// # Examples
///
/// ```
/// use choro_core::scene::{DrawOp, MapScene, diff};
/// use choro_core::{Color, County, Fips};
///
/// let county = County {
///     id: Fips(1001),
///     fill: Color::from("#c6dbef"),
///     edu: 23.5,
///     location: "Autauga, AL".into(),
///     selected: true,
/// };
/// let dim = Color::from("#252121");
/// let mut scene = MapScene::new();
/// let ops = diff(&scene, std::slice::from_ref(&county), &dim);
/// assert!(matches!(ops.as_slice(), [DrawOp::Enter { .. }]));
/// scene.apply(&ops);
/// assert!(diff(&scene, &[county], &dim).is_empty());
/// ```
#[must_use]
pub fn diff(scene: &MapScene, view: &[County], unselected: &Color) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    let mut seen = HashSet::with_capacity(view.len());

    for county in view {
        seen.insert(county.id);
        let target = display_fill(county, unselected);
        match scene.get(county.id) {
            None => ops.push(DrawOp::Enter {
                id: county.id,
                fill: target.clone(),
            }),
            Some(shape) if &shape.fill != target => ops.push(DrawOp::Recolor {
                id: county.id,
                from: shape.fill.clone(),
                to: target.clone(),
            }),
            Some(_) => {}
        }
    }

    ops.extend(
        scene
            .shapes()
            .iter()
            .filter(|s| !seen.contains(&s.id))
            .map(|s| DrawOp::Exit { id: s.id }),
    );
    ops
}
