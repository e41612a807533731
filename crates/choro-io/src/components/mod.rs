//! Dioxus UI components for choro.
//!
//! Provides the county map, the clickable legend, the pointer tooltip
//! and the SVG export button.

mod export;
mod legend;
mod map;
mod tooltip;

pub use export::ExportButton;
pub use legend::Legend;
pub use map::CountyMap;
pub use tooltip::TooltipBox;
