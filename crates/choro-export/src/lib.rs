//! choro-export: Pure chart serializers (sans-IO)
//!
//! Converts a chart state into a standalone SVG document.

pub mod svg;

pub use svg::{SvgMetadata, to_svg};
