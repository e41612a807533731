//! choro-io: Browser I/O and Dioxus component library.
//!
//! Fetches the two source documents, triggers Blob downloads, and
//! provides the map, legend, tooltip and export components for the
//! choro web application.

pub mod components;
pub mod download;
pub mod fetch;
pub mod load;
pub mod style;

pub use components::{CountyMap, ExportButton, Legend, TooltipBox};
pub use load::{LoadError, load_chart};
pub use style::stylesheet;
