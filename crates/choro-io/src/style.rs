//! Page stylesheet.
//!
//! Fill transitions run in CSS: a recolored county animates its `fill`
//! for the configured duration and a newly entered county fades in from
//! transparent over the same duration.

use std::fmt::Write;

use choro_core::ChartConfig;

/// Build the stylesheet for `config`.
#[must_use]
pub fn stylesheet(config: &ChartConfig) -> String {
    let ms = config.transition_ms;
    let mut css = String::new();
    let _ = write!(
        css,
        "body {{ margin: 0; font-family: sans-serif; background: #f4f4f4; color: #222; }}
#container {{ display: flex; flex-direction: column; align-items: center; padding: 1rem; }}
#title {{ margin: 0.5rem 0 0; font-size: 2rem; }}
#description {{ margin: 0.25rem 0 1rem; color: #555; }}
#chart {{ background: #fff; }}
.county {{ stroke: #fff; stroke-width: 0.25; transition: fill {ms}ms ease; }}
.county.entering {{ animation: county-enter {ms}ms ease; }}
.county:hover {{ stroke: #000; stroke-width: 1; }}
@keyframes county-enter {{ from {{ fill-opacity: 0; }} to {{ fill-opacity: 1; }} }}
.legend-item {{ cursor: pointer; stroke: none; }}
.legend-item.selected {{ stroke: #000; stroke-width: 2; }}
.legend-item-text {{ font-size: 10px; pointer-events: none; }}
#tooltip {{ position: fixed; pointer-events: none; padding: 0.4rem 0.6rem;
  border-radius: 4px; background: rgba(0, 0, 0, 0.8); color: #fff;
  font-size: 0.85rem; transition: opacity 200ms ease; }}
.error-panel {{ margin: 1rem; padding: 0.75rem 1rem; border: 1px solid #c33;
  border-radius: 4px; background: #fee; color: #900; }}
.export-button {{ margin-top: 0.75rem; padding: 0.4rem 1rem; cursor: pointer; }}
"
    );
    css
}
