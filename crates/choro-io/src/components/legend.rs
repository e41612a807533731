//! Clickable legend strip.

use std::rc::Rc;

use choro_core::{Chart, LegendLayout};
use dioxus::prelude::*;

/// Props for the [`Legend`] component.
#[derive(Props, Clone)]
pub struct LegendProps {
    /// Current chart state: bands and selection marker.
    chart: Rc<Chart>,
    /// Item geometry.
    layout: LegendLayout,
    /// Horizontal offset of the legend group.
    offset_x: f64,
    /// Fired with the band index when a band rectangle is clicked.
    on_toggle: EventHandler<usize>,
}

impl PartialEq for LegendProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.chart, &other.chart)
            && self.layout == other.layout
            && self.offset_x.to_bits() == other.offset_x.to_bits()
    }
}

/// One rectangle and label per color band, inside `<g id="legend">`.
///
/// The band carrying the selection marker gets the `selected` class.
#[component]
pub fn Legend(props: LegendProps) -> Element {
    let layout = &props.layout;
    let (width, height) = (layout.item_width, layout.item_height);
    let transform = format!("translate({}, {})", props.offset_x, layout.offset_y);
    let selection = props.chart.selection();
    let on_toggle = props.on_toggle;

    let items = props.chart.legend().iter().map(|band| {
        let index = band.index;
        let class = if selection.is_marked(index) {
            "legend-item selected"
        } else {
            "legend-item"
        };
        let x = layout.item_x(index);
        let at = layout.label_position(index);
        let lower = format!("{:.2}", band.lower);
        let upper = format!("{:.2}", band.upper);
        let label = band.label();
        let fill = band.color.as_str();
        rsx! {
            g { key: "{index}",
                rect {
                    class: "{class}",
                    x: "{x}",
                    width: "{width}",
                    height: "{height}",
                    fill: "{fill}",
                    "data-lowerThreshold": "{lower}",
                    "data-higherThreshold": "{upper}",
                    onclick: move |_| on_toggle.call(index),
                }
                text {
                    class: "legend-item-text",
                    x: "{at.x}",
                    y: "{at.y}",
                    "{label}"
                }
            }
        }
    });

    rsx! {
        g {
            id: "legend",
            transform: "{transform}",
            {items}
        }
    }
}
