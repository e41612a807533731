//! County shapes of the choropleth map.
//!
//! Shapes are keyed by FIPS code and drawn from the [`MapScene`], so a
//! legend click only changes the `fill` (and phase class) of existing
//! `<path>` elements; the stylesheet animates the change.

use std::rc::Rc;

use choro_core::{Chart, County, MapScene, Pointer};
use dioxus::prelude::*;

/// Props for the [`CountyMap`] component.
#[derive(Props, Clone)]
pub struct CountyMapProps {
    /// Current chart state: geometry and county records.
    chart: Rc<Chart>,
    /// Drawn shapes with their current fill and lifecycle phase.
    scene: Rc<MapScene>,
    /// Fired while the pointer moves over a county.
    on_hover: EventHandler<(County, Pointer)>,
    /// Fired when the pointer leaves a county.
    on_leave: EventHandler<()>,
}

impl PartialEq for CountyMapProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.chart, &other.chart) && Rc::ptr_eq(&self.scene, &other.scene)
    }
}

/// One `<path class="county">` per drawn shape, inside `<g id="counties">`.
#[component]
pub fn CountyMap(props: CountyMapProps) -> Element {
    let chart = &props.chart;
    let on_hover = props.on_hover;
    let on_leave = props.on_leave;

    let paths = props
        .scene
        .shapes()
        .iter()
        .filter_map(|shape| Some((shape, chart.county(shape.id)?, chart.shape(shape.id)?)))
        .map(|(shape, county, outline)| {
            let class = shape
                .phase
                .class()
                .map_or_else(|| "county".to_owned(), |phase| format!("county {phase}"));
            let id = shape.id;
            let fill = shape.fill.as_str();
            let d = outline.path.as_str();
            let edu = county.edu;
            let location = county.location.as_str();
            let hovered = county.clone();
            rsx! {
                path {
                    key: "{id}",
                    class: "{class}",
                    d: "{d}",
                    fill: "{fill}",
                    "data-fips": "{id}",
                    "data-education": "{edu}",
                    "data-location": "{location}",
                    onmousemove: move |evt: Event<MouseData>| {
                        let client = evt.client_coordinates();
                        on_hover.call((hovered.clone(), Pointer::new(client.x, client.y)));
                    },
                    onmouseout: move |_| on_leave.call(()),
                }
            }
        });

    rsx! {
        g { id: "counties", {paths} }
    }
}
