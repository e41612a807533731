use std::rc::Rc;

use choro_core::scene::diff;
use choro_core::{Chart, ChartConfig, County, MapScene, Pointer, Tooltip};
use choro_io::{CountyMap, ExportButton, Legend, TooltipBox, load_chart, stylesheet};
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        web_sys::console::warn_1(&format!("logger already initialised: {e}").into());
    }
    dioxus::launch(app);
}

/// Record `ops` for the move from `scene` to `chart`'s view and return
/// the resulting scene.
fn advance(scene: &MapScene, chart: &Chart) -> MapScene {
    let ops = diff(scene, chart.view(), chart.unselected_fill());
    tracing::debug!(ops = ops.len(), "scene diff");
    let mut next = scene.clone();
    next.apply(&ops);
    next
}

/// Root application component.
///
/// Holds the chart, the drawn scene and the tooltip in signals and wires
/// the loader, map, legend, tooltip and export components together.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let config = use_hook(|| Rc::new(ChartConfig::default()));
    let mut chart = use_signal(|| Option::<Rc<Chart>>::None);
    let mut scene = use_signal(|| Rc::new(MapScene::new()));
    let mut tooltip = use_signal(Tooltip::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut generation = use_signal(|| 0u64);

    // Return every shape to steady once the fill transition has run.
    // A newer transition bumps the generation and supersedes this one.
    let mut settle_later = {
        let transition_ms = config.transition_ms;
        move || {
            generation += 1;
            let my_generation = *generation.peek();
            spawn(async move {
                gloo_timers::future::TimeoutFuture::new(transition_ms).await;
                if *generation.peek() != my_generation {
                    return;
                }
                let mut settled = scene.peek().as_ref().clone();
                settled.settle();
                scene.set(Rc::new(settled));
            });
        }
    };

    // --- Data loading effect ---
    // Runs once: both documents are fetched together and nothing is
    // drawn unless both arrive.
    {
        let config = Rc::clone(&config);
        use_effect(move || {
            let config = Rc::clone(&config);
            spawn(async move {
                match load_chart(&config).await {
                    Ok(loaded) => {
                        let entered = advance(&scene.peek(), &loaded);
                        scene.set(Rc::new(entered));
                        chart.set(Some(Rc::new(loaded)));
                        error.set(None);
                        settle_later();
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to load chart data");
                        error.set(Some(format!("Failed to load chart data: {e}")));
                    }
                }
            });
        });
    }

    // --- Legend click handler ---
    let on_toggle = move |band: usize| {
        let Some(current) = chart() else {
            return;
        };
        match current.toggle(band) {
            Ok(next) => {
                let recolored = advance(&scene.peek(), &next);
                scene.set(Rc::new(recolored));
                chart.set(Some(Rc::new(next)));
                settle_later();
            }
            Err(e) => {
                tracing::warn!(error = %e, "legend toggle rejected");
            }
        }
    };

    // --- Tooltip handlers ---
    let offset = config.tooltip_offset;
    let on_hover = move |(county, pointer): (County, Pointer)| {
        tooltip.set(Tooltip::show(&county, pointer, offset));
    };
    let on_leave = move |()| {
        let hidden = tooltip.peek().clone().hide();
        tooltip.set(hidden);
    };

    let css = stylesheet(&config);
    let (width, height) = (config.width, config.height);

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: "{css}" }

        div { id: "container",
            h1 { id: "title", "{config.title}" }
            p { id: "description", "{config.description}" }

            if let Some(ref err) = error() {
                div { class: "error-panel", role: "alert", "{err}" }
            }

            svg {
                id: "chart",
                xmlns: "http://www.w3.org/2000/svg",
                width: "{width}",
                height: "{height}",
                view_box: "0 0 {width} {height}",

                if let Some(ref current) = chart() {
                    CountyMap {
                        chart: Rc::clone(current),
                        scene: scene(),
                        on_hover: on_hover,
                        on_leave: on_leave,
                    }
                    Legend {
                        chart: Rc::clone(current),
                        layout: config.legend.clone(),
                        offset_x: config.legend_offset_x(),
                        on_toggle: on_toggle,
                    }
                }
            }

            if let Some(ref current) = chart() {
                ExportButton {
                    chart: Rc::clone(current),
                    config: Rc::clone(&config),
                }
            }

            TooltipBox { tooltip: tooltip() }
        }
    }
}
