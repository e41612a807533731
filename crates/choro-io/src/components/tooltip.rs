//! Floating tooltip element.

use choro_core::Tooltip;
use dioxus::prelude::*;

/// Props for the [`TooltipBox`] component.
#[derive(Props, Clone, PartialEq)]
pub struct TooltipBoxProps {
    /// Tooltip state to display.
    tooltip: Tooltip,
}

/// `<div id="tooltip">` positioned in client pixels.
///
/// Hidden tooltips stay in the DOM with zero opacity so the fade can
/// animate.
#[component]
pub fn TooltipBox(props: TooltipBoxProps) -> Element {
    let tip = &props.tooltip;
    let education = tip.education.map(|edu| edu.to_string());

    rsx! {
        div {
            id: "tooltip",
            "data-education": education,
            style: "left: {tip.left}px; top: {tip.top}px; opacity: {tip.opacity};",
            "{tip.text}"
        }
    }
}
