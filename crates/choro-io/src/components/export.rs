//! SVG download button.

use std::rc::Rc;

use choro_core::{Chart, ChartConfig};
use choro_export::{SvgMetadata, to_svg};
use dioxus::prelude::*;

use crate::download;

/// Props for the [`ExportButton`] component.
#[derive(Props, Clone)]
pub struct ExportButtonProps {
    /// Chart state to export, including the current selection.
    chart: Rc<Chart>,
    /// Canvas, legend and copy used for the document.
    config: Rc<ChartConfig>,
}

impl PartialEq for ExportButtonProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.chart, &other.chart) && Rc::ptr_eq(&self.config, &other.config)
    }
}

/// Button that downloads the current view as a standalone SVG file.
#[component]
pub fn ExportButton(props: ExportButtonProps) -> Element {
    let mut export_error = use_signal(|| Option::<String>::None);

    let onclick = {
        let chart = Rc::clone(&props.chart);
        let config = Rc::clone(&props.config);
        move |_| {
            let svg = to_svg(&chart, &config, &SvgMetadata::from_config(&config));
            let filename = download::svg_filename(&config.title);
            if let Err(e) = download::trigger_download(&svg, &filename, download::SVG_MIME) {
                tracing::warn!(error = %e, "export failed");
                export_error.set(Some(format!("Download failed: {e}")));
            } else {
                export_error.set(None);
            }
        }
    };

    rsx! {
        div {
            button { class: "export-button", onclick: onclick, "Download SVG" }
            if let Some(ref err) = export_error() {
                p { class: "error-panel", "{err}" }
            }
        }
    }
}
