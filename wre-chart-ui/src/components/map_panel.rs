//! Map section: value-mapped water features for the effective category.

use super::{ChartContainer, ChartHeader, ErrorDisplay, Notice, Placeholder, PANEL_STYLE};
use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use wre_explorer::{ExplorerIssue, Panel};

/// DOM id Leaflet renders into.
const MAP_ID: &str = "water-map";

#[component]
pub fn MapPanel() -> Element {
    let state = use_context::<AppState>();
    let map = use_memo(move || state.explorer.read().map_view());
    let shapes = use_memo(move || state.explorer.read().orchestrator().shapes().ready().cloned());

    // Redraw whenever the mapped layer or the geometry changes
    use_effect(move || {
        let view = map();
        let Some(layer) = view.layer.ready() else {
            js_bridge::destroy_water_map(MAP_ID);
            return;
        };
        let geojson = shapes().map(|s| s.0.clone()).unwrap_or_default();

        js_bridge::init_renderers();
        let data_json = serde_json::to_string(&serde_json::json!({
            "layer": layer,
            "geojson": geojson,
        }))
        .unwrap_or_default();
        let config_json = serde_json::to_string(&serde_json::json!({
            "center": [53.5, 28.0],
            "zoom": 7,
        }))
        .unwrap_or_default();
        log::debug!(
            "Rendering map: {} markers, {} shapes",
            layer.markers.len(),
            layer.shapes.len()
        );
        js_bridge::render_water_map(MAP_ID, &data_json, &config_json);
    });

    let view = map();
    let empty_note = (view.layer.ready().is_some() && !view.has_values())
        .then(|| ExplorerIssue::EmptyValues.to_string());
    let body = match &view.layer {
        Panel::Unavailable(ExplorerIssue::FetchFailure { kind, .. }) => {
            let kind = *kind;
            let message = view.layer.issue().map(ToString::to_string).unwrap_or_default();
            rsx! {
                ErrorDisplay {
                    message,
                    on_retry: move |_| state.refetch(kind),
                }
            }
        }
        Panel::Unavailable(_) => rsx! {
            Placeholder { message: "Choose another category or indicator.".to_string() }
        },
        Panel::Loading | Panel::Ready(_) => rsx! {
            ChartContainer {
                id: MAP_ID.to_string(),
                loading: view.layer.is_loading(),
                min_height: 420,
            }
        },
    };

    rsx! {
        div {
            style: PANEL_STYLE,
            div {
                style: "display: flex; justify-content: space-between; align-items: baseline;",
                ChartHeader { title: view.title.clone() }
                if let Some(note) = empty_note {
                    span {
                        style: "font-size: 13px; color: #666;",
                        "{note}"
                    }
                }
            }
            if let Some(mismatch) = view.year_mismatch() {
                Notice { message: mismatch.to_string() }
            }
            {body}
        }
    }
}
