//! Water Resources Dataset Explorer
//!
//! One tab per backend dataset. For the selected dataset the user picks a
//! year, a category, an entity and an indicator; the app shows
//! - a map of the category's water features coloured by the snapshot values
//!   (spatial datasets only),
//! - the historical series with its forecast and confidence band,
//! - both series as tables.
//!
//! Data flow:
//! 1. On mount the dataset list is fetched and the first dataset selected.
//! 2. Every control dispatches a selection change into the `Explorer`, which
//!    corrects the selection and returns the backend requests it needs.
//! 3. `AppState::schedule` runs each request on its own task and feeds the
//!    responses back; stale ones are dropped by the explorer.
//! 4. The section panels re-derive their views and redraw through the JS
//!    bridge.

use dioxus::prelude::*;
use wre_chart_ui::components::{
    CategorySelector, DataTables, DatasetSummary, DatasetTabs, EntitySelector, ErrorDisplay,
    ForecastPanel, HorizonInput, IndicatorSelector, LoadingSpinner, MapPanel, SectionTabs,
    YearSlider,
};
use wre_chart_ui::js_bridge;
use wre_chart_ui::state::AppState;
use wre_explorer::{ExplorerConfig, QueryKind, Section};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("dataset-explorer-root"))
        .launch(App);
}

/// Configuration baked in at build time; `WRE_API_URL` overrides the backend.
fn config() -> ExplorerConfig {
    let mut config = ExplorerConfig::default();
    if let Some(url) = option_env!("WRE_API_URL") {
        config.api_url = url.to_string();
    }
    config
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| AppState::new(config()));

    use_effect(move || {
        log::info!("Dataset explorer mounted");
        js_bridge::load_libraries();
        js_bridge::init_renderers();
        state.load_datasets();
    });

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h2 { style: "margin: 0 0 12px 0;", "Water Resources Explorer" }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                DatasetTabs {}
                DatasetTab {}
            }
        }
    }
}

/// Sections and side panel of the selected dataset.
#[component]
fn DatasetTab() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().view();

    if view.dataset_title.is_none() {
        return rsx! {};
    }
    if let Some(issue) = view.metadata_issue {
        return rsx! {
            ErrorDisplay {
                message: issue.to_string(),
                on_retry: move |_| state.refetch(QueryKind::Metadata),
            }
        };
    }
    if view.loading {
        return rsx! { LoadingSpinner { message: "Loading dataset...".to_string() } };
    }

    let section = match view.active_section {
        Section::Map => rsx! { MapPanel {} },
        Section::Forecast => rsx! { ForecastPanel {} },
        Section::Table => rsx! { DataTables {} },
    };

    rsx! {
        SectionTabs {}
        div {
            style: "display: flex; gap: 16px; align-items: flex-start; flex-wrap: wrap;",
            div {
                style: "flex: 2; min-width: 480px;",
                {section}
            }
            div {
                style: "flex: 1; min-width: 260px; padding: 16px; border: 1px solid #E0E0E0; border-radius: 8px; background: #FAFAFA;",
                YearSlider {}
                CategorySelector {}
                EntitySelector {}
                IndicatorSelector {}
                HorizonInput {}
                DatasetSummary {}
            }
        }
    }
}
