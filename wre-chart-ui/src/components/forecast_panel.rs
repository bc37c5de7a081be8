//! Forecast section: historical series spliced with the forecast.

use super::{ChartContainer, ChartHeader, ErrorDisplay, Placeholder, PANEL_STYLE};
use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use wre_explorer::{ExplorerIssue, Panel, QueryKind};

/// DOM id D3 renders into.
const CHART_ID: &str = "forecast-chart";

#[component]
pub fn ForecastPanel() -> Element {
    let state = use_context::<AppState>();
    let forecast = use_memo(move || state.explorer.read().forecast_view());

    use_effect(move || {
        let view = forecast();
        let Some(series) = view.series.ready() else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };

        js_bridge::init_renderers();
        let data_json = serde_json::to_string(&series.rows).unwrap_or_default();
        let config_json = serde_json::to_string(&serde_json::json!({
            "title": view.title,
            "selectedYear": view.selected_year,
            "lastHistoricalYear": series.last_historical_year,
            "method": view.method,
        }))
        .unwrap_or_default();
        js_bridge::render_forecast_chart(CHART_ID, &data_json, &config_json);
    });

    let view = forecast();
    let subtitle = view
        .method
        .as_ref()
        .map(|m| format!("Method: {m}"))
        .unwrap_or_default();
    let body = match &view.series {
        Panel::Unavailable(issue @ ExplorerIssue::FetchFailure { .. }) => {
            let message = issue.to_string();
            rsx! {
                ErrorDisplay {
                    message,
                    on_retry: move |_| state.refetch(QueryKind::Forecast),
                }
            }
        }
        Panel::Unavailable(_) => rsx! {
            Placeholder { message: "Choose another category or indicator.".to_string() }
        },
        Panel::Ready(series) if series.is_empty() => rsx! {
            Placeholder { message: "Insufficient data to build a forecast".to_string() }
        },
        Panel::Loading | Panel::Ready(_) => rsx! {
            ChartContainer {
                id: CHART_ID.to_string(),
                loading: view.series.is_loading(),
                min_height: 400,
            }
        },
    };

    rsx! {
        div {
            style: PANEL_STYLE,
            ChartHeader { title: view.title.clone(), subtitle }
            {body}
        }
    }
}
