//! Table section: historical values and forecast with bounds.

use super::{ErrorDisplay, LoadingSpinner, Placeholder, PANEL_STYLE};
use crate::state::AppState;
use dioxus::prelude::*;
use wre_explorer::{ExplorerIssue, Panel, QueryKind};

const TABLE_STYLE: &str = "width: 100%; border-collapse: collapse; font-size: 13px;";
const HEAD_STYLE: &str = "text-align: left; padding: 4px 8px; border-bottom: 2px solid #E0E0E0;";
const CELL_STYLE: &str = "padding: 4px 8px; border-bottom: 1px solid #F0F0F0;";

#[component]
pub fn DataTables() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().forecast_view();

    let series = match &view.series {
        Panel::Ready(series) if !series.is_empty() => series,
        Panel::Loading => return rsx! { LoadingSpinner {} },
        Panel::Unavailable(issue @ ExplorerIssue::FetchFailure { .. }) => {
            let message = issue.to_string();
            return rsx! {
                ErrorDisplay {
                    message,
                    on_retry: move |_| state.refetch(QueryKind::Forecast),
                }
            };
        }
        _ => {
            return rsx! {
                Placeholder { message: "Insufficient data to display the table".to_string() }
            }
        }
    };
    let historical = series.historical_table();
    let forecast = series.forecast_table();

    rsx! {
        div {
            style: "{PANEL_STYLE} display: flex; gap: 24px; flex-wrap: wrap;",
            div {
                style: "flex: 1; min-width: 240px; max-height: 400px; overflow-y: auto;",
                h3 { "Historical values" }
                table {
                    style: TABLE_STYLE,
                    thead {
                        tr {
                            th { style: HEAD_STYLE, "Year" }
                            th { style: HEAD_STYLE, "Value" }
                        }
                    }
                    tbody {
                        for row in historical {
                            tr {
                                key: "{row.year}",
                                td { style: CELL_STYLE, "{row.year}" }
                                td { style: "{CELL_STYLE} text-align: right;", "{row.value}" }
                            }
                        }
                    }
                }
            }
            div {
                style: "flex: 1; min-width: 240px; max-height: 400px; overflow-y: auto;",
                h3 { "Forecast" }
                table {
                    style: TABLE_STYLE,
                    thead {
                        tr {
                            th { style: HEAD_STYLE, "Year" }
                            th { style: HEAD_STYLE, "Forecast" }
                        }
                    }
                    tbody {
                        for row in forecast {
                            tr {
                                key: "{row.year}",
                                td { style: CELL_STYLE, "{row.year}" }
                                td {
                                    style: "{CELL_STYLE} text-align: right;",
                                    "{row.forecast} "
                                    span {
                                        style: "font-size: 11px; color: #666;",
                                        "{row.bounds}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
