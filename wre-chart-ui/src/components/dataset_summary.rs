//! Data period and data type of the selected dataset.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn DatasetSummary() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().view();
    let (Some(period), Some(entity_type)) = (view.period, view.entity_type) else {
        return rsx! {};
    };

    rsx! {
        div {
            style: "border-top: 1px solid #E0E0E0; margin-top: 12px; padding-top: 12px; font-size: 13px; color: #555;",
            div {
                style: "display: flex; justify-content: space-between;",
                span { "Data period" }
                strong { "{period}" }
            }
            div {
                style: "display: flex; justify-content: space-between;",
                span { "Data type" }
                strong { "{entity_type}" }
            }
        }
    }
}
