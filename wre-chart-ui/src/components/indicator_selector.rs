//! Indicator dropdown; long names are elided in the label only.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn IndicatorSelector() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().view();
    if view.indicators.is_empty() {
        return rsx! {};
    }
    let count = view.indicators.len();

    let on_change = move |evt: Event<FormData>| {
        let indicator = evt.value();
        state.dispatch(move |explorer| explorer.set_indicator(indicator));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "indicator-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Indicator: "
            }
            select {
                id: "indicator-select",
                style: "max-width: 100%;",
                onchange: on_change,
                option {
                    value: "",
                    selected: view.indicator.is_empty(),
                    "All"
                }
                for item in view.indicators.iter() {
                    option {
                        value: "{item.value}",
                        title: "{item.value}",
                        selected: item.value == view.indicator,
                        "{item.label}"
                    }
                }
            }
            p {
                style: "margin: 4px 0 0 0; font-size: 12px; color: #666;",
                "Indicators found: {count}"
            }
        }
    }
}
