//! Forecast horizon in years.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn HorizonInput() -> Element {
    let state = use_context::<AppState>();
    let horizon = state.explorer.read().state().horizon_years;
    let (min, max) = {
        let explorer = state.explorer.read();
        (explorer.config().min_horizon, explorer.config().max_horizon)
    };

    let on_change = move |evt: Event<FormData>| {
        // Unparseable input counts as unset and falls back to the default.
        let years = evt.value().trim().parse::<u32>().unwrap_or(0);
        state.dispatch(move |explorer| explorer.set_horizon(years));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                "Forecast horizon: "
                input {
                    r#type: "number",
                    value: "{horizon}",
                    min: "{min}",
                    max: "{max}",
                    style: "width: 60px;",
                    onchange: on_change,
                }
                " years"
            }
        }
    }
}
