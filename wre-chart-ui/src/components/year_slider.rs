//! Year slider bounded by the dataset's year range.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn YearSlider() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().view();
    let Some(range) = view.year_range else {
        return rsx! {};
    };
    let (min, max, year) = (range.min(), range.max(), view.year);

    let on_input = move |evt: Event<FormData>| {
        if let Ok(year) = evt.value().parse::<i32>() {
            state.dispatch(move |explorer| explorer.set_year(year));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "year-slider",
                style: "font-weight: bold; display: block;",
                "Year: {year}"
            }
            input {
                id: "year-slider",
                r#type: "range",
                min: "{min}",
                max: "{max}",
                value: "{year}",
                style: "width: 100%;",
                onchange: on_input,
            }
            div {
                style: "display: flex; justify-content: space-between; font-size: 12px; color: #666;",
                span { "{min}" }
                span { "{max}" }
            }
        }
    }
}
