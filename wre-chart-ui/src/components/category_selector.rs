//! Category dropdown, in display order. Hidden when the dataset has none.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn CategorySelector() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().view();
    if view.categories.is_empty() {
        return rsx! {};
    }

    let on_change = move |evt: Event<FormData>| {
        let category = evt.value();
        state.dispatch(move |explorer| explorer.set_category(category));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "category-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Category: "
            }
            select {
                id: "category-select",
                onchange: on_change,
                for category in view.categories.iter() {
                    option {
                        value: "{category}",
                        selected: *category == view.category,
                        "{category}"
                    }
                }
            }
        }
    }
}
