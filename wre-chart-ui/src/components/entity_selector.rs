//! Entity dropdown scoped to the selected category.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn EntitySelector() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().view();
    if !view.has_entities {
        return rsx! {};
    }

    let on_change = move |evt: Event<FormData>| {
        let entity = evt.value();
        state.dispatch(move |explorer| explorer.set_entity(entity));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "entity-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Entity: "
            }
            select {
                id: "entity-select",
                onchange: on_change,
                option {
                    value: "",
                    selected: view.entity.is_empty(),
                    "All"
                }
                for entity in view.entities.iter() {
                    option {
                        value: "{entity}",
                        selected: *entity == view.entity,
                        "{entity}"
                    }
                }
            }
            p {
                style: "margin: 4px 0 0 0; font-size: 12px; color: #666;",
                "Entities found: {view.total_entities}"
            }
        }
    }
}
