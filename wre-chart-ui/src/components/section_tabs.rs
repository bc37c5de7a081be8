//! Map / Forecast / Table tabs. The map tab only exists for spatial datasets.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn SectionTabs() -> Element {
    let state = use_context::<AppState>();
    let view = state.explorer.read().view();

    rsx! {
        div {
            style: "display: flex; gap: 8px; margin-bottom: 12px;",
            for section in view.sections {
                button {
                    key: "{section.id()}",
                    style: if section == view.active_section {
                        "padding: 6px 14px; border-radius: 12px; border: none; background: #26C6DA; color: #0F172A; font-weight: bold;"
                    } else {
                        "padding: 6px 14px; border-radius: 12px; border: 1px solid #BDBDBD; background: #FFFFFF;"
                    },
                    onclick: move |_| state.dispatch(move |explorer| explorer.set_section(section)),
                    "{section.label()}"
                }
            }
        }
    }
}
