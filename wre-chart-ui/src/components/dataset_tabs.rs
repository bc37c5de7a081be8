//! One tab per dataset offered by the backend.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn DatasetTabs() -> Element {
    let state = use_context::<AppState>();
    let datasets = state.datasets.read().clone();
    let selected = state
        .explorer
        .read()
        .state()
        .filename()
        .map(str::to_string)
        .unwrap_or_default();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 8px; margin-bottom: 16px;",
            for dataset in datasets.into_iter() {
                button {
                    key: "{dataset.filename}",
                    style: if dataset.filename == selected {
                        "padding: 6px 12px; border-radius: 16px; border: none; background: #0288D1; color: #fff; font-weight: bold;"
                    } else {
                        "padding: 6px 12px; border-radius: 16px; border: 1px solid #BDBDBD; background: #FAFAFA;"
                    },
                    title: "{dataset.filename}",
                    onclick: {
                        let dataset = dataset.clone();
                        move |_| {
                            let dataset = dataset.clone();
                            state.dispatch(move |explorer| explorer.select_dataset(dataset));
                        }
                    },
                    "{dataset.title}"
                }
            }
        }
    }
}
