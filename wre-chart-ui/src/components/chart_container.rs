//! Container div a JS renderer draws into.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id for the container (Leaflet or D3 renders into this)
    pub id: String,
    #[props(default = false)]
    pub loading: bool,
    #[props(default = 420)]
    pub min_height: u32,
}

/// A container div for the map or chart, with a loading overlay.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let outer = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );
    let inner = format!("width: 100%; height: {}px;", props.min_height);

    rsx! {
        div {
            style: "{outer}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666; z-index: 1000;",
                    "Loading..."
                }
            }
            div {
                id: "{props.id}",
                style: "{inner}",
            }
        }
    }
}
