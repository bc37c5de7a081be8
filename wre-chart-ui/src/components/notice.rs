//! Inline notices: non-blocking warnings and section placeholders.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct NoticeProps {
    pub message: String,
}

/// Amber one-line warning, e.g. a year mismatch.
#[component]
pub fn Notice(props: NoticeProps) -> Element {
    rsx! {
        p {
            style: "margin: 0 0 8px 0; font-size: 12px; color: #B26A00;",
            "{props.message}"
        }
    }
}

/// Dashed box shown where a section has nothing to render.
#[component]
pub fn Placeholder(props: NoticeProps) -> Element {
    rsx! {
        div {
            style: "height: 300px; display: flex; align-items: center; justify-content: center; color: #666; border: 1px dashed #BDBDBD; border-radius: 8px;",
            "{props.message}"
        }
    }
}
