//! Shared Dioxus components and Leaflet/D3.js bridge for the dataset explorer.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the map and chart renderers via `js_sys::eval()`
//! - `state`: Reactive AppState wrapping the [`wre_explorer::Explorer`]
//! - `components`: RSX components (selectors, section panels, tables)

pub mod components;
pub mod js_bridge;
pub mod state;
