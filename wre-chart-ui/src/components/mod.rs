//! Dioxus RSX components for the dataset explorer.

mod category_selector;
mod chart_container;
mod chart_header;
mod data_tables;
mod dataset_summary;
mod dataset_tabs;
mod entity_selector;
mod error_display;
mod forecast_panel;
mod horizon_input;
mod indicator_selector;
mod loading_spinner;
mod map_panel;
mod notice;
mod section_tabs;
mod year_slider;

pub use category_selector::CategorySelector;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use data_tables::DataTables;
pub use dataset_summary::DatasetSummary;
pub use dataset_tabs::DatasetTabs;
pub use entity_selector::EntitySelector;
pub use error_display::ErrorDisplay;
pub use forecast_panel::ForecastPanel;
pub use horizon_input::HorizonInput;
pub use indicator_selector::IndicatorSelector;
pub use loading_spinner::LoadingSpinner;
pub use map_panel::MapPanel;
pub use notice::{Notice, Placeholder};
pub use section_tabs::SectionTabs;
pub use year_slider::YearSlider;

/// Style shared by the section panels.
pub(crate) const PANEL_STYLE: &str =
    "padding: 16px; border: 1px solid #E0E0E0; border-radius: 8px; background: #FFFFFF;";
