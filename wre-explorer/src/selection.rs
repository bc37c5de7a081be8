//! Selection state and its single transition function.
//!
//! All cascading corrections (year clamping, category defaulting, entity
//! reset) happen inside [`reduce`], atomically per event, so no caller has
//! to sequence them.

use crate::config::ExplorerConfig;
use serde::{Deserialize, Serialize};
use wre_api::{Dataset, DatasetInfo};

/// View section of a dataset tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Map,
    Forecast,
    Table,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Map, Section::Forecast, Section::Table];

    pub fn label(self) -> &'static str {
        match self {
            Section::Map => "Map",
            Section::Forecast => "Forecast",
            Section::Table => "Table",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Section::Map => "map",
            Section::Forecast => "forecast",
            Section::Table => "table",
        }
    }

    /// Sections offered for a dataset; `Map` only when it has spatial data.
    pub fn visible(supports_map: bool) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| supports_map || *s != Section::Map)
            .collect()
    }
}

/// What the user has selected. Empty strings mean "not selected".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub dataset: Option<Dataset>,
    pub year: i32,
    pub category: String,
    pub entity: String,
    pub indicator: String,
    pub horizon_years: u32,
    pub active_section: Section,
}

impl SelectionState {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            dataset: None,
            year: config.default_year,
            category: String::new(),
            entity: String::new(),
            indicator: String::new(),
            horizon_years: config.default_horizon,
            active_section: Section::Map,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.dataset.as_ref().map(|d| d.filename.as_str())
    }

    pub fn supports_map(&self, config: &ExplorerConfig) -> bool {
        self.filename().is_some_and(|f| config.supports_map(f))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    SelectDataset(Dataset),
    SetYear(i32),
    SetCategory(String),
    SetEntity(String),
    SetIndicator(String),
    SetHorizon(u32),
    SetSection(Section),
    /// Metadata for the current dataset is available (or unchanged); only
    /// the corrections run.
    MetadataArrived,
}

/// Apply `event` to `state` and restore every invariant.
///
/// `metadata` must describe the dataset selected in `state`. It is ignored
/// for [`SelectionEvent::SelectDataset`], since it then belongs to the
/// dataset being left.
pub fn reduce(
    state: &SelectionState,
    event: SelectionEvent,
    metadata: Option<&DatasetInfo>,
    config: &ExplorerConfig,
) -> SelectionState {
    let mut next = state.clone();
    let mut metadata = metadata;

    match event {
        SelectionEvent::SelectDataset(dataset) => {
            next.active_section = if config.supports_map(&dataset.filename) {
                Section::Map
            } else {
                Section::Forecast
            };
            next.category.clear();
            next.entity.clear();
            next.indicator.clear();
            next.dataset = Some(dataset);
            metadata = None;
        }
        SelectionEvent::SetYear(year) => next.year = year,
        SelectionEvent::SetCategory(category) => next.category = category,
        SelectionEvent::SetEntity(entity) => next.entity = entity,
        SelectionEvent::SetIndicator(indicator) => next.indicator = indicator,
        SelectionEvent::SetHorizon(years) => next.horizon_years = config.clamp_horizon(years),
        SelectionEvent::SetSection(section) => {
            if section != Section::Map || next.supports_map(config) {
                next.active_section = section;
            }
        }
        SelectionEvent::MetadataArrived => {}
    }

    if let Some(info) = metadata {
        correct(&mut next, info, config);
    }

    if next.category != state.category && !next.entity.is_empty() {
        log::debug!(
            "Category changed from {:?} to {:?}; clearing entity {:?}",
            state.category,
            next.category,
            next.entity
        );
        next.entity.clear();
    }

    next
}

fn correct(state: &mut SelectionState, info: &DatasetInfo, config: &ExplorerConfig) {
    let range = info.year_range;
    if !range.contains(state.year) {
        log::debug!(
            "Year {} outside {}..={}; resetting to {}",
            state.year,
            range.min(),
            range.max(),
            range.max()
        );
        state.year = range.max();
    }

    let categories = config.sort_categories(info.category_names());
    if let Some(first) = categories.first() {
        if !categories.contains(&state.category) {
            state.category = first.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ExplorerConfig {
        ExplorerConfig::default()
    }

    fn map_dataset() -> Dataset {
        Dataset {
            filename: "C11-2005-2024.csv".to_string(),
            title: "Surface water quality".to_string(),
        }
    }

    fn info(range: [i32; 2], categories: &[&str]) -> DatasetInfo {
        serde_json::from_value(json!({
            "entity_type": "station",
            "has_entities": true,
            "entities": [],
            "indicators": [],
            "categories": categories,
            "year_range": range
        }))
        .unwrap()
    }

    fn selected(year: i32, category: &str, entity: &str) -> SelectionState {
        SelectionState {
            dataset: Some(map_dataset()),
            year,
            category: category.to_string(),
            entity: entity.to_string(),
            indicator: String::new(),
            horizon_years: 12,
            active_section: Section::Map,
        }
    }

    #[test]
    fn out_of_range_year_resets_to_max() {
        let info = info([2005, 2024], &[]);
        for year in [1990, 2004, 2025, 2030] {
            let next = reduce(
                &selected(year, "", ""),
                SelectionEvent::MetadataArrived,
                Some(&info),
                &config(),
            );
            assert_eq!(next.year, 2024, "year {year}");
        }
    }

    #[test]
    fn in_range_year_is_kept() {
        let info = info([2005, 2024], &[]);
        for year in [2005, 2013, 2024] {
            let next = reduce(
                &selected(year, "", ""),
                SelectionEvent::MetadataArrived,
                Some(&info),
                &config(),
            );
            assert_eq!(next.year, year);
        }
    }

    #[test]
    fn empty_category_defaults_to_first_sorted() {
        let info = info([2005, 2024], &["Groundwater", "Rivers"]);
        let next = reduce(
            &selected(2030, "", ""),
            SelectionEvent::MetadataArrived,
            Some(&info),
            &config(),
        );
        assert_eq!(next.year, 2024);
        assert_eq!(next.category, "Rivers");
        assert!(next.entity.is_empty());
    }

    #[test]
    fn unknown_category_is_replaced_and_entity_cleared() {
        let info = info([2005, 2024], &["Groundwater", "Rivers"]);
        let next = reduce(
            &selected(2010, "Lakes", "Naroch"),
            SelectionEvent::MetadataArrived,
            Some(&info),
            &config(),
        );
        assert_eq!(next.category, "Rivers");
        assert!(next.entity.is_empty());
    }

    #[test]
    fn member_category_is_kept() {
        let info = info([2005, 2024], &["Groundwater", "Rivers"]);
        let next = reduce(
            &selected(2010, "Groundwater", "Well 12"),
            SelectionEvent::MetadataArrived,
            Some(&info),
            &config(),
        );
        assert_eq!(next.category, "Groundwater");
        assert_eq!(next.entity, "Well 12");
    }

    #[test]
    fn changing_category_clears_entity() {
        let info = info([2005, 2024], &["Groundwater", "Rivers"]);
        let next = reduce(
            &selected(2010, "Rivers", "Dnieper"),
            SelectionEvent::SetCategory("Groundwater".to_string()),
            Some(&info),
            &config(),
        );
        assert_eq!(next.category, "Groundwater");
        assert!(next.entity.is_empty());
    }

    #[test]
    fn same_category_keeps_entity() {
        let next = reduce(
            &selected(2010, "Rivers", "Dnieper"),
            SelectionEvent::SetCategory("Rivers".to_string()),
            None,
            &config(),
        );
        assert_eq!(next.entity, "Dnieper");
    }

    #[test]
    fn selecting_dataset_resets_downstream_and_ignores_old_metadata() {
        let old_info = info([1990, 2000], &["Groundwater"]);
        let mut state = selected(2010, "Rivers", "Dnieper");
        state.indicator = "Phosphates".to_string();
        state.active_section = Section::Table;

        let next = reduce(
            &state,
            SelectionEvent::SelectDataset(Dataset {
                filename: "C6-water-use.csv".to_string(),
                title: "Water use".to_string(),
            }),
            Some(&old_info),
            &config(),
        );
        assert_eq!(next.category, "");
        assert_eq!(next.entity, "");
        assert_eq!(next.indicator, "");
        assert_eq!(next.year, 2010);
        assert_eq!(next.active_section, Section::Forecast);

        let back = reduce(
            &next,
            SelectionEvent::SelectDataset(map_dataset()),
            None,
            &config(),
        );
        assert_eq!(back.active_section, Section::Map);
    }

    #[test]
    fn map_section_requires_spatial_dataset() {
        let mut state = selected(2010, "", "");
        state.dataset = Some(Dataset {
            filename: "C6-water-use.csv".to_string(),
            title: "Water use".to_string(),
        });
        state.active_section = Section::Forecast;
        let next = reduce(&state, SelectionEvent::SetSection(Section::Map), None, &config());
        assert_eq!(next.active_section, Section::Forecast);

        let next = reduce(&state, SelectionEvent::SetSection(Section::Table), None, &config());
        assert_eq!(next.active_section, Section::Table);
    }

    #[test]
    fn horizon_is_bounded() {
        let state = selected(2010, "", "");
        let next = reduce(&state, SelectionEvent::SetHorizon(0), None, &config());
        assert_eq!(next.horizon_years, 12);
        let next = reduce(&state, SelectionEvent::SetHorizon(99), None, &config());
        assert_eq!(next.horizon_years, 30);
    }

    #[test]
    fn visible_sections_drop_map_for_non_spatial() {
        assert_eq!(Section::visible(true).len(), 3);
        assert_eq!(
            Section::visible(false),
            vec![Section::Forecast, Section::Table]
        );
    }
}
