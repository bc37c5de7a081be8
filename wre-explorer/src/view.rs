//! Read-only view models derived from an [`Explorer`].
//!
//! Views are recomputed from scratch on every render; none of them hold
//! state of their own.

use crate::cache::QueryState;
use crate::error::ExplorerIssue;
use crate::explorer::Explorer;
use crate::keys::{self, QueryKind};
use crate::selection::Section;
use serde::Serialize;
use std::rc::Rc;
use wre_api::{DatasetInfo, YearRange};
use wre_data::elide;
use wre_data::series::MergedSeries;
use wre_data::value_map::MapLayer;

/// Content of one view section.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Loading,
    Unavailable(ExplorerIssue),
    Ready(T),
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn issue(&self) -> Option<&ExplorerIssue> {
        match self {
            Panel::Unavailable(issue) => Some(issue),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Panel::Loading)
    }

    fn blocked(reason: Blocked) -> Self {
        match reason {
            None => Panel::Loading,
            Some(issue) => Panel::Unavailable(issue),
        }
    }
}

/// `None` while loading, otherwise the issue that blocks the section.
type Blocked = Option<ExplorerIssue>;

fn require<V>(kind: QueryKind, state: QueryState<V>) -> Result<Rc<V>, Blocked> {
    match state {
        QueryState::Ready(value) => Ok(value),
        QueryState::Pending => Err(None),
        QueryState::Absent => Err(Some(ExplorerIssue::QueryIneligible(kind))),
        QueryState::Failed(error) => Err(Some(ExplorerIssue::FetchFailure { kind, error })),
    }
}

/// An indicator as offered in the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorOption {
    pub value: String,
    pub label: String,
}

/// Everything the side panel and section tabs show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerView {
    /// Metadata for the selected dataset is still loading.
    pub loading: bool,
    pub dataset_title: Option<String>,
    pub year: i32,
    pub year_range: Option<YearRange>,
    /// `"min - max"` of the data period.
    pub period: Option<String>,
    pub entity_type: Option<String>,
    pub sections: Vec<Section>,
    pub active_section: Section,
    pub categories: Vec<String>,
    pub category: String,
    pub effective_category: Option<String>,
    pub has_entities: bool,
    pub entities: Vec<String>,
    pub total_entities: usize,
    pub entity: String,
    pub indicators: Vec<IndicatorOption>,
    pub indicator: String,
    pub chart_title: String,
    pub horizon_years: u32,
    #[serde(skip)]
    pub metadata_issue: Option<ExplorerIssue>,
}

/// The map section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub title: String,
    pub year: i32,
    pub layer: Panel<MapLayer>,
    /// Non-blocking notices shown above the map.
    pub warnings: Vec<ExplorerIssue>,
}

impl MapView {
    pub fn has_values(&self) -> bool {
        self.layer.ready().is_some_and(MapLayer::has_values)
    }

    pub fn can_render_map(&self) -> bool {
        self.layer.ready().is_some()
    }

    pub fn year_mismatch(&self) -> Option<&ExplorerIssue> {
        self.warnings
            .iter()
            .find(|w| matches!(w, ExplorerIssue::YearMismatch { .. }))
    }
}

/// The forecast chart and the data tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub title: String,
    pub selected_year: i32,
    pub method: Option<String>,
    pub series: Panel<MergedSeries>,
}

impl Explorer {
    pub fn view(&self) -> ExplorerView {
        let config = self.config();
        let state = self.state();
        let metadata_state = self.metadata_state();
        let info = metadata_state.ready().map(|rc| &**rc);
        let supports_map = state.supports_map(config);

        let categories = info
            .map(|i| config.sort_categories(i.category_names()))
            .unwrap_or_default();
        let has_categories = !categories.is_empty();

        let entities = info
            .map(|i| available_entities(i, has_categories, &state.category))
            .unwrap_or_default();
        let total_entities = match (entities.len(), info) {
            (0, Some(i)) => i.entities.len(),
            (n, _) => n,
        };

        let indicators = info
            .map(|i| {
                i.indicators
                    .iter()
                    .map(|value| IndicatorOption {
                        value: value.clone(),
                        label: elide(value, config.indicator_label_limit),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let dataset_title = state.dataset.as_ref().map(|d| d.title.clone());
        let shown_category = if has_categories {
            state.category.as_str()
        } else {
            ""
        };
        let indicator_label = elide(&state.indicator, config.indicator_label_limit);
        let chart_title = [
            dataset_title.as_deref().unwrap_or(""),
            shown_category,
            state.entity.as_str(),
            indicator_label.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

        let metadata_issue = metadata_state.error().map(|error| ExplorerIssue::FetchFailure {
            kind: QueryKind::Metadata,
            error: error.clone(),
        });

        ExplorerView {
            loading: metadata_state.is_pending(),
            dataset_title,
            year: state.year,
            year_range: info.map(|i| i.year_range),
            period: info.map(|i| format!("{} - {}", i.year_range.min(), i.year_range.max())),
            entity_type: info.map(|i| i.entity_type.clone()),
            sections: Section::visible(supports_map),
            active_section: state.active_section,
            categories,
            category: state.category.clone(),
            effective_category: keys::effective_category(state, info, config),
            has_entities: info.is_some_and(|i| i.has_entities),
            entities,
            total_entities,
            entity: state.entity.clone(),
            indicators,
            indicator: state.indicator.clone(),
            chart_title,
            horizon_years: state.horizon_years,
            metadata_issue,
        }
    }

    pub fn map_view(&self) -> MapView {
        let config = self.config();
        let state = self.state();
        let info = self.metadata();
        let category = keys::effective_category(state, info.as_deref(), config);

        let mut warnings = Vec::new();
        let layer = self.map_layer(category.as_deref(), &mut warnings);

        MapView {
            title: match &category {
                Some(category) => format!("Map - {category}"),
                None => "Map".to_string(),
            },
            year: state.year,
            layer: layer.map_or_else(Panel::blocked, Panel::Ready),
            warnings,
        }
    }

    fn map_layer(
        &self,
        category: Option<&str>,
        warnings: &mut Vec<ExplorerIssue>,
    ) -> Result<MapLayer, Blocked> {
        let config = self.config();
        let state = self.state();
        require(QueryKind::Metadata, self.metadata_state())?;
        if !state.supports_map(config) {
            return Err(Some(ExplorerIssue::QueryIneligible(QueryKind::Snapshot)));
        }
        let snapshot = require(QueryKind::Snapshot, self.orchestrator().snapshot())?;
        let features = require(QueryKind::Features, self.orchestrator().features())?;
        let shapes = require(QueryKind::Shapes, self.orchestrator().shapes())?;

        let requested = snapshot.requested_year.unwrap_or(state.year);
        if let Some(resolved) = snapshot.year.filter(|y| *y != requested) {
            warnings.push(ExplorerIssue::YearMismatch {
                requested,
                resolved,
            });
        }
        if !snapshot.has_values() {
            warnings.push(ExplorerIssue::EmptyValues);
        }

        let kind = config.category_kind(category.unwrap_or_default());
        let title = state.dataset.as_ref().map_or("", |d| d.title.as_str());
        Ok(MapLayer::build(
            &features.features,
            &shapes,
            &snapshot.entities,
            kind,
            title,
        ))
    }

    pub fn forecast_view(&self) -> ForecastView {
        let state = self.state();
        let forecast = require(QueryKind::Metadata, self.metadata_state())
            .and_then(|_| require(QueryKind::Forecast, self.orchestrator().forecast()));

        let method = forecast
            .as_ref()
            .ok()
            .map(|r| r.method.clone())
            .filter(|m| !m.is_empty());
        let series = forecast.map(|result| {
            MergedSeries::merge(&result.historical, &result.forecast).highlight(Some(state.year))
        });

        ForecastView {
            title: self.view().chart_title,
            selected_year: state.year,
            method,
            series: series.map_or_else(Panel::blocked, Panel::Ready),
        }
    }
}

fn available_entities(info: &DatasetInfo, has_categories: bool, category: &str) -> Vec<String> {
    if has_categories {
        info.entities_in(category).to_vec()
    } else {
        info.entities.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::error::FetchError;
    use crate::orchestrator::{FetchJob, FetchOutcome};
    use serde_json::json;
    use wre_api::{Dataset, EntitySnapshot, ForecastResult, GeoShapes, WaterFeatures};

    const LONG_INDICATOR: &str =
        "Biochemical oxygen demand over five days in milligrams of oxygen per litre";

    fn info() -> DatasetInfo {
        serde_json::from_value(json!({
            "entity_type": "station",
            "has_entities": true,
            "entities": ["Dnieper", "Sozh", "Well 12"],
            "indicators": ["Phosphates", LONG_INDICATOR],
            "categories": ["Groundwater", "Rivers"],
            "category_entities": {"Rivers": ["Dnieper", "Sozh"]},
            "year_range": [2005, 2024]
        }))
        .unwrap()
    }

    fn explorer_with_metadata() -> (Explorer, Vec<FetchJob>) {
        let mut explorer = Explorer::new(ExplorerConfig::default());
        let jobs = explorer.select_dataset(Dataset {
            filename: "C11-2005-2024.csv".to_string(),
            title: "Surface water quality".to_string(),
        });
        let FetchJob::Metadata(ticket) = jobs[0].clone() else {
            panic!("expected metadata job");
        };
        let jobs = explorer.apply(FetchOutcome::Metadata(ticket, Ok(info())));
        (explorer, jobs)
    }

    fn complete_all(explorer: &mut Explorer, jobs: Vec<FetchJob>, snapshot: EntitySnapshot) {
        for job in jobs {
            let outcome = match job {
                FetchJob::Metadata(t) => FetchOutcome::Metadata(t, Ok(info())),
                FetchJob::Snapshot(t) => FetchOutcome::Snapshot(t, Ok(snapshot.clone())),
                FetchJob::Features(t) => FetchOutcome::Features(
                    t,
                    Ok(serde_json::from_value(json!({
                        "features": [{"name": "Dnieper", "lat": 53.9, "lon": 30.3, "color": "#1f77b4"}]
                    }))
                    .unwrap()),
                ),
                FetchJob::Shapes(t) => FetchOutcome::Shapes(t, Ok(GeoShapes::default())),
                FetchJob::Forecast(t) => FetchOutcome::Forecast(
                    t,
                    Err(FetchError("Not enough data to build forecast".to_string())),
                ),
            };
            explorer.apply(outcome);
        }
    }

    #[test]
    fn loading_before_metadata() {
        let mut explorer = Explorer::new(ExplorerConfig::default());
        explorer.select_dataset(Dataset {
            filename: "C11-2005-2024.csv".to_string(),
            title: "Surface water quality".to_string(),
        });
        let view = explorer.view();
        assert!(view.loading);
        assert!(view.categories.is_empty());
        assert!(explorer.map_view().layer.is_loading());
        assert!(explorer.forecast_view().series.is_loading());
    }

    #[test]
    fn side_panel_after_metadata() {
        let (explorer, _) = explorer_with_metadata();
        let view = explorer.view();
        assert!(!view.loading);
        assert_eq!(view.categories, vec!["Rivers", "Groundwater"]);
        assert_eq!(view.category, "Rivers");
        assert_eq!(view.effective_category.as_deref(), Some("Rivers"));
        assert_eq!(view.entities, vec!["Dnieper", "Sozh"]);
        assert_eq!(view.total_entities, 2);
        assert_eq!(view.period.as_deref(), Some("2005 - 2024"));
        assert_eq!(view.sections, Section::ALL.to_vec());
        assert_eq!(view.indicators[1].label.chars().count(), 53);
        assert!(view.indicators[1].label.ends_with("..."));
        assert_eq!(view.chart_title, "Surface water quality | Rivers");
    }

    #[test]
    fn total_entities_falls_back_to_dataset_list() {
        let (mut explorer, _) = explorer_with_metadata();
        explorer.set_category("Groundwater");
        let view = explorer.view();
        assert!(view.entities.is_empty());
        assert_eq!(view.total_entities, 3);
    }

    #[test]
    fn chart_title_elides_long_indicator() {
        let (mut explorer, _) = explorer_with_metadata();
        explorer.set_entity("Sozh");
        explorer.set_indicator(LONG_INDICATOR);
        let title = explorer.view().chart_title;
        let expected = format!(
            "Surface water quality | Rivers | Sozh | {}...",
            &LONG_INDICATOR[..50]
        );
        assert_eq!(title, expected);
    }

    #[test]
    fn map_surfaces_year_mismatch_and_forecast_failure() {
        let (mut explorer, jobs) = explorer_with_metadata();
        let snapshot = EntitySnapshot {
            entities: [("Dnieper".to_string(), Some(4.2))].into_iter().collect(),
            year: Some(2023),
            requested_year: Some(2024),
            entity_type: "river".to_string(),
            categories: None,
        };
        complete_all(&mut explorer, jobs, snapshot);

        let map = explorer.map_view();
        assert_eq!(map.title, "Map - Rivers");
        assert!(map.can_render_map());
        assert!(map.has_values());
        let layer = map.layer.ready().unwrap();
        assert_eq!(
            layer.markers[0].popup.as_deref(),
            Some("Surface water quality: 4.200")
        );
        assert_eq!(
            map.year_mismatch().map(ToString::to_string).as_deref(),
            Some("No data for 2024. Showing values for 2023.")
        );

        let forecast = explorer.forecast_view();
        let issue = forecast.series.issue().unwrap();
        assert!(issue.is_blocking());
        assert!(issue.to_string().starts_with("Insufficient data for forecast"));
    }

    #[test]
    fn empty_snapshot_is_flagged() {
        let (mut explorer, jobs) = explorer_with_metadata();
        let snapshot = EntitySnapshot {
            year: Some(2024),
            requested_year: Some(2024),
            ..EntitySnapshot::default()
        };
        complete_all(&mut explorer, jobs, snapshot);
        let map = explorer.map_view();
        assert!(map.can_render_map());
        assert!(!map.has_values());
        assert_eq!(map.warnings, vec![ExplorerIssue::EmptyValues]);
    }

    #[test]
    fn forecast_series_is_merged_and_highlighted() {
        let (mut explorer, jobs) = explorer_with_metadata();
        explorer.set_year(2023);
        let ticket = jobs
            .into_iter()
            .find_map(|job| match job {
                FetchJob::Forecast(ticket) => Some(ticket),
                _ => None,
            })
            .unwrap();
        let result: ForecastResult = serde_json::from_value(json!({
            "historical": [
                {"year": 2020, "value": 1.0},
                {"year": 2021, "value": 2.0},
                {"year": 2022, "value": 3.0}
            ],
            "forecast": [
                {"year": 2021, "forecast": 2.1, "lower": 1.0, "upper": 3.0},
                {"year": 2023, "forecast": 4.0, "lower": 3.0, "upper": 5.0},
                {"year": 2024, "forecast": 5.0, "lower": 3.5, "upper": 6.5}
            ],
            "method": "linear"
        }))
        .unwrap();
        explorer.apply(FetchOutcome::Forecast(ticket, Ok(result)));

        let view = explorer.forecast_view();
        assert_eq!(view.method.as_deref(), Some("linear"));
        let series = view.series.ready().unwrap();
        assert_eq!(series.years(), vec![2020, 2021, 2022, 2023, 2024]);
        let highlighted: Vec<i32> = series
            .rows
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.year)
            .collect();
        assert_eq!(highlighted, vec![2023]);
    }

    #[test]
    fn non_spatial_dataset_has_no_map() {
        let mut explorer = Explorer::new(ExplorerConfig::default());
        let jobs = explorer.select_dataset(Dataset {
            filename: "C6-water-use.csv".to_string(),
            title: "Water use".to_string(),
        });
        let FetchJob::Metadata(ticket) = jobs[0].clone() else {
            panic!("expected metadata job");
        };
        let metadata: DatasetInfo = serde_json::from_value(json!({
            "entity_type": "region",
            "has_entities": true,
            "entities": ["Minsk", "Brest"],
            "year_range": [2010, 2020]
        }))
        .unwrap();
        explorer.apply(FetchOutcome::Metadata(ticket, Ok(metadata)));

        let view = explorer.view();
        assert_eq!(view.sections, vec![Section::Forecast, Section::Table]);
        assert_eq!(view.entities, vec!["Minsk", "Brest"]);
        assert_eq!(view.effective_category, None);
        assert_eq!(
            explorer.map_view().layer.issue(),
            Some(&ExplorerIssue::QueryIneligible(QueryKind::Snapshot))
        );
    }
}
