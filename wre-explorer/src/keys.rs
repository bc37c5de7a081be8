//! Derivation of query keys from the current selection.
//!
//! Keys are plain structural values: two selections that agree on every
//! field a query depends on produce equal keys, which is what lets the fetch
//! layer collapse duplicate requests. A `None` key means the query is not
//! eligible and must not be issued.

use crate::config::ExplorerConfig;
use crate::selection::SelectionState;
use serde::Serialize;
use std::fmt;
use wre_api::{DatasetInfo, ForecastRequest};

/// The downstream queries the explorer issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Metadata,
    Snapshot,
    Features,
    Shapes,
    Forecast,
}

impl QueryKind {
    pub const ALL: [QueryKind; 5] = [
        QueryKind::Metadata,
        QueryKind::Snapshot,
        QueryKind::Features,
        QueryKind::Shapes,
        QueryKind::Forecast,
    ];
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Metadata => "dataset metadata",
            QueryKind::Snapshot => "entity snapshot",
            QueryKind::Features => "water features",
            QueryKind::Shapes => "water shapes",
            QueryKind::Forecast => "forecast",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MetadataKey {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SnapshotKey {
    pub filename: String,
    pub year: i32,
    pub indicator: Option<String>,
    /// Only set for datasets with an explicit category dimension.
    pub category: Option<String>,
}

/// Key of the static per-category geometry queries (features and shapes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CategoryKey {
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ForecastKey {
    pub filename: String,
    pub entity: Option<String>,
    pub indicator: Option<String>,
    pub category: Option<String>,
    pub horizon: u32,
}

impl ForecastKey {
    pub fn request(&self) -> ForecastRequest {
        ForecastRequest {
            filename: self.filename.clone(),
            entity: self.entity.clone(),
            indicator: self.indicator.clone(),
            category: self.category.clone(),
            periods: self.horizon,
        }
    }
}

/// One key per downstream query; `None` when not eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryKeys {
    pub metadata: Option<MetadataKey>,
    pub snapshot: Option<SnapshotKey>,
    pub features: Option<CategoryKey>,
    pub shapes: Option<CategoryKey>,
    pub forecast: Option<ForecastKey>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub fn metadata_key(state: &SelectionState) -> Option<MetadataKey> {
    state.dataset.as_ref().map(|d| MetadataKey {
        filename: d.filename.clone(),
    })
}

/// Whether the dataset has a category dimension that survives filtering.
pub fn has_categories(info: &DatasetInfo, config: &ExplorerConfig) -> bool {
    !config.sort_categories(info.category_names()).is_empty()
}

/// Category used for spatial queries: the selected one when the dataset has
/// categories, otherwise the default for river-typed datasets.
pub fn effective_category(
    state: &SelectionState,
    info: Option<&DatasetInfo>,
    config: &ExplorerConfig,
) -> Option<String> {
    let info = info?;
    if has_categories(info, config) {
        non_empty(&state.category)
    } else if info.entity_type == config.river_entity_type {
        non_empty(&config.default_category)
    } else {
        None
    }
}

/// Category filter sent with snapshot and forecast requests.
fn request_category(
    state: &SelectionState,
    info: &DatasetInfo,
    config: &ExplorerConfig,
) -> Option<String> {
    if has_categories(info, config) {
        non_empty(&state.category)
    } else {
        None
    }
}

pub fn resolve(
    state: &SelectionState,
    info: Option<&DatasetInfo>,
    config: &ExplorerConfig,
) -> QueryKeys {
    let metadata = metadata_key(state);
    let (Some(dataset), Some(info)) = (state.dataset.as_ref(), info) else {
        return QueryKeys {
            metadata,
            ..QueryKeys::default()
        };
    };

    let spatial = config.supports_map(&dataset.filename);
    let category = request_category(state, info, config);
    let geometry = effective_category(state, Some(info), config)
        .filter(|_| spatial)
        .map(|category| CategoryKey { category });

    let snapshot = geometry.as_ref().map(|_| SnapshotKey {
        filename: dataset.filename.clone(),
        year: state.year,
        indicator: non_empty(&state.indicator),
        category: category.clone(),
    });

    let forecast = Some(ForecastKey {
        filename: dataset.filename.clone(),
        entity: non_empty(&state.entity),
        indicator: non_empty(&state.indicator),
        category,
        horizon: state.horizon_years,
    });

    QueryKeys {
        metadata,
        snapshot,
        features: geometry.clone(),
        shapes: geometry,
        forecast,
    }
}
