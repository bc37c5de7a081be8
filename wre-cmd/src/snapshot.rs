//! The map section rendered as CSV: one row per marker and per shape.

use crate::{catalog, output};
use anyhow::bail;
use log::{info, warn};
use serde::Serialize;
use wre_api::ApiClient;
use wre_data::value_map::MapLayer;
use wre_explorer::{Explorer, ExplorerConfig, FetchJob, Panel};

/// Selection overrides; anything left `None` keeps the corrected default.
#[derive(Debug, Default, Clone)]
pub struct SnapshotSelection {
    pub year: Option<i32>,
    pub category: Option<String>,
    pub indicator: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub kind: &'static str,
    pub name: String,
    pub value: Option<f64>,
    pub normalized: Option<f64>,
    pub color: String,
    pub weight: f64,
    pub fill_opacity: f64,
    pub radius: Option<f64>,
    pub popup: Option<String>,
}

pub fn snapshot_rows(layer: &MapLayer) -> Vec<SnapshotRow> {
    let markers = layer.markers.iter().map(|m| SnapshotRow {
        kind: "marker",
        name: m.name.clone(),
        value: m.value,
        normalized: m.normalized,
        color: m.style.color.clone(),
        weight: m.style.weight,
        fill_opacity: m.style.fill_opacity,
        radius: Some(m.style.radius),
        popup: m.popup.clone(),
    });
    let shapes = layer.shapes.iter().map(|s| SnapshotRow {
        kind: "shape",
        name: s.name.clone(),
        value: s.value,
        normalized: s.normalized,
        color: s.style.color.clone(),
        weight: s.style.weight,
        fill_opacity: s.style.fill_opacity,
        radius: None,
        popup: s.popup.clone(),
    });
    markers.chain(shapes).collect()
}

/// Apply `selection` on top of the defaults the dataset metadata produced.
pub fn apply_selection(explorer: &mut Explorer, selection: SnapshotSelection) -> Vec<FetchJob> {
    let mut jobs = Vec::new();
    if let Some(category) = selection.category {
        jobs.extend(explorer.set_category(category));
    }
    if let Some(indicator) = selection.indicator {
        jobs.extend(explorer.set_indicator(indicator));
    }
    if let Some(year) = selection.year {
        jobs.extend(explorer.set_year(year));
    }
    jobs
}

pub async fn run_snapshot(
    client: &ApiClient,
    config: ExplorerConfig,
    filename: &str,
    selection: SnapshotSelection,
    output_path: Option<&str>,
) -> anyhow::Result<()> {
    if !config.supports_map(filename) {
        bail!("{} has no spatial data to map", filename);
    }
    let dataset = catalog::find_dataset(client, filename).await?;
    let requested_category = selection.category.clone();
    let requested_year = selection.year;

    let mut explorer = Explorer::new(config);
    let jobs = explorer.select_dataset(dataset);
    explorer.settle(client, jobs).await;
    if let Some(issue) = explorer.view().metadata_issue {
        bail!("{}", issue);
    }

    let jobs = apply_selection(&mut explorer, selection);
    explorer.settle(client, jobs).await;

    let state = explorer.state();
    if let Some(category) = requested_category.filter(|c| *c != state.category) {
        warn!("Category {} is not available; using {}", category, state.category);
    }
    if let Some(year) = requested_year.filter(|y| *y != state.year) {
        warn!("Year {} is out of range; using {}", year, state.year);
    }

    let view = explorer.map_view();
    for warning in &view.warnings {
        warn!("{}", warning);
    }
    match &view.layer {
        Panel::Ready(layer) => {
            info!(
                "{} ({}): {} of {} markers carry a value",
                view.title,
                view.year,
                layer.valued_markers(),
                layer.markers.len()
            );
            output::emit(output_path, &snapshot_rows(layer))
        }
        Panel::Unavailable(issue) => bail!("{}", issue),
        Panel::Loading => bail!("{} did not finish loading", view.title),
    }
}
