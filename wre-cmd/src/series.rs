//! Forecast and history commands.

use crate::{catalog, output};
use anyhow::bail;
use log::{info, warn};
use serde::Serialize;
use wre_api::{ApiClient, HistoricalPoint};
use wre_data::series::MergedSeries;
use wre_explorer::{Explorer, ExplorerConfig, FetchJob, Panel, Section};

/// Selection overrides; anything left `None` keeps the corrected default.
#[derive(Debug, Default, Clone)]
pub struct ForecastSelection {
    pub entity: Option<String>,
    pub indicator: Option<String>,
    pub category: Option<String>,
    pub horizon: Option<u32>,
    pub year: Option<i32>,
}

/// One year of the spliced chart series.
#[derive(Debug, PartialEq, Serialize)]
pub struct SeriesRow {
    pub year: i32,
    pub value: Option<f64>,
    pub forecast: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub selected: bool,
}

/// One line of the historical and forecast tables, stacked.
#[derive(Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub year: i32,
    pub kind: &'static str,
    pub value: String,
    pub bounds: String,
}

pub fn series_rows(series: &MergedSeries) -> Vec<SeriesRow> {
    series
        .rows
        .iter()
        .map(|row| SeriesRow {
            year: row.year,
            value: row.value,
            forecast: row.forecast,
            lower: row.lower,
            upper: row.upper,
            selected: row.highlighted,
        })
        .collect()
}

pub fn table_rows(series: &MergedSeries) -> Vec<TableRow> {
    let historical = series.historical_table().into_iter().map(|row| TableRow {
        year: row.year,
        kind: "historical",
        value: row.value,
        bounds: String::new(),
    });
    let forecast = series.forecast_table().into_iter().map(|row| TableRow {
        year: row.year,
        kind: "forecast",
        value: row.forecast,
        bounds: row.bounds,
    });
    historical.chain(forecast).collect()
}

/// Apply `selection` in dependency order: category before entity, since
/// changing the category resets the entity.
pub fn apply_selection(explorer: &mut Explorer, selection: ForecastSelection) -> Vec<FetchJob> {
    let mut jobs = explorer.set_section(Section::Forecast);
    if let Some(category) = selection.category {
        jobs.extend(explorer.set_category(category));
    }
    if let Some(entity) = selection.entity {
        jobs.extend(explorer.set_entity(entity));
    }
    if let Some(indicator) = selection.indicator {
        jobs.extend(explorer.set_indicator(indicator));
    }
    if let Some(horizon) = selection.horizon {
        jobs.extend(explorer.set_horizon(horizon));
    }
    if let Some(year) = selection.year {
        jobs.extend(explorer.set_year(year));
    }
    jobs
}

pub async fn run_forecast(
    client: &ApiClient,
    config: ExplorerConfig,
    filename: &str,
    selection: ForecastSelection,
    output_path: Option<&str>,
    table: bool,
) -> anyhow::Result<()> {
    let dataset = catalog::find_dataset(client, filename).await?;
    let requested_horizon = selection.horizon;

    let mut explorer = Explorer::new(config);
    let jobs = explorer.select_dataset(dataset);
    explorer.settle(client, jobs).await;
    if let Some(issue) = explorer.view().metadata_issue {
        bail!("{}", issue);
    }

    let jobs = apply_selection(&mut explorer, selection);
    explorer.settle(client, jobs).await;

    let horizon = explorer.state().horizon_years;
    if let Some(requested) = requested_horizon.filter(|h| *h != horizon) {
        warn!("Horizon {} clamped to {} years", requested, horizon);
    }

    let view = explorer.forecast_view();
    let series = match &view.series {
        Panel::Ready(series) => series,
        Panel::Unavailable(issue) => bail!("{}", issue),
        Panel::Loading => bail!("{} did not finish loading", view.title),
    };
    if series.is_empty() {
        bail!("Insufficient data to build a forecast for {}", view.title);
    }
    info!(
        "{}: {} historical years, {} forecast years ({})",
        view.title,
        series.historical.len(),
        series.future.len(),
        view.method.as_deref().unwrap_or("unknown method")
    );

    if table {
        output::emit(output_path, &table_rows(series))
    } else {
        output::emit(output_path, &series_rows(series))
    }
}

pub async fn run_history(
    client: &ApiClient,
    filename: &str,
    entity: Option<&str>,
    indicator: Option<&str>,
    category: Option<&str>,
    output_path: Option<&str>,
) -> anyhow::Result<()> {
    let mut series = client
        .get_time_series(filename, entity, indicator, category)
        .await?;
    series.data.sort_by_key(|p| p.year);
    info!("{}: {} years of history", filename, series.data.len());
    output::emit::<HistoricalPoint>(output_path, &series.data)
}
