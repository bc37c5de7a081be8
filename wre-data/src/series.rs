//! Splicing of historical and forecast series at the last observed year.
//!
//! The backend returns a forecast that may overlap the historical range
//! (in-sample fit). Only points strictly after the last historical year are
//! treated as predictions, both on the chart and in the forecast table.

use serde::Serialize;
use wre_api::{ForecastPoint, HistoricalPoint};

/// Boundary year used when there is no historical data at all.
pub const FALLBACK_LAST_HISTORICAL_YEAR: i32 = 2024;

/// Marker radius for an ordinary chart point.
pub const MARKER_RADIUS: f64 = 4.0;
/// Marker radius for the point at the designated year.
pub const HIGHLIGHT_MARKER_RADIUS: f64 = 7.0;

/// Latest year with an observation, or the fallback for an empty series.
pub fn last_historical_year(historical: &[HistoricalPoint]) -> i32 {
    historical
        .iter()
        .map(|p| p.year)
        .max()
        .unwrap_or(FALLBACK_LAST_HISTORICAL_YEAR)
}

/// One year on the shared chart axis. Fields that belong to the other
/// sub-series stay empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    /// Set on the row of the designated (selected) year.
    pub highlighted: bool,
}

impl ChartRow {
    pub fn marker_radius(&self) -> f64 {
        if self.highlighted {
            HIGHLIGHT_MARKER_RADIUS
        } else {
            MARKER_RADIUS
        }
    }
}

/// A historical table row, value to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalRow {
    pub year: i32,
    pub value: String,
}

/// A forecast table row: `"{forecast:.2}"` and `"({lower:.1} - {upper:.1})"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub year: i32,
    pub forecast: String,
    pub bounds: String,
}

/// Historical and forecast data spliced at the last historical year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSeries {
    pub last_historical_year: i32,
    pub historical: Vec<HistoricalPoint>,
    /// Forecast points strictly after `last_historical_year`.
    pub future: Vec<ForecastPoint>,
    /// Sparse union of both sub-series, ordered by year.
    pub rows: Vec<ChartRow>,
}

impl MergedSeries {
    pub fn merge(historical: &[HistoricalPoint], forecast: &[ForecastPoint]) -> Self {
        let last_historical_year = last_historical_year(historical);

        let mut historical = historical.to_vec();
        historical.sort_by_key(|p| p.year);

        let mut future: Vec<ForecastPoint> = forecast
            .iter()
            .filter(|p| p.year > last_historical_year)
            .copied()
            .collect();
        future.sort_by_key(|p| p.year);

        let rows = historical
            .iter()
            .map(|p| ChartRow {
                year: p.year,
                value: Some(p.value),
                forecast: None,
                lower: None,
                upper: None,
                highlighted: false,
            })
            .chain(future.iter().map(|p| ChartRow {
                year: p.year,
                value: None,
                forecast: Some(p.forecast),
                lower: Some(p.lower),
                upper: Some(p.upper),
                highlighted: false,
            }))
            .collect();

        Self {
            last_historical_year,
            historical,
            future,
            rows,
        }
    }

    /// Flag the rows of `year` as the designated year.
    pub fn highlight(mut self, year: Option<i32>) -> Self {
        for row in &mut self.rows {
            row.highlighted = Some(row.year) == year;
        }
        self
    }

    /// Distinct years on the x axis, in order.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        years.dedup();
        years
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn historical_table(&self) -> Vec<HistoricalRow> {
        self.historical
            .iter()
            .map(|p| HistoricalRow {
                year: p.year,
                value: format!("{:.2}", p.value),
            })
            .collect()
    }

    pub fn forecast_table(&self) -> Vec<ForecastRow> {
        self.future
            .iter()
            .map(|p| ForecastRow {
                year: p.year,
                forecast: format!("{:.2}", p.forecast),
                bounds: format!("({:.1} - {:.1})", p.lower, p.upper),
            })
            .collect()
    }
}
