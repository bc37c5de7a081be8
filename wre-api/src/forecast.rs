use serde::{Deserialize, Serialize};

/// Body of `POST /api/forecast`.
///
/// Absent filters are omitted from the JSON so the backend aggregates or
/// picks its own default.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Number of years to forecast.
    pub periods: u32,
}

/// An observed `(year, value)` pair.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub year: i32,
    pub value: f64,
}

/// A predicted value with its confidence band.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub forecast: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Body returned by `POST /api/forecast`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResult {
    #[serde(default)]
    pub historical: Vec<HistoricalPoint>,
    #[serde(default)]
    pub forecast: Vec<ForecastPoint>,
    /// Name of the model the backend chose.
    #[serde(default)]
    pub method: String,
}

/// Body of `GET /api/timeseries/{filename}`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(default)]
    pub data: Vec<HistoricalPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn forecast_request_omits_absent_filters() {
        let request = ForecastRequest {
            filename: "C11-2005-2024.csv".to_string(),
            entity: None,
            indicator: Some("Phosphates".to_string()),
            category: None,
            periods: 12,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"filename": "C11-2005-2024.csv", "indicator": "Phosphates", "periods": 12})
        );
    }

    #[test]
    fn forecast_result_parses_backend_body() {
        let body = json!({
            "historical": [{"year": 2020, "value": 1.0}, {"year": 2021, "value": 2.0}],
            "forecast": [{"year": 2022, "forecast": 3.0, "lower": 2.5, "upper": 3.5}],
            "method": "polynomial"
        });
        let result: ForecastResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.historical.len(), 2);
        assert_eq!(result.forecast[0].upper, 3.5);
        assert_eq!(result.method, "polynomial");
    }
}
