//! HTTP client for the dataset backend.
//!
//! One method per endpoint. Filenames are percent-encoded as path segments;
//! optional filters are sent as query parameters only when present.

use crate::{
    DatasetInfo, DatasetList, EntitySnapshot, ForecastRequest, ForecastResult, GeoShapes,
    TimeSeries, WaterFeatures,
};
use anyhow::{anyhow, bail, Context};
use log::{debug, info, warn};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the base URL.
pub const API_URL_ENV: &str = "WRE_API_URL";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("API base URL cannot carry a path: {base_url}");
        }
        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    /// Build a client from `WRE_API_URL`, or the default local backend.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> anyhow::Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Bad response status for {}: {}", url, status);
            bail!("{} returned {}: {}", url, status, body.trim());
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode response from {url}"))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, Option<&str>)],
    ) -> anyhow::Result<T> {
        let url = self.endpoint(segments)?;
        let query: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (*name, v)))
            .collect();
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url.clone())
            .query(&query)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        Self::decode(&url, response).await
    }

    /// `GET /api/datasets`
    pub async fn get_datasets(&self) -> anyhow::Result<DatasetList> {
        let list: DatasetList = self.get(&["api", "datasets"], &[]).await?;
        info!("Backend offers {} datasets", list.datasets.len());
        Ok(list)
    }

    /// `GET /api/dataset/{filename}`
    pub async fn get_dataset_info(&self, filename: &str) -> anyhow::Result<DatasetInfo> {
        self.get(&["api", "dataset", filename], &[]).await
    }

    /// `GET /api/entity-data/{filename}/{year}`
    pub async fn get_entity_data(
        &self,
        filename: &str,
        year: i32,
        indicator: Option<&str>,
        category: Option<&str>,
    ) -> anyhow::Result<EntitySnapshot> {
        let year = year.to_string();
        self.get(
            &["api", "entity-data", filename, &year],
            &[("indicator", indicator), ("category", category)],
        )
        .await
    }

    /// `POST /api/forecast`
    pub async fn get_forecast(&self, request: &ForecastRequest) -> anyhow::Result<ForecastResult> {
        let url = self.endpoint(&["api", "forecast"])?;
        debug!("POST {} {:?}", url, request);
        let response = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        Self::decode(&url, response).await
    }

    /// `GET /api/water/features?category`
    pub async fn get_water_features(&self, category: &str) -> anyhow::Result<WaterFeatures> {
        self.get(&["api", "water", "features"], &[("category", Some(category))])
            .await
    }

    /// `GET /api/water/geojson?category`
    pub async fn get_water_geojson(&self, category: &str) -> anyhow::Result<GeoShapes> {
        self.get(&["api", "water", "geojson"], &[("category", Some(category))])
            .await
    }

    /// `GET /api/timeseries/{filename}`
    pub async fn get_time_series(
        &self,
        filename: &str,
        entity: Option<&str>,
        indicator: Option<&str>,
        category: Option<&str>,
    ) -> anyhow::Result<TimeSeries> {
        self.get(
            &["api", "timeseries", filename],
            &[
                ("entity", entity),
                ("indicator", indicator),
                ("category", category),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_filename_segment() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        let url = client
            .endpoint(&["api", "dataset", "water quality 2024.csv"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/dataset/water%20quality%202024.csv"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = ApiClient::new("http://example.org/backend/").unwrap();
        let url = client.endpoint(&["api", "datasets"]).unwrap();
        assert_eq!(url.as_str(), "http://example.org/backend/api/datasets");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("mailto:someone@example.org").is_err());
    }
}
