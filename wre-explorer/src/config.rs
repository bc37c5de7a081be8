//! Explorer configuration.
//!
//! Every field has a default matching the production backend, so an empty
//! JSON object (or no file at all) is a valid configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wre_data::value_map::CategoryKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Backend base URL.
    pub api_url: String,
    /// Datasets whose entities can be drawn on the map.
    pub map_datasets: Vec<String>,
    /// Categories listed first, in this order; the rest follow alphabetically.
    pub category_order: Vec<String>,
    /// Categories never offered for selection.
    pub hidden_categories: Vec<String>,
    /// Categories drawn as filled polygons instead of lines.
    pub area_categories: Vec<String>,
    /// `entity_type` of datasets that implicitly belong to `default_category`.
    pub river_entity_type: String,
    /// Effective category of river-typed datasets without a category dimension.
    pub default_category: String,
    /// Year selected before any metadata is known.
    pub default_year: i32,
    pub default_horizon: u32,
    pub min_horizon: u32,
    pub max_horizon: u32,
    /// Indicator names longer than this are elided in titles and selectors.
    pub indicator_label_limit: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            map_datasets: vec!["C11-2005-2024.csv".to_string()],
            category_order: vec!["Rivers".to_string(), "Groundwater".to_string()],
            hidden_categories: vec!["Lakes".to_string()],
            area_categories: vec!["Lakes".to_string()],
            river_entity_type: "river".to_string(),
            default_category: "Rivers".to_string(),
            default_year: 2024,
            default_horizon: 12,
            min_horizon: 1,
            max_horizon: 30,
            indicator_label_limit: 50,
        }
    }
}

impl ExplorerConfig {
    /// Load a JSON config file; missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn supports_map(&self, filename: &str) -> bool {
        self.map_datasets.iter().any(|f| f == filename)
    }

    pub fn category_kind(&self, category: &str) -> CategoryKind {
        if self.area_categories.iter().any(|c| c == category) {
            CategoryKind::Area
        } else {
            CategoryKind::Line
        }
    }

    /// Visible categories: hidden ones removed, preferred ones first, then
    /// alphabetical. Duplicates are dropped.
    pub fn sort_categories(&self, categories: &[String]) -> Vec<String> {
        let rank = |c: &String| {
            self.category_order
                .iter()
                .position(|p| p == c)
                .unwrap_or(self.category_order.len())
        };
        let mut sorted: Vec<String> = categories
            .iter()
            .filter(|c| !self.hidden_categories.contains(*c))
            .cloned()
            .collect();
        sorted.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));
        sorted.dedup();
        sorted
    }

    /// `0` means "unset" and falls back to the default horizon.
    pub fn clamp_horizon(&self, years: u32) -> u32 {
        if years == 0 {
            self.default_horizon
        } else {
            years.clamp(self.min_horizon, self.max_horizon)
        }
    }
}
