use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dataset offered by the backend, identified by its source filename.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub filename: String,
    pub title: String,
}

/// Body of `GET /api/datasets`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DatasetList {
    pub datasets: Vec<Dataset>,
}

/// Inclusive `(min, max)` year span, encoded as a two-element JSON array.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct YearRange(pub i32, pub i32);

impl YearRange {
    pub fn min(&self) -> i32 {
        self.0.min(self.1)
    }

    pub fn max(&self) -> i32 {
        self.0.max(self.1)
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min() && year <= self.max()
    }
}

/// Body of `GET /api/dataset/{filename}`: the structure of one dataset.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub has_entities: bool,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub indicators: Vec<String>,
    /// `None` when the dataset has no category dimension at all.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Entities per category, each list in backend order.
    #[serde(default)]
    pub category_entities: BTreeMap<String, Vec<String>>,
    pub year_range: YearRange,
}

impl DatasetInfo {
    /// Category names as reported, or an empty slice.
    pub fn category_names(&self) -> &[String] {
        self.categories.as_deref().unwrap_or(&[])
    }

    /// Entities listed under `category`, falling back to nothing.
    pub fn entities_in(&self, category: &str) -> &[String] {
        self.category_entities
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dataset_info_parses_full_body() {
        let body = json!({
            "filename": "C11-2005-2024.csv",
            "title": "Surface water quality",
            "has_entities": true,
            "entities": ["Dnieper", "Neman"],
            "entity_type": "river",
            "indicators": ["Ammonium nitrogen", "Phosphates"],
            "categories": ["Rivers", "Groundwater"],
            "category_entities": {"Rivers": ["Dnieper", "Neman"]},
            "year_range": [2005, 2024]
        });
        let info: DatasetInfo = serde_json::from_value(body).unwrap();
        assert_eq!(info.year_range, YearRange(2005, 2024));
        assert_eq!(info.category_names().len(), 2);
        assert_eq!(info.entities_in("Rivers"), ["Dnieper", "Neman"]);
        assert!(info.entities_in("Groundwater").is_empty());
    }

    #[test]
    fn dataset_info_tolerates_missing_optional_fields() {
        let body = json!({
            "entity_type": "region",
            "year_range": [1990, 2020]
        });
        let info: DatasetInfo = serde_json::from_value(body).unwrap();
        assert!(info.categories.is_none());
        assert!(info.category_names().is_empty());
        assert!(!info.has_entities);
    }

    #[test]
    fn year_range_bounds_are_ordered() {
        let range = YearRange(2024, 2005);
        assert_eq!(range.min(), 2005);
        assert_eq!(range.max(), 2024);
        assert!(range.contains(2010));
        assert!(!range.contains(2030));
    }
}
