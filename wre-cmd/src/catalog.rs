//! Dataset listing and dataset structure.

use crate::output;
use log::info;
use serde::Serialize;
use wre_api::{ApiClient, Dataset, DatasetInfo};
use wre_explorer::{keys, ExplorerConfig};

/// Look `filename` up in the backend's dataset list. Unknown filenames are
/// still accepted and titled by their filename.
pub async fn find_dataset(client: &ApiClient, filename: &str) -> anyhow::Result<Dataset> {
    let list = client.get_datasets().await?;
    Ok(list
        .datasets
        .into_iter()
        .find(|d| d.filename == filename)
        .unwrap_or_else(|| {
            log::warn!("{} is not in the dataset list", filename);
            Dataset {
                filename: filename.to_string(),
                title: filename.to_string(),
            }
        }))
}

pub async fn run_datasets(client: &ApiClient) -> anyhow::Result<()> {
    let list = client.get_datasets().await?;
    output::emit(None, &list.datasets)
}

#[derive(Debug, PartialEq, Serialize)]
struct InfoRow {
    field: &'static str,
    value: String,
}

fn info_rows(info: &DatasetInfo, config: &ExplorerConfig) -> Vec<InfoRow> {
    let mut rows = vec![
        InfoRow {
            field: "title",
            value: info.title.clone().unwrap_or_default(),
        },
        InfoRow {
            field: "entity_type",
            value: info.entity_type.clone(),
        },
        InfoRow {
            field: "years",
            value: format!("{}-{}", info.year_range.min(), info.year_range.max()),
        },
        InfoRow {
            field: "entities",
            value: info.entities.len().to_string(),
        },
        InfoRow {
            field: "indicators",
            value: info.indicators.join("; "),
        },
    ];

    if keys::has_categories(info, config) {
        for category in config.sort_categories(info.category_names()) {
            rows.push(InfoRow {
                field: "category",
                value: format!("{} ({} entities)", category, info.entities_in(&category).len()),
            });
        }
    }
    rows
}

pub async fn run_info(
    client: &ApiClient,
    config: &ExplorerConfig,
    filename: &str,
) -> anyhow::Result<()> {
    let info = client.get_dataset_info(filename).await?;
    info!(
        "{}: {} {} over {}-{}",
        filename,
        info.entities.len(),
        info.entity_type,
        info.year_range.min(),
        info.year_range.max()
    );
    output::emit(None, &info_rows(&info, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_lists_visible_categories_in_display_order() {
        let info: DatasetInfo = serde_json::from_value(json!({
            "title": "Water bodies",
            "entity_type": "Water body",
            "has_entities": true,
            "entities": ["Neman", "Naroch", "Pripyat"],
            "indicators": ["Ammonium", "Nitrates"],
            "categories": ["Lakes", "Rivers"],
            "category_entities": {
                "Rivers": ["Neman", "Pripyat"],
                "Lakes": ["Naroch"]
            },
            "year_range": [2005, 2024]
        }))
        .unwrap();

        let config = ExplorerConfig {
            hidden_categories: Vec::new(),
            ..ExplorerConfig::default()
        };
        let rows = info_rows(&info, &config);
        let categories: Vec<&str> = rows
            .iter()
            .filter(|r| r.field == "category")
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(categories, ["Rivers (2 entities)", "Lakes (1 entities)"]);

        let rows = info_rows(&info, &ExplorerConfig::default());
        assert_eq!(
            rows.iter().filter(|r| r.field == "category").count(),
            1,
            "Lakes is hidden by default"
        );
        assert_eq!(rows[2].value, "2005-2024");
        assert_eq!(rows[4].value, "Ammonium; Nitrates");
    }
}
