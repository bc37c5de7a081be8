//! [`Backend`] over the HTTP client.

use crate::keys::{CategoryKey, ForecastKey, MetadataKey, SnapshotKey};
use crate::orchestrator::Backend;
use wre_api::{ApiClient, DatasetInfo, EntitySnapshot, ForecastResult, GeoShapes, WaterFeatures};

impl Backend for ApiClient {
    async fn dataset_info(&self, key: &MetadataKey) -> anyhow::Result<DatasetInfo> {
        self.get_dataset_info(&key.filename).await
    }

    async fn entity_snapshot(&self, key: &SnapshotKey) -> anyhow::Result<EntitySnapshot> {
        self.get_entity_data(
            &key.filename,
            key.year,
            key.indicator.as_deref(),
            key.category.as_deref(),
        )
        .await
    }

    async fn water_features(&self, key: &CategoryKey) -> anyhow::Result<WaterFeatures> {
        self.get_water_features(&key.category).await
    }

    async fn water_shapes(&self, key: &CategoryKey) -> anyhow::Result<GeoShapes> {
        self.get_water_geojson(&key.category).await
    }

    async fn forecast(&self, key: &ForecastKey) -> anyhow::Result<ForecastResult> {
        self.get_forecast(&key.request()).await
    }
}
