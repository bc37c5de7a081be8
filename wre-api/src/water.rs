use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named water body shown as a point marker on the map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct WaterFeature {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Static CSS color assigned by the backend.
    pub color: String,
}

/// Body of `GET /api/water/features`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct WaterFeatures {
    /// Category the backend actually resolved the request to.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub features: Vec<WaterFeature>,
}

/// Body of `GET /api/water/geojson`: an opaque GeoJSON payload.
///
/// Geometry is passed through to the map renderer untouched; only the
/// feature names are read on the Rust side, to match shapes against values.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoShapes(pub Value);

/// Name and geometry kind of one GeoJSON feature.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ShapeFeature {
    pub name: Option<String>,
    pub geometry_type: Option<String>,
}

impl GeoShapes {
    /// Features of a `FeatureCollection`, or a lone `Feature`.
    pub fn features(&self) -> Vec<ShapeFeature> {
        let raw: Vec<&Value> = match self.0.get("features").and_then(Value::as_array) {
            Some(features) => features.iter().collect(),
            None if self.0.get("type").and_then(Value::as_str) == Some("Feature") => {
                vec![&self.0]
            }
            None => Vec::new(),
        };
        raw.into_iter()
            .map(|feature| ShapeFeature {
                name: feature
                    .pointer("/properties/name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                geometry_type: feature
                    .pointer("/geometry/type")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }

    /// Names of all features that carry one.
    pub fn feature_names(&self) -> Vec<String> {
        self.features().into_iter().filter_map(|f| f.name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.features().is_empty()
    }
}
