//! Mapping of sparse entity values onto static map features.
//!
//! Values only drive intensity (line weight, fill opacity); a feature's color
//! is always its static assigned color. Features without a finite value are
//! drawn in a neutral grey so they stay visible but clearly unvalued.

use serde::Serialize;
use std::collections::BTreeMap;
use wre_api::{GeoShapes, WaterFeature};

/// Stroke color of a shape that has no value.
pub const UNVALUED_SHAPE_COLOR: &str = "#cccccc";
/// Marker color of a point feature that has no value.
pub const UNVALUED_MARKER_COLOR: &str = "#94a3b8";
/// Color used for a shape whose name has no matching point feature.
pub const FALLBACK_FEATURE_COLOR: &str = "#808080";

/// How a category's geometry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Rivers and similar: polylines, never filled.
    Line,
    /// Lakes and similar: polygons with a fill.
    Area,
}

impl CategoryKind {
    pub fn marker_radius(self) -> f64 {
        match self {
            CategoryKind::Area => 7.0,
            CategoryKind::Line => 8.0,
        }
    }
}

/// Linear scale over the finite values of one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
    /// `max - min`, or 1 when all values are equal.
    pub range: f64,
}

impl ValueScale {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 1.0));
        let span = max - min;
        let range = if span > 0.0 { span } else { 1.0 };
        Self { min, max, range }
    }

    /// Position of `value` on the scale, in `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / self.range).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    pub fill_opacity: f64,
}

impl ShapeStyle {
    pub fn unvalued(kind: CategoryKind) -> Self {
        Self {
            color: UNVALUED_SHAPE_COLOR.to_string(),
            weight: 1.5,
            opacity: 0.3,
            fill_color: None,
            fill_opacity: match kind {
                CategoryKind::Area => 0.2,
                CategoryKind::Line => 0.0,
            },
        }
    }

    pub fn valued(color: &str, normalized: f64, kind: CategoryKind) -> Self {
        let (weight, fill_opacity) = match kind {
            CategoryKind::Area => (1.0, 0.3 + normalized * 0.5),
            CategoryKind::Line => (2.0 + normalized * 4.0, 0.0),
        };
        Self {
            color: color.to_string(),
            weight,
            opacity: 0.85,
            fill_color: Some(color.to_string()),
            fill_opacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub color: String,
    pub fill_opacity: f64,
    pub weight: f64,
}

impl MarkerStyle {
    pub fn new(feature_color: &str, valued: bool, kind: CategoryKind) -> Self {
        let (color, fill_opacity) = if valued {
            (feature_color, 0.85)
        } else {
            (UNVALUED_MARKER_COLOR, 0.35)
        };
        Self {
            radius: kind.marker_radius(),
            color: color.to_string(),
            fill_opacity,
            weight: 2.0,
        }
    }
}

/// A point feature with its resolved value and style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedMarker {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub value: Option<f64>,
    pub normalized: Option<f64>,
    pub style: MarkerStyle,
    pub tooltip: String,
    /// Shown on click; every marker has one, valued or not.
    pub popup: Option<String>,
}

/// A GeoJSON shape with its resolved value and style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedShape {
    pub name: String,
    pub value: Option<f64>,
    pub normalized: Option<f64>,
    pub style: ShapeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Only valued shapes carry a popup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

fn tooltip(name: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{name}: {v:.2}"),
        None => format!("{name}: no data"),
    }
}

/// Popup body for a feature: `"{title}: {value:.3}"`, or a no-data note.
pub fn popup(title: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{title}: {v:.3}"),
        None => "No data".to_string(),
    }
}

fn finite(values: &BTreeMap<String, Option<f64>>, name: &str) -> Option<f64> {
    values.get(name).copied().flatten().filter(|v| v.is_finite())
}

/// Everything the map renderer needs for one category and one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub kind: CategoryKind,
    pub scale: ValueScale,
    pub markers: Vec<MappedMarker>,
    pub shapes: Vec<MappedShape>,
}

impl MapLayer {
    /// Map `values` onto the point `features` and the named `shapes`.
    /// `title` heads every popup, usually the dataset title.
    pub fn build(
        features: &[WaterFeature],
        shapes: &GeoShapes,
        values: &BTreeMap<String, Option<f64>>,
        kind: CategoryKind,
        title: &str,
    ) -> Self {
        let scale = ValueScale::from_values(values.values().filter_map(|v| *v));

        let markers = features
            .iter()
            .map(|feature| {
                let value = finite(values, &feature.name);
                MappedMarker {
                    name: feature.name.clone(),
                    lat: feature.lat,
                    lon: feature.lon,
                    value,
                    normalized: value.map(|v| scale.normalize(v)),
                    style: MarkerStyle::new(&feature.color, value.is_some(), kind),
                    tooltip: tooltip(&feature.name, value),
                    popup: Some(popup(title, value)),
                }
            })
            .collect();

        let colors: BTreeMap<&str, &str> = features
            .iter()
            .map(|f| (f.name.as_str(), f.color.as_str()))
            .collect();
        let shapes = shapes
            .feature_names()
            .into_iter()
            .map(|name| {
                let value = finite(values, &name);
                let normalized = value.map(|v| scale.normalize(v));
                let style = match normalized {
                    Some(n) => {
                        let color = colors
                            .get(name.as_str())
                            .copied()
                            .unwrap_or(FALLBACK_FEATURE_COLOR);
                        ShapeStyle::valued(color, n, kind)
                    }
                    None => ShapeStyle::unvalued(kind),
                };
                MappedShape {
                    tooltip: value.map(|_| tooltip(&name, value)),
                    popup: value.map(|v| popup(title, Some(v))),
                    name,
                    value,
                    normalized,
                    style,
                }
            })
            .collect();

        let layer = Self {
            kind,
            scale,
            markers,
            shapes,
        };
        log::debug!(
            "Mapped {} of {} markers to values (min={}, max={})",
            layer.valued_markers(),
            layer.markers.len(),
            layer.scale.min,
            layer.scale.max
        );
        layer
    }

    pub fn valued_markers(&self) -> usize {
        self.markers.iter().filter(|m| m.value.is_some()).count()
    }

    pub fn unvalued_markers(&self) -> usize {
        self.markers.len() - self.valued_markers()
    }

    pub fn has_values(&self) -> bool {
        self.valued_markers() > 0 || self.shapes.iter().any(|s| s.value.is_some())
    }
}
