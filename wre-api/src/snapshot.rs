use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `GET /api/entity-data/{filename}/{year}`: one value per entity
/// for a single year.
///
/// The backend may answer with a different year than the one requested when
/// the requested year has no data; `year` is what it actually resolved and
/// `requested_year` echoes the request.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// `null` values are kept so the caller can tell "listed, no value" apart
    /// from "not listed".
    #[serde(default)]
    pub entities: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub requested_year: Option<i32>,
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl EntitySnapshot {
    /// Entity values that are present and finite.
    pub fn finite_values(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entities.iter().filter_map(|(name, value)| match value {
            Some(v) if v.is_finite() => Some((name.as_str(), *v)),
            _ => None,
        })
    }

    pub fn has_values(&self) -> bool {
        self.finite_values().next().is_some()
    }

    /// Value for one entity when it is present and finite.
    pub fn value_of(&self, entity: &str) -> Option<f64> {
        self.entities
            .get(entity)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_keeps_nulls_and_filters_them_from_values() {
        let body = json!({
            "entities": {"Dnieper": 1.5, "Neman": null, "Pripyat": 3.0},
            "type": "river",
            "year": 2023,
            "requested_year": 2024
        });
        let snapshot: EntitySnapshot = serde_json::from_value(body).unwrap();
        assert_eq!(snapshot.entities.len(), 3);
        assert_eq!(snapshot.finite_values().count(), 2);
        assert_eq!(snapshot.value_of("Neman"), None);
        assert_eq!(snapshot.value_of("Pripyat"), Some(3.0));
        assert_eq!(snapshot.year, Some(2023));
        assert_eq!(snapshot.requested_year, Some(2024));
    }

    #[test]
    fn snapshot_without_entities_has_no_values() {
        let body = json!({"entities": {}, "type": "region"});
        let snapshot: EntitySnapshot = serde_json::from_value(body).unwrap();
        assert!(!snapshot.has_values());
        assert_eq!(snapshot.year, None);
        assert_eq!(snapshot.entity_type, "region");
    }
}
