// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input records: the asset description and its physical map.
//!
//! Structural fields are strict. The physical map is lenient: it is kept as
//! a raw JSON object and numeric fields are looked up on demand, so a missing
//! or non-numeric value simply reads as `None`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Descriptor for a single named part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDescriptor {
    pub kind: String,
}

/// Declarative description of one furniture asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescription {
    pub asset_id: String,
    pub archetype: String,
    pub detail_tier: String,
    /// Parts keyed by part id. Keys are unique by construction.
    pub parts: BTreeMap<String, PartDescriptor>,
    /// Declared physical dimensions in meters. `None` when absent or when the
    /// value is not a JSON object.
    #[serde(default, deserialize_with = "lenient_physical", skip_serializing_if = "Option::is_none")]
    pub physical: Option<PhysicalSpec>,
}

impl AssetDescription {
    /// Parses a description from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a description from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Looks up a numeric physical field by dotted path.
    pub fn number(&self, path: &str) -> Option<f64> {
        self.physical.as_ref().and_then(|p| p.number(path))
    }
}

fn lenient_physical<'de, D>(deserializer: D) -> std::result::Result<Option<PhysicalSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => Some(PhysicalSpec(map)),
        _ => None,
    })
}

/// Map of declared physical fields.
///
/// Nested objects are addressed with dotted paths, so the chair footprint is
/// read as `footprint.width` and `footprint.depth`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalSpec(Map<String, Value>);

impl PhysicalSpec {
    /// Creates an empty physical map.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the numeric value at `path`, or `None` if any segment is
    /// missing or the leaf is not a JSON number.
    pub fn number(&self, path: &str) -> Option<f64> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        match current {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Sets a numeric value at `path`, creating intermediate objects.
    ///
    /// Non-finite values cannot be represented in JSON and are ignored.
    pub fn set_number(&mut self, path: &str, value: f64) {
        let Some(number) = serde_json::Number::from_f64(value) else {
            tracing::debug!(path, value, "Ignoring non-finite physical value");
            return;
        };
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };
        let mut current = &mut self.0;
        for segment in segments {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(leaf.to_string(), Value::Number(number));
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the raw JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for PhysicalSpec {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chair_json() -> Value {
        json!({
            "assetId": "chair-01",
            "archetype": "chair",
            "detailTier": "basic",
            "parts": {
                "supports": { "kind": "supports" },
                "seat": { "kind": "seat" }
            },
            "physical": {
                "seatWidth": 0.45,
                "seatHeight": "tall",
                "footprint": { "width": 0.5, "depth": 0.5 }
            }
        })
    }

    #[test]
    fn parses_structural_fields() {
        let desc = AssetDescription::from_value(chair_json()).unwrap();
        assert_eq!(desc.asset_id, "chair-01");
        assert_eq!(desc.archetype, "chair");
        assert_eq!(desc.detail_tier, "basic");
        assert_eq!(desc.parts.len(), 2);
        assert_eq!(desc.parts["seat"].kind, "seat");
    }

    #[test]
    fn dotted_paths_reach_nested_numbers() {
        let desc = AssetDescription::from_value(chair_json()).unwrap();
        assert_eq!(desc.number("footprint.width"), Some(0.5));
        assert_eq!(desc.number("footprint.depth"), Some(0.5));
        assert_eq!(desc.number("footprint.height"), None);
        assert_eq!(desc.number("footprint"), None);
    }

    #[test]
    fn non_numeric_fields_read_as_absent() {
        let desc = AssetDescription::from_value(chair_json()).unwrap();
        assert_eq!(desc.number("seatWidth"), Some(0.45));
        assert_eq!(desc.number("seatHeight"), None);
        assert_eq!(desc.number("totalHeight"), None);
    }

    #[test]
    fn integer_fields_are_numbers() {
        let mut value = chair_json();
        value["physical"]["totalHeight"] = json!(1);
        let desc = AssetDescription::from_value(value).unwrap();
        assert_eq!(desc.number("totalHeight"), Some(1.0));
    }

    #[test]
    fn physical_is_optional() {
        let mut value = chair_json();
        value.as_object_mut().unwrap().remove("physical");
        let desc = AssetDescription::from_value(value).unwrap();
        assert!(desc.physical.is_none());
        assert_eq!(desc.number("seatWidth"), None);
    }

    #[test]
    fn non_object_physical_is_ignored() {
        let mut value = chair_json();
        value["physical"] = json!([1, 2, 3]);
        let desc = AssetDescription::from_value(value).unwrap();
        assert!(desc.physical.is_none());
    }

    #[test]
    fn missing_structural_keys_are_errors() {
        for key in ["assetId", "archetype", "detailTier", "parts"] {
            let mut value = chair_json();
            value.as_object_mut().unwrap().remove(key);
            let err = AssetDescription::from_value(value).unwrap_err();
            assert!(err.to_string().contains(key), "{key}: {err}");
        }
    }

    #[test]
    fn part_without_kind_is_an_error() {
        let mut value = chair_json();
        value["parts"]["seat"] = json!({});
        assert!(AssetDescription::from_value(value).is_err());
    }

    #[test]
    fn set_number_creates_nested_objects() {
        let mut spec = PhysicalSpec::new();
        spec.set_number("seatHeight", 0.45);
        spec.set_number("footprint.width", 0.53);
        spec.set_number("footprint.depth", 0.5);
        assert_eq!(spec.number("seatHeight"), Some(0.45));
        assert_eq!(spec.number("footprint.width"), Some(0.53));
        assert_eq!(spec.number("footprint.depth"), Some(0.5));
    }

    #[test]
    fn set_number_ignores_non_finite() {
        let mut spec = PhysicalSpec::new();
        spec.set_number("seatHeight", f64::NAN);
        assert!(spec.is_empty());
    }
}
