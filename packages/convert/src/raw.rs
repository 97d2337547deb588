//! Input types for SARTopo `GeoJSON` exports.
//!
//! SARTopo exports are close to, but not strictly, `GeoJSON`: the
//! top-level `type` member and the per-feature `type` member are often
//! missing, and `geometry` may be `null` for organizational features such
//! as folders and operational periods. These types accept that shape
//! while still parsing geometries with the `geojson` crate.

use std::path::Path;

use geojson::JsonObject;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ConvertError;

/// The parsed input document: a mapping with a `features` sequence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFeatureCollection {
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

/// A single feature from a SARTopo export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFeature {
    /// Top-level identifier. SARTopo uses UUID strings, but numbers are
    /// tolerated.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<geojson::Geometry>,
    /// Property mapping. A missing or `null` member parses as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: JsonObject,
}

impl RawFeatureCollection {
    /// Parses a collection from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Json`] if the input is not valid JSON or a
    /// geometry is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a collection from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Json`] if the value does not have the
    /// expected shape.
    pub fn from_value(value: Value) -> Result<Self, ConvertError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Reads and parses a SARTopo export from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`] if the file cannot be read and
    /// [`ConvertError::Json`] if it cannot be parsed.
    pub fn read(path: &Path) -> Result<Self, ConvertError> {
        let file = std::fs::File::open(path).map_err(|source| ConvertError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let collection: Self = serde_json::from_reader(std::io::BufReader::new(file))?;

        log::info!(
            "Read {} features from {}",
            collection.features.len(),
            path.display()
        );

        Ok(collection)
    }
}

impl RawFeature {
    /// Returns the identifier as a string, or `None` if the feature has no
    /// string or numeric id.
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns a property rendered as a string (see [`property_str`]).
    #[must_use]
    pub fn property(&self, key: &str) -> Option<String> {
        property_str(&self.properties, key)
    }

    /// Returns the `class` property, or an empty string.
    #[must_use]
    pub fn class(&self) -> String {
        self.property("class").unwrap_or_default()
    }

    /// Returns the display title: `title`, falling back to `number`, or an
    /// empty string.
    #[must_use]
    pub fn title(&self) -> String {
        self.property("title")
            .or_else(|| self.property("number"))
            .unwrap_or_default()
    }
}

/// Reads a property as a string.
///
/// Strings are returned as-is; numbers and booleans are rendered with
/// their JSON representation. `null`, arrays, objects, and missing keys
/// yield `None`.
#[must_use]
pub fn property_str(properties: &JsonObject, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<JsonObject, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<JsonObject>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_export_without_type_members() {
        let collection = RawFeatureCollection::from_value(json!({
            "features": [
                {
                    "id": "f1",
                    "geometry": {"type": "Point", "coordinates": [10.0, 60.0]},
                    "properties": {"class": "Marker", "title": "Oppmøte A"}
                },
                {
                    "id": "p1",
                    "geometry": null,
                    "properties": {"class": "OperationalPeriod", "title": "02 Søkes nå"}
                },
                {"properties": null}
            ]
        }))
        .unwrap();

        assert_eq!(collection.features.len(), 3);
        assert!(collection.features[0].geometry.is_some());
        assert!(collection.features[1].geometry.is_none());
        assert!(collection.features[2].properties.is_empty());
        assert_eq!(collection.features[2].id_string(), None);
    }

    #[test]
    fn missing_features_member_is_empty() {
        let collection = RawFeatureCollection::from_json_str("{}").unwrap();
        assert!(collection.features.is_empty());
    }

    #[test]
    fn malformed_geometry_is_an_error() {
        let result = RawFeatureCollection::from_value(json!({
            "features": [{"geometry": {"type": "Blob", "coordinates": []}}]
        }));
        assert!(matches!(result, Err(ConvertError::Json(_))));
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let feature: RawFeature = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(feature.id_string().as_deref(), Some("42"));
    }

    #[test]
    fn title_falls_back_to_number() {
        let feature: RawFeature =
            serde_json::from_value(json!({"properties": {"number": "A12"}})).unwrap();
        assert_eq!(feature.title(), "A12");

        let feature: RawFeature =
            serde_json::from_value(json!({"properties": {"title": "T", "number": 7}})).unwrap();
        assert_eq!(feature.title(), "T");

        let feature: RawFeature =
            serde_json::from_value(json!({"properties": {"number": 7}})).unwrap();
        assert_eq!(feature.title(), "7");

        assert_eq!(RawFeature::default().title(), "");
    }

    #[test]
    fn property_str_ignores_structured_values() {
        let props = json!({"a": null, "b": [1], "c": {"d": 1}, "e": true})
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(property_str(&props, "a"), None);
        assert_eq!(property_str(&props, "b"), None);
        assert_eq!(property_str(&props, "c"), None);
        assert_eq!(property_str(&props, "e").as_deref(), Some("true"));
        assert_eq!(property_str(&props, "missing"), None);
    }
}
