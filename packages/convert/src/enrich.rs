//! Feature enrichment.
//!
//! Rewrites each raw SARTopo feature into the property schema faks
//! expects. The schema depends on the feature's class and geometry type;
//! features without geometry are skipped.

use geojson::{Feature, FeatureCollection, JsonObject};
use sartopo_faks_feature_models::{
    FeatureClass, GeometryKind, MissionStatus, PointCategory, ShapeCategory,
};

use crate::derive::{OperationalPeriods, derive_mission_status, derive_point_category};
use crate::raw::{RawFeature, RawFeatureCollection};

/// Static `level` value written on point features.
pub const POINT_LEVEL: &str = "Punkt";

/// The derived part of an enriched feature's properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichedProperties {
    /// Area (polygon) or path (line) with a mission status.
    Shape {
        category: ShapeCategory,
        mission_status: MissionStatus,
    },
    /// Point with a derived category and free-text message.
    Point {
        category: PointCategory,
        message: String,
    },
    /// No branch applied; the output property mapping is empty.
    Unassigned,
}

/// A feature after enrichment.
///
/// `title` and `class` are kept on every feature, including
/// [`EnrichedProperties::Unassigned`] ones, since routing depends on them
/// even when they are not written to the output properties.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFeature {
    /// Top-level id of the raw feature, or an empty string.
    pub id: String,
    /// `title`, falling back to `number`.
    pub title: String,
    /// Raw `class` property, or an empty string.
    pub class: String,
    /// Geometry, unchanged from the input.
    pub geometry: geojson::Geometry,
    pub properties: EnrichedProperties,
}

impl EnrichedFeature {
    /// Returns the recognized class, if any.
    #[must_use]
    pub fn feature_class(&self) -> Option<FeatureClass> {
        self.class.parse().ok()
    }

    #[must_use]
    pub fn geometry_kind(&self) -> GeometryKind {
        geometry_kind(&self.geometry.value)
    }

    /// Builds the output property mapping.
    #[must_use]
    pub fn property_map(&self) -> JsonObject {
        let mut map = JsonObject::new();

        match &self.properties {
            EnrichedProperties::Shape {
                category,
                mission_status,
            } => {
                self.insert_common(&mut map);
                map.insert("category".into(), category.to_string().into());
                map.insert("missionStatus".into(), mission_status.to_string().into());
            }
            EnrichedProperties::Point { category, message } => {
                self.insert_common(&mut map);
                map.insert("level".into(), POINT_LEVEL.into());
                map.insert("category".into(), category.to_string().into());
                map.insert("message".into(), message.as_str().into());
            }
            EnrichedProperties::Unassigned => {}
        }

        map
    }

    /// Converts into an output `GeoJSON` feature.
    #[must_use]
    pub fn to_feature(&self) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(self.geometry.clone()),
            id: None,
            properties: Some(self.property_map()),
            foreign_members: None,
        }
    }

    fn insert_common(&self, map: &mut JsonObject) {
        map.insert("id".into(), self.id.as_str().into());
        map.insert("title".into(), self.title.as_str().into());
        map.insert("class".into(), self.class.as_str().into());
    }
}

/// Returns the kind of a `GeoJSON` geometry value.
#[must_use]
pub const fn geometry_kind(value: &geojson::Value) -> GeometryKind {
    match value {
        geojson::Value::Point(_) => GeometryKind::Point,
        geojson::Value::MultiPoint(_) => GeometryKind::MultiPoint,
        geojson::Value::LineString(_) => GeometryKind::LineString,
        geojson::Value::MultiLineString(_) => GeometryKind::MultiLineString,
        geojson::Value::Polygon(_) => GeometryKind::Polygon,
        geojson::Value::MultiPolygon(_) => GeometryKind::MultiPolygon,
        geojson::Value::GeometryCollection(_) => GeometryKind::GeometryCollection,
    }
}

/// Enriches a single feature.
///
/// Returns `None` if the feature has no geometry.
#[must_use]
pub fn enrich_feature(
    feature: &RawFeature,
    periods: &OperationalPeriods,
) -> Option<EnrichedFeature> {
    let geometry = feature.geometry.as_ref()?;
    let class = feature.class();
    let kind = geometry_kind(&geometry.value);

    let properties = match (class.parse::<FeatureClass>().ok(), kind) {
        (Some(FeatureClass::Assignment), GeometryKind::Polygon) => EnrichedProperties::Shape {
            category: ShapeCategory::Area,
            mission_status: derive_mission_status(periods, &feature.properties),
        },
        (Some(FeatureClass::Assignment), GeometryKind::LineString) => EnrichedProperties::Shape {
            category: ShapeCategory::Path,
            mission_status: derive_mission_status(periods, &feature.properties),
        },
        (Some(FeatureClass::Assignment | FeatureClass::Folder), GeometryKind::Point) => {
            EnrichedProperties::Unassigned
        }
        (_, GeometryKind::Point) => EnrichedProperties::Point {
            category: derive_point_category(&feature.properties),
            message: feature
                .property("description")
                .or_else(|| feature.property("message"))
                .unwrap_or_default(),
        },
        (Some(FeatureClass::Assignment), _) => EnrichedProperties::Unassigned,
        (_, GeometryKind::Polygon) => EnrichedProperties::Shape {
            category: ShapeCategory::Area,
            mission_status: MissionStatus::Empty,
        },
        (_, GeometryKind::LineString) => EnrichedProperties::Shape {
            category: ShapeCategory::Path,
            mission_status: MissionStatus::Empty,
        },
        _ => EnrichedProperties::Unassigned,
    };

    Some(EnrichedFeature {
        id: feature.id_string().unwrap_or_default(),
        title: feature.title(),
        class,
        geometry: geometry.clone(),
        properties,
    })
}

/// Enriches every feature in the collection, skipping features without
/// geometry.
#[must_use]
pub fn enrich_features(collection: &RawFeatureCollection) -> Vec<EnrichedFeature> {
    let periods = OperationalPeriods::from_features(&collection.features);

    let enriched: Vec<EnrichedFeature> = collection
        .features
        .iter()
        .filter_map(|feature| {
            let enriched = enrich_feature(feature, &periods);
            if enriched.is_none() {
                log::debug!(
                    "Skipping feature {:?} ({:?}): no geometry",
                    feature.id_string().unwrap_or_default(),
                    feature.title()
                );
            }
            enriched
        })
        .collect();

    log::debug!(
        "Enriched {}/{} features ({} operational period candidates)",
        enriched.len(),
        collection.features.len(),
        periods.len()
    );

    enriched
}

/// Wraps enriched features in an output `FeatureCollection`.
#[must_use]
pub fn to_feature_collection(features: &[EnrichedFeature]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features.iter().map(EnrichedFeature::to_feature).collect(),
        foreign_members: None,
    }
}
