#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Shared taxonomy types for the SARTopo to faks converter.
//!
//! These enums are the vocabulary both sides of the conversion agree on:
//! the feature classes SARTopo exports, the labels faks expects in the
//! `category` and `missionStatus` properties, and the fixed set of sink
//! documents the converter writes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The SARTopo `class` property values the converter recognizes.
///
/// Any other value (or a missing `class`) is treated as "other" and is
/// represented as `None` by callers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum FeatureClass {
    /// Organizational grouping node.
    Folder,
    /// Free-standing point of interest.
    Marker,
    /// Search task area or path.
    Assignment,
    /// Workflow stage that assignments reference via `operationalPeriodId`.
    OperationalPeriod,
}

/// `GeoJSON` geometry type names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

/// Shape category written to the `category` property of area and path
/// features.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShapeCategory {
    /// Polygon features.
    Area,
    /// `LineString` features.
    Path,
}

/// Search progress of an assignment, as faks displays it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MissionStatus {
    /// Not started (draft or prepared).
    #[default]
    Empty,
    /// In progress.
    Assigned,
    /// Completed.
    Searched,
}

/// Category assigned to point features based on their title and marker
/// symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PointCategory {
    /// Meeting point for search crews.
    #[serde(rename = "Oppmøtested")]
    #[strum(serialize = "Oppmøtested")]
    Oppmotested,
    /// Command post.
    Kommandoplass,
    /// Residence of the missing person.
    Bosted,
    /// A found trace or clue.
    #[serde(rename = "Funn av spor")]
    #[strum(serialize = "Funn av spor")]
    FunnAvSpor,
    /// Anything not recognized by the category rules.
    #[default]
    Annet,
}

/// The eight output documents faks imports.
///
/// Variants are declared in the order the files are listed and written.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Sink {
    /// Intelligence reflexes (folder-routed only).
    Etterretningsreflekser,
    /// Line features.
    Linjer,
    /// Tracks from crews, dogs, vehicles and aircraft (folder-routed only).
    Mobilspor,
    /// Point features.
    Punkter,
    /// Regions (folder-routed only).
    Regioner,
    /// Search areas.
    Soeksarealer,
    /// Closed-off areas (folder-routed only).
    Sperret,
    /// Statistical reflexes (folder-routed only).
    #[serde(rename = "Statistiske_reflekser")]
    #[strum(serialize = "Statistiske_reflekser")]
    StatistiskeReflekser,
}

impl Sink {
    /// File extension shared by every sink document.
    pub const EXTENSION: &'static str = "geojson";

    /// Returns every sink in output order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Etterretningsreflekser,
            Self::Linjer,
            Self::Mobilspor,
            Self::Punkter,
            Self::Regioner,
            Self::Soeksarealer,
            Self::Sperret,
            Self::StatistiskeReflekser,
        ]
    }

    /// Returns the file name this sink is written to (e.g.
    /// `"Punkter.geojson"`).
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{self}.{}", Self::EXTENSION)
    }
}

/// Axis-aligned bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Returns the smallest box covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn sink_file_names() {
        let names: Vec<String> = Sink::all().iter().map(|s| s.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "Etterretningsreflekser.geojson",
                "Linjer.geojson",
                "Mobilspor.geojson",
                "Punkter.geojson",
                "Regioner.geojson",
                "Soeksarealer.geojson",
                "Sperret.geojson",
                "Statistiske_reflekser.geojson",
            ]
        );
    }

    #[test]
    fn sink_parses_from_toml_style_names() {
        assert_eq!(
            Sink::from_str("Statistiske_reflekser").unwrap(),
            Sink::StatistiskeReflekser
        );
        assert_eq!(Sink::from_str("Mobilspor").unwrap(), Sink::Mobilspor);
        assert!(Sink::from_str("mobilspor").is_err());
    }

    #[test]
    fn labels_serialize_to_faks_strings() {
        assert_eq!(
            serde_json::to_value(PointCategory::Oppmotested).unwrap(),
            "Oppmøtested"
        );
        assert_eq!(
            serde_json::to_value(PointCategory::FunnAvSpor).unwrap(),
            "Funn av spor"
        );
        assert_eq!(
            serde_json::to_value(MissionStatus::Assigned).unwrap(),
            "assigned"
        );
        assert_eq!(serde_json::to_value(ShapeCategory::Area).unwrap(), "area");
        assert_eq!(PointCategory::FunnAvSpor.to_string(), "Funn av spor");
        let searched: &str = MissionStatus::Searched.as_ref();
        assert_eq!(searched, "searched");
    }

    #[test]
    fn feature_class_is_case_sensitive() {
        assert_eq!(
            FeatureClass::from_str("Assignment").unwrap(),
            FeatureClass::Assignment
        );
        assert!(FeatureClass::from_str("assignment").is_err());
    }

    #[test]
    fn bounding_box_union() {
        let a = BoundingBox {
            min_lat: 60.0,
            max_lat: 61.0,
            min_lng: 10.0,
            max_lng: 11.0,
        };
        let b = BoundingBox {
            min_lat: 59.5,
            max_lat: 60.5,
            min_lng: 10.5,
            max_lng: 12.0,
        };
        let u = a.union(b);
        assert!((u.min_lat - 59.5).abs() < f64::EPSILON);
        assert!((u.max_lng - 12.0).abs() < f64::EPSILON);
        assert!((u.max_lat - 61.0).abs() < f64::EPSILON);
        assert!((u.min_lng - 10.0).abs() < f64::EPSILON);
    }
}
