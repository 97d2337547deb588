#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Bounding box helpers for SARTopo feature geometries.
//!
//! [`bounding_box`] works directly on the ring list of a `GeoJSON`
//! `Polygon` and is strict about its input. [`extent`] and
//! [`collection_extent`] accept any geometry and are used for reporting.

use geo::{BoundingRect, Coord, MultiPoint, Point, Rect};
use sartopo_faks_feature_models::BoundingBox;

/// Errors from bounding box computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The ring list contained no positions at all.
    #[error("cannot compute a bounding box from empty coordinates")]
    EmptyCoordinates,

    /// A position had fewer than two components.
    #[error("position {index} in ring {ring} has {len} components, expected at least 2")]
    InvalidPosition {
        /// Index of the ring holding the position.
        ring: usize,
        /// Index of the position within its ring.
        index: usize,
        /// Number of components the position had.
        len: usize,
    },
}

/// Computes the bounding box of a polygon's rings.
///
/// `rings` is the `coordinates` member of a `GeoJSON` `Polygon`: a list of
/// linear rings, each a list of `[lng, lat]` positions. All rings are
/// flattened together; ring closure and winding are not checked.
///
/// # Errors
///
/// * [`GeometryError::EmptyCoordinates`] if there are no positions
/// * [`GeometryError::InvalidPosition`] if a position has fewer than two
///   components
pub fn bounding_box(rings: &[Vec<Vec<f64>>]) -> Result<BoundingBox, GeometryError> {
    let mut points = Vec::new();

    for (ring_idx, ring) in rings.iter().enumerate() {
        for (idx, position) in ring.iter().enumerate() {
            let [lng, lat, ..] = position.as_slice() else {
                return Err(GeometryError::InvalidPosition {
                    ring: ring_idx,
                    index: idx,
                    len: position.len(),
                });
            };
            points.push(Point::new(*lng, *lat));
        }
    }

    MultiPoint::new(points)
        .bounding_rect()
        .map(rect_to_bbox)
        .ok_or(GeometryError::EmptyCoordinates)
}

/// Computes the bounding box of any `GeoJSON` geometry.
///
/// Returns `None` for empty geometries and for geometries the `geo`
/// conversion rejects.
#[must_use]
pub fn extent(geometry: &geojson::Geometry) -> Option<BoundingBox> {
    if let geojson::Value::Polygon(rings) = &geometry.value {
        return bounding_box(rings).ok();
    }

    let geo_geom: geo::Geometry<f64> = match geometry.clone().try_into() {
        Ok(geom) => geom,
        Err(e) => {
            log::debug!("Skipping geometry in extent computation: {e}");
            return None;
        }
    };

    geo_geom.bounding_rect().map(rect_to_bbox)
}

/// Computes the combined bounding box of a set of geometries.
///
/// Geometries without an extent are ignored; returns `None` if none of
/// them has one.
pub fn collection_extent<'a>(
    geometries: impl IntoIterator<Item = &'a geojson::Geometry>,
) -> Option<BoundingBox> {
    geometries
        .into_iter()
        .filter_map(extent)
        .reduce(BoundingBox::union)
}

fn rect_to_bbox(rect: Rect<f64>) -> BoundingBox {
    let Coord { x: min_lng, y: min_lat } = rect.min();
    let Coord { x: max_lng, y: max_lat } = rect.max();

    BoundingBox {
        min_lat,
        max_lat,
        min_lng,
        max_lng,
    }
}
