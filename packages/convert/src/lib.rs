#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

//! SARTopo to faks conversion.
//!
//! Reads a SARTopo `GeoJSON` export, rewrites every feature into the
//! property schema faks expects ([`enrich`]), buckets the result into the
//! eight sink documents ([`classify`]), and writes them to a directory
//! ([`writer`]).
//!
//! The pipeline is synchronous and allocates a fresh [`SinkDocuments`] per
//! call, so independent conversions never share state.

pub mod classify;
pub mod derive;
pub mod enrich;
pub mod folders;
pub mod raw;
pub mod writer;

pub use classify::{
    Classification, ClassificationStats, ConversionReport, Route, SinkDocuments, classify,
    classify_features, route,
};
pub use derive::{OperationalPeriods, derive_mission_status, derive_point_category};
pub use enrich::{EnrichedFeature, EnrichedProperties, enrich_features};
pub use folders::FolderTable;
pub use raw::{RawFeature, RawFeatureCollection};
pub use writer::write_sink_documents;

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Filesystem read or write failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The folder table is invalid.
    #[error("Folder table error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}
