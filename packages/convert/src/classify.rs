//! Feature classification into sink documents.
//!
//! Routing is by geometry type, except for folders, which are routed by
//! title through the [`FolderTable`]:
//!
//! 1. `class == "Folder"`: the folder table decides; unmapped titles are
//!    dropped.
//! 2. `Point` → [`Sink::Punkter`]
//! 3. `LineString` → [`Sink::Linjer`]
//! 4. `Polygon` → [`Sink::Soeksarealer`]
//!
//! Any other geometry kind is dropped. Only folders can reach the other
//! five sinks.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use geojson::FeatureCollection;
use sartopo_faks_feature_models::{BoundingBox, FeatureClass, GeometryKind, Sink};
use sartopo_faks_spatial::collection_extent;

use crate::ConvertError;
use crate::enrich::{EnrichedFeature, enrich_features, to_feature_collection};
use crate::folders::FolderTable;
use crate::raw::RawFeatureCollection;
use crate::writer::write_sink_documents;

/// The outcome of routing a single enriched feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The feature belongs in this sink.
    Sink(Sink),
    /// A folder whose title is not in the folder table.
    UnmappedFolder,
    /// A non-folder feature with a geometry kind no sink accepts.
    UnsupportedGeometry(GeometryKind),
}

/// Decides which sink an enriched feature belongs to.
#[must_use]
pub fn route(feature: &EnrichedFeature, folders: &FolderTable) -> Route {
    if feature.feature_class() == Some(FeatureClass::Folder) {
        return folders
            .sink_for(&feature.title)
            .map_or(Route::UnmappedFolder, Route::Sink);
    }

    match feature.geometry_kind() {
        GeometryKind::Point => Route::Sink(Sink::Punkter),
        GeometryKind::LineString => Route::Sink(Sink::Linjer),
        GeometryKind::Polygon => Route::Sink(Sink::Soeksarealer),
        other => Route::UnsupportedGeometry(other),
    }
}

/// The eight sink documents of a single run.
///
/// Always holds every [`Sink`], possibly empty, so writers produce a
/// stable file set.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkDocuments {
    documents: BTreeMap<Sink, Vec<EnrichedFeature>>,
}

impl Default for SinkDocuments {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkDocuments {
    /// Creates a set with every sink empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: Sink::all().iter().map(|sink| (*sink, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, sink: Sink, feature: EnrichedFeature) {
        self.documents.entry(sink).or_default().push(feature);
    }

    #[must_use]
    pub fn features(&self, sink: Sink) -> &[EnrichedFeature] {
        self.documents.get(&sink).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates over every sink in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Sink, &[EnrichedFeature])> {
        self.documents
            .iter()
            .map(|(sink, features)| (*sink, features.as_slice()))
    }

    /// Builds the output `FeatureCollection` for a sink.
    #[must_use]
    pub fn feature_collection(&self, sink: Sink) -> FeatureCollection {
        to_feature_collection(self.features(sink))
    }

    /// Number of features per sink.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<Sink, usize> {
        self.iter()
            .map(|(sink, features)| (sink, features.len()))
            .collect()
    }

    /// Combined bounding box of every geometry in a sink, or `None` if
    /// the sink is empty.
    #[must_use]
    pub fn extent(&self, sink: Sink) -> Option<BoundingBox> {
        collection_extent(self.features(sink).iter().map(|feature| &feature.geometry))
    }

    /// Total number of routed features across all sinks.
    #[must_use]
    pub fn total(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }
}

/// Per-run classification counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Features in the input collection.
    pub input: usize,
    /// Features skipped by enrichment for lacking geometry.
    pub without_geometry: usize,
    /// Folders dropped because their title is not in the table.
    pub unmapped_folders: usize,
    /// Features dropped because no sink accepts their geometry kind.
    pub unsupported_geometry: usize,
}

impl ClassificationStats {
    /// Total features that did not end up in any sink.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.without_geometry + self.unmapped_folders + self.unsupported_geometry
    }
}

/// The in-memory result of a classification run.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub documents: SinkDocuments,
    pub stats: ClassificationStats,
}

/// Enriches and routes every feature without touching the filesystem.
#[must_use]
pub fn classify(collection: &RawFeatureCollection, folders: &FolderTable) -> Classification {
    let enriched = enrich_features(collection);

    let mut documents = SinkDocuments::new();
    let mut stats = ClassificationStats {
        input: collection.features.len(),
        without_geometry: collection.features.len() - enriched.len(),
        ..ClassificationStats::default()
    };

    for feature in enriched {
        match route(&feature, folders) {
            Route::Sink(sink) => documents.push(sink, feature),
            Route::UnmappedFolder => {
                log::debug!("Dropping folder {:?}: no sink mapping", feature.title);
                stats.unmapped_folders += 1;
            }
            Route::UnsupportedGeometry(kind) => {
                log::debug!(
                    "Dropping feature {:?} ({:?}): unsupported geometry {kind}",
                    feature.id,
                    feature.title
                );
                stats.unsupported_geometry += 1;
            }
        }
    }

    Classification { documents, stats }
}

/// Summary of a completed conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub counts: BTreeMap<Sink, usize>,
    pub stats: ClassificationStats,
    /// Paths of the written sink files, in output order.
    pub written: Vec<PathBuf>,
}

/// Classifies a SARTopo collection and writes all eight sink documents to
/// `output_dir`.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the directory cannot be created or a
/// sink file cannot be written, and [`ConvertError::Json`] if a document
/// fails to serialize.
pub fn classify_features(
    collection: &RawFeatureCollection,
    output_dir: &Path,
    folders: &FolderTable,
) -> Result<ConversionReport, ConvertError> {
    let Classification { documents, stats } = classify(collection, folders);
    let written = write_sink_documents(&documents, output_dir)?;

    log::info!(
        "Classified {} of {} features into {} ({} without geometry, {} unmapped folders, {} unsupported geometry)",
        documents.total(),
        stats.input,
        output_dir.display(),
        stats.without_geometry,
        stats.unmapped_folders,
        stats.unsupported_geometry
    );

    Ok(ConversionReport {
        counts: documents.counts(),
        stats,
        written,
    })
}
