//! Sink document writer.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use sartopo_faks_feature_models::Sink;

use crate::ConvertError;
use crate::classify::SinkDocuments;

/// Ensures a directory exists, creating it and any parents if necessary.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<(), ConvertError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|source| ConvertError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("Created output directory {}", path.display());
    }
    Ok(())
}

/// Writes every sink document to `output_dir` as pretty-printed UTF-8
/// JSON, one `<Sink>.geojson` file per sink.
///
/// All eight files are written even when empty. Non-ASCII characters are
/// written literally. Existing files are overwritten.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] on any filesystem failure and
/// [`ConvertError::Json`] if serialization fails.
pub fn write_sink_documents(
    documents: &SinkDocuments,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ConvertError> {
    ensure_dir(output_dir)?;

    let mut written = Vec::with_capacity(Sink::all().len());

    for (sink, features) in documents.iter() {
        let path = output_dir.join(sink.file_name());
        let collection = documents.feature_collection(sink);

        let io_err = |source: std::io::Error| ConvertError::Io {
            path: path.display().to_string(),
            source,
        };

        let file = std::fs::File::create(&path).map_err(io_err)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &collection)?;
        writer.flush().map_err(io_err)?;

        log::info!("Wrote {} features to {}", features.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::classify::classify;
    use crate::folders::FolderTable;
    use crate::raw::RawFeatureCollection;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sartopo_faks_writer_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn documents_with_marker(title: &str) -> SinkDocuments {
        let input = RawFeatureCollection::from_value(json!({
            "features": [{
                "id": "m",
                "geometry": {"type": "Point", "coordinates": [10.0, 60.0]},
                "properties": {"class": "Marker", "title": title}
            }]
        }))
        .unwrap();
        classify(&input, &FolderTable::embedded()).documents
    }

    #[test]
    fn creates_nested_directory() {
        let root = scratch_dir("nested");
        let dir = root.join("a").join("b");

        let written = write_sink_documents(&SinkDocuments::new(), &dir).unwrap();
        assert_eq!(written.len(), 8);
        for sink in Sink::all() {
            assert!(dir.join(sink.file_name()).is_file(), "{sink}");
        }

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn existing_directory_is_fine() {
        let dir = scratch_dir("existing");
        std::fs::create_dir_all(&dir).unwrap();

        write_sink_documents(&documents_with_marker("Første"), &dir).unwrap();
        write_sink_documents(&SinkDocuments::new(), &dir).unwrap();

        let contents = std::fs::read_to_string(dir.join("Punkter.geojson")).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(doc["features"], json!([]));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn non_ascii_is_written_literally_with_indentation() {
        let dir = scratch_dir("non_ascii");

        write_sink_documents(&documents_with_marker("Oppmøte på bålplassen"), &dir).unwrap();

        let contents = std::fs::read_to_string(dir.join("Punkter.geojson")).unwrap();
        assert!(contents.contains("Oppmøte på bålplassen"));
        assert!(contents.contains("\"Oppmøtested\""));
        assert!(!contents.contains("\\u00f8"));
        assert!(contents.contains("\n  \""));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let root = scratch_dir("blocked");
        std::fs::create_dir_all(&root).unwrap();
        let blocker = root.join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let result = write_sink_documents(&SinkDocuments::new(), &blocker.join("out"));
        assert!(matches!(result, Err(ConvertError::Io { .. })));

        let _ = std::fs::remove_dir_all(&root);
    }
}
