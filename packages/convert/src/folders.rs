//! Folder-to-sink routing table.
//!
//! The default table is `folders.toml`, baked into the binary at compile
//! time via [`include_str!`]. Deployments with different folder naming can
//! load their own table with [`FolderTable::load`].

use std::collections::BTreeMap;
use std::path::Path;

use sartopo_faks_feature_models::Sink;
use serde::Deserialize;

use crate::ConvertError;

/// Default table embedded at compile time.
const FOLDERS_TOML: &str = include_str!("../folders.toml");

/// Parsed `folders.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FolderTableConfig {
    #[serde(default)]
    folders: Vec<FolderEntry>,
}

/// A single `[[folders]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolderEntry {
    /// Exact folder title.
    pub title: String,
    /// Sink the folder's features are routed to.
    pub sink: Sink,
}

/// Maps folder titles to sinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderTable {
    entries: BTreeMap<String, Sink>,
}

impl FolderTable {
    /// Returns the embedded default table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded `folders.toml` is malformed (this is a
    /// compile-time guarantee since the config is embedded).
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml_str(FOLDERS_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded folders.toml: {e}"))
    }

    /// Parses a table from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if the TOML is malformed, names an
    /// unknown sink, or lists the same title twice.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConvertError> {
        let config: FolderTableConfig =
            toml::from_str(toml_str).map_err(|e| ConvertError::Config {
                message: e.to_string(),
            })?;

        Self::from_entries(config.folders)
    }

    /// Builds a table from entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if a title appears more than once.
    pub fn from_entries(
        entries: impl IntoIterator<Item = FolderEntry>,
    ) -> Result<Self, ConvertError> {
        let mut map = BTreeMap::new();

        for entry in entries {
            if let Some(existing) = map.insert(entry.title.clone(), entry.sink) {
                return Err(ConvertError::Config {
                    message: format!(
                        "folder {:?} is mapped twice ({existing} and {})",
                        entry.title, entry.sink
                    ),
                });
            }
        }

        Ok(Self { entries: map })
    }

    /// Reads a table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`] if the file cannot be read, or
    /// [`ConvertError::Config`] if it is invalid.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let table = Self::from_toml_str(&contents)?;
        log::info!(
            "Loaded {} folder mappings from {}",
            table.len(),
            path.display()
        );

        Ok(table)
    }

    /// Loads the table at `path`, or the embedded default if `None`.
    ///
    /// # Errors
    ///
    /// See [`FolderTable::load`].
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, ConvertError> {
        path.map_or_else(|| Ok(Self::embedded()), Self::load)
    }

    /// Returns the sink for a folder title (exact match).
    #[must_use]
    pub fn sink_for(&self, title: &str) -> Option<Sink> {
        self.entries.get(title).copied()
    }

    /// Iterates over `(title, sink)` pairs in title order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Sink)> {
        self.entries
            .iter()
            .map(|(title, sink)| (title.as_str(), *sink))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table() {
        let table = FolderTable::embedded();
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.sink_for("01 Etterretning"),
            Some(Sink::Etterretningsreflekser)
        );
        for title in [
            "02 SPOR Mannskaper",
            "03 SPOR Hund m/Fører",
            "04 SPOR Motorisert",
            "05 SPOR Luftfartøy",
        ] {
            assert_eq!(table.sink_for(title), Some(Sink::Mobilspor), "{title}");
        }
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let table = FolderTable::embedded();
        assert_eq!(table.sink_for("02 spor mannskaper"), None);
        assert_eq!(table.sink_for("02 SPOR Mannskaper "), None);
        assert_eq!(table.sink_for("Ukjent"), None);
    }

    #[test]
    fn parses_custom_table() {
        let table = FolderTable::from_toml_str(
            r#"
            [[folders]]
            title = "Sperringer"
            sink = "Sperret"

            [[folders]]
            title = "Statistikk"
            sink = "Statistiske_reflekser"
            "#,
        )
        .unwrap();

        assert_eq!(table.sink_for("Sperringer"), Some(Sink::Sperret));
        assert_eq!(
            table.sink_for("Statistikk"),
            Some(Sink::StatistiskeReflekser)
        );
        let titles: Vec<&str> = table.iter().map(|(title, _)| title).collect();
        assert_eq!(titles, vec!["Sperringer", "Statistikk"]);
    }

    #[test]
    fn empty_table_is_valid() {
        let table = FolderTable::from_toml_str("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn unknown_sink_is_rejected() {
        let result = FolderTable::from_toml_str(
            r#"
            [[folders]]
            title = "X"
            sink = "Nowhere"
            "#,
        );
        assert!(matches!(result, Err(ConvertError::Config { .. })));
    }

    #[test]
    fn duplicate_title_is_rejected() {
        let result = FolderTable::from_toml_str(
            r#"
            [[folders]]
            title = "X"
            sink = "Regioner"

            [[folders]]
            title = "X"
            sink = "Sperret"
            "#,
        );
        let Err(ConvertError::Config { message }) = result else {
            panic!("expected config error");
        };
        assert!(message.contains("mapped twice"), "{message}");
    }

    #[test]
    fn load_reads_file() {
        let dir = std::env::temp_dir().join("sartopo_faks_folders_load_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("folders.toml");
        std::fs::write(&path, "[[folders]]\ntitle = \"R\"\nsink = \"Regioner\"\n").unwrap();

        let table = FolderTable::load_or_embedded(Some(&path)).unwrap();
        assert_eq!(table.sink_for("R"), Some(Sink::Regioner));

        let missing = FolderTable::load(&dir.join("missing.toml"));
        assert!(matches!(missing, Err(ConvertError::Io { .. })));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_or_embedded_defaults() {
        assert_eq!(
            FolderTable::load_or_embedded(None).unwrap(),
            FolderTable::embedded()
        );
    }
}
