//! Reduced CSV export of the active words.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use super::snapshot::require_generated;
use super::{ensure_parent, file_stem};
use crate::config::{NamingScheme, OutputConfig};
use crate::store::VocabularyStore;
use crate::types::{timestamp_now, CuratorResult};

/// Header row of every export.
pub const CSV_HEADER: &str = "Topic,Words";

/// Writes two-line CSV exports: header, then topic and the active words
/// joined with ", ".
///
/// The word cell is written unquoted, so consumers split the second line on
/// the first comma only.
pub struct CsvExporter {
    output_dir: PathBuf,
    naming: NamingScheme,
}

impl CsvExporter {
    /// Create an exporter that names files under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, naming: NamingScheme) -> Self {
        Self {
            output_dir: output_dir.into(),
            naming,
        }
    }

    /// Create an exporter from the output section of the config.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.dir.clone(), config.naming)
    }

    /// The data row for a store.
    pub fn data_row(store: &VocabularyStore) -> String {
        format!("{},{}", store.topic(), store.active_words().join(", "))
    }

    /// Export to an auto-named file, or to `filename` when given.
    pub fn export(&self, store: &VocabularyStore, filename: Option<&Path>) -> CuratorResult<PathBuf> {
        require_generated(store)?;
        let path = match filename {
            Some(name) => name.to_path_buf(),
            None => {
                let stem = file_stem(store.topic(), &timestamp_now(), self.naming);
                self.output_dir.join(format!("{}.csv", stem))
            }
        };
        self.write_to_file(store, &path)?;
        Ok(path)
    }

    /// Export to a caller-chosen path.
    pub fn write_to_file(&self, store: &VocabularyStore, path: &Path) -> CuratorResult<()> {
        require_generated(store)?;
        ensure_parent(path)?;
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(store, &mut writer)?;
        writer.flush()?;
        info!(
            "Exported {} active words of {:?} to {}",
            store.counts().active,
            store.topic(),
            path.display()
        );
        Ok(())
    }

    /// Export to any writer.
    pub fn write_to(&self, store: &VocabularyStore, writer: &mut impl Write) -> CuratorResult<()> {
        require_generated(store)?;
        writeln!(writer, "{}", CSV_HEADER)?;
        writeln!(writer, "{}", Self::data_row(store))?;
        Ok(())
    }
}
