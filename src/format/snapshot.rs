//! Full JSON snapshots of a store.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use super::{ensure_parent, file_stem};
use crate::config::{NamingScheme, OutputConfig};
use crate::store::VocabularyStore;
use crate::types::{timestamp_now, CuratorError, CuratorResult, WordEntry};

/// One entry as written to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotWord {
    pub id: u64,
    pub word: String,
    pub deleted: bool,
}

impl From<&WordEntry> for SnapshotWord {
    fn from(entry: &WordEntry) -> Self {
        Self {
            id: entry.id,
            word: entry.word.clone(),
            deleted: entry.is_deleted(),
        }
    }
}

/// The persisted snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub topic: String,
    /// Write time, `%Y%m%d_%H%M%S`.
    pub timestamp: String,
    pub total_words: usize,
    pub active_words: usize,
    /// Deletion log length; repeated deletes of one word count each time.
    pub deleted_words: usize,
    pub words: Vec<SnapshotWord>,
}

impl SnapshotDocument {
    /// Capture a store at the given timestamp.
    pub fn capture(store: &VocabularyStore, timestamp: impl Into<String>) -> Self {
        let counts = store.counts();
        Self {
            topic: store.topic().to_string(),
            timestamp: timestamp.into(),
            total_words: counts.total,
            active_words: counts.active,
            deleted_words: counts.deleted,
            words: store.list_all().iter().map(SnapshotWord::from).collect(),
        }
    }
}

/// Writes JSON snapshots.
pub struct SnapshotWriter {
    output_dir: PathBuf,
    naming: NamingScheme,
}

impl SnapshotWriter {
    /// Create a writer that names files under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, naming: NamingScheme) -> Self {
        Self {
            output_dir: output_dir.into(),
            naming,
        }
    }

    /// Create a writer from the output section of the config.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.dir.clone(), config.naming)
    }

    /// Write a snapshot to an auto-named file and return its path.
    pub fn write_snapshot(&self, store: &VocabularyStore) -> CuratorResult<PathBuf> {
        require_generated(store)?;
        let timestamp = timestamp_now();
        let stem = file_stem(store.topic(), &timestamp, self.naming);
        let path = self.output_dir.join(format!("{}.json", stem));
        self.write_document(&SnapshotDocument::capture(store, timestamp), &path)?;
        Ok(path)
    }

    /// Write a snapshot to a caller-chosen path.
    pub fn write_to_file(&self, store: &VocabularyStore, path: &Path) -> CuratorResult<()> {
        require_generated(store)?;
        self.write_document(&SnapshotDocument::capture(store, timestamp_now()), path)
    }

    /// Write a snapshot to any writer.
    pub fn write_to(&self, store: &VocabularyStore, writer: &mut impl Write) -> CuratorResult<()> {
        require_generated(store)?;
        let doc = SnapshotDocument::capture(store, timestamp_now());
        serde_json::to_writer_pretty(&mut *writer, &doc)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn write_document(&self, doc: &SnapshotDocument, path: &Path) -> CuratorResult<()> {
        ensure_parent(path)?;
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, doc)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        info!("Snapshot of {:?} written to {}", doc.topic, path.display());
        Ok(())
    }
}

pub(crate) fn require_generated(store: &VocabularyStore) -> CuratorResult<()> {
    if store.is_generated() {
        Ok(())
    } else {
        Err(CuratorError::NotGenerated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_counts() {
        let mut store = VocabularyStore::from_words("Gaming", ["a", "b", "c"]);
        store.delete_by_id(1);
        store.delete_by_id(1);
        let doc = SnapshotDocument::capture(&store, "20240101_000000");
        assert_eq!(doc.total_words, 3);
        assert_eq!(doc.active_words, 2);
        assert_eq!(doc.deleted_words, 2);
        assert!(doc.words[1].deleted);
        assert!(!doc.words[0].deleted);
    }

    #[test]
    fn test_write_to_uses_field_names() {
        let store = VocabularyStore::from_words("Café", ["crème"]);
        let writer = SnapshotWriter::new(".", NamingScheme::Seconds);
        let mut buf = Vec::new();
        writer.write_to(&store, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"total_words\": 1"));
        assert!(text.contains("\"deleted\": false"));
        assert!(text.contains("crème"));
    }

    #[test]
    fn test_ungenerated_store_rejected() {
        let writer = SnapshotWriter::new(".", NamingScheme::Seconds);
        let mut buf = Vec::new();
        assert!(matches!(
            writer.write_to(&VocabularyStore::new(), &mut buf),
            Err(CuratorError::NotGenerated)
        ));
        assert!(buf.is_empty());
    }
}
