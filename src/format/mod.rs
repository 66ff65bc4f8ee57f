//! Persisted representations of a store: JSON snapshots and CSV exports.

pub mod csv;
pub mod naming;
pub mod snapshot;

pub use csv::CsvExporter;
pub use naming::{file_stem, topic_slug};
pub use snapshot::{SnapshotDocument, SnapshotWord, SnapshotWriter};

use std::path::Path;

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
