//! All data types for the lexicon curator.

pub mod entry;
pub mod error;
pub mod report;

pub use entry::WordEntry;
pub use error::{CuratorError, CuratorResult};
pub use report::GenerationReport;

/// Number of words requested when the caller does not say otherwise.
pub const DEFAULT_WORD_COUNT: usize = 20;

/// Prefix shared by every snapshot and export filename.
pub const FILE_PREFIX: &str = "vocabulary";

/// Timestamp layout used in snapshot documents and filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Returns the current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Returns the current time as Unix epoch microseconds.
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
