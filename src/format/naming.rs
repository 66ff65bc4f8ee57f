//! Filename derivation for snapshots and exports.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::NamingScheme;
use crate::types::{now_micros, FILE_PREFIX};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Lower-case the topic and replace spaces with underscores.
pub fn topic_slug(topic: &str) -> String {
    topic.to_lowercase().replace(' ', "_")
}

/// Filename stem (no extension) for a write of `topic` at `timestamp`.
pub fn file_stem(topic: &str, timestamp: &str, scheme: NamingScheme) -> String {
    let base = format!("{}_{}_{}", FILE_PREFIX, topic_slug(topic), timestamp);
    match scheme {
        NamingScheme::Seconds => base,
        NamingScheme::Unique => {
            let micros = now_micros() % 1_000_000;
            let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
            format!("{}_{:06}_{}", base, micros, seq)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(topic_slug("Board Games"), "board_games");
        assert_eq!(topic_slug("Gaming"), "gaming");
    }

    #[test]
    fn test_seconds_stem_is_deterministic() {
        let a = file_stem("Board Games", "20240101_120000", NamingScheme::Seconds);
        let b = file_stem("Board Games", "20240101_120000", NamingScheme::Seconds);
        assert_eq!(a, "vocabulary_board_games_20240101_120000");
        assert_eq!(a, b);
    }

    #[test]
    fn test_unique_stems_differ() {
        let a = file_stem("Gaming", "20240101_120000", NamingScheme::Unique);
        let b = file_stem("Gaming", "20240101_120000", NamingScheme::Unique);
        assert!(a.starts_with("vocabulary_gaming_20240101_120000_"));
        assert_ne!(a, b);
    }
}
