//! Curator configuration with TOML persistence.
//!
//! The config value is built once and passed into the generation and image
//! adapters; nothing reads credentials or settings from global state.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::types::{CuratorError, CuratorResult, DEFAULT_WORD_COUNT};

/// Complete curator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// Generation collaborator settings.
    pub generation: GenerationConfig,

    /// Snapshot and export settings.
    pub output: OutputConfig,

    /// Image pipeline settings.
    pub images: ImageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model name passed to the API.
    pub model: String,

    /// Base URL of the models endpoint.
    pub endpoint: String,

    /// Name of the environment variable that holds the API key.
    pub api_key_env: String,

    /// Words requested when no count is given.
    pub default_count: usize,

    /// HTTP timeout for one generation call.
    pub timeout_secs: u64,
}

/// How snapshot and export filenames are made distinct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingScheme {
    /// `<prefix>_<topic>_<YYYYmmdd_HHMMSS>`; two writes in the same second
    /// for the same topic overwrite each other.
    #[default]
    Seconds,
    /// Seconds timestamp plus microseconds and a per-process counter.
    Unique,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives snapshots and exports.
    pub dir: PathBuf,

    /// Filename collision policy.
    pub naming: NamingScheme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Root directory for downloaded images.
    pub dir: PathBuf,

    /// Images fetched per word.
    pub max_per_word: usize,

    /// Extra search terms appended to each word, e.g. "gaming term".
    pub search_suffix: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            default_count: DEFAULT_WORD_COUNT,
            timeout_secs: 60,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            naming: NamingScheme::Seconds,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("vocabulary_images"),
            max_per_word: 1,
            search_suffix: String::new(),
        }
    }
}

impl GenerationConfig {
    /// Read the API key from the configured environment variable.
    pub fn resolve_api_key(&self) -> CuratorResult<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CuratorError::Config(format!(
                "{} environment variable is not set",
                self.api_key_env
            ))),
        }
    }
}

impl CuratorConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> CuratorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CuratorError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save to a TOML file, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> CuratorResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CuratorError::Config(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexicon-curator")
            .join("config.toml")
    }

    /// Load from the default location, or fall back to defaults.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            warn!("Ignoring unreadable config: {}", e);
            Self::default()
        })
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> CuratorResult<String> {
        toml::to_string_pretty(self).map_err(|e| CuratorError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = CuratorConfig::default();
        config.generation.default_count = 12;
        config.output.naming = NamingScheme::Unique;
        config.images.search_suffix = "gaming term".into();
        config.save(&path).unwrap();

        let loaded = CuratorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nnaming = \"unique\"\n").unwrap();

        let loaded = CuratorConfig::load(&path).unwrap();
        assert_eq!(loaded.output.naming, NamingScheme::Unique);
        assert_eq!(loaded.output.dir, PathBuf::from("."));
        assert_eq!(loaded.generation.default_count, DEFAULT_WORD_COUNT);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "generation = 5").unwrap();
        match CuratorConfig::load(&path) {
            Err(CuratorError::Config(_)) => {}
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_api_key() {
        let config = GenerationConfig {
            api_key_env: "LEXICON_CURATOR_TEST_UNSET_KEY".into(),
            ..GenerationConfig::default()
        };
        assert!(matches!(
            config.resolve_api_key(),
            Err(CuratorError::Config(_))
        ));
    }
}
