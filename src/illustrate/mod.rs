//! Image lookup for curated words.
//!
//! Finding image URLs and converting downloads are left to the
//! [`ImageFinder`] and [`ImageFetcher`] implementations; this module only
//! walks the active words and records what was saved where.

pub mod fetch;
pub mod list;

pub use fetch::HttpFetcher;
pub use list::UrlListFinder;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::ImageConfig;
use crate::format::ensure_parent;
use crate::store::VocabularyStore;
use crate::types::{timestamp_now, CuratorResult};

/// Name of the manifest written next to the images.
pub const MANIFEST_FILE: &str = "image_data.json";

/// Finds candidate image URLs for a search query.
pub trait ImageFinder: Send + Sync {
    fn find_images(&self, query: &str, max: usize) -> CuratorResult<Vec<String>>;
}

/// Stores the image at `url` as a local file.
pub trait ImageFetcher: Send + Sync {
    fn fetch_image(&self, url: &str, dest: &Path) -> CuratorResult<()>;
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ImageManifest {
    /// Directory the images and manifest were written to.
    pub dir: PathBuf,
    /// Saved image paths per word; empty when nothing was saved.
    pub images: BTreeMap<String, Vec<PathBuf>>,
}

impl ImageManifest {
    /// Words with at least one saved image.
    pub fn illustrated(&self) -> usize {
        self.images.values().filter(|v| !v.is_empty()).count()
    }
}

/// Fetches images for every active word in a store.
pub struct ImagePipeline {
    finder: Box<dyn ImageFinder>,
    fetcher: Box<dyn ImageFetcher>,
    config: ImageConfig,
}

impl ImagePipeline {
    pub fn new(
        finder: Box<dyn ImageFinder>,
        fetcher: Box<dyn ImageFetcher>,
        config: ImageConfig,
    ) -> Self {
        Self {
            finder,
            fetcher,
            config,
        }
    }

    /// Run into a fresh timestamped directory under the configured root.
    pub fn run(&self, store: &VocabularyStore) -> CuratorResult<ImageManifest> {
        let dir = self.config.dir.join(timestamp_now());
        self.run_into(store, &dir)
    }

    /// Run into `dir`. Lookup and download failures for a word are logged
    /// and leave that word with no images; only directory and manifest
    /// writes can fail the run.
    pub fn run_into(&self, store: &VocabularyStore, dir: &Path) -> CuratorResult<ImageManifest> {
        std::fs::create_dir_all(dir)?;
        let mut images: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for word in store.active_words() {
            if images.contains_key(word) {
                continue;
            }
            let saved = self.fetch_word(word, dir);
            if saved.is_empty() {
                warn!("No images saved for {:?}", word);
            }
            images.insert(word.to_string(), saved);
        }

        let manifest = ImageManifest {
            dir: dir.to_path_buf(),
            images,
        };
        let manifest_path = dir.join(MANIFEST_FILE);
        ensure_parent(&manifest_path)?;
        let file = std::fs::File::create(&manifest_path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &manifest.images)?;
        info!(
            "Images for {}/{} words saved to {}",
            manifest.illustrated(),
            manifest.images.len(),
            dir.display()
        );
        Ok(manifest)
    }

    fn search_query(&self, word: &str) -> String {
        let suffix = self.config.search_suffix.trim();
        if suffix.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", word, suffix)
        }
    }

    fn fetch_word(&self, word: &str, dir: &Path) -> Vec<PathBuf> {
        let max = self.config.max_per_word;
        let urls = match self.finder.find_images(&self.search_query(word), max) {
            Ok(urls) => urls,
            Err(e) => {
                warn!("Image lookup for {:?} failed: {}", word, e);
                return Vec::new();
            }
        };

        let mut saved = Vec::new();
        for (i, url) in urls.iter().take(max).enumerate() {
            let path = dir.join(format!("{}_{}.jpg", file_safe(word), i + 1));
            match self.fetcher.fetch_image(url, &path) {
                Ok(()) => {
                    debug!("Saved {} -> {}", url, path.display());
                    saved.push(path);
                }
                Err(e) => warn!("Download of {} failed: {}", url, e),
            }
        }
        saved
    }
}

fn file_safe(word: &str) -> String {
    word.replace(['/', '\\'], "_")
}
