//! Plain HTTP image download.

use std::path::Path;
use std::time::Duration;

use super::ImageFetcher;
use crate::format::ensure_parent;
use crate::types::{CuratorError, CuratorResult};

/// Per-request timeout for image downloads.
const DOWNLOAD_TIMEOUT_SECS: u64 = 10;

/// Downloads the image bytes unchanged.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> CuratorResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| CuratorError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch_image(&self, url: &str, dest: &Path) -> CuratorResult<()> {
        let response = self
            .client
            .get(url)
            .header("Accept", "image/webp,*/*")
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CuratorError::Image(format!("download failed: {}", e)))?;
        let bytes = response
            .bytes()
            .map_err(|e| CuratorError::Image(format!("download failed: {}", e)))?;
        ensure_parent(dest)?;
        std::fs::write(dest, &bytes)?;
        Ok(())
    }
}
