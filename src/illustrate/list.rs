//! Image URLs read from a prepared word-to-URL list.

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::ImageFinder;
use crate::types::{CuratorError, CuratorResult};

/// Looks words up in a JSON object of the form `{"word": ["url", ...]}`.
///
/// Keys match case-insensitively. A search query with extra terms after the
/// word (`"respawn gaming term"`) matches the longest key it starts with.
#[derive(Debug, Clone, Default)]
pub struct UrlListFinder {
    urls: HashMap<String, Vec<String>>,
}

impl UrlListFinder {
    pub fn new(urls: HashMap<String, Vec<String>>) -> Self {
        Self {
            urls: urls
                .into_iter()
                .map(|(word, list)| (word.trim().to_lowercase(), list))
                .collect(),
        }
    }

    /// Parse a JSON list.
    pub fn from_json(text: &str) -> CuratorResult<Self> {
        let urls: HashMap<String, Vec<String>> = serde_json::from_str(text)
            .map_err(|e| CuratorError::Image(format!("invalid URL list: {}", e)))?;
        Ok(Self::new(urls))
    }

    /// Read a JSON list from a file.
    pub fn load(path: &Path) -> CuratorResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    fn lookup(&self, query: &str) -> Option<&Vec<String>> {
        let query = query.trim().to_lowercase();
        if let Some(list) = self.urls.get(&query) {
            return Some(list);
        }
        self.urls
            .iter()
            .filter(|(word, _)| {
                query
                    .strip_prefix(word.as_str())
                    .is_some_and(|rest| rest.starts_with(' '))
            })
            .max_by_key(|(word, _)| word.len())
            .map(|(_, list)| list)
    }
}

impl ImageFinder for UrlListFinder {
    fn find_images(&self, query: &str, max: usize) -> CuratorResult<Vec<String>> {
        match self.lookup(query) {
            Some(list) => Ok(list.iter().take(max).cloned().collect()),
            None => {
                debug!("url list: nothing for {:?}", query);
                Ok(Vec::new())
            }
        }
    }
}
