//! Manifest-driven article loading.
//!
//! A corpus directory holds a `manifest.json` naming the article files in
//! order, plus the files themselves. The manifest order is the contract:
//! it fixes which column of the encoded matrix each article occupies, so
//! a source must return the same ordering on every load.

use crate::error::CorpusError;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// The corpus manifest: an ordered list of article files.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub articles: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    pub filepath: PathBuf,
}

/// Something that can produce the ordered article texts.
///
/// Implementations must keep the ordering stable across calls; position
/// is the only identity an article has in the scheme.
pub trait ArticleSource: Send + Sync {
    fn load_articles(&self) -> Result<Vec<String>, CorpusError>;
}

/// Loads articles from a directory containing `manifest.json`.
///
/// Manifest paths are resolved relative to the corpus directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArticleSource for DirSource {
    fn load_articles(&self) -> Result<Vec<String>, CorpusError> {
        let manifest_path = self.root.join("manifest.json");
        let raw = fs::read_to_string(&manifest_path).map_err(|e| CorpusError::io(&manifest_path, e))?;
        let manifest: Manifest = serde_json::from_str(&raw)?;

        debug!("manifest lists {} articles", manifest.articles.len());

        let mut articles = Vec::with_capacity(manifest.articles.len());
        for entry in &manifest.articles {
            let path = self.root.join(&entry.filepath);
            let text = fs::read_to_string(&path).map_err(|e| CorpusError::io(&path, e))?;
            articles.push(text);
        }
        Ok(articles)
    }
}
