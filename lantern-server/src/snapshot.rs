//! Immutable, versioned corpus snapshots.

use lantern_corpus::{encode_articles, ArticleSource, CorpusError};
use lantern_pir::{gen_hint, gen_params, Matrix, PirError, PirParams};
use thiserror::Error;

/// One generation of the encoded corpus.
///
/// A snapshot is assembled once and never mutated; it is shared as
/// `Arc<CorpusSnapshot>`. Connections pin a snapshot by cloning the Arc,
/// so an old generation stays alive exactly as long as its last holder
/// and is reclaimed the moment the strong count reaches zero.
#[derive(Debug)]
pub struct CorpusSnapshot {
    pub generation: u64,
    pub matrix: Matrix,
    pub hint: Matrix,
    pub params: PirParams,
    pub article_count: usize,
}

/// Errors from the load/encode/params/hint pipeline.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("corpus load failed: {0}")]
    Corpus(#[from] CorpusError),
    #[error("scheme setup failed: {0}")]
    Pir(#[from] PirError),
}

impl CorpusSnapshot {
    /// Encodes articles and derives parameters and hint for them.
    pub fn from_articles(articles: &[String], generation: u64) -> Result<Self, SnapshotError> {
        let (matrix, m) = encode_articles(articles)?;
        let params = gen_params(m)?;
        let hint = gen_hint(&params, &matrix)?;
        Ok(Self {
            generation,
            matrix,
            hint,
            params,
            article_count: articles.len(),
        })
    }

    /// Runs the full pipeline from an article source.
    pub(crate) fn load(source: &dyn ArticleSource, generation: u64) -> Result<Self, SnapshotError> {
        let articles = source.load_articles()?;
        Self::from_articles(&articles, generation)
    }
}
