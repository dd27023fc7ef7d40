use lantern_pir::PirError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or encoding a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("corpus contains no articles")]
    Empty,
    #[error(transparent)]
    Pir(#[from] PirError),
}

impl CorpusError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        CorpusError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
