//! Lantern Corpus - article loading and matrix encoding
//!
//! This crate turns a directory of article texts into the matrix the
//! retrieval scheme operates on. Articles are listed in a manifest and
//! loaded strictly in manifest order, because a client addresses an
//! article by its position: column `j` of the encoded matrix belongs to
//! article `j`, and nothing else ties an answer back to a text.

mod encode;
mod error;
mod source;

pub use encode::encode_articles;
pub use error::CorpusError;
pub use source::{ArticleSource, DirSource, Manifest, ManifestEntry};
