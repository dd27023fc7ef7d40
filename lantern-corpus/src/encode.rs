//! Text to matrix encoding.

use crate::error::CorpusError;
use lantern_pir::Matrix;
use tracing::debug;

/// Encodes articles into a square database matrix.
///
/// Column `j` holds article `j`'s UTF-8 bytes top to bottom, zero-padded.
/// The matrix is padded square with side
/// `m = max(article count, longest article in bytes)`, so the single
/// dimension `m` is all that parameter generation needs. Byte values stay
/// below the scheme's plaintext modulus as-is.
///
/// Returns the matrix together with `m`.
pub fn encode_articles(articles: &[String]) -> Result<(Matrix, usize), CorpusError> {
    if articles.is_empty() {
        return Err(CorpusError::Empty);
    }

    let longest = articles.iter().map(|a| a.len()).max().unwrap_or(0);
    let m = longest.max(articles.len()).max(1);

    let mut matrix = Matrix::zeroed(m, m)?;
    for (col, article) in articles.iter().enumerate() {
        for (row, byte) in article.bytes().enumerate() {
            matrix[(row, col)] = u64::from(byte);
        }
    }

    debug!("encoded {} articles into a {m}x{m} matrix", articles.len());
    Ok((matrix, m))
}
