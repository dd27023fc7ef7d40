//! Hint derivation and query answering.
//!
//! The hint is `db * a^T`: with it, a client holding the LWE secret can
//! subtract the masked part of an answer and recover one database column.
//! Answering is a single matrix-vector product; the server learns nothing
//! about which column the query selects.

use crate::error::PirError;
use crate::matrix::Matrix;
use crate::params::PirParams;

/// Derives the client hint for `db` under `params`.
///
/// `db` is r x m and `params.a` is n x m, so the hint comes out r x n.
pub fn gen_hint(params: &PirParams, db: &Matrix) -> Result<Matrix, PirError> {
    if db.num_cols() != params.m {
        return Err(PirError::ParamsMismatch {
            expected: params.m,
            got: db.num_cols(),
        });
    }
    db.mul_transpose(&params.a, params.q)
}

/// Answers one query against `db` modulo `q`.
///
/// The query must have one entry per database column; the answer has one
/// entry per database row.
pub fn answer(query: &[u64], db: &Matrix, q: u64) -> Result<Vec<u64>, PirError> {
    db.mul_vec(query, q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{gen_params_from_seed, LWE_DIMENSION, MODULUS, SEED_BYTE_LEN};

    fn small_db() -> Matrix {
        Matrix::from_rows(vec![vec![10, 20, 30], vec![40, 50, 60], vec![70, 80, 90]]).unwrap()
    }

    #[test]
    fn test_hint_has_row_by_secret_dimensions() {
        let db = small_db();
        let params = gen_params_from_seed(3, [1u8; SEED_BYTE_LEN]).unwrap();
        let hint = gen_hint(&params, &db).unwrap();
        assert_eq!(hint.num_rows(), 3);
        assert_eq!(hint.num_cols(), LWE_DIMENSION);
    }

    #[test]
    fn test_hint_rejects_mismatched_database() {
        let db = small_db();
        let params = gen_params_from_seed(4, [1u8; SEED_BYTE_LEN]).unwrap();
        assert_eq!(
            gen_hint(&params, &db),
            Err(PirError::ParamsMismatch { expected: 4, got: 3 })
        );
    }

    #[test]
    fn test_answer_length_matches_rows() {
        let db = small_db();
        let out = answer(&[1, 0, 0], &db, MODULUS).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_indicator_query_retrieves_a_column() {
        // An unmasked indicator vector pulls out exactly one column; the
        // real client adds LWE noise on top of this.
        let db = small_db();
        let out = answer(&[0, 1, 0], &db, MODULUS).unwrap();
        assert_eq!(out, db.column(1));
    }

    #[test]
    fn test_answer_rejects_wrong_length_query() {
        let db = small_db();
        assert_eq!(
            answer(&[1, 0], &db, MODULUS),
            Err(PirError::VectorLengthMismatch { expected: 3, got: 2 })
        );
    }
}
