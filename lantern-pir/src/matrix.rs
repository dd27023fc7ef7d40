//! Row-major matrix with arithmetic modulo a scheme modulus.
//!
//! Matrices cross the wire as nested JSON arrays (one inner array per
//! row), so the serde implementations here produce and consume exactly
//! that shape rather than a struct with named fields.

use crate::error::PirError;
use rand::Rng;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    elems: Vec<u64>,
}

impl Matrix {
    /// Creates a zero-filled matrix. Both dimensions must be non-zero.
    pub fn zeroed(rows: usize, cols: usize) -> Result<Matrix, PirError> {
        if rows == 0 || cols == 0 {
            return Err(PirError::InvalidDimension);
        }
        Ok(Matrix {
            rows,
            cols,
            elems: vec![0; rows * cols],
        })
    }

    /// Builds a matrix from row vectors, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Matrix, PirError> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(PirError::InvalidDimension);
        }
        let mut elems = Vec::with_capacity(nrows * ncols);
        for row in &rows {
            if row.len() != ncols {
                return Err(PirError::RaggedRows);
            }
            elems.extend_from_slice(row);
        }
        Ok(Matrix {
            rows: nrows,
            cols: ncols,
            elems,
        })
    }

    /// Fills a matrix with elements drawn uniformly from `[0, q)`.
    pub fn random<R: Rng>(rows: usize, cols: usize, q: u64, rng: &mut R) -> Result<Matrix, PirError> {
        if rows == 0 || cols == 0 {
            return Err(PirError::InvalidDimension);
        }
        let elems = (0..rows * cols).map(|_| rng.random_range(0..q)).collect();
        Ok(Matrix { rows, cols, elems })
    }

    pub const fn num_rows(&self) -> usize {
        self.rows
    }

    pub const fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, r: usize) -> &[u64] {
        &self.elems[r * self.cols..(r + 1) * self.cols]
    }

    /// Copies out column `c`. Handy for checking what a query would retrieve.
    pub fn column(&self, c: usize) -> Vec<u64> {
        (0..self.rows).map(|r| self[(r, c)]).collect()
    }

    /// Multiplies `self` (r x c) by a column vector of length c, modulo `q`.
    pub fn mul_vec(&self, vector: &[u64], q: u64) -> Result<Vec<u64>, PirError> {
        if vector.len() != self.cols {
            return Err(PirError::VectorLengthMismatch {
                expected: self.cols,
                got: vector.len(),
            });
        }
        let q = u128::from(q);
        let out = (0..self.rows)
            .map(|r| {
                let acc = self
                    .row(r)
                    .iter()
                    .zip(vector)
                    .fold(0u128, |acc, (&a, &b)| (acc + u128::from(a) * u128::from(b)) % q);
                acc as u64
            })
            .collect();
        Ok(out)
    }

    /// Multiplies `self` (r x m) by the transpose of `other` (n x m),
    /// yielding an r x n matrix modulo `q`.
    pub fn mul_transpose(&self, other: &Matrix, q: u64) -> Result<Matrix, PirError> {
        if self.cols != other.cols {
            return Err(PirError::IncompatibleDimensions {
                lhs: self.cols,
                rhs: other.cols,
            });
        }
        let q128 = u128::from(q);
        let mut out = Matrix::zeroed(self.rows, other.rows)?;
        for r in 0..self.rows {
            let lhs = self.row(r);
            for c in 0..other.rows {
                let acc = lhs
                    .iter()
                    .zip(other.row(c))
                    .fold(0u128, |acc, (&a, &b)| (acc + u128::from(a) * u128::from(b)) % q128);
                out[(r, c)] = acc as u64;
            }
        }
        Ok(out)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = u64;

    fn index(&self, (r, c): (usize, usize)) -> &u64 {
        &self.elems[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut u64 {
        &mut self.elems[r * self.cols + c]
    }
}

impl Serialize for Matrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for r in 0..self.rows {
            seq.serialize_element(self.row(r))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<u64>>::deserialize(deserializer)?;
        Matrix::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
