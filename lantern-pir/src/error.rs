use thiserror::Error;

/// Errors from matrix construction and scheme operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PirError {
    #[error("matrix must have non-zero rows and columns")]
    InvalidDimension,
    #[error("matrix rows must all have the same length")]
    RaggedRows,
    #[error("vector of length {got} cannot multiply a matrix with {expected} columns")]
    VectorLengthMismatch { expected: usize, got: usize },
    #[error("matrix product needs matching inner dimensions ({lhs} vs {rhs})")]
    IncompatibleDimensions { lhs: usize, rhs: usize },
    #[error("parameter set expects {expected} database columns, matrix has {got}")]
    ParamsMismatch { expected: usize, got: usize },
}
