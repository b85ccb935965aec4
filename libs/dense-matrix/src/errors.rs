//! Crate errors.

use thiserror::Error;

/// Matrix Error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A matrix needs at least one row and one column.
    #[error("invalid matrix size {rows}x{cols}, both dimensions must be at least 1")]
    InvalidSize {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// Integer overflow computing the buffer length.
    #[error("integer overflow computing matrix size")]
    Arithmetic,

    /// Row or column outside of the matrix.
    #[error("index ({row}, {col}) out of range for a {nrows}x{ncols} matrix")]
    IndexOutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Rows in the matrix.
        nrows: usize,
        /// Columns in the matrix.
        ncols: usize,
    },

    /// Operand shapes are incompatible for the operation.
    #[error("dimension mismatch: {}x{} and {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        /// Shape of the left operand as `(rows, cols)`.
        left: (usize, usize),
        /// Shape of the right operand as `(rows, cols)`.
        right: (usize, usize),
    },

    /// A slice has the wrong number of elements.
    #[error("length mismatch: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Given length.
        got: usize,
    },

    /// The operation is only defined for square matrices.
    #[error("matrix is not square: {nrows}x{ncols}")]
    NotSquare {
        /// Rows in the matrix.
        nrows: usize,
        /// Columns in the matrix.
        ncols: usize,
    },

    /// Requested a sub-block larger than the matrix.
    #[error("cannot trim a {nrows}x{ncols} matrix to {rows}x{cols}")]
    TrimOutOfBounds {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
        /// Rows in the matrix.
        nrows: usize,
        /// Columns in the matrix.
        ncols: usize,
    },

    /// Non-invertible, singular matrix.
    #[error("singular matrix can't be inverted")]
    Singular,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dimension_mismatch_message() {
        let error = MatrixError::DimensionMismatch { left: (2, 3), right: (2, 3) };
        assert_eq!(error.to_string(), "dimension mismatch: 2x3 and 2x3");
    }

    #[test]
    fn index_message() {
        let error = MatrixError::IndexOutOfRange { row: 4, col: 0, nrows: 2, ncols: 2 };
        assert_eq!(error.to_string(), "index (4, 0) out of range for a 2x2 matrix");
    }
}
