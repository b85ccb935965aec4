//! LU factorization with partial pivoting.

use crate::{errors::MatrixError, matrix::Matrix};

/// LU factorization of a square matrix, `P * A = L * U`.
///
/// `L` is unit lower triangular and stored below the diagonal of the working
/// buffer, `U` is upper triangular and stored on and above it. The buffer is
/// column-major like [`Matrix`].
///
/// Row `i` of `P * A` is row `pivots()[i]` of `A`.
#[derive(Clone, Debug, PartialEq)]
pub struct LuFactorization {
    /// Combined `L` and `U` factors.
    lu: Vec<f64>,

    /// Matrix order.
    n: usize,

    /// Row permutation, always a full permutation of `0..n`.
    pivots: Vec<usize>,

    /// `+1` or `-1` depending on the parity of the row swaps.
    pivot_sign: f64,

    /// Whether a zero landed on the diagonal of `U`.
    singular: bool,

    /// Determinant, zero if singular.
    determinant: f64,
}

impl LuFactorization {
    /// Factorizes a square matrix, O(N^3).
    #[allow(clippy::indexing_slicing)]
    pub fn new(matrix: &Matrix) -> Result<LuFactorization, MatrixError> {
        if !matrix.is_square() {
            return Err(MatrixError::NotSquare { nrows: matrix.nrows(), ncols: matrix.ncols() });
        }
        let n = matrix.nrows();
        let mut lu = matrix.as_column_major().to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();
        let mut pivot_sign = 1.0;
        let mut column = vec![0.0; n];

        // Every offset below is `col * n + row` with `row, col < n`.
        for j in 0..n {
            column.copy_from_slice(&lu[j * n..(j + 1) * n]);

            // Apply the multipliers of the columns already eliminated.
            for i in 0..n {
                let kmax = i.min(j);
                let mut s = 0.0;
                for k in 0..kmax {
                    s += lu[k * n + i] * column[k];
                }
                column[i] -= s;
                lu[j * n + i] = column[i];
            }

            let mut p = j;
            for i in j + 1..n {
                if column[i].abs() > column[p].abs() {
                    p = i;
                }
            }
            if p != j {
                for k in 0..n {
                    lu.swap(k * n + p, k * n + j);
                }
                pivots.swap(p, j);
                pivot_sign = -pivot_sign;
            }

            let diagonal = lu[j * n + j];
            if diagonal != 0.0 {
                for i in j + 1..n {
                    lu[j * n + i] /= diagonal;
                }
            }
        }

        let diagonal = lu.iter().step_by(n + 1);
        let singular = diagonal.clone().any(|value| *value == 0.0);
        let determinant = if singular { 0.0 } else { diagonal.fold(pivot_sign, |product, value| product * value) };
        tracing::debug!("Computed LU factorization of order {n}, singular: {singular}");

        Ok(LuFactorization { lu, n, pivots, pivot_sign, singular, determinant })
    }

    /// Matrix order.
    pub fn order(&self) -> usize {
        self.n
    }

    /// Row permutation applied before factorizing.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Sign of the row permutation.
    pub fn pivot_sign(&self) -> f64 {
        self.pivot_sign
    }

    /// Whether the factorized matrix is singular.
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Determinant of the factorized matrix.
    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    /// Unit lower triangular factor.
    pub fn lower(&self) -> Matrix {
        self.triangle(|row, col| row > col, 1.0)
    }

    /// Upper triangular factor.
    pub fn upper(&self) -> Matrix {
        self.triangle(|row, col| row <= col, 0.0)
    }

    fn triangle(&self, keep: impl Fn(usize, usize) -> bool, diagonal: f64) -> Matrix {
        let n = self.n;
        let data = self
            .lu
            .iter()
            .enumerate()
            .map(|(offset, value)| {
                let (row, col) = (offset % n, offset / n);
                if keep(row, col) {
                    *value
                } else if row == col {
                    diagonal
                } else {
                    0.0
                }
            })
            .collect();
        Matrix::from_parts(data, n, n)
    }

    /// Inverse of the factorized matrix.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        self.solve(&Matrix::identity(self.n)?)
    }

    /// Solves `A * X = rhs` for every column of `rhs`.
    pub fn solve(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if rhs.nrows() != self.n {
            return Err(MatrixError::DimensionMismatch { left: (self.n, self.n), right: rhs.shape() });
        }
        if self.singular {
            return Err(MatrixError::Singular);
        }
        let mut data = Vec::with_capacity(rhs.as_column_major().len());
        for column in rhs.as_column_major().chunks_exact(self.n) {
            data.extend(self.solve_column(column));
        }
        Ok(Matrix::from_parts(data, self.n, rhs.ncols()))
    }

    /// Solves `A * x = rhs`.
    pub fn solve_vector(&self, rhs: &[f64]) -> Result<Vec<f64>, MatrixError> {
        if rhs.len() != self.n {
            return Err(MatrixError::LengthMismatch { expected: self.n, got: rhs.len() });
        }
        if self.singular {
            return Err(MatrixError::Singular);
        }
        Ok(self.solve_column(rhs))
    }

    /// Callers guarantee `rhs.len() == n` and a non-singular factorization.
    #[allow(clippy::indexing_slicing)]
    fn solve_column(&self, rhs: &[f64]) -> Vec<f64> {
        let n = self.n;
        let lu = &self.lu;
        let mut x: Vec<f64> = self.pivots.iter().map(|&pivot| rhs[pivot]).collect();

        // Forward substitution: L * y = P * b
        for k in 0..n {
            for i in k + 1..n {
                x[i] -= x[k] * lu[k * n + i];
            }
        }

        // Backward substitution: U * x = y
        for k in (0..n).rev() {
            x[k] /= lu[k * n + k];
            for i in 0..k {
                x[i] -= x[k] * lu[k * n + i];
            }
        }
        x
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod test {
    use super::*;
    use crate::test_support::random_matrix;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn assert_matrix_near(left: &Matrix, right: &Matrix) {
        assert_eq!(left.shape(), right.shape());
        for (l, r) in left.iter().zip(right.iter()) {
            assert_abs_diff_eq!(l, r, epsilon = 1e-9);
        }
    }

    fn permuted(matrix: &Matrix, pivots: &[usize]) -> Matrix {
        let mut result = matrix.clone();
        for (row, pivot) in pivots.iter().enumerate() {
            result.set_row(row, &matrix.row_to_vec(*pivot).unwrap()).unwrap();
        }
        result
    }

    #[test]
    fn lower_upper_decompose() {
        let matrix = Matrix::try_from([[1.0, 4.0, 10.0], [11.0, 8.0, 5.0], [3.0, 4.0, 7.0]]).unwrap();
        let lu = LuFactorization::new(&matrix).unwrap();
        let product = (lu.lower() * &lu.upper()).unwrap();
        assert_matrix_near(&product, &permuted(&matrix, lu.pivots()));
        assert_eq!(lu.pivots()[0], 1);
    }

    #[rstest]
    #[case(3, 1)]
    #[case(6, 7)]
    #[case(12, 42)]
    fn random_decompositions(#[case] n: usize, #[case] seed: u64) {
        let matrix = random_matrix(n, n, seed);
        let lu = LuFactorization::new(&matrix).unwrap();
        let mut pivots = lu.pivots().to_vec();
        pivots.sort_unstable();
        assert_eq!(pivots, (0..n).collect::<Vec<_>>());

        let product = (lu.lower() * &lu.upper()).unwrap();
        assert_matrix_near(&product, &permuted(&matrix, lu.pivots()));
    }

    #[test]
    fn determinant() {
        let matrix = Matrix::try_from([[4.0, 3.0], [6.0, 3.0]]).unwrap();
        let lu = LuFactorization::new(&matrix).unwrap();
        assert_abs_diff_eq!(lu.determinant(), -6.0, epsilon = 1e-12);
        assert_eq!(lu.pivot_sign(), -1.0);
        assert!(!lu.is_singular());
    }

    #[test]
    fn determinant_of_triangular() {
        let matrix = Matrix::try_from([[2.0, 1.0, 7.0], [0.0, 3.0, -1.0], [0.0, 0.0, 4.0]]).unwrap();
        let lu = LuFactorization::new(&matrix).unwrap();
        assert_eq!(lu.determinant(), 24.0);
        assert_eq!(lu.pivots(), &[0, 1, 2]);
    }

    #[test]
    fn zero_row_is_singular() {
        let matrix = Matrix::try_from([[1.0, 2.0], [0.0, 0.0]]).unwrap();
        let lu = LuFactorization::new(&matrix).unwrap();
        assert!(lu.is_singular());
        assert_eq!(lu.determinant(), 0.0);
        assert_eq!(lu.inverse().unwrap_err(), MatrixError::Singular);
        assert_eq!(lu.solve_vector(&[1.0, 1.0]).unwrap_err(), MatrixError::Singular);
    }

    #[test]
    fn needs_pivoting() {
        let matrix = Matrix::try_from([[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let lu = LuFactorization::new(&matrix).unwrap();
        assert_eq!(lu.determinant(), -1.0);
        assert_eq!(lu.inverse().unwrap(), matrix);
    }

    #[test]
    fn inverse() {
        let matrix = Matrix::try_from([[1.0, 1.0, 1.0], [1.0, 2.0, 4.0], [1.0, 3.0, 9.0]]).unwrap();
        let inverse = LuFactorization::new(&matrix).unwrap().inverse().unwrap();
        let expected = Matrix::try_from([[3.0, -3.0, 1.0], [-2.5, 4.0, -1.5], [0.5, -1.0, 0.5]]).unwrap();
        assert_matrix_near(&inverse, &expected);
    }

    #[test]
    fn solve_vector() {
        let matrix = Matrix::try_from([[4.0, 1.0], [1.0, 3.0]]).unwrap();
        let lu = LuFactorization::new(&matrix).unwrap();
        let x = lu.solve_vector(&[1.0, 2.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0 / 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 7.0 / 11.0, epsilon = 1e-12);
        assert_eq!(lu.solve_vector(&[1.0]).unwrap_err(), MatrixError::LengthMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn solve_shape_mismatch() {
        let lu = LuFactorization::new(&Matrix::identity(2).unwrap()).unwrap();
        let rhs = Matrix::new(3, 1).unwrap();
        assert_eq!(lu.solve(&rhs).unwrap_err(), MatrixError::DimensionMismatch { left: (2, 2), right: (3, 1) });
    }

    #[test]
    fn not_square() {
        let matrix = Matrix::new(3, 2).unwrap();
        assert_eq!(LuFactorization::new(&matrix).unwrap_err(), MatrixError::NotSquare { nrows: 3, ncols: 2 });
    }

    #[test]
    fn single_element() {
        let lu = LuFactorization::new(&Matrix::filled(1, 1, 4.0).unwrap()).unwrap();
        assert_eq!(lu.determinant(), 4.0);
        assert_eq!(lu.inverse().unwrap(), Matrix::filled(1, 1, 0.25).unwrap());
    }
}
