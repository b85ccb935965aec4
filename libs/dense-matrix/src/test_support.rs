//! Seeded matrix generators for tests and benchmarks.

use crate::matrix::Matrix;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Matrix with entries uniformly drawn from `[-1, 1)`.
///
/// Panics when `rows` or `cols` is zero.
#[allow(clippy::expect_used)]
pub fn random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Matrix::from_column_major(data, rows, cols).expect("non-empty shape")
}

/// Random square matrix made strictly diagonally dominant, hence non-singular.
#[allow(clippy::expect_used)]
pub fn random_invertible(n: usize, seed: u64) -> Matrix {
    let shift = Matrix::from_diagonal(&vec![n as f64; n]).expect("non-empty shape");
    (&random_matrix(n, n, seed) + &shift).expect("same shape")
}
