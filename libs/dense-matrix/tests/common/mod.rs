//! Logger and matrix generators for integration tests.

use dense_matrix::Matrix;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Installs a fmt subscriber the first time it is dereferenced.
pub static LOGGER_INIT: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).with_test_writer().try_init();
});

/// Matrix with entries uniformly drawn from `[-1, 1)`.
pub fn random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Matrix::from_column_major(data, rows, cols).unwrap()
}

/// Random strictly diagonally dominant matrix.
pub fn random_invertible(n: usize, seed: u64) -> Matrix {
    let shift = Matrix::from_diagonal(&vec![n as f64; n]).unwrap();
    (&random_matrix(n, n, seed) + &shift).unwrap()
}
