//! Dense, column-major `f64` matrices with cached LU factorization.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::iterator_step_by_zero,
    clippy::string_slice,
    clippy::unimplemented,
    clippy::todo
)]
#![allow(clippy::module_inception)]

pub mod errors;
pub mod lu;
pub mod matrix;
#[cfg(any(test, feature = "bench"))]
pub mod test_support;

pub use errors::MatrixError;
pub use lu::LuFactorization;
pub use matrix::Matrix;
