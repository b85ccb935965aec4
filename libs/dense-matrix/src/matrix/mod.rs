//! Matrix type and operations.

pub mod format;
pub mod iter;
pub mod matrix;
pub mod ops;

pub use iter::Elements;
pub use matrix::Matrix;
