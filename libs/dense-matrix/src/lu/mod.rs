//! LU factorization engine.

pub mod factorization;

pub use factorization::LuFactorization;
