//! Matrix Operations
//!
//! Binary operators never mutate their operands. Matrix-matrix operators return
//! `Result` since the shapes may be incompatible, scalar operators can't fail.
//! The compound assignment operators (`+=`, `*=`, ...) with a scalar are the
//! in-place counterparts.

use crate::{errors::MatrixError, matrix::Matrix};
use paste::paste;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign};

fn check_same_shape(left: &Matrix, right: &Matrix) -> Result<(), MatrixError> {
    if left.nrows() != right.nrows() || left.ncols() != right.ncols() {
        return Err(MatrixError::DimensionMismatch { left: left.shape(), right: right.shape() });
    }
    Ok(())
}

/// Element-wise `Matrix op Matrix`.
macro_rules! impl_elementwise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&Matrix> for &Matrix {
            type Output = Result<Matrix, MatrixError>;

            fn $method(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
                check_same_shape(self, rhs)?;
                let data = self.as_column_major().iter().zip(rhs.as_column_major()).map(|(l, r)| l $op r).collect();
                Ok(Matrix::from_parts(data, self.nrows(), self.ncols()))
            }
        }

        impl $trait<&Matrix> for Matrix {
            type Output = Result<Matrix, MatrixError>;

            fn $method(self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
                (&self).$method(rhs)
            }
        }
    };
}

/// `Matrix op f64` applied to every element, plus its `op=` form.
macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        paste! {
            impl $trait<f64> for &Matrix {
                type Output = Matrix;

                fn $method(self, rhs: f64) -> Matrix {
                    self.map(|value| value $op rhs)
                }
            }

            impl $trait<f64> for Matrix {
                type Output = Matrix;

                fn $method(mut self, rhs: f64) -> Matrix {
                    self.[<$method _assign>](rhs);
                    self
                }
            }

            impl [<$trait Assign>]<f64> for Matrix {
                fn [<$method _assign>](&mut self, rhs: f64) {
                    self.map_in_place(|value| value $op rhs);
                }
            }
        }
    };
}

impl_elementwise_op!(Add, add, +);
impl_elementwise_op!(Sub, sub, -);
impl_elementwise_op!(Div, div, /);

impl_scalar_op!(Add, add, +);
impl_scalar_op!(Sub, sub, -);
impl_scalar_op!(Mul, mul, *);
impl_scalar_op!(Div, div, /);
impl_scalar_op!(Rem, rem, %);

impl Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix, MatrixError>;

    /// Naive matrix multiplication, A: MxK * B: KxN -> C: MxN, O(KMN).
    fn mul(self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.ncols() != other.nrows() {
            return Err(MatrixError::DimensionMismatch { left: self.shape(), right: other.shape() });
        }
        let len = self.nrows().checked_mul(other.ncols()).ok_or(MatrixError::Arithmetic)?;
        let mut data = vec![0.0; len];
        let left_columns = self.as_column_major().chunks_exact(self.nrows());
        let right_columns = other.as_column_major().chunks_exact(other.nrows());
        for (out_column, right_column) in data.chunks_exact_mut(self.nrows()).zip(right_columns) {
            // out[:, j] = sum_l left[:, l] * right[l, j]
            for (left_column, r) in left_columns.clone().zip(right_column) {
                for (out, l) in out_column.iter_mut().zip(left_column) {
                    *out += l * r;
                }
            }
        }
        Ok(Matrix::from_parts(data, self.nrows(), other.ncols()))
    }
}

impl Mul<&Matrix> for Matrix {
    type Output = Result<Matrix, MatrixError>;

    fn mul(self, other: &Matrix) -> Result<Matrix, MatrixError> {
        (&self).mul(other)
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}
