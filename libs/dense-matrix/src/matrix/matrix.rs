//! Matrix.

use crate::{errors::MatrixError, lu::LuFactorization, matrix::iter::Elements};
use once_cell::sync::OnceCell;
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Dense matrix of `f64` stored in column-major order.
///
/// Element `(row, col)` lives at offset `col * nrows + row` of the backing buffer.
///
/// The LU factorization used by [`Matrix::determinant`], [`Matrix::inverse`] and
/// [`Matrix::solve`] is computed on first use and cached. Every method taking
/// `&mut self` drops the cached factorization.
#[derive(Clone)]
pub struct Matrix {
    /// Column-major elements.
    data: Vec<f64>,

    /// Number of rows.
    nrows: usize,

    /// Number of columns.
    ncols: usize,

    /// Cached factorization of `data`.
    lu: OnceCell<LuFactorization>,
}

fn checked_len(rows: usize, cols: usize) -> Result<usize, MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::InvalidSize { rows, cols });
    }
    rows.checked_mul(cols).ok_or(MatrixError::Arithmetic)
}

impl Matrix {
    /// New zero matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
        Self::filled(rows, cols, 0.0)
    }

    /// New matrix with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Matrix, MatrixError> {
        let len = checked_len(rows, cols)?;
        Ok(Self::from_parts(vec![value; len], rows, cols))
    }

    /// Builds a matrix over an existing column-major buffer.
    pub fn from_column_major(data: Vec<f64>, rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
        let len = checked_len(rows, cols)?;
        if len != data.len() {
            return Err(MatrixError::LengthMismatch { expected: len, got: data.len() });
        }
        Ok(Self::from_parts(data, rows, cols))
    }

    /// Square matrix with `diagonal` on its main diagonal and zeros elsewhere.
    pub fn from_diagonal(diagonal: &[f64]) -> Result<Matrix, MatrixError> {
        let n = diagonal.len();
        let mut m = Matrix::new(n, n)?;
        for (entry, value) in m.data.iter_mut().step_by(n + 1).zip(diagonal) {
            *entry = *value;
        }
        Ok(m)
    }

    /// Identity matrix.
    pub fn identity(n: usize) -> Result<Matrix, MatrixError> {
        Self::from_diagonal(&vec![1.0; n])
    }

    /// Callers guarantee `data.len() == rows * cols` and both sizes are non-zero.
    pub(crate) fn from_parts(data: Vec<f64>, nrows: usize, ncols: usize) -> Matrix {
        Matrix { data, nrows, ncols, lu: OnceCell::new() }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// The backing column-major buffer.
    pub fn as_column_major(&self) -> &[f64] {
        &self.data
    }

    /// Returns the data as a Vec consuming the matrix.
    pub fn to_vec(self) -> Vec<f64> {
        self.data
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, MatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::IndexOutOfRange { row, col, nrows: self.nrows, ncols: self.ncols });
        }
        Ok(col * self.nrows + row)
    }

    fn check_row(&self, row: usize) -> Result<(), MatrixError> {
        self.offset(row, 0).map(|_| ())
    }

    fn check_col(&self, col: usize) -> Result<(), MatrixError> {
        self.offset(0, col).map(|_| ())
    }

    /// Drops the cached factorization after a mutation.
    fn invalidate(&mut self) {
        if self.lu.take().is_some() {
            tracing::trace!("Dropped cached LU factorization of {}x{} matrix", self.nrows, self.ncols);
        }
    }

    /// Get the matrix entry `M[row,col]`.
    pub fn entry(&self, row: usize, col: usize) -> Result<&f64, MatrixError> {
        let index = self.offset(row, col)?;
        self.data.get(index).ok_or(MatrixError::Arithmetic)
    }

    /// Get a mutable reference to the matrix entry `M[row,col]`.
    pub fn entry_mut(&mut self, row: usize, col: usize) -> Result<&mut f64, MatrixError> {
        let index = self.offset(row, col)?;
        self.invalidate();
        self.data.get_mut(index).ok_or(MatrixError::Arithmetic)
    }

    /// Value of `M[row,col]`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.entry(row, col).copied()
    }

    /// Sets `M[row,col]` to `value`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        *self.entry_mut(row, col)? = value;
        Ok(())
    }

    /// Copies every element into `target`, which must have the same shape.
    pub fn copy_to(&self, target: &mut Matrix) -> Result<(), MatrixError> {
        if self.shape() != target.shape() {
            return Err(MatrixError::DimensionMismatch { left: self.shape(), right: target.shape() });
        }
        target.data.copy_from_slice(&self.data);
        // Same contents, so the source factorization is valid for the target as well.
        target.lu = self.lu.clone();
        Ok(())
    }

    /// Multiplies every element by -1 in place.
    pub fn negate(&mut self) {
        self.map_in_place(|value| -value);
    }

    /// New matrix of the same shape with `op` applied to every element.
    pub(crate) fn map(&self, op: impl Fn(f64) -> f64) -> Matrix {
        let data = self.data.iter().map(|value| op(*value)).collect();
        Self::from_parts(data, self.nrows, self.ncols)
    }

    pub(crate) fn map_in_place(&mut self, op: impl Fn(f64) -> f64) {
        self.invalidate();
        for value in self.data.iter_mut() {
            *value = op(*value);
        }
    }

    /// Elements of a row, left to right, without copying.
    pub fn row(&self, row: usize) -> Result<impl Iterator<Item = f64> + '_, MatrixError> {
        self.check_row(row)?;
        Ok(self.row_unchecked(row))
    }

    pub(crate) fn row_unchecked(&self, row: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().skip(row).step_by(self.nrows).copied()
    }

    /// Copy of a row.
    pub fn row_to_vec(&self, row: usize) -> Result<Vec<f64>, MatrixError> {
        Ok(self.row(row)?.collect())
    }

    /// Elements of a column, top to bottom, without copying.
    pub fn column(&self, col: usize) -> Result<impl Iterator<Item = f64> + '_, MatrixError> {
        Ok(self.column_slice(col)?.iter().copied())
    }

    fn column_slice(&self, col: usize) -> Result<&[f64], MatrixError> {
        self.check_col(col)?;
        let start = col * self.nrows;
        self.data.get(start..start + self.nrows).ok_or(MatrixError::Arithmetic)
    }

    /// Copy of a column.
    pub fn column_to_vec(&self, col: usize) -> Result<Vec<f64>, MatrixError> {
        Ok(self.column_slice(col)?.to_vec())
    }

    /// Overwrites a row, `values` must have `ncols` elements.
    pub fn set_row(&mut self, row: usize, values: &[f64]) -> Result<(), MatrixError> {
        self.check_row(row)?;
        if values.len() != self.ncols {
            return Err(MatrixError::LengthMismatch { expected: self.ncols, got: values.len() });
        }
        self.invalidate();
        let nrows = self.nrows;
        for (entry, value) in self.data.iter_mut().skip(row).step_by(nrows).zip(values) {
            *entry = *value;
        }
        Ok(())
    }

    /// Overwrites a column, `values` must have `nrows` elements.
    pub fn set_column(&mut self, col: usize, values: &[f64]) -> Result<(), MatrixError> {
        self.check_col(col)?;
        if values.len() != self.nrows {
            return Err(MatrixError::LengthMismatch { expected: self.nrows, got: values.len() });
        }
        self.invalidate();
        let start = col * self.nrows;
        let column = self.data.get_mut(start..start + values.len()).ok_or(MatrixError::Arithmetic)?;
        column.copy_from_slice(values);
        Ok(())
    }

    /// Top-left `rows x cols` block as a new matrix.
    pub fn trim_to(&self, rows: usize, cols: usize) -> Result<Matrix, MatrixError> {
        checked_len(rows, cols)?;
        if rows > self.nrows || cols > self.ncols {
            return Err(MatrixError::TrimOutOfBounds { rows, cols, nrows: self.nrows, ncols: self.ncols });
        }
        let data = self.data.chunks_exact(self.nrows).take(cols).flat_map(|column| column.iter().take(rows)).copied();
        Ok(Self::from_parts(data.collect(), rows, cols))
    }

    /// Transposed copy, `ncols x nrows`.
    pub fn transpose(&self) -> Matrix {
        let data = (0..self.nrows).flat_map(|row| self.row_unchecked(row)).collect();
        Self::from_parts(data, self.ncols, self.nrows)
    }

    /// Every element in row-major order.
    pub fn iter(&self) -> Elements<'_> {
        Elements::new(self)
    }

    /// Cached LU factorization, computed on first use.
    pub fn lu(&self) -> Result<&LuFactorization, MatrixError> {
        self.lu.get_or_try_init(|| LuFactorization::new(self))
    }

    /// Fresh LU factorization that is not stored in the cache.
    pub fn factorize(&self) -> Result<LuFactorization, MatrixError> {
        LuFactorization::new(self)
    }

    /// Matrix determinant, zero for singular matrices.
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        Ok(self.lu()?.determinant())
    }

    /// Whether the factorization found a zero pivot.
    pub fn is_singular(&self) -> Result<bool, MatrixError> {
        Ok(self.lu()?.is_singular())
    }

    /// Inverse of the matrix.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        self.lu()?.inverse()
    }

    /// Solves `self * X = rhs`.
    pub fn solve(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.lu()?.solve(rhs)
    }

    /// Solves `self * x = rhs` for a single right hand side.
    pub fn solve_vector(&self, rhs: &[f64]) -> Result<Vec<f64>, MatrixError> {
        self.lu()?.solve_vector(rhs)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data.iter().zip(&other.data).all(|(left, right)| left == right)
    }
}

impl Hash for Matrix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nrows.hash(state);
        self.ncols.hash(state);
        for value in &self.data {
            // 0.0 == -0.0, they must hash the same.
            let bits = if *value == 0.0 { 0 } else { value.to_bits() };
            bits.hash(state);
        }
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix").field("nrows", &self.nrows).field("ncols", &self.ncols).field("data", &self.data).finish()
    }
}

impl<const R: usize, const C: usize> TryFrom<[[f64; C]; R]> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: [[f64; C]; R]) -> Result<Self, Self::Error> {
        checked_len(R, C)?;
        let data = (0..C).flat_map(|col| rows.iter().filter_map(move |row| row.get(col).copied())).collect();
        Ok(Self::from_parts(data, R, C))
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let nrows = rows.len();
        let ncols = rows.first().map(Vec::len).unwrap_or_default();
        checked_len(nrows, ncols)?;
        if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
            return Err(MatrixError::LengthMismatch { expected: ncols, got: row.len() });
        }
        let data = (0..ncols).flat_map(|col| rows.iter().filter_map(move |row| row.get(col).copied())).collect();
        Ok(Self::from_parts(data, nrows, ncols))
    }
}
