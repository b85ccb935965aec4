//! Row-major traversal.

use crate::matrix::Matrix;
use std::iter::FusedIterator;

/// Iterator over every element of a [`Matrix`], row by row.
#[derive(Clone, Debug)]
pub struct Elements<'a> {
    matrix: &'a Matrix,
    row: usize,
    col: usize,
}

impl<'a> Elements<'a> {
    pub(crate) fn new(matrix: &'a Matrix) -> Self {
        Elements { matrix, row: 0, col: 0 }
    }
}

impl Iterator for Elements<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.row >= self.matrix.nrows() {
            return None;
        }
        let value = self.matrix.entry(self.row, self.col).ok().copied();
        self.col += 1;
        if self.col == self.matrix.ncols() {
            self.col = 0;
            self.row += 1;
        }
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let ncols = self.matrix.ncols();
        let consumed = (self.row * ncols + self.col).min(self.matrix.nrows() * ncols);
        let remaining = self.matrix.nrows() * ncols - consumed;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Elements<'_> {}

impl FusedIterator for Elements<'_> {}

impl<'a> IntoIterator for &'a Matrix {
    type Item = f64;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Elements<'a> {
        self.iter()
    }
}
