//! Textual rendering.
//!
//! Rows are rendered top to bottom, separated by newlines, with the values of a
//! row separated by `", "`. Formatter flags apply to every element, so
//! `format!("{:.2}", m)` prints each value with two decimals.

use crate::matrix::Matrix;
use std::fmt;

impl Matrix {
    fn write_rows(&self, f: &mut fmt::Formatter<'_>, element: fn(&f64, &mut fmt::Formatter<'_>) -> fmt::Result) -> fmt::Result {
        for row in 0..self.nrows() {
            if row > 0 {
                f.write_str("\n")?;
            }
            for (col, value) in self.row_unchecked(row).enumerate() {
                if col > 0 {
                    f.write_str(", ")?;
                }
                element(&value, f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rows(f, <f64 as fmt::Display>::fmt)
    }
}

impl fmt::LowerExp for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rows(f, <f64 as fmt::LowerExp>::fmt)
    }
}
