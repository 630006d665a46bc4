//! Rectangular sub-views of a [`Matrix`].

use std::fmt;

use crate::{eval::fmt_expr, Caps, Dim, Expr, ExprTraits, Operand, Scalar, COST_READ};

use super::Matrix;

/// Sub-view construction.
impl<T> Matrix<T> {
    /// Creates an immutable view of the `rows`×`cols` block whose top left element is at
    /// `(row, col)`.
    ///
    /// # Panics
    ///
    /// This method will panic if the block does not lie entirely inside of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mat = Matrix::from_fn(3, 3, |row, col| row * 3 + col);
    /// let block = mat.block(1, 1, 2, 2);
    /// assert_eq!(block.eval::<Matrix<_>>(), Matrix::from_rows([
    ///     [4, 5],
    ///     [7, 8],
    /// ]));
    /// ```
    #[track_caller]
    pub fn block(&self, row: usize, col: usize, rows: usize, cols: usize) -> Block<'_, T> {
        assert!(
            row.checked_add(rows).map_or(false, |end| end <= self.rows)
                && col.checked_add(cols).map_or(false, |end| end <= self.cols),
            "attempted to create a {rows}x{cols} block at ({row}, {col}) of a {}x{} matrix",
            self.rows,
            self.cols
        );
        Block {
            matrix: self,
            row,
            col,
            rows,
            cols,
        }
    }
}

/// An immutable view of a rectangular section of a [`Matrix`].
///
/// A block reads its coefficients straight from the underlying matrix, but since its columns are
/// not contiguous with each other, it does not support linear access. Expressions built on top of
/// a block inherit that restriction.
pub struct Block<'a, T> {
    matrix: &'a Matrix<T>,
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
}

impl<T> Clone for Block<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Block<'_, T> {}

impl<'a, T> Block<'a, T> {
    /// Returns the position of the block's top left element in the underlying matrix.
    #[inline]
    pub fn offset(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Returns the underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &'a Matrix<T> {
        self.matrix
    }
}

impl<T: Scalar> Expr for Block<'_, T> {
    type Elem = T;

    const TRAITS: ExprTraits = ExprTraits {
        rows: Dim::Dynamic,
        cols: Dim::Dynamic,
        max_rows: Dim::Dynamic,
        max_cols: Dim::Dynamic,
        cost: COST_READ,
        caps: Caps::DIRECT_ACCESS,
    };

    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        self.matrix.coeff(self.row + row, self.col + col)
    }
}

impl<'a, 'm, T: Scalar> Operand<'a> for Block<'m, T> {
    type Nested = Self;

    #[inline]
    fn nested(&'a self) -> Self {
        *self
    }
}

impl<T: Scalar> fmt::Debug for Block<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(self, f)
    }
}
