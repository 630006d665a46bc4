use std::{
    fmt,
    ops::{Index, IndexMut},
};

use itertools::iproduct;

use crate::{eval::fmt_expr, Expr, ExprTraits, LinearAccess, One, Operand, Scalar, Zero};

mod block;

pub use block::Block;

/// A dense, column-major matrix with `T` elements and a shape determined at run time.
///
/// This is the concrete storage type of this crate: it owns its coefficients, and is the usual
/// target when an expression is evaluated. When used as the operand of an expression, a [`Matrix`]
/// is borrowed rather than copied (see [`Operand`]).
///
/// # Construction
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] create a matrix from nested arrays.
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - [`Matrix::from_column_major`] takes ownership of a `Vec` holding the elements.
/// - [`Matrix::zeros`] and [`Matrix::identity`] create commonly used matrices.
/// - [`Expr::eval`] materializes any expression into a new [`Matrix`].
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row*, the second is the *column*. Indices are 0-based.
///
/// ```
/// # use densexpr::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// ```
///
/// Indexing out of bounds will result in a panic, just like it does for slices. [`Matrix::get`] and
/// [`Matrix::get_mut`] return [`Option`]s instead and can be used for checked indexing.
#[derive(Clone, Hash)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Creates a [`Matrix`] from an array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<const R: usize, const C: usize>(rows: [[T; C]; R]) -> Self {
        let mut rows = rows.map(|row| row.map(Some));
        Self::from_fn(R, C, |row, col| rows[row][col].take().unwrap())
    }

    /// Creates a [`Matrix`] from an array of columns.
    pub fn from_columns<const R: usize, const C: usize>(columns: [[T; R]; C]) -> Self {
        Self {
            rows: R,
            cols: C,
            data: columns.into_iter().flatten().collect(),
        }
    }

    /// Creates a `rows`×`cols` [`Matrix`] by invoking a closure with the position (row and column)
    /// of each element.
    ///
    /// Elements are created in column-major order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mat = Matrix::from_fn(2, 3, |row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let data = iproduct!(0..cols, 0..rows)
            .map(|(col, row)| cb(row, col))
            .collect();
        Self { rows, cols, data }
    }

    /// Creates a `rows`×`cols` [`Matrix`] from its elements in column-major order.
    ///
    /// # Panics
    ///
    /// This method will panic if `data` does not hold exactly `rows * cols` elements.
    #[track_caller]
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "attempted to create a {rows}x{cols} matrix from {} elements",
            data.len()
        );
        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Applies a closure to each element, returning a new matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// let mat = mat.map(|i| i * 2);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  2,  4],
    ///     [ 6,  8, 10],
    /// ]));
    /// ```
    pub fn map<F, U>(self, f: F) -> Matrix<U>
    where
        F: FnMut(T) -> U,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.into_iter().map(f).collect(),
        }
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(self) -> Matrix<T> {
        let (rows, cols) = (self.rows, self.cols);
        let mut elems = self.data.into_iter().map(Some).collect::<Vec<_>>();
        Matrix::from_fn(cols, rows, |row, col| {
            // `(row, col)` of the result is `(col, row)` of `self`.
            elems[row * rows + col].take().unwrap()
        })
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.get(0, 0), Some(&0));
    /// assert_eq!(mat.get(1, 0), Some(&3));
    /// assert_eq!(mat.get(2, 0), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(col * self.rows + row)
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(col * self.rows + row)
        } else {
            None
        }
    }

    /// Returns the elements in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the elements in column-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the matrix, returning its elements in column-major order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Overwrites every element of `self` with the corresponding coefficient of `expr`.
    ///
    /// The expression may not refer to `self`; this is enforced by the borrow checker, so an
    /// assignment never observes a partially overwritten operand.
    ///
    /// # Panics
    ///
    /// This method will panic if `expr` has a different shape than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mask = Matrix::from_rows([[false, true]]);
    /// let mut out = Matrix::zeros(1, 2);
    /// out.assign(&mask.select_then_scalar(7, &Matrix::from_rows([[1, 2]])));
    /// assert_eq!(out, Matrix::from_rows([[1, 7]]));
    /// ```
    #[track_caller]
    pub fn assign<X>(&mut self, expr: &X)
    where
        X: Expr<Elem = T>,
    {
        assert_eq!(
            expr.shape(),
            (self.rows, self.cols),
            "attempted to assign a {}x{} expression to a {}x{} matrix",
            expr.rows(),
            expr.cols(),
            self.rows,
            self.cols,
        );

        log::trace!(
            "assigning {}x{} expression (cost {} per coefficient)",
            self.rows,
            self.cols,
            X::TRAITS.cost,
        );
        for ((col, row), out) in iproduct!(0..self.cols, 0..self.rows).zip(&mut self.data) {
            *out = expr.coeff(row, col);
        }
    }
}

impl<T: Zero> Matrix<T> {
    /// Creates a `rows`×`cols` matrix with every element set to 0.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| T::ZERO)
    }
}

impl<T: Zero + One> Matrix<T> {
    /// Creates an `n`×`n` identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// assert_eq!(Matrix::<i32>::identity(2), Matrix::from_rows([
    ///     [1, 0],
    ///     [0, 1],
    /// ]));
    /// ```
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |row, col| if row == col { T::ONE } else { T::ZERO })
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        match self.get(row, col) {
            Some(elem) => elem,
            None => panic!(
                "index ({row}, {col}) out of bounds for {}x{} matrix",
                self.rows, self.cols
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        let (rows, cols) = (self.rows, self.cols);
        match self.get_mut(row, col) {
            Some(elem) => elem,
            None => panic!("index ({row}, {col}) out of bounds for {rows}x{cols} matrix"),
        }
    }
}

// More general `PartialEq` impl than what the derive generates.
impl<T, U> PartialEq<Matrix<U>> for Matrix<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Matrix<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<T> Eq for Matrix<T> where T: Eq {}

impl<T: Scalar> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(self, f)
    }
}

impl<T: Scalar> Expr for Matrix<T> {
    type Elem = T;

    const TRAITS: ExprTraits = ExprTraits::DYNAMIC_BUFFER;

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
        self.data[col * self.rows + row]
    }
}

impl<T: Scalar> LinearAccess for Matrix<T> {
    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        self.data[index]
    }
}

impl<'a, T: Scalar> Operand<'a> for Matrix<T> {
    type Nested = &'a Matrix<T>;

    #[inline]
    fn nested(&'a self) -> &'a Matrix<T> {
        self
    }
}
