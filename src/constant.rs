use std::fmt;

use crate::{
    eval::fmt_expr, Caps, Dim, Expr, ExprTraits, LinearAccess, Operand, Scalar, COST_CONSTANT,
};

/// A matrix-shaped expression whose every coefficient is the same value.
///
/// This is how a scalar is broadcast into a position that expects a matrix operand, for example
/// by [`DenseBase::select_else_scalar`][crate::DenseBase::select_else_scalar]. Only the value and
/// the shape are stored, regardless of how large the shape is.
///
/// # Examples
///
/// ```
/// # use densexpr::*;
/// let c = Constant::new(1000, 1000, 2.5);
/// assert_eq!(c.coeff(999, 0), 2.5);
/// assert_eq!(c.coeff_linear(12345), 2.5);
/// assert_eq!(std::mem::size_of_val(&c), std::mem::size_of::<(usize, usize, f64)>());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constant<T> {
    rows: usize,
    cols: usize,
    value: T,
}

impl<T> Constant<T> {
    /// Creates a `rows`×`cols` expression whose coefficients are all `value`.
    #[inline]
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        Self { rows, cols, value }
    }

    /// Returns the broadcast value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Scalar> Expr for Constant<T> {
    type Elem = T;

    const TRAITS: ExprTraits = ExprTraits {
        rows: Dim::Dynamic,
        cols: Dim::Dynamic,
        max_rows: Dim::Dynamic,
        max_cols: Dim::Dynamic,
        cost: COST_CONSTANT,
        caps: Caps::LINEAR_ACCESS,
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
    fn coeff(&self, _row: usize, _col: usize) -> T {
        self.value
    }
}

impl<T: Scalar> LinearAccess for Constant<T> {
    #[inline]
    fn coeff_linear(&self, _index: usize) -> T {
        self.value
    }
}

impl<'a, T: Scalar> Operand<'a> for Constant<T> {
    type Nested = Self;

    #[inline]
    fn nested(&'a self) -> Self {
        *self
    }
}

impl<T: Scalar> fmt::Debug for Constant<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(self, f)
    }
}
