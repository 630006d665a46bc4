//! The matrix-like contract shared by concrete matrices and expression nodes.

use crate::{eval::FromExpr, ExprTraits, Scalar};

/// A matrix-shaped value whose coefficients can be read by position.
///
/// Both concrete matrices and lazily evaluated expression nodes implement this trait, which is
/// what makes expressions composable: an expression node accepts any [`Expr`] as an operand, and is
/// itself an [`Expr`].
///
/// Coefficient access is *unchecked* at this layer: reading outside of
/// `[0, rows) × [0, cols)` is a contract violation whose outcome depends on the implementation
/// (it may panic, or return an unrelated coefficient). [`Checked`][crate::Checked] layers explicit
/// bounds checks on top of any expression.
pub trait Expr {
    /// The type of the coefficients.
    type Elem: Scalar;

    /// Static shape, cost, and capability metadata, shared by all values of this type.
    const TRAITS: ExprTraits;

    /// Returns the number of rows.
    fn rows(&self) -> usize;

    /// Returns the number of columns.
    fn cols(&self) -> usize;

    /// Reads the coefficient at `(row, col)`.
    fn coeff(&self, row: usize, col: usize) -> Self::Elem;

    /// Returns `(rows, cols)`.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Returns the total number of coefficients.
    ///
    /// # Panics
    ///
    /// This method will panic if the number of coefficients does not fit in a `usize`, which is
    /// only possible for expressions without storage, like [`Constant`][crate::Constant].
    #[inline]
    #[track_caller]
    fn len(&self) -> usize {
        let (rows, cols) = self.shape();
        match rows.checked_mul(cols) {
            Some(len) => len,
            None => panic!("{rows}x{cols} expression has more than `usize::MAX` coefficients"),
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Evaluates every coefficient of `self` into a new concrete matrix of type `M`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mask = Matrix::from_rows([[true, false]]);
    /// let a = Matrix::from_rows([[1, 2]]);
    /// let out: Matrix<i32> = mask.select_else_scalar(&a, 0).eval();
    /// assert_eq!(out, Matrix::from_rows([[1, 0]]));
    /// ```
    fn eval<M>(&self) -> M
    where
        M: FromExpr<Self::Elem>,
        Self: Sized,
    {
        log::trace!(
            "evaluating {}x{} expression (cost {} per coefficient)",
            self.rows(),
            self.cols(),
            Self::TRAITS.cost,
        );
        M::from_expr(self)
    }
}

/// Expressions whose coefficients can also be read with a single, column-major index.
///
/// The linear index of `(row, col)` is `col * rows + row`.
///
/// This trait is only implemented for types whose [`Expr::TRAITS`] contain
/// [`Caps::LINEAR_ACCESS`][crate::Caps::LINEAR_ACCESS]. Composite expressions implement it only if
/// all of their operands do, so linear access to an expression that cannot support it is rejected
/// at compile time.
pub trait LinearAccess: Expr {
    /// Reads the coefficient at the column-major `index`.
    fn coeff_linear(&self, index: usize) -> Self::Elem;
}

impl<X: Expr + ?Sized> Expr for &X {
    type Elem = X::Elem;

    const TRAITS: ExprTraits = X::TRAITS;

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> Self::Elem {
        (**self).coeff(row, col)
    }
}

impl<X: LinearAccess + ?Sized> LinearAccess for &X {
    #[inline]
    fn coeff_linear(&self, index: usize) -> Self::Elem {
        (**self).coeff_linear(index)
    }
}

/// Describes how a value is stored when it becomes the operand of an expression node.
///
/// Large concrete matrices are *nested* as a borrow (`Nested = &'a Matrix<T>` or a view type),
/// tying the lifetime of the expression to that of the matrix. Expression nodes and other
/// lightweight views are nested *by value* (`Nested = Self`), since copying them is cheap and
/// avoids an indirection. In both cases the expression never owns heavy data, and the borrow
/// checker ensures that borrowed operands outlive every expression referring to them.
pub trait Operand<'a> {
    /// The handle an expression node stores for this operand.
    type Nested: Expr;

    /// Creates the handle to store in an expression node.
    fn nested(&'a self) -> Self::Nested;
}

/// The handle type stored by expression nodes for an operand of type `X`.
pub type Nested<'a, X> = <X as Operand<'a>>::Nested;

/// The coefficient type of an operand of type `X`.
pub type Elem<'a, X> = <Nested<'a, X> as Expr>::Elem;
