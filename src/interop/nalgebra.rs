use nalgebra::{DMatrix, SMatrix};

use crate::{Expr, ExprTraits, FromExpr, LinearAccess, Operand, Scalar};

/// Statically-sized nalgebra matrices carry their shape in their type.
impl<T: Scalar, const R: usize, const C: usize> Expr for SMatrix<T, R, C> {
    type Elem = T;

    const TRAITS: ExprTraits = ExprTraits::fixed_buffer(R, C);

    #[inline]
    fn rows(&self) -> usize {
        R
    }

    #[inline]
    fn cols(&self) -> usize {
        C
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}

// nalgebra's linear indexing is column-major too.
impl<T: Scalar, const R: usize, const C: usize> LinearAccess for SMatrix<T, R, C> {
    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        self[index]
    }
}

impl<'a, T: Scalar, const R: usize, const C: usize> Operand<'a> for SMatrix<T, R, C> {
    type Nested = &'a SMatrix<T, R, C>;

    #[inline]
    fn nested(&'a self) -> Self::Nested {
        self
    }
}

impl<T: Scalar> Expr for DMatrix<T> {
    type Elem = T;

    const TRAITS: ExprTraits = ExprTraits::DYNAMIC_BUFFER;

    #[inline]
    fn rows(&self) -> usize {
        self.nrows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.ncols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}

impl<T: Scalar> LinearAccess for DMatrix<T> {
    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        self[index]
    }
}

impl<'a, T: Scalar> Operand<'a> for DMatrix<T> {
    type Nested = &'a DMatrix<T>;

    #[inline]
    fn nested(&'a self) -> Self::Nested {
        self
    }
}

impl<T: Scalar> FromExpr<T> for DMatrix<T> {
    fn from_expr<X>(expr: &X) -> Self
    where
        X: Expr<Elem = T> + ?Sized,
    {
        DMatrix::from_fn(expr.rows(), expr.cols(), |row, col| expr.coeff(row, col))
    }
}
