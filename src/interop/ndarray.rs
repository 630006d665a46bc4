use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2};

use crate::{Caps, Dim, Expr, ExprTraits, FromExpr, Operand, Scalar, COST_READ};

/// Any 2-dimensional ndarray (owned, shared, or a view) can be read as an expression.
///
/// ndarray supports arbitrary strides, so its arrays are not guaranteed to be laid out in
/// column-major order and don't support linear access.
impl<S, T> Expr for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
    T: Scalar,
{
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
        self.nrows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.ncols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        self[[row, col]]
    }
}

impl<'a, T: Scalar> Operand<'a> for Array2<T> {
    type Nested = ArrayView2<'a, T>;

    #[inline]
    fn nested(&'a self) -> Self::Nested {
        self.view()
    }
}

impl<'a, 'v, T: Scalar> Operand<'a> for ArrayView2<'v, T> {
    type Nested = Self;

    #[inline]
    fn nested(&'a self) -> Self {
        *self
    }
}

impl<T: Scalar> FromExpr<T> for Array2<T> {
    fn from_expr<X>(expr: &X) -> Self
    where
        X: Expr<Elem = T> + ?Sized,
    {
        Array2::from_shape_fn(expr.shape(), |(row, col)| expr.coeff(row, col))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr2, s};

    use crate::{Constant, DenseBase, Matrix, Select};

    use super::*;

    // `ArrayBase` has an inherent `select` method, so the trait method has to be named explicitly.

    #[test]
    fn select_arrays() {
        let cond = arr2(&[[1, 0], [0, 1]]);
        let a = arr2(&[[1.5, 2.5], [3.5, 4.5]]);
        let b = Array2::<f64>::zeros((2, 2));

        let out: Array2<f64> = DenseBase::select(&cond, &a, &b).eval();
        assert_eq!(out, arr2(&[[1.5, 0.0], [0.0, 4.5]]));
    }

    #[test]
    fn strided_views() {
        let cond = arr2(&[[true, false], [true, false]]);
        let a = arr2(&[[1, 2, 3], [4, 5, 6]]);
        let right = a.slice(s![.., 1..]);
        let transposed = arr2(&[[10, 30], [20, 40]]).reversed_axes();
        let transposed = transposed.view();

        let sel = DenseBase::select(&cond, &right, &transposed);
        assert_eq!(sel.eval::<Matrix<i32>>(), Matrix::from_rows([[2, 20], [5, 40]]));
    }

    #[test]
    fn mixed_with_matrix() {
        let cond = Matrix::from_rows([[true, false, false]]);
        let a = arr2(&[[7_u8, 8, 9]]);
        let out: Array2<u8> = cond.select_then_scalar(0, &a.view()).eval();
        assert_eq!(out, arr2(&[[0, 8, 9]]));

        type Sel<'a> = Select<&'a Matrix<bool>, Constant<u8>, ArrayView2<'a, u8>>;
        assert!(Matrix::<u8>::TRAITS.caps.contains(Caps::LINEAR_ACCESS));
        assert!(!<Sel<'_> as Expr>::TRAITS.caps.contains(Caps::LINEAR_ACCESS));
    }
}
