use crate::{Checked, Constant, Elem, Expr, Nested, Operand, Scalar, Select, Truthy};

/// Expression-building methods available on every matrix-like value.
///
/// This trait is implemented for every type that implements [`Operand`] for all lifetimes: the
/// concrete [`Matrix`][crate::Matrix], the nalgebra and ndarray matrix types, and every expression
/// node. Operands are nested according to their [`Operand`] policy, so building an expression never
/// copies a matrix's coefficients.
pub trait DenseBase: for<'a> Operand<'a> {
    /// Returns an expression where each coefficient `(i, j)` is `then(i, j)` if `self(i, j)` is
    /// [truthy][Truthy], and `otherwise(i, j)` if it is not.
    ///
    /// # Panics
    ///
    /// This method will panic if `then` or `otherwise` has a different shape than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let m = Matrix::from_rows([
    ///     [1, -2],
    ///     [-3, 4],
    /// ]);
    /// let positive = Matrix::from_fn(2, 2, |row, col| m[(row, col)] > 0);
    /// let negated = m.clone().map(|v| -v);
    ///
    /// let abs: Matrix<i32> = positive.select(&m, &negated).eval();
    /// assert_eq!(abs, Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]));
    /// ```
    #[track_caller]
    fn select<'c, 't, 'e, T, E>(
        &'c self,
        then: &'t T,
        otherwise: &'e E,
    ) -> Select<Nested<'c, Self>, Nested<'t, T>, Nested<'e, E>>
    where
        Elem<'c, Self>: Truthy,
        T: Operand<'t>,
        E: Operand<'e>,
        Nested<'e, E>: Expr<Elem = Elem<'t, T>>,
    {
        Select::new(self.nested(), then.nested(), otherwise.nested())
    }

    /// Like [`DenseBase::select`], but broadcasts the scalar `otherwise` to the shape of `self`.
    ///
    /// # Panics
    ///
    /// This method will panic if `then` has a different shape than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mask = Matrix::from_rows([[true, false, true]]);
    /// let v = Matrix::from_rows([[1.0, 2.0, 3.0]]);
    /// let masked: Matrix<f64> = mask.select_else_scalar(&v, 0.0).eval();
    /// assert_eq!(masked, Matrix::from_rows([[1.0, 0.0, 3.0]]));
    /// ```
    #[track_caller]
    fn select_else_scalar<'c, 't, T>(
        &'c self,
        then: &'t T,
        otherwise: Elem<'t, T>,
    ) -> Select<Nested<'c, Self>, Nested<'t, T>, Constant<Elem<'t, T>>>
    where
        Elem<'c, Self>: Truthy,
        T: Operand<'t>,
    {
        let cond = self.nested();
        let otherwise = Constant::new(cond.rows(), cond.cols(), otherwise);
        Select::new(cond, then.nested(), otherwise)
    }

    /// Like [`DenseBase::select`], but broadcasts the scalar `then` to the shape of `self`.
    ///
    /// # Panics
    ///
    /// This method will panic if `otherwise` has a different shape than `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let mask = Matrix::from_rows([[true, false, true]]);
    /// let v = Matrix::from_rows([[1, 2, 3]]);
    /// let out: Matrix<i32> = mask.select_then_scalar(9, &v).eval();
    /// assert_eq!(out, Matrix::from_rows([[9, 2, 9]]));
    /// ```
    #[track_caller]
    fn select_then_scalar<'c, 'e, E>(
        &'c self,
        then: Elem<'e, E>,
        otherwise: &'e E,
    ) -> Select<Nested<'c, Self>, Constant<Elem<'e, E>>, Nested<'e, E>>
    where
        Elem<'c, Self>: Truthy,
        E: Operand<'e>,
    {
        let cond = self.nested();
        let then = Constant::new(cond.rows(), cond.cols(), then);
        Select::new(cond, then, otherwise.nested())
    }

    /// Returns an expression of the same shape as `self` whose coefficients are all `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let m = Matrix::from_rows([[1, 2, 3]]);
    /// let c = m.constant(0.5_f32);
    /// assert_eq!(c.shape(), (1, 3));
    /// assert_eq!(c.coeff(0, 2), 0.5);
    /// ```
    fn constant<V: Scalar>(&self, value: V) -> Constant<V> {
        let this = self.nested();
        Constant::new(this.rows(), this.cols(), value)
    }

    /// Wraps `self` in a [`Checked`] adapter that validates every coefficient index.
    ///
    /// Whether the checks run is governed by [`bounds_check`][crate::bounds_check].
    fn checked(&self) -> Checked<Nested<'_, Self>> {
        Checked::new(self.nested())
    }
}

impl<X> DenseBase for X where X: for<'a> Operand<'a> {}
