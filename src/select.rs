//! Coefficient-wise conditional selection.

use std::fmt;

use crate::{
    error::{Role, ShapeError},
    eval::fmt_expr,
    Caps, Expr, ExprTraits, LinearAccess, Operand, Truthy,
};

/// Expression of a coefficient-wise version of the ternary operator `cond ? then : else`.
///
/// Each coefficient `(i, j)` of a [`Select`] is `then(i, j)` if `cond(i, j)` is
/// [truthy][Truthy], and `otherwise(i, j)` if it is not. Coefficients are computed on every access
/// and never cached; a [`Select`] is a view of its operands, not a result.
///
/// This type is normally created by [`DenseBase::select`][crate::DenseBase::select] and its
/// scalar variants, which also take care of nesting the operands according to their
/// [`Operand`] policy.
///
/// # Examples
///
/// ```
/// # use densexpr::*;
/// let cond = Matrix::from_rows([
///     [true, false],
///     [false, true],
/// ]);
/// let a = Matrix::from_rows([
///     [1, 2],
///     [3, 4],
/// ]);
/// let b = Matrix::from_rows([
///     [10, 20],
///     [30, 40],
/// ]);
/// let sel = cond.select(&a, &b);
/// assert_eq!(sel.coeff(0, 1), 20);
/// assert_eq!(sel.eval::<Matrix<_>>(), Matrix::from_rows([
///     [1, 20],
///     [30, 4],
/// ]));
/// ```
#[derive(Clone, Copy)]
pub struct Select<C, T, E> {
    cond: C,
    then: T,
    otherwise: E,
}

impl<C, T, E> Select<C, T, E>
where
    C: Expr,
    C::Elem: Truthy,
    T: Expr,
    E: Expr<Elem = T::Elem>,
{
    /// Creates a selection from already-nested operands.
    ///
    /// # Panics
    ///
    /// This method will panic if `then` or `otherwise` does not have the same number of rows and
    /// columns as `cond`. The panic message names the offending operand.
    #[track_caller]
    pub fn new(cond: C, then: T, otherwise: E) -> Self {
        match Self::try_new(cond, then, otherwise) {
            Ok(this) => this,
            Err(e) => panic!("invalid select expression: {e}"),
        }
    }

    /// Creates a selection from already-nested operands, or returns a [`ShapeError`] describing
    /// which operand's shape disagrees with the condition's.
    pub fn try_new(cond: C, then: T, otherwise: E) -> Result<Self, ShapeError> {
        let shape = cond.shape();
        debug_assert!(C::TRAITS.rows.admits(shape.0) && C::TRAITS.cols.admits(shape.1));
        if then.shape() != shape {
            return Err(ShapeError::new(Role::Then, shape, then.shape()));
        }
        if otherwise.shape() != shape {
            return Err(ShapeError::new(Role::Else, shape, otherwise.shape()));
        }

        log::trace!(
            "select over {}x{} operands, {:?}",
            shape.0,
            shape.1,
            Self::TRAITS
        );
        Ok(Self {
            cond,
            then,
            otherwise,
        })
    }

    /// Returns the condition operand.
    pub fn condition(&self) -> &C {
        &self.cond
    }

    /// Returns the operand coefficients are taken from where the condition holds.
    pub fn then_operand(&self) -> &T {
        &self.then
    }

    /// Returns the operand coefficients are taken from where the condition does not hold.
    pub fn else_operand(&self) -> &E {
        &self.otherwise
    }
}

impl<C, T, E> Expr for Select<C, T, E>
where
    C: Expr,
    C::Elem: Truthy,
    T: Expr,
    E: Expr<Elem = T::Elem>,
{
    type Elem = T::Elem;

    const TRAITS: ExprTraits = ExprTraits::for_select(&C::TRAITS, &T::TRAITS, &E::TRAITS);

    #[inline]
    fn rows(&self) -> usize {
        self.cond.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cond.cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T::Elem {
        if self.cond.coeff(row, col).is_truthy() {
            self.then.coeff(row, col)
        } else {
            self.otherwise.coeff(row, col)
        }
    }
}

impl<C, T, E> LinearAccess for Select<C, T, E>
where
    C: LinearAccess,
    C::Elem: Truthy,
    T: LinearAccess,
    E: LinearAccess<Elem = T::Elem>,
{
    #[inline]
    fn coeff_linear(&self, index: usize) -> T::Elem {
        debug_assert!(Self::TRAITS.caps.contains(Caps::LINEAR_ACCESS));
        if self.cond.coeff_linear(index).is_truthy() {
            self.then.coeff_linear(index)
        } else {
            self.otherwise.coeff_linear(index)
        }
    }
}

impl<'a, C, T, E> Operand<'a> for Select<C, T, E>
where
    Self: Expr + Copy,
{
    type Nested = Self;

    #[inline]
    fn nested(&'a self) -> Self {
        *self
    }
}

impl<C, T, E> fmt::Debug for Select<C, T, E>
where
    Self: Expr,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(self, f)
    }
}
