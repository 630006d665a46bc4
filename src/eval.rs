//! Materializing and printing expressions.

use std::fmt;

use crate::{Expr, Matrix, Scalar};

/// Concrete matrix types that can be created by evaluating an expression.
///
/// Evaluation reads every coefficient of the expression exactly once. Use [`Expr::eval`] to
/// evaluate an expression into a new matrix, or [`Matrix::assign`] to overwrite an existing one.
pub trait FromExpr<T: Scalar>: Sized {
    fn from_expr<X>(expr: &X) -> Self
    where
        X: Expr<Elem = T> + ?Sized;
}

impl<T: Scalar> FromExpr<T> for Matrix<T> {
    fn from_expr<X>(expr: &X) -> Self
    where
        X: Expr<Elem = T> + ?Sized,
    {
        Matrix::from_fn(expr.rows(), expr.cols(), |row, col| expr.coeff(row, col))
    }
}

/// Formats `expr` as a list of rows, like `[[1, 2], [3, 4]]`.
///
/// With the `#` modifier, each row is printed in its own line, but not each individual element.
pub(crate) fn fmt_expr<X>(expr: &X, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    X: Expr + ?Sized,
{
    struct FormatRow<'a, X: ?Sized>(&'a X, usize);
    impl<'a, X: Expr + ?Sized> fmt::Debug for FormatRow<'a, X> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "[")?;
            for col in 0..self.0.cols() {
                if col != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:?}", self.0.coeff(self.1, col))?;
            }
            write!(f, "]")?;
            Ok(())
        }
    }

    let mut list = f.debug_list();
    for row in 0..expr.rows() {
        list.entry(&FormatRow(expr, row));
    }
    list.finish()
}
