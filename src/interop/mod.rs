//! Use of matrices from other linear algebra crates as expression operands.
//!
//! Owned matrices are nested as borrows (or as the crate's own view type), views are nested by
//! value. Expressions can also be evaluated into the owned matrix types via [`FromExpr`].
//!
//! [`FromExpr`]: crate::FromExpr

mod nalgebra;
mod ndarray;
