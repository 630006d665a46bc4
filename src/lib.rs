//! Lazily evaluated, coefficient-wise selection between dense matrices.
//!
//! An expression like `cond.select(&a, &b)` does not compute anything when it is created. It
//! returns a lightweight [`Select`] node that reads coefficient `(i, j)` from `a` if
//! `cond(i, j)` is [truthy][Truthy], and from `b` otherwise. The result is only computed when it is
//! read, either coefficient by coefficient or all at once via [`Expr::eval`] and
//! [`Matrix::assign`].
//!
//! Expressions compose: a [`Select`] node implements [`Expr`] just like a concrete [`Matrix`] does,
//! so it can be the condition or either branch of another selection.
//!
//! ```
//! # use densexpr::*;
//! let cond = Matrix::from_rows([[true, false], [false, true]]);
//! let a = Matrix::from_rows([[1, 2], [3, 4]]);
//! let b = Matrix::from_rows([[10, 20], [30, 40]]);
//!
//! let sel = cond.select(&a, &b);
//! assert_eq!(sel.coeff(0, 1), 20);
//! assert_eq!(sel.eval::<Matrix<i32>>(), Matrix::from_rows([[1, 20], [30, 4]]));
//! ```
//!
//! # Goals & Non-Goals
//!
//! - Expression nodes never own matrix data. Operands are *nested* according to their [`Operand`]
//!   implementation: concrete matrices are borrowed, and expression nodes (which are small and
//!   [`Copy`]) are stored by value. The borrow checker guarantees that an expression cannot
//!   outlive the matrices it reads from.
//! - Static metadata (shape, evaluation cost, access capabilities) is computed at compile time and
//!   exposed as [`Expr::TRAITS`]. Capabilities an expression cannot support are rejected by the
//!   type system rather than at runtime: linear access via [`LinearAccess`] is only available if
//!   every operand supports it.
//! - Coefficient access is unchecked. [`Checked`] can be layered on top of any expression when
//!   index validation is wanted.
//! - Support the matrix types of [nalgebra] and [ndarray] as operands, and as evaluation targets.
//! - Writing through an expression, vectorized evaluation, and broadcasting beyond scalar operands
//!   are out of scope.
//!
//! # Environment Variables
//!
//! * `DENSEXPR_BOUNDS_CHECK`: Configures whether [`Checked`] expressions created with
//!   [`Checked::new`] validate their indices. Allowed values are:
//!   * `always`, `on`, `1`: every access is checked.
//!   * `never`, `off`, `0`: accesses are forwarded without checks.
//!
//!   If unset, accesses are checked when `debug_assertions` are enabled.
//!
//! [nalgebra]: https://nalgebra.org/
//! [ndarray]: https://docs.rs/ndarray

use log::LevelFilter;

mod checked;
mod constant;
mod dense;
mod error;
mod eval;
mod expr;
mod interop;
mod matrix;
mod meta;
mod select;
mod traits;

pub use checked::*;
pub use constant::*;
pub use dense::*;
pub use error::*;
pub use eval::FromExpr;
pub use expr::*;
pub use matrix::*;
pub use meta::*;
pub use select::*;
pub use traits::*;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this library will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` overrides these defaults.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
