//! Opt-in bounds checking for coefficient access.
//!
//! Expression nodes do not validate coefficient indices: reading outside of an expression's shape
//! is a contract violation, just like it is for the operands they wrap. [`Checked`] adds explicit
//! checks on top of any expression without changing the expression itself.
//!
//! Whether the checks run is configured process-wide through the `DENSEXPR_BOUNDS_CHECK`
//! environment variable, see [`bounds_check`].

use std::{
    env::{self, VarError},
    fmt, process,
    sync::OnceLock,
};

use crate::{eval::fmt_expr, Caps, Expr, ExprTraits, LinearAccess, Operand};

/// Whether [`Checked`] expressions validate their coefficient indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    /// Every access is checked; out-of-bounds accesses panic.
    Always,
    /// Accesses are forwarded without checks.
    Never,
}

impl BoundsCheck {
    const DEFAULT: Self = if cfg!(debug_assertions) {
        BoundsCheck::Always
    } else {
        BoundsCheck::Never
    };

    fn from_env() -> Self {
        let policy = match env::var("DENSEXPR_BOUNDS_CHECK").as_deref() {
            Ok("always" | "on" | "1") => BoundsCheck::Always,
            Ok("never" | "off" | "0") => BoundsCheck::Never,
            Err(VarError::NotPresent) => Self::DEFAULT,
            Ok(invalid) => {
                eprintln!(
                    "invalid value set for `DENSEXPR_BOUNDS_CHECK` variable: '{invalid}'; exiting"
                );
                process::exit(1);
            }
            Err(VarError::NotUnicode(s)) => {
                eprintln!(
                    "invalid value set for `DENSEXPR_BOUNDS_CHECK` variable: {}; exiting",
                    s.to_string_lossy()
                );
                process::exit(1);
            }
        };
        log::debug!("using bounds check policy {:?}", policy);
        policy
    }
}

static BOUNDS_CHECK: OnceLock<BoundsCheck> = OnceLock::new();

/// Returns the process-wide [`BoundsCheck`] policy used by [`Checked::new`].
///
/// The policy is read from the `DENSEXPR_BOUNDS_CHECK` environment variable the first time this
/// function is called:
///
/// * `always`, `on`, or `1`: checks are performed.
/// * `never`, `off`, or `0`: checks are skipped.
/// * unset: checks are performed if `debug_assertions` are enabled.
///
/// Any other value is reported on *stderr* and terminates the process.
pub fn bounds_check() -> BoundsCheck {
    *BOUNDS_CHECK.get_or_init(BoundsCheck::from_env)
}

/// An expression adapter that validates coefficient indices before forwarding them.
///
/// # Examples
///
/// ```should_panic
/// # use densexpr::*;
/// let m = Matrix::<f32>::zeros(2, 2);
/// let checked = Checked::with_policy(&m, BoundsCheck::Always);
/// checked.coeff(2, 0); // panics
/// ```
#[derive(Clone, Copy)]
pub struct Checked<X> {
    inner: X,
    policy: BoundsCheck,
}

impl<X: Expr> Checked<X> {
    /// Wraps `inner`, checking accesses according to the process-wide [`bounds_check`] policy.
    pub fn new(inner: X) -> Self {
        Self::with_policy(inner, bounds_check())
    }

    /// Wraps `inner`, checking accesses according to `policy`.
    pub fn with_policy(inner: X, policy: BoundsCheck) -> Self {
        Self { inner, policy }
    }

    /// Returns the wrapped expression.
    pub fn into_inner(self) -> X {
        self.inner
    }

    #[inline]
    pub fn policy(&self) -> BoundsCheck {
        self.policy
    }
}

impl<X: Expr> Expr for Checked<X> {
    type Elem = X::Elem;

    // The adapter is read-only, so storage capabilities of `inner` are not exposed.
    const TRAITS: ExprTraits = ExprTraits {
        caps: X::TRAITS.caps.intersection(Caps::INHERITABLE),
        ..X::TRAITS
    };

    #[inline]
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.inner.cols()
    }

    #[inline]
    #[track_caller]
    fn coeff(&self, row: usize, col: usize) -> X::Elem {
        if self.policy == BoundsCheck::Always {
            let (rows, cols) = self.inner.shape();
            assert!(
                row < rows && col < cols,
                "coefficient ({row}, {col}) out of bounds for {rows}x{cols} expression"
            );
        }
        self.inner.coeff(row, col)
    }
}

impl<X: LinearAccess> LinearAccess for Checked<X> {
    #[inline]
    #[track_caller]
    fn coeff_linear(&self, index: usize) -> X::Elem {
        if self.policy == BoundsCheck::Always {
            // `rows * cols` may not fit in a `usize` for storage-less expressions.
            let (rows, cols) = self.inner.shape();
            assert!(
                rows != 0 && index / rows < cols,
                "linear index {index} out of bounds for {rows}x{cols} expression"
            );
        }
        self.inner.coeff_linear(index)
    }
}

impl<'a, X> Operand<'a> for Checked<X>
where
    X: Expr + Copy,
{
    type Nested = Self;

    #[inline]
    fn nested(&'a self) -> Self {
        *self
    }
}

impl<X: Expr> fmt::Debug for Checked<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_expr(self, f)
    }
}
