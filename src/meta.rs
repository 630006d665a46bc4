//! Static descriptors of expression types.
//!
//! Every [`Expr`][crate::Expr] type carries an [`ExprTraits`] value as an associated constant. It
//! describes the shape, per-coefficient cost, and capabilities of *all* values of that type, and
//! composite expressions derive theirs from their operands' descriptors in `const` context, so the
//! derivation happens once per concrete type and never touches any data.

use std::fmt;

/// Cost of reading one stored coefficient.
pub const COST_READ: u32 = 1;

/// Cost of producing one coefficient of a broadcast constant.
pub const COST_CONSTANT: u32 = 1;

/// The extent of a matrix dimension, as far as it is known from the type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    /// The extent is fixed by the type.
    Fixed(usize),
    /// The extent is only known at run time.
    Dynamic,
}

impl Dim {
    /// Returns whether the extent is fixed by the type.
    #[inline]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Dim::Fixed(_))
    }

    /// Returns the fixed extent, or [`None`] if it is [`Dim::Dynamic`].
    #[inline]
    pub const fn fixed(self) -> Option<usize> {
        match self {
            Dim::Fixed(n) => Some(n),
            Dim::Dynamic => None,
        }
    }

    /// Returns whether a run-time extent of `n` is permitted by `self`.
    #[inline]
    pub const fn admits(self, n: usize) -> bool {
        match self {
            Dim::Fixed(m) => m == n,
            Dim::Dynamic => true,
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Fixed(n) => write!(f, "{n}"),
            Dim::Dynamic => f.write_str("?"),
        }
    }
}

/// A set of access patterns supported by an expression type.
///
/// # Examples
///
/// ```
/// # use densexpr::*;
/// let caps = Caps::LINEAR_ACCESS.union(Caps::LVALUE);
/// assert!(caps.contains(Caps::LVALUE));
/// assert_eq!(caps.intersection(Caps::INHERITABLE), Caps::LINEAR_ACCESS);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Caps(u8);

impl Caps {
    /// No capabilities beyond `(row, col)` coefficient access, which every expression has.
    pub const NONE: Self = Self(0);
    /// Coefficients can be read with a single column-major index.
    pub const LINEAR_ACCESS: Self = Self(1 << 0);
    /// Coefficients are stored in memory that can be addressed directly.
    pub const DIRECT_ACCESS: Self = Self(1 << 1);
    /// Coefficients can be written in place.
    pub const LVALUE: Self = Self(1 << 2);

    /// The capabilities a composite expression may inherit from its operands.
    ///
    /// Storage-related capabilities ([`Caps::DIRECT_ACCESS`], [`Caps::LVALUE`]) describe a
    /// concrete buffer and are never inherited by a computed expression.
    pub const INHERITABLE: Self = Self::LINEAR_ACCESS;

    const NAMES: [(Self, &'static str); 3] = [
        (Self::LINEAR_ACCESS, "LINEAR_ACCESS"),
        (Self::DIRECT_ACCESS, "DIRECT_ACCESS"),
        (Self::LVALUE, "LVALUE"),
    ];

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns whether every capability in `other` is also in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Caps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }

        let mut first = true;
        for (cap, name) in Self::NAMES {
            if self.contains(cap) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Type-level description of an expression: extents, cost, and capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprTraits {
    pub rows: Dim,
    pub cols: Dim,
    /// Upper bound on the number of rows, if the type guarantees one.
    pub max_rows: Dim,
    /// Upper bound on the number of columns, if the type guarantees one.
    pub max_cols: Dim,
    /// Estimated cost of computing a single coefficient.
    pub cost: u32,
    pub caps: Caps,
}

impl ExprTraits {
    /// Descriptor of a dense, column-major buffer of statically unknown shape.
    pub const DYNAMIC_BUFFER: Self = Self {
        rows: Dim::Dynamic,
        cols: Dim::Dynamic,
        max_rows: Dim::Dynamic,
        max_cols: Dim::Dynamic,
        cost: COST_READ,
        caps: Caps::LINEAR_ACCESS
            .union(Caps::DIRECT_ACCESS)
            .union(Caps::LVALUE),
    };

    /// Descriptor of a dense, column-major buffer whose shape is fixed by its type.
    pub const fn fixed_buffer(rows: usize, cols: usize) -> Self {
        Self {
            rows: Dim::Fixed(rows),
            cols: Dim::Fixed(cols),
            max_rows: Dim::Fixed(rows),
            max_cols: Dim::Fixed(cols),
            ..Self::DYNAMIC_BUFFER
        }
    }

    /// Derives the descriptor of a coefficient-wise selection from its operands' descriptors.
    ///
    /// - The extents are the condition's.
    /// - Capabilities are those that *both* branches have, restricted to [`Caps::INHERITABLE`].
    ///   Since linear access also reads the condition linearly, [`Caps::LINEAR_ACCESS`] is
    ///   additionally dropped if the condition lacks it.
    /// - The cost is that of the condition plus the costlier branch, since evaluating a
    ///   coefficient reads the condition and exactly one branch, and which one is data-dependent.
    ///
    /// # Examples
    ///
    /// ```
    /// # use densexpr::*;
    /// let buffer = ExprTraits::DYNAMIC_BUFFER;
    /// let expensive = ExprTraits { cost: 10, ..buffer };
    ///
    /// let traits = ExprTraits::for_select(&buffer, &expensive, &buffer);
    /// assert_eq!(traits.cost, 1 + 10);
    /// assert_eq!(traits.caps, Caps::LINEAR_ACCESS);
    /// ```
    pub const fn for_select(cond: &Self, then: &Self, otherwise: &Self) -> Self {
        let mut caps = then
            .caps
            .intersection(otherwise.caps)
            .intersection(Caps::INHERITABLE);
        if !cond.caps.contains(Caps::LINEAR_ACCESS) {
            caps = caps.difference(Caps::LINEAR_ACCESS);
        }

        let branch_cost = if then.cost > otherwise.cost {
            then.cost
        } else {
            otherwise.cost
        };

        Self {
            rows: cond.rows,
            cols: cond.cols,
            max_rows: cond.max_rows,
            max_cols: cond.max_cols,
            cost: cond.cost.saturating_add(branch_cost),
            caps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_shape_follows_condition() {
        let cond = ExprTraits::fixed_buffer(2, 3);
        let traits = ExprTraits::for_select(
            &cond,
            &ExprTraits::DYNAMIC_BUFFER,
            &ExprTraits::DYNAMIC_BUFFER,
        );
        assert_eq!(traits.rows, Dim::Fixed(2));
        assert_eq!(traits.cols, Dim::Fixed(3));
        assert_eq!(traits.max_rows, Dim::Fixed(2));
        assert_eq!(traits.max_cols, Dim::Fixed(3));
    }

    #[test]
    fn select_never_inherits_storage_caps() {
        let buffer = ExprTraits::DYNAMIC_BUFFER;
        let traits = ExprTraits::for_select(&buffer, &buffer, &buffer);
        assert!(traits.caps.contains(Caps::LINEAR_ACCESS));
        assert!(!traits.caps.contains(Caps::LVALUE));
        assert!(!traits.caps.contains(Caps::DIRECT_ACCESS));
    }

    #[test]
    fn select_caps_are_conservative() {
        let buffer = ExprTraits::DYNAMIC_BUFFER;
        let strided = ExprTraits {
            caps: Caps::LVALUE,
            ..buffer
        };

        for (cond, then, otherwise) in [
            (strided, buffer, buffer),
            (buffer, strided, buffer),
            (buffer, buffer, strided),
        ] {
            let traits = ExprTraits::for_select(&cond, &then, &otherwise);
            assert_eq!(traits.caps, Caps::NONE, "{cond:?} {then:?} {otherwise:?}");
        }
    }

    #[test]
    fn select_cost() {
        let cheap = ExprTraits {
            cost: 2,
            ..ExprTraits::DYNAMIC_BUFFER
        };
        let pricey = ExprTraits { cost: 7, ..cheap };
        assert_eq!(ExprTraits::for_select(&cheap, &cheap, &pricey).cost, 9);
        assert_eq!(ExprTraits::for_select(&cheap, &pricey, &cheap).cost, 9);
        assert_eq!(ExprTraits::for_select(&pricey, &cheap, &cheap).cost, 9);

        let huge = ExprTraits {
            cost: u32::MAX,
            ..cheap
        };
        assert_eq!(ExprTraits::for_select(&huge, &huge, &cheap).cost, u32::MAX);
    }

    #[test]
    fn dim() {
        assert!(Dim::Dynamic.admits(17));
        assert!(Dim::Fixed(3).admits(3));
        assert!(!Dim::Fixed(3).admits(4));
        assert_eq!(Dim::Fixed(3).fixed(), Some(3));
        assert_eq!(Dim::Dynamic.fixed(), None);
        assert_eq!(format!("{}x{}", Dim::Fixed(2), Dim::Dynamic), "2x?");
    }

    #[test]
    fn caps_fmt() {
        assert_eq!(format!("{:?}", Caps::NONE), "NONE");
        assert_eq!(
            format!("{:?}", ExprTraits::DYNAMIC_BUFFER.caps),
            "LINEAR_ACCESS | DIRECT_ACCESS | LVALUE"
        );
    }
}
