use std::fmt;

use half::{bf16, f16};

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// Element types that can be stored in, and read out of, a matrix expression.
///
/// Expressions hand out their coefficients by value, so elements have to be [`Copy`]. The
/// [`Send`] and [`Sync`] bounds allow expression nodes to be read from several threads at once,
/// and `'static` allows concrete matrices to be borrowed for any lifetime by
/// [`Operand`][crate::Operand].
pub trait Scalar: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {}
impl<T> Scalar for T where T: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// Values that can be used as the condition of a [`Select`][crate::Select].
///
/// [`bool`] is truthy if it is `true`. Numeric types are truthy if they compare unequal to their
/// zero value, so `NaN` is truthy while both `0.0` and `-0.0` are not. This lets numeric masks
/// (matrices of `0` and `1`) be used as conditions directly.
///
/// # Examples
///
/// ```
/// # use densexpr::*;
/// assert!(true.is_truthy());
/// assert!(3_i32.is_truthy());
/// assert!(f32::NAN.is_truthy());
/// assert!(!(-0.0_f64).is_truthy());
/// ```
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! numeric {
    ($zero:literal, $one:literal; $($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = $zero;
            }

            impl One for $types {
                const ONE: Self = $one;
            }

            impl Truthy for $types {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != Self::ZERO
                }
            }
        )+
    };
}
numeric!(0, 1; u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
numeric!(0.0, 1.0; f32, f64);

impl Zero for f16 {
    const ZERO: Self = f16::ZERO;
}
impl One for f16 {
    const ONE: Self = f16::ONE;
}
impl Truthy for f16 {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self != Self::ZERO
    }
}

impl Zero for bf16 {
    const ZERO: Self = bf16::ZERO;
}
impl One for bf16 {
    const ONE: Self = bf16::ONE;
}
impl Truthy for bf16 {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self != Self::ZERO
    }
}
