//! Algebraic structure traits.
//!
//! These traits describe the coefficient fields the polynomial and root
//! isolation crates are generic over. They are deliberately small: Sturm
//! sequences only need field arithmetic, an ordering and a way to move
//! between the field and `f64` for bounds and tolerances.

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

/// A commutative ring with identity.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
///
/// Equality is only required to be partial so that IEEE floats qualify.
pub trait Ring:
    Clone
    + PartialEq
    + Debug
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Embeds an integer into the ring.
    fn from_i64(n: i64) -> Self;

    /// Computes `n * self`.
    fn mul_by_scalar(&self, n: i64) -> Self {
        if n == 0 {
            return Self::zero();
        }
        self.clone() * Self::from_i64(n)
    }

    /// Computes self^n for non-negative n.
    fn pow(&self, n: u32) -> Self {
        if n == 0 {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            exp >>= 1;
        }

        result
    }
}

/// A field is a ring where every non-zero element has a multiplicative inverse.
pub trait Field: Ring {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self) -> Option<Self>;

    /// Divides by another element, or returns `None` when `other` is zero.
    fn checked_div(&self, other: &Self) -> Option<Self> {
        other.inv().map(|inv| self.clone() * inv)
    }
}

/// An ordered field that can be compared against and converted to `f64`.
///
/// Root bounds, bisection midpoints and tolerances are expressed through
/// this trait so the isolation code stays agnostic of the backend.
pub trait OrderedField: Field + PartialOrd {
    /// True when arithmetic in this field is exact (no rounding).
    const EXACT: bool;

    /// Returns the absolute value.
    fn abs(&self) -> Self;

    /// Returns the sign: -1, 0, or 1.
    fn signum(&self) -> i8;

    /// The relative rounding unit of the field; zero for exact fields.
    fn epsilon() -> Self;

    /// Converts from `f64`, failing on NaN and infinities.
    fn from_f64(value: f64) -> Option<Self>;

    /// Converts to the nearest `f64`.
    fn to_f64(&self) -> f64;

    /// Returns true if the value is finite. Exact fields are always finite.
    fn is_finite(&self) -> bool {
        true
    }

    /// Returns the point halfway between `self` and `other`.
    fn midpoint(&self, other: &Self) -> Self {
        let two = Self::from_i64(2);
        let sum = self.clone() + other.clone();
        sum.checked_div(&two).unwrap_or(sum)
    }

    /// Returns the larger of two values.
    fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Returns the smaller of two values.
    fn min_of(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}
