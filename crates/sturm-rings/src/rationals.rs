//! The field of rational numbers Q.
//!
//! Exact arithmetic backend: sign decisions made over `Q` are never wrong,
//! which makes it the reference field for Sturm sequence tests.

use dashu::base::{Abs, Inverse, Signed as DashuSigned};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;

use crate::traits::{Field, OrderedField, Ring};

/// The field of rational numbers.
///
/// Values are always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Q(pub RBig);

impl Q {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        let num = if den < 0 { -IBig::from(num) } else { IBig::from(num) };
        Self(RBig::from_parts(num, UBig::from(den.unsigned_abs())))
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> &IBig {
        self.0.numerator()
    }

    /// Returns the (positive) denominator.
    #[must_use]
    pub fn denominator(&self) -> &UBig {
        self.0.denominator()
    }

    /// Returns the inner `RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Returns a reference to the inner `RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

impl Ring for Q {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }

    fn from_i64(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self(self.0.clone().inv()))
        }
    }
}

impl OrderedField for Q {
    const EXACT: bool = true;

    fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    fn epsilon() -> Self {
        Self::zero()
    }

    fn from_f64(value: f64) -> Option<Self> {
        RBig::try_from(value).ok().map(Self)
    }

    fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }
}

impl std::ops::Add for Q {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Q {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Q {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Q {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl num_traits::Zero for Q {
    fn zero() -> Self {
        <Self as Ring>::zero()
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl num_traits::One for Q {
    fn one() -> Self {
        <Self as Ring>::one()
    }
}

impl From<i64> for Q {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<RBig> for Q {
    fn from(value: RBig) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Q {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denominator().is_one() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_laws() {
        let a = Q::new(2, 3);
        let b = Q::new(3, 4);

        // 2/3 + 3/4 = 17/12
        assert_eq!(a.clone() + b.clone(), Q::new(17, 12));

        // 2/3 * 3/4 = 1/2
        assert_eq!(a * b, Q::new(1, 2));
    }

    #[test]
    fn test_negative_denominator() {
        assert_eq!(Q::new(1, -2), Q::new(-1, 2));
        assert_eq!(Q::new(-3, -6), Q::new(1, 2));
        assert_eq!(Q::new(1, -2).signum(), -1);
    }

    #[test]
    fn test_inverse() {
        let a = Q::new(3, 5);
        let inv = a.inv().unwrap();

        // 3/5 * 5/3 = 1
        assert!((a * inv).is_one());
        assert!(Q::zero().inv().is_none());
    }

    #[test]
    fn test_checked_div() {
        // (1/2) / (1/3) = 3/2
        let quot = Q::new(1, 2).checked_div(&Q::new(1, 3)).unwrap();
        assert_eq!(quot, Q::new(3, 2));
        assert!(Q::one().checked_div(&Q::zero()).is_none());
    }

    #[test]
    fn test_f64_conversion() {
        assert_eq!(Q::from_f64(0.5), Some(Q::new(1, 2)));
        assert_eq!(Q::from_f64(-3.0), Some(Q::from_integer(-3)));
        assert!(Q::from_f64(f64::NAN).is_none());
        assert!((Q::new(1, 3).to_f64() - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_num_traits_interop() {
        fn sum<T: num_traits::Zero + Clone>(values: &[T]) -> T {
            values.iter().cloned().fold(T::zero(), |acc, v| acc + v)
        }

        let total = sum(&[Q::new(1, 2), Q::new(1, 3), Q::new(1, 6)]);
        assert_eq!(total, <Q as num_traits::One>::one());
    }

    #[test]
    fn test_display() {
        assert_eq!(Q::from_integer(3).to_string(), "3");
        assert_eq!(Q::new(-2, 3).to_string(), "-2/3");
    }

    #[test]
    fn test_midpoint_is_exact() {
        let m = Q::new(1, 3).midpoint(&Q::new(1, 2));
        assert_eq!(m, Q::new(5, 12));
    }
}
