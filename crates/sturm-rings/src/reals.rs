//! IEEE double precision as an (approximate) ordered field.
//!
//! `f64` is not a field in the algebraic sense: addition is not associative
//! and zero tests are unreliable after cancellation. Callers that make sign
//! decisions over `f64` must go through a tolerance policy.

use crate::traits::{Field, OrderedField, Ring};

impl Ring for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn is_one(&self) -> bool {
        *self == 1.0
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_i64(n: i64) -> Self {
        n as f64
    }
}

impl Field for f64 {
    fn inv(&self) -> Option<Self> {
        if *self == 0.0 {
            None
        } else {
            Some(1.0 / self)
        }
    }
}

impl OrderedField for f64 {
    const EXACT: bool = false;

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn signum(&self) -> i8 {
        if *self > 0.0 {
            1
        } else if *self < 0.0 {
            -1
        } else {
            0
        }
    }

    fn epsilon() -> Self {
        f64::EPSILON
    }

    fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(value)
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn midpoint(&self, other: &Self) -> Self {
        // Avoids overflow of `a + b` near f64::MAX.
        self + (other - self) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signum_of_zero() {
        assert_eq!(OrderedField::signum(&0.0_f64), 0);
        assert_eq!(OrderedField::signum(&-0.0_f64), 0);
        assert_eq!(OrderedField::signum(&-2.5_f64), -1);
    }

    #[test]
    fn test_inverse() {
        assert_eq!(Field::inv(&4.0_f64), Some(0.25));
        assert_eq!(Field::inv(&0.0_f64), None);
    }

    #[test]
    fn test_midpoint_large_values() {
        let m = OrderedField::midpoint(&f64::MAX, &(f64::MAX / 2.0));
        assert!(m.is_finite());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(<f64 as OrderedField>::from_f64(f64::INFINITY).is_none());
        assert_eq!(<f64 as OrderedField>::from_f64(1.25), Some(1.25));
    }
}
