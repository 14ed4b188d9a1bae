//! Sign oracles.
//!
//! Every sign decision made while building or evaluating a Sturm sequence
//! goes through a [`SignOracle`]. Over an exact field the sign of a value is
//! simply its sign; over `f64` a value is only trusted to be nonzero when it
//! clearly exceeds the rounding error of its own computation, which the
//! caller supplies as `magnitude`.

use sturm_rings::rationals::Q;
use sturm_rings::traits::OrderedField;

/// Relative tolerance of the default `f64` oracle.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-12;

/// Multiple of the field epsilon below which a remainder coefficient is
/// rounding noise, relative to the terms that produced it.
pub const REMAINDER_TOLERANCE_ULPS: i64 = 64;

/// Three-way sign classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Strictly negative.
    Negative,
    /// Zero, or indistinguishable from zero.
    Zero,
    /// Strictly positive.
    Positive,
}

impl Sign {
    /// Converts a `-1 / 0 / 1` signum into a sign.
    #[must_use]
    pub fn from_signum(signum: i8) -> Self {
        match signum {
            s if s < 0 => Sign::Negative,
            0 => Sign::Zero,
            _ => Sign::Positive,
        }
    }

    /// Returns true for [`Sign::Zero`].
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }

    /// Returns true if both signs are nonzero and differ.
    #[must_use]
    pub fn differs_from(self, other: Sign) -> bool {
        !self.is_zero() && !other.is_zero() && self != other
    }
}

/// Classifies values of a field as negative, zero or positive.
pub trait SignOracle<K>: Send + Sync {
    /// Classifies `value`, where `magnitude` bounds the size of the terms
    /// that were summed to produce it.
    fn sign(&self, value: &K, magnitude: &K) -> Sign;

    /// Returns true if a coefficient should be treated as zero, where `scale`
    /// bounds the size of the terms that were summed to produce it.
    fn is_negligible(&self, coefficient: &K, scale: &K) -> bool {
        self.sign(coefficient, scale).is_zero()
    }
}

/// Exact sign: a value is zero only if it is exactly zero.
///
/// Correct for exact fields such as [`Q`]. Over `f64` it trusts every
/// rounding error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExactSign;

impl<K: OrderedField> SignOracle<K> for ExactSign {
    fn sign(&self, value: &K, _magnitude: &K) -> Sign {
        Sign::from_signum(value.signum())
    }
}

/// Tolerance-based sign: `|value| <= relative * magnitude + absolute` is zero.
///
/// Infinite values, or values computed from an infinite magnitude, keep
/// their computed sign. Remainder coefficients are judged against the much
/// tighter [`REMAINDER_TOLERANCE_ULPS`] so that close but distinct roots are
/// not mistaken for a repeated one.
#[derive(Clone, Debug, PartialEq)]
pub struct ToleranceSign<K> {
    /// Tolerance relative to the magnitude of the computation.
    pub relative: K,
    /// Absolute floor below which every value is zero.
    pub absolute: K,
}

impl<K: OrderedField> ToleranceSign<K> {
    /// Creates an oracle with the given tolerances.
    #[must_use]
    pub fn new(relative: K, absolute: K) -> Self {
        Self { relative, absolute }
    }
}

impl<K: OrderedField> Default for ToleranceSign<K> {
    fn default() -> Self {
        Self {
            relative: K::from_f64(DEFAULT_RELATIVE_TOLERANCE).unwrap_or_else(K::epsilon),
            absolute: K::zero(),
        }
    }
}

impl<K: OrderedField> SignOracle<K> for ToleranceSign<K> {
    fn sign(&self, value: &K, magnitude: &K) -> Sign {
        if !value.is_finite() || !magnitude.is_finite() {
            return Sign::from_signum(value.signum());
        }
        let threshold = self.relative.clone() * magnitude.abs() + self.absolute.clone();
        if value.abs() <= threshold {
            Sign::Zero
        } else {
            Sign::from_signum(value.signum())
        }
    }

    fn is_negligible(&self, coefficient: &K, scale: &K) -> bool {
        if !coefficient.is_finite() {
            return false;
        }
        let rounding = K::epsilon().mul_by_scalar(REMAINDER_TOLERANCE_ULPS);
        let threshold = rounding * scale.abs() + self.absolute.clone();
        coefficient.abs() <= threshold
    }
}

/// Associates a coefficient field with its default sign oracle.
pub trait DefaultSign: OrderedField {
    /// Oracle used when none is given explicitly.
    type Oracle: SignOracle<Self> + Default;
}

impl DefaultSign for Q {
    type Oracle = ExactSign;
}

impl DefaultSign for f64 {
    type Oracle = ToleranceSign<f64>;
}
