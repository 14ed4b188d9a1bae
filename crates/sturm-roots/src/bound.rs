//! Bounds on the magnitude of real roots.

use sturm_poly::Polynomial;
use sturm_rings::traits::{Field, OrderedField, Ring};

/// Cauchy's bound `1 + max_{i<n} |a_i| / |a_n|`.
///
/// Every complex root `z` of `p` satisfies `|z| < R`, so all real roots lie
/// strictly inside `(-R, R)`. Constants (including zero) get the bound 1.
#[must_use]
pub fn cauchy_bound<K: OrderedField>(p: &Polynomial<K>) -> K {
    let n = p.degree();
    if n == 0 {
        return K::one();
    }

    let lead = p.leading_coeff().abs();
    let max_lower = (0..n).map(|i| p.term(i).abs()).fold(K::zero(), K::max_of);

    K::one() + max_lower.checked_div(&lead).unwrap_or_else(K::zero)
}

/// Fujiwara's bound `2 max(|a_{n-1}/a_n|, |a_{n-2}/a_n|^(1/2), ..., |a_0/2a_n|^(1/n))`,
/// rounded up to the next power of two.
///
/// Unlike Cauchy's bound it grows with the root magnitudes rather than with
/// the coefficients, so evaluating a degree-`n` polynomial at it stays within
/// `f64` range. The power of two keeps bisection midpoints short in exact
/// fields. Returns `None` for constants, for polynomials whose only root is
/// zero, and when a coefficient ratio has no finite `f64` image.
#[must_use]
pub fn fujiwara_bound<K: OrderedField>(p: &Polynomial<K>) -> Option<K> {
    let n = p.degree();
    if n == 0 {
        return None;
    }

    let lead = p.leading_coeff().abs().to_f64();
    if !(lead.is_finite() && lead > 0.0) {
        return None;
    }

    let mut largest = 0f64;
    for k in 1..=n {
        let c = p.term(n - k);
        let magnitude = c.abs().to_f64();
        if magnitude == 0.0 && !c.is_zero() {
            return None;
        }
        let mut ratio = magnitude / lead;
        if k == n {
            ratio /= 2.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let term = ratio.powf(1.0 / k as f64);
        largest = largest.max(term);
    }

    let bound = 2.0 * largest * (1.0 + 1e-9);
    if !(bound.is_finite() && bound > 0.0) {
        return None;
    }
    K::from_f64(bound.log2().ceil().exp2())
}

/// The smaller of [`cauchy_bound`] and [`fujiwara_bound`]: every real root of
/// `p` lies strictly inside `(-R, R)`.
#[must_use]
pub fn root_bound<K: OrderedField>(p: &Polynomial<K>) -> K {
    let cauchy = cauchy_bound(p);
    match fujiwara_bound(p) {
        Some(fujiwara) if fujiwara < cauchy => fujiwara,
        _ => cauchy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sturm_rings::rationals::Q;

    fn poly(coeffs: &[i64]) -> Polynomial<Q> {
        Polynomial::from_coeffs(coeffs.iter().map(|&n| Q::from_integer(n)).collect())
    }

    #[test]
    fn test_cauchy_bound_cubic() {
        // (x-1)(x-2)(x-3): max |a_i| = 11
        assert_eq!(cauchy_bound(&poly(&[-6, 11, -6, 1])), Q::from_integer(12));
    }

    #[test]
    fn test_cauchy_bound_uses_leading_coeff() {
        // 2x^2 - 8: roots +-2, bound 1 + 8/2 = 5
        assert_eq!(cauchy_bound(&poly(&[-8, 0, 2])), Q::from_integer(5));
        assert_eq!(cauchy_bound(&poly(&[3])), Q::one());
    }

    #[test]
    fn test_cauchy_bound_contains_roots_f64() {
        let p = Polynomial::from_roots(&[-7.5, 0.25, 3.0]);
        let r = cauchy_bound(&p);
        assert!(r > 7.5);
    }

    #[test]
    fn test_fujiwara_bound_tracks_root_size() {
        // x^20 - 1e20 has real roots +-10; Cauchy gives 1e20 + 1
        let mut coeffs = vec![0.0; 21];
        coeffs[0] = -1e20;
        coeffs[20] = 1.0;
        let p = Polynomial::from_coeffs(coeffs);

        assert_eq!(fujiwara_bound(&p), Some(32.0));
        assert_eq!(root_bound(&p), 32.0);
        assert!(p.evaluate(&32.0).is_finite());
    }

    #[test]
    fn test_root_bound_takes_smaller() {
        // Cauchy 12, Fujiwara 2 * 6 rounded up to 16
        let cubic = poly(&[-6, 11, -6, 1]);
        assert_eq!(fujiwara_bound(&cubic), Some(Q::from_integer(16)));
        assert_eq!(root_bound(&cubic), Q::from_integer(12));

        // x^2 - x/3: Cauchy 4/3, Fujiwara 2/3 rounded up to 1
        let p = Polynomial::from_coeffs(vec![Q::zero(), Q::new(-1, 3), Q::one()]);
        assert_eq!(root_bound(&p), Q::one());
    }

    #[test]
    fn test_fujiwara_bound_degenerate() {
        assert_eq!(fujiwara_bound(&poly(&[7])), None);
        // x^3: the only root is zero
        assert_eq!(fujiwara_bound(&poly(&[0, 0, 0, 1])), None);
        assert_eq!(root_bound(&poly(&[0, 0, 0, 1])), Q::one());
    }
}
