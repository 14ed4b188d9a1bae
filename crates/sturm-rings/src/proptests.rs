//! Property-based tests for the coefficient fields.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::traits::{Field, OrderedField, Ring};
    use crate::Q;

    // Strategy for generating small rationals
    fn small_q() -> impl Strategy<Value = Q> {
        (-1000i64..1000i64, 1i64..50i64).prop_map(|(n, d)| Q::new(n, d))
    }

    // Strategy for generating non-zero rationals
    fn non_zero_q() -> impl Strategy<Value = Q> {
        small_q().prop_filter("rational must be non-zero", |q| !q.is_zero())
    }

    proptest! {
        #[test]
        fn q_inverse_is_two_sided(a in non_zero_q()) {
            let inv = a.inv().unwrap();
            prop_assert!((a.clone() * inv.clone()).is_one());
            prop_assert!((inv * a).is_one());
        }

        #[test]
        fn q_midpoint_lies_between(a in small_q(), b in small_q()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let m = lo.midpoint(&hi);
            prop_assert!(lo <= m && m <= hi);
            prop_assert_eq!(m.clone() - lo, hi - m);
        }

        #[test]
        fn q_signum_matches_order(a in small_q()) {
            let expected = if a > Q::zero() { 1 } else if a < Q::zero() { -1 } else { 0 };
            prop_assert_eq!(a.signum(), expected);
        }

        #[test]
        fn q_abs_is_non_negative(a in small_q()) {
            prop_assert!(a.abs() >= Q::zero());
            prop_assert_eq!(a.abs(), (-a).abs());
        }

        #[test]
        fn q_f64_roundtrip_of_dyadics(n in -4096i64..4096i64) {
            // n / 64 is exactly representable in binary floating point
            let value = Q::new(n, 64);
            prop_assert_eq!(Q::from_f64(value.to_f64()), Some(value));
        }
    }
}
