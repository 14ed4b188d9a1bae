//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::algorithms::{div_rem, poly_gcd, squarefree_part};
    use crate::dense::Polynomial;
    use sturm_rings::rationals::Q;
    use sturm_rings::traits::Ring;

    // Strategy for generating small rational coefficients
    fn small_coeff() -> impl Strategy<Value = Q> {
        (-100i64..100i64).prop_map(Q::from_integer)
    }

    // Strategy for generating small polynomials (degree 0-4)
    fn small_poly() -> impl Strategy<Value = Polynomial<Q>> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(Polynomial::from_coeffs)
    }

    // Strategy for generating non-zero polynomials
    fn nonzero_poly() -> impl Strategy<Value = Polynomial<Q>> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    // Strategy for a nonzero scalar
    fn nonzero_scalar() -> impl Strategy<Value = Q> {
        (-20i64..20i64, 1i64..10i64)
            .prop_filter("scalar must be non-zero", |(n, _)| *n != 0)
            .prop_map(|(n, d)| Q::new(n, d))
    }

    proptest! {
        // Polynomial ring axioms

        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            // a * (b + c) = a * b + a * c
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_additive_inverse(a in small_poly()) {
            prop_assert!(a.add(&a.neg()).is_zero());
        }

        // Evaluation is a ring homomorphism

        #[test]
        fn poly_eval_add(a in small_poly(), b in small_poly(), x in small_coeff()) {
            prop_assert_eq!(a.add(&b).evaluate(&x), a.evaluate(&x) + b.evaluate(&x));
        }

        #[test]
        fn poly_eval_mul(a in small_poly(), b in small_poly(), x in small_coeff()) {
            prop_assert_eq!(a.mul(&b).evaluate(&x), a.evaluate(&x) * b.evaluate(&x));
        }

        // The deferred scalar never changes the represented polynomial

        #[test]
        fn poly_scalar_is_transparent(a in small_poly(), s in nonzero_scalar(), x in small_coeff()) {
            let mut scaled = a.clone();
            scaled.set_scalar(s.clone()).unwrap();
            prop_assert_eq!(scaled.evaluate(&x), s * a.evaluate(&x));
            prop_assert_eq!(scaled.normalize(), scaled.fold_scalar());
        }

        // Division

        #[test]
        fn poly_div_rem_identity(a in small_poly(), b in nonzero_poly()) {
            let (q, r) = div_rem(&a, &b).unwrap();
            prop_assert!(r.is_zero() || r.degree() < b.degree());
            prop_assert_eq!(q.mul(&b).add(&r), a);
        }

        #[test]
        fn poly_gcd_divides_both(a in nonzero_poly(), b in nonzero_poly()) {
            let g = poly_gcd(&a, &b).unwrap();
            prop_assert!(div_rem(&a, &g).unwrap().1.is_zero());
            prop_assert!(div_rem(&b, &g).unwrap().1.is_zero());
        }

        // Calculus

        #[test]
        fn poly_derivative_product_rule(a in small_poly(), b in small_poly()) {
            let left = a.mul(&b).derivative();
            let right = a.derivative().mul(&b).add(&a.mul(&b.derivative()));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_integral_inverts_derivative(a in small_poly()) {
            prop_assert_eq!(a.integral(Q::zero()).derivative(), a);
        }

        #[test]
        fn poly_square_has_repeated_factor(a in nonzero_poly()) {
            prop_assume!(a.degree() >= 1);
            let sf = squarefree_part(&a.mul(&a)).unwrap();
            prop_assert!(sf.degree() <= a.degree());
        }
    }
}
