//! Property-based tests for Sturm sequences and isolation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::config::IsolationConfig;
    use crate::interval::IsolatedRoot;
    use crate::sequence::SturmSequence;
    use crate::sign::ToleranceSign;
    use crate::solver::Solver;
    use sturm_poly::Polynomial;
    use sturm_rings::rationals::Q;
    use sturm_rings::traits::OrderedField;

    // Strategy for distinct rational roots in (-10, 10) with denominator 7
    fn distinct_roots() -> impl Strategy<Value = Vec<Q>> {
        proptest::collection::btree_set(-69i64..70, 1..=6)
            .prop_map(|set| set.into_iter().map(|n| Q::new(n, 7)).collect())
    }

    // Strategy for roots at least 1 apart, safe for the f64 backend
    fn separated_roots() -> impl Strategy<Value = Vec<Q>> {
        proptest::collection::btree_set(-9i64..9, 1..=5)
            .prop_map(|set| set.into_iter().map(|n| Q::new(3 * n + 1, 3)).collect())
    }

    // Strategy for roots with repetitions
    fn repeated_roots() -> impl Strategy<Value = Vec<Q>> {
        proptest::collection::vec(-5i64..5, 2..=6)
            .prop_map(|v| v.into_iter().map(|n| Q::new(2 * n + 1, 3)).collect())
    }

    fn distinct_count(roots: &[Q]) -> usize {
        let mut sorted = roots.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted.len()
    }

    proptest! {
        #[test]
        fn sturm_count_matches_roots(roots in distinct_roots(), a in -80i64..80, w in 1i64..80) {
            let seq = SturmSequence::new(&Polynomial::from_roots(&roots)).unwrap();
            let lower = Q::new(a, 8);
            let upper = Q::new(a + w, 8);

            let expected = roots.iter().filter(|r| &lower < *r && *r <= &upper).count();
            prop_assert_eq!(seq.count_roots(&lower, &upper).unwrap(), expected);
        }

        #[test]
        fn isolation_finds_every_root(roots in distinct_roots()) {
            let seq = SturmSequence::new(&Polynomial::from_roots(&roots)).unwrap();
            let iso = seq.separate_roots_auto().unwrap();

            prop_assert!(iso.is_complete());
            prop_assert_eq!(iso.len(), roots.len());

            let mut sorted = roots.clone();
            sorted.sort();
            for (found, expected) in iso.iter().zip(&sorted) {
                prop_assert!(found.contains(expected));
            }
        }

        #[test]
        fn isolated_intervals_bracket_sign_change(roots in distinct_roots()) {
            let seq = SturmSequence::new(&Polynomial::from_roots(&roots)).unwrap();
            let iso = seq.separate_roots_auto().unwrap();
            let p0 = seq.squarefree();

            for pair in iso.roots.windows(2) {
                prop_assert!(pair[0].upper() <= pair[1].lower());
            }
            for root in &iso {
                if let IsolatedRoot::Interval { lower, upper } = root {
                    prop_assert_eq!(p0.evaluate(lower).signum() * p0.evaluate(upper).signum(), -1);
                }
            }
        }

        #[test]
        fn repeated_roots_reported_once(roots in repeated_roots()) {
            let p = Polynomial::from_roots(&roots);
            let seq = SturmSequence::new(&p).unwrap();
            let iso = seq.separate_roots_auto().unwrap();

            let distinct = distinct_count(&roots);
            prop_assert_eq!(iso.len(), distinct);
            prop_assert_eq!(seq.repeated_root().is_some(), distinct < roots.len());
            prop_assert_eq!(seq.squarefree().degree(), distinct);
        }

        #[test]
        fn parallel_isolation_matches_sequential(roots in distinct_roots()) {
            let seq = SturmSequence::new(&Polynomial::from_roots(&roots)).unwrap();
            let config = IsolationConfig::default().with_parallel_threshold(1);
            let (a, b) = (Q::from_integer(-11), Q::from_integer(11));

            let sequential = seq.separate_roots_with(&a, &b, &config).unwrap();
            let parallel = seq.separate_roots_parallel(&a, &b, &config).unwrap();
            prop_assert_eq!(parallel, sequential);
        }

        #[test]
        fn float_and_exact_backends_agree(roots in separated_roots()) {
            let exact = SturmSequence::new(&Polynomial::from_roots(&roots)).unwrap();
            let float_roots: Vec<f64> = roots.iter().map(OrderedField::to_f64).collect();
            let float = SturmSequence::with_oracle(
                &Polynomial::from_roots(&float_roots),
                ToleranceSign::default(),
            )
            .unwrap();

            prop_assert_eq!(
                exact.count_roots(&Q::from_integer(-11), &Q::from_integer(11)).unwrap(),
                float.count_roots(&-11.0, &11.0).unwrap()
            );
        }

        #[test]
        fn refined_roots_within_tolerance(roots in separated_roots()) {
            let float_roots: Vec<f64> = roots.iter().map(OrderedField::to_f64).collect();
            let seq = SturmSequence::new(&Polynomial::from_roots(&float_roots)).unwrap();
            let iso = seq.separate_roots_auto().unwrap();
            let refined = Solver::default().refine_all(seq.squarefree(), &iso.roots);

            let mut sorted = float_roots.clone();
            sorted.sort_by(f64::total_cmp);
            prop_assert_eq!(refined.len(), sorted.len());
            for (result, expected) in refined.iter().zip(&sorted) {
                let root = result.as_ref().unwrap();
                prop_assert!((root.value - expected).abs() < 1e-6);
            }
        }
    }
}
