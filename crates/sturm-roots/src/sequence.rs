//! Sturm sequences.
//!
//! The sequence of `p` is `p0 = p`, `p1 = p'` and `p_{i+1} = -rem(p_{i-1}, p_i)`
//! until the remainder vanishes. By Sturm's theorem, if `V(x)` counts the
//! sign changes of `p0(x), p1(x), ...` (zeros skipped), then `V(a) - V(b)` is
//! the number of distinct real roots of `p` in `(a, b]`.
//!
//! When `p` has repeated roots the chain ends in `g = gcd(p, p')` instead of
//! a constant. Every member is then divided by `g`, which leaves the
//! variation counts unchanged away from roots and makes `p0` the squarefree
//! part of `p`.
//!
//! Members are stored rescaled by positive factors, so signs (and therefore
//! variation counts) are unaffected: to unit max-norm over exact fields, and
//! by a power of two over floating point, where that rescaling is exact.
//!
//! Over floating point a remainder coefficient is dropped only when it is
//! within rounding noise of the terms that produced it, and a count is
//! flagged [`uncertain`](Variations::uncertain) when a value that decides it
//! is within the oracle's tolerance of zero without being exactly zero.

use std::fmt;

use sturm_poly::algorithms::division::div_rem;
use sturm_poly::Polynomial;
use sturm_rings::traits::OrderedField;
use tracing::{debug, warn};

use crate::bound;
use crate::error::IsolationError;
use crate::sign::{DefaultSign, Sign, SignOracle};

/// Sign-variation count of a sequence at a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variations {
    /// Number of sign changes, zeros skipped.
    pub count: usize,
    /// True if `p0` itself classifies as zero at the point.
    pub on_root: bool,
    /// True if the count may be wrong: `p0`, or a member whose neighbours do
    /// not have opposite signs, classified as zero without being exactly zero.
    pub uncertain: bool,
}

/// The Sturm sequence of a polynomial together with its sign oracle.
#[derive(Clone, Debug)]
pub struct SturmSequence<K: OrderedField, O> {
    members: Vec<Polynomial<K>>,
    oracle: O,
    common_factor_degree: usize,
}

impl<K: DefaultSign> SturmSequence<K, K::Oracle> {
    /// Builds the sequence with the field's default sign oracle.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::ZeroPolynomial`] for the zero polynomial.
    pub fn new(p: &Polynomial<K>) -> Result<Self, IsolationError> {
        Self::with_oracle(p, K::Oracle::default())
    }
}

impl<K: OrderedField, O: SignOracle<K>> SturmSequence<K, O> {
    /// Builds the sequence, using `oracle` for every zero test.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::ZeroPolynomial`] for the zero polynomial.
    pub fn with_oracle(p: &Polynomial<K>, oracle: O) -> Result<Self, IsolationError> {
        if p.is_zero() {
            return Err(IsolationError::ZeroPolynomial);
        }

        let p0 = normalized(p);
        let p1 = normalized(&p0.derivative());
        let mut members = vec![p0];
        if !p1.is_zero() {
            members.push(p1);
        }

        let mut degenerate = false;
        while members.len() >= 2 {
            let n = members.len();
            let (prev, cur) = (&members[n - 2], &members[n - 1]);
            if cur.degree() == 0 {
                break;
            }

            let (q, r) = div_rem(prev, cur)?;
            // r_i = prev_i - (q * cur)_i, so its rounding error scales with
            // (|prev| + |q| * |cur|)_i
            let scales = prev.abs_coeffs().add(&q.abs_coeffs().mul(&cur.abs_coeffs()));
            let r = purge_with(&oracle, &r, &scales);
            if r.is_zero() {
                degenerate = true;
                break;
            }
            members.push(normalized(&r.neg()));
        }

        let mut common_factor_degree = 0;
        if degenerate {
            let Some(g) = members.last().cloned() else {
                return Err(IsolationError::ZeroPolynomial);
            };
            common_factor_degree = g.degree();
            warn!(
                degree = p.degree(),
                common_factor_degree, "repeated roots detected, reducing to squarefree part"
            );
            members = members
                .iter()
                .map(|m| div_rem(m, &g).map(|(q, _)| normalized(&q)))
                .collect::<Result<_, _>>()?;
        }

        debug!(
            degree = p.degree(),
            length = members.len(),
            common_factor_degree,
            "built Sturm sequence"
        );

        Ok(Self {
            members,
            oracle,
            common_factor_degree,
        })
    }

    /// Counts sign changes of the sequence at `x`.
    ///
    /// Values the oracle classifies as zero are skipped. If `p0(x)` is zero
    /// the count equals the count just to the right of `x`.
    ///
    /// A member whose value overflows takes the sign of its leading term at
    /// the matching infinity.
    pub fn sign_variations(&self, x: &K) -> Variations {
        let signs: Vec<(Sign, bool)> =
            self.members.iter().map(|m| self.classify(m, x)).collect();

        let mut count = 0;
        let mut last = Sign::Zero;
        for &(sign, _) in &signs {
            if sign.is_zero() {
                continue;
            }
            if sign.differs_from(last) {
                count += 1;
            }
            last = sign;
        }

        let on_root = signs[0].0.is_zero();
        let uncertain = signs[0].1
            || (1..signs.len().saturating_sub(1))
                .any(|i| signs[i].1 && !signs[i - 1].0.differs_from(signs[i + 1].0));

        Variations {
            count,
            on_root,
            uncertain,
        }
    }

    /// Number of distinct roots in `(a, b]`, `V(a) - V(b)`.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::InvalidInterval`] unless `a < b`, and
    /// [`IsolationError::InconsistentCount`] if `V(a) < V(b)`, which only
    /// rounding error can produce.
    pub fn count_roots(&self, a: &K, b: &K) -> Result<usize, IsolationError> {
        check_interval(a, b)?;
        let va = self.sign_variations(a).count;
        let vb = self.sign_variations(b).count;
        va.checked_sub(vb).ok_or(IsolationError::InconsistentCount {
            lower: a.to_f64(),
            upper: b.to_f64(),
        })
    }

    /// Classifies `p0(x)` through the oracle.
    pub fn sign_at(&self, x: &K) -> Sign {
        self.classify(self.squarefree(), x).0
    }

    /// Bound on the roots of `p0`: every real root lies strictly inside
    /// `(-R, R)`. See [`bound::root_bound`].
    #[must_use]
    pub fn root_bound(&self) -> K {
        bound::root_bound(self.squarefree())
    }

    /// Sign of `member(x)`, and whether it was classified as zero without
    /// being exactly zero.
    fn classify(&self, member: &Polynomial<K>, x: &K) -> (Sign, bool) {
        let (value, magnitude) = member.evaluate_with_magnitude(x);
        if !value.is_finite() || !magnitude.is_finite() {
            return (asymptotic_sign(member, x), false);
        }
        let sign = self.oracle.sign(&value, &magnitude);
        (sign, sign.is_zero() && !value.is_zero())
    }
}

impl<K: OrderedField, O> SturmSequence<K, O> {
    /// Number of polynomials in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: the sequence holds at least `p0`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the `i`-th member.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Polynomial<K>> {
        self.members.get(i)
    }

    /// Iterates over the members, `p0` first.
    pub fn iter(&self) -> std::slice::Iter<'_, Polynomial<K>> {
        self.members.iter()
    }

    /// Returns `p0`, the squarefree part of the input scaled to unit max-norm.
    #[must_use]
    pub fn squarefree(&self) -> &Polynomial<K> {
        &self.members[0]
    }

    /// Degree of gcd(p, p') if the input had repeated roots.
    #[must_use]
    pub fn repeated_root(&self) -> Option<usize> {
        (self.common_factor_degree > 0).then_some(self.common_factor_degree)
    }

    /// Returns the sign oracle.
    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<'a, K: OrderedField, O> IntoIterator for &'a SturmSequence<K, O> {
    type Item = &'a Polynomial<K>;
    type IntoIter = std::slice::Iter<'a, Polynomial<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<K: OrderedField + fmt::Display, O> fmt::Display for SturmSequence<K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            writeln!(f, "p{i}(x) = {member}")?;
        }
        if let Some(degree) = self.repeated_root() {
            writeln!(f, "common factor of degree {degree} removed")?;
        }
        Ok(())
    }
}

/// Rejects `a >= b` and non-finite bounds.
pub(crate) fn check_interval<K: OrderedField>(a: &K, b: &K) -> Result<(), IsolationError> {
    if a < b && a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(IsolationError::InvalidInterval {
            lower: a.to_f64(),
            upper: b.to_f64(),
        })
    }
}

fn normalized<K: OrderedField>(p: &Polynomial<K>) -> Polynomial<K> {
    if K::EXACT {
        p.scaled_to_unit()
    } else {
        p.scaled_by_power_of_two()
    }
}

/// Sign of `p` beyond all of its roots on the side of `x`.
fn asymptotic_sign<K: OrderedField>(p: &Polynomial<K>, x: &K) -> Sign {
    let lead = p.leading_coeff().signum();
    if x.signum() < 0 && p.degree() % 2 == 1 {
        Sign::from_signum(-lead)
    } else {
        Sign::from_signum(lead)
    }
}

fn purge_with<K: OrderedField, O: SignOracle<K>>(
    oracle: &O,
    p: &Polynomial<K>,
    scales: &Polynomial<K>,
) -> Polynomial<K> {
    Polynomial::from_coeffs(
        (0..=p.degree())
            .map(|i| {
                let c = p.term(i);
                if oracle.is_negligible(&c, &scales.term(i)) {
                    K::zero()
                } else {
                    c
                }
            })
            .collect(),
    )
}
