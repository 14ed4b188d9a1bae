//! Isolated roots and the result of an isolation run.

use std::fmt;

use sturm_rings::traits::OrderedField;

/// One real root located by isolation.
#[derive(Clone, Debug, PartialEq)]
pub enum IsolatedRoot<K> {
    /// Exactly one distinct root lies strictly inside `(lower, upper)`.
    ///
    /// Neither endpoint is a root and the polynomial changes sign across the
    /// interval.
    Interval {
        /// Lower endpoint.
        lower: K,
        /// Upper endpoint.
        upper: K,
    },
    /// The point is itself a root.
    Exact(K),
}

impl<K: OrderedField> IsolatedRoot<K> {
    /// Returns the lower end (the point itself for exact roots).
    #[must_use]
    pub fn lower(&self) -> &K {
        match self {
            IsolatedRoot::Interval { lower, .. } => lower,
            IsolatedRoot::Exact(x) => x,
        }
    }

    /// Returns the upper end (the point itself for exact roots).
    #[must_use]
    pub fn upper(&self) -> &K {
        match self {
            IsolatedRoot::Interval { upper, .. } => upper,
            IsolatedRoot::Exact(x) => x,
        }
    }

    /// Returns true for exact roots.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        matches!(self, IsolatedRoot::Exact(_))
    }

    /// Returns `upper - lower`, zero for exact roots.
    #[must_use]
    pub fn width(&self) -> K {
        self.upper().clone() - self.lower().clone()
    }

    /// Returns the midpoint, a crude approximation of the root.
    #[must_use]
    pub fn midpoint(&self) -> K {
        self.lower().midpoint(self.upper())
    }

    /// Returns true if `x` is the exact root or lies strictly inside the interval.
    #[must_use]
    pub fn contains(&self, x: &K) -> bool {
        match self {
            IsolatedRoot::Interval { lower, upper } => lower < x && x < upper,
            IsolatedRoot::Exact(r) => r == x,
        }
    }
}

impl<K: fmt::Display> fmt::Display for IsolatedRoot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsolatedRoot::Interval { lower, upper } => write!(f, "({lower}, {upper})"),
            IsolatedRoot::Exact(x) => write!(f, "[{x}]"),
        }
    }
}

/// Recoverable conditions met while isolating.
///
/// None of them invalidates the roots that were returned.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition<K> {
    /// The input shares a factor of this degree with its derivative; the
    /// sequence was built from the squarefree part, so each repeated root is
    /// reported once.
    RepeatedRootDetected {
        /// Degree of gcd(p, p').
        common_factor_degree: usize,
    },
    /// An interval could not be resolved: the depth or width budget ran
    /// out while it still held several roots, or every split point tried
    /// had an undecided sign.
    RootClusterTooTight {
        /// Lower end of the unresolved interval.
        lower: K,
        /// Upper end of the unresolved interval.
        upper: K,
        /// Number of distinct roots strictly inside.
        roots: usize,
    },
    /// The time budget elapsed; the returned roots are a prefix of the full
    /// result.
    Cancelled {
        /// Number of intervals left unexplored.
        unexplored: usize,
    },
    /// The sign at an end of the search interval was within the oracle's
    /// tolerance of zero without being exactly zero. A root at or next to
    /// the point was neither reported nor ruled out.
    UncertainSign {
        /// The undecided point.
        point: K,
    },
    /// Sign variations increased from `lower` to `upper`, or a single
    /// counted root showed no sign change; nothing inside the interval was
    /// reported.
    InconsistentCount {
        /// Lower end of the interval.
        lower: K,
        /// Upper end of the interval.
        upper: K,
    },
}

impl<K: fmt::Display> fmt::Display for Condition<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::RepeatedRootDetected {
                common_factor_degree,
            } => write!(f, "repeated roots (common factor of degree {common_factor_degree})"),
            Condition::RootClusterTooTight { lower, upper, roots } => {
                write!(f, "{roots} roots too close to separate in ({lower}, {upper})")
            }
            Condition::Cancelled { unexplored } => {
                write!(f, "cancelled with {unexplored} intervals unexplored")
            }
            Condition::UncertainSign { point } => {
                write!(f, "sign undecided at {point}")
            }
            Condition::InconsistentCount { lower, upper } => {
                write!(f, "inconsistent sign variations on ({lower}, {upper})")
            }
        }
    }
}

/// Result of one isolation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Isolation<K> {
    /// Isolated roots in increasing order.
    pub roots: Vec<IsolatedRoot<K>>,
    /// The searched interval `[lower, upper]`.
    pub bounds: (K, K),
    /// Conditions recorded along the way.
    pub conditions: Vec<Condition<K>>,
}

impl<K> Isolation<K> {
    /// Number of isolated roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns true if no root was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Iterates over the isolated roots in increasing order.
    pub fn iter(&self) -> std::slice::Iter<'_, IsolatedRoot<K>> {
        self.roots.iter()
    }

    /// Returns true if every root in the bounds was isolated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.conditions
            .iter()
            .all(|c| matches!(c, Condition::RepeatedRootDetected { .. }))
    }

    /// Returns the degree of the repeated factor, if one was detected.
    #[must_use]
    pub fn repeated_root(&self) -> Option<usize> {
        self.conditions.iter().find_map(|c| match c {
            Condition::RepeatedRootDetected {
                common_factor_degree,
            } => Some(*common_factor_degree),
            _ => None,
        })
    }
}

impl<'a, K> IntoIterator for &'a Isolation<K> {
    type Item = &'a IsolatedRoot<K>;
    type IntoIter = std::slice::Iter<'a, IsolatedRoot<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

impl<K: fmt::Display> fmt::Display for Isolation<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lower, upper) = &self.bounds;
        writeln!(f, "{} roots in [{lower}, {upper}]", self.roots.len())?;
        for root in &self.roots {
            writeln!(f, "  {root}")?;
        }
        for condition in &self.conditions {
            writeln!(f, "  note: {condition}")?;
        }
        Ok(())
    }
}
