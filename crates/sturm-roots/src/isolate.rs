//! Real root isolation by Sturm bisection.
//!
//! Pending intervals live on an explicit work stack. Each interval carries
//! the variation counts of its endpoints, so every bisection evaluates the
//! sequence once, at the midpoint. The number of distinct roots strictly
//! inside `(a, b)` is `V(a) - V(b) - [b is a root]`, and an interval moves to
//! one of these states:
//!
//! - no root: dropped
//! - one root, neither endpoint a root: emitted as an [`IsolatedRoot::Interval`]
//! - otherwise: bisected; a midpoint that is a root is emitted as
//!   [`IsolatedRoot::Exact`] between the two halves
//! - out of depth or width budget: recorded as [`Condition::RootClusterTooTight`]
//! - `V(a) < V(b)`: recorded as [`Condition::InconsistentCount`]
//!
//! Only exact zeros become [`IsolatedRoot::Exact`]. A midpoint whose count is
//! [`uncertain`](Variations::uncertain) is replaced by another point of the
//! interval, and an uncertain end of the search interval is recorded as
//! [`Condition::UncertainSign`].
//!
//! The right half is pushed before the left one, so roots come off the stack
//! in increasing order and any prefix of the output is final.

use std::time::Instant;

use rayon::prelude::*;
use sturm_rings::traits::OrderedField;
use tracing::{debug, trace, warn};

use crate::config::IsolationConfig;
use crate::error::IsolationError;
use crate::interval::{Condition, IsolatedRoot, Isolation};
use crate::sequence::{check_interval, SturmSequence, Variations};
use crate::sign::SignOracle;

/// An interval waiting to be examined.
#[derive(Clone, Debug)]
struct Pending<K> {
    lower: K,
    upper: K,
    at_lower: Variations,
    at_upper: Variations,
    depth: usize,
}

impl<K> Pending<K> {
    /// Roots strictly inside, or `None` if the counts are inconsistent.
    fn roots_inside(&self) -> Option<usize> {
        let span = self.at_lower.count.checked_sub(self.at_upper.count)?;
        // An undecided upper end may not be a root after all.
        Some(span.saturating_sub(usize::from(self.at_upper.on_root)))
    }

    fn open_ends(&self) -> bool {
        !(self.at_lower.on_root
            || self.at_lower.uncertain
            || self.at_upper.on_root
            || self.at_upper.uncertain)
    }
}

/// Alternative split points, as fractions of the interval, tried when the
/// midpoint is undecided.
const SPLIT_FRACTIONS: [(i64, i64); 6] = [(7, 16), (9, 16), (3, 8), (5, 8), (1, 4), (3, 4)];

/// One entry of the work stack or of a parallel frontier.
#[derive(Clone, Debug)]
enum Node<K> {
    Pending(Pending<K>),
    Root(IsolatedRoot<K>),
    Note(Condition<K>),
}

impl<K: OrderedField, O: SignOracle<K>> SturmSequence<K, O> {
    /// Isolates the real roots in `[a, b]` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::InvalidInterval`] unless `a < b`.
    pub fn separate_roots(&self, a: &K, b: &K) -> Result<Isolation<K>, IsolationError> {
        self.separate_roots_with(a, b, &IsolationConfig::default())
    }

    /// Isolates the real roots in `[a, b]`.
    ///
    /// Roots at `a` or `b` are reported as exact points.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::InvalidInterval`] unless `a < b`.
    pub fn separate_roots_with(
        &self,
        a: &K,
        b: &K,
        config: &IsolationConfig,
    ) -> Result<Isolation<K>, IsolationError> {
        let mut stack = self.initial_nodes(a, b)?;
        stack.reverse();
        let deadline = config.time_budget.map(|budget| Instant::now() + budget);

        let mut roots = Vec::new();
        let mut conditions = self.base_conditions();

        while let Some(node) = stack.pop() {
            match node {
                Node::Root(root) => roots.push(root),
                Node::Note(condition) => conditions.push(condition),
                Node::Pending(pending) => {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        let unexplored = 1 + stack
                            .iter()
                            .filter(|n| matches!(n, Node::Pending(_)))
                            .count();
                        warn!(unexplored, "isolation time budget exhausted");
                        conditions.push(Condition::Cancelled { unexplored });
                        break;
                    }
                    stack.extend(self.expand(pending, config).into_iter().rev());
                }
            }
        }

        Ok(finish(roots, (a.clone(), b.clone()), conditions))
    }

    /// Isolates the real roots in `[-R, R]`, where `R` is
    /// [`root_bound`](Self::root_bound).
    ///
    /// # Errors
    ///
    /// Never fails for a sequence built from a nonzero polynomial.
    pub fn separate_roots_auto(&self) -> Result<Isolation<K>, IsolationError> {
        self.separate_roots_auto_with(&IsolationConfig::default())
    }

    /// [`separate_roots_auto`](Self::separate_roots_auto) with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Never fails for a sequence built from a nonzero polynomial.
    pub fn separate_roots_auto_with(
        &self,
        config: &IsolationConfig,
    ) -> Result<Isolation<K>, IsolationError> {
        let bound = self.root_bound();
        self.separate_roots_with(&-bound.clone(), &bound, config)
    }

    /// Isolates the real roots in `[a, b]`, expanding the frontier of pending
    /// intervals in parallel.
    ///
    /// The result is identical to [`separate_roots_with`](Self::separate_roots_with):
    /// the frontier is kept in interval order and merged by position, not by
    /// completion. Waves smaller than `parallel_threshold` run sequentially.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::InvalidInterval`] unless `a < b`.
    pub fn separate_roots_parallel(
        &self,
        a: &K,
        b: &K,
        config: &IsolationConfig,
    ) -> Result<Isolation<K>, IsolationError> {
        let mut frontier = self.initial_nodes(a, b)?;
        let deadline = config.time_budget.map(|budget| Instant::now() + budget);
        let mut cancelled = None;
        let mut waves = 0usize;

        loop {
            let pending = frontier
                .iter()
                .filter(|n| matches!(n, Node::Pending(_)))
                .count();
            if pending == 0 {
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!(unexplored = pending, "isolation time budget exhausted");
                cancelled = Some(pending);
                break;
            }

            waves += 1;
            trace!(wave = waves, pending, "expanding frontier");

            let expand = |node: Node<K>| match node {
                Node::Pending(p) => self.expand(p, config),
                done => vec![done],
            };
            frontier = if pending < config.parallel_threshold {
                frontier.into_iter().flat_map(expand).collect()
            } else {
                frontier.into_par_iter().flat_map_iter(expand).collect()
            };
        }

        let mut roots = Vec::new();
        let mut conditions = self.base_conditions();
        let mut blocked = false;
        for node in frontier {
            match node {
                Node::Pending(_) => blocked = true,
                Node::Root(root) if !blocked => roots.push(root),
                Node::Root(_) => {}
                Node::Note(condition) => conditions.push(condition),
            }
        }
        if let Some(unexplored) = cancelled {
            conditions.push(Condition::Cancelled { unexplored });
        }

        Ok(finish(roots, (a.clone(), b.clone()), conditions))
    }

    /// Stack content for `[a, b]` in left-to-right order.
    fn initial_nodes(&self, a: &K, b: &K) -> Result<Vec<Node<K>>, IsolationError> {
        check_interval(a, b)?;

        let at_lower = self.sign_variations(a);
        let at_upper = self.sign_variations(b);

        let mut nodes = Vec::with_capacity(3);
        if at_lower.uncertain {
            warn!(point = a.to_f64(), "sign undecided at lower bound");
            nodes.push(Node::Note(Condition::UncertainSign { point: a.clone() }));
        } else if at_lower.on_root {
            nodes.push(Node::Root(IsolatedRoot::Exact(a.clone())));
        }
        nodes.push(Node::Pending(Pending {
            lower: a.clone(),
            upper: b.clone(),
            at_lower,
            at_upper,
            depth: 0,
        }));
        if at_upper.uncertain {
            warn!(point = b.to_f64(), "sign undecided at upper bound");
            nodes.push(Node::Note(Condition::UncertainSign { point: b.clone() }));
        } else if at_upper.on_root {
            nodes.push(Node::Root(IsolatedRoot::Exact(b.clone())));
        }
        Ok(nodes)
    }

    /// Advances one interval by a single step, returning its successors in
    /// left-to-right order.
    fn expand(&self, pending: Pending<K>, config: &IsolationConfig) -> Vec<Node<K>> {
        let Some(inside) = pending.roots_inside() else {
            warn!(
                lower = pending.lower.to_f64(),
                upper = pending.upper.to_f64(),
                "sign variations increase across interval"
            );
            return vec![Node::Note(Condition::InconsistentCount {
                lower: pending.lower,
                upper: pending.upper,
            })];
        };
        if inside == 0 {
            return Vec::new();
        }
        if inside == 1 && pending.open_ends() {
            // A simple root flips the sign of p0; rounding in the chain can
            // miscount without it.
            if !self.sign_at(&pending.lower).differs_from(self.sign_at(&pending.upper)) {
                warn!(
                    lower = pending.lower.to_f64(),
                    upper = pending.upper.to_f64(),
                    "single root counted without a sign change"
                );
                return vec![Node::Note(Condition::InconsistentCount {
                    lower: pending.lower,
                    upper: pending.upper,
                })];
            }
            return vec![Node::Root(IsolatedRoot::Interval {
                lower: pending.lower,
                upper: pending.upper,
            })];
        }

        let split = if pending.depth >= config.max_depth || too_narrow(&pending, config) {
            None
        } else {
            self.split_point(&pending)
        };
        let Some((mid, at_mid)) = split else {
            warn!(
                lower = pending.lower.to_f64(),
                upper = pending.upper.to_f64(),
                roots = inside,
                depth = pending.depth,
                "roots too close to separate"
            );
            return vec![Node::Note(Condition::RootClusterTooTight {
                lower: pending.lower,
                upper: pending.upper,
                roots: inside,
            })];
        };

        trace!(
            lower = pending.lower.to_f64(),
            upper = pending.upper.to_f64(),
            split = mid.to_f64(),
            roots = inside,
            depth = pending.depth,
            mid_is_root = at_mid.on_root,
            "bisecting"
        );

        let depth = pending.depth + 1;
        let mut nodes = Vec::with_capacity(3);
        nodes.push(Node::Pending(Pending {
            lower: pending.lower,
            upper: mid.clone(),
            at_lower: pending.at_lower,
            at_upper: at_mid,
            depth,
        }));
        if at_mid.on_root {
            nodes.push(Node::Root(IsolatedRoot::Exact(mid.clone())));
        }
        nodes.push(Node::Pending(Pending {
            lower: mid,
            upper: pending.upper,
            at_lower: at_mid,
            at_upper: pending.at_upper,
            depth,
        }));
        nodes
    }

    /// First point strictly inside the interval whose count is not
    /// uncertain: the midpoint, then the [`SPLIT_FRACTIONS`].
    fn split_point(&self, pending: &Pending<K>) -> Option<(K, Variations)> {
        let (lower, upper) = (&pending.lower, &pending.upper);
        let width = upper.clone() - lower.clone();
        let offsets = SPLIT_FRACTIONS.iter().filter_map(|&(num, den)| {
            let offset = width.mul_by_scalar(num).checked_div(&K::from_i64(den))?;
            Some(lower.clone() + offset)
        });

        std::iter::once(lower.midpoint(upper))
            .chain(offsets)
            .filter(|x| lower < x && x < upper)
            .map(|x| {
                let at = self.sign_variations(&x);
                (x, at)
            })
            .find(|(_, at)| !at.uncertain)
    }

    fn base_conditions(&self) -> Vec<Condition<K>> {
        self.repeated_root()
            .map(|common_factor_degree| Condition::RepeatedRootDetected {
                common_factor_degree,
            })
            .into_iter()
            .collect()
    }
}

fn finish<K: OrderedField>(
    roots: Vec<IsolatedRoot<K>>,
    bounds: (K, K),
    conditions: Vec<Condition<K>>,
) -> Isolation<K> {
    debug!(
        lower = bounds.0.to_f64(),
        upper = bounds.1.to_f64(),
        roots = roots.len(),
        conditions = conditions.len(),
        "isolation finished"
    );
    Isolation {
        roots,
        bounds,
        conditions,
    }
}

fn too_narrow<K: OrderedField>(pending: &Pending<K>, config: &IsolationConfig) -> bool {
    let width = (pending.upper.clone() - pending.lower.clone()).to_f64();
    let scale = 1f64
        .max(pending.lower.to_f64().abs())
        .max(pending.upper.to_f64().abs());
    width <= config.min_relative_width * scale
}
