//! Bracketed refinement of isolated roots.
//!
//! Every iterate stays inside a bracket across which the polynomial changes
//! sign. An accelerated candidate (secant or Newton) is accepted only if it
//! lies strictly inside the bracket and the previous step at least halved
//! the bracket; otherwise the midpoint is used. Newton iterates tend to
//! approach the root from one side, so a short step is confirmed by a sign
//! change on `r ± tolerance/4` instead of waiting for the bracket to close.
//!
//! Over exact fields an accelerated candidate is rounded to the nearest `f64`
//! before use. Exact Newton and secant iterates grow in size with every step,
//! while the rounded ones stay short; convergence still rests on the bracket.

use rayon::prelude::*;
use sturm_poly::Polynomial;
use sturm_rings::traits::{Field, OrderedField, Ring};
use tracing::trace;

use crate::config::{Acceleration, SolverConfig};
use crate::error::SolveError;
use crate::interval::IsolatedRoot;

/// A refined root together with its final bracket.
#[derive(Clone, Debug, PartialEq)]
pub struct RefinedRoot<K> {
    /// Approximation of the root.
    pub value: K,
    /// Lower end of the final bracket.
    pub lower: K,
    /// Upper end of the final bracket.
    pub upper: K,
    /// `|p(value)|`.
    pub residual: K,
    /// Iterations performed.
    pub iterations: usize,
}

impl<K: OrderedField> RefinedRoot<K> {
    /// Width of the final bracket, the achieved tolerance.
    #[must_use]
    pub fn width(&self) -> K {
        self.upper.clone() - self.lower.clone()
    }
}

/// Refines isolated roots to a requested tolerance.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Refines one isolated root of `p`.
    ///
    /// `p` must change sign across an interval root, which holds for the
    /// squarefree polynomial the interval was isolated with.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NonBracketingInterval`] if `p` has the same
    /// nonzero sign at both ends, and [`SolveError::MaxIterationsExceeded`]
    /// if the iteration budget runs out.
    pub fn refine<K: OrderedField>(
        &self,
        p: &Polynomial<K>,
        root: &IsolatedRoot<K>,
    ) -> Result<RefinedRoot<K>, SolveError> {
        match root {
            IsolatedRoot::Exact(x) => Ok(settled(p, x.clone(), x.clone(), x.clone(), 0)),
            IsolatedRoot::Interval { lower, upper } => self.refine_bracket(p, lower, upper),
        }
    }

    /// Refines every root in parallel.
    ///
    /// Results are in input order; a failure affects only its own root.
    pub fn refine_all<K: OrderedField>(
        &self,
        p: &Polynomial<K>,
        roots: &[IsolatedRoot<K>],
    ) -> Vec<Result<RefinedRoot<K>, SolveError>> {
        roots.par_iter().map(|root| self.refine(p, root)).collect()
    }

    fn refine_bracket<K: OrderedField>(
        &self,
        p: &Polynomial<K>,
        lower: &K,
        upper: &K,
    ) -> Result<RefinedRoot<K>, SolveError> {
        let mut lo = lower.clone();
        let mut hi = upper.clone();
        let mut f_lo = p.evaluate(&lo);
        let f_hi = p.evaluate(&hi);

        if f_lo.is_zero() {
            return Ok(settled(p, lo.clone(), lo.clone(), lo, 0));
        }
        if f_hi.is_zero() {
            return Ok(settled(p, hi.clone(), hi.clone(), hi, 0));
        }
        if f_lo.signum() == f_hi.signum() {
            return Err(SolveError::NonBracketingInterval {
                lower: lo.to_f64(),
                upper: hi.to_f64(),
            });
        }

        let tolerance = K::from_f64(self.config.tolerance).unwrap_or_else(K::zero);
        let residual = K::from_f64(self.config.residual).unwrap_or_else(K::zero);
        let quarter = K::from_f64(0.25).unwrap_or_else(K::zero);

        // Current iterate, and the one before it for the secant step.
        let (mut x, mut fx, mut x_prev, mut f_prev) = if f_lo.abs() < f_hi.abs() {
            (lo.clone(), f_lo.clone(), hi.clone(), f_hi)
        } else {
            (hi.clone(), f_hi, lo.clone(), f_lo.clone())
        };
        let mut dfx = p.evaluate_with_derivative(&x).1;
        let mut last_width = (hi.clone() - lo.clone()).mul_by_scalar(2);

        for iteration in 1..=self.config.max_iterations {
            let width = hi.clone() - lo.clone();
            if width < tolerance {
                return Ok(settled(p, x, lo, hi, iteration - 1));
            }

            let stalled = width.clone().mul_by_scalar(2) > last_width;
            last_width = width;

            let candidate = if stalled {
                None
            } else {
                match self.config.acceleration {
                    Acceleration::Bisection => None,
                    Acceleration::Secant => secant_step(&x_prev, &f_prev, &x, &fx),
                    Acceleration::Newton => newton_step(&x, &fx, &dfx),
                }
                .map(shortened)
            };
            let accelerated = candidate
                .as_ref()
                .is_some_and(|c| &lo < c && c < &hi);
            let next = match candidate {
                Some(c) if accelerated => c,
                _ => lo.midpoint(&hi),
            };

            if !(lo < next && next < hi) {
                // Floating point cannot split the bracket any further.
                return Ok(settled(p, x, lo, hi, iteration - 1));
            }

            let (f_next, df_next) = p.evaluate_with_derivative(&next);
            if f_next.is_zero() {
                return Ok(settled(p, next.clone(), next.clone(), next, iteration));
            }

            if f_next.signum() == f_lo.signum() {
                lo = next.clone();
                f_lo = f_next.clone();
            } else {
                hi = next.clone();
            }
            if f_next.abs() <= residual {
                return Ok(settled(p, next, lo, hi, iteration));
            }

            let step = (next.clone() - x.clone()).abs();
            x_prev = std::mem::replace(&mut x, next);
            f_prev = std::mem::replace(&mut fx, f_next);
            dfx = df_next;

            if accelerated && step.mul_by_scalar(2) < tolerance {
                let offset = tolerance.clone() * quarter.clone();
                let left = lo.clone().max_of(x.clone() - offset.clone());
                let right = hi.clone().min_of(x.clone() + offset);
                let s_left = p.evaluate(&left).signum();
                let s_right = p.evaluate(&right).signum();
                if s_left * s_right <= 0 {
                    trace!(iteration, "short step confirmed by sign change");
                    return Ok(settled(p, x, left, right, iteration));
                }
            }
        }

        Err(SolveError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            width: (hi - lo).to_f64(),
        })
    }
}

fn settled<K: OrderedField>(
    p: &Polynomial<K>,
    value: K,
    lower: K,
    upper: K,
    iterations: usize,
) -> RefinedRoot<K> {
    let residual = p.evaluate(&value).abs();
    RefinedRoot {
        value,
        lower,
        upper,
        residual,
        iterations,
    }
}

fn shortened<K: OrderedField>(x: K) -> K {
    if K::EXACT {
        K::from_f64(x.to_f64()).unwrap_or(x)
    } else {
        x
    }
}

fn secant_step<K: OrderedField>(x0: &K, f0: &K, x1: &K, f1: &K) -> Option<K> {
    let slope = (f1.clone() - f0.clone()).checked_div(&(x1.clone() - x0.clone()))?;
    Some(x1.clone() - f1.clone().checked_div(&slope)?)
}

fn newton_step<K: OrderedField>(x: &K, fx: &K, dfx: &K) -> Option<K> {
    Some(x.clone() - fx.checked_div(dfx)?)
}
