//! Errors for sequence construction, isolation and refinement.
//!
//! Bounds are reported as `f64` so that the error types stay independent of
//! the coefficient field.

use sturm_poly::PolyError;
use thiserror::Error;

/// Errors that abort a sequence construction or isolation call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum IsolationError {
    /// The identically zero polynomial has no Sturm sequence.
    #[error("the zero polynomial has no Sturm sequence")]
    ZeroPolynomial,

    /// The search interval is empty, reversed, or not finite.
    #[error("invalid interval [{lower}, {upper}]: lower bound must be below upper bound")]
    InvalidInterval {
        /// Requested lower bound.
        lower: f64,
        /// Requested upper bound.
        upper: f64,
    },

    /// Sign variations increased from `lower` to `upper`, so rounding error
    /// in the evaluations makes the root count meaningless.
    #[error("inconsistent sign variation counts on [{lower}, {upper}]")]
    InconsistentCount {
        /// Lower end of the interval.
        lower: f64,
        /// Upper end of the interval.
        upper: f64,
    },

    /// Polynomial arithmetic failed while building the sequence.
    #[error(transparent)]
    Poly(#[from] PolyError),
}

/// Errors raised while refining a single isolated root.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SolveError {
    /// The polynomial has the same nonzero sign at both ends of the interval.
    #[error("interval [{lower}, {upper}] does not bracket a sign change")]
    NonBracketingInterval {
        /// Lower end of the rejected interval.
        lower: f64,
        /// Upper end of the rejected interval.
        upper: f64,
    },

    /// The iteration budget ran out before the tolerance was reached.
    #[error("no convergence after {iterations} iterations (bracket width {width})")]
    MaxIterationsExceeded {
        /// Iterations performed.
        iterations: usize,
        /// Width of the bracket when the budget ran out.
        width: f64,
    },
}
