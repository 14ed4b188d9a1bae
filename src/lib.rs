//! # Sturm
//!
//! Real root isolation and refinement for univariate polynomials.
//!
//! A polynomial is turned into its Sturm sequence, whose sign variations at
//! two points count the distinct real roots between them. Bisection driven by
//! those counts isolates every real root in an interval of its own, and a
//! bracketed solver refines each interval to the requested tolerance.
//!
//! ## Features
//!
//! - **Exact or floating point**: coefficients in `Q` (big rationals) or `f64`
//! - **Pluggable sign oracles**: exact signs, or signs judged against the
//!   rounding error of each evaluation
//! - **Repeated roots**: detected and reduced to the squarefree part
//! - **Parallel**: isolation frontier and refinement on rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use sturm::prelude::*;
//!
//! // (x - 1)(x - 2)(x - 3)
//! let report = sturm::find_roots(vec![-6.0, 11.0, -6.0, 1.0]).unwrap();
//! let values: Vec<f64> = report.values().collect();
//! assert_eq!(values.len(), 3);
//! assert!((values[1] - 2.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use thiserror::Error;

pub use sturm_poly as poly;
pub use sturm_rings as rings;
pub use sturm_roots as roots;

use sturm_poly::{PolyError, Polynomial};
use sturm_roots::{
    Condition, DefaultSign, IsolationConfig, IsolationError, RefinedRoot, SolveError, Solver,
    SolverConfig, SturmSequence,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use sturm_poly::Polynomial;
    pub use sturm_rings::{Field, OrderedField, Ring, Q};
    pub use sturm_roots::{
        Acceleration, Condition, ExactSign, IsolatedRoot, Isolation, IsolationConfig, Solver,
        SolverConfig, SturmSequence, ToleranceSign,
    };
}

/// Errors from any stage of root finding.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Polynomial construction failed.
    #[error(transparent)]
    Poly(#[from] PolyError),

    /// Sequence construction or isolation failed.
    #[error(transparent)]
    Isolation(#[from] IsolationError),

    /// A root could not be refined.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Result alias for root finding.
pub type Result<T> = std::result::Result<T, Error>;

/// All real roots of a polynomial, refined.
#[derive(Clone, Debug, PartialEq)]
pub struct RootReport<K> {
    /// One refinement result per isolated root, in increasing order; each
    /// distinct root appears once and a failure affects only its own entry.
    pub roots: Vec<std::result::Result<RefinedRoot<K>, SolveError>>,
    /// Conditions recorded during isolation.
    pub conditions: Vec<Condition<K>>,
}

impl<K: Clone> RootReport<K> {
    /// Iterates over the values of the successfully refined roots.
    pub fn values(&self) -> impl Iterator<Item = K> + '_ {
        self.roots.iter().flatten().map(|r| r.value.clone())
    }

    /// Iterates over the refinement failures.
    pub fn failures(&self) -> impl Iterator<Item = &SolveError> + '_ {
        self.roots.iter().filter_map(|r| r.as_ref().err())
    }

    /// Returns true if every root was isolated and refined.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.roots.iter().all(std::result::Result::is_ok)
            && self
                .conditions
                .iter()
                .all(|c| matches!(c, Condition::RepeatedRootDetected { .. }))
    }
}

/// Finds every real root of the polynomial with coefficients `coeffs`
/// (ascending exponent order), using default settings throughout.
///
/// # Errors
///
/// Fails for the zero polynomial and for non-finite coefficients. Roots that
/// cannot be refined are reported in [`RootReport::roots`] instead.
pub fn find_roots<K: DefaultSign>(coeffs: Vec<K>) -> Result<RootReport<K>> {
    find_roots_with(coeffs, &IsolationConfig::default(), &SolverConfig::default())
}

/// [`find_roots`] with explicit isolation and solver settings.
///
/// # Errors
///
/// Fails for the zero polynomial and for non-finite coefficients.
pub fn find_roots_with<K: DefaultSign>(
    coeffs: Vec<K>,
    isolation: &IsolationConfig,
    solver: &SolverConfig,
) -> Result<RootReport<K>> {
    let p = Polynomial::from_coeffs(coeffs);
    let seq = SturmSequence::new(&p)?;

    let bound = seq.root_bound();
    let isolated = seq.separate_roots_parallel(&-bound.clone(), &bound, isolation)?;
    let roots = Solver::new(solver.clone()).refine_all(seq.squarefree(), &isolated.roots);

    Ok(RootReport {
        roots,
        conditions: isolated.conditions,
    })
}
