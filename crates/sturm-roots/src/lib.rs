//! # sturm-roots
//!
//! Real root isolation and refinement for univariate polynomials.
//!
//! This crate provides:
//! - Sturm sequences with pluggable sign oracles (exact or tolerance based)
//! - Root counting on intervals and isolation by bisection, sequential or
//!   parallel, with depth, width and time budgets
//! - Cauchy and Fujiwara root bounds
//! - A bracketed solver with secant or Newton acceleration
//!
//! # Example
//!
//! ```
//! use sturm_poly::Polynomial;
//! use sturm_roots::{Solver, SturmSequence};
//!
//! // (x - 1)(x - 2)(x - 3)
//! let p = Polynomial::from_coeffs(vec![-6.0, 11.0, -6.0, 1.0]);
//! let seq = SturmSequence::new(&p).unwrap();
//! let isolation = seq.separate_roots(&0.0, &4.0).unwrap();
//! assert_eq!(isolation.len(), 3);
//!
//! let roots = Solver::default().refine_all(seq.squarefree(), &isolation.roots);
//! assert!((roots[0].as_ref().unwrap().value - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bound;
pub mod config;
pub mod error;
pub mod interval;
pub mod isolate;
pub mod sequence;
pub mod sign;
pub mod solver;

#[cfg(test)]
mod proptests;

pub use bound::{cauchy_bound, fujiwara_bound, root_bound};
pub use config::{Acceleration, IsolationConfig, SolverConfig};
pub use error::{IsolationError, SolveError};
pub use interval::{Condition, IsolatedRoot, Isolation};
pub use sequence::{SturmSequence, Variations};
pub use sign::{DefaultSign, ExactSign, Sign, SignOracle, ToleranceSign};
pub use solver::{RefinedRoot, Solver};
