//! # sturm-poly
//!
//! Univariate polynomial arithmetic for Sturm root isolation.
//!
//! This crate provides:
//! - Dense polynomials with a deferred uniform scalar
//! - Incremental construction with degree/order/scalar validation
//! - Evaluation (value, derivative, rounding magnitude) and Descartes'
//!   sign-variation count
//! - Division with remainder, GCD and squarefree decomposition

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
pub mod dense;
pub mod error;

#[cfg(test)]
mod proptests;

pub use dense::Polynomial;
pub use error::PolyError;
