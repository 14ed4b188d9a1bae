//! # sturm-rings
//!
//! Coefficient fields for Sturm root isolation.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `Field`, `OrderedField`
//! - Exact rationals `Q` (backed by `dashu`)
//! - IEEE `f64` as an approximate ordered field
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── Field
//!       └── OrderedField
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod rationals;
pub mod reals;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use rationals::Q;
pub use traits::{Field, OrderedField, Ring};
