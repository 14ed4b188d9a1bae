//! Polynomial construction and arithmetic errors.

use thiserror::Error;

/// Errors raised while building or dividing polynomials.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolyError {
    /// Degree, order, exponent or scalar metadata is inconsistent.
    #[error("invalid polynomial state: {0}")]
    InvalidState(String),

    /// The divisor of a polynomial division is identically zero.
    #[error("division by the zero polynomial")]
    DivisionByZero,
}
