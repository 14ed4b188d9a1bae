//! Polynomial algorithms.
//!
//! - Division with remainder and exact quotients
//! - Euclidean GCD with a zero tolerance for floating point coefficients
//! - Squarefree part and Yun's squarefree decomposition

pub mod division;
pub mod squarefree;

pub use division::{div_rem, exact_quotient, poly_gcd, poly_gcd_with_tolerance};
pub use squarefree::{is_squarefree, squarefree_decomposition, squarefree_part};
