//! Squarefree decomposition of polynomials.
//!
//! A polynomial is squarefree if it has no repeated factors.
//! The squarefree decomposition writes a polynomial as:
//!
//! f = f₁ * f₂² * f₃³ * ...
//!
//! where each fᵢ is squarefree and coprime to the others.
//!
//! # Algorithm
//!
//! Uses Yun's algorithm, which works over any field of characteristic 0.
//! Over `f64` the GCDs are computed with a tolerance, so the decomposition
//! is only as reliable as the conditioning of the input.

use sturm_rings::traits::{OrderedField, Ring};

use crate::algorithms::division::{div_rem, poly_gcd};
use crate::dense::Polynomial;
use crate::error::PolyError;

/// A factor with its multiplicity in the squarefree decomposition.
#[derive(Clone, Debug, PartialEq)]
pub struct SquarefreeFactor<K: OrderedField> {
    /// The squarefree polynomial factor.
    pub factor: Polynomial<K>,
    /// The multiplicity (power) of this factor.
    pub multiplicity: u32,
}

/// Result of squarefree decomposition.
#[derive(Clone, Debug)]
pub struct SquarefreeDecomposition<K: OrderedField> {
    /// The unit (leading coefficient factor).
    pub unit: K,
    /// The squarefree factors with multiplicities.
    pub factors: Vec<SquarefreeFactor<K>>,
}

impl<K: OrderedField> SquarefreeDecomposition<K> {
    /// Reconstructs the original polynomial from the decomposition.
    #[must_use]
    pub fn to_polynomial(&self) -> Polynomial<K> {
        self.factors
            .iter()
            .fold(Polynomial::constant(self.unit.clone()), |acc, sf| {
                acc.mul(&sf.factor.pow(sf.multiplicity))
            })
    }

    /// Returns true if the polynomial is squarefree (all multiplicities are 1).
    #[must_use]
    pub fn is_squarefree(&self) -> bool {
        self.factors.iter().all(|f| f.multiplicity == 1)
    }

    /// Returns the squarefree part (product of all factors, each to the first power).
    #[must_use]
    pub fn squarefree_part(&self) -> Polynomial<K> {
        self.factors
            .iter()
            .fold(Polynomial::one(), |acc, sf| acc.mul(&sf.factor))
    }

    /// Returns the highest multiplicity among the factors.
    #[must_use]
    pub fn max_multiplicity(&self) -> u32 {
        self.factors.iter().map(|f| f.multiplicity).max().unwrap_or(0)
    }
}

/// Computes the squarefree decomposition of a polynomial using Yun's algorithm.
///
/// Returns the decomposition f = unit * f₁ * f₂² * f₃³ * ...
/// where each fᵢ is squarefree, monic, and coprime to the others.
///
/// # Algorithm (Yun)
///
/// 1. g = gcd(f, f')
/// 2. a₀ = f/g, b₀ = f'/g
/// 3. Loop:
///    - c = b - a'
///    - if c = 0: output a and terminate
///    - d = gcd(a, c)
///    - output d with current multiplicity
///    - a = a/d, b = c/d
///
/// # Errors
///
/// Propagates division errors; none occur for nonzero inputs.
pub fn squarefree_decomposition<K: OrderedField>(
    f: &Polynomial<K>,
) -> Result<SquarefreeDecomposition<K>, PolyError> {
    if f.degree() == 0 {
        return Ok(SquarefreeDecomposition {
            unit: f.term(0),
            factors: Vec::new(),
        });
    }

    let unit = f.leading_coeff();
    let f_monic = f.make_monic();
    let f_prime = f_monic.derivative();

    let g = poly_gcd(&f_monic, &f_prime)?;

    // If gcd = 1, f is already squarefree
    if g.degree() == 0 {
        return Ok(SquarefreeDecomposition {
            unit,
            factors: vec![SquarefreeFactor {
                factor: f_monic,
                multiplicity: 1,
            }],
        });
    }

    let (mut a, _) = div_rem(&f_monic, &g)?;
    let (mut b, _) = div_rem(&f_prime, &g)?;

    let mut factors = Vec::new();
    let mut multiplicity = 1u32;

    loop {
        let c = b.sub(&a.derivative());

        if c.is_zero() {
            if a.degree() > 0 {
                factors.push(SquarefreeFactor {
                    factor: a.make_monic(),
                    multiplicity,
                });
            }
            break;
        }

        let d = poly_gcd(&a, &c)?;

        if d.degree() > 0 {
            factors.push(SquarefreeFactor {
                factor: d.clone(),
                multiplicity,
            });
        }

        let (new_a, _) = div_rem(&a, &d)?;
        let (new_b, _) = div_rem(&c, &d)?;

        if new_a.degree() == 0 {
            break;
        }

        a = new_a;
        b = new_b;
        multiplicity += 1;
    }

    Ok(SquarefreeDecomposition { unit, factors })
}

/// Checks if a polynomial is squarefree, i.e. gcd(f, f') is constant.
///
/// # Errors
///
/// Propagates division errors; none occur for nonzero inputs.
pub fn is_squarefree<K: OrderedField>(f: &Polynomial<K>) -> Result<bool, PolyError> {
    if f.degree() == 0 {
        return Ok(true);
    }

    let g = poly_gcd(f, &f.derivative())?;
    Ok(g.degree() == 0)
}

/// Computes the squarefree part of a polynomial, f / gcd(f, f').
///
/// # Errors
///
/// Propagates division errors; none occur for nonzero inputs.
pub fn squarefree_part<K: OrderedField>(f: &Polynomial<K>) -> Result<Polynomial<K>, PolyError> {
    if f.degree() == 0 {
        return Ok(f.clone());
    }

    let g = poly_gcd(f, &f.derivative())?;

    if g.degree() == 0 || g.leading_coeff().is_zero() {
        Ok(f.clone())
    } else {
        let (result, _) = div_rem(f, &g)?;
        Ok(result)
    }
}
