//! Polynomial division and GCD.
//!
//! Division cancels the leading term explicitly at every step instead of
//! relying on `a - q*b` to produce an exact zero, so that floating point
//! coefficients do not leave residue above the remainder's true degree.

use sturm_rings::traits::{Field, OrderedField, Ring};

use crate::dense::Polynomial;
use crate::error::PolyError;

/// Multiple of the field epsilon below which GCD remainders are treated as zero.
pub const GCD_TOLERANCE_FACTOR: i64 = 64;

/// Divides polynomial `a` by `b`, returning `(quotient, remainder)` with
/// `deg(remainder) < deg(b)`.
///
/// # Errors
///
/// Returns [`PolyError::DivisionByZero`] if `b` is the zero polynomial.
pub fn div_rem<K: Field>(
    a: &Polynomial<K>,
    b: &Polynomial<K>,
) -> Result<(Polynomial<K>, Polynomial<K>), PolyError> {
    let Some(db) = b.checked_degree() else {
        return Err(PolyError::DivisionByZero);
    };
    let a = a.fold_scalar();
    let Some(da) = a.checked_degree() else {
        return Ok((Polynomial::zero(), Polynomial::zero()));
    };
    if da < db {
        return Ok((Polynomial::zero(), a));
    }

    let b = b.fold_scalar();
    let lead_inv = b.leading_coeff().inv().ok_or(PolyError::DivisionByZero)?;
    let divisor = b.coeffs();

    let mut remainder = a.coeffs().to_vec();
    let mut quotient = vec![K::zero(); da - db + 1];

    for k in (0..=da - db).rev() {
        let coeff = remainder[k + db].clone() * lead_inv.clone();
        if !coeff.is_zero() {
            for (i, bi) in divisor.iter().enumerate().take(db) {
                remainder[k + i] = remainder[k + i].clone() - coeff.clone() * bi.clone();
            }
        }
        remainder[k + db] = K::zero();
        quotient[k] = coeff;
    }

    remainder.truncate(db);
    Ok((Polynomial::from_coeffs(quotient), Polynomial::from_coeffs(remainder)))
}

/// Computes the monic GCD of two polynomials with the default zero tolerance
/// of the field (exact for `Q`).
///
/// # Errors
///
/// Propagates division errors; none occur for well-formed inputs.
pub fn poly_gcd<K: OrderedField>(
    a: &Polynomial<K>,
    b: &Polynomial<K>,
) -> Result<Polynomial<K>, PolyError> {
    let tolerance = K::epsilon().mul_by_scalar(GCD_TOLERANCE_FACTOR);
    poly_gcd_with_tolerance(a, b, &tolerance)
}

/// Computes the monic GCD of two polynomials using the Euclidean algorithm.
///
/// Operands are scaled to unit max-norm before every division and the
/// remainder is purged with `tolerance`, which makes the algorithm usable
/// over floating point coefficients.
///
/// # Errors
///
/// Propagates division errors; none occur for well-formed inputs.
pub fn poly_gcd_with_tolerance<K: OrderedField>(
    a: &Polynomial<K>,
    b: &Polynomial<K>,
    tolerance: &K,
) -> Result<Polynomial<K>, PolyError> {
    if a.is_zero() {
        return Ok(b.make_monic());
    }
    if b.is_zero() {
        return Ok(a.make_monic());
    }

    let mut p = a.scaled_to_unit();
    let mut q = b.scaled_to_unit();

    while !q.is_zero() {
        let (_, r) = div_rem(&p, &q)?;
        p = q;
        q = r.purge(tolerance).scaled_to_unit();
    }

    Ok(p.make_monic())
}

/// Divides `a` by `b` and returns the quotient, requiring the division to be exact
/// up to `tolerance`.
///
/// # Errors
///
/// Returns [`PolyError::DivisionByZero`] for a zero divisor and
/// [`PolyError::InvalidState`] if the remainder is not negligible.
pub fn exact_quotient<K: OrderedField>(
    a: &Polynomial<K>,
    b: &Polynomial<K>,
    tolerance: &K,
) -> Result<Polynomial<K>, PolyError> {
    let (q, r) = div_rem(a, b)?;
    let scale = K::one().max_of(a.max_abs_coeff());
    if r.max_abs_coeff() > tolerance.clone() * scale {
        return Err(PolyError::InvalidState(
            "divisor does not divide the dividend".to_string(),
        ));
    }
    Ok(q)
}
