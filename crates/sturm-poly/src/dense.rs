//! Dense univariate polynomials.
//!
//! A [`Polynomial`] stores its coefficients in ascending exponent order
//! together with a uniform `scalar` multiplier, so rescaling for numerical
//! conditioning never rewrites the coefficient vector. Polynomials are built
//! once, either from a coefficient list or term by term through the
//! `set_*` builders, and are read-only afterwards: every arithmetic method
//! returns a new value.

use sturm_rings::traits::{Field, OrderedField, Ring};

use crate::error::PolyError;

/// A dense univariate polynomial `scalar * Σ coeffs[i] * x^i`.
#[derive(Clone, Debug)]
pub struct Polynomial<K: Field> {
    /// Coefficients in ascending exponent order; `len() - 1` is the declared degree.
    coeffs: Vec<K>,
    /// Uniform multiplier applied to every coefficient. Never zero.
    scalar: K,
    /// Declared power of `x` dividing the polynomial.
    declared_order: usize,
}

impl<K: Field> Polynomial<K> {
    /// Creates a polynomial from coefficients in ascending exponent order.
    ///
    /// Trailing zero coefficients are dropped.
    #[must_use]
    pub fn from_coeffs(mut coeffs: Vec<K>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(K::zero());
        }

        Self {
            coeffs,
            scalar: K::one(),
            declared_order: 0,
        }
    }

    /// Creates an all-zero polynomial with room for exponents up to `degree`,
    /// ready to be filled with [`Polynomial::set_monomial`].
    #[must_use]
    pub fn with_degree(degree: usize) -> Self {
        Self {
            coeffs: vec![K::zero(); degree + 1],
            scalar: K::one(),
            declared_order: 0,
        }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::with_degree(0)
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::constant(K::one())
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: K) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::from_coeffs(vec![K::zero(), K::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: K, n: usize) -> Self {
        let mut coeffs = vec![K::zero(); n + 1];
        coeffs[n] = c;
        Self::from_coeffs(coeffs)
    }

    /// Creates the monic polynomial with the given roots, `Π (x - r)`.
    #[must_use]
    pub fn from_roots(roots: &[K]) -> Self {
        roots.iter().fold(Self::one(), |acc, r| {
            acc.mul(&Self::from_coeffs(vec![-r.clone(), K::one()]))
        })
    }

    /// Declares the maximum exponent.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidState`] if a nonzero coefficient sits above
    /// `degree` or the declared order exceeds it.
    pub fn set_degree(&mut self, degree: usize) -> Result<(), PolyError> {
        if let Some(actual) = self.checked_degree() {
            if actual > degree {
                return Err(PolyError::InvalidState(format!(
                    "cannot shrink degree to {degree}: coefficient of x^{actual} is nonzero"
                )));
            }
        }
        if self.declared_order > degree {
            return Err(PolyError::InvalidState(format!(
                "cannot shrink degree to {degree} below declared order {}",
                self.declared_order
            )));
        }

        self.coeffs.resize(degree + 1, K::zero());
        Ok(())
    }

    /// Sets the coefficient of `x^exponent`, overwriting any previous value.
    ///
    /// An exponent above the declared degree raises the declared degree.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidState`] when a nonzero coefficient is
    /// written below the declared order.
    pub fn set_monomial(&mut self, exponent: usize, coefficient: K) -> Result<(), PolyError> {
        if exponent < self.declared_order && !coefficient.is_zero() {
            return Err(PolyError::InvalidState(format!(
                "x^{exponent} lies below the declared order {}",
                self.declared_order
            )));
        }

        if exponent >= self.coeffs.len() {
            self.coeffs.resize(exponent + 1, K::zero());
        }
        self.coeffs[exponent] = coefficient;
        Ok(())
    }

    /// Declares `x^order` as a factor of the polynomial.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidState`] if `order` exceeds the declared
    /// degree or a nonzero coefficient sits below it.
    pub fn set_order(&mut self, order: usize) -> Result<(), PolyError> {
        if order > self.declared_degree() {
            return Err(PolyError::InvalidState(format!(
                "order {order} exceeds degree {}",
                self.declared_degree()
            )));
        }
        if let Some(i) = self.coeffs[..order].iter().position(|c| !c.is_zero()) {
            return Err(PolyError::InvalidState(format!(
                "order {order} contradicts nonzero coefficient of x^{i}"
            )));
        }

        self.declared_order = order;
        Ok(())
    }

    /// Sets the uniform coefficient multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InvalidState`] if `scalar` is zero.
    pub fn set_scalar(&mut self, scalar: K) -> Result<(), PolyError> {
        if scalar.is_zero() {
            return Err(PolyError::InvalidState("scalar must be nonzero".to_string()));
        }
        self.scalar = scalar;
        Ok(())
    }

    /// Returns the degree, or 0 for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.checked_degree().unwrap_or(0)
    }

    /// Returns the degree, or `None` for the zero polynomial.
    #[must_use]
    pub fn checked_degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|c| !c.is_zero())
    }

    /// Returns the maximum exponent the polynomial has room for.
    #[must_use]
    pub fn declared_degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns the multiplicity of `x = 0` as a root, or 0 for the zero polynomial.
    #[must_use]
    pub fn order(&self) -> usize {
        self.coeffs.iter().position(|c| !c.is_zero()).unwrap_or(0)
    }

    /// Returns the order declared through [`Polynomial::set_order`].
    #[must_use]
    pub fn declared_order(&self) -> usize {
        self.declared_order
    }

    /// Returns the uniform coefficient multiplier.
    #[must_use]
    pub fn scalar(&self) -> &K {
        &self.scalar
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.checked_degree().is_none()
    }

    /// Returns the stored coefficient of x^i, without the scalar.
    #[must_use]
    pub fn coeff(&self, i: usize) -> K {
        self.coeffs.get(i).cloned().unwrap_or_else(K::zero)
    }

    /// Returns the effective coefficient of x^i, `scalar * coeff(i)`.
    #[must_use]
    pub fn term(&self, i: usize) -> K {
        self.scalar.clone() * self.coeff(i)
    }

    /// Returns the stored coefficients up to the degree.
    #[must_use]
    pub fn coeffs(&self) -> &[K] {
        &self.coeffs[..=self.degree()]
    }

    /// Returns the effective leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> K {
        self.term(self.degree())
    }

    /// Returns an equal polynomial whose scalar is 1.
    #[must_use]
    pub fn fold_scalar(&self) -> Self {
        if self.scalar.is_one() {
            return Self::from_coeffs(self.coeffs().to_vec());
        }
        Self::from_coeffs(
            self.coeffs()
                .iter()
                .map(|c| self.scalar.clone() * c.clone())
                .collect(),
        )
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn evaluate(&self, x: &K) -> K {
        let mut result = K::zero();
        for c in self.coeffs().iter().rev() {
            result = result * x.clone() + c.clone();
        }
        self.scalar.clone() * result
    }

    /// Evaluates the polynomial and its first derivative in one pass.
    #[must_use]
    pub fn evaluate_with_derivative(&self, x: &K) -> (K, K) {
        let mut p = K::zero();
        let mut dp = K::zero();
        for c in self.coeffs().iter().rev() {
            dp = dp * x.clone() + p.clone();
            p = p * x.clone() + c.clone();
        }
        (self.scalar.clone() * p, self.scalar.clone() * dp)
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::from_coeffs((0..len).map(|i| self.term(i) + other.term(i)).collect())
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            coeffs: self.coeffs.clone(),
            scalar: -self.scalar.clone(),
            declared_order: self.declared_order,
        }
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook, O(n·m)).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let a = self.fold_scalar();
        let b = other.fold_scalar();
        let mut result = vec![K::zero(); a.coeffs.len() + b.coeffs.len() - 1];

        for (i, ai) in a.coeffs.iter().enumerate() {
            for (j, bj) in b.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + ai.clone() * bj.clone();
            }
        }

        Self::from_coeffs(result)
    }

    /// Multiplies by a constant.
    #[must_use]
    pub fn scale(&self, c: &K) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            coeffs: self.coeffs.clone(),
            scalar: self.scalar.clone() * c.clone(),
            declared_order: self.declared_order,
        }
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.fold_scalar();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            exp >>= 1;
        }

        result
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let degree = self.degree();
        if degree == 0 {
            return Self::zero();
        }

        Self::from_coeffs(
            (1..=degree)
                .map(|i| self.term(i).mul_by_scalar(i as i64))
                .collect(),
        )
    }

    /// Computes the antiderivative whose value at 0 is `constant`.
    #[must_use]
    pub fn integral(&self, constant: K) -> Self {
        let mut coeffs = Vec::with_capacity(self.coeffs.len() + 1);
        coeffs.push(constant);
        for i in 0..=self.degree() {
            let divisor = K::from_i64(i as i64 + 1);
            coeffs.push(self.term(i).checked_div(&divisor).unwrap_or_else(K::zero));
        }
        Self::from_coeffs(coeffs)
    }

    /// Makes the polynomial monic (leading coefficient = 1).
    ///
    /// The zero polynomial is returned unchanged.
    #[must_use]
    pub fn make_monic(&self) -> Self {
        match self.leading_coeff().inv() {
            Some(inv) if !self.is_zero() => self.scale(&inv).fold_scalar(),
            _ => self.clone(),
        }
    }
}

impl<K: OrderedField> Polynomial<K> {
    /// Returns the largest effective coefficient in absolute value.
    #[must_use]
    pub fn max_abs_coeff(&self) -> K {
        (0..=self.degree())
            .map(|i| self.term(i).abs())
            .fold(K::zero(), K::max_of)
    }

    /// Returns an equal polynomial whose stored coefficients have maximum
    /// absolute value 1, with the magnitude moved into the scalar.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let folded = self.fold_scalar();
        let scale = folded.max_abs_coeff();
        let Some(inv) = scale.inv() else {
            return folded;
        };

        Self {
            coeffs: folded.coeffs.iter().map(|c| c.clone() * inv.clone()).collect(),
            scalar: scale,
            declared_order: self.declared_order,
        }
    }

    /// Returns the polynomial divided by its largest coefficient magnitude.
    ///
    /// The factor is positive, so signs of values are preserved.
    #[must_use]
    pub fn scaled_to_unit(&self) -> Self {
        match self.max_abs_coeff().inv() {
            Some(inv) => self.scale(&inv).fold_scalar(),
            None => self.fold_scalar(),
        }
    }

    /// Returns the polynomial multiplied by the power of two that brings its
    /// largest coefficient into `(1/2, 1]`.
    ///
    /// In binary floating point the factor is applied without rounding, so
    /// every value keeps its computed sign. Falls back to
    /// [`scaled_to_unit`](Self::scaled_to_unit) when the largest coefficient
    /// has no usable `f64` image.
    #[must_use]
    pub fn scaled_by_power_of_two(&self) -> Self {
        let folded = self.fold_scalar();
        let max = folded.max_abs_coeff().to_f64();
        if !(max.is_finite() && max > 0.0) {
            return self.scaled_to_unit();
        }
        match K::from_f64((-max.log2().ceil()).exp2()) {
            Some(factor) if !factor.is_zero() => folded.scale(&factor).fold_scalar(),
            _ => self.scaled_to_unit(),
        }
    }

    /// Returns the polynomial with every coefficient replaced by its absolute value.
    #[must_use]
    pub fn abs_coeffs(&self) -> Self {
        Self::from_coeffs(self.fold_scalar().coeffs.iter().map(OrderedField::abs).collect())
    }

    /// Zeroes every coefficient whose magnitude is at most
    /// `relative * max(1, max |coefficient|)`.
    #[must_use]
    pub fn purge(&self, relative: &K) -> Self {
        let threshold = relative.clone() * K::one().max_of(self.max_abs_coeff());
        Self::from_coeffs(
            (0..=self.degree())
                .map(|i| {
                    let t = self.term(i);
                    if t.abs() <= threshold {
                        K::zero()
                    } else {
                        t
                    }
                })
                .collect(),
        )
    }

    /// Evaluates the polynomial together with `Σ |c_i| |x|^i`, the scale
    /// against which rounding error in the value should be judged.
    #[must_use]
    pub fn evaluate_with_magnitude(&self, x: &K) -> (K, K) {
        let ax = x.abs();
        let mut value = K::zero();
        let mut magnitude = K::zero();
        for c in self.coeffs().iter().rev() {
            value = value * x.clone() + c.clone();
            magnitude = magnitude * ax.clone() + c.abs();
        }
        (
            self.scalar.clone() * value,
            self.scalar.abs() * magnitude,
        )
    }

    /// Counts sign changes between consecutive nonzero coefficients, from the
    /// constant term upwards.
    ///
    /// By Descartes' rule of signs this bounds the number of positive real
    /// roots (counted with multiplicity) from above, with equal parity.
    #[must_use]
    pub fn sign_variations(&self) -> usize {
        let mut variations = 0;
        let mut last_sign = 0i8;

        for c in self.coeffs() {
            let sign = c.signum();
            if sign == 0 {
                continue;
            }
            if last_sign != 0 && sign != last_sign {
                variations += 1;
            }
            last_sign = sign;
        }

        variations
    }
}

impl<K: Field> PartialEq for Polynomial<K> {
    fn eq(&self, other: &Self) -> bool {
        let len = self.coeffs.len().max(other.coeffs.len());
        (0..len).all(|i| self.term(i) == other.term(i))
    }
}

impl<K: OrderedField + std::fmt::Display> std::fmt::Display for Polynomial<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for i in 0..=self.degree() {
            let c = self.term(i);
            if c.is_zero() {
                continue;
            }

            let magnitude = if first {
                c.clone()
            } else {
                write!(f, "{}", if c.signum() < 0 { " - " } else { " + " })?;
                c.abs()
            };
            first = false;

            match i {
                0 => write!(f, "{magnitude}")?,
                _ => {
                    if magnitude.is_one() {
                        // bare x
                    } else if (-magnitude.clone()).is_one() {
                        write!(f, "-")?;
                    } else {
                        write!(f, "{magnitude}")?;
                    }
                    if i == 1 {
                        write!(f, "x")?;
                    } else {
                        write!(f, "x^{i}")?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sturm_rings::rationals::Q;

    fn q(n: i64) -> Q {
        Q::from_integer(n)
    }

    fn poly(coeffs: &[i64]) -> Polynomial<Q> {
        Polynomial::from_coeffs(coeffs.iter().map(|&n| q(n)).collect())
    }

    #[test]
    fn test_power_of_two_scaling_is_exact() {
        let p = Polynomial::from_coeffs(vec![1.0, -3.0, 2.0]);
        let scaled = p.scaled_by_power_of_two();

        assert_eq!(scaled.coeffs(), &[0.25, -0.75, 0.5][..]);
        assert_eq!(scaled.evaluate(&1.0), 0.0);
        assert_eq!(scaled.evaluate(&0.5), 0.0);

        let q_scaled = poly(&[1, -3, 2]).scaled_by_power_of_two();
        assert_eq!(q_scaled.coeffs(), &[Q::new(1, 4), Q::new(-3, 4), Q::new(1, 2)][..]);
    }

    #[test]
    fn test_abs_coeffs() {
        let p = poly(&[1, -3, 2]).scale(&q(-2));
        assert_eq!(p.abs_coeffs().coeffs(), &[q(2), q(6), q(4)][..]);
    }

    #[test]
    fn test_basic_ops() {
        let p = poly(&[1, 2]); // 1 + 2x
        let r = poly(&[3, 4]); // 3 + 4x

        let sum = p.add(&r);
        assert_eq!(sum.coeff(0), q(4));
        assert_eq!(sum.coeff(1), q(6));

        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        assert_eq!(p.mul(&r), poly(&[3, 10, 8]));
        assert!(p.sub(&p).is_zero());
    }

    #[test]
    fn test_trailing_zeros_dropped() {
        let p = poly(&[1, 0, 0]);
        assert_eq!(p.degree(), 0);
        assert_eq!(p.declared_degree(), 0);
        assert!(poly(&[]).is_zero());
        assert_eq!(poly(&[0, 0]).checked_degree(), None);
    }

    #[test]
    fn test_evaluate_applies_scalar() {
        // p(x) = 3 * (1 + 2x + 3x^2)
        let mut p = poly(&[1, 2, 3]);
        p.set_scalar(q(3)).unwrap();

        // p(2) = 3 * 17
        assert_eq!(p.evaluate(&q(2)), q(51));
        assert_eq!(p.leading_coeff(), q(9));
        assert_eq!(p.coeff(2), q(3));
        assert_eq!(p.term(2), q(9));
    }

    #[test]
    fn test_evaluate_with_derivative() {
        // p = x^3 - 2x, p' = 3x^2 - 2
        let p = poly(&[0, -2, 0, 1]);
        let (v, dv) = p.evaluate_with_derivative(&q(2));
        assert_eq!(v, q(4));
        assert_eq!(dv, q(10));
        assert_eq!(dv, p.derivative().evaluate(&q(2)));
    }

    #[test]
    fn test_builder_monomials() {
        let mut p = Polynomial::<Q>::with_degree(2);
        p.set_monomial(0, q(-1)).unwrap();
        p.set_monomial(2, q(1)).unwrap();
        assert_eq!(p, poly(&[-1, 0, 1]));

        // Writing above the declared degree raises it.
        p.set_monomial(4, q(2)).unwrap();
        assert_eq!(p.declared_degree(), 4);
        assert_eq!(p.degree(), 4);
    }

    #[test]
    fn test_set_degree_cannot_drop_terms() {
        let mut p = poly(&[1, 0, 5]);
        assert!(matches!(p.set_degree(1), Err(PolyError::InvalidState(_))));

        p.set_degree(6).unwrap();
        assert_eq!(p.declared_degree(), 6);
        assert_eq!(p.degree(), 2);

        p.set_degree(2).unwrap();
        assert_eq!(p.declared_degree(), 2);
    }

    #[test]
    fn test_order_tracking() {
        // x^2 + x^3
        let p = poly(&[0, 0, 1, 1]);
        assert_eq!(p.order(), 2);
        assert_eq!(poly(&[0]).order(), 0);
    }

    #[test]
    fn test_set_order_validation() {
        let mut p = Polynomial::<Q>::with_degree(3);
        assert!(p.set_order(4).is_err());
        p.set_order(2).unwrap();

        assert!(p.set_monomial(1, q(7)).is_err());
        p.set_monomial(1, q(0)).unwrap();
        p.set_monomial(3, q(1)).unwrap();
        assert_eq!(p.order(), 3);

        assert!(p.set_degree(1).is_err());

        let mut r = poly(&[1, 1]);
        assert!(r.set_order(1).is_err());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let mut p = poly(&[1, 1]);
        assert!(p.set_scalar(q(0)).is_err());
        assert_eq!(p.scalar(), &q(1));
    }

    #[test]
    fn test_sign_variations() {
        // 1 - 3x + 2x^2: +, -, + -> 2 variations
        assert_eq!(poly(&[1, -3, 2]).sign_variations(), 2);
        // x + x^2: zero constant skipped
        assert_eq!(poly(&[0, 1, 1]).sign_variations(), 0);
        // -1 + 0x + x^3: zero skipped, one change
        assert_eq!(poly(&[-1, 0, 0, 1]).sign_variations(), 1);
    }

    #[test]
    fn test_derivative_and_integral() {
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.derivative(), poly(&[2, 6]));
        assert_eq!(p.derivative().integral(q(1)), p);
        assert!(poly(&[5]).derivative().is_zero());
    }

    #[test]
    fn test_from_roots() {
        // (x - 1)(x - 2)(x - 3) = x^3 - 6x^2 + 11x - 6
        let p = Polynomial::from_roots(&[q(1), q(2), q(3)]);
        assert_eq!(p, poly(&[-6, 11, -6, 1]));
    }

    #[test]
    fn test_normalize_preserves_values() {
        let p = poly(&[4, -8, 2]);
        let n = p.normalize();
        assert_eq!(n.scalar(), &q(8));
        assert_eq!(n.coeff(1), q(-1));
        assert_eq!(n, p);
        assert_eq!(n.evaluate(&q(3)), p.evaluate(&q(3)));
    }

    #[test]
    fn test_purge_small_coefficients() {
        let p = Polynomial::from_coeffs(vec![1e-20, 1.0, 2.0]);
        let purged = p.purge(&1e-12);
        assert_eq!(purged.coeff(0), 0.0);
        assert_eq!(purged.order(), 1);
    }

    #[test]
    fn test_make_monic() {
        let p = poly(&[2, 4]).make_monic();
        assert!(p.leading_coeff().is_one());
        assert_eq!(p.coeff(0), Q::new(1, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(poly(&[1, -3, 2]).to_string(), "1 - 3x + 2x^2");
        assert_eq!(poly(&[0, 1, 1]).to_string(), "x + x^2");
        assert_eq!(poly(&[0, -1]).to_string(), "-x");
        assert_eq!(poly(&[]).to_string(), "0");
    }

    #[test]
    fn test_magnitude_bounds_value() {
        let p = poly(&[-6, 11, -6, 1]);
        let (value, magnitude) = p.evaluate_with_magnitude(&q(-2));
        assert_eq!(value, q(-60));
        assert_eq!(magnitude, q(6 + 22 + 24 + 8));
    }
}
