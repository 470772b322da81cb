use std::ops::{Add, Mul, Neg, Sub};

use ff_ext::BlueprintField;
use p3::{
    dft::{Radix2Dit, TwoAdicSubgroupDft},
    field::PrimeCharacteristicRing,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EvaluationDomain, Polynomial, coefficient::forward_owned_binop, domain_size_for};

/// Pointwise operations switch to rayon above this size.
const PARALLEL_THRESHOLD: usize = 1 << 12;

/// Polynomial of degree `degree` given by its values over the subgroup of
/// order `values.len()`, in natural order: `values[i] = p(omega^i)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PolynomialDfs<F: BlueprintField> {
    degree: usize,
    values: Vec<F>,
}

impl<F: BlueprintField> PolynomialDfs<F> {
    /// `values.len()` must be a power of two greater than `degree`.
    pub fn from_values(degree: usize, values: Vec<F>) -> Self {
        assert!(
            values.len().is_power_of_two() && degree < values.len(),
            "{} evaluations cannot hold a polynomial of degree {degree}",
            values.len()
        );
        Self { degree, values }
    }

    pub fn from_coefficients(mut coeffs: Vec<F>) -> Self {
        let degree = coeffs
            .iter()
            .rposition(|c| *c != F::ZERO)
            .unwrap_or_default();
        let size = domain_size_for(coeffs.len());
        coeffs.resize(size, F::ZERO);
        Self {
            degree,
            values: Radix2Dit::<F>::default().dft(coeffs),
        }
    }

    pub fn constant(value: F, size: usize) -> Self {
        Self::from_values(0, vec![value; size])
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[F] {
        &self.values
    }

    pub fn into_values(self) -> Vec<F> {
        self.values
    }

    pub fn coefficients(&self) -> Polynomial<F> {
        let mut coeffs = Radix2Dit::<F>::default().idft(self.values.clone());
        coeffs.truncate(self.degree + 1);
        Polynomial::new(coeffs)
    }

    pub fn evaluate(&self, x: F) -> F {
        self.coefficients().evaluate(x)
    }

    /// Re-evaluates the polynomial over a subgroup of order `new_size`.
    pub fn resize(&mut self, new_size: usize) {
        if new_size == self.size() {
            return;
        }
        assert!(
            new_size.is_power_of_two() && new_size > self.degree,
            "cannot resize a degree {} polynomial to {new_size} points",
            self.degree
        );
        let mut coeffs = self.coefficients().into_coeffs();
        coeffs.resize(new_size, F::ZERO);
        self.values = Radix2Dit::<F>::default().dft(coeffs);
    }

    pub fn resized(mut self, new_size: usize) -> Self {
        self.resize(new_size);
        self
    }

    pub fn scale(&self, factor: F) -> Self {
        Self {
            degree: self.degree,
            values: map_values(&self.values, |v| v * factor),
        }
    }

    pub fn pow(&self, power: u32) -> Self {
        let degree = self.degree * power as usize;
        let target = domain_size_for(degree + 1).max(self.size());
        let base = self.clone().resized(target);
        Self {
            degree,
            values: map_values(&base.values, |v| v.exp_u64(power as u64)),
        }
    }

    /// `p(omega_n^rotation * X)` where `omega_n` generates the table domain of
    /// order `domain_size`. Over a domain `k` times larger this is a cyclic
    /// shift of the values by `rotation * k`.
    pub fn rotated(&self, rotation: i32, domain_size: usize) -> Self {
        assert!(
            domain_size > 0 && self.size() % domain_size == 0,
            "evaluation size {} is not a multiple of the domain size {domain_size}",
            self.size()
        );
        let size = self.size() as i64;
        let shift = (rotation as i64 * (size / domain_size as i64)).rem_euclid(size) as usize;
        let mut values = self.values.clone();
        values.rotate_left(shift);
        Self {
            degree: self.degree,
            values,
        }
    }

    /// Values at the points of `domain`, assuming this polynomial lives on
    /// a multiple of it.
    pub fn restricted_to(&self, domain: &EvaluationDomain<F>) -> Vec<F> {
        let step = self.size() / domain.size();
        self.values.iter().step_by(step.max(1)).copied().collect()
    }

    fn binary_op(
        &self,
        rhs: &Self,
        degree: usize,
        op: impl Fn(F, F) -> F + Sync + Send,
    ) -> Self {
        let target = domain_size_for(degree + 1)
            .max(self.size())
            .max(rhs.size());
        let lhs = if self.size() == target {
            None
        } else {
            Some(self.clone().resized(target))
        };
        let rhs_resized = if rhs.size() == target {
            None
        } else {
            Some(rhs.clone().resized(target))
        };
        let a = lhs.as_ref().unwrap_or(self);
        let b = rhs_resized.as_ref().unwrap_or(rhs);
        let values = if target >= PARALLEL_THRESHOLD {
            a.values
                .par_iter()
                .zip(b.values.par_iter())
                .map(|(x, y)| op(*x, *y))
                .collect()
        } else {
            a.values
                .iter()
                .zip(b.values.iter())
                .map(|(x, y)| op(*x, *y))
                .collect()
        };
        Self { degree, values }
    }
}

fn map_values<F: BlueprintField>(values: &[F], f: impl Fn(F) -> F + Sync + Send) -> Vec<F> {
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_iter().map(|v| f(*v)).collect()
    } else {
        values.iter().map(|v| f(*v)).collect()
    }
}

impl<F: BlueprintField> Add<&PolynomialDfs<F>> for &PolynomialDfs<F> {
    type Output = PolynomialDfs<F>;

    fn add(self, rhs: &PolynomialDfs<F>) -> PolynomialDfs<F> {
        self.binary_op(rhs, self.degree.max(rhs.degree), |a, b| a + b)
    }
}

impl<F: BlueprintField> Sub<&PolynomialDfs<F>> for &PolynomialDfs<F> {
    type Output = PolynomialDfs<F>;

    fn sub(self, rhs: &PolynomialDfs<F>) -> PolynomialDfs<F> {
        self.binary_op(rhs, self.degree.max(rhs.degree), |a, b| a - b)
    }
}

impl<F: BlueprintField> Mul<&PolynomialDfs<F>> for &PolynomialDfs<F> {
    type Output = PolynomialDfs<F>;

    fn mul(self, rhs: &PolynomialDfs<F>) -> PolynomialDfs<F> {
        self.binary_op(rhs, self.degree + rhs.degree, |a, b| a * b)
    }
}

impl<F: BlueprintField> Neg for &PolynomialDfs<F> {
    type Output = PolynomialDfs<F>;

    fn neg(self) -> PolynomialDfs<F> {
        PolynomialDfs {
            degree: self.degree,
            values: map_values(&self.values, |v| -v),
        }
    }
}

impl<F: BlueprintField> Neg for PolynomialDfs<F> {
    type Output = PolynomialDfs<F>;

    fn neg(self) -> PolynomialDfs<F> {
        -&self
    }
}

forward_owned_binop!(PolynomialDfs, Add, add);
forward_owned_binop!(PolynomialDfs, Sub, sub);
forward_owned_binop!(PolynomialDfs, Mul, mul);

#[cfg(test)]
mod tests {
    use super::PolynomialDfs;
    use crate::{EvaluationDomain, Polynomial};
    use ff_ext::BlueprintField;
    use p3::{field::PrimeCharacteristicRing, goldilocks::Goldilocks as F};

    fn column(values: &[u64]) -> PolynomialDfs<F> {
        PolynomialDfs::from_values(
            values.len() - 1,
            values.iter().map(|v| F::from_u64(*v)).collect(),
        )
    }

    #[test]
    fn test_coefficient_round_trip() {
        let p = Polynomial::new(vec![F::from_u64(3), F::from_signed(-2), F::ONE]);
        let dfs = PolynomialDfs::from_coefficients(p.coeffs().to_vec());
        assert_eq!(dfs.degree(), 2);
        assert_eq!(dfs.size(), 4);
        assert_eq!(dfs.coefficients(), p);
        let domain = EvaluationDomain::<F>::new(4);
        assert_eq!(dfs.values()[3], p.evaluate(domain.element(3)));
    }

    #[test]
    fn test_mul_grows_domain() {
        let a = column(&[1, 2, 3, 4]);
        let b = column(&[5, 6, 7, 8]);
        let product = &a * &b;
        assert_eq!(product.degree(), 6);
        assert_eq!(product.size(), 8);
        assert_eq!(product.coefficients(), &a.coefficients() * &b.coefficients());
        let domain = EvaluationDomain::<F>::new(4);
        assert_eq!(
            product.restricted_to(&domain),
            [5u64, 12, 21, 32].map(F::from_u64).to_vec()
        );
    }

    #[test]
    fn test_add_sub_keep_degree() {
        let a = column(&[1, 2, 3, 4]);
        let b = PolynomialDfs::constant(F::from_u64(10), 2);
        let sum = &a + &b;
        assert_eq!(sum.degree(), 3);
        assert_eq!(sum.values(), [11u64, 12, 13, 14].map(F::from_u64).as_slice());
        let diff = &sum - &a;
        assert_eq!(diff.coefficients(), Polynomial::constant(F::from_u64(10)));
        assert_eq!((-a.clone()).values()[0], -F::ONE);
        assert_eq!(a.scale(F::TWO).values()[3], F::from_u64(8));
    }

    #[test]
    fn test_pow() {
        let a = column(&[1, 2, 3, 4]);
        let cube = a.pow(3);
        assert_eq!(cube.degree(), 9);
        assert_eq!(cube.size(), 16);
        let domain = EvaluationDomain::<F>::new(4);
        assert_eq!(
            cube.restricted_to(&domain),
            [1u64, 8, 27, 64].map(F::from_u64).to_vec()
        );
    }

    #[test]
    fn test_rotation_on_larger_domain() {
        let a = column(&[1, 2, 3, 4]);
        let domain = EvaluationDomain::<F>::new(4);
        let wide = a.clone().resized(16);
        let next = wide.rotated(1, 4);
        assert_eq!(
            next.restricted_to(&domain),
            [2u64, 3, 4, 1].map(F::from_u64).to_vec()
        );
        let prev = a.rotated(-1, 4);
        assert_eq!(prev.values(), [4u64, 1, 2, 3].map(F::from_u64).as_slice());
        // same polynomial as rotating the coefficient form
        assert_eq!(
            next.coefficients(),
            a.coefficients().rotated(1, &domain)
        );
    }
}
