use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use ff_ext::BlueprintField;
use itertools::{EitherOrBoth, Itertools};
use p3::field::PrimeCharacteristicRing;
use serde::{Deserialize, Serialize};

use crate::{EvaluationDomain, PolynomialDfs};

/// Polynomial in coefficient form, lowest degree first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Polynomial<F: BlueprintField> {
    coeffs: Vec<F>,
}

impl<F: BlueprintField> Polynomial<F> {
    pub fn new(coeffs: Vec<F>) -> Self {
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    pub fn constant(value: F) -> Self {
        Self {
            coeffs: vec![value],
        }
    }

    /// Interpolates `values` over the subgroup of order `values.len()`,
    /// so that `p(omega^i) = values[i]`.
    pub fn interpolate(values: Vec<F>) -> Self {
        if values.is_empty() {
            return Self::zero();
        }
        PolynomialDfs::from_values(values.len() - 1, values).coefficients()
    }

    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<F> {
        self.coeffs
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| *c == F::ZERO)
    }

    /// Degree of the highest non-zero coefficient, 0 for the zero polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|c| *c != F::ZERO)
            .unwrap_or_default()
    }

    pub fn evaluate(&self, x: F) -> F {
        self.coeffs
            .iter()
            .rev()
            .fold(F::ZERO, |acc, coeff| acc * x + *coeff)
    }

    pub fn scale(&self, factor: F) -> Self {
        Self {
            coeffs: self.coeffs.iter().map(|c| *c * factor).collect(),
        }
    }

    pub fn pow(&self, power: u32) -> Self {
        let mut result = Self::constant(F::ONE);
        let mut base = self.clone();
        let mut exp = power;
        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// `p(omega^rotation * X)`, which reads the column `rotation` rows ahead
    /// when evaluated over `domain`.
    pub fn rotated(&self, rotation: i32, domain: &EvaluationDomain<F>) -> Self {
        let factor = domain.rotation_factor(rotation);
        let coeffs = self
            .coeffs
            .iter()
            .scan(F::ONE, |power, coeff| {
                let shifted = *coeff * *power;
                *power *= factor;
                Some(shifted)
            })
            .collect();
        Self { coeffs }
    }

    fn trimmed(&self) -> &[F] {
        let len = self
            .coeffs
            .iter()
            .rposition(|c| *c != F::ZERO)
            .map_or(0, |i| i + 1);
        &self.coeffs[..len]
    }
}

impl<F: BlueprintField> PartialEq for Polynomial<F> {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl<F: BlueprintField> Eq for Polynomial<F> {}

impl<F: BlueprintField> From<F> for Polynomial<F> {
    fn from(value: F) -> Self {
        Self::constant(value)
    }
}

impl<F: BlueprintField> fmt::Display for Polynomial<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self
            .coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != F::ZERO)
            .map(|(i, c)| match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            })
            .collect_vec();
        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}

impl<F: BlueprintField> Add<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, rhs: &Polynomial<F>) -> Polynomial<F> {
        let coeffs = self
            .coeffs
            .iter()
            .zip_longest(rhs.coeffs.iter())
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => *a + *b,
                EitherOrBoth::Left(a) => *a,
                EitherOrBoth::Right(b) => *b,
            })
            .collect();
        Polynomial { coeffs }
    }
}

impl<F: BlueprintField> Sub<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, rhs: &Polynomial<F>) -> Polynomial<F> {
        let coeffs = self
            .coeffs
            .iter()
            .zip_longest(rhs.coeffs.iter())
            .map(|pair| match pair {
                EitherOrBoth::Both(a, b) => *a - *b,
                EitherOrBoth::Left(a) => *a,
                EitherOrBoth::Right(b) => -*b,
            })
            .collect();
        Polynomial { coeffs }
    }
}

/// Below this many output coefficients schoolbook multiplication beats the DFT.
const NAIVE_MUL_THRESHOLD: usize = 64;

impl<F: BlueprintField> Mul<&Polynomial<F>> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: &Polynomial<F>) -> Polynomial<F> {
        let (a, b) = (self.trimmed(), rhs.trimmed());
        if a.is_empty() || b.is_empty() {
            return Polynomial::zero();
        }
        let out_len = a.len() + b.len() - 1;
        if out_len <= NAIVE_MUL_THRESHOLD {
            let mut coeffs = vec![F::ZERO; out_len];
            for (i, x) in a.iter().enumerate() {
                for (j, y) in b.iter().enumerate() {
                    coeffs[i + j] += *x * *y;
                }
            }
            return Polynomial { coeffs };
        }
        let product = PolynomialDfs::from_coefficients(a.to_vec())
            * PolynomialDfs::from_coefficients(b.to_vec());
        let mut coeffs = product.coefficients().into_coeffs();
        coeffs.truncate(out_len);
        Polynomial { coeffs }
    }
}

impl<F: BlueprintField> Neg for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn neg(self) -> Polynomial<F> {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| -*c).collect(),
        }
    }
}

impl<F: BlueprintField> Neg for Polynomial<F> {
    type Output = Polynomial<F>;

    fn neg(self) -> Polynomial<F> {
        -&self
    }
}

macro_rules! forward_owned_binop {
    ($ty:ident, $trait:ident, $method:ident) => {
        impl<F: BlueprintField> $trait<$ty<F>> for $ty<F> {
            type Output = $ty<F>;

            fn $method(self, rhs: $ty<F>) -> $ty<F> {
                (&self).$method(&rhs)
            }
        }

        impl<F: BlueprintField> $trait<&$ty<F>> for $ty<F> {
            type Output = $ty<F>;

            fn $method(self, rhs: &$ty<F>) -> $ty<F> {
                (&self).$method(rhs)
            }
        }

        impl<F: BlueprintField> $trait<$ty<F>> for &$ty<F> {
            type Output = $ty<F>;

            fn $method(self, rhs: $ty<F>) -> $ty<F> {
                self.$method(&rhs)
            }
        }
    };
}
pub(crate) use forward_owned_binop;

forward_owned_binop!(Polynomial, Add, add);
forward_owned_binop!(Polynomial, Sub, sub);
forward_owned_binop!(Polynomial, Mul, mul);
