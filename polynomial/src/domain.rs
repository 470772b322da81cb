use ff_ext::BlueprintField;
use p3::{field::PrimeCharacteristicRing, util::log2_strict_usize};
use serde::{Deserialize, Serialize};

/// Multiplicative subgroup of order `size` generated by `omega`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EvaluationDomain<F: BlueprintField> {
    size: usize,
    log_size: usize,
    omega: F,
}

impl<F: BlueprintField> EvaluationDomain<F> {
    /// Panics when `size` is not a power of two or exceeds the two-adicity of `F`.
    pub fn new(size: usize) -> Self {
        assert!(
            size.is_power_of_two(),
            "evaluation domain size {size} is not a power of two"
        );
        let log_size = log2_strict_usize(size);
        assert!(
            log_size <= F::TWO_ADICITY,
            "{} has no subgroup of order 2^{log_size}",
            F::NAME
        );
        Self {
            size,
            log_size,
            omega: F::two_adic_generator(log_size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn log_size(&self) -> usize {
        self.log_size
    }

    pub fn omega(&self) -> F {
        self.omega
    }

    /// `omega^i`
    pub fn element(&self, i: usize) -> F {
        self.omega.exp_u64((i % self.size) as u64)
    }

    /// `omega^rotation`, negative rotations wrap since `omega^size = 1`.
    pub fn rotation_factor(&self, rotation: i32) -> F {
        self.element((rotation as i64).rem_euclid(self.size as i64) as usize)
    }

    pub fn elements(&self) -> impl Iterator<Item = F> + '_ {
        std::iter::successors(Some(F::ONE), move |x| Some(*x * self.omega)).take(self.size)
    }
}
