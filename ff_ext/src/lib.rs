#![deny(clippy::cargo)]

mod babybear;
mod goldilock;

pub use babybear::impl_babybear::*;
pub use goldilock::impl_goldilocks::*;

use p3::field::{PrimeCharacteristicRing, PrimeField64, TwoAdicField};

/// The field every constraint, term and assignment cell is defined over.
///
/// Besides the ring operations inherited from Plonky3 (`+ - *`, negation,
/// `exp_u64`, `ZERO`/`ONE`), the element type is `Hash + Ord + Eq`, which is
/// what structural hashing of terms and expressions relies on.
pub trait BlueprintField: PrimeField64 + TwoAdicField + FieldFrom<u64> + FieldInto<Self> {
    /// Identifier string
    const NAME: &'static str;

    /// Signed literal, reduced modulo the field order.
    fn from_signed(value: i64) -> Self {
        if value >= 0 {
            Self::from_u64(value as u64)
        } else {
            -Self::from_u64(value.unsigned_abs())
        }
    }

    /// Canonical representative in `[0, p)`.
    fn to_canonical_u64(&self) -> u64 {
        self.as_canonical_u64()
    }

    /// Canonical little-endian bits, `bits_amount` of them.
    fn to_bits_le(&self, bits_amount: usize) -> Vec<bool> {
        let value = self.as_canonical_u64();
        (0..bits_amount)
            .map(|i| i < u64::BITS as usize && (value >> i) & 1 == 1)
            .collect()
    }
}

pub trait FieldFrom<V> {
    fn from_v(value: V) -> Self;
}

pub trait FieldInto<F> {
    fn into_f(self) -> F;
}

impl<F: FieldFrom<u64>> FieldInto<F> for u64 {
    fn into_f(self) -> F {
        F::from_v(self)
    }
}

impl<F: FieldFrom<u64>> FieldInto<F> for u32 {
    fn into_f(self) -> F {
        F::from_v(self as u64)
    }
}

impl<F: FieldFrom<u64>> FieldInto<F> for usize {
    fn into_f(self) -> F {
        F::from_v(self as u64)
    }
}

impl<F: FieldFrom<u64>> FieldInto<F> for bool {
    fn into_f(self) -> F {
        F::from_v(self as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::{BlueprintField, FieldInto};
    use p3::{field::PrimeCharacteristicRing, goldilocks::Goldilocks as F};
    use proptest::prelude::*;

    #[test]
    fn test_from_signed() {
        assert_eq!(F::from_signed(-1), -F::ONE);
        assert_eq!(F::from_signed(5), F::from_u64(5));
        assert_eq!(F::from_signed(i64::MIN) + F::from_u64(1 << 63), F::ZERO);
    }

    #[test]
    fn test_into_f() {
        let a: F = 7u64.into_f();
        let b: F = true.into_f();
        let c: F = 3usize.into_f();
        assert_eq!(a, F::from_u64(7));
        assert_eq!(b, F::ONE);
        assert_eq!(c, F::from_u64(3));
    }

    #[test]
    fn test_babybear_canonical_form() {
        use p3::babybear::BabyBear;

        assert_eq!(BabyBear::NAME, "BabyBear");
        assert_eq!(BabyBear::from_signed(-1), BabyBear::NEG_ONE);
        assert_eq!(BabyBear::from_signed(-1).to_canonical_u64(), 2013265920);
        assert_eq!(BabyBear::from_signed(2013265921), BabyBear::ZERO);

        let bits = BabyBear::NEG_ONE.to_bits_le(31);
        assert_eq!(bits.len(), 31);
        let recomposed = bits
            .iter()
            .rev()
            .fold(0u64, |acc, bit| acc * 2 + *bit as u64);
        assert_eq!(recomposed, 2013265920);
    }

    proptest! {
        #[test]
        fn test_bits_le_recompose(value in any::<u32>()) {
            let bits = F::from_u64(value as u64).to_bits_le(32);
            let recomposed = bits
                .iter()
                .rev()
                .fold(0u64, |acc, bit| acc * 2 + *bit as u64);
            prop_assert_eq!(recomposed, value as u64);
        }
    }
}
