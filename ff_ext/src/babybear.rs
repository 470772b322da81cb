pub mod impl_babybear {
    use crate::{BlueprintField, FieldFrom, FieldInto};
    use p3::{babybear::BabyBear, field::PrimeCharacteristicRing};

    impl FieldFrom<u64> for BabyBear {
        fn from_v(v: u64) -> Self {
            Self::from_u64(v)
        }
    }

    impl FieldInto<BabyBear> for BabyBear {
        fn into_f(self) -> BabyBear {
            self
        }
    }

    impl BlueprintField for BabyBear {
        const NAME: &'static str = "BabyBear";
    }
}
