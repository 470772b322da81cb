pub mod impl_goldilocks {
    use crate::{BlueprintField, FieldFrom, FieldInto};
    use p3::{field::PrimeCharacteristicRing, goldilocks::Goldilocks};

    impl FieldFrom<u64> for Goldilocks {
        fn from_v(v: u64) -> Self {
            Self::from_u64(v)
        }
    }

    impl FieldInto<Goldilocks> for Goldilocks {
        fn into_f(self) -> Goldilocks {
            self
        }
    }

    impl BlueprintField for Goldilocks {
        const NAME: &'static str = "Goldilocks";
    }
}
