//! Wire encoding of variables and constraints, `bincode` with fixed-width
//! integers: a column kind is a `u32` tag, indices are `u32`, rotations `i32`.
//! Expression nodes are tagged `term = 0`, `pow = 1`, `binop = 2`.
//! Cached hashes are not part of the encoding and are rebuilt on decode.

use ff_ext::BlueprintField;
use serde::{Serialize, de::DeserializeOwned};

use crate::{CodecError, Expression, Term, Variable};

pub trait WireFormat: Serialize + DeserializeOwned {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl WireFormat for Variable {}

impl<F: BlueprintField> WireFormat for Term<F> {}

impl<F: BlueprintField> WireFormat for Expression<F> {}

impl<F: BlueprintField> WireFormat for Vec<Expression<F>> {}

#[cfg(test)]
mod tests {
    use super::WireFormat;
    use crate::{ColumnType, Expression, ToExpr, Variable};
    use p3::{field::PrimeCharacteristicRing, goldilocks::Goldilocks as F};

    #[test]
    fn test_variable_wire_layout() {
        let var = Variable::new(ColumnType::Witness, 3, -1, true);
        let bytes = var.encode().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0, 3, 0, 0, 0, 0xff, 0xff, 0xff, 0xff, 1]);
        assert_eq!(Variable::decode(&bytes).unwrap(), var);

        let selector = Variable::absolute(ColumnType::Selector, 1, 4);
        assert_eq!(selector.encode().unwrap()[..4], [3, 0, 0, 0]);
    }

    #[test]
    fn test_expression_tags() {
        let x = Variable::witness(0, 0);
        let term: Expression<F> = x.expr();
        let pow = term.pow(2);
        let binop = term.clone() * Expression::from(2u64);
        assert_eq!(term.encode().unwrap()[..4], [0, 0, 0, 0]);
        assert_eq!(pow.encode().unwrap()[..4], [1, 0, 0, 0]);
        assert_eq!(binop.encode().unwrap()[..4], [2, 0, 0, 0]);
    }

    #[test]
    fn test_decode_rebuilds_hash() {
        let [a, b] = [Variable::witness(0, -1), Variable::public_input(1, 0)];
        let e: Expression<F> =
            (a.expr() * b.expr() - Expression::constant(F::NEG_ONE)).pow(3) + a.expr();
        let decoded = Expression::<F>::decode(&e.encode().unwrap()).unwrap();
        assert_eq!(decoded.cached_hash(), e.cached_hash());
        assert_eq!(decoded, e);

        let gate = vec![e.clone(), decoded];
        assert_eq!(Vec::<Expression<F>>::decode(&gate.encode().unwrap()).unwrap(), gate);
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let bytes = Variable::witness(1, 1).encode().unwrap();
        assert!(Variable::decode(&bytes[..bytes.len() - 2]).is_err());
    }
}
