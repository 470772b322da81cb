//! Logic gates over `{0, 1}`-valued cells. The `ARITY` inputs sit in
//! `W0..ARITY` and the result in `W[ARITY]`, all on one row.

use std::marker::PhantomData;

use assignment::AssignmentTable;
use expression::{Expression, ToExpr, Variable};
use ff_ext::BlueprintField;
use itertools::Itertools;
use p3::field::PrimeCharacteristicRing;

use crate::{BlueprintError, Circuit, Component, ComponentLayout, macros::set_witness};

pub trait BooleanOperation<F: BlueprintField> {
    const NAME: &'static str;
    const ARITY: usize;

    /// Vanishes iff `witnesses[ARITY]` is the operation applied to the
    /// first `ARITY` witnesses.
    fn op_constraint(witnesses: &[Expression<F>]) -> Expression<F>;

    fn result_assignment(inputs: &[F]) -> F;
}

fn one<F: BlueprintField>() -> Expression<F> {
    F::ONE.expr()
}

// x + y - xy
fn or<F: BlueprintField>(x: &Expression<F>, y: &Expression<F>) -> Expression<F> {
    x.clone() + y - x.clone() * y
}

#[derive(Clone, Copy, Debug)]
pub struct Not;
#[derive(Clone, Copy, Debug)]
pub struct And;
#[derive(Clone, Copy, Debug)]
pub struct Or;
#[derive(Clone, Copy, Debug)]
pub struct Xor;
#[derive(Clone, Copy, Debug)]
pub struct Nand;
#[derive(Clone, Copy, Debug)]
pub struct Nor;
#[derive(Clone, Copy, Debug)]
pub struct Select;

impl<F: BlueprintField> BooleanOperation<F> for Not {
    const NAME: &'static str = "logic_not";
    const ARITY: usize = 1;

    fn op_constraint(w: &[Expression<F>]) -> Expression<F> {
        one::<F>() - &w[0] - &w[1]
    }

    fn result_assignment(inputs: &[F]) -> F {
        F::ONE - inputs[0]
    }
}

impl<F: BlueprintField> BooleanOperation<F> for And {
    const NAME: &'static str = "logic_and";
    const ARITY: usize = 2;

    fn op_constraint(w: &[Expression<F>]) -> Expression<F> {
        w[2].clone() - w[0].clone() * &w[1]
    }

    fn result_assignment(inputs: &[F]) -> F {
        inputs[0] * inputs[1]
    }
}

impl<F: BlueprintField> BooleanOperation<F> for Or {
    const NAME: &'static str = "logic_or";
    const ARITY: usize = 2;

    fn op_constraint(w: &[Expression<F>]) -> Expression<F> {
        w[2].clone() - or(&w[0], &w[1])
    }

    fn result_assignment(inputs: &[F]) -> F {
        inputs[0] + inputs[1] - inputs[0] * inputs[1]
    }
}

impl<F: BlueprintField> BooleanOperation<F> for Xor {
    const NAME: &'static str = "logic_xor";
    const ARITY: usize = 2;

    fn op_constraint(w: &[Expression<F>]) -> Expression<F> {
        w[2].clone() - (w[0].clone() + &w[1] - F::TWO.expr() * &w[0] * &w[1])
    }

    fn result_assignment(inputs: &[F]) -> F {
        inputs[0] + inputs[1] - F::TWO * inputs[0] * inputs[1]
    }
}

impl<F: BlueprintField> BooleanOperation<F> for Nand {
    const NAME: &'static str = "logic_nand";
    const ARITY: usize = 2;

    fn op_constraint(w: &[Expression<F>]) -> Expression<F> {
        w[2].clone() - (one::<F>() - w[0].clone() * &w[1])
    }

    fn result_assignment(inputs: &[F]) -> F {
        F::ONE - inputs[0] * inputs[1]
    }
}

impl<F: BlueprintField> BooleanOperation<F> for Nor {
    const NAME: &'static str = "logic_nor";
    const ARITY: usize = 2;

    fn op_constraint(w: &[Expression<F>]) -> Expression<F> {
        w[2].clone() - (one::<F>() - or(&w[0], &w[1]))
    }

    fn result_assignment(inputs: &[F]) -> F {
        F::ONE - (inputs[0] + inputs[1] - inputs[0] * inputs[1])
    }
}

/// `condition ? a : b` with inputs `[condition, a, b]`.
impl<F: BlueprintField> BooleanOperation<F> for Select {
    const NAME: &'static str = "logic_select";
    const ARITY: usize = 3;

    fn op_constraint(w: &[Expression<F>]) -> Expression<F> {
        w[3].clone() - (w[0].clone() * &w[1] + (one::<F>() - &w[0]) * &w[2])
    }

    fn result_assignment(inputs: &[F]) -> F {
        if inputs[0] == F::ZERO {
            inputs[2]
        } else {
            inputs[1]
        }
    }
}

#[derive(Clone, Debug)]
pub struct BooleanOp<Op> {
    layout: ComponentLayout,
    _op: PhantomData<Op>,
}

pub type LogicNot = BooleanOp<Not>;
pub type LogicAnd = BooleanOp<And>;
pub type LogicOr = BooleanOp<Or>;
pub type LogicXor = BooleanOp<Xor>;
pub type LogicNand = BooleanOp<Nand>;
pub type LogicNor = BooleanOp<Nor>;
pub type LogicSelect = BooleanOp<Select>;

impl<Op> BooleanOp<Op> {
    pub fn new<F: BlueprintField>(layout: ComponentLayout) -> Result<Self, BlueprintError>
    where
        Op: BooleanOperation<F>,
    {
        layout.check(Op::NAME, Op::ARITY + 1, 0)?;
        Ok(Self {
            layout,
            _op: PhantomData,
        })
    }
}

impl<F: BlueprintField, Op: BooleanOperation<F>> Component<F> for BooleanOp<Op> {
    type Input = Vec<Variable>;
    type Output = Variable;

    fn name(&self) -> &'static str {
        Op::NAME
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Vec<Variable>,
        start_row: usize,
    ) -> Result<Variable, BlueprintError> {
        if input.len() != Op::ARITY {
            return Err(BlueprintError::InvalidInput {
                component: Op::NAME,
                reason: format!("expected {} inputs, got {}", Op::ARITY, input.len()),
            });
        }
        let values = input
            .iter()
            .map(|var| table.try_var_value(var))
            .collect::<Result<Vec<F>, _>>()?;
        if let Some(value) = values.iter().find(|v| **v != F::ZERO && **v != F::ONE) {
            return Err(BlueprintError::InvalidInput {
                component: Op::NAME,
                reason: format!("{value} is not a bit"),
            });
        }
        for (i, value) in values.iter().enumerate() {
            set_witness!(table, self.layout, i, start_row, *value);
        }
        let output = Op::result_assignment(&values);
        set_witness!(table, self.layout, Op::ARITY, start_row, output);
        Ok(<Self as Component<F>>::result(self, start_row))
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Vec<usize> {
        let witnesses = (0..=Op::ARITY)
            .map(|i| self.layout.w_var(i, 0).expr())
            .collect_vec();
        vec![circuit.add_gate(vec![Op::op_constraint(&witnesses)])]
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Vec<Variable>,
        start_row: usize,
    ) {
        for (i, var) in input.iter().enumerate() {
            circuit.add_copy_constraint(*var, self.layout.w_cell(i, start_row));
        }
    }

    fn result(&self, start_row: usize) -> Variable {
        self.layout.w_cell(Op::ARITY, start_row)
    }
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;
    use p3::goldilocks::Goldilocks;

    use super::*;
    use crate::components::harness::Harness;

    type F = Goldilocks;

    fn run<Op: BooleanOperation<F>>(bits: &[u64]) -> (Harness<F>, Variable) {
        let mut harness = Harness::<F>::new(Op::ARITY + 1, 0, 4);
        let values = bits.iter().map(|b| F::from_u64(*b)).collect_vec();
        let input = harness.public_inputs(&values);
        let component =
            BooleanOp::<Op>::new::<F>(ComponentLayout::contiguous(Op::ARITY as u32 + 1, 0))
                .unwrap();
        let output = component
            .synthesize(&mut harness.circuit, &mut harness.table, &input, 0)
            .unwrap();
        (harness, output)
    }

    fn check<Op: BooleanOperation<F>>(bits: &[u64], expected: u64) {
        let (harness, output) = run::<Op>(bits);
        harness.assert_satisfied();
        assert_eq!(
            harness.table.var_value(&output),
            F::from_u64(expected),
            "{} on {bits:?}",
            Op::NAME
        );
    }

    #[test]
    fn test_truth_tables() {
        check::<Not>(&[0], 1);
        check::<Not>(&[1], 0);
        for (x, y) in iproduct!(0..2u64, 0..2u64) {
            check::<And>(&[x, y], x & y);
            check::<Or>(&[x, y], x | y);
            check::<Xor>(&[x, y], x ^ y);
            check::<Nand>(&[x, y], 1 - (x & y));
            check::<Nor>(&[x, y], 1 - (x | y));
        }
        for (c, a, b) in iproduct!(0..2u64, 0..2u64, 0..2u64) {
            check::<Select>(&[c, a, b], if c == 1 { a } else { b });
        }
    }

    #[test]
    fn test_flipped_output_is_rejected() {
        let (mut harness, output) = run::<Xor>(&[1, 0]);
        assert!(harness.is_satisfied());
        harness
            .table
            .set_witness(output.index as usize, 0, F::ZERO);
        assert!(!harness.is_satisfied());
    }

    #[test]
    fn test_non_bit_input() {
        let mut harness = Harness::<F>::new(3, 0, 4);
        let input = harness.public_inputs(&[F::from_u64(2), F::ONE]);
        let component = LogicAnd::new::<F>(ComponentLayout::contiguous(3, 0)).unwrap();
        assert!(matches!(
            component.generate_assignments(&mut harness.table, &input, 0),
            Err(BlueprintError::InvalidInput { .. })
        ));
        assert!(matches!(
            component.generate_assignments(&mut harness.table, &input[..1].to_vec(), 0),
            Err(BlueprintError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_gate_shape() {
        let mut circuit = Circuit::<F>::new();
        let component =
            LogicNot::new::<F>(ComponentLayout::new(vec![5, 3], vec![], vec![])).unwrap();
        component.generate_gates(&mut circuit);
        assert_eq!(
            circuit.gates()[0].constraints[0].to_string(),
            "((1 - w5) - w3)"
        );
    }
}
