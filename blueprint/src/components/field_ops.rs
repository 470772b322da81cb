//! Single-row native field arithmetic.

use std::marker::PhantomData;

use assignment::AssignmentTable;
use expression::{Expression, ToExpr, Variable};
use ff_ext::BlueprintField;
use p3::field::{Field, PrimeCharacteristicRing};

use crate::{
    BlueprintError, Circuit, Component, ComponentLayout, ComponentVars, macros::set_witness,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryInput {
    pub x: Variable,
    pub y: Variable,
}

impl ComponentVars for BinaryInput {
    fn all_vars(&self) -> Vec<Variable> {
        vec![self.x, self.y]
    }
}

/// A binary operation laid out as `W0 = x`, `W1 = y`, `W2 = result`, with
/// any auxiliary cells after the result.
pub trait BinaryOperation<F: BlueprintField> {
    const NAME: &'static str;
    const WITNESS_AMOUNT: usize;

    fn constraints(layout: &ComponentLayout) -> Vec<Expression<F>>;

    /// Cells `W2..WITNESS_AMOUNT` for operands `x` and `y`.
    fn assign(x: F, y: F) -> Result<Vec<F>, String>;
}

#[derive(Clone, Copy, Debug)]
pub struct AddOp;
#[derive(Clone, Copy, Debug)]
pub struct SubOp;
#[derive(Clone, Copy, Debug)]
pub struct MulOp;
#[derive(Clone, Copy, Debug)]
pub struct DivOp;
#[derive(Clone, Copy, Debug)]
pub struct DivOrZeroOp;

impl<F: BlueprintField> BinaryOperation<F> for AddOp {
    const NAME: &'static str = "addition";
    const WITNESS_AMOUNT: usize = 3;

    fn constraints(layout: &ComponentLayout) -> Vec<Expression<F>> {
        let w = |i| layout.w_var(i, 0);
        vec![w(0).expr() + w(1) - w(2)]
    }

    fn assign(x: F, y: F) -> Result<Vec<F>, String> {
        Ok(vec![x + y])
    }
}

impl<F: BlueprintField> BinaryOperation<F> for SubOp {
    const NAME: &'static str = "subtraction";
    const WITNESS_AMOUNT: usize = 3;

    fn constraints(layout: &ComponentLayout) -> Vec<Expression<F>> {
        let w = |i| layout.w_var(i, 0);
        vec![w(0).expr() - w(1) - w(2)]
    }

    fn assign(x: F, y: F) -> Result<Vec<F>, String> {
        Ok(vec![x - y])
    }
}

impl<F: BlueprintField> BinaryOperation<F> for MulOp {
    const NAME: &'static str = "multiplication";
    const WITNESS_AMOUNT: usize = 3;

    fn constraints(layout: &ComponentLayout) -> Vec<Expression<F>> {
        let w = |i| layout.w_var(i, 0);
        vec![w(0).expr() * w(1) - w(2)]
    }

    fn assign(x: F, y: F) -> Result<Vec<F>, String> {
        Ok(vec![x * y])
    }
}

// W3 holds 1 / y, which forces y != 0.
impl<F: BlueprintField> BinaryOperation<F> for DivOp {
    const NAME: &'static str = "division";
    const WITNESS_AMOUNT: usize = 4;

    fn constraints(layout: &ComponentLayout) -> Vec<Expression<F>> {
        let w = |i| layout.w_var(i, 0);
        vec![
            w(1).expr() * w(2) - w(0),
            w(1).expr() * w(3) - F::ONE.expr(),
        ]
    }

    fn assign(x: F, y: F) -> Result<Vec<F>, String> {
        let y_inv = y.try_inverse().ok_or("division by zero")?;
        Ok(vec![x * y_inv, y_inv])
    }
}

// W3 is 1 / y, or 0 when y = 0.
impl<F: BlueprintField> BinaryOperation<F> for DivOrZeroOp {
    const NAME: &'static str = "division_or_zero";
    const WITNESS_AMOUNT: usize = 4;

    fn constraints(layout: &ComponentLayout) -> Vec<Expression<F>> {
        let w = |i| layout.w_var(i, 0);
        let is_inverse = w(1).expr() * w(3) - F::ONE.expr();
        vec![
            w(0).expr() * w(3) - w(2),
            w(1).expr() * is_inverse.clone(),
            w(3).expr() * is_inverse,
        ]
    }

    fn assign(x: F, y: F) -> Result<Vec<F>, String> {
        let y_inv = y.try_inverse().unwrap_or(F::ZERO);
        Ok(vec![x * y_inv, y_inv])
    }
}

#[derive(Clone, Debug)]
pub struct FieldOperation<Op> {
    layout: ComponentLayout,
    _op: PhantomData<Op>,
}

pub type Addition = FieldOperation<AddOp>;
pub type Subtraction = FieldOperation<SubOp>;
pub type Multiplication = FieldOperation<MulOp>;
pub type Division = FieldOperation<DivOp>;
pub type DivisionOrZero = FieldOperation<DivOrZeroOp>;

impl<Op> FieldOperation<Op> {
    pub fn new<F: BlueprintField>(layout: ComponentLayout) -> Result<Self, BlueprintError>
    where
        Op: BinaryOperation<F>,
    {
        layout.check(Op::NAME, Op::WITNESS_AMOUNT, 0)?;
        Ok(Self {
            layout,
            _op: PhantomData,
        })
    }
}

impl<F: BlueprintField, Op: BinaryOperation<F>> Component<F> for FieldOperation<Op> {
    type Input = BinaryInput;
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
        input: &BinaryInput,
        start_row: usize,
    ) -> Result<Variable, BlueprintError> {
        let x = table.try_var_value(&input.x)?;
        let y = table.try_var_value(&input.y)?;
        let cells = Op::assign(x, y).map_err(|reason| BlueprintError::InvalidInput {
            component: Op::NAME,
            reason,
        })?;
        set_witness!(table, self.layout, 0, start_row, x);
        set_witness!(table, self.layout, 1, start_row, y);
        for (i, value) in cells.into_iter().enumerate() {
            set_witness!(table, self.layout, i + 2, start_row, value);
        }
        Ok(<Self as Component<F>>::result(self, start_row))
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Vec<usize> {
        vec![circuit.add_gate(Op::constraints(&self.layout))]
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &BinaryInput,
        start_row: usize,
    ) {
        circuit.add_copy_constraint(input.x, self.layout.w_cell(0, start_row));
        circuit.add_copy_constraint(input.y, self.layout.w_cell(1, start_row));
    }

    fn result(&self, start_row: usize) -> Variable {
        self.layout.w_cell(2, start_row)
    }
}

/// `W1 = W0 * constant`, the constant sitting in `C0` of the same row.
#[derive(Clone, Debug)]
pub struct MulByConstant<F> {
    layout: ComponentLayout,
    constant: F,
}

impl<F: BlueprintField> MulByConstant<F> {
    pub fn new(layout: ComponentLayout, constant: F) -> Result<Self, BlueprintError> {
        layout.check("mul_by_constant", 2, 1)?;
        Ok(Self { layout, constant })
    }
}

impl<F: BlueprintField> Component<F> for MulByConstant<F> {
    type Input = Variable;
    type Output = Variable;

    fn name(&self) -> &'static str {
        "mul_by_constant"
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
        input: &Variable,
        start_row: usize,
    ) -> Result<Variable, BlueprintError> {
        let x = table.try_var_value(input)?;
        set_witness!(table, self.layout, 0, start_row, x);
        set_witness!(table, self.layout, 1, start_row, x * self.constant);
        Ok(self.result(start_row))
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Vec<usize> {
        let w = |i| self.layout.w_var(i, 0);
        vec![circuit.add_gate(vec![
            w(0).expr() * self.layout.c_var(0, 0) - w(1),
        ])]
    }

    fn assign_constants(
        &self,
        table: &mut AssignmentTable<F>,
        start_row: usize,
    ) -> Result<(), BlueprintError> {
        let cell = self.layout.c_cell(0, start_row);
        table.try_set(cell.column_type, cell.index as usize, start_row, self.constant)?;
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Variable,
        start_row: usize,
    ) {
        circuit.add_copy_constraint(*input, self.layout.w_cell(0, start_row));
    }

    fn result(&self, start_row: usize) -> Variable {
        self.layout.w_cell(1, start_row)
    }
}

#[cfg(test)]
mod tests {
    use p3::goldilocks::Goldilocks;
    use proptest::prelude::*;

    use super::*;
    use crate::components::harness::Harness;

    type F = Goldilocks;

    fn run<Op: BinaryOperation<F>>(x: F, y: F) -> (Harness<F>, Variable) {
        let mut harness = Harness::new(Op::WITNESS_AMOUNT, 0, 4);
        let vars = harness.public_inputs(&[x, y]);
        let input = BinaryInput {
            x: vars[0],
            y: vars[1],
        };
        let component = FieldOperation::<Op>::new::<F>(ComponentLayout::contiguous(
            Op::WITNESS_AMOUNT as u32,
            0,
        ))
        .unwrap();
        let output = component
            .synthesize(&mut harness.circuit, &mut harness.table, &input, 1)
            .unwrap();
        (harness, output)
    }

    #[test]
    fn test_field_operations() {
        let x = F::from_u64(1_000_003);
        let y = F::from_u64(77);
        let cases: Vec<(Harness<F>, Variable, F)> = vec![
            {
                let (h, out) = run::<AddOp>(x, y);
                (h, out, x + y)
            },
            {
                let (h, out) = run::<SubOp>(x, y);
                (h, out, x - y)
            },
            {
                let (h, out) = run::<MulOp>(x, y);
                (h, out, x * y)
            },
            {
                let (h, out) = run::<DivOp>(x, y);
                (h, out, x / y)
            },
            {
                let (h, out) = run::<DivOrZeroOp>(x, y);
                (h, out, x / y)
            },
        ];
        for (harness, output, expected) in cases {
            harness.assert_satisfied();
            assert_eq!(harness.table.var_value(&output), expected);
        }
    }

    #[test]
    fn test_division_by_zero() {
        let mut harness = Harness::<F>::new(4, 0, 4);
        let vars = harness.public_inputs(&[F::ONE, F::ZERO]);
        let input = BinaryInput {
            x: vars[0],
            y: vars[1],
        };
        let component = Division::new::<F>(ComponentLayout::contiguous(4, 0)).unwrap();
        assert!(matches!(
            component.generate_assignments(&mut harness.table, &input, 0),
            Err(BlueprintError::InvalidInput { .. })
        ));

        let (harness, output) = run::<DivOrZeroOp>(F::from_u64(5), F::ZERO);
        harness.assert_satisfied();
        assert_eq!(harness.table.var_value(&output), F::ZERO);
    }

    #[test]
    fn test_tampered_result_is_rejected() {
        let (mut harness, output) = run::<MulOp>(F::from_u64(6), F::from_u64(7));
        assert!(harness.is_satisfied());
        harness
            .table
            .set_witness(output.index as usize, 1, F::from_u64(43));
        assert!(!harness.is_satisfied());
    }

    #[test]
    fn test_tampered_operand_breaks_copy_constraint() {
        let (mut harness, _) = run::<AddOp>(F::from_u64(6), F::from_u64(7));
        harness.table.set_witness(0, 1, F::from_u64(5));
        harness.table.set_witness(2, 1, F::from_u64(12));
        assert!(!harness.is_satisfied());
    }

    #[test]
    fn test_layout_too_small() {
        assert!(Division::new::<F>(ComponentLayout::contiguous(3, 0)).is_err());
        assert!(MulByConstant::new(ComponentLayout::contiguous(2, 0), F::ONE).is_err());
    }

    #[test]
    fn test_mul_by_constant() {
        let mut harness = Harness::<F>::new(2, 1, 4);
        let x = harness.public_inputs(&[F::from_u64(11)])[0];
        let component =
            MulByConstant::new(ComponentLayout::contiguous(2, 1), F::from_u64(9)).unwrap();
        let output = component
            .synthesize(&mut harness.circuit, &mut harness.table, &x, 2)
            .unwrap();
        harness.assert_satisfied();
        assert_eq!(harness.table.var_value(&output), F::from_u64(99));
        assert_eq!(harness.table.constant(0, 2), F::from_u64(9));
    }

    #[test]
    fn test_instances_share_gates() {
        let mut harness = Harness::<F>::new(3, 0, 8);
        let vars = harness.public_inputs(&[F::from_u64(2), F::from_u64(3), F::from_u64(4)]);
        let component = Multiplication::new::<F>(ComponentLayout::contiguous(3, 0)).unwrap();
        let first = component
            .synthesize(
                &mut harness.circuit,
                &mut harness.table,
                &BinaryInput {
                    x: vars[0],
                    y: vars[1],
                },
                0,
            )
            .unwrap();
        let second = component
            .synthesize(
                &mut harness.circuit,
                &mut harness.table,
                &BinaryInput { x: first, y: vars[2] },
                1,
            )
            .unwrap();
        harness.assert_satisfied();
        assert_eq!(harness.circuit.num_gates(), 1);
        assert_eq!(harness.table.var_value(&second), F::from_u64(24));
    }

    proptest! {
        #[test]
        fn test_div_or_zero_matches_field(x in any::<u64>(), y in 0u64..4) {
            let (x, y) = (F::from_u64(x), F::from_u64(y));
            let (harness, output) = run::<DivOrZeroOp>(x, y);
            let expected = y.try_inverse().map_or(F::ZERO, |inv| x * inv);
            prop_assert!(harness.is_satisfied());
            prop_assert_eq!(harness.table.var_value(&output), expected);
        }
    }
}
