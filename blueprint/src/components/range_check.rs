use assignment::AssignmentTable;
use expression::Variable;
use ff_ext::BlueprintField;

use super::bit_decomposition::BitBuilder;
use crate::{BlueprintError, Circuit, Component, ComponentLayout};

/// Proves `x < 2^bits_amount` by decomposing `x` into bits that are
/// discarded afterwards.
#[derive(Clone, Debug)]
pub struct RangeCheck {
    builder: BitBuilder,
}

impl RangeCheck {
    pub fn new(layout: ComponentLayout, bits_amount: usize) -> Result<Self, BlueprintError> {
        Ok(Self {
            builder: BitBuilder::new("range_check", layout, bits_amount)?,
        })
    }
}

impl<F: BlueprintField> Component<F> for RangeCheck {
    type Input = Variable;
    type Output = ();

    fn name(&self) -> &'static str {
        "range_check"
    }

    fn layout(&self) -> &ComponentLayout {
        self.builder.layout()
    }

    fn rows_amount(&self) -> usize {
        self.builder.rows_amount()
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Variable,
        start_row: usize,
    ) -> Result<(), BlueprintError> {
        let value = table.try_var_value(input)?;
        let bits = self.builder.value_bits(value)?;
        self.builder.assign(table, &bits, start_row)?;
        Ok(())
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Vec<usize> {
        self.builder.generate_gates(circuit)
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<(), BlueprintError> {
        self.builder.enable_selectors(table, selectors, start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Variable,
        start_row: usize,
    ) {
        circuit.add_copy_constraint(*input, self.builder.sum_cell(start_row));
    }

    fn result(&self, _start_row: usize) {}
}
