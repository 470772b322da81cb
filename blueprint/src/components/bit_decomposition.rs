//! Conversions between a field element and its bits.
//!
//! Every row holds the previous running sum in `W0`, `k = witness_amount - 2`
//! bits in `W1..=Wk` and the new running sum in `W[k+1]`:
//!
//! `W[k+1] = W0 * 2^k + sum_j Wj * 2^(k-j)`
//!
//! Bits run most significant first across the rows, with leading zero
//! padding when `k` does not divide the bit count. The first row starts
//! from a zero sum; every later row links `W0` to `W[k+1]` of the row above.

use assignment::AssignmentTable;
use expression::{Expression, ToExpr, Variable};
use ff_ext::BlueprintField;
use itertools::Itertools;
use p3::field::PrimeCharacteristicRing;
use tracing::debug;

use crate::{BlueprintError, Circuit, Component, ComponentLayout, macros::set_witness};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitsOrder {
    MsbFirst,
    LsbFirst,
}

const MAX_BITS: usize = 64;

#[derive(Clone, Debug)]
pub(crate) struct BitBuilder {
    name: &'static str,
    layout: ComponentLayout,
    bits_amount: usize,
    check_bits: bool,
}

impl BitBuilder {
    pub(crate) fn new(
        name: &'static str,
        layout: ComponentLayout,
        bits_amount: usize,
    ) -> Result<Self, BlueprintError> {
        layout.check(name, 3, 0)?;
        if bits_amount == 0 || bits_amount > MAX_BITS {
            return Err(BlueprintError::InvalidInput {
                component: name,
                reason: format!("bits amount {bits_amount} not in 1..={MAX_BITS}"),
            });
        }
        Ok(Self {
            name,
            layout,
            bits_amount,
            check_bits: true,
        })
    }

    /// Drops the `b * (1 - b)` constraints, for bits already known boolean.
    pub(crate) fn without_bit_checks(mut self) -> Self {
        self.check_bits = false;
        self
    }

    pub(crate) fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn bits_per_row(&self) -> usize {
        self.layout.witness.len() - 2
    }

    pub(crate) fn rows_amount(&self) -> usize {
        self.bits_amount.div_ceil(self.bits_per_row())
    }

    fn padding(&self) -> usize {
        self.rows_amount() * self.bits_per_row() - self.bits_amount
    }

    fn sum_column(&self) -> usize {
        self.bits_per_row() + 1
    }

    fn constraints<F: BlueprintField>(&self, first_row: bool) -> Vec<Expression<F>> {
        let k = self.bits_per_row();
        let w = |i| self.layout.w_var(i, 0);
        let shifted = (1..=k).fold(w(0).expr() * F::TWO.exp_u64(k as u64).expr(), |acc, j| {
            acc + F::TWO.exp_u64((k - j) as u64).expr() * w(j)
        });
        let mut constraints = vec![shifted - w(self.sum_column())];
        if first_row {
            constraints.push(w(0).into());
            constraints.extend((1..=self.padding()).map(|j| Expression::from(w(j))));
        } else {
            let previous_sum = self.layout.w_var(self.sum_column(), -1);
            constraints.push(w(0).expr() - previous_sum);
        }
        if self.check_bits {
            constraints.extend((1..=k).map(|j| w(j).expr() * (F::ONE.expr() - w(j))));
        }
        constraints
    }

    pub(crate) fn generate_gates<F: BlueprintField>(&self, circuit: &mut Circuit<F>) -> Vec<usize> {
        let mut selectors = vec![circuit.add_gate(self.constraints(true))];
        if self.rows_amount() > 1 {
            selectors.push(circuit.add_gate(self.constraints(false)));
        }
        selectors
    }

    pub(crate) fn enable_selectors<F: BlueprintField>(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<(), BlueprintError> {
        table.try_enable_selector(selectors[0], start_row)?;
        if let Some(&next) = selectors.get(1) {
            table.try_enable_selector_range(
                next,
                start_row + 1,
                start_row + self.rows_amount() - 1,
                1,
            )?;
        }
        Ok(())
    }

    /// Writes the rows for `bits`, most significant first.
    pub(crate) fn assign<F: BlueprintField>(
        &self,
        table: &mut AssignmentTable<F>,
        bits: &[bool],
        start_row: usize,
    ) -> Result<F, BlueprintError> {
        debug_assert_eq!(bits.len(), self.bits_amount);
        let k = self.bits_per_row();
        let slots = std::iter::repeat(false)
            .take(self.padding())
            .chain(bits.iter().copied())
            .collect_vec();
        let mut sum = F::ZERO;
        for (r, row_bits) in slots.chunks(k).enumerate() {
            let row = start_row + r;
            set_witness!(table, self.layout, 0, row, sum);
            for (j, bit) in row_bits.iter().enumerate() {
                set_witness!(table, self.layout, j + 1, row, *bit);
                sum = sum.double() + F::from_u64(*bit as u64);
            }
            set_witness!(table, self.layout, self.sum_column(), row, sum);
        }
        debug!(component = self.name, rows = self.rows_amount(), "assigned bits");
        Ok(sum)
    }

    /// Bit cells of the instance, most significant first.
    pub(crate) fn bit_cells(&self, start_row: usize) -> Vec<Variable> {
        let k = self.bits_per_row();
        (self.padding()..self.rows_amount() * k)
            .map(|slot| self.layout.w_cell(slot % k + 1, start_row + slot / k))
            .collect()
    }

    pub(crate) fn sum_cell(&self, start_row: usize) -> Variable {
        self.layout
            .w_cell(self.sum_column(), start_row + self.rows_amount() - 1)
    }

    pub(crate) fn value_bits<F: BlueprintField>(
        &self,
        value: F,
    ) -> Result<Vec<bool>, BlueprintError> {
        let canonical = value.to_canonical_u64();
        if self.bits_amount < MAX_BITS && canonical >> self.bits_amount != 0 {
            return Err(BlueprintError::InvalidInput {
                component: self.name,
                reason: format!("{value} does not fit in {} bits", self.bits_amount),
            });
        }
        let mut bits = value.to_bits_le(self.bits_amount);
        bits.reverse();
        Ok(bits)
    }
}

fn ordered<T>(mut msb_first: Vec<T>, order: BitsOrder) -> Vec<T> {
    if order == BitsOrder::LsbFirst {
        msb_first.reverse();
    }
    msb_first
}

/// Splits a value into `bits_amount` bit cells.
#[derive(Clone, Debug)]
pub struct BitDecomposition {
    builder: BitBuilder,
    order: BitsOrder,
}

impl BitDecomposition {
    pub fn new(
        layout: ComponentLayout,
        bits_amount: usize,
        order: BitsOrder,
    ) -> Result<Self, BlueprintError> {
        Ok(Self {
            builder: BitBuilder::new("bit_decomposition", layout, bits_amount)?,
            order,
        })
    }
}

impl<F: BlueprintField> Component<F> for BitDecomposition {
    type Input = Variable;
    type Output = Vec<Variable>;

    fn name(&self) -> &'static str {
        "bit_decomposition"
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
    ) -> Result<Vec<Variable>, BlueprintError> {
        let value = table.try_var_value(input)?;
        let bits = self.builder.value_bits(value)?;
        self.builder.assign(table, &bits, start_row)?;
        Ok(<Self as Component<F>>::result(self, start_row))
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

    fn result(&self, start_row: usize) -> Vec<Variable> {
        ordered(self.builder.bit_cells(start_row), self.order)
    }
}

/// Packs `bits_amount` bit cells into one value. With `check_input` off the
/// input cells are trusted to be boolean.
#[derive(Clone, Debug)]
pub struct BitComposition {
    builder: BitBuilder,
    order: BitsOrder,
}

impl BitComposition {
    pub fn new(
        layout: ComponentLayout,
        bits_amount: usize,
        order: BitsOrder,
        check_input: bool,
    ) -> Result<Self, BlueprintError> {
        let builder = BitBuilder::new("bit_composition", layout, bits_amount)?;
        Ok(Self {
            builder: if check_input {
                builder
            } else {
                builder.without_bit_checks()
            },
            order,
        })
    }
}

impl<F: BlueprintField> Component<F> for BitComposition {
    type Input = Vec<Variable>;
    type Output = Variable;

    fn name(&self) -> &'static str {
        "bit_composition"
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
        input: &Vec<Variable>,
        start_row: usize,
    ) -> Result<Variable, BlueprintError> {
        if input.len() != self.builder.bits_amount {
            return Err(BlueprintError::InvalidInput {
                component: "bit_composition",
                reason: format!(
                    "expected {} bits, got {}",
                    self.builder.bits_amount,
                    input.len()
                ),
            });
        }
        let bits = input
            .iter()
            .map(|var| {
                let value = table.try_var_value(var)?;
                if value == F::ZERO || value == F::ONE {
                    Ok(value == F::ONE)
                } else {
                    Err(BlueprintError::InvalidInput {
                        component: "bit_composition",
                        reason: format!("{value} is not a bit"),
                    })
                }
            })
            .collect::<Result<Vec<bool>, BlueprintError>>()?;
        self.builder
            .assign(table, &ordered(bits, self.order), start_row)?;
        Ok(<Self as Component<F>>::result(self, start_row))
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
        input: &Vec<Variable>,
        start_row: usize,
    ) {
        let cells = ordered(self.builder.bit_cells(start_row), self.order);
        for (bit, cell) in input.iter().zip(cells) {
            circuit.add_copy_constraint(*bit, cell);
        }
    }

    fn result(&self, start_row: usize) -> Variable {
        self.builder.sum_cell(start_row)
    }
}
