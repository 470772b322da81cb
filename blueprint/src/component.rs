use assignment::AssignmentTable;
use expression::{ColumnType, Variable};
use ff_ext::BlueprintField;
use serde::{Deserialize, Serialize};

use crate::{BlueprintError, Circuit, entered_span, exit_span};

/// Columns a component instance is placed on. Component column `i` of a
/// region maps to table column `witness[i]` (resp. `constant[i]`,
/// `public_input[i]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentLayout {
    pub witness: Vec<u32>,
    pub constant: Vec<u32>,
    pub public_input: Vec<u32>,
}

impl ComponentLayout {
    pub fn new(witness: Vec<u32>, constant: Vec<u32>, public_input: Vec<u32>) -> Self {
        Self {
            witness,
            constant,
            public_input,
        }
    }

    /// Witness columns `0..witness_amount`, constant columns `0..constant_amount`.
    pub fn contiguous(witness_amount: u32, constant_amount: u32) -> Self {
        Self::new(
            (0..witness_amount).collect(),
            (0..constant_amount).collect(),
            vec![],
        )
    }

    pub fn w(&self, i: usize) -> u32 {
        self.witness[i]
    }

    pub fn c(&self, i: usize) -> u32 {
        self.constant[i]
    }

    pub fn pi(&self, i: usize) -> u32 {
        self.public_input[i]
    }

    /// Relative witness variable for gate constraints.
    pub fn w_var(&self, i: usize, rotation: i32) -> Variable {
        Variable::witness(self.w(i), rotation)
    }

    pub fn c_var(&self, i: usize, rotation: i32) -> Variable {
        Variable::constant(self.c(i), rotation)
    }

    /// Absolute witness cell for copy constraints and outputs.
    pub fn w_cell(&self, i: usize, row: usize) -> Variable {
        Variable::absolute(ColumnType::Witness, self.w(i), row)
    }

    pub fn c_cell(&self, i: usize, row: usize) -> Variable {
        Variable::absolute(ColumnType::Constant, self.c(i), row)
    }

    pub(crate) fn check(
        &self,
        component: &'static str,
        witness: usize,
        constant: usize,
    ) -> Result<(), BlueprintError> {
        for (region, required, available) in [
            ("witness", witness, self.witness.len()),
            ("constant", constant, self.constant.len()),
        ] {
            if available < required {
                return Err(BlueprintError::InvalidLayout {
                    component,
                    region,
                    required,
                    available,
                });
            }
        }
        Ok(())
    }
}

/// Inputs and outputs of a component: the cells they live in.
pub trait ComponentVars {
    fn all_vars(&self) -> Vec<Variable>;
}

impl ComponentVars for () {
    fn all_vars(&self) -> Vec<Variable> {
        vec![]
    }
}

impl ComponentVars for Variable {
    fn all_vars(&self) -> Vec<Variable> {
        vec![*self]
    }
}

impl ComponentVars for Vec<Variable> {
    fn all_vars(&self) -> Vec<Variable> {
        self.clone()
    }
}

/// A reusable circuit fragment occupying `rows_amount` consecutive rows from
/// some `start_row`.
pub trait Component<F: BlueprintField> {
    type Input: ComponentVars;
    type Output: ComponentVars;

    fn name(&self) -> &'static str;

    fn layout(&self) -> &ComponentLayout;

    fn rows_amount(&self) -> usize;

    /// Writes the witness of one instance and returns its output cells.
    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output, BlueprintError>;

    /// Registers the gates and returns their selector indices.
    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Vec<usize>;

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    );

    /// Output cells of the instance placed at `start_row`.
    fn result(&self, start_row: usize) -> Self::Output;

    /// Fills the constant cells the gates read.
    fn assign_constants(
        &self,
        _table: &mut AssignmentTable<F>,
        _start_row: usize,
    ) -> Result<(), BlueprintError> {
        Ok(())
    }

    /// Turns the selectors returned by [`Component::generate_gates`] on.
    /// Every gate applies to the first row unless overridden.
    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<(), BlueprintError> {
        for &selector in selectors {
            table.try_enable_selector(selector, start_row)?;
        }
        Ok(())
    }

    fn generate_circuit(
        &self,
        circuit: &mut Circuit<F>,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output, BlueprintError> {
        let span = entered_span!("generate_circuit", component = self.name(), start_row);
        let selectors = self.generate_gates(circuit);
        self.enable_selectors(table, &selectors, start_row)?;
        self.assign_constants(table, start_row)?;
        self.generate_copy_constraints(circuit, input, start_row);
        exit_span!(span);
        Ok(self.result(start_row))
    }

    /// Assignment and circuit generation for one instance.
    fn synthesize(
        &self,
        circuit: &mut Circuit<F>,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Output, BlueprintError> {
        self.generate_assignments(table, input, start_row)?;
        self.generate_circuit(circuit, table, input, start_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_mapping() {
        let layout = ComponentLayout::new(vec![4, 2, 7], vec![1], vec![]);
        assert_eq!(layout.w(2), 7);
        assert_eq!(layout.w_var(1, -1), Variable::witness(2, -1));
        assert_eq!(
            layout.c_cell(0, 5),
            Variable::absolute(ColumnType::Constant, 1, 5)
        );
        assert!(layout.check("test", 3, 1).is_ok());
        assert!(matches!(
            layout.check("test", 4, 0),
            Err(BlueprintError::InvalidLayout {
                region: "witness",
                required: 4,
                available: 3,
                ..
            })
        ));
    }
}
