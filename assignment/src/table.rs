use expression::{ColumnTable, ColumnType, Variable};
use ff_ext::BlueprintField;
use p3::field::PrimeCharacteristicRing;
use tracing::debug;

use crate::{AssignmentError, ColumnMatrix, TableDescription};

/// The four column regions of a circuit, all `rows_amount` rows high.
///
/// Components write into it sequentially, each starting at the row handed to
/// it; nothing detects two components writing overlapping cells. Accessors
/// panic on out-of-range cells, the `try_` variants return an error instead.
#[derive(Clone, Debug)]
pub struct AssignmentTable<F: BlueprintField> {
    witness: ColumnMatrix<F>,
    public_input: ColumnMatrix<F>,
    constant: ColumnMatrix<F>,
    selector: ColumnMatrix<F>,
    usable_rows_amount: usize,
}

impl<F: BlueprintField> AssignmentTable<F> {
    pub fn new(desc: &TableDescription) -> Self {
        let rows = desc.rows_amount;
        Self {
            witness: ColumnMatrix::new(rows, desc.witness_columns),
            public_input: ColumnMatrix::new(rows, desc.public_input_columns),
            constant: ColumnMatrix::new(rows, desc.constant_columns),
            selector: ColumnMatrix::new(rows, desc.selector_columns),
            usable_rows_amount: desc.usable_rows_amount,
        }
    }

    pub fn try_new(desc: &TableDescription) -> Result<Self, AssignmentError> {
        desc.validate()?;
        Ok(Self::new(desc))
    }

    pub fn rows_amount(&self) -> usize {
        self.witness.height()
    }

    pub fn usable_rows_amount(&self) -> usize {
        self.usable_rows_amount
    }

    /// Current shape, selector columns included.
    pub fn description(&self) -> TableDescription {
        TableDescription {
            witness_columns: self.witness.width(),
            public_input_columns: self.public_input.width(),
            constant_columns: self.constant.width(),
            selector_columns: self.selector.width(),
            usable_rows_amount: self.usable_rows_amount,
            rows_amount: self.rows_amount(),
        }
    }

    fn region(&self, column_type: ColumnType) -> &ColumnMatrix<F> {
        match column_type {
            ColumnType::Witness => &self.witness,
            ColumnType::PublicInput => &self.public_input,
            ColumnType::Constant => &self.constant,
            ColumnType::Selector => &self.selector,
        }
    }

    fn region_mut(&mut self, column_type: ColumnType) -> &mut ColumnMatrix<F> {
        match column_type {
            ColumnType::Witness => &mut self.witness,
            ColumnType::PublicInput => &mut self.public_input,
            ColumnType::Constant => &mut self.constant,
            ColumnType::Selector => &mut self.selector,
        }
    }

    pub fn columns_amount(&self, column_type: ColumnType) -> usize {
        self.region(column_type).width()
    }

    fn check(
        &self,
        column_type: ColumnType,
        index: usize,
        row: usize,
    ) -> Result<(), AssignmentError> {
        let columns_amount = self.columns_amount(column_type);
        if index >= columns_amount {
            return Err(AssignmentError::ColumnOutOfRange {
                column_type,
                index,
                columns_amount,
            });
        }
        if row >= self.rows_amount() {
            return Err(AssignmentError::RowOutOfRange {
                row,
                rows_amount: self.rows_amount(),
            });
        }
        Ok(())
    }

    pub fn try_get(
        &self,
        column_type: ColumnType,
        index: usize,
        row: usize,
    ) -> Result<F, AssignmentError> {
        self.check(column_type, index, row)?;
        Ok(self.region(column_type).get(index, row))
    }

    pub fn get(&self, column_type: ColumnType, index: usize, row: usize) -> F {
        self.try_get(column_type, index, row)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_set(
        &mut self,
        column_type: ColumnType,
        index: usize,
        row: usize,
        value: F,
    ) -> Result<(), AssignmentError> {
        self.check(column_type, index, row)?;
        self.region_mut(column_type).set(index, row, value);
        Ok(())
    }

    pub fn set(&mut self, column_type: ColumnType, index: usize, row: usize, value: F) {
        self.try_set(column_type, index, row, value)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn witness(&self, index: usize, row: usize) -> F {
        self.get(ColumnType::Witness, index, row)
    }

    pub fn public_input(&self, index: usize, row: usize) -> F {
        self.get(ColumnType::PublicInput, index, row)
    }

    pub fn constant(&self, index: usize, row: usize) -> F {
        self.get(ColumnType::Constant, index, row)
    }

    pub fn selector(&self, index: usize, row: usize) -> F {
        self.get(ColumnType::Selector, index, row)
    }

    pub fn set_witness(&mut self, index: usize, row: usize, value: F) {
        self.set(ColumnType::Witness, index, row, value)
    }

    pub fn set_public_input(&mut self, index: usize, row: usize, value: F) {
        self.set(ColumnType::PublicInput, index, row, value)
    }

    pub fn set_constant(&mut self, index: usize, row: usize, value: F) {
        self.set(ColumnType::Constant, index, row, value)
    }

    /// Value of `var` anchored at `row`, rotation wrapping around the table.
    pub fn resolve(&self, var: &Variable, row: usize) -> F {
        var.resolve(self, row)
    }

    /// Absolute variables are not wrapped: a row past the table is
    /// `RowOutOfRange`, a negative one `NegativeRow`.
    pub fn try_resolve(&self, var: &Variable, row: usize) -> Result<F, AssignmentError> {
        let row = var
            .row(row, self.rows_amount())
            .ok_or(AssignmentError::NegativeRow { variable: *var })?;
        self.try_get(var.column_type, var.index as usize, row)
    }

    /// Value of an absolute variable; a relative one reads row `rotation`
    /// modulo the table height.
    pub fn var_value(&self, var: &Variable) -> F {
        self.resolve(var, 0)
    }

    pub fn try_var_value(&self, var: &Variable) -> Result<F, AssignmentError> {
        self.try_resolve(var, 0)
    }

    pub fn column(&self, column_type: ColumnType, index: usize) -> Vec<F> {
        let columns_amount = self.columns_amount(column_type);
        assert!(
            index < columns_amount,
            "{column_type:?} column {index} out of range, table has {columns_amount}"
        );
        self.region(column_type).column(index)
    }

    pub fn columns(&self, column_type: ColumnType) -> Vec<Vec<F>> {
        self.region(column_type).columns()
    }

    pub fn try_enable_selector(
        &mut self,
        selector_index: usize,
        row: usize,
    ) -> Result<(), AssignmentError> {
        if row >= self.rows_amount() {
            return Err(AssignmentError::RowOutOfRange {
                row,
                rows_amount: self.rows_amount(),
            });
        }
        if selector_index >= self.selector.width() {
            debug!(
                "allocating selector columns {}..={selector_index}",
                self.selector.width()
            );
            self.selector.grow_to(selector_index + 1);
        }
        self.selector.set(selector_index, row, F::ONE);
        Ok(())
    }

    /// Turns gate `selector_index` on at `row`, allocating the selector
    /// column on first use.
    pub fn enable_selector(&mut self, selector_index: usize, row: usize) {
        self.try_enable_selector(selector_index, row)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Enables rows `first, first + step, ...` up to and including `last`.
    pub fn try_enable_selector_range(
        &mut self,
        selector_index: usize,
        first: usize,
        last: usize,
        step: usize,
    ) -> Result<(), AssignmentError> {
        debug!("enable selector {selector_index} on rows {first}..={last} step {step}");
        for row in (first..=last).step_by(step.max(1)) {
            self.try_enable_selector(selector_index, row)?;
        }
        Ok(())
    }

    pub fn enable_selector_range(
        &mut self,
        selector_index: usize,
        first: usize,
        last: usize,
        step: usize,
    ) {
        self.try_enable_selector_range(selector_index, first, last, step)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn selector_enabled(&self, selector_index: usize, row: usize) -> bool {
        selector_index < self.selector.width()
            && row < self.rows_amount()
            && self.selector.get(selector_index, row) != F::ZERO
    }
}

impl<F: BlueprintField> ColumnTable<F> for AssignmentTable<F> {
    fn rows_amount(&self) -> usize {
        self.rows_amount()
    }

    fn cell(&self, column_type: ColumnType, index: usize, row: usize) -> F {
        self.get(column_type, index, row)
    }
}

#[cfg(test)]
mod tests {
    use super::AssignmentTable;
    use crate::{AssignmentError, TableDescription};
    use expression::{ColumnType, Variable};
    use p3::{field::PrimeCharacteristicRing, goldilocks::Goldilocks as F};

    fn table() -> AssignmentTable<F> {
        let mut table = AssignmentTable::new(&TableDescription::new(2, 1, 1, 0, 4));
        for row in 0..4 {
            table.set_witness(0, row, F::from_u64(100 + row as u64));
        }
        table
    }

    #[test]
    fn test_rotated_resolution_wraps() {
        let table = table();
        let prev = Variable::witness(0, -1);
        assert_eq!(table.resolve(&prev, 0), F::from_u64(103));
        assert_eq!(table.resolve(&prev, 2), F::from_u64(101));
        assert_eq!(table.resolve(&Variable::witness(0, 1), 3), F::from_u64(100));
        assert_eq!(
            table.var_value(&Variable::absolute(ColumnType::Witness, 0, 2)),
            F::from_u64(102)
        );
    }

    #[test]
    fn test_out_of_range_access() {
        let mut table = table();
        assert!(matches!(
            table.try_get(ColumnType::Witness, 2, 0),
            Err(AssignmentError::ColumnOutOfRange { index: 2, .. })
        ));
        assert!(matches!(
            table.try_set(ColumnType::Constant, 0, 4, F::ONE),
            Err(AssignmentError::RowOutOfRange { row: 4, rows_amount: 4 })
        ));
        assert!(
            table
                .try_var_value(&Variable::absolute(ColumnType::PublicInput, 1, 0))
                .is_err()
        );
    }

    #[test]
    fn test_absolute_cells_past_the_table() {
        let table = AssignmentTable::<F>::new(&TableDescription::new(1, 1, 0, 0, 4));
        assert!(matches!(
            table.try_var_value(&Variable::absolute(ColumnType::PublicInput, 0, 4)),
            Err(AssignmentError::RowOutOfRange { row: 4, rows_amount: 4 })
        ));
        assert!(matches!(
            table.try_var_value(&Variable::absolute(ColumnType::PublicInput, 0, 5)),
            Err(AssignmentError::RowOutOfRange { row: 5, .. })
        ));
        let negative = Variable::new(ColumnType::PublicInput, 0, -1, false);
        assert!(matches!(
            table.try_var_value(&negative),
            Err(AssignmentError::NegativeRow { variable }) if variable == negative
        ));
        // relative rotations still wrap
        assert!(table.try_resolve(&Variable::public_input(0, -1), 0).is_ok());
        assert!(table.try_resolve(&Variable::public_input(0, 5), 3).is_ok());
    }

    #[test]
    #[should_panic(expected = "row 4 out of range")]
    fn test_var_value_panics_past_the_table() {
        let table = AssignmentTable::<F>::new(&TableDescription::new(1, 1, 0, 0, 4));
        table.var_value(&Variable::absolute(ColumnType::Witness, 0, 4));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_panics_on_missing_column() {
        table().get(ColumnType::Selector, 0, 0);
    }

    #[test]
    fn test_selectors_allocated_on_demand() {
        let mut table = table();
        assert_eq!(table.columns_amount(ColumnType::Selector), 0);
        table.enable_selector(2, 1);
        assert_eq!(table.columns_amount(ColumnType::Selector), 3);
        assert!(table.selector_enabled(2, 1));
        assert!(!table.selector_enabled(0, 1));
        table.enable_selector_range(0, 0, 3, 2);
        assert_eq!(
            table.column(ColumnType::Selector, 0),
            vec![F::ONE, F::ZERO, F::ONE, F::ZERO]
        );
        // witness values survive selector growth
        assert_eq!(table.witness(0, 3), F::from_u64(103));
        assert_eq!(table.description().selector_columns, 3);
        assert!(table.try_enable_selector(0, 9).is_err());
    }
}
