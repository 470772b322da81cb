use serde::{Deserialize, Serialize};

use crate::AssignmentError;

/// get next power of 2 rows amount with minimal size 2
pub fn padded_rows_amount(usable_rows_amount: usize) -> usize {
    usable_rows_amount.next_power_of_two().max(2)
}

/// Shape of an assignment table.
///
/// `usable_rows_amount` is what components may fill; `rows_amount` is the
/// padded power of two the table is allocated with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    pub witness_columns: usize,
    pub public_input_columns: usize,
    pub constant_columns: usize,
    pub selector_columns: usize,
    pub usable_rows_amount: usize,
    pub rows_amount: usize,
}

impl TableDescription {
    pub fn new(
        witness_columns: usize,
        public_input_columns: usize,
        constant_columns: usize,
        selector_columns: usize,
        usable_rows_amount: usize,
    ) -> Self {
        Self {
            witness_columns,
            public_input_columns,
            constant_columns,
            selector_columns,
            usable_rows_amount,
            rows_amount: padded_rows_amount(usable_rows_amount),
        }
    }

    /// Parses a description and checks it. A missing or zero `rows_amount`
    /// is derived from `usable_rows_amount`.
    pub fn from_json(json: &str) -> Result<Self, AssignmentError> {
        let mut desc: TableDescription = serde_json::from_str(json)?;
        if desc.rows_amount == 0 {
            desc.rows_amount = padded_rows_amount(desc.usable_rows_amount);
        }
        desc.validate()?;
        Ok(desc)
    }

    pub fn to_json(&self) -> Result<String, AssignmentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), AssignmentError> {
        if !self.rows_amount.is_power_of_two() {
            return Err(AssignmentError::RowsNotPowerOfTwo(self.rows_amount));
        }
        if self.usable_rows_amount > self.rows_amount {
            return Err(AssignmentError::RowOutOfRange {
                row: self.usable_rows_amount,
                rows_amount: self.rows_amount,
            });
        }
        Ok(())
    }
}
