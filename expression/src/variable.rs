use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The four regions of an assignment table. The discriminant is the wire tag.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[repr(u8)]
pub enum ColumnType {
    Witness = 0,
    PublicInput = 1,
    Constant = 2,
    Selector = 3,
}

impl ColumnType {
    fn prefix(&self) -> &'static str {
        match self {
            ColumnType::Witness => "w",
            ColumnType::PublicInput => "pi",
            ColumnType::Constant => "c",
            ColumnType::Selector => "s",
        }
    }
}

/// A single cell reference.
///
/// A relative variable reads `rotation` rows away from the row a gate is
/// evaluated at. An absolute one (`relative == false`) names a fixed row, and
/// `rotation` is that row index; components describe their inputs and outputs
/// with absolute variables.
///
/// Field order gives the derived ordering: kind, then index, then rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub column_type: ColumnType,
    pub index: u32,
    pub rotation: i32,
    pub relative: bool,
}

impl Variable {
    pub const fn new(column_type: ColumnType, index: u32, rotation: i32, relative: bool) -> Self {
        Self {
            column_type,
            index,
            rotation,
            relative,
        }
    }

    pub const fn witness(index: u32, rotation: i32) -> Self {
        Self::new(ColumnType::Witness, index, rotation, true)
    }

    pub const fn public_input(index: u32, rotation: i32) -> Self {
        Self::new(ColumnType::PublicInput, index, rotation, true)
    }

    pub const fn constant(index: u32, rotation: i32) -> Self {
        Self::new(ColumnType::Constant, index, rotation, true)
    }

    pub const fn selector(index: u32, rotation: i32) -> Self {
        Self::new(ColumnType::Selector, index, rotation, true)
    }

    /// Cell at a fixed `row` of the given column.
    ///
    /// Panics when `row` does not fit the `i32` rotation field.
    pub fn absolute(column_type: ColumnType, index: u32, row: usize) -> Self {
        Self::try_absolute(column_type, index, row)
            .unwrap_or_else(|| panic!("row {row} is too large for an absolute variable"))
    }

    pub fn try_absolute(column_type: ColumnType, index: u32, row: usize) -> Option<Self> {
        let row = i32::try_from(row).ok()?;
        Some(Self::new(column_type, index, row, false))
    }

    pub const fn with_rotation(self, rotation: i32) -> Self {
        Self { rotation, ..self }
    }

    /// Row this variable reads when anchored at `row` of a table with
    /// `rows_amount` rows.
    ///
    /// Only relative variables wrap around the table. An absolute variable
    /// ignores the anchor and names its row as is, which may lie past the
    /// table; `None` when that row is negative.
    pub fn row(&self, row: usize, rows_amount: usize) -> Option<usize> {
        if self.relative {
            Some(rotated_row(rows_amount, row, self.rotation))
        } else {
            usize::try_from(self.rotation).ok()
        }
    }

    /// Cell value at `row`, relative rotations wrapping around the table.
    ///
    /// Panics if the cell does not exist in `table`.
    pub fn resolve<T, F>(&self, table: &T, row: usize) -> F
    where
        T: ColumnTable<F> + ?Sized,
    {
        let row = self
            .row(row, table.rows_amount())
            .unwrap_or_else(|| panic!("{self} names a negative row"));
        table.cell(self.column_type, self.index as usize, row)
    }
}

/// `(rows_amount + row + rotation) mod rows_amount`, reduced euclidean so
/// rotations larger than the table wrap as well.
pub fn rotated_row(rows_amount: usize, row: usize, rotation: i32) -> usize {
    assert!(rows_amount > 0, "cannot rotate inside an empty table");
    (row as i64 + rotation as i64).rem_euclid(rows_amount as i64) as usize
}

/// Read access to the cells a [`Variable`] can name.
pub trait ColumnTable<F> {
    fn rows_amount(&self) -> usize;

    /// Panics when `index` or `row` are out of range.
    fn cell(&self, column_type: ColumnType, index: usize, row: usize) -> F;
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_type.prefix(), self.index)?;
        match (self.relative, self.rotation) {
            (true, 0) => Ok(()),
            (true, rotation) => write!(f, "[{rotation:+}]"),
            (false, row) => write!(f, "@{row}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnTable, ColumnType, Variable, rotated_row};
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    struct Rows(Vec<u64>);

    impl ColumnTable<u64> for Rows {
        fn rows_amount(&self) -> usize {
            self.0.len()
        }

        fn cell(&self, column_type: ColumnType, index: usize, row: usize) -> u64 {
            assert_eq!(column_type, ColumnType::Witness);
            assert_eq!(index, 0);
            self.0[row]
        }
    }

    #[test]
    fn test_rotation_wraps_around() {
        let table = Rows(vec![10, 11, 12, 13]);
        let prev = Variable::witness(0, -1);
        assert_eq!(prev.resolve(&table, 0), 13);
        assert_eq!(prev.resolve(&table, 2), 11);
        assert_eq!(Variable::witness(0, 1).resolve(&table, 3), 10);
        assert_eq!(Variable::absolute(ColumnType::Witness, 0, 2).resolve(&table, 0), 12);
    }

    #[test]
    fn test_absolute_rows_do_not_wrap() {
        let cell = Variable::absolute(ColumnType::Witness, 0, 5);
        assert_eq!(cell.row(0, 4), Some(5));
        assert_eq!(cell.row(3, 4), Some(5));
        assert_eq!(Variable::witness(0, 5).row(0, 4), Some(1));
        assert_eq!(Variable::new(ColumnType::Witness, 0, -1, false).row(0, 4), None);
    }

    #[test]
    #[should_panic(expected = "negative row")]
    fn test_resolve_negative_absolute_row() {
        let table = Rows(vec![10, 11, 12, 13]);
        Variable::new(ColumnType::Witness, 0, -1, false).resolve(&table, 0);
    }

    #[test]
    fn test_absolute_row_overflow() {
        let too_large = i32::MAX as usize + 1;
        assert!(Variable::try_absolute(ColumnType::Witness, 0, too_large).is_none());
        assert_eq!(
            Variable::try_absolute(ColumnType::Witness, 0, 7),
            Some(Variable::absolute(ColumnType::Witness, 0, 7))
        );
    }

    #[test]
    #[should_panic(expected = "too large for an absolute variable")]
    fn test_absolute_panics_on_overflow() {
        Variable::absolute(ColumnType::Witness, 0, i32::MAX as usize + 1);
    }

    #[test]
    fn test_ordering_is_kind_index_rotation() {
        let mut vars = vec![
            Variable::constant(0, 0),
            Variable::witness(1, -1),
            Variable::witness(0, 5),
            Variable::witness(1, -2),
        ];
        vars.sort();
        assert_eq!(
            vars,
            vec![
                Variable::witness(0, 5),
                Variable::witness(1, -2),
                Variable::witness(1, -1),
                Variable::constant(0, 0),
            ]
        );
        assert_eq!(
            ColumnType::iter().map(|c| c as u8).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Variable::witness(3, 0).to_string(), "w3");
        assert_eq!(Variable::witness(3, -1).to_string(), "w3[-1]");
        assert_eq!(Variable::selector(0, 1).to_string(), "s0[+1]");
        assert_eq!(
            Variable::absolute(ColumnType::PublicInput, 2, 7).to_string(),
            "pi2@7"
        );
    }

    proptest! {
        #[test]
        fn test_rotated_row_matches_formula(
            rows in 1usize..64,
            row in 0usize..64,
            rotation in -64i32..64,
        ) {
            let row = row % rows;
            let expected = (rows as i64 * 128 + row as i64 + rotation as i64) as usize % rows;
            prop_assert_eq!(rotated_row(rows, row, rotation), expected);
        }
    }
}
