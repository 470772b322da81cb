use expression::{ColumnType, Variable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("{column_type:?} column {index} out of range, table has {columns_amount}")]
    ColumnOutOfRange {
        column_type: ColumnType,
        index: usize,
        columns_amount: usize,
    },
    #[error("row {row} out of range, table has {rows_amount} rows")]
    RowOutOfRange { row: usize, rows_amount: usize },
    #[error("{variable} names a negative row")]
    NegativeRow { variable: Variable },
    #[error("rows amount {0} is not a power of two")]
    RowsNotPowerOfTwo(usize),
    #[error("invalid table description: {0}")]
    Config(#[from] serde_json::Error),
}
