#![deny(clippy::cargo)]
//! Assignment table of a PLONK circuit and its polynomial views.

mod description;
mod error;
mod matrix;
mod polynomial_table;
mod table;

pub use description::{TableDescription, padded_rows_amount};
pub use error::AssignmentError;
pub use matrix::ColumnMatrix;
pub use polynomial_table::{PolynomialColumns, PolynomialDfsTable, PolynomialTable};
pub use table::AssignmentTable;
