#![deny(clippy::cargo)]
//! Constraint expressions over assignment-table cells.
//!
//! A [`Variable`] names a cell, a [`Term`] is a monomial over variables and
//! an [`Expression`] is a tree of terms, powers and binary operations. Trees
//! are built with the arithmetic operators and evaluated with
//! [`Expression::evaluate`] into scalars, polynomials or anything else that
//! supports the ring operations.

mod codec;
mod display;
mod error;
mod evaluate;
mod expression;
mod ops;
mod term;
mod variable;
mod visitor;

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

pub use codec::WireFormat;
pub use error::{CodecError, EvaluationError};
pub use evaluate::{EvaluationMap, evaluation_key};
pub use expression::{ArithmeticOperator, Expression, ExpressionNode, ToExpr};
pub use term::Term;
pub use variable::{ColumnTable, ColumnType, Variable, rotated_row};

pub(crate) fn hash_of(value: &impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
