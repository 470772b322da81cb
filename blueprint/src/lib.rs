#![deny(clippy::cargo)]
//! Gate registry, reusable PLONK components and a mock prover.
//!
//! A [`Circuit`] collects gates (lists of constraint expressions, each bound
//! to a selector column) and copy constraints. A [`Component`] contributes a
//! fixed row layout, its gates and its witness assignment. [`MockProver`]
//! checks an assigned table against a circuit row by row.

pub mod circuit;
pub mod component;
pub mod components;
pub mod constraint;
pub mod error;
pub mod macros;
pub mod mock_prover;

#[cfg(test)]
pub(crate) mod test_utils;

pub use circuit::{Circuit, CopyConstraint, Gate};
pub use component::{Component, ComponentLayout, ComponentVars};
pub use error::BlueprintError;
pub use mock_prover::{MockProver, MockProverError};
