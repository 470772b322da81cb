use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
};

use expression::{Expression, Variable};
use ff_ext::BlueprintField;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Constraints that must all vanish on every row where the selector column
/// `selector_index` is enabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Gate<F: BlueprintField> {
    pub selector_index: usize,
    pub constraints: Vec<Expression<F>>,
}

impl<F: BlueprintField> Gate<F> {
    pub fn degree(&self) -> usize {
        self.constraints.iter().map(Expression::degree).max().unwrap_or(0)
    }
}

/// Equality between two absolute cells, compared and hashed as an unordered
/// pair so `{a, b}` and `{b, a}` are the same constraint.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CopyConstraint {
    pub first: Variable,
    pub second: Variable,
}

impl CopyConstraint {
    fn ordered(&self) -> (Variable, Variable) {
        (self.first.min(self.second), self.first.max(self.second))
    }
}

impl PartialEq for CopyConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Eq for CopyConstraint {}

impl Hash for CopyConstraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}

#[derive(Clone, Debug)]
pub struct Circuit<F: BlueprintField> {
    gates: Vec<Gate<F>>,
    gate_selectors: HashMap<Vec<Expression<F>>, usize>,
    copy_constraints: Vec<CopyConstraint>,
}

impl<F: BlueprintField> Default for Circuit<F> {
    fn default() -> Self {
        Self {
            gates: Vec::new(),
            gate_selectors: HashMap::new(),
            copy_constraints: Vec::new(),
        }
    }
}

impl<F: BlueprintField> Circuit<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gate and returns its selector index. Registering the same
    /// constraint list again returns the selector of the first registration.
    pub fn add_gate(&mut self, constraints: Vec<Expression<F>>) -> usize {
        if let Some(&selector_index) = self.gate_selectors.get(&constraints) {
            debug!(selector_index, "reusing existing gate");
            return selector_index;
        }
        let selector_index = self.gates.len();
        debug!(
            selector_index,
            constraints = constraints.len(),
            "registering gate"
        );
        self.gate_selectors
            .insert(constraints.clone(), selector_index);
        self.gates.push(Gate {
            selector_index,
            constraints,
        });
        selector_index
    }

    pub fn add_gate_constraint(&mut self, constraint: Expression<F>) -> usize {
        self.add_gate(vec![constraint])
    }

    pub fn add_copy_constraint(&mut self, first: Variable, second: Variable) {
        debug_assert!(
            !first.relative && !second.relative,
            "copy constraints take absolute cells"
        );
        debug!(%first, %second, "copy constraint");
        self.copy_constraints.push(CopyConstraint { first, second });
    }

    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    pub fn gate(&self, selector_index: usize) -> Option<&Gate<F>> {
        self.gates.get(selector_index)
    }

    pub fn copy_constraints(&self) -> &[CopyConstraint] {
        &self.copy_constraints
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn max_degree(&self) -> usize {
        self.gates.iter().map(Gate::degree).max().unwrap_or(0)
    }
}
