use std::hash::{Hash, Hasher};

use ff_ext::BlueprintField;
use p3::field::PrimeCharacteristicRing;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::{Term, Variable, hash_of};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
#[repr(u8)]
pub enum ArithmeticOperator {
    Add = 0,
    Sub = 1,
    Mult = 2,
}

impl ArithmeticOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mult => "*",
        }
    }
}

/// Node of an expression tree. Variant order is the wire tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum ExpressionNode<F: BlueprintField> {
    Term(Term<F>),
    Pow(Box<Expression<F>>, u32),
    BinOp(Box<Expression<F>>, Box<Expression<F>>, ArithmeticOperator),
}

/// Constraint expression tree.
///
/// Nodes are immutable and carry a structural hash computed once when the
/// node is built. Equality is exact tree equality: `a + b` and `b + a` are
/// different expressions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "", from = "ExpressionNode<F>", into = "ExpressionNode<F>")]
pub struct Expression<F: BlueprintField> {
    node: ExpressionNode<F>,
    hash: u64,
}

impl<F: BlueprintField> Expression<F> {
    pub fn new(node: ExpressionNode<F>) -> Self {
        let hash = match &node {
            ExpressionNode::Term(term) => term.cached_hash(),
            ExpressionNode::Pow(base, power) => hash_of(&(1u8, base.hash, *power)),
            ExpressionNode::BinOp(lhs, rhs, op) => hash_of(&(2u8, lhs.hash, rhs.hash, *op)),
        };
        Self { node, hash }
    }

    /// The empty expression, a zero-coefficient term.
    pub fn zero() -> Self {
        Self::from(Term::zero())
    }

    pub fn constant(value: F) -> Self {
        Self::from(Term::constant(value))
    }

    pub fn binop(lhs: Expression<F>, rhs: Expression<F>, op: ArithmeticOperator) -> Self {
        Self::new(ExpressionNode::BinOp(Box::new(lhs), Box::new(rhs), op))
    }

    pub fn node(&self) -> &ExpressionNode<F> {
        &self.node
    }

    pub fn into_node(self) -> ExpressionNode<F> {
        self.node
    }

    pub fn as_term(&self) -> Option<&Term<F>> {
        match &self.node {
            ExpressionNode::Term(term) => Some(term),
            _ => None,
        }
    }

    pub fn cached_hash(&self) -> u64 {
        self.hash
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.node, ExpressionNode::Term(term) if term.is_zero())
    }

    pub fn pow(&self, power: u32) -> Self {
        Self::new(ExpressionNode::Pow(Box::new(self.clone()), power))
    }
}

impl<F: BlueprintField> Default for Expression<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: BlueprintField> PartialEq for Expression<F> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.node == other.node
    }
}

impl<F: BlueprintField> Eq for Expression<F> {}

impl<F: BlueprintField> Hash for Expression<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<F: BlueprintField> From<ExpressionNode<F>> for Expression<F> {
    fn from(node: ExpressionNode<F>) -> Self {
        Self::new(node)
    }
}

impl<F: BlueprintField> From<Expression<F>> for ExpressionNode<F> {
    fn from(expr: Expression<F>) -> Self {
        expr.node
    }
}

impl<F: BlueprintField> From<Term<F>> for Expression<F> {
    fn from(term: Term<F>) -> Self {
        Self::new(ExpressionNode::Term(term))
    }
}

impl<F: BlueprintField> From<Variable> for Expression<F> {
    fn from(var: Variable) -> Self {
        Self::from(Term::from(var))
    }
}

impl<F: BlueprintField> From<u64> for Expression<F> {
    fn from(value: u64) -> Self {
        Self::constant(F::from_u64(value))
    }
}

impl<F: BlueprintField> From<usize> for Expression<F> {
    fn from(value: usize) -> Self {
        Self::constant(F::from_u64(value as u64))
    }
}

pub trait ToExpr<F: BlueprintField> {
    fn expr(&self) -> Expression<F>;
}

impl<F: BlueprintField> ToExpr<F> for Variable {
    fn expr(&self) -> Expression<F> {
        Expression::from(*self)
    }
}

impl<F: BlueprintField> ToExpr<F> for Term<F> {
    fn expr(&self) -> Expression<F> {
        Expression::from(self.clone())
    }
}

impl<F: BlueprintField> ToExpr<F> for F {
    fn expr(&self) -> Expression<F> {
        Expression::constant(*self)
    }
}
