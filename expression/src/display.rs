use std::fmt;

use ff_ext::BlueprintField;
use itertools::Itertools;
use p3::field::PrimeCharacteristicRing;

use crate::{Expression, ExpressionNode, Term};

fn write_coeff<F: BlueprintField>(f: &mut fmt::Formatter<'_>, coeff: F) -> fmt::Result {
    if coeff == F::NEG_ONE {
        write!(f, "(-1)")
    } else {
        write!(f, "{coeff}")
    }
}

impl<F: BlueprintField> fmt::Display for Term<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeff() != F::ONE {
            write_coeff(f, self.coeff())?;
            if !self.vars().is_empty() {
                write!(f, " * ")?;
            }
        } else if self.vars().is_empty() {
            write_coeff(f, self.coeff())?;
        }
        write!(f, "{}", self.vars().iter().join(" * "))
    }
}

impl<F: BlueprintField> fmt::Display for Expression<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            ExpressionNode::Term(term) => write!(f, "{term}"),
            ExpressionNode::Pow(base, power) => write!(f, "({base} ^ {power})"),
            ExpressionNode::BinOp(lhs, rhs, op) => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}
