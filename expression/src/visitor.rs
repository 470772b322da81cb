use std::collections::BTreeSet;

use ff_ext::BlueprintField;

use crate::{ArithmeticOperator, Expression, ExpressionNode, Variable};

impl<F: BlueprintField> Expression<F> {
    /// Visits every variable occurrence, left to right.
    pub fn for_each_variable(&self, f: &mut impl FnMut(&Variable)) {
        match self.node() {
            ExpressionNode::Term(term) => term.vars().iter().for_each(|var| f(var)),
            ExpressionNode::Pow(base, _) => base.for_each_variable(f),
            ExpressionNode::BinOp(lhs, rhs, _) => {
                lhs.for_each_variable(f);
                rhs.for_each_variable(f);
            }
        }
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.for_each_variable(&mut |var| {
            vars.insert(*var);
        });
        vars
    }

    /// Total degree upper bound: products add, powers multiply.
    pub fn degree(&self) -> usize {
        match self.node() {
            ExpressionNode::Term(term) => term.degree(),
            ExpressionNode::Pow(base, power) => base.degree() * *power as usize,
            ExpressionNode::BinOp(lhs, rhs, ArithmeticOperator::Mult) => {
                lhs.degree() + rhs.degree()
            }
            ExpressionNode::BinOp(lhs, rhs, _) => lhs.degree().max(rhs.degree()),
        }
    }

    /// Same tree shape with every variable replaced by `f(variable)`.
    pub fn map_variables(&self, f: &impl Fn(&Variable) -> Variable) -> Self {
        let node = match self.node() {
            ExpressionNode::Term(term) => ExpressionNode::Term(term.map_variables(f)),
            ExpressionNode::Pow(base, power) => {
                ExpressionNode::Pow(Box::new(base.map_variables(f)), *power)
            }
            ExpressionNode::BinOp(lhs, rhs, op) => ExpressionNode::BinOp(
                Box::new(lhs.map_variables(f)),
                Box::new(rhs.map_variables(f)),
                *op,
            ),
        };
        Expression::new(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expression, ToExpr, Variable};
    use p3::goldilocks::Goldilocks as F;

    type E = Expression<F>;

    #[test]
    fn test_degree() {
        let [a, b, c] = [0, 1, 2].map(|i| Variable::witness(i, 0));
        let e: E = a.expr() * b.expr() - c.expr();
        assert_eq!(e.degree(), 2);
        assert_eq!(e.pow(3).degree(), 6);
        assert_eq!(E::from(5u64).degree(), 0);
        assert_eq!((e.clone() + a.expr().pow(4)).degree(), 4);
    }

    #[test]
    fn test_variables_are_deduplicated() {
        let [a, b] = [0, 1].map(|i| Variable::witness(i, 0));
        let e: E = a.expr() * b.expr() + a.expr().pow(2);
        let mut occurrences = 0;
        e.for_each_variable(&mut |_| occurrences += 1);
        assert_eq!(occurrences, 3);
        assert_eq!(e.variables().into_iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_map_variables_keeps_shape() {
        let [a, b] = [0, 1].map(|i| Variable::witness(i, 0));
        let e: E = a.expr() - b.expr();
        let shifted = e.map_variables(&|var| var.with_rotation(var.rotation - 1));
        assert_eq!(
            shifted,
            Variable::witness(0, -1).expr() - Variable::witness(1, -1).expr()
        );
        assert_eq!(e.map_variables(&|var| *var), e);
    }
}
