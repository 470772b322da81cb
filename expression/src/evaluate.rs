use std::{collections::HashMap, convert::Infallible};

use ff_ext::BlueprintField;
use p3::field::PrimeCharacteristicRing;

use crate::{
    ArithmeticOperator, ColumnType, EvaluationError, Expression, ExpressionNode, Variable,
};

/// Variable values keyed by `(index, rotation, column_type, relative)`.
pub type EvaluationMap<F> = HashMap<(u32, i32, ColumnType, bool), F>;

pub fn evaluation_key(var: &Variable) -> (u32, i32, ColumnType, bool) {
    (var.index, var.rotation, var.column_type, var.relative)
}

impl<F: BlueprintField> Expression<F> {
    /// Post-order evaluation into any value type. A term is the product of
    /// its variables scaled by its coefficient; a pure constant term goes
    /// through `constant`.
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate<T>(
        &self,
        variable: &impl Fn(&Variable) -> T,
        constant: &impl Fn(F) -> T,
        sum: &impl Fn(T, T) -> T,
        sub: &impl Fn(T, T) -> T,
        product: &impl Fn(T, T) -> T,
        scaled: &impl Fn(T, F) -> T,
        pow: &impl Fn(T, u32) -> T,
    ) -> T {
        let result = self.try_evaluate(
            &|var: &Variable| Ok::<T, Infallible>(variable(var)),
            constant,
            sum,
            sub,
            product,
            scaled,
            pow,
        );
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// [`Expression::evaluate`] with a fallible variable lookup.
    #[allow(clippy::too_many_arguments)]
    pub fn try_evaluate<T, Err>(
        &self,
        variable: &impl Fn(&Variable) -> Result<T, Err>,
        constant: &impl Fn(F) -> T,
        sum: &impl Fn(T, T) -> T,
        sub: &impl Fn(T, T) -> T,
        product: &impl Fn(T, T) -> T,
        scaled: &impl Fn(T, F) -> T,
        pow: &impl Fn(T, u32) -> T,
    ) -> Result<T, Err> {
        match self.node() {
            ExpressionNode::Term(term) => {
                let mut vars = term.vars().iter();
                let Some(first) = vars.next() else {
                    return Ok(constant(term.coeff()));
                };
                let monomial = vars.try_fold(variable(first)?, |acc, var| {
                    Ok(product(acc, variable(var)?))
                })?;
                if term.coeff() == F::ONE {
                    Ok(monomial)
                } else {
                    Ok(scaled(monomial, term.coeff()))
                }
            }
            ExpressionNode::Pow(base, power) => {
                let base = base.try_evaluate(variable, constant, sum, sub, product, scaled, pow)?;
                Ok(pow(base, *power))
            }
            ExpressionNode::BinOp(lhs, rhs, op) => {
                let lhs = lhs.try_evaluate(variable, constant, sum, sub, product, scaled, pow)?;
                let rhs = rhs.try_evaluate(variable, constant, sum, sub, product, scaled, pow)?;
                Ok(match op {
                    ArithmeticOperator::Add => sum(lhs, rhs),
                    ArithmeticOperator::Sub => sub(lhs, rhs),
                    ArithmeticOperator::Mult => product(lhs, rhs),
                })
            }
        }
    }

    /// Field value given a value for every variable.
    pub fn evaluate_scalar(&self, value: impl Fn(&Variable) -> F) -> F {
        self.evaluate(
            &value,
            &|c| c,
            &|a, b| a + b,
            &|a, b| a - b,
            &|a, b| a * b,
            &|a, c| a * c,
            &|a, p| a.exp_u64(p as u64),
        )
    }

    pub fn try_evaluate_with_map(&self, map: &EvaluationMap<F>) -> Result<F, EvaluationError> {
        self.try_evaluate(
            &|var| {
                map.get(&evaluation_key(var))
                    .copied()
                    .ok_or(EvaluationError::MissingVariable { variable: *var })
            },
            &|c| c,
            &|a, b| a + b,
            &|a, b| a - b,
            &|a, b| a * b,
            &|a, c| a * c,
            &|a, p| a.exp_u64(p as u64),
        )
    }

    /// Panics when a variable has no entry in `map`.
    pub fn evaluate_with_map(&self, map: &EvaluationMap<F>) -> F {
        self.try_evaluate_with_map(map)
            .unwrap_or_else(|err| panic!("{err}"))
    }
}
