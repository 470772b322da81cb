//! Evaluation of constraint expressions against an assignment table, a
//! single row at a time or over whole columns in polynomial form.

use std::collections::HashMap;

use assignment::{
    AssignmentError, AssignmentTable, PolynomialColumns, PolynomialDfsTable, PolynomialTable,
};
use expression::{ColumnType, EvaluationMap, Expression, Variable, evaluation_key};
use ff_ext::BlueprintField;
use p3::field::PrimeCharacteristicRing;
use polynomial::{Polynomial, PolynomialDfs};

use crate::{Gate, entered_span, exit_span};

/// Value of `constraint` with relative variables anchored at `row`.
pub fn evaluate_at_row<F: BlueprintField>(
    constraint: &Expression<F>,
    table: &AssignmentTable<F>,
    row: usize,
) -> F {
    constraint.evaluate_scalar(|var| table.resolve(var, row))
}

pub fn try_evaluate_at_row<F: BlueprintField>(
    constraint: &Expression<F>,
    table: &AssignmentTable<F>,
    row: usize,
) -> Result<F, AssignmentError> {
    constraint.try_evaluate(
        &|var: &Variable| table.try_resolve(var, row),
        &|c| c,
        &|a, b| a + b,
        &|a, b| a - b,
        &|a, b| a * b,
        &|a, c| a * c,
        &|a, power| a.exp_u64(power as u64),
    )
}

/// Snapshot of every variable of `constraint` resolved at `row`, for
/// [`Expression::evaluate_with_map`].
pub fn evaluation_map<F: BlueprintField>(
    constraint: &Expression<F>,
    table: &AssignmentTable<F>,
    row: usize,
) -> Result<EvaluationMap<F>, AssignmentError> {
    constraint
        .variables()
        .iter()
        .map(|var| Ok((evaluation_key(var), table.try_resolve(var, row)?)))
        .collect()
}

// Shifted columns are built once per distinct rotated variable.
fn rotated_variables<T: PolynomialColumns, F: BlueprintField>(
    constraint: &Expression<F>,
    table: &T,
) -> HashMap<Variable, T::Poly> {
    constraint
        .variables()
        .into_iter()
        .filter(|var| var.rotation != 0)
        .map(|var| {
            let value = table.variable_value(&var);
            (var, value)
        })
        .collect()
}

/// Panics when a rotated variable was not collected by [`rotated_variables`].
fn variable_value<T: PolynomialColumns>(
    rotated: &HashMap<Variable, T::Poly>,
    table: &T,
    var: &Variable,
) -> T::Poly {
    if var.rotation == 0 {
        return table.variable_value_without_rotation(var).clone();
    }
    rotated
        .get(var)
        .cloned()
        .unwrap_or_else(|| panic!("no cached rotation for {var}"))
}

/// The constraint as a polynomial in coefficient form over the table domain.
pub fn evaluate_polynomial<F: BlueprintField>(
    constraint: &Expression<F>,
    table: &PolynomialTable<F>,
) -> Polynomial<F> {
    let span = entered_span!("evaluate_polynomial");
    let rotated = rotated_variables(constraint, table);
    let result = constraint.evaluate(
        &|var: &Variable| variable_value(&rotated, table, var),
        &Polynomial::constant,
        &|a, b| a + b,
        &|a, b| a - b,
        &|a, b| a * b,
        &|a, c| a.scale(c),
        &|a, power| a.pow(power),
    );
    exit_span!(span);
    result
}

/// The constraint in point-value form. The result lives on the smallest
/// power-of-two domain that holds its degree.
pub fn evaluate_dfs<F: BlueprintField>(
    constraint: &Expression<F>,
    table: &PolynomialDfsTable<F>,
) -> PolynomialDfs<F> {
    let span = entered_span!("evaluate_dfs");
    let rotated = rotated_variables(constraint, table);
    let result = constraint.evaluate(
        &|var: &Variable| variable_value(&rotated, table, var),
        &|c| PolynomialDfs::constant(c, 1),
        &|a, b| a + b,
        &|a, b| a - b,
        &|a, b| a * b,
        &|a, c| a.scale(c),
        &|a, power| a.pow(power),
    );
    exit_span!(span);
    result
}

/// Every constraint of `gate` multiplied by its selector column.
pub fn selected_constraints_dfs<F: BlueprintField>(
    gate: &Gate<F>,
    table: &PolynomialDfsTable<F>,
) -> Vec<PolynomialDfs<F>> {
    let selector = table.column(ColumnType::Selector, gate.selector_index);
    gate.constraints
        .iter()
        .map(|constraint| selector * &evaluate_dfs(constraint, table))
        .collect()
}

#[cfg(test)]
mod tests {
    use assignment::TableDescription;
    use expression::ToExpr;
    use p3::goldilocks::Goldilocks;
    use polynomial::EvaluationDomain;

    use super::*;

    type F = Goldilocks;

    // w2 = w0 * w1 on every row, w3 = w2 of the previous row.
    fn table() -> AssignmentTable<F> {
        let mut table = AssignmentTable::new(&TableDescription::new(4, 0, 1, 0, 8));
        for row in 0..8 {
            let x = F::from_u64(row as u64 + 2);
            let y = F::from_u64(3 * row as u64 + 1);
            table.set_witness(0, row, x);
            table.set_witness(1, row, y);
            table.set_witness(2, row, x * y);
            table.set_constant(0, row, F::from_u64(7));
        }
        for row in 0..8 {
            let previous = table.witness(2, (row + 7) % 8);
            table.set_witness(3, row, previous);
        }
        table
    }

    fn constraints() -> Vec<Expression<F>> {
        let w = |i, rot| Variable::witness(i, rot);
        vec![
            w(0, 0).expr() * w(1, 0).expr() - w(2, 0).expr(),
            w(3, 0).expr() - w(2, -1).expr(),
            (w(0, 0).expr() + Variable::constant(0, 0).expr()).pow(2)
                - w(0, 0).expr() * w(0, 0).expr()
                - F::from_u64(14).expr() * w(0, 0).expr()
                - F::from_u64(49).expr(),
        ]
    }

    #[test]
    fn test_row_evaluation_vanishes() {
        let table = table();
        for constraint in constraints() {
            for row in 0..8 {
                assert_eq!(evaluate_at_row(&constraint, &table, row), F::ZERO);
            }
        }
        let broken = Variable::witness(0, 0).expr() - Variable::witness(1, 0).expr();
        assert_eq!(evaluate_at_row(&broken, &table, 0), F::ONE);
    }

    #[test]
    fn test_evaluation_map_matches_row_evaluation() {
        let table = table();
        for constraint in constraints() {
            for row in [0, 3, 7] {
                let map = evaluation_map(&constraint, &table, row).unwrap();
                assert_eq!(
                    constraint.evaluate_with_map(&map),
                    evaluate_at_row(&constraint, &table, row)
                );
            }
        }
        let map = evaluation_map(&constraints()[1], &table, 0).unwrap();
        assert_eq!(map[&(2, -1, ColumnType::Witness, true)], table.witness(2, 7));
    }

    #[test]
    fn test_evaluation_map_keeps_absolute_and_relative_apart() {
        let table = table();
        let fixed = Variable::absolute(ColumnType::Witness, 0, 2);
        let shifted = Variable::witness(0, 2);
        let constraint: Expression<F> = fixed.expr() - shifted.expr();
        let map = evaluation_map(&constraint, &table, 3).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&(0, 2, ColumnType::Witness, false)], F::from_u64(4));
        assert_eq!(map[&(0, 2, ColumnType::Witness, true)], F::from_u64(7));
        assert_eq!(constraint.evaluate_with_map(&map), -F::from_u64(3));
        assert_eq!(evaluate_at_row(&constraint, &table, 3), -F::from_u64(3));
    }

    #[test]
    #[should_panic(expected = "no cached rotation for w0[+1]")]
    fn test_uncached_rotation_panics() {
        let dfs = table().to_dfs_table();
        variable_value(&HashMap::new(), &dfs, &Variable::witness(0, 1));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let table = table();
        let constraint: Expression<F> = Variable::witness(9, 0).into();
        assert!(try_evaluate_at_row(&constraint, &table, 0).is_err());
    }

    #[test]
    fn test_polynomial_forms_agree_with_rows() {
        let table = table();
        let domain = EvaluationDomain::<F>::new(8);
        let coefficients = table.to_polynomial_table(&domain);
        let dfs = table.to_dfs_table();
        let mixed = Variable::witness(2, -1).expr() * Variable::witness(0, 1).expr()
            + Variable::witness(1, 0).expr();
        let poly = evaluate_polynomial(&mixed, &coefficients);
        let values = evaluate_dfs(&mixed, &dfs).restricted_to(&domain);
        for row in 0..8 {
            let expected = evaluate_at_row(&mixed, &table, row);
            assert_eq!(poly.evaluate(domain.element(row)), expected);
            assert_eq!(values[row], expected);
        }
        for constraint in constraints() {
            let poly = evaluate_polynomial(&constraint, &coefficients);
            assert!(domain.elements().all(|x| poly.evaluate(x) == F::ZERO));
        }
        assert!(evaluate_polynomial(&constraints()[2], &coefficients).is_zero());
    }

    #[test]
    fn test_selected_constraints_vanish_on_the_domain() {
        let mut table = table();
        // Row 5 breaks the product, but the selector is off there.
        table.set_witness(2, 5, F::ZERO);
        for row in [0, 1, 2, 3] {
            table.enable_selector(0, row);
        }
        let gate = Gate {
            selector_index: 0,
            constraints: constraints()[..1].to_vec(),
        };
        let domain = EvaluationDomain::<F>::new(8);
        for poly in selected_constraints_dfs(&gate, &table.to_dfs_table()) {
            assert!(poly.restricted_to(&domain).iter().all(|v| *v == F::ZERO));
        }
        table.enable_selector(0, 5);
        let polys = selected_constraints_dfs(&gate, &table.to_dfs_table());
        assert_ne!(polys[0].restricted_to(&domain)[5], F::ZERO);
    }
}
