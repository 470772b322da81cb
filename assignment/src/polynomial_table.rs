use expression::{ColumnType, Variable};
use ff_ext::BlueprintField;
use polynomial::{EvaluationDomain, Polynomial, PolynomialDfs};
use rayon::prelude::*;
use tracing::instrument;

use crate::AssignmentTable;

/// Per-column values of a table in some polynomial form.
pub trait PolynomialColumns {
    type Poly: Clone;

    fn rows_amount(&self) -> usize;

    /// Panics when the column does not exist.
    fn column(&self, column_type: ColumnType, index: usize) -> &Self::Poly;

    fn variable_value_without_rotation(&self, var: &Variable) -> &Self::Poly {
        self.column(var.column_type, var.index as usize)
    }

    /// Column of `var` shifted by its rotation.
    fn variable_value(&self, var: &Variable) -> Self::Poly;
}

#[derive(Clone, Debug)]
struct Regions<P> {
    witness: Vec<P>,
    public_input: Vec<P>,
    constant: Vec<P>,
    selector: Vec<P>,
}

impl<P> Regions<P> {
    fn build<F: BlueprintField>(
        table: &AssignmentTable<F>,
        convert: impl Fn(Vec<F>) -> P + Sync + Send,
    ) -> Self
    where
        P: Send,
    {
        let region = |column_type| {
            table
                .columns(column_type)
                .into_par_iter()
                .map(&convert)
                .collect::<Vec<_>>()
        };
        Self {
            witness: region(ColumnType::Witness),
            public_input: region(ColumnType::PublicInput),
            constant: region(ColumnType::Constant),
            selector: region(ColumnType::Selector),
        }
    }

    fn get(&self, column_type: ColumnType, index: usize) -> &P {
        let region = match column_type {
            ColumnType::Witness => &self.witness,
            ColumnType::PublicInput => &self.public_input,
            ColumnType::Constant => &self.constant,
            ColumnType::Selector => &self.selector,
        };
        region.get(index).unwrap_or_else(|| {
            panic!(
                "{column_type:?} column {index} out of range, table has {}",
                region.len()
            )
        })
    }
}

/// Columns interpolated over the table domain: `p(omega^row) = cell`.
#[derive(Clone, Debug)]
pub struct PolynomialTable<F: BlueprintField> {
    domain: EvaluationDomain<F>,
    columns: Regions<Polynomial<F>>,
}

impl<F: BlueprintField> PolynomialTable<F> {
    pub fn domain(&self) -> &EvaluationDomain<F> {
        &self.domain
    }
}

impl<F: BlueprintField> PolynomialColumns for PolynomialTable<F> {
    type Poly = Polynomial<F>;

    fn rows_amount(&self) -> usize {
        self.domain.size()
    }

    fn column(&self, column_type: ColumnType, index: usize) -> &Polynomial<F> {
        self.columns.get(column_type, index)
    }

    fn variable_value(&self, var: &Variable) -> Polynomial<F> {
        let column = self.variable_value_without_rotation(var);
        if var.rotation == 0 {
            column.clone()
        } else {
            column.rotated(var.rotation, &self.domain)
        }
    }
}

/// Columns as evaluations over the table domain.
#[derive(Clone, Debug)]
pub struct PolynomialDfsTable<F: BlueprintField> {
    rows_amount: usize,
    columns: Regions<PolynomialDfs<F>>,
}

impl<F: BlueprintField> PolynomialColumns for PolynomialDfsTable<F> {
    type Poly = PolynomialDfs<F>;

    fn rows_amount(&self) -> usize {
        self.rows_amount
    }

    fn column(&self, column_type: ColumnType, index: usize) -> &PolynomialDfs<F> {
        self.columns.get(column_type, index)
    }

    fn variable_value(&self, var: &Variable) -> PolynomialDfs<F> {
        let column = self.variable_value_without_rotation(var);
        if var.rotation == 0 {
            column.clone()
        } else {
            column.rotated(var.rotation, self.rows_amount)
        }
    }
}

impl<F: BlueprintField> AssignmentTable<F> {
    /// Panics when `domain` does not match the table height.
    #[instrument(skip_all, name = "to_polynomial_table", level = "debug")]
    pub fn to_polynomial_table(&self, domain: &EvaluationDomain<F>) -> PolynomialTable<F> {
        assert_eq!(
            domain.size(),
            self.rows_amount(),
            "domain size must equal the rows amount"
        );
        PolynomialTable {
            domain: *domain,
            columns: Regions::build(self, Polynomial::interpolate),
        }
    }

    #[instrument(skip_all, name = "to_dfs_table", level = "debug")]
    pub fn to_dfs_table(&self) -> PolynomialDfsTable<F> {
        let rows_amount = self.rows_amount();
        PolynomialDfsTable {
            rows_amount,
            columns: Regions::build(self, move |values| {
                PolynomialDfs::from_values(rows_amount - 1, values)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PolynomialColumns;
    use crate::{AssignmentTable, TableDescription};
    use expression::{ColumnType, Variable};
    use p3::{field::PrimeCharacteristicRing, goldilocks::Goldilocks as F};
    use polynomial::EvaluationDomain;

    fn table() -> AssignmentTable<F> {
        let mut table = AssignmentTable::new(&TableDescription::new(1, 0, 1, 0, 4));
        for row in 0..4 {
            table.set_witness(0, row, F::from_u64(row as u64 * 3 + 1));
            table.set_constant(0, row, F::from_u64(7));
        }
        table
    }

    #[test]
    fn test_polynomial_table_matches_cells() {
        let table = table();
        let domain = EvaluationDomain::new(4);
        let polys = table.to_polynomial_table(&domain);
        let prev = Variable::witness(0, -1);
        let rotated = polys.variable_value(&prev);
        for row in 0..4 {
            assert_eq!(rotated.evaluate(domain.element(row)), table.resolve(&prev, row));
        }
        assert_eq!(
            polys.column(ColumnType::Constant, 0).degree(),
            0,
            "constant column interpolates to a constant"
        );
    }

    #[test]
    fn test_dfs_table_matches_cells() {
        let table = table();
        let dfs = table.to_dfs_table();
        let next = Variable::witness(0, 1);
        let rotated = dfs.variable_value(&next);
        for row in 0..4 {
            assert_eq!(rotated.values()[row], table.resolve(&next, row));
        }
        assert_eq!(
            dfs.variable_value_without_rotation(&next).values(),
            table.column(ColumnType::Witness, 0).as_slice()
        );
        assert_eq!(dfs.rows_amount(), 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_missing_column_panics() {
        table().to_dfs_table().column(ColumnType::PublicInput, 0);
    }
}
