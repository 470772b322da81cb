use std::marker::PhantomData;

use assignment::{AssignmentError, AssignmentTable};
use expression::Expression;
use ff_ext::BlueprintField;
use p3::field::PrimeCharacteristicRing;
use thiserror::Error;
use tracing::{error, info};

use crate::{Circuit, CopyConstraint, constraint::try_evaluate_at_row, entered_span, exit_span};

#[derive(Debug, Error)]
pub enum MockProverError<F: BlueprintField> {
    #[error(
        "gate {selector_index} constraint {constraint_index} does not vanish at row {row}: \
         {constraint} = {evaluated}"
    )]
    ConstraintNotSatisfied {
        selector_index: usize,
        constraint_index: usize,
        row: usize,
        constraint: Expression<F>,
        evaluated: F,
    },
    #[error(
        "copy constraint {} = {} violated: {first_value} != {second_value}",
        .constraint.first,
        .constraint.second
    )]
    CopyConstraintViolated {
        constraint: CopyConstraint,
        first_value: F,
        second_value: F,
    },
    #[error("gate {selector_index} at row {row}: {source}")]
    Assignment {
        selector_index: usize,
        row: usize,
        source: AssignmentError,
    },
    #[error("copy constraint {} = {}: {source}", .constraint.first, .constraint.second)]
    CopyConstraintCell {
        constraint: CopyConstraint,
        source: AssignmentError,
    },
}

/// Checks every enabled gate row and every copy constraint of a circuit
/// against an assigned table.
pub struct MockProver<F: BlueprintField> {
    _phantom: PhantomData<F>,
}

impl<F: BlueprintField> MockProver<F> {
    pub fn run(
        circuit: &Circuit<F>,
        table: &AssignmentTable<F>,
    ) -> Result<(), Vec<MockProverError<F>>> {
        let span = entered_span!("mock_prover", gates = circuit.num_gates());
        let mut errors = vec![];

        for gate in circuit.gates() {
            for row in 0..table.rows_amount() {
                if !table.selector_enabled(gate.selector_index, row) {
                    continue;
                }
                for (constraint_index, constraint) in gate.constraints.iter().enumerate() {
                    match try_evaluate_at_row(constraint, table, row) {
                        Ok(evaluated) if evaluated == F::ZERO => {}
                        Ok(evaluated) => errors.push(MockProverError::ConstraintNotSatisfied {
                            selector_index: gate.selector_index,
                            constraint_index,
                            row,
                            constraint: constraint.clone(),
                            evaluated,
                        }),
                        Err(source) => errors.push(MockProverError::Assignment {
                            selector_index: gate.selector_index,
                            row,
                            source,
                        }),
                    }
                }
            }
        }

        for constraint in circuit.copy_constraints() {
            let first = table.try_var_value(&constraint.first);
            let second = table.try_var_value(&constraint.second);
            match (first, second) {
                (Ok(first_value), Ok(second_value)) if first_value != second_value => {
                    errors.push(MockProverError::CopyConstraintViolated {
                        constraint: *constraint,
                        first_value,
                        second_value,
                    })
                }
                (Err(source), _) | (_, Err(source)) => {
                    errors.push(MockProverError::CopyConstraintCell {
                        constraint: *constraint,
                        source,
                    })
                }
                _ => {}
            }
        }
        exit_span!(span);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn assert_satisfied(circuit: &Circuit<F>, table: &AssignmentTable<F>) {
        if let Err(errors) = Self::run(circuit, table) {
            for error in &errors {
                error!("{error}");
            }
            panic!("mock prover found {} errors", errors.len());
        }
        info!("mock prover satisfied");
    }
}
