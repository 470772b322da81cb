use thiserror::Error;

use crate::Variable;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("no value for variable {variable} in the evaluation map")]
    MissingVariable { variable: Variable },
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("wire encoding failed: {0}")]
    Bincode(#[from] bincode::Error),
}
