use assignment::AssignmentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    #[error("{component} needs {required} {region} columns, layout has {available}")]
    InvalidLayout {
        component: &'static str,
        region: &'static str,
        required: usize,
        available: usize,
    },
    #[error("invalid input for {component}: {reason}")]
    InvalidInput {
        component: &'static str,
        reason: String,
    },
}
