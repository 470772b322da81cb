//! Components built on the gate registry. Each one occupies a fixed number
//! of rows and reads its inputs through copy constraints.

pub mod bit_decomposition;
pub mod boolean_ops;
pub mod field_ops;
pub mod range_check;
pub mod unified_addition;

pub use bit_decomposition::{BitComposition, BitDecomposition, BitsOrder};
pub use boolean_ops::{
    And, BooleanOp, BooleanOperation, LogicAnd, LogicNand, LogicNor, LogicNot, LogicOr,
    LogicSelect, LogicXor, Nand, Nor, Not, Or, Select, Xor,
};
pub use field_ops::{
    AddOp, Addition, BinaryInput, BinaryOperation, DivOp, DivOrZeroOp, Division, DivisionOrZero,
    FieldOperation, MulByConstant, MulOp, Multiplication, SubOp, Subtraction,
};
pub use range_check::RangeCheck;
pub use unified_addition::{CurvePoint, UnifiedAddition, UnifiedAdditionInput, add_points};
