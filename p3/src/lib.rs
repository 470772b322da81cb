//! Single entry point for the Plonky3 crates, so that every crate in the
//! workspace pins the same revision through `p3.workspace = true`.

pub use p3_baby_bear as babybear;
pub use p3_dft as dft;
pub use p3_field as field;
pub use p3_goldilocks as goldilocks;
pub use p3_matrix as matrix;
pub use p3_maybe_rayon as maybe_rayon;
pub use p3_util as util;
