//! Complete addition on a short Weierstrass curve `y^2 = x^3 + b`, with
//! `(0, 0)` standing for the point at infinity.
//!
//! One row, eleven witness cells:
//!
//! | W0 | W1 | W2 | W3 | W4 | W5 | W6 | W7 | W8 | W9 | W10 |
//! |----|----|----|----|----|----|----|----|----|----|-----|
//! | P.x | P.y | Q.x | Q.y | R.x | R.y | 1/P.x | 1/Q.x | 1/(Q.x-P.x) | 1/(Q.y+P.y) | lambda |
//!
//! Inverses of zero are written as zero.

use assignment::AssignmentTable;
use expression::{Expression, ToExpr, Variable};
use ff_ext::BlueprintField;
use p3::field::{Field, PrimeCharacteristicRing};

use crate::{
    BlueprintError, Circuit, Component, ComponentLayout, ComponentVars, macros::set_witness,
};

const WITNESS_AMOUNT: usize = 11;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    pub x: Variable,
    pub y: Variable,
}

impl ComponentVars for CurvePoint {
    fn all_vars(&self) -> Vec<Variable> {
        vec![self.x, self.y]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnifiedAdditionInput {
    pub p: CurvePoint,
    pub q: CurvePoint,
}

impl ComponentVars for UnifiedAdditionInput {
    fn all_vars(&self) -> Vec<Variable> {
        vec![self.p.x, self.p.y, self.q.x, self.q.y]
    }
}

#[derive(Clone, Debug)]
pub struct UnifiedAddition {
    layout: ComponentLayout,
}

impl UnifiedAddition {
    pub fn new(layout: ComponentLayout) -> Result<Self, BlueprintError> {
        layout.check("unified_addition", WITNESS_AMOUNT, 0)?;
        Ok(Self { layout })
    }
}

fn inverse_or_zero<F: Field>(value: F) -> F {
    value.try_inverse().unwrap_or(F::ZERO)
}

/// Affine sum with `(0, 0)` as the identity.
///
/// Returns `None` for two points sharing `x` that are neither equal nor
/// opposite, which cannot both lie on the curve.
pub fn add_points<F: BlueprintField>(p: (F, F), q: (F, F)) -> Option<(F, F)> {
    let zero = (F::ZERO, F::ZERO);
    if p == zero {
        return Some(q);
    }
    if q == zero {
        return Some(p);
    }
    if p.0 == q.0 && p.1 == -q.1 {
        return Some(zero);
    }
    let lambda = if p.0 != q.0 {
        (q.1 - p.1) / (q.0 - p.0)
    } else if p.1 == q.1 {
        // p.1 != 0 here, since a point with y = 0 is its own opposite.
        F::from_u64(3) * p.0.square() / p.1.double()
    } else {
        return None;
    };
    let x = lambda.square() - p.0 - q.0;
    let y = lambda * (p.0 - x) - p.1;
    Some((x, y))
}

impl<F: BlueprintField> Component<F> for UnifiedAddition {
    type Input = UnifiedAdditionInput;
    type Output = CurvePoint;

    fn name(&self) -> &'static str {
        "unified_addition"
    }

    fn layout(&self) -> &ComponentLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        1
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &UnifiedAdditionInput,
        start_row: usize,
    ) -> Result<CurvePoint, BlueprintError> {
        let p = (
            table.try_var_value(&input.p.x)?,
            table.try_var_value(&input.p.y)?,
        );
        let q = (
            table.try_var_value(&input.q.x)?,
            table.try_var_value(&input.q.y)?,
        );
        let r = add_points(p, q).ok_or_else(|| BlueprintError::InvalidInput {
            component: "unified_addition",
            reason: format!("points with x = {} are neither equal nor opposite", p.0),
        })?;

        let (inv_dx, inv_sum_y, lambda) = if p.0 != q.0 {
            let inv_dx = (q.0 - p.0).inverse();
            (inv_dx, F::ZERO, (q.1 - p.1) * inv_dx)
        } else {
            let lambda = if p.1 != F::ZERO {
                F::from_u64(3) * p.0.square() / p.1.double()
            } else {
                F::ZERO
            };
            (F::ZERO, inverse_or_zero(q.1 + p.1), lambda)
        };

        let row = start_row;
        let cells = [
            p.0,
            p.1,
            q.0,
            q.1,
            r.0,
            r.1,
            inverse_or_zero(p.0),
            inverse_or_zero(q.0),
            inv_dx,
            inv_sum_y,
            lambda,
        ];
        for (i, value) in cells.into_iter().enumerate() {
            set_witness!(table, self.layout, i, row, value);
        }
        Ok(<Self as Component<F>>::result(self, start_row))
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Vec<usize> {
        let w = |i| -> Expression<F> { self.layout.w_var(i, 0).expr() };
        let (x0, y0, x1, y1, x2, y2) = (w(0), w(1), w(2), w(3), w(4), w(5));
        let lambda = w(10);
        let one = || F::ONE.expr();

        let dx = x1.clone() - &x0;
        let both_finite_distinct = x0.clone() * &x1 * &x1 - x0.clone() * &x1 * &x0;
        let both_finite_opposite = x0.clone() * &x1 * &y1 + x0.clone() * &x1 * &y0;
        let x_relation = lambda.clone() * &lambda - &x0 - &x1 - &x2;
        let y_relation = lambda.clone() * (x0.clone() - &x2) - &y0 - &y2;
        let p_finite = one() - x0.clone() * w(6);
        let q_finite = one() - x1.clone() * w(7);
        let not_inverse =
            one() - dx.clone() * w(8) - (y1.clone() + &y0) * w(9);

        let constraints = vec![
            dx.clone() * (dx.clone() * &lambda - (y1.clone() - &y0)),
            (one() - dx * w(8))
                * (F::TWO.expr() * &y0 * &lambda - F::from_u64(3).expr() * &x0 * &x0),
            both_finite_distinct.clone() * &x_relation,
            both_finite_distinct * &y_relation,
            both_finite_opposite.clone() * &x_relation,
            both_finite_opposite * &y_relation,
            p_finite.clone() * (x2.clone() - &x1),
            p_finite * (y2.clone() - &y1),
            q_finite.clone() * (x2.clone() - &x0),
            q_finite * (y2.clone() - &y0),
            not_inverse.clone() * &x2,
            not_inverse * &y2,
        ];
        vec![circuit.add_gate(constraints)]
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &UnifiedAdditionInput,
        start_row: usize,
    ) {
        for (i, var) in input.all_vars().into_iter().enumerate() {
            circuit.add_copy_constraint(var, self.layout.w_cell(i, start_row));
        }
    }

    fn result(&self, start_row: usize) -> CurvePoint {
        CurvePoint {
            x: self.layout.w_cell(4, start_row),
            y: self.layout.w_cell(5, start_row),
        }
    }
}
