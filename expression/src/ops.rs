//! Operator overloads. `+` and `*` short-circuit on the empty expression
//! (`0 + x = x`, `0 * x = 0`); `-` always builds a node.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ff_ext::BlueprintField;

use crate::{ArithmeticOperator, Expression, Term, Variable};

impl<F: BlueprintField> Add<Expression<F>> for Expression<F> {
    type Output = Expression<F>;

    fn add(self, rhs: Expression<F>) -> Expression<F> {
        if self.is_empty() {
            return rhs;
        }
        if rhs.is_empty() {
            return self;
        }
        Expression::binop(self, rhs, ArithmeticOperator::Add)
    }
}

impl<F: BlueprintField> Sub<Expression<F>> for Expression<F> {
    type Output = Expression<F>;

    fn sub(self, rhs: Expression<F>) -> Expression<F> {
        Expression::binop(self, rhs, ArithmeticOperator::Sub)
    }
}

impl<F: BlueprintField> Mul<Expression<F>> for Expression<F> {
    type Output = Expression<F>;

    fn mul(self, rhs: Expression<F>) -> Expression<F> {
        if self.is_empty() || rhs.is_empty() {
            return Expression::zero();
        }
        Expression::binop(self, rhs, ArithmeticOperator::Mult)
    }
}

impl<F: BlueprintField> Neg for Expression<F> {
    type Output = Expression<F>;

    fn neg(self) -> Expression<F> {
        Expression::zero() - self
    }
}

impl<F: BlueprintField> Neg for &Expression<F> {
    type Output = Expression<F>;

    fn neg(self) -> Expression<F> {
        -self.clone()
    }
}

macro_rules! binop_variants {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl<F: BlueprintField> $trait<&Expression<F>> for Expression<F> {
            type Output = Expression<F>;

            fn $method(self, rhs: &Expression<F>) -> Expression<F> {
                self.$method(rhs.clone())
            }
        }

        impl<F: BlueprintField> $trait<Expression<F>> for &Expression<F> {
            type Output = Expression<F>;

            fn $method(self, rhs: Expression<F>) -> Expression<F> {
                self.clone().$method(rhs)
            }
        }

        impl<F: BlueprintField> $trait<&Expression<F>> for &Expression<F> {
            type Output = Expression<F>;

            fn $method(self, rhs: &Expression<F>) -> Expression<F> {
                self.clone().$method(rhs.clone())
            }
        }

        impl<F: BlueprintField> $trait<Variable> for Expression<F> {
            type Output = Expression<F>;

            fn $method(self, rhs: Variable) -> Expression<F> {
                self.$method(Expression::from(rhs))
            }
        }

        impl<F: BlueprintField> $trait<Variable> for &Expression<F> {
            type Output = Expression<F>;

            fn $method(self, rhs: Variable) -> Expression<F> {
                self.clone().$method(Expression::from(rhs))
            }
        }

        impl<F: BlueprintField> $trait<Term<F>> for Expression<F> {
            type Output = Expression<F>;

            fn $method(self, rhs: Term<F>) -> Expression<F> {
                self.$method(Expression::from(rhs))
            }
        }

        impl<F: BlueprintField> $trait<Expression<F>> for Variable {
            type Output = Expression<F>;

            fn $method(self, rhs: Expression<F>) -> Expression<F> {
                Expression::from(self).$method(rhs)
            }
        }

        impl<F: BlueprintField> $trait<&Expression<F>> for Variable {
            type Output = Expression<F>;

            fn $method(self, rhs: &Expression<F>) -> Expression<F> {
                Expression::from(self).$method(rhs.clone())
            }
        }

        impl<F: BlueprintField> $assign_trait<Expression<F>> for Expression<F> {
            fn $assign_method(&mut self, rhs: Expression<F>) {
                let lhs = std::mem::take(self);
                *self = lhs.$method(rhs);
            }
        }

        impl<F: BlueprintField> $assign_trait<&Expression<F>> for Expression<F> {
            fn $assign_method(&mut self, rhs: &Expression<F>) {
                let lhs = std::mem::take(self);
                *self = lhs.$method(rhs.clone());
            }
        }
    };
}

binop_variants!(Add, add, AddAssign, add_assign);
binop_variants!(Sub, sub, SubAssign, sub_assign);
binop_variants!(Mul, mul, MulAssign, mul_assign);

impl<F: BlueprintField> Add<Term<F>> for Term<F> {
    type Output = Expression<F>;

    fn add(self, rhs: Term<F>) -> Expression<F> {
        Expression::from(self) + Expression::from(rhs)
    }
}

impl<F: BlueprintField> Sub<Term<F>> for Term<F> {
    type Output = Expression<F>;

    fn sub(self, rhs: Term<F>) -> Expression<F> {
        Expression::from(self) - Expression::from(rhs)
    }
}
