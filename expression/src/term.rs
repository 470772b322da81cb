use std::{
    collections::BTreeMap,
    hash::{Hash, Hasher},
    ops::{Mul, Neg},
};

use ff_ext::BlueprintField;
use p3::field::PrimeCharacteristicRing;
use serde::{Deserialize, Serialize};

use crate::{Expression, Variable, hash_of};

/// A monomial `coeff * v_1 * ... * v_k`. Repeated variables are powers.
///
/// Variables are kept sorted, so two terms over the same multiset compare
/// equal whatever order they were built in. A zero coefficient collapses
/// the term to the canonical zero term with no variables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "", from = "TermRepr<F>", into = "TermRepr<F>")]
pub struct Term<F: BlueprintField> {
    coeff: F,
    vars: Vec<Variable>,
    hash: u64,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(bound = "")]
struct TermRepr<F: BlueprintField> {
    coeff: F,
    vars: Vec<Variable>,
}

impl<F: BlueprintField> Term<F> {
    pub fn new(mut vars: Vec<Variable>, coeff: F) -> Self {
        if coeff == F::ZERO {
            vars.clear();
        }
        vars.sort_unstable();
        let hash = hash_of(&(coeff, &vars));
        Self { coeff, vars, hash }
    }

    pub fn zero() -> Self {
        Self::new(vec![], F::ZERO)
    }

    pub fn constant(coeff: F) -> Self {
        Self::new(vec![], coeff)
    }

    pub fn coeff(&self) -> F {
        self.coeff
    }

    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn is_zero(&self) -> bool {
        self.coeff == F::ZERO
    }

    pub fn is_constant(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.vars.len()
    }

    pub(crate) fn cached_hash(&self) -> u64 {
        self.hash
    }

    /// Variable to multiplicity.
    pub fn to_multiset(&self) -> BTreeMap<Variable, usize> {
        self.vars.iter().fold(BTreeMap::new(), |mut acc, var| {
            *acc.entry(*var).or_default() += 1;
            acc
        })
    }

    pub fn pow(&self, power: u32) -> Expression<F> {
        Expression::from(self.clone()).pow(power)
    }

    pub fn map_variables(&self, f: &impl Fn(&Variable) -> Variable) -> Self {
        Self::new(self.vars.iter().map(f).collect(), self.coeff)
    }
}

impl<F: BlueprintField> Default for Term<F> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: BlueprintField> PartialEq for Term<F> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.coeff == other.coeff && self.vars == other.vars
    }
}

impl<F: BlueprintField> Eq for Term<F> {}

impl<F: BlueprintField> Hash for Term<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<F: BlueprintField> From<Variable> for Term<F> {
    fn from(var: Variable) -> Self {
        Self::new(vec![var], F::ONE)
    }
}

impl<F: BlueprintField> From<TermRepr<F>> for Term<F> {
    fn from(repr: TermRepr<F>) -> Self {
        Self::new(repr.vars, repr.coeff)
    }
}

impl<F: BlueprintField> From<Term<F>> for TermRepr<F> {
    fn from(term: Term<F>) -> Self {
        TermRepr {
            coeff: term.coeff,
            vars: term.vars,
        }
    }
}

impl<F: BlueprintField> Mul<&Term<F>> for &Term<F> {
    type Output = Term<F>;

    fn mul(self, rhs: &Term<F>) -> Term<F> {
        if self.is_zero() || rhs.is_zero() {
            return Term::zero();
        }
        let vars = self.vars.iter().chain(rhs.vars.iter()).copied().collect();
        Term::new(vars, self.coeff * rhs.coeff)
    }
}

impl<F: BlueprintField> Mul<Term<F>> for Term<F> {
    type Output = Term<F>;

    fn mul(self, rhs: Term<F>) -> Term<F> {
        &self * &rhs
    }
}

impl<F: BlueprintField> Mul<Variable> for Term<F> {
    type Output = Term<F>;

    fn mul(self, rhs: Variable) -> Term<F> {
        &self * &Term::from(rhs)
    }
}

impl<F: BlueprintField> Mul<F> for Term<F> {
    type Output = Term<F>;

    fn mul(self, rhs: F) -> Term<F> {
        Term::new(self.vars, self.coeff * rhs)
    }
}

impl<F: BlueprintField> Neg for Term<F> {
    type Output = Term<F>;

    fn neg(self) -> Term<F> {
        Term::new(self.vars, -self.coeff)
    }
}

impl<F: BlueprintField> Neg for &Term<F> {
    type Output = Term<F>;

    fn neg(self) -> Term<F> {
        -self.clone()
    }
}
