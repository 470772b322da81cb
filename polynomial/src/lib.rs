#![deny(clippy::cargo)]
//! Polynomials in the two representations a constraint can be evaluated into:
//! coefficient form ([`Polynomial`]) and point-value form over a radix-2
//! subgroup ([`PolynomialDfs`]).

mod coefficient;
mod dfs;
mod domain;

pub use coefficient::Polynomial;
pub use dfs::PolynomialDfs;
pub use domain::EvaluationDomain;

/// Smallest power of two that holds `len` values, at least 1.
pub fn domain_size_for(len: usize) -> usize {
    len.max(1).next_power_of_two()
}
