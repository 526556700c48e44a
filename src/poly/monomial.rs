//! Exponent vectors and the finite monomial bases used for coordinates.
//!
//! The polynomial ring stores its monomials in its own packed form; this
//! module works on the expanded exponent vectors (`expand_monomial`) so they
//! can key maps and index coordinate vectors.

use std::cmp::Ordering;
use std::collections::HashMap;

use feanor_math::ring::*;

use crate::field_wrapper::ExactField;

/// A monomial `x^α`, stored as its exponent vector `α`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial(Vec<usize>);

impl Monomial {
    /// Monomial with the given exponents
    pub fn new(exponents: Vec<usize>) -> Self {
        Monomial(exponents)
    }

    /// The constant monomial `1` in `nvars` variables
    pub fn one(nvars: usize) -> Self {
        Monomial(vec![0; nvars])
    }

    /// The variable `x_i` in `nvars` variables
    pub fn variable(nvars: usize, i: usize) -> Self {
        let mut exps = vec![0; nvars];
        exps[i] = 1;
        Monomial(exps)
    }

    /// Exponent vector
    pub fn exponents(&self) -> &[usize] {
        &self.0
    }

    /// Number of variables
    pub fn nvars(&self) -> usize {
        self.0.len()
    }

    /// Total degree `|α|`
    pub fn degree(&self) -> usize {
        self.0.iter().sum()
    }

    /// `x^β / x^α` when `α <= β` componentwise
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.0
            .iter()
            .zip(&divisor.0)
            .map(|(&b, &a)| b.checked_sub(a))
            .collect::<Option<Vec<_>>>()
            .map(Monomial)
    }

    /// `α! = ∏ αᵢ!`, the squared norm of `x^α` under the pairing
    pub fn factorial_weight<K: ExactField>(&self, field: &K) -> El<K> {
        let mut acc = field.one();
        for &e in &self.0 {
            field.mul_assign(&mut acc, field.factorial(e));
        }
        acc
    }

    /// `∂^α x^β = (β! / (β-α)!) x^(β-α)`; `None` when the result vanishes identically
    pub fn derivative_of<K: ExactField>(&self, field: &K, target: &Self) -> Option<(El<K>, Self)> {
        let quotient = target.checked_div(self)?;
        let mut coeff = field.one();
        for (&b, &a) in target.0.iter().zip(&self.0) {
            field.mul_assign(&mut coeff, field.falling_factorial(b, a));
        }
        Some((coeff, quotient))
    }

    /// Graded order: lower degree first, then lexicographic on exponents
    pub fn graded_cmp(&self, other: &Self) -> Ordering {
        self.degree()
            .cmp(&other.degree())
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// All monomials of total degree `d` in `nvars` variables, first exponent descending.
pub fn monomials_of_degree(nvars: usize, d: usize) -> Vec<Monomial> {
    let mut out = Vec::new();
    let mut current = vec![0usize; nvars];
    fill_monomials(&mut out, &mut current, 0, d);
    out
}

fn fill_monomials(out: &mut Vec<Monomial>, current: &mut Vec<usize>, var: usize, remaining: usize) {
    if current.is_empty() {
        if remaining == 0 {
            out.push(Monomial(Vec::new()));
        }
        return;
    }
    if var + 1 == current.len() {
        current[var] = remaining;
        out.push(Monomial(current.clone()));
        current[var] = 0;
        return;
    }
    for e in (0..=remaining).rev() {
        current[var] = e;
        fill_monomials(out, current, var + 1, remaining - e);
    }
    current[var] = 0;
}

/// All monomials of degree at most `d`, grouped by increasing degree.
pub fn monomials_up_to_degree(nvars: usize, d: usize) -> Vec<Monomial> {
    (0..=d).flat_map(|k| monomials_of_degree(nvars, k)).collect()
}

/// A finite monomial basis with an index lookup, used to move between
/// polynomials and coordinate vectors.
#[derive(Debug, Clone)]
pub struct MonomialBasis {
    monomials: Vec<Monomial>,
    index: HashMap<Monomial, usize>,
}

impl MonomialBasis {
    /// Basis from an explicit list of distinct monomials
    pub fn new(monomials: Vec<Monomial>) -> Self {
        let index = monomials
            .iter()
            .enumerate()
            .map(|(i, m)| (m.clone(), i))
            .collect();
        MonomialBasis { monomials, index }
    }

    /// Monomials of exactly degree `d`
    pub fn of_degree(nvars: usize, d: usize) -> Self {
        Self::new(monomials_of_degree(nvars, d))
    }

    /// Monomials of degree at most `d`
    pub fn up_to_degree(nvars: usize, d: usize) -> Self {
        Self::new(monomials_up_to_degree(nvars, d))
    }

    /// Number of monomials
    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    /// Whether the basis is empty
    pub fn is_empty(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Position of `m`, if present
    pub fn index_of(&self, m: &Monomial) -> Option<usize> {
        self.index.get(m).copied()
    }

    /// The monomials, in basis order
    pub fn monomials(&self) -> &[Monomial] {
        &self.monomials
    }
}
