//! Multivariate polynomials over an [`ExactField`], backed by feanor-math's
//! [`MultivariatePolyRingImpl`].
//!
//! Ring arithmetic is delegated to feanor-math. On top of it this module adds
//! the pieces zonotopal algebras need: linear forms and their products ("pure
//! tensors"), the action of a polynomial as a differential operator, the
//! differential bilinear form, and coordinates with respect to a finite
//! monomial basis.
//!
//! ```
//! use zonotopal_algebra::poly::PolyRing;
//! use zonotopal_algebra::{rational_field, ExactField};
//! use feanor_math::ring::*;
//!
//! let q = rational_field();
//! let ring = PolyRing::new(q.clone(), 2);
//! let x = ring.variable(0);
//! let y = ring.variable(1);
//! // <x^2 | x^2> = 2!
//! let x2 = ring.mul(&x, &x);
//! assert!(q.eq_el(&ring.bilinear_form(&x2, &x2), &q.from_i64(2)));
//! // (x + y)(∂) kills x - y
//! let op = ring.add(&x, &y);
//! assert!(ring.is_zero(&ring.differentiate(&op, &ring.sub(&x, &y))));
//! ```

pub mod monomial;

pub use monomial::{monomials_of_degree, monomials_up_to_degree, Monomial, MonomialBasis};

use std::collections::BTreeMap;

use feanor_math::homomorphism::Homomorphism;
use feanor_math::ring::*;
use feanor_math::rings::multivariate::multivariate_impl::MultivariatePolyRingImpl;
use feanor_math::rings::multivariate::MultivariatePolyRingStore;

use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;
use crate::linalg::{inverse, Matrix};

/// The feanor-math ring `K[x_0, ..., x_{n-1}]`.
pub type PolyRingValue<K> = MultivariatePolyRingImpl<K>;

/// An element of [`PolyRingValue`].
pub type Polynomial<K> = El<PolyRingValue<K>>;

/// The polynomial ring `K[x_0, ..., x_{n-1}]` together with display names
/// for its variables.
pub struct PolyRing<K: ExactField> {
    ring: PolyRingValue<K>,
    names: Vec<String>,
}

impl<K: ExactField> PolyRing<K> {
    /// Ring in `nvars` variables named `x0, x1, ...`
    pub fn new(field: K, nvars: usize) -> Self {
        let names = (0..nvars).map(|i| format!("x{}", i)).collect();
        Self::with_names(field, names)
    }

    /// Ring with explicit variable names
    pub fn with_names(field: K, names: Vec<String>) -> Self {
        PolyRing {
            ring: MultivariatePolyRingImpl::new(field, names.len()),
            names,
        }
    }

    /// The underlying feanor-math ring
    pub fn ring(&self) -> &PolyRingValue<K> {
        &self.ring
    }

    /// The coefficient field
    pub fn field(&self) -> &K {
        self.ring.base_ring()
    }

    /// Number of variables
    pub fn nvars(&self) -> usize {
        self.names.len()
    }

    /// Variable names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(exponents, coefficient)` pairs of `p`, in the ring's internal order
    pub fn terms<'a>(&'a self, p: &'a Polynomial<K>) -> Vec<(Monomial, &'a El<K>)> {
        self.ring
            .terms(p)
            .map(|(c, m)| (Monomial::new(self.ring.expand_monomial(m)), c))
            .collect()
    }

    /// Polynomial from arbitrary `(coefficient, monomial)` pairs; repeated monomials are summed
    pub fn from_pairs<I>(&self, pairs: I) -> Polynomial<K>
    where
        I: IntoIterator<Item = (El<K>, Monomial)>,
    {
        let field = self.field();
        let mut terms: BTreeMap<Monomial, El<K>> = BTreeMap::new();
        for (c, m) in pairs {
            if field.is_zero(&c) {
                continue;
            }
            match terms.get_mut(&m) {
                Some(existing) => field.add_assign(existing, c),
                None => {
                    terms.insert(m, c);
                }
            }
        }
        self.ring.from_terms(
            terms
                .into_iter()
                .filter(|(_, c)| !field.is_zero(c))
                .map(|(m, c)| (c, self.ring.create_monomial(m.exponents().iter().copied())))
                .collect::<Vec<_>>(),
        )
    }

    /// `0`
    pub fn zero(&self) -> Polynomial<K> {
        self.ring.zero()
    }

    /// `1`
    pub fn one(&self) -> Polynomial<K> {
        self.ring.one()
    }

    /// The constant `c`
    pub fn constant(&self, c: El<K>) -> Polynomial<K> {
        self.ring.inclusion().map(c)
    }

    /// The variable `x_i`
    pub fn variable(&self, i: usize) -> Polynomial<K> {
        self.from_pairs(std::iter::once((self.field().one(), Monomial::variable(self.nvars(), i))))
    }

    /// `sum_i v_i x_i`
    pub fn linear_form(&self, v: &[El<K>]) -> Polynomial<K> {
        let field = self.field();
        self.from_pairs(
            v.iter()
                .take(self.nvars())
                .enumerate()
                .map(|(i, c)| (field.clone_el(c), Monomial::variable(self.nvars(), i))),
        )
    }

    /// Product of the linear forms of the given vectors (`1` for none)
    pub fn pure_tensor<I>(&self, vectors: I) -> Polynomial<K>
    where
        I: IntoIterator,
        I::Item: AsRef<[El<K>]>,
    {
        vectors
            .into_iter()
            .fold(self.one(), |acc, v| self.ring.mul(acc, self.linear_form(v.as_ref())))
    }

    /// Copy of `p`
    pub fn clone_poly(&self, p: &Polynomial<K>) -> Polynomial<K> {
        self.ring.clone_el(p)
    }

    /// `p == q`
    pub fn eq(&self, p: &Polynomial<K>, q: &Polynomial<K>) -> bool {
        self.ring.eq_el(p, q)
    }

    /// Whether `p` is the zero polynomial
    pub fn is_zero(&self, p: &Polynomial<K>) -> bool {
        self.ring.is_zero(p)
    }

    /// `p + q`
    pub fn add(&self, p: &Polynomial<K>, q: &Polynomial<K>) -> Polynomial<K> {
        self.ring.add_ref(p, q)
    }

    /// `p - q`
    pub fn sub(&self, p: &Polynomial<K>, q: &Polynomial<K>) -> Polynomial<K> {
        self.ring.sub_ref(p, q)
    }

    /// `-p`
    pub fn neg(&self, p: &Polynomial<K>) -> Polynomial<K> {
        self.ring.negate(self.ring.clone_el(p))
    }

    /// `c p`
    pub fn scale(&self, p: &Polynomial<K>, c: &El<K>) -> Polynomial<K> {
        let mut result = self.ring.clone_el(p);
        self.ring.inclusion().mul_assign_ref_map(&mut result, c);
        result
    }

    /// `p + c q`
    pub fn add_scaled(&self, p: &Polynomial<K>, q: &Polynomial<K>, c: &El<K>) -> Polynomial<K> {
        self.ring.add(self.ring.clone_el(p), self.scale(q, c))
    }

    /// `p q`
    pub fn mul(&self, p: &Polynomial<K>, q: &Polynomial<K>) -> Polynomial<K> {
        self.ring.mul_ref(p, q)
    }

    /// `p^k`
    pub fn pow(&self, p: &Polynomial<K>, k: usize) -> Polynomial<K> {
        self.ring.pow(self.ring.clone_el(p), k)
    }

    /// Number of non-zero terms
    pub fn num_terms(&self, p: &Polynomial<K>) -> usize {
        self.ring.terms(p).count()
    }

    /// Coefficient of `m` in `p`
    pub fn coeff(&self, p: &Polynomial<K>, m: &Monomial) -> El<K> {
        let field = self.field();
        self.terms(p)
            .into_iter()
            .find(|(e, _)| e == m)
            .map_or_else(|| field.zero(), |(_, c)| field.clone_el(c))
    }

    /// Total degree, `None` for the zero polynomial
    pub fn degree(&self, p: &Polynomial<K>) -> Option<usize> {
        self.terms(p).iter().map(|(m, _)| m.degree()).max()
    }

    /// Whether all terms have the same degree (the zero polynomial is homogeneous)
    pub fn is_homogeneous(&self, p: &Polynomial<K>) -> bool {
        let terms = self.terms(p);
        let mut degrees = terms.iter().map(|(m, _)| m.degree());
        match degrees.next() {
            Some(d) => degrees.all(|e| e == d),
            None => true,
        }
    }

    /// `op(∂) p`: apply `op` to `p` with each variable read as the matching partial derivative
    pub fn differentiate(&self, op: &Polynomial<K>, p: &Polynomial<K>) -> Polynomial<K> {
        let field = self.field();
        let targets = self.terms(p);
        let mut pairs = Vec::new();
        for (a, c) in self.terms(op) {
            for (b, v) in &targets {
                if let Some((falling, m)) = a.derivative_of(field, b) {
                    let coeff = field.mul(field.mul_ref(c, v), falling);
                    pairs.push((coeff, m));
                }
            }
        }
        self.from_pairs(pairs)
    }

    /// `<p|q> = (p(∂) q)(0) = sum_α p_α q_α α!`
    pub fn bilinear_form(&self, p: &Polynomial<K>, q: &Polynomial<K>) -> El<K> {
        let field = self.field();
        let large: BTreeMap<Monomial, &El<K>> = self.terms(q).into_iter().collect();
        let mut acc = field.zero();
        for (m, a) in self.terms(p) {
            if let Some(b) = large.get(&m) {
                let w = m.factorial_weight(field);
                field.add_assign(&mut acc, field.mul(field.mul_ref(a, b), w));
            }
        }
        acc
    }

    /// Coordinate vector of `p` in `basis`; terms outside the basis are dropped
    pub fn coordinates(&self, p: &Polynomial<K>, basis: &MonomialBasis) -> Vec<El<K>> {
        let field = self.field();
        let mut coords: Vec<El<K>> = (0..basis.len()).map(|_| field.zero()).collect();
        for (m, v) in self.terms(p) {
            if let Some(i) = basis.index_of(&m) {
                coords[i] = field.clone_el(v);
            }
        }
        coords
    }

    /// Polynomial with coordinates `coords` in `basis`
    pub fn from_coordinates(&self, coords: &[El<K>], basis: &MonomialBasis) -> Polynomial<K> {
        let field = self.field();
        self.from_pairs(
            coords
                .iter()
                .zip(basis.monomials())
                .map(|(c, m)| (field.clone_el(c), m.clone())),
        )
    }

    /// `sum_k coeffs[k] * polys[k]`
    pub fn combination(&self, coeffs: &[El<K>], polys: &[&Polynomial<K>]) -> Polynomial<K> {
        coeffs
            .iter()
            .zip(polys)
            .fold(self.zero(), |acc, (c, p)| self.add_scaled(&acc, p, c))
    }

    /// Dual basis of linearly independent polynomials within their own span.
    ///
    /// Returns `q_k` in the span of `polys` with `<polys[i] | q_k> = δ_ik`,
    /// computed as `G⁻¹` applied to `polys` where `G` is their Gram matrix.
    /// Fails with [`ZonotopalError::SingularPairing`] when the Gram matrix is singular.
    pub fn dual_basis(&self, polys: &[&Polynomial<K>]) -> Result<Vec<Polynomial<K>>> {
        if polys.is_empty() {
            return Ok(Vec::new());
        }
        let field = self.field();
        let max_degree = polys.iter().filter_map(|p| self.degree(p)).max().unwrap_or(0);
        let gram_rows = polys
            .iter()
            .map(|a| polys.iter().map(|b| self.bilinear_form(a, b)).collect())
            .collect();
        let gram = Matrix::from_rows(field.clone(), gram_rows)?;
        let gram_inv = inverse(&gram).ok_or(ZonotopalError::SingularPairing { degree: max_degree })?;

        Ok((0..polys.len())
            .map(|k| self.combination(&gram_inv.column(k), polys))
            .collect())
    }

    /// Human readable form using the ring's variable names, highest degree first
    pub fn format(&self, p: &Polynomial<K>) -> String {
        let field = self.field();
        let mut terms = self.terms(p);
        if terms.is_empty() {
            return "0".to_string();
        }
        terms.sort_by(|(a, _), (b, _)| b.graded_cmp(a));

        let minus_one = field.from_i64(-1);
        let mut out = String::new();
        for (i, (m, c)) in terms.into_iter().enumerate() {
            let vars: Vec<String> = m
                .exponents()
                .iter()
                .zip(&self.names)
                .filter(|(&e, _)| e > 0)
                .map(|(&e, name)| if e == 1 { name.clone() } else { format!("{}^{}", name, e) })
                .collect();
            let body = vars.join("*");
            let term = if body.is_empty() {
                field.format(c).to_string()
            } else if field.is_one(c) {
                body
            } else if field.eq_el(c, &minus_one) {
                format!("-{}", body)
            } else {
                format!("{}*{}", field.format(c), body)
            };
            if i > 0 {
                match term.strip_prefix('-') {
                    Some(rest) => {
                        out.push_str(" - ");
                        out.push_str(rest);
                    }
                    None => {
                        out.push_str(" + ");
                        out.push_str(&term);
                    }
                }
            } else {
                out.push_str(&term);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::{fraction, rational_field, QQField};

    fn ring() -> PolyRing<QQField> {
        PolyRing::with_names(rational_field(), vec!["x".into(), "y".into()])
    }

    fn assert_polys_eq(r: &PolyRing<QQField>, actual: &[Polynomial<QQField>], expected: &[Polynomial<QQField>]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(r.eq(a, e), "{} != {}", r.format(a), r.format(e));
        }
    }

    #[test]
    fn test_linear_form_and_pure_tensor() {
        let r = ring();
        let q = r.field().clone();
        let v = vec![q.from_i64(1), q.from_i64(2)];
        assert_eq!(r.format(&r.linear_form(&v)), "x + 2*y");

        let vects = vec![
            vec![q.from_i64(1), q.from_i64(0)],
            vec![q.from_i64(0), q.from_i64(1)],
            vec![q.from_i64(1), q.from_i64(1)],
        ];
        // x * y * (x + y)
        let t = r.pure_tensor(&vects);
        assert_eq!(r.format(&t), "x^2*y + x*y^2");
        assert_eq!(r.degree(&t), Some(3));
        assert!(r.is_homogeneous(&t));
        assert!(r.eq(&r.pure_tensor(Vec::<Vec<El<QQField>>>::new()), &r.one()));
    }

    #[test]
    fn test_differentiate() {
        let r = ring();
        let q = r.field().clone();
        let x = r.variable(0);
        let y = r.variable(1);
        let x2 = r.mul(&x, &x);
        let x3 = r.mul(&x2, &x);

        assert!(r.eq(&r.differentiate(&x, &x), &r.one()));
        assert!(r.eq(&r.differentiate(&r.one(), &x3), &x3));
        assert!(r.is_zero(&r.differentiate(&y, &x)));
        assert!(r.is_zero(&r.differentiate(&r.add(&x, &y), &r.sub(&x, &y))));

        // 3x^2 applied to x^3 + x^2 y + x^2 = 18x + 6y + 6
        let op = r.scale(&x2, &q.from_i64(3));
        let target = r.add(&r.add(&x3, &r.mul(&x2, &y)), &x2);
        assert_eq!(r.format(&r.differentiate(&op, &target)), "18*x + 6*y + 6");
    }

    #[test]
    fn test_bilinear_form() {
        let r = ring();
        let q = r.field().clone();
        let x = r.variable(0);
        let y = r.variable(1);
        let x2 = r.mul(&x, &x);
        let x3y = r.mul(&r.mul(&x2, &x), &y);
        let y2 = r.mul(&y, &y);

        assert!(q.eq_el(&r.bilinear_form(&x2, &x2), &q.from_i64(2)));
        assert!(q.eq_el(&r.bilinear_form(&x3y, &x3y), &q.from_i64(6)));
        // <x + y^2 | x + 2y + y^2> = 1 + 2
        let p = r.add(&x, &y2);
        let s = r.add(&r.add(&x, &r.scale(&y, &q.from_i64(2))), &y2);
        assert!(q.eq_el(&r.bilinear_form(&p, &s), &q.from_i64(3)));
        assert!(q.eq_el(&r.bilinear_form(&s, &p), &q.from_i64(3)));
    }

    #[test]
    fn test_pow() {
        let r = ring();
        let q = r.field().clone();
        let l = r.add(&r.variable(0), &r.variable(1));
        let cube = r.pow(&l, 3);
        assert_eq!(r.num_terms(&cube), 4);
        assert!(q.eq_el(&r.coeff(&cube, &Monomial::new(vec![2, 1])), &q.from_i64(3)));
        assert!(r.eq(&r.pow(&l, 0), &r.one()));
    }

    #[test]
    fn test_dual_basis_of_linear_forms() {
        // dual of (1, x, x + y) is (1, x - y, y)
        let r = ring();
        let x = r.variable(0);
        let y = r.variable(1);
        let one = r.one();
        let xy = r.add(&x, &y);
        let dual = r.dual_basis(&[&one, &x, &xy]).unwrap();
        assert_polys_eq(&r, &dual, &[r.one(), r.sub(&x, &y), r.clone_poly(&y)]);
    }

    #[test]
    fn test_dual_basis_mixed_degrees() {
        // dual of (1, 2x - y, x^2, x^2 + xy) is (1, 2/5 x - 1/5 y, 1/2 x^2 - xy, xy)
        let r = ring();
        let q = r.field().clone();
        let x = r.variable(0);
        let y = r.variable(1);
        let x2 = r.mul(&x, &x);
        let xy = r.mul(&x, &y);
        let lin = r.sub(&r.scale(&x, &q.from_i64(2)), &y);
        let quad = r.add(&x2, &xy);
        let one = r.one();
        let dual = r.dual_basis(&[&one, &lin, &x2, &quad]).unwrap();

        let fifth = fraction(&q, 1, 5).unwrap();
        let expected_lin = r.sub(
            &r.scale(&x, &q.mul(q.from_i64(2), q.clone_el(&fifth))),
            &r.scale(&y, &fifth),
        );
        let expected_quad = r.sub(&r.scale(&x2, &fraction(&q, 1, 2).unwrap()), &xy);
        assert_polys_eq(&r, &dual, &[r.one(), expected_lin, expected_quad, r.clone_poly(&xy)]);
    }

    #[test]
    fn test_dual_basis_of_dependent_polynomials_fails() {
        let r = ring();
        let x = r.variable(0);
        let two_x = r.add(&x, &x);
        assert!(matches!(
            r.dual_basis(&[&x, &two_x]),
            Err(ZonotopalError::SingularPairing { degree: 1 })
        ));
    }

    #[test]
    fn test_coordinates_roundtrip() {
        let r = ring();
        let q = r.field().clone();
        let basis = MonomialBasis::of_degree(2, 2);
        let p = r.add(
            &r.mul(&r.variable(0), &r.variable(1)),
            &r.scale(&r.pow(&r.variable(1), 2), &q.from_i64(-4)),
        );
        let coords = r.coordinates(&p, &basis);
        assert!(crate::linalg::vec_eq(&q, &coords, &[q.zero(), q.one(), q.from_i64(-4)]));
        assert!(r.eq(&r.from_coordinates(&coords, &basis), &p));
        assert_eq!(r.format(&p), "x*y - 4*y^2");
    }
}
