//! The D-space: the basis of `ker J` dual to P under the differential pairing.
//!
//! D is unique, so every routine here computes the same answer. Per degree
//! `d` the kernel `K_d = {q ∈ Π_d : j(∂) q = 0 for all j ∈ J}` is computed
//! once, checked to have exactly as many elements as P has in degree `d`,
//! and paired against P. The strategies build their candidates in their own
//! way and are checked against these kernels.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::iter;

use feanor_math::divisibility::DivisibilityRingStore;
use feanor_math::ring::*;
use tracing::{debug, trace};

use super::PolyMap;
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;
use crate::linalg::{inverse, null_space, solve, Matrix};
use crate::matroid::{flat_normal, ElementSet, MatroidOracle, OrderConvention, OrderedMatroid, VectorMatroid};
use crate::poly::{MonomialBasis, PolyRing, Polynomial};

/// `ker J` in one degree, with the inverse of its pairing matrix against P.
pub struct DegreeKernel<K: ExactField> {
    degree: usize,
    keys: Vec<ElementSet>,
    basis: Vec<Polynomial<K>>,
    // inverse of G[a][b] = <P[keys[a]] | basis[b]>
    gram_inv: Matrix<K>,
}

impl<K: ExactField> DegreeKernel<K> {
    /// The degree
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// P keys of this degree
    pub fn keys(&self) -> &[ElementSet] {
        &self.keys
    }

    /// A basis of the kernel
    pub fn basis(&self) -> &[Polynomial<K>] {
        &self.basis
    }

    /// The element of the kernel dual to `P[key]`, `None` if `key` has another degree
    pub fn dual_of(&self, ring: &PolyRing<K>, key: &ElementSet) -> Option<Polynomial<K>> {
        let c = self.keys.iter().position(|k| k == key)?;
        let refs: Vec<&Polynomial<K>> = self.basis.iter().collect();
        Some(ring.combination(&self.gram_inv.column(c), &refs))
    }

    /// The element of the kernel with the same pairings against P as `poly`
    pub fn project(&self, ring: &PolyRing<K>, p: &PolyMap<K>, poly: &Polynomial<K>) -> Polynomial<K> {
        let rhs: Vec<El<K>> = self
            .keys
            .iter()
            .map(|k| match p.get(k) {
                Some(pk) => ring.bilinear_form(pk, poly),
                None => ring.field().zero(),
            })
            .collect();
        let coeffs = self.gram_inv.mul_vec(&rhs);
        let refs: Vec<&Polynomial<K>> = self.basis.iter().collect();
        ring.combination(&coeffs, &refs)
    }

    /// Whether `q` pairs to zero with every other P element of this degree
    /// and to a unit with `P[key]`
    fn pairs_diagonally(&self, ring: &PolyRing<K>, p: &PolyMap<K>, key: &ElementSet, q: &Polynomial<K>) -> bool {
        let field = ring.field();
        self.keys.iter().all(|k| {
            let v = ring.bilinear_form(&p[k], q);
            if k == key {
                !field.is_zero(&v)
            } else {
                field.is_zero(&v)
            }
        })
    }
}

/// Basis of `{q ∈ Π_d : j(∂) q = 0 for every j in j_gens}`.
///
/// Every generator of degree `e <= d` contributes the matrix of
/// `j(∂): Π_d -> Π_{d-e}` in monomial coordinates; the kernel is the null
/// space of the stacked matrices.
pub fn kernel_space<K: ExactField>(ring: &PolyRing<K>, j_gens: &[Polynomial<K>], degree: usize) -> Vec<Polynomial<K>> {
    let field = ring.field();
    let source = MonomialBasis::of_degree(ring.nvars(), degree);
    let mut rows: Vec<Vec<El<K>>> = Vec::new();
    for j in j_gens {
        let e = match ring.degree(j) {
            Some(e) if e <= degree => e,
            _ => continue,
        };
        let target = MonomialBasis::of_degree(ring.nvars(), degree - e);
        let images: Vec<Vec<El<K>>> = source
            .monomials()
            .iter()
            .map(|m| {
                let monomial = ring.from_pairs(iter::once((field.one(), m.clone())));
                ring.coordinates(&ring.differentiate(j, &monomial), &target)
            })
            .collect();
        rows.extend((0..target.len()).map(|t| images.iter().map(|img| field.clone_el(&img[t])).collect()));
    }
    null_space(field, &rows, source.len())
        .iter()
        .map(|v| ring.from_coordinates(v, &source))
        .collect()
}

/// Whether every generator annihilates `q`
pub fn in_kernel<K: ExactField>(ring: &PolyRing<K>, j_gens: &[Polynomial<K>], q: &Polynomial<K>) -> bool {
    j_gens.iter().all(|j| ring.is_zero(&ring.differentiate(j, q)))
}

/// Reject fields whose characteristic `p` satisfies `0 < p <= max deg P`.
pub fn check_field<K: ExactField>(ring: &PolyRing<K>, p: &PolyMap<K>) -> Result<()> {
    match p.values().filter_map(|q| ring.degree(q)).max() {
        Some(max_degree) => ring.field().check_degree(max_degree),
        None => Ok(()),
    }
}

/// P keys grouped by the degree of their polynomial
fn keys_by_degree<K: ExactField>(ring: &PolyRing<K>, p: &PolyMap<K>) -> BTreeMap<usize, Vec<ElementSet>> {
    let mut out: BTreeMap<usize, Vec<ElementSet>> = BTreeMap::new();
    for (key, poly) in p {
        out.entry(ring.degree(poly).unwrap_or(0)).or_default().push(key.clone());
    }
    out
}

/// Kernels of J in every degree of P, each paired non-degenerately against P.
///
/// Fails with [`ZonotopalError::DimensionMismatch`] when a kernel has the
/// wrong size (including a nonzero kernel just above the top degree of P)
/// and with [`ZonotopalError::SingularPairing`] when a pairing matrix is singular.
pub fn degree_kernels<K: ExactField>(
    ring: &PolyRing<K>,
    j_gens: &[Polynomial<K>],
    p: &PolyMap<K>,
) -> Result<BTreeMap<usize, DegreeKernel<K>>> {
    let mut kernels = BTreeMap::new();
    let grouped = keys_by_degree(ring, p);
    for (&degree, keys) in &grouped {
        let basis = kernel_space(ring, j_gens, degree);
        if basis.len() != keys.len() {
            return Err(ZonotopalError::DimensionMismatch {
                degree,
                kernel: basis.len(),
                expected: keys.len(),
            });
        }
        let gram_rows: Vec<Vec<El<K>>> = keys
            .iter()
            .map(|k| basis.iter().map(|b| ring.bilinear_form(&p[k], b)).collect())
            .collect();
        let gram = Matrix::from_rows(ring.field().clone(), gram_rows)?;
        let gram_inv = inverse(&gram).ok_or(ZonotopalError::SingularPairing { degree })?;
        trace!(degree, dimension = basis.len(), "kernel of J");
        kernels.insert(
            degree,
            DegreeKernel {
                degree,
                keys: keys.clone(),
                basis,
                gram_inv,
            },
        );
    }

    let above = grouped.keys().next_back().map_or(0, |d| d + 1);
    let extra = kernel_space(ring, j_gens, above);
    if !extra.is_empty() {
        return Err(ZonotopalError::DimensionMismatch {
            degree: above,
            kernel: extra.len(),
            expected: 0,
        });
    }
    Ok(kernels)
}

/// D read off directly from the kernels: `D[key] = sum_b K_b (G⁻¹)[b][key]`
pub fn kernel_dual<K: ExactField>(ring: &PolyRing<K>, kernels: &BTreeMap<usize, DegreeKernel<K>>) -> PolyMap<K> {
    let mut d = PolyMap::new();
    for kernel in kernels.values() {
        for key in &kernel.keys {
            if let Some(q) = kernel.dual_of(ring, key) {
                d.insert(key.clone(), q);
            }
        }
    }
    d
}

/// Global dual followed by pairwise projection.
///
/// Starts from the dual basis of P inside its own span and subtracts
/// `(<j|q> / <j|i>) i` for each (I generator, J generator) pair in `pairs`
/// until a full sweep changes nothing. I annihilates P, so the pairings
/// with P are preserved. An element that ends up outside `ker J`, or no
/// longer dual to P, is replaced by its exact counterpart in the kernel.
pub fn global_dual<K: ExactField>(
    ring: &PolyRing<K>,
    p: &PolyMap<K>,
    pairs: &[(&Polynomial<K>, &Polynomial<K>)],
    j_gens: &[Polynomial<K>],
    kernels: &BTreeMap<usize, DegreeKernel<K>>,
) -> Result<PolyMap<K>> {
    let field = ring.field();
    let polys: Vec<&Polynomial<K>> = p.values().collect();
    let internal = match ring.dual_basis(&polys) {
        Ok(q) => q,
        Err(ZonotopalError::SingularPairing { degree }) => {
            debug!(degree, "dual basis of P in its span is singular, using kernel duals");
            return Ok(kernel_dual(ring, kernels));
        }
        Err(e) => return Err(e),
    };

    let mut d = PolyMap::new();
    for ((key, pk), mut q) in p.iter().zip(internal) {
        for _ in 0..=pairs.len() {
            let mut changed = false;
            for &(i, j) in pairs {
                let a = ring.bilinear_form(j, &q);
                if field.is_zero(&a) {
                    continue;
                }
                if let Some(c) = field.checked_div(&a, &ring.bilinear_form(j, i)) {
                    q = ring.add_scaled(&q, i, &field.negate(c));
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        let degree = ring.degree(pk).unwrap_or(0);
        let kernel = kernels
            .get(&degree)
            .ok_or(ZonotopalError::SingularPairing { degree })?;
        let is_dual = kernel.keys.iter().all(|k| {
            let v = ring.bilinear_form(&p[k], &q);
            if k == key {
                field.is_one(&v)
            } else {
                field.is_zero(&v)
            }
        });
        if !is_dual || !in_kernel(ring, j_gens, &q) {
            debug!(?key, "projection did not reach ker J, using the kernel dual");
            q = kernel
                .dual_of(ring, key)
                .ok_or(ZonotopalError::SingularPairing { degree })?;
        }
        d.insert(key.clone(), q);
    }
    Ok(d)
}

/// Every order-prefix of every key of `p`, sorted by size and then by the
/// positions of their elements in the ground order.
fn prefix_closed_sets<M: MatroidOracle>(ordered: &OrderedMatroid<M>, keys: impl Iterator<Item = ElementSet>) -> Vec<ElementSet> {
    let mut sets: BTreeSet<ElementSet> = BTreeSet::new();
    for key in keys {
        let mut s = key;
        while sets.insert(s.clone()) {
            match ordered.max_element(&s) {
                Some(x) => {
                    s.remove(&x);
                }
                None => break,
            }
        }
    }
    let mut sorted: Vec<ElementSet> = sets.into_iter().collect();
    sorted.sort_by_cached_key(|s| {
        let mut positions: Vec<usize> = s.iter().map(|&e| ordered.position(e)).collect();
        positions.sort_unstable();
        (s.len(), positions)
    });
    sorted
}

/// Coefficients `c` with `sum_k c_k images[k] = residue`, all homogeneous of one degree.
fn decompose<K: ExactField>(ring: &PolyRing<K>, residue: &Polynomial<K>, images: &[Polynomial<K>]) -> Option<Vec<El<K>>> {
    let degree = ring.degree(residue)?;
    if images.is_empty() {
        return None;
    }
    let basis = MonomialBasis::of_degree(ring.nvars(), degree);
    let columns: Vec<Vec<El<K>>> = images.iter().map(|q| ring.coordinates(q, &basis)).collect();
    let a = Matrix::from_columns(ring.field().clone(), basis.len(), &columns).ok()?;
    solve(&a, &ring.coordinates(residue, &basis))
}

/// Forward pass of the lattice extension: one candidate per independent set
/// on a prefix chain of a key of `p`.
///
/// Sets are visited by increasing size, so the prefix `S₀ = S - {x}` of a set
/// `S` (`x` its largest element) is always done first. Starting from `1` on
/// the empty set, the candidate of `S` is the candidate of `S₀` times the
/// normal separating `cl(S₀)` from `cl(S)`, raised to reach the degree of
/// `P[S]` (or `|cl(S) - cl(S₀)| - 1` more than `S₀` off the keys). The
/// generalized J generator of the step is the product over `cl(S) - cl(S₀)`.
/// When it does not kill the candidate, its derivative is decomposed against
/// the derivatives of the earlier candidates lying in the external-order
/// interval from `S₀` to the dominant basis of `cl(S₀)`, and the matching
/// combination is subtracted.
pub fn lattice_table<K: ExactField>(
    ring: &PolyRing<K>,
    ordered: &OrderedMatroid<VectorMatroid<K>>,
    p: &PolyMap<K>,
) -> Result<PolyMap<K>> {
    let field = ring.field();
    let matroid = ordered.matroid();
    let mut table: PolyMap<K> = PolyMap::new();

    for set in prefix_closed_sets(ordered, p.keys().cloned()) {
        let x = match ordered.max_element(&set) {
            Some(x) => x,
            None => {
                table.insert(set, ring.one());
                continue;
            }
        };
        let mut prefix = set.clone();
        prefix.remove(&x);
        let d0 = table
            .get(&prefix)
            .ok_or_else(|| ZonotopalError::NotIndependent(prefix.iter().copied().collect()))?;

        let lower = matroid.closure(&prefix);
        let upper = matroid.closure(&set);
        let relative: ElementSet = upper.difference(&lower).copied().collect();
        let base_degree = ring.degree(d0).unwrap_or(0);
        let target = match p.get(&set) {
            Some(pk) => ring.degree(pk).unwrap_or(0),
            None => base_degree + relative.len().saturating_sub(1),
        };
        let mut candidate = if target >= base_degree {
            let normal = flat_normal(matroid, &lower, &upper)?;
            ring.mul(d0, &ring.pow(&ring.linear_form(&normal), target - base_degree))
        } else {
            let op = ring.pow(&ring.linear_form(matroid.column(x)), base_degree - target);
            ring.differentiate(&op, d0)
        };

        let generator = ring.pure_tensor(relative.iter().map(|&e| matroid.column(e)));
        let residue = ring.differentiate(&generator, &candidate);
        if !ring.is_zero(&residue) {
            let top = ordered.dominant_basis(&lower);
            let at_most = |a: &ElementSet, b: &ElementSet| {
                matches!(
                    ordered.external_order(a, b, OrderConvention::ConvexGeometry),
                    Some(Ordering::Less) | Some(Ordering::Equal)
                )
            };
            let interval: Vec<ElementSet> = table
                .iter()
                .filter(|(j, q)| ring.degree(q) == Some(target) && at_most(&prefix, j) && at_most(j, &top))
                .map(|(j, _)| j.clone())
                .collect();
            let images: Vec<Polynomial<K>> = interval
                .iter()
                .map(|j| ring.differentiate(&generator, &table[j]))
                .collect();
            match decompose(ring, &residue, &images) {
                Some(coeffs) => {
                    for (c, j) in coeffs.into_iter().zip(&interval) {
                        candidate = ring.add_scaled(&candidate, &table[j], &field.negate(c));
                    }
                }
                None => trace!(?set, "derivative outside the span of earlier candidates"),
            }
        }
        table.insert(set, candidate);
    }
    Ok(table)
}

/// Biorthogonal extension along chains of independent sets.
///
/// Runs [`lattice_table`], then rescales every candidate by the reciprocal of
/// its pairing with its own P element. A candidate that leaves `ker J` or
/// pairs with another P element of its degree is replaced by the kernel dual.
pub fn lattice_extension<K: ExactField>(
    ring: &PolyRing<K>,
    ordered: &OrderedMatroid<VectorMatroid<K>>,
    p: &PolyMap<K>,
    j_gens: &[Polynomial<K>],
    kernels: &BTreeMap<usize, DegreeKernel<K>>,
) -> Result<PolyMap<K>> {
    let field = ring.field();
    let mut table = lattice_table(ring, ordered, p)?;
    let mut replaced = 0usize;
    let mut d = PolyMap::new();
    for (key, pk) in p {
        let degree = ring.degree(pk).unwrap_or(0);
        let kernel = kernels
            .get(&degree)
            .ok_or(ZonotopalError::SingularPairing { degree })?;
        let candidate = table
            .remove(key)
            .ok_or_else(|| ZonotopalError::NotIndependent(key.iter().copied().collect()))?;
        let accepted = if kernel.pairs_diagonally(ring, p, key, &candidate) && in_kernel(ring, j_gens, &candidate) {
            field
                .invert(&ring.bilinear_form(pk, &candidate))
                .map(|inv| ring.scale(&candidate, &inv))
        } else {
            None
        };
        let q = match accepted {
            Some(q) => q,
            None => {
                replaced += 1;
                trace!(?key, "lattice candidate rejected, using the kernel dual");
                kernel
                    .dual_of(ring, key)
                    .ok_or(ZonotopalError::SingularPairing { degree })?
            }
        };
        d.insert(key.clone(), q);
    }
    debug!(keys = p.len(), replaced, "lattice extension");
    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matroid::GroundOrder;
    use crate::rational::{fraction, rational_field, QQField};

    fn set(xs: &[usize]) -> ElementSet {
        xs.iter().copied().collect()
    }

    fn ring() -> PolyRing<QQField> {
        PolyRing::with_names(rational_field(), vec!["x".into(), "y".into()])
    }

    #[test]
    fn test_kernel_space_of_coordinate_products() {
        // J = <x, y>: only constants survive
        let r = ring();
        let j = vec![r.variable(0), r.variable(1)];
        let constants = kernel_space(&r, &j, 0);
        assert_eq!(constants.len(), 1);
        assert_eq!(r.degree(&constants[0]), Some(0));
        assert!(kernel_space(&r, &j, 1).is_empty());

        // J = <x^2>: polynomials at most linear in x
        let j = vec![r.pow(&r.variable(0), 2)];
        assert_eq!(kernel_space(&r, &j, 1).len(), 2);
        assert_eq!(kernel_space(&r, &j, 3).len(), 2);
        assert!(kernel_space(&r, &j, 3).iter().all(|q| in_kernel(&r, &j, q)));
    }

    #[test]
    fn test_degree_kernels_and_duals() {
        // P = {1, 2x} against J = <x^2, y>
        let r = ring();
        let q = r.field().clone();
        let j = vec![r.pow(&r.variable(0), 2), r.variable(1)];
        let two_x = r.scale(&r.variable(0), &q.from_i64(2));
        let p: PolyMap<_> = [(set(&[]), r.one()), (set(&[0]), two_x)].into_iter().collect();

        let kernels = degree_kernels(&r, &j, &p).unwrap();
        assert_eq!(kernels.len(), 2);
        let d = kernel_dual(&r, &kernels);
        assert!(r.eq(&d[&set(&[])], &r.one()));
        let half_x = r.scale(&r.variable(0), &fraction(&q, 1, 2).unwrap());
        assert!(r.eq(&d[&set(&[0])], &half_x));

        let projected = kernels[&1].project(&r, &p, &r.add(&r.variable(0), &r.variable(1)));
        assert!(r.eq(&projected, &r.variable(0)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let r = ring();
        let j = vec![r.pow(&r.variable(0), 2)];
        let p: PolyMap<_> = [(set(&[]), r.one())].into_iter().collect();
        // ker <x^2> is infinite dimensional
        assert!(matches!(
            degree_kernels(&r, &j, &p),
            Err(ZonotopalError::DimensionMismatch {
                degree: 1,
                kernel: 2,
                expected: 0
            })
        ));
    }

    #[test]
    fn test_singular_pairing() {
        // in degree 1 the kernel is spanned by x, which pairs to zero with y
        let r = ring();
        let x = r.variable(0);
        let y = r.variable(1);
        let j = vec![r.pow(&x, 2), r.pow(&y, 2), r.mul(&x, &y), r.clone_poly(&y)];
        let p: PolyMap<_> = [(set(&[]), r.one()), (set(&[1]), y)].into_iter().collect();
        assert!(matches!(
            degree_kernels(&r, &j, &p),
            Err(ZonotopalError::SingularPairing { degree: 1 })
        ));
    }

    fn coordinate_axes() -> OrderedMatroid<VectorMatroid<QQField>> {
        let q = rational_field();
        let m = VectorMatroid::new(&Matrix::from_i64_rows(&q, &[vec![1, 0], vec![0, 1]]).unwrap());
        OrderedMatroid::new(m, &GroundOrder::Natural).unwrap()
    }

    #[test]
    fn test_lattice_table_follows_prefix_chains() {
        let r = ring();
        let om = coordinate_axes();
        let x = r.variable(0);
        let y = r.variable(1);
        // only the degrees of P steer the table
        let p: PolyMap<_> = [
            (set(&[]), r.one()),
            (set(&[0]), r.clone_poly(&x)),
            (set(&[0, 1]), r.mul(&x, &y)),
        ]
        .into_iter()
        .collect();
        let table = lattice_table(&r, &om, &p).unwrap();
        assert_eq!(table.len(), 3);
        assert!(r.eq(&table[&set(&[])], &r.one()));
        // 1 times the normal of cl({0}) inside the empty flat
        assert!(r.eq(&table[&set(&[0])], &x));
        // x times the normal separating cl({0}) from cl({0, 1})
        assert!(r.eq(&table[&set(&[0, 1])], &r.mul(&x, &y)));
    }

    #[test]
    fn test_lattice_table_fills_missing_prefixes() {
        let r = ring();
        let om = coordinate_axes();
        // {1} is the only key; its prefix {} is added to the table
        let p: PolyMap<_> = [(set(&[1]), r.variable(1))].into_iter().collect();
        let table = lattice_table(&r, &om, &p).unwrap();
        assert_eq!(table.keys().cloned().collect::<Vec<_>>(), vec![set(&[]), set(&[1])]);
        assert!(r.eq(&table[&set(&[1])], &r.variable(1)));
    }

    #[test]
    fn test_lattice_extension_agrees_with_kernel_dual() {
        // ker <x^2, y^2> is spanned by 1, x, y, xy
        let r = ring();
        let om = coordinate_axes();
        let x = r.variable(0);
        let y = r.variable(1);
        let j = vec![r.pow(&x, 2), r.pow(&y, 2)];
        let p: PolyMap<_> = [
            (set(&[]), r.one()),
            (set(&[0]), r.clone_poly(&x)),
            (set(&[1]), r.clone_poly(&y)),
            (set(&[0, 1]), r.mul(&x, &y)),
        ]
        .into_iter()
        .collect();
        let kernels = degree_kernels(&r, &j, &p).unwrap();
        let lattice = lattice_extension(&r, &om, &p, &j, &kernels).unwrap();
        let reference = kernel_dual(&r, &kernels);
        assert_eq!(lattice.len(), 4);
        for (key, q) in &lattice {
            assert!(r.eq(q, &reference[key]), "{:?}: {}", key, r.format(q));
        }
        assert!(r.eq(&lattice[&set(&[0, 1])], &r.mul(&x, &y)));
    }
}
