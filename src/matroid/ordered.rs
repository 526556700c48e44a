//! A matroid together with a total order on its ground set.
//!
//! Everything here is a pure function of `(matroid, order)`: dominant bases,
//! active and passive elements, their duals, internal activity of bases, and
//! the external order on independent sets.

use std::cmp::Ordering;

use super::{ElementSet, MatroidOracle};
use crate::error::{Result, ZonotopalError};

/// How the ground set is ordered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroundOrder {
    /// `0 < 1 < ... < m-1`
    #[default]
    Natural,
    /// `m-1 < ... < 1 < 0`
    Reversed,
    /// Elements listed from smallest to largest
    Explicit(Vec<usize>),
}

impl GroundOrder {
    /// The order as a list of elements from smallest to largest.
    ///
    /// Fails with [`ZonotopalError::InvalidOrder`] unless it is a permutation of `0..m`.
    pub fn to_permutation(&self, m: usize) -> Result<Vec<usize>> {
        match self {
            GroundOrder::Natural => Ok((0..m).collect()),
            GroundOrder::Reversed => Ok((0..m).rev().collect()),
            GroundOrder::Explicit(order) => {
                if order.len() != m {
                    return Err(ZonotopalError::InvalidOrder(format!(
                        "order lists {} elements, ground set has {}",
                        order.len(),
                        m
                    )));
                }
                let mut seen = vec![false; m];
                for &e in order {
                    if e >= m || seen[e] {
                        return Err(ZonotopalError::InvalidOrder(format!(
                            "{:?} is not a permutation of 0..{}",
                            order, m
                        )));
                    }
                    seen[e] = true;
                }
                Ok(order.clone())
            }
        }
    }
}

/// Convention for the external order on independent sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderConvention {
    /// `S <= T` iff `passive(S) ⊇ passive(T)`; the empty set is the bottom
    #[default]
    ConvexGeometry,
    /// The reverse; the empty set is the top
    Antimatroid,
}

/// A matroid with a fixed total order on its ground set.
#[derive(Debug)]
pub struct OrderedMatroid<M: MatroidOracle> {
    matroid: M,
    order: Vec<usize>,
    position: Vec<usize>,
}

impl<M: MatroidOracle> OrderedMatroid<M> {
    /// Order `matroid` by `order`
    pub fn new(matroid: M, order: &GroundOrder) -> Result<Self> {
        let order = order.to_permutation(matroid.groundset_size())?;
        let mut position = vec![0; order.len()];
        for (i, &e) in order.iter().enumerate() {
            position[e] = i;
        }
        Ok(OrderedMatroid {
            matroid,
            order,
            position,
        })
    }

    /// The underlying unordered matroid
    pub fn matroid(&self) -> &M {
        &self.matroid
    }

    /// Ground set from smallest to largest
    pub fn groundset_order(&self) -> &[usize] {
        &self.order
    }

    /// Position of `e` in the order
    pub fn position(&self, e: usize) -> usize {
        self.position[e]
    }

    /// Compare two elements under the order
    pub fn cmp_elements(&self, a: usize, b: usize) -> Ordering {
        self.position[a].cmp(&self.position[b])
    }

    /// Elements of `s` from smallest to largest
    pub fn sort_by_order(&self, s: &ElementSet) -> Vec<usize> {
        let mut v: Vec<usize> = s.iter().copied().collect();
        v.sort_by_key(|&e| self.position[e]);
        v
    }

    /// Largest element of `s`
    pub fn max_element(&self, s: &ElementSet) -> Option<usize> {
        s.iter().copied().max_by_key(|&e| self.position[e])
    }

    /// Smallest element of `s`
    pub fn min_element(&self, s: &ElementSet) -> Option<usize> {
        s.iter().copied().min_by_key(|&e| self.position[e])
    }

    /// Lexicographically largest independent subset of `s` spanning `closure(s)`.
    ///
    /// Scans `s` from largest to smallest and keeps every element not yet spanned.
    pub fn dominant_basis(&self, s: &ElementSet) -> ElementSet {
        self.dominant_with(s, |t| self.matroid.closure(t))
    }

    /// Dual of [`dominant_basis`](Self::dominant_basis), using coclosure
    pub fn dominant_cobasis(&self, s: &ElementSet) -> ElementSet {
        self.dominant_with(s, |t| self.matroid.coclosure(t))
    }

    fn dominant_with<C>(&self, s: &ElementSet, closure: C) -> ElementSet
    where
        C: Fn(&ElementSet) -> ElementSet,
    {
        let mut independent = ElementSet::new();
        let mut spanned = closure(&independent);
        for x in self.sort_by_order(s).into_iter().rev() {
            if !spanned.contains(&x) {
                independent.insert(x);
                spanned = closure(&independent);
            }
        }
        independent
    }

    /// Active elements of an independent set.
    ///
    /// Walking the flag of flats spanned by the largest elements of `i`, the
    /// elements newly spanned at each step that are smaller than the element
    /// just added are active. Loops are always active.
    pub fn indep_activity(&self, i: &ElementSet) -> Result<ElementSet> {
        if !self.matroid.is_independent(i) {
            return Err(ZonotopalError::NotIndependent(i.iter().copied().collect()));
        }
        Ok(self.activity_with(i, self.matroid.loops(), |t| self.matroid.closure(t)))
    }

    fn activity_with<C>(&self, i: &ElementSet, mut active: ElementSet, closure: C) -> ElementSet
    where
        C: Fn(&ElementSet) -> ElementSet,
    {
        let mut prefix = ElementSet::new();
        let mut prev_flat = ElementSet::new();
        for x in self.sort_by_order(i).into_iter().rev() {
            prefix.insert(x);
            let flat = closure(&prefix);
            let newly_spanned: ElementSet = flat.difference(&prev_flat).copied().collect();
            active.extend(
                self.sort_by_order(&newly_spanned)
                    .into_iter()
                    .take_while(|&e| e != x),
            );
            prev_flat = flat;
        }
        active
    }

    /// Active elements of an arbitrary subset: the activity of its dominant basis
    pub fn active_elements(&self, s: &ElementSet) -> ElementSet {
        let basis = self.dominant_basis(s);
        self.activity_with(&basis, self.matroid.loops(), |t| self.matroid.closure(t))
    }

    /// Complement of [`active_elements`](Self::active_elements)
    pub fn passive_elements(&self, s: &ElementSet) -> ElementSet {
        let active = self.active_elements(s);
        self.matroid.groundset().difference(&active).copied().collect()
    }

    /// Passive elements outside `s`
    pub fn external_passive(&self, s: &ElementSet) -> ElementSet {
        self.passive_elements(s).difference(s).copied().collect()
    }

    /// Active elements in the dual matroid
    pub fn coactive_elements(&self, s: &ElementSet) -> ElementSet {
        let cobasis = self.dominant_cobasis(s);
        self.activity_with(&cobasis, self.matroid.coloops(), |t| self.matroid.coclosure(t))
    }

    /// Complement of [`coactive_elements`](Self::coactive_elements)
    pub fn copassive_elements(&self, s: &ElementSet) -> ElementSet {
        let coactive = self.coactive_elements(s);
        self.matroid.groundset().difference(&coactive).copied().collect()
    }

    /// Fundamental cocircuit of `b` with respect to `basis`: elements outside `closure(basis - b)`
    pub fn fundamental_cocircuit(&self, basis: &ElementSet, b: usize) -> Result<ElementSet> {
        if !basis.contains(&b) || !self.matroid.is_independent(basis) {
            return Err(ZonotopalError::NotIndependent(basis.iter().copied().collect()));
        }
        let mut rest = basis.clone();
        rest.remove(&b);
        let flat = self.matroid.closure(&rest);
        Ok(self.matroid.groundset().difference(&flat).copied().collect())
    }

    /// Elements of `basis` that are the smallest element of their fundamental cocircuit
    pub fn internal_activity(&self, basis: &ElementSet) -> Result<ElementSet> {
        let mut active = ElementSet::new();
        for &b in basis {
            let cocircuit = self.fundamental_cocircuit(basis, b)?;
            if self.min_element(&cocircuit) == Some(b) {
                active.insert(b);
            }
        }
        Ok(active)
    }

    /// Whether `basis` has no internally active element
    pub fn is_internal_basis(&self, basis: &ElementSet) -> Result<bool> {
        Ok(self.internal_activity(basis)?.is_empty())
    }

    /// All bases without internally active elements
    pub fn internal_bases(&self) -> Result<Vec<ElementSet>> {
        let mut out = Vec::new();
        for basis in self.matroid.bases() {
            if self.is_internal_basis(&basis)? {
                out.push(basis);
            }
        }
        Ok(out)
    }

    /// Compare two independent sets in the external order.
    ///
    /// Sets are compared through their externally passive elements; `None`
    /// means incomparable.
    pub fn external_order(&self, s: &ElementSet, t: &ElementSet, convention: OrderConvention) -> Option<Ordering> {
        compare_passives(&self.external_passive(s), &self.external_passive(t), convention)
    }

    /// Compare two coindependent sets in the internal order (the external order of the dual)
    pub fn internal_order(&self, s: &ElementSet, t: &ElementSet, convention: OrderConvention) -> Option<Ordering> {
        let ps: ElementSet = self.copassive_elements(s).difference(s).copied().collect();
        let pt: ElementSet = self.copassive_elements(t).difference(t).copied().collect();
        compare_passives(&ps, &pt, convention)
    }

    /// Maximal members of `sets` in the external order.
    ///
    /// Sets are scanned in the given order; a set is kept unless it lies at or
    /// below one already kept, and keeping it evicts the kept sets strictly
    /// below it. Of several equivalent maxima only the first survives.
    pub fn maximal_elements(&self, sets: &[ElementSet], convention: OrderConvention) -> Vec<ElementSet> {
        let mut kept: Vec<(ElementSet, ElementSet)> = Vec::new();
        for s in sets {
            let passive = self.external_passive(s);
            let dominated = kept.iter().any(|(_, p)| {
                matches!(
                    compare_passives(&passive, p, convention),
                    Some(Ordering::Less) | Some(Ordering::Equal)
                )
            });
            if dominated {
                continue;
            }
            kept.retain(|(_, p)| compare_passives(p, &passive, convention) != Some(Ordering::Less));
            kept.push((s.clone(), passive));
        }
        kept.into_iter().map(|(s, _)| s).collect()
    }
}

fn compare_passives(ps: &ElementSet, pt: &ElementSet, convention: OrderConvention) -> Option<Ordering> {
    let ordering = if ps == pt {
        Ordering::Equal
    } else if ps.is_superset(pt) {
        Ordering::Less
    } else if ps.is_subset(pt) {
        Ordering::Greater
    } else {
        return None;
    };
    Some(match convention {
        OrderConvention::ConvexGeometry => ordering,
        OrderConvention::Antimatroid => ordering.reverse(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Matrix;
    use crate::matroid::VectorMatroid;
    use crate::rational::{rational_field, QQField};

    fn set(xs: &[usize]) -> ElementSet {
        xs.iter().copied().collect()
    }

    fn ordered(rows: &[Vec<i64>], order: GroundOrder) -> OrderedMatroid<VectorMatroid<QQField>> {
        let q = rational_field();
        let m = VectorMatroid::new(&Matrix::from_i64_rows(&q, rows).unwrap());
        OrderedMatroid::new(m, &order).unwrap()
    }

    // columns (1,0), (0,1), (1,1), (1,1)
    fn doubled_diagonal() -> OrderedMatroid<VectorMatroid<QQField>> {
        ordered(&[vec![1, 0, 1, 1], vec![0, 1, 1, 1]], GroundOrder::Natural)
    }

    #[test]
    fn test_order_validation() {
        assert_eq!(GroundOrder::Reversed.to_permutation(3).unwrap(), vec![2, 1, 0]);
        assert!(GroundOrder::Explicit(vec![0, 0, 1]).to_permutation(3).is_err());
        assert!(GroundOrder::Explicit(vec![0, 1]).to_permutation(3).is_err());
        assert!(GroundOrder::Explicit(vec![2, 0, 3]).to_permutation(3).is_err());
        assert!(GroundOrder::Explicit(vec![2, 0, 1]).to_permutation(3).is_ok());
    }

    #[test]
    fn test_indep_activity() {
        let om = doubled_diagonal();
        assert_eq!(om.indep_activity(&set(&[0, 3])).unwrap(), set(&[2]));
        assert_eq!(om.indep_activity(&set(&[3])).unwrap(), set(&[2]));
        assert_eq!(om.indep_activity(&set(&[0, 1])).unwrap(), set(&[]));
        assert_eq!(om.indep_activity(&set(&[])).unwrap(), set(&[]));
        assert!(matches!(
            om.indep_activity(&set(&[2, 3])),
            Err(ZonotopalError::NotIndependent(_))
        ));
    }

    #[test]
    fn test_active_elements() {
        let om = doubled_diagonal();
        assert_eq!(om.active_elements(&set(&[0, 3])), set(&[2]));
        assert_eq!(om.active_elements(&set(&[0, 2, 3])), set(&[2]));
        assert_eq!(om.active_elements(&set(&[1, 3])), set(&[0, 2]));
        assert_eq!(om.active_elements(&set(&[0, 1, 2, 3])), set(&[0, 2]));
        assert_eq!(om.passive_elements(&set(&[1, 3])), set(&[1, 3]));
        assert_eq!(om.external_passive(&set(&[0, 1])), set(&[2, 3]));
    }

    #[test]
    fn test_dominant_basis() {
        let om = doubled_diagonal();
        assert_eq!(om.dominant_basis(&set(&[0, 1, 2, 3])), set(&[1, 3]));
        let rev = ordered(&[vec![1, 0, 1, 1], vec![0, 1, 1, 1]], GroundOrder::Reversed);
        assert_eq!(rev.dominant_basis(&set(&[0, 1, 2, 3])), set(&[0, 1]));
        assert_eq!(rev.max_element(&set(&[1, 2])), Some(1));
    }

    #[test]
    fn test_internal_bases_of_triangle() {
        let om = ordered(&[vec![1, 0, 1], vec![0, 1, 1]], GroundOrder::Natural);
        assert_eq!(om.fundamental_cocircuit(&set(&[1, 2]), 1).unwrap(), set(&[0, 1]));
        assert_eq!(om.internal_activity(&set(&[0, 1])).unwrap(), set(&[0, 1]));
        assert_eq!(om.internal_bases().unwrap(), vec![set(&[1, 2])]);
    }

    #[test]
    fn test_external_order() {
        let om = ordered(&[vec![1, 0, 1], vec![0, 1, 1]], GroundOrder::Natural);
        let empty = set(&[]);
        let top = set(&[1, 2]);
        // the empty set has every element externally passive
        assert_eq!(om.external_passive(&empty), set(&[0, 1, 2]));
        assert_eq!(om.external_passive(&top), set(&[]));
        assert_eq!(om.external_order(&empty, &top, OrderConvention::ConvexGeometry), Some(Ordering::Less));
        assert_eq!(om.external_order(&empty, &top, OrderConvention::Antimatroid), Some(Ordering::Greater));
        assert_eq!(
            om.maximal_elements(&om.matroid().bases(), OrderConvention::ConvexGeometry),
            vec![top]
        );
    }

    #[test]
    fn test_coactivity_of_coloop() {
        // columns (1,0), (1,0), (0,1): 2 is a coloop
        let om = ordered(&[vec![1, 1, 0], vec![0, 0, 1]], GroundOrder::Natural);
        assert!(om.coactive_elements(&set(&[])).contains(&2));
        assert_eq!(
            om.copassive_elements(&set(&[])),
            om.matroid().groundset().difference(&om.coactive_elements(&set(&[]))).copied().collect()
        );
    }
}
