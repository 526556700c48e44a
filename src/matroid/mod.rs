//! Matroids over a finite ground set `{0, ..., m-1}`.
//!
//! The zonotopal constructions only talk to a matroid through
//! [`MatroidOracle`]; [`VectorMatroid`] is the brute-force implementation for
//! the column matroid of an explicit matrix. Ground-set orders and activity
//! live in [`ordered`], hyperplane normals in [`facet`].

pub mod facet;
pub mod ordered;
pub mod vector;

pub use facet::{flat_normal, hyperplane_normal, Facet, FacetGeometry};
pub use ordered::{GroundOrder, OrderConvention, OrderedMatroid};
pub use vector::VectorMatroid;

use std::collections::BTreeSet;

/// A subset of the ground set.
pub type ElementSet = BTreeSet<usize>;

/// Read access to a matroid on `{0, ..., m-1}`.
///
/// Only `groundset_size`, `rank_of` and the enumerations are required; the
/// remaining operations are derived from the rank function.
pub trait MatroidOracle {
    /// Size `m` of the ground set
    fn groundset_size(&self) -> usize;

    /// Rank of a subset
    fn rank_of(&self, s: &ElementSet) -> usize;

    /// All bases, by lexicographic order
    fn bases(&self) -> Vec<ElementSet>;

    /// All independent sets, by size and then lexicographic order
    fn independent_sets(&self) -> Vec<ElementSet>;

    /// All hyperplanes (flats of rank `r - 1`), lexicographically sorted
    fn hyperplanes(&self) -> Vec<ElementSet>;

    /// The ground set
    fn groundset(&self) -> ElementSet {
        (0..self.groundset_size()).collect()
    }

    /// Rank of the matroid
    fn full_rank(&self) -> usize {
        self.rank_of(&self.groundset())
    }

    /// Whether `s` is independent
    fn is_independent(&self, s: &ElementSet) -> bool {
        self.rank_of(s) == s.len()
    }

    /// Whether `s` is a basis
    fn is_basis(&self, s: &ElementSet) -> bool {
        s.len() == self.full_rank() && self.is_independent(s)
    }

    /// Smallest flat containing `s`
    fn closure(&self, s: &ElementSet) -> ElementSet {
        let r = self.rank_of(s);
        (0..self.groundset_size())
            .filter(|e| {
                s.contains(e) || {
                    let mut t = s.clone();
                    t.insert(*e);
                    self.rank_of(&t) == r
                }
            })
            .collect()
    }

    /// Whether `s` is a flat
    fn is_flat(&self, s: &ElementSet) -> bool {
        self.closure(s) == *s
    }

    /// Whether `s` is a hyperplane
    fn is_hyperplane(&self, s: &ElementSet) -> bool {
        self.rank_of(s) + 1 == self.full_rank() && self.is_flat(s)
    }

    /// Elements of rank zero
    fn loops(&self) -> ElementSet {
        self.closure(&ElementSet::new())
    }

    /// Complements of the hyperplanes, in the same order
    fn cocircuits(&self) -> Vec<ElementSet> {
        let ground = self.groundset();
        self.hyperplanes()
            .iter()
            .map(|h| ground.difference(h).copied().collect())
            .collect()
    }

    /// Rank of `s` in the dual matroid: `|s| + r(E - s) - r(E)`
    fn dual_rank_of(&self, s: &ElementSet) -> usize {
        let complement: ElementSet = self.groundset().difference(s).copied().collect();
        s.len() + self.rank_of(&complement) - self.full_rank()
    }

    /// Closure of `s` in the dual matroid
    fn coclosure(&self, s: &ElementSet) -> ElementSet {
        let r = self.dual_rank_of(s);
        (0..self.groundset_size())
            .filter(|e| {
                s.contains(e) || {
                    let mut t = s.clone();
                    t.insert(*e);
                    self.dual_rank_of(&t) == r
                }
            })
            .collect()
    }

    /// Elements contained in every basis
    fn coloops(&self) -> ElementSet {
        self.coclosure(&ElementSet::new())
    }
}

/// All `k`-subsets of `{0, ..., m-1}` in lexicographic order.
pub fn subsets_of_size(m: usize, k: usize) -> Vec<ElementSet> {
    let mut out = Vec::new();
    if k > m {
        return out;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().copied().collect());
        // advance to the next combination
        let mut i = k;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if idx[i] != i + m - k {
                break;
            }
            if i == 0 {
                return out;
            }
        }
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// The inclusion-minimal members of a family of sets, smallest first.
pub fn minimal_sets(sets: &[ElementSet]) -> Vec<ElementSet> {
    let mut sorted: Vec<&ElementSet> = sets.iter().collect();
    sorted.sort_by_key(|s| s.len());
    let mut out: Vec<ElementSet> = Vec::new();
    for s in sorted {
        if !out.iter().any(|o| o.is_subset(s)) {
            out.push(s.clone());
        }
    }
    out
}

/// Inclusion-minimal sets meeting every member of `family`, ordered by size
/// and then lexicographically.
///
/// Built one member at a time: transversals that already meet the next
/// member are kept, the others are extended by each of its elements. An
/// empty family has the empty set as its only transversal; a family
/// containing the empty set has none.
pub fn minimal_transversals(family: &[ElementSet]) -> Vec<ElementSet> {
    let mut transversals = vec![ElementSet::new()];
    for edge in family {
        let mut next: Vec<ElementSet> = Vec::new();
        for t in &transversals {
            if !t.is_disjoint(edge) {
                next.push(t.clone());
                continue;
            }
            for &e in edge {
                let mut grown = t.clone();
                grown.insert(e);
                next.push(grown);
            }
        }
        next.sort();
        next.dedup();
        transversals = minimal_sets(&next);
    }
    transversals.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    transversals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(xs: &[usize]) -> ElementSet {
        xs.iter().copied().collect()
    }

    #[test]
    fn test_subsets_of_size() {
        assert_eq!(
            subsets_of_size(4, 2),
            vec![set(&[0, 1]), set(&[0, 2]), set(&[0, 3]), set(&[1, 2]), set(&[1, 3]), set(&[2, 3])]
        );
        assert_eq!(subsets_of_size(3, 0), vec![set(&[])]);
        assert_eq!(subsets_of_size(3, 3), vec![set(&[0, 1, 2])]);
        assert!(subsets_of_size(2, 3).is_empty());
    }

    #[test]
    fn test_minimal_sets() {
        let family = vec![set(&[0, 1, 2]), set(&[1]), set(&[0, 2]), set(&[1, 3])];
        assert_eq!(minimal_sets(&family), vec![set(&[1]), set(&[0, 2])]);
    }

    #[test]
    fn test_minimal_transversals() {
        // bases of the triangle: every transversal needs two elements
        let bases = vec![set(&[0, 1]), set(&[0, 2]), set(&[1, 2])];
        assert_eq!(
            minimal_transversals(&bases),
            vec![set(&[0, 1]), set(&[0, 2]), set(&[1, 2])]
        );
        assert_eq!(minimal_transversals(&[set(&[1, 2])]), vec![set(&[1]), set(&[2])]);
        assert_eq!(minimal_transversals(&[]), vec![set(&[])]);
        assert!(minimal_transversals(&[set(&[0]), set(&[])]).is_empty());
    }
}
