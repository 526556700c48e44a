//! The column matroid of an explicit matrix, by exhaustive enumeration.

use feanor_math::ring::*;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use super::{subsets_of_size, ElementSet, MatroidOracle};
use crate::field_wrapper::ExactField;
use crate::linalg::{rank, Matrix};

/// Matroid whose independent sets are the linearly independent sets of columns.
///
/// Enumerations (bases, independent sets, hyperplanes) are computed once on
/// first request and then served from the cache.
pub struct VectorMatroid<K: ExactField> {
    field: K,
    nrows: usize,
    columns: Vec<Vec<El<K>>>,
    full_rank: usize,
    bases: OnceCell<Vec<ElementSet>>,
    independent_sets: OnceCell<Vec<ElementSet>>,
    hyperplanes: OnceCell<Vec<ElementSet>>,
}

impl<K: ExactField> VectorMatroid<K> {
    /// Column matroid of `matrix`
    pub fn new(matrix: &Matrix<K>) -> Self {
        let field = matrix.field().clone();
        let columns = matrix.columns();
        let full_rank = rank(&field, &columns);
        VectorMatroid {
            field,
            nrows: matrix.nrows(),
            columns,
            full_rank,
            bases: OnceCell::new(),
            independent_sets: OnceCell::new(),
            hyperplanes: OnceCell::new(),
        }
    }

    /// The field of the matrix entries
    pub fn field(&self) -> &K {
        &self.field
    }

    /// Dimension of the ambient space (number of matrix rows)
    pub fn ambient_dim(&self) -> usize {
        self.nrows
    }

    /// Column `e`
    pub fn column(&self, e: usize) -> &[El<K>] {
        &self.columns[e]
    }

    /// All columns
    pub fn columns(&self) -> &[Vec<El<K>>] {
        &self.columns
    }

    /// Columns indexed by `s`, in increasing index order
    pub fn columns_of(&self, s: &ElementSet) -> Vec<Vec<El<K>>> {
        s.iter()
            .map(|&e| self.columns[e].iter().map(|v| self.field.clone_el(v)).collect())
            .collect()
    }

    /// A basis of `span(s)`, chosen greedily by increasing index
    pub fn greedy_basis(&self, s: &ElementSet) -> ElementSet {
        let mut basis = ElementSet::new();
        for &e in s {
            basis.insert(e);
            if !self.is_independent(&basis) {
                basis.remove(&e);
            }
        }
        basis
    }
}

impl<K: ExactField> fmt::Debug for VectorMatroid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorMatroid")
            .field("field", &self.field.field_name())
            .field("ambient_dim", &self.nrows)
            .field("groundset_size", &self.columns.len())
            .field("rank", &self.full_rank)
            .finish()
    }
}

impl<K: ExactField> MatroidOracle for VectorMatroid<K> {
    fn groundset_size(&self) -> usize {
        self.columns.len()
    }

    fn rank_of(&self, s: &ElementSet) -> usize {
        if s.is_empty() {
            return 0;
        }
        rank(&self.field, &self.columns_of(s))
    }

    fn full_rank(&self) -> usize {
        self.full_rank
    }

    fn bases(&self) -> Vec<ElementSet> {
        self.bases
            .get_or_init(|| {
                let bases: Vec<ElementSet> = subsets_of_size(self.groundset_size(), self.full_rank)
                    .into_iter()
                    .filter(|s| self.is_independent(s))
                    .collect();
                debug!(count = bases.len(), "enumerated bases");
                bases
            })
            .clone()
    }

    fn independent_sets(&self) -> Vec<ElementSet> {
        self.independent_sets
            .get_or_init(|| {
                // independent sets are exactly the subsets of bases
                let bases = self.bases();
                let sets: Vec<ElementSet> = (0..=self.full_rank)
                    .flat_map(|k| subsets_of_size(self.groundset_size(), k))
                    .filter(|s| bases.iter().any(|b| s.is_subset(b)))
                    .collect();
                debug!(count = sets.len(), "enumerated independent sets");
                sets
            })
            .clone()
    }

    fn hyperplanes(&self) -> Vec<ElementSet> {
        self.hyperplanes
            .get_or_init(|| {
                let hyperplanes: BTreeSet<ElementSet> = if self.full_rank == 0 {
                    BTreeSet::new()
                } else {
                    self.independent_sets()
                        .into_iter()
                        .filter(|s| s.len() + 1 == self.full_rank)
                        .map(|s| self.closure(&s))
                        .collect()
                };
                debug!(count = hyperplanes.len(), "enumerated hyperplanes");
                hyperplanes.into_iter().collect()
            })
            .clone()
    }
}
