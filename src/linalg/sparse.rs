//! Sparse rows used by the elimination routines.
//!
//! The derivative maps `j(∂): Π_d -> Π_{d-k}` that cut out the kernel of J
//! have only a handful of non-zero entries per row, so elimination works on
//! sorted `(column, coeff)` lists instead of dense vectors.

use feanor_math::divisibility::DivisibilityRingStore;
use feanor_math::field::Field;
use feanor_math::ring::*;

/// A sparse row: (column_index, coefficient) pairs sorted by column, no zero coefficients.
pub struct SparseRow<E> {
    /// (column_index, coefficient) pairs, sorted by column_index
    pub entries: Vec<(usize, E)>,
}

impl<E> Default for SparseRow<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SparseRow<E> {
    /// Create a new empty sparse row
    pub fn new() -> Self {
        SparseRow { entries: Vec::new() }
    }

    /// Find the pivot (leftmost non-zero column)
    pub fn pivot(&self) -> Option<usize> {
        self.entries.first().map(|(col, _)| *col)
    }

    /// Check if row is zero (empty)
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coefficient stored at `col`, if non-zero
    pub fn get(&self, col: usize) -> Option<&E> {
        self.entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .ok()
            .map(|idx| &self.entries[idx].1)
    }
}

/// Build a sparse row from a dense slice, dropping zeros.
pub fn from_dense<R>(base_ring: &R, dense: &[El<R>]) -> SparseRow<El<R>>
where
    R: RingStore,
{
    SparseRow {
        entries: dense
            .iter()
            .enumerate()
            .filter(|(_, v)| !base_ring.is_zero(v))
            .map(|(c, v)| (c, base_ring.clone_el(v)))
            .collect(),
    }
}

/// Expand into a dense vector of length `ncols`.
pub fn to_dense<R>(base_ring: &R, row: &SparseRow<El<R>>, ncols: usize) -> Vec<El<R>>
where
    R: RingStore,
{
    let mut dense: Vec<El<R>> = (0..ncols).map(|_| base_ring.zero()).collect();
    for (c, v) in &row.entries {
        dense[*c] = base_ring.clone_el(v);
    }
    dense
}

/// Clone a row entry by entry.
pub fn clone_row<R>(base_ring: &R, row: &SparseRow<El<R>>) -> SparseRow<El<R>>
where
    R: RingStore,
{
    SparseRow {
        entries: row.entries.iter().map(|(c, v)| (*c, base_ring.clone_el(v))).collect(),
    }
}

/// Normalize a row so that its leading coefficient is 1
pub fn normalize_row<R>(base_ring: &R, row: &mut SparseRow<El<R>>)
where
    R: RingStore,
    R::Type: Field,
{
    let inv = match row.entries.first().and_then(|(_, lead)| base_ring.invert(lead)) {
        Some(inv) => inv,
        None => return,
    };
    for (_, coeff) in &mut row.entries {
        base_ring.mul_assign(coeff, base_ring.clone_el(&inv));
    }
}

/// Compute: target -= multiplier * source
///
/// Merges the two sorted entry lists in a single pass and drops cancelled entries.
pub fn subtract_scaled_row<R>(
    base_ring: &R,
    target: &mut SparseRow<El<R>>,
    source: &SparseRow<El<R>>,
    multiplier: &El<R>,
) where
    R: RingStore,
    R::Type: Field,
{
    if base_ring.is_zero(multiplier) {
        return;
    }
    let mut result = Vec::with_capacity(target.entries.len() + source.entries.len());
    let mut target_iter = target.entries.iter();
    let mut source_iter = source.entries.iter();

    let mut target_next = target_iter.next();
    let mut source_next = source_iter.next();

    while target_next.is_some() || source_next.is_some() {
        match (target_next, source_next) {
            (Some((tc, tv)), Some((sc, sv))) => {
                if tc == sc {
                    let mut new_val = base_ring.clone_el(tv);
                    base_ring.sub_assign(&mut new_val, base_ring.mul_ref(multiplier, sv));
                    if !base_ring.is_zero(&new_val) {
                        result.push((*tc, new_val));
                    }
                    target_next = target_iter.next();
                    source_next = source_iter.next();
                } else if tc < sc {
                    result.push((*tc, base_ring.clone_el(tv)));
                    target_next = target_iter.next();
                } else {
                    let mut new_val = base_ring.mul_ref(multiplier, sv);
                    base_ring.negate_inplace(&mut new_val);
                    result.push((*sc, new_val));
                    source_next = source_iter.next();
                }
            }
            (Some((tc, tv)), None) => {
                result.push((*tc, base_ring.clone_el(tv)));
                target_next = target_iter.next();
            }
            (None, Some((sc, sv))) => {
                let mut new_val = base_ring.mul_ref(multiplier, sv);
                base_ring.negate_inplace(&mut new_val);
                result.push((*sc, new_val));
                source_next = source_iter.next();
            }
            (None, None) => unreachable!(),
        }
    }

    target.entries = result;
}
