//! Gauss-Jordan elimination over exact fields.
//!
//! Rows are reduced one at a time against the pivot rows found so far. The
//! pivot rows are kept fully reduced (reduced row echelon form), so a single
//! pass over them clears every pivot column of an incoming row.

use feanor_math::field::Field;
use feanor_math::ring::*;

use super::sparse::{from_dense, normalize_row, subtract_scaled_row, SparseRow};
use super::Matrix;
use crate::field_wrapper::ExactField;

/// Reduced row echelon form of a matrix.
pub struct EchelonForm<E> {
    /// Non-zero rows, each with leading coefficient 1, sorted by pivot column
    pub rows: Vec<SparseRow<E>>,
    /// Pivot column of each row
    pub pivots: Vec<usize>,
    /// Number of columns of the reduced matrix
    pub ncols: usize,
}

impl<E> EchelonForm<E> {
    /// Rank of the reduced matrix
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Columns without a pivot
    pub fn free_columns(&self) -> Vec<usize> {
        let mut is_pivot = vec![false; self.ncols];
        for &p in &self.pivots {
            is_pivot[p] = true;
        }
        (0..self.ncols).filter(|&c| !is_pivot[c]).collect()
    }
}

/// Reduce `row` by every pivot row. Returns the reduced row.
fn reduce_row_by_pivots<R>(
    base_ring: &R,
    pivot_rows: &[SparseRow<El<R>>],
    pivots: &[usize],
    mut row: SparseRow<El<R>>,
) -> SparseRow<El<R>>
where
    R: RingStore,
    R::Type: Field,
{
    for (pivot_row, &pivot_col) in pivot_rows.iter().zip(pivots) {
        let multiplier = match row.get(pivot_col) {
            Some(coeff) => base_ring.clone_el(coeff),
            None => continue,
        };
        subtract_scaled_row(base_ring, &mut row, pivot_row, &multiplier);
    }
    row
}

/// Incrementally build a reduced row echelon form from sparse rows.
pub fn reduce_sparse_rows<R, I>(base_ring: &R, rows: I, ncols: usize) -> EchelonForm<El<R>>
where
    R: RingStore,
    R::Type: Field,
    I: IntoIterator<Item = SparseRow<El<R>>>,
{
    let mut pivot_rows: Vec<SparseRow<El<R>>> = Vec::new();
    let mut pivots: Vec<usize> = Vec::new();

    for row in rows {
        let mut row = reduce_row_by_pivots(base_ring, &pivot_rows, &pivots, row);
        let pivot_col = match row.pivot() {
            Some(col) => col,
            None => continue,
        };
        normalize_row(base_ring, &mut row);

        // Keep the earlier rows reduced in the new pivot column
        for earlier in pivot_rows.iter_mut() {
            if let Some(coeff) = earlier.get(pivot_col).map(|c| base_ring.clone_el(c)) {
                subtract_scaled_row(base_ring, earlier, &row, &coeff);
            }
        }

        let pos = pivots.partition_point(|&p| p < pivot_col);
        pivots.insert(pos, pivot_col);
        pivot_rows.insert(pos, row);
    }

    EchelonForm {
        rows: pivot_rows,
        pivots,
        ncols,
    }
}

/// Reduced row echelon form of dense rows of length `ncols`.
pub fn row_echelon<K: ExactField>(field: &K, rows: &[Vec<El<K>>], ncols: usize) -> EchelonForm<El<K>> {
    reduce_sparse_rows(field, rows.iter().map(|r| from_dense(field, r)), ncols)
}

/// Rank of the span of `rows`.
pub fn rank<K: ExactField>(field: &K, rows: &[Vec<El<K>>]) -> usize {
    let ncols = rows.first().map_or(0, Vec::len);
    row_echelon(field, rows, ncols).rank()
}

/// Whether the given vectors are linearly independent.
pub fn is_independent<K: ExactField>(field: &K, vectors: &[Vec<El<K>>]) -> bool {
    rank(field, vectors) == vectors.len()
}

/// Basis of the right kernel `{v : A v = 0}` read off an echelon form.
pub fn kernel_from_echelon<K: ExactField>(field: &K, echelon: &EchelonForm<El<K>>) -> Vec<Vec<El<K>>> {
    echelon
        .free_columns()
        .into_iter()
        .map(|free| {
            let mut v: Vec<El<K>> = (0..echelon.ncols).map(|_| field.zero()).collect();
            v[free] = field.one();
            for (row, &pivot_col) in echelon.rows.iter().zip(&echelon.pivots) {
                if let Some(coeff) = row.get(free) {
                    v[pivot_col] = field.negate(field.clone_el(coeff));
                }
            }
            v
        })
        .collect()
}

/// Basis of the null space of the `rows.len() x ncols` matrix given by `rows`.
///
/// With no rows at all the null space is the whole of `K^ncols`.
pub fn null_space<K: ExactField>(field: &K, rows: &[Vec<El<K>>], ncols: usize) -> Vec<Vec<El<K>>> {
    kernel_from_echelon(field, &row_echelon(field, rows, ncols))
}

/// Inverse of a square matrix, `None` when singular.
pub fn inverse<K: ExactField>(a: &Matrix<K>) -> Option<Matrix<K>> {
    let field = a.field();
    let n = a.nrows();
    if a.ncols() != n {
        return None;
    }
    if n == 0 {
        return Some(a.clone());
    }
    let augmented = a.hstack(&Matrix::identity(field, n)).ok()?;
    let echelon = row_echelon(field, augmented.rows(), 2 * n);
    if echelon.rank() < n || echelon.pivots[n - 1] >= n {
        return None;
    }
    let rows = echelon
        .rows
        .iter()
        .take(n)
        .map(|r| {
            (n..2 * n)
                .map(|c| r.get(c).map_or_else(|| field.zero(), |v| field.clone_el(v)))
                .collect()
        })
        .collect();
    Matrix::from_rows(field.clone(), rows).ok()
}

/// One solution of `A x = b`, `None` when the system is inconsistent.
pub fn solve<K: ExactField>(a: &Matrix<K>, b: &[El<K>]) -> Option<Vec<El<K>>> {
    let field = a.field();
    let n = a.ncols();
    let augmented: Vec<Vec<El<K>>> = a
        .rows()
        .iter()
        .zip(b)
        .map(|(r, bi)| r.iter().chain(std::iter::once(bi)).map(|v| field.clone_el(v)).collect())
        .collect();
    let echelon = row_echelon(field, &augmented, n + 1);
    if echelon.pivots.last() == Some(&n) {
        return None;
    }
    let mut x: Vec<El<K>> = (0..n).map(|_| field.zero()).collect();
    for (row, &pivot_col) in echelon.rows.iter().zip(&echelon.pivots) {
        if let Some(rhs) = row.get(n) {
            x[pivot_col] = field.clone_el(rhs);
        }
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::vec_eq;
    use crate::rational::{rational_field, QQField};

    fn q_rows(q: &QQField, rows: &[Vec<i64>]) -> Vec<Vec<El<QQField>>> {
        rows.iter().map(|r| r.iter().map(|&v| q.from_i64(v)).collect()).collect()
    }

    #[test]
    fn test_rank_of_dependent_rows() {
        let q = rational_field();
        // second row is 3 * first row
        let rows = q_rows(&q, &[vec![1, 2], vec![3, 6]]);
        assert_eq!(rank(&q, &rows), 1);
        assert!(!is_independent(&q, &rows));
        assert!(is_independent(&q, &q_rows(&q, &[vec![1, 0, 1], vec![0, 1, 1]])));
    }

    #[test]
    fn test_null_space() {
        let q = rational_field();
        let rows = q_rows(&q, &[vec![1, 1, 0], vec![0, 1, 1]]);
        let kernel = null_space(&q, &rows, 3);
        assert_eq!(kernel.len(), 1);
        let m = Matrix::from_rows(q.clone(), rows).unwrap();
        assert!(m.mul_vec(&kernel[0]).iter().all(|v| q.is_zero(v)));

        // no constraints
        assert_eq!(null_space(&q, &[], 2).len(), 2);
    }

    #[test]
    fn test_inverse() {
        let q = rational_field();
        let a = Matrix::from_i64_rows(&q, &[vec![2, 1], vec![1, 1]]).unwrap();
        let inv = inverse(&a).unwrap();
        assert_eq!(a.mul(&inv), Matrix::identity(&q, 2));

        let singular = Matrix::from_i64_rows(&q, &[vec![1, 2], vec![2, 4]]).unwrap();
        assert!(inverse(&singular).is_none());
    }

    #[test]
    fn test_solve() {
        let q = rational_field();
        let a = Matrix::from_i64_rows(&q, &[vec![1, 1], vec![1, -1]]).unwrap();
        let x = solve(&a, &[q.from_i64(3), q.from_i64(1)]).unwrap();
        assert!(vec_eq(&q, &x, &[q.from_i64(2), q.from_i64(1)]));

        let inconsistent = Matrix::from_i64_rows(&q, &[vec![1, 1], vec![2, 2]]).unwrap();
        assert!(solve(&inconsistent, &[q.from_i64(1), q.from_i64(3)]).is_none());
    }
}
