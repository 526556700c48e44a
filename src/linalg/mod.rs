//! Exact linear algebra over an [`ExactField`].
//!
//! A [`Matrix`] owns its field store next to its rows, the same way the
//! elimination routines keep the ring next to their sparse rows; entries are
//! plain `El<K>` values manipulated through the store.

pub mod gaussian;
pub mod sparse;

pub use gaussian::{inverse, is_independent, null_space, rank, row_echelon, solve, EchelonForm};
pub use sparse::SparseRow;

use feanor_math::ring::*;
use std::fmt;

use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;

/// Dense row-major matrix over `K`.
pub struct Matrix<K: ExactField> {
    field: K,
    nrows: usize,
    ncols: usize,
    rows: Vec<Vec<El<K>>>,
}

impl<K: ExactField> Matrix<K> {
    /// Build from rows; every row must have the same length.
    pub fn from_rows(field: K, rows: Vec<Vec<El<K>>>) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != ncols {
                return Err(ZonotopalError::RaggedMatrix {
                    row,
                    expected: ncols,
                    found: r.len(),
                });
            }
        }
        Ok(Matrix {
            field,
            nrows: rows.len(),
            ncols,
            rows,
        })
    }

    /// Build an `nrows x columns.len()` matrix from its columns.
    pub fn from_columns(field: K, nrows: usize, columns: &[Vec<El<K>>]) -> Result<Self> {
        for (col, c) in columns.iter().enumerate() {
            if c.len() != nrows {
                return Err(ZonotopalError::RaggedMatrix {
                    row: col,
                    expected: nrows,
                    found: c.len(),
                });
            }
        }
        let rows = (0..nrows)
            .map(|i| columns.iter().map(|c| field.clone_el(&c[i])).collect())
            .collect();
        Ok(Matrix {
            field,
            nrows,
            ncols: columns.len(),
            rows,
        })
    }

    /// Integer matrix mapped into `field`
    pub fn from_i64_rows(field: &K, rows: &[Vec<i64>]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|&v| field.from_i64(v)).collect())
            .collect();
        Self::from_rows(field.clone(), rows)
    }

    /// The `n x n` identity
    pub fn identity(field: &K, n: usize) -> Self {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { field.one() } else { field.zero() }).collect())
            .collect();
        Matrix {
            field: field.clone(),
            nrows: n,
            ncols: n,
            rows,
        }
    }

    /// The field the entries live in
    pub fn field(&self) -> &K {
        &self.field
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Entry at `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> &El<K> {
        &self.rows[i][j]
    }

    /// Row `i`
    pub fn row(&self, i: usize) -> &[El<K>] {
        &self.rows[i]
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<El<K>>] {
        &self.rows
    }

    /// Column `j` as an owned vector
    pub fn column(&self, j: usize) -> Vec<El<K>> {
        self.rows.iter().map(|r| self.field.clone_el(&r[j])).collect()
    }

    /// All columns, in order
    pub fn columns(&self) -> Vec<Vec<El<K>>> {
        (0..self.ncols).map(|j| self.column(j)).collect()
    }

    /// The transpose
    pub fn transpose(&self) -> Self {
        Matrix {
            field: self.field.clone(),
            nrows: self.ncols,
            ncols: self.nrows,
            rows: self.columns(),
        }
    }

    /// Sub-matrix made of the listed columns, in the listed order
    pub fn select_columns(&self, cols: &[usize]) -> Self {
        Matrix {
            field: self.field.clone(),
            nrows: self.nrows,
            ncols: cols.len(),
            rows: self
                .rows
                .iter()
                .map(|r| cols.iter().map(|&j| self.field.clone_el(&r[j])).collect())
                .collect(),
        }
    }

    /// Block matrix `[self | other]`
    pub fn hstack(&self, other: &Self) -> Result<Self> {
        if self.nrows != other.nrows {
            return Err(ZonotopalError::RaggedMatrix {
                row: 0,
                expected: self.nrows,
                found: other.nrows,
            });
        }
        Ok(Matrix {
            field: self.field.clone(),
            nrows: self.nrows,
            ncols: self.ncols + other.ncols,
            rows: self
                .rows
                .iter()
                .zip(&other.rows)
                .map(|(a, b)| a.iter().chain(b).map(|v| self.field.clone_el(v)).collect())
                .collect(),
        })
    }

    /// `A v`
    pub fn mul_vec(&self, v: &[El<K>]) -> Vec<El<K>> {
        self.rows.iter().map(|r| dot(&self.field, r, v)).collect()
    }

    /// `A B`
    pub fn mul(&self, other: &Self) -> Self {
        let bt = other.columns();
        Matrix {
            field: self.field.clone(),
            nrows: self.nrows,
            ncols: other.ncols,
            rows: self
                .rows
                .iter()
                .map(|r| bt.iter().map(|c| dot(&self.field, r, c)).collect())
                .collect(),
        }
    }
}

impl<K: ExactField> Clone for Matrix<K> {
    fn clone(&self) -> Self {
        Matrix {
            field: self.field.clone(),
            nrows: self.nrows,
            ncols: self.ncols,
            rows: self
                .rows
                .iter()
                .map(|r| r.iter().map(|v| self.field.clone_el(v)).collect())
                .collect(),
        }
    }
}

impl<K: ExactField> PartialEq for Matrix<K> {
    fn eq(&self, other: &Self) -> bool {
        self.nrows == other.nrows
            && self.ncols == other.ncols
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| a.iter().zip(b).all(|(x, y)| self.field.eq_el(x, y)))
    }
}

impl<K: ExactField> fmt::Debug for Matrix<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix {}x{} over {}", self.nrows, self.ncols, self.field.field_name())?;
        for r in &self.rows {
            let entries: Vec<String> = r.iter().map(|v| self.field.format(v).to_string()).collect();
            writeln!(f, "  [{}]", entries.join(", "))?;
        }
        Ok(())
    }
}

/// `u . v`
pub fn dot<K: ExactField>(field: &K, u: &[El<K>], v: &[El<K>]) -> El<K> {
    let mut acc = field.zero();
    for (a, b) in u.iter().zip(v) {
        field.add_assign(&mut acc, field.mul_ref(a, b));
    }
    acc
}

/// `sum_k coeffs[k] * vectors[k]`, all vectors of length `len`
pub fn linear_combination<K: ExactField>(field: &K, coeffs: &[El<K>], vectors: &[Vec<El<K>>], len: usize) -> Vec<El<K>> {
    let mut out: Vec<El<K>> = (0..len).map(|_| field.zero()).collect();
    for (c, v) in coeffs.iter().zip(vectors) {
        if field.is_zero(c) {
            continue;
        }
        for (o, x) in out.iter_mut().zip(v) {
            field.add_assign(o, field.mul_ref(c, x));
        }
    }
    out
}

/// Entrywise equality of two vectors
pub fn vec_eq<K: ExactField>(field: &K, u: &[El<K>], v: &[El<K>]) -> bool {
    u.len() == v.len() && u.iter().zip(v).all(|(a, b)| field.eq_el(a, b))
}
