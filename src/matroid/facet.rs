//! Hyperplanes of a vector matroid together with their normals and cocircuits.

use feanor_math::ring::*;
use tracing::debug;

use super::{ElementSet, MatroidOracle, VectorMatroid};
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;
use crate::linalg::{dot, linear_combination, null_space};

/// A hyperplane `H`, its cocircuit `E - H` and a normal vector of `span(H)`.
pub struct Facet<K: ExactField> {
    /// The hyperplane (a flat of rank `r - 1`)
    pub hyperplane: ElementSet,
    /// Its complement in the ground set
    pub cocircuit: ElementSet,
    /// A nonzero vector orthogonal to every column of the hyperplane
    pub normal: Vec<El<K>>,
}

/// All facets of a vector matroid, in the order of [`MatroidOracle::hyperplanes`].
pub struct FacetGeometry<K: ExactField> {
    facets: Vec<Facet<K>>,
}

impl<K: ExactField> FacetGeometry<K> {
    /// Compute normals and cocircuits of every hyperplane of `matroid`
    pub fn new(matroid: &VectorMatroid<K>) -> Result<Self> {
        let ground = matroid.groundset();
        let facets = matroid
            .hyperplanes()
            .into_iter()
            .map(|h| {
                let normal = hyperplane_normal(matroid, &h)?;
                let cocircuit = ground.difference(&h).copied().collect();
                Ok(Facet {
                    hyperplane: h,
                    cocircuit,
                    normal,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(count = facets.len(), "computed facet normals");
        Ok(FacetGeometry { facets })
    }

    /// The facets
    pub fn facets(&self) -> &[Facet<K>] {
        &self.facets
    }

    /// Number of hyperplanes
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Whether the matroid has no hyperplanes (rank zero)
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Normal vector of the hyperplane `h`, unique up to a nonzero scalar.
///
/// The vector spans the null space of the matrix whose rows are the columns
/// in `h`; its free coordinate is 1.
pub fn hyperplane_normal<K: ExactField>(matroid: &VectorMatroid<K>, h: &ElementSet) -> Result<Vec<El<K>>> {
    if !matroid.is_hyperplane(h) || matroid.full_rank() != matroid.ambient_dim() {
        return Err(ZonotopalError::NotHyperplane(h.iter().copied().collect()));
    }
    let mut kernel = null_space(matroid.field(), &matroid.columns_of(h), matroid.ambient_dim());
    match (kernel.pop(), kernel.is_empty()) {
        (Some(normal), true) => Ok(normal),
        _ => Err(ZonotopalError::NotHyperplane(h.iter().copied().collect())),
    }
}

/// The cocircuit `E - h` of a hyperplane.
pub fn cocircuit<K: ExactField>(matroid: &VectorMatroid<K>, h: &ElementSet) -> Result<ElementSet> {
    if !matroid.is_hyperplane(h) {
        return Err(ZonotopalError::NotHyperplane(h.iter().copied().collect()));
    }
    Ok(matroid.groundset().difference(h).copied().collect())
}

/// A nonzero vector in `span(e)` orthogonal to `span(f)`, for flats `f ⊂ e` with `r(e) = r(f) + 1`.
///
/// Generalizes [`hyperplane_normal`] to the covering pairs of the lattice of
/// flats: the normal is taken inside `span(e)` instead of the ambient space.
pub fn flat_normal<K: ExactField>(
    matroid: &VectorMatroid<K>,
    f: &ElementSet,
    e: &ElementSet,
) -> Result<Vec<El<K>>> {
    if !f.is_subset(e) || matroid.rank_of(f) + 1 != matroid.rank_of(e) {
        return Err(ZonotopalError::NotHyperplane(f.iter().copied().collect()));
    }
    let field = matroid.field();
    let f_basis = matroid.columns_of(&matroid.greedy_basis(f));
    let e_basis = matroid.columns_of(&matroid.greedy_basis(e));

    // coefficients c with sum_k c_k e_k orthogonal to every f_j
    let gram: Vec<Vec<El<K>>> = f_basis
        .iter()
        .map(|fc| e_basis.iter().map(|ec| dot(field, fc, ec)).collect())
        .collect();
    let kernel = null_space(field, &gram, e_basis.len());
    let coeffs = kernel
        .first()
        .ok_or_else(|| ZonotopalError::NotHyperplane(f.iter().copied().collect()))?;
    let normal = linear_combination(field, coeffs, &e_basis, matroid.ambient_dim());
    if normal.iter().all(|c| field.is_zero(c)) {
        return Err(ZonotopalError::NotHyperplane(f.iter().copied().collect()));
    }
    Ok(normal)
}
