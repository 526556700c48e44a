//! The internal zonotopal algebra, indexed by the internal bases.

use once_cell::sync::OnceCell;
use std::collections::BTreeMap;

use feanor_math::ring::*;

use super::{core_accessors, AlgebraCore, PolyMap, Variant, ZonotopalAlgebra};
use crate::config::ZonotopalConfig;
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;
use crate::linalg::{inverse, Matrix};
use crate::matroid::{minimal_transversals, ElementSet, OrderedMatroid, VectorMatroid};
use crate::poly::{PolyRing, Polynomial};

/// Internal algebra: I(X) uses one power less than the central one, J(X)
/// is generated by the products over the minimal sets meeting every
/// internal basis.
pub struct InternalZonotopalAlgebra<K: ExactField> {
    core: AlgebraCore<K>,
    internal_bases: OnceCell<Vec<ElementSet>>,
    cocircuits: OnceCell<Vec<ElementSet>>,
}

impl<K: ExactField> InternalZonotopalAlgebra<K> {
    /// Internal algebra of the columns of `matrix`
    pub fn new(matrix: &Matrix<K>, config: &ZonotopalConfig<K>) -> Result<Self> {
        Ok(InternalZonotopalAlgebra {
            core: AlgebraCore::new(matrix, config)?,
            internal_bases: OnceCell::new(),
            cocircuits: OnceCell::new(),
        })
    }

    /// Bases without internally active elements
    pub fn internal_bases(&self) -> Result<&[ElementSet]> {
        self.internal_bases
            .get_or_try_init(|| self.core.ordered.internal_bases())
            .map(Vec::as_slice)
    }

    /// Inclusion-minimal sets meeting every internal basis.
    ///
    /// With no internal bases the empty set qualifies, and J(X) is the unit ideal.
    pub fn generalized_cocircuits(&self) -> Result<&[ElementSet]> {
        self.cocircuits
            .get_or_try_init(|| Ok(minimal_transversals(self.internal_bases()?)))
            .map(Vec::as_slice)
    }

    /// `P[B]` for an internal basis `B`.
    ///
    /// For each `b ∈ B` whose fundamental cocircuit has `b` as its only
    /// element outside the externally passive set, the largest passive
    /// element of that cocircuit loses its `b`-coordinate (in the basis `B`)
    /// before the product is taken.
    fn projected_tensor(&self, basis: &ElementSet) -> Result<Polynomial<K>> {
        let ordered = &self.core.ordered;
        let matroid = ordered.matroid();
        let field = self.core.ring.field();
        let passive = ordered.external_passive(basis);

        // element -> coordinates (positions in `basis`) to clear
        let mut cleared: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (position, &b) in basis.iter().enumerate() {
            let cocircuit = ordered.fundamental_cocircuit(basis, b)?;
            let outside: ElementSet = cocircuit.difference(&passive).copied().collect();
            if outside.len() != 1 || !outside.contains(&b) {
                continue;
            }
            let shared: ElementSet = cocircuit.intersection(&passive).copied().collect();
            if let Some(e) = ordered.max_element(&shared) {
                cleared.entry(e).or_default().push(position);
            }
        }
        if cleared.is_empty() {
            return Ok(self.core.pure_tensor(&passive));
        }

        let xb = Matrix::from_columns(field.clone(), matroid.ambient_dim(), &matroid.columns_of(basis))?;
        let xb_inv = inverse(&xb).ok_or_else(|| ZonotopalError::NotIndependent(basis.iter().copied().collect()))?;
        let columns: Vec<Vec<El<K>>> = passive
            .iter()
            .map(|e| match cleared.get(e) {
                None => matroid.column(*e).iter().map(|v| field.clone_el(v)).collect(),
                Some(positions) => {
                    let mut coords = xb_inv.mul_vec(matroid.column(*e));
                    for &p in positions {
                        coords[p] = field.zero();
                    }
                    xb.mul_vec(&coords)
                }
            })
            .collect();
        Ok(self.core.ring.pure_tensor(&columns))
    }
}

impl<K: ExactField> ZonotopalAlgebra<K> for InternalZonotopalAlgebra<K> {
    core_accessors!(Variant::Internal);

    fn i_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        self.core
            .spaces
            .i
            .get_or_try_init(|| {
                self.core
                    .normal_powers(|facet| facet.cocircuit.len().saturating_sub(1))
            })
            .map(Vec::as_slice)
    }

    fn j_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        self.core
            .spaces
            .j
            .get_or_try_init(|| {
                Ok(self
                    .generalized_cocircuits()?
                    .iter()
                    .map(|c| self.core.pure_tensor(c))
                    .collect())
            })
            .map(Vec::as_slice)
    }

    fn p_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core.spaces.p.get_or_try_init(|| {
            self.internal_bases()?
                .iter()
                .map(|b| self.projected_tensor(b).map(|poly| (b.clone(), poly)))
                .collect()
        })
    }

    fn d_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core.spaces.d.get_or_try_init(|| {
            let j_gens = self.j_ideal_gens()?;
            let p = self.p_space_basis()?;
            self.core.compute_d(Variant::Internal, p, &[], j_gens)
        })
    }
}
