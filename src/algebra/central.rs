//! The central zonotopal algebra, indexed by the bases of the matroid.

use super::{core_accessors, hyperplane_pairs, AlgebraCore, PolyMap, Variant, ZonotopalAlgebra};
use crate::config::ZonotopalConfig;
use crate::error::Result;
use crate::field_wrapper::ExactField;
use crate::linalg::Matrix;
use crate::matroid::{MatroidOracle, OrderedMatroid, VectorMatroid};
use crate::poly::{PolyRing, Polynomial};

/// I(X) is generated by `η(H)^{|E - H|}`, J(X) by the products over the
/// cocircuits, and `P[B]` is the product over the externally passive
/// elements of the basis `B`.
pub struct CentralZonotopalAlgebra<K: ExactField> {
    core: AlgebraCore<K>,
}

impl<K: ExactField> CentralZonotopalAlgebra<K> {
    /// Central algebra of the columns of `matrix`
    pub fn new(matrix: &Matrix<K>, config: &ZonotopalConfig<K>) -> Result<Self> {
        Ok(CentralZonotopalAlgebra {
            core: AlgebraCore::new(matrix, config)?,
        })
    }
}

impl<K: ExactField> ZonotopalAlgebra<K> for CentralZonotopalAlgebra<K> {
    core_accessors!(Variant::Central);

    fn i_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        self.core
            .spaces
            .i
            .get_or_try_init(|| self.core.normal_powers(|facet| facet.cocircuit.len()))
            .map(Vec::as_slice)
    }

    fn j_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        self.core
            .spaces
            .j
            .get_or_try_init(|| {
                Ok(self
                    .core
                    .facets()?
                    .facets()
                    .iter()
                    .map(|facet| self.core.pure_tensor(&facet.cocircuit))
                    .collect())
            })
            .map(Vec::as_slice)
    }

    fn p_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core
            .spaces
            .p
            .get_or_try_init(|| Ok(self.core.passive_tensors(&self.core.matroid().bases())))
    }

    fn d_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core.spaces.d.get_or_try_init(|| {
            let i_gens = self.i_ideal_gens()?;
            let j_gens = self.j_ideal_gens()?;
            let p = self.p_space_basis()?;
            self.core
                .compute_d(Variant::Central, p, &hyperplane_pairs(i_gens, j_gens), j_gens)
        })
    }
}
