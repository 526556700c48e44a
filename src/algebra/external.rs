//! The external zonotopal algebra, indexed by all independent sets.

use once_cell::sync::OnceCell;

use super::{core_accessors, AlgebraCore, PolyMap, Variant, ZonotopalAlgebra};
use crate::config::ZonotopalConfig;
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;
use crate::linalg::{rank, Matrix};
use crate::matroid::{minimal_transversals, ElementSet, MatroidOracle, OrderedMatroid, VectorMatroid};
use crate::poly::{PolyRing, Polynomial};

/// External algebra: the columns are extended by a basis `E` of the ambient
/// space. Every independent set grows into an external basis of `[X | E]`
/// by adding extension columns greedily, and J(X) is generated by the
/// products over the minimal sets meeting all external bases.
pub struct ExternalZonotopalAlgebra<K: ExactField> {
    core: AlgebraCore<K>,
    extension: Matrix<K>,
    block: VectorMatroid<K>,
    cocircuits: OnceCell<Vec<ElementSet>>,
}

impl<K: ExactField> ExternalZonotopalAlgebra<K> {
    /// External algebra of the columns of `matrix`, extended by the
    /// configured basis (the identity by default)
    pub fn new(matrix: &Matrix<K>, config: &ZonotopalConfig<K>) -> Result<Self> {
        let core = AlgebraCore::new(matrix, config)?;
        let field = matrix.field();
        let n = matrix.nrows();
        let extension = match &config.extension_basis {
            Some(e) => e.clone(),
            None => Matrix::identity(field, n),
        };
        if extension.nrows() != n || extension.ncols() != n {
            return Err(ZonotopalError::ExtensionBasisMismatch(format!(
                "expected a {}x{} matrix, got {}x{}",
                n,
                n,
                extension.nrows(),
                extension.ncols()
            )));
        }
        if rank(field, &extension.columns()) < n {
            return Err(ZonotopalError::ExtensionBasisMismatch(
                "extension columns do not span the ambient space".to_string(),
            ));
        }
        let block = VectorMatroid::new(&matrix.hstack(&extension)?);
        Ok(ExternalZonotopalAlgebra {
            core,
            extension,
            block,
            cocircuits: OnceCell::new(),
        })
    }

    /// The extension basis `E`
    pub fn extension_basis(&self) -> &Matrix<K> {
        &self.extension
    }

    /// Column matroid of `[X | E]`; the extension columns are `m..m+n`
    pub fn block_matroid(&self) -> &VectorMatroid<K> {
        &self.block
    }

    /// Basis of the block matroid extending the independent set `i` greedily
    /// by extension columns
    pub fn external_basis(&self, i: &ElementSet) -> ElementSet {
        let n = self.extension.ncols();
        let m = self.block.groundset_size() - n;
        let mut basis = i.clone();
        for e in m..m + n {
            if basis.len() == n {
                break;
            }
            basis.insert(e);
            if !self.block.is_independent(&basis) {
                basis.remove(&e);
            }
        }
        basis
    }

    /// Inclusion-minimal subsets of the block ground set meeting every
    /// external basis
    pub fn generalized_cocircuits(&self) -> &[ElementSet] {
        self.cocircuits.get_or_init(|| {
            let external_bases: Vec<ElementSet> = self
                .core
                .matroid()
                .independent_sets()
                .iter()
                .map(|i| self.external_basis(i))
                .collect();
            minimal_transversals(&external_bases)
        })
    }
}

impl<K: ExactField> ZonotopalAlgebra<K> for ExternalZonotopalAlgebra<K> {
    core_accessors!(Variant::External);

    fn i_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        self.core
            .spaces
            .i
            .get_or_try_init(|| self.core.normal_powers(|facet| facet.cocircuit.len() + 1))
            .map(Vec::as_slice)
    }

    fn j_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        Ok(self.core.spaces.j.get_or_init(|| {
            self.generalized_cocircuits()
                .iter()
                .map(|c| self.core.ring.pure_tensor(c.iter().map(|&e| self.block.column(e))))
                .collect::<Vec<_>>()
        })
        .as_slice())
    }

    fn p_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core
            .spaces
            .p
            .get_or_try_init(|| Ok(self.core.passive_tensors(&self.core.matroid().independent_sets())))
    }

    fn d_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core.spaces.d.get_or_try_init(|| {
            let j_gens = self.j_ideal_gens()?;
            let p = self.p_space_basis()?;
            self.core.compute_d(Variant::External, p, &[], j_gens)
        })
    }
}
