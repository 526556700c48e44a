//! Forward-exchange zonotopal algebras, indexed by a chosen collection of bases.

use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use tracing::debug;

use super::{core_accessors, hyperplane_pairs, AlgebraCore, PolyMap, Variant, ZonotopalAlgebra};
use crate::config::ZonotopalConfig;
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;
use crate::linalg::Matrix;
use crate::matroid::{ElementSet, GroundOrder, MatroidOracle, OrderConvention, OrderedMatroid, VectorMatroid};
use crate::poly::{PolyRing, Polynomial};

/// Algebra of a collection of bases 𝔅.
///
/// 𝔅 is first cut down to its maximal members in the external order of the
/// reversed ground set. The order of a cocircuit `C` is then the largest
/// number of elements of `C` that are not larger than `min(C ∩ B)`, over
/// those maximal `B`. I(X) and J(X) use that order as exponent and as number
/// of factors. With every basis supplied this is the central algebra;
/// collections that are not forward-exchange fail when D is computed.
pub struct ForwardExchangeZonotopalAlgebra<K: ExactField> {
    core: AlgebraCore<K>,
    bases: Vec<ElementSet>,
    maximal: Vec<ElementSet>,
    orders: OnceCell<Vec<usize>>,
}

impl<K: ExactField> ForwardExchangeZonotopalAlgebra<K> {
    /// Algebra of the configured candidate bases (all bases by default)
    pub fn new(matrix: &Matrix<K>, config: &ZonotopalConfig<K>) -> Result<Self> {
        let core = AlgebraCore::new(matrix, config)?;
        let bases = match &config.candidate_bases {
            Some(candidates) => validate_bases(core.matroid(), candidates)?,
            None => core.matroid().bases(),
        };
        let reversed = OrderedMatroid::new(VectorMatroid::new(matrix), &GroundOrder::Reversed)?;
        let maximal = reversed.maximal_elements(&bases, OrderConvention::Antimatroid);
        debug!(bases = bases.len(), maximal = maximal.len(), "forward-exchange bases");
        Ok(ForwardExchangeZonotopalAlgebra {
            core,
            bases,
            maximal,
            orders: OnceCell::new(),
        })
    }

    /// The basis collection, sorted
    pub fn bases(&self) -> &[ElementSet] {
        &self.bases
    }

    /// Members of the collection not below another one in the external order of
    /// the reversed ground set (the empty set on top)
    pub fn maximal_bases(&self) -> &[ElementSet] {
        &self.maximal
    }

    /// Order of each cocircuit, in hyperplane order
    pub fn cocircuit_orders(&self) -> Result<&[usize]> {
        self.orders
            .get_or_try_init(|| {
                Ok(self
                    .core
                    .facets()?
                    .facets()
                    .iter()
                    .map(|facet| self.cocircuit_order(&facet.cocircuit))
                    .collect())
            })
            .map(Vec::as_slice)
    }

    fn cocircuit_order(&self, cocircuit: &ElementSet) -> usize {
        let ordered = &self.core.ordered;
        self.maximal
            .iter()
            .filter_map(|b| {
                let meet: ElementSet = cocircuit.intersection(b).copied().collect();
                let least = ordered.position(ordered.min_element(&meet)?);
                Some(cocircuit.iter().filter(|&&x| ordered.position(x) <= least).count())
            })
            .max()
            .unwrap_or(0)
    }
}

fn validate_bases<M: MatroidOracle>(matroid: &M, candidates: &[ElementSet]) -> Result<Vec<ElementSet>> {
    if candidates.is_empty() {
        return Err(ZonotopalError::InvalidBasisCollection("no bases supplied".to_string()));
    }
    let m = matroid.groundset_size();
    let mut unique = BTreeSet::new();
    for b in candidates {
        if b.iter().any(|&e| e >= m) {
            return Err(ZonotopalError::InvalidBasisCollection(format!(
                "{:?} is not a subset of the ground set",
                b
            )));
        }
        if !matroid.is_independent(b) {
            return Err(ZonotopalError::NotIndependent(b.iter().copied().collect()));
        }
        if b.len() != matroid.full_rank() {
            return Err(ZonotopalError::InvalidBasisCollection(format!("{:?} is not a basis", b)));
        }
        if !unique.insert(b.clone()) {
            return Err(ZonotopalError::InvalidBasisCollection(format!("{:?} is listed twice", b)));
        }
    }
    Ok(unique.into_iter().collect())
}

impl<K: ExactField> ZonotopalAlgebra<K> for ForwardExchangeZonotopalAlgebra<K> {
    core_accessors!(Variant::ForwardExchange);

    fn i_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        self.core
            .spaces
            .i
            .get_or_try_init(|| {
                let orders = self.cocircuit_orders()?;
                Ok(self
                    .core
                    .facets()?
                    .facets()
                    .iter()
                    .zip(orders)
                    .map(|(facet, &k)| self.core.ring.pow(&self.core.ring.linear_form(&facet.normal), k))
                    .collect())
            })
            .map(Vec::as_slice)
    }

    fn j_ideal_gens(&self) -> Result<&[Polynomial<K>]> {
        self.core
            .spaces
            .j
            .get_or_try_init(|| {
                let orders = self.cocircuit_orders()?;
                let ordered = &self.core.ordered;
                Ok(self
                    .core
                    .facets()?
                    .facets()
                    .iter()
                    .zip(orders)
                    .map(|(facet, &k)| {
                        let smallest: ElementSet = ordered.sort_by_order(&facet.cocircuit).into_iter().take(k).collect();
                        self.core.pure_tensor(&smallest)
                    })
                    .collect())
            })
            .map(Vec::as_slice)
    }

    fn p_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core
            .spaces
            .p
            .get_or_try_init(|| Ok(self.core.passive_tensors(&self.bases)))
    }

    fn d_space_basis(&self) -> Result<&PolyMap<K>> {
        self.core.spaces.d.get_or_try_init(|| {
            let i_gens = self.i_ideal_gens()?;
            let j_gens = self.j_ideal_gens()?;
            let p = self.p_space_basis()?;
            self.core
                .compute_d(Variant::ForwardExchange, p, &hyperplane_pairs(i_gens, j_gens), j_gens)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{poly_lists_eq, poly_maps_eq, CentralZonotopalAlgebra};
    use crate::rational::{rational_field, QQField};
    use feanor_math::ring::*;

    fn set(xs: &[usize]) -> ElementSet {
        xs.iter().copied().collect()
    }

    // columns (1,0), (0,1), (1,1), (1,-1)
    fn four_lines() -> Matrix<QQField> {
        Matrix::from_i64_rows(&rational_field(), &[vec![1, 0, 1, 1], vec![0, 1, 1, -1]]).unwrap()
    }

    #[test]
    fn test_all_bases_is_central() {
        let config = ZonotopalConfig::new();
        let fe = ForwardExchangeZonotopalAlgebra::new(&four_lines(), &config).unwrap();
        let central = CentralZonotopalAlgebra::new(&four_lines(), &config).unwrap();
        let r = fe.ring();
        // reversed passives {0,1}, {0,2}, {1,2} are the largest
        assert_eq!(fe.maximal_bases(), &[set(&[0, 3]), set(&[1, 3]), set(&[2, 3])]);
        assert_eq!(fe.cocircuit_orders().unwrap(), &[3, 3, 3, 3]);
        assert!(poly_lists_eq(r, fe.i_ideal_gens().unwrap(), central.i_ideal_gens().unwrap()));
        assert!(poly_lists_eq(r, fe.j_ideal_gens().unwrap(), central.j_ideal_gens().unwrap()));
        assert!(poly_maps_eq(r, fe.p_space_basis().unwrap(), central.p_space_basis().unwrap()));
        assert!(poly_maps_eq(r, fe.d_space_basis().unwrap(), central.d_space_basis().unwrap()));
    }

    #[test]
    fn test_proper_collection() {
        let q = rational_field();
        let config = ZonotopalConfig::new().with_candidate_bases(vec![set(&[2, 3]), set(&[0, 2]), set(&[0, 3])]);
        let fe = ForwardExchangeZonotopalAlgebra::new(&four_lines(), &config).unwrap();
        assert_eq!(fe.bases(), &[set(&[0, 2]), set(&[0, 3]), set(&[2, 3])]);
        // {0,2} has reversed passives {1}, below both {0,1} of {2,3} and {1,2} of {0,3}
        assert_eq!(fe.maximal_bases(), &[set(&[0, 3]), set(&[2, 3])]);
        assert_eq!(fe.cocircuit_orders().unwrap(), &[3, 2, 3, 3]);

        let r = fe.ring();
        let p = fe.p_space_basis().unwrap();
        assert_eq!(r.degree(&p[&set(&[0, 2])]), Some(2));
        assert_eq!(r.degree(&p[&set(&[0, 3])]), Some(2));
        assert!(r.eq(&p[&set(&[2, 3])], &r.one()));

        let d = fe.d_space_basis().unwrap();
        for (ka, pa) in p {
            for (kb, db) in d {
                let pairing = r.bilinear_form(pa, db);
                assert_eq!(q.is_one(&pairing), ka == kb);
                assert!(ka == kb || q.is_zero(&pairing));
            }
        }
        for db in d.values() {
            for j in fe.j_ideal_gens().unwrap() {
                assert!(r.is_zero(&r.differentiate(j, db)));
            }
        }
    }

    #[test]
    fn test_truncated_cocircuits() {
        let config = ZonotopalConfig::new().with_candidate_bases(vec![set(&[2, 3]), set(&[0, 3])]);
        let fe = ForwardExchangeZonotopalAlgebra::new(&four_lines(), &config).unwrap();
        let r = fe.ring();
        // the cocircuit {0,2,3} of the line through column 1 keeps its two smallest elements
        let j = &fe.j_ideal_gens().unwrap()[1];
        let expected = r.mul(&r.variable(0), &r.add(&r.variable(0), &r.variable(1)));
        assert!(r.eq(j, &expected));
        assert_eq!(r.degree(&fe.i_ideal_gens().unwrap()[1]), Some(2));
    }

    #[test]
    fn test_invalid_collections() {
        let build = |bases: Vec<ElementSet>| {
            ForwardExchangeZonotopalAlgebra::new(&four_lines(), &ZonotopalConfig::new().with_candidate_bases(bases))
        };
        assert!(matches!(build(vec![]), Err(ZonotopalError::InvalidBasisCollection(_))));
        assert!(matches!(build(vec![set(&[0])]), Err(ZonotopalError::InvalidBasisCollection(_))));
        assert!(matches!(build(vec![set(&[0, 7])]), Err(ZonotopalError::InvalidBasisCollection(_))));
        assert!(matches!(
            build(vec![set(&[0, 1]), set(&[0, 1])]),
            Err(ZonotopalError::InvalidBasisCollection(_))
        ));
    }

    #[test]
    fn test_not_forward_exchange() {
        let q = rational_field();
        let triangle = Matrix::from_i64_rows(&q, &[vec![1, 0, 1], vec![0, 1, 1]]).unwrap();
        let config = ZonotopalConfig::new().with_candidate_bases(vec![set(&[0, 1])]);
        let fe = ForwardExchangeZonotopalAlgebra::new(&triangle, &config).unwrap();
        assert!(matches!(
            fe.d_space_basis(),
            Err(ZonotopalError::DimensionMismatch {
                degree: 1,
                kernel: 0,
                expected: 1
            })
        ));
    }
}
