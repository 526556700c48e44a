//! Zonotopal algebras of a vector matroid.
//!
//! Each variant produces four collections from the same ordered matroid:
//! generators of the ideals I(X) and J(X), and the dual bases P(X) and D(X)
//! of the quotient `K[x] / J(X)`. They are computed on first request and
//! memoized per instance.
//!
//! ```
//! use zonotopal_algebra::algebra::{zonotopal_algebra, Variant};
//! use zonotopal_algebra::{rational_field, Matrix, ZonotopalConfig};
//!
//! let q = rational_field();
//! // columns (1,0), (0,1), (1,1)
//! let x = Matrix::from_i64_rows(&q, &[vec![1, 0, 1], vec![0, 1, 1]]).unwrap();
//! let algebra = zonotopal_algebra(&x, Variant::Central, &ZonotopalConfig::new()).unwrap();
//! assert_eq!(algebra.p_space_basis().unwrap().len(), 3);
//! assert_eq!(algebra.d_space_basis().unwrap().len(), 3);
//! ```

pub mod central;
pub mod dual;
pub mod external;
pub mod forward_exchange;
pub mod info;
pub mod internal;

pub use central::CentralZonotopalAlgebra;
pub use external::ExternalZonotopalAlgebra;
pub use forward_exchange::ForwardExchangeZonotopalAlgebra;
pub use info::ZonSpaces;
pub use internal::InternalZonotopalAlgebra;

use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::fmt;

use feanor_math::ring::*;
use tracing::debug_span;

use crate::config::{DStrategy, ZonotopalConfig};
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ExactField;
use crate::linalg::Matrix;
use crate::matroid::{ElementSet, Facet, FacetGeometry, MatroidOracle, OrderedMatroid, VectorMatroid};
use crate::poly::{PolyRing, Polynomial};

/// Polynomials indexed by subsets of the ground set.
pub type PolyMap<K> = BTreeMap<ElementSet, Polynomial<K>>;

/// The four flavours of zonotopal algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Indexed by bases; `dim = #bases`
    Central,
    /// Indexed by internal bases
    Internal,
    /// Indexed by independent sets
    External,
    /// Indexed by a forward-exchange collection of bases
    ForwardExchange,
}

impl Variant {
    /// The D-space algorithm used when [`DStrategy::Auto`] is configured
    pub fn natural_strategy(self) -> DStrategy {
        match self {
            Variant::Central | Variant::ForwardExchange => DStrategy::GlobalDual,
            Variant::Internal | Variant::External => DStrategy::LatticeExtension,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Central => "central",
            Variant::Internal => "internal",
            Variant::External => "external",
            Variant::ForwardExchange => "forward-exchange",
        };
        f.write_str(name)
    }
}

/// Common interface of all zonotopal algebra variants.
///
/// Every accessor is deterministic and memoized: the first call computes,
/// later calls return the cached value.
pub trait ZonotopalAlgebra<K: ExactField> {
    /// Which variant this is
    fn variant(&self) -> Variant;

    /// The polynomial ring `K[x_0, ..., x_{n-1}]`
    fn ring(&self) -> &PolyRing<K>;

    /// The ordered column matroid
    fn ordered(&self) -> &OrderedMatroid<VectorMatroid<K>>;

    /// The column matroid
    fn matroid(&self) -> &VectorMatroid<K> {
        self.ordered().matroid()
    }

    /// Generators of I(X)
    fn i_ideal_gens(&self) -> Result<&[Polynomial<K>]>;

    /// Generators of J(X)
    fn j_ideal_gens(&self) -> Result<&[Polynomial<K>]>;

    /// The P-space basis, keyed by its index sets
    fn p_space_basis(&self) -> Result<&PolyMap<K>>;

    /// The D-space basis, dual to P and inside the kernel of J
    fn d_space_basis(&self) -> Result<&PolyMap<K>>;

    /// All four collections at once
    fn zon_spaces(&self) -> Result<ZonSpaces<'_, K>> {
        Ok(ZonSpaces {
            variant: self.variant(),
            ring: self.ring(),
            i_ideal_gens: self.i_ideal_gens()?,
            j_ideal_gens: self.j_ideal_gens()?,
            p_space_basis: self.p_space_basis()?,
            d_space_basis: self.d_space_basis()?,
        })
    }

    /// Coordinates of `poly` in the P-space basis.
    ///
    /// The coefficient of `P[S]` is `<poly | D[S]>`. Fails with
    /// [`ZonotopalError::NotInSpan`] when `poly` is not a combination of P.
    fn p_space_coordinates(&self, poly: &Polynomial<K>) -> Result<BTreeMap<ElementSet, El<K>>> {
        let ring = self.ring();
        let p = self.p_space_basis()?;
        let d = self.d_space_basis()?;
        let coords: BTreeMap<ElementSet, El<K>> = d
            .iter()
            .map(|(key, dk)| (key.clone(), ring.bilinear_form(poly, dk)))
            .collect();
        expect_span(ring, poly, &coords, p)?;
        Ok(coords)
    }

    /// Coordinates of `poly` in the D-space basis, the coefficient of `D[S]` being `<P[S] | poly>`
    fn d_space_coordinates(&self, poly: &Polynomial<K>) -> Result<BTreeMap<ElementSet, El<K>>> {
        let ring = self.ring();
        let p = self.p_space_basis()?;
        let d = self.d_space_basis()?;
        let coords: BTreeMap<ElementSet, El<K>> = p
            .iter()
            .map(|(key, pk)| (key.clone(), ring.bilinear_form(pk, poly)))
            .collect();
        expect_span(ring, poly, &coords, d)?;
        Ok(coords)
    }
}

/// Check that `sum_S coords[S] basis[S]` gives back `poly`
fn expect_span<K: ExactField>(
    ring: &PolyRing<K>,
    poly: &Polynomial<K>,
    coords: &BTreeMap<ElementSet, El<K>>,
    basis: &PolyMap<K>,
) -> Result<()> {
    let mut rebuilt = ring.zero();
    for (key, c) in coords {
        if let Some(b) = basis.get(key) {
            rebuilt = ring.add_scaled(&rebuilt, b, c);
        }
    }
    if ring.eq(&rebuilt, poly) {
        Ok(())
    } else {
        Err(ZonotopalError::NotInSpan(ring.format(poly)))
    }
}

/// Whether two keyed polynomial collections have the same keys and equal polynomials
pub fn poly_maps_eq<K: ExactField>(ring: &PolyRing<K>, a: &PolyMap<K>, b: &PolyMap<K>) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|((ka, pa), (kb, pb))| ka == kb && ring.eq(pa, pb))
}

/// Whether two generator lists agree entry by entry
pub fn poly_lists_eq<K: ExactField>(ring: &PolyRing<K>, a: &[Polynomial<K>], b: &[Polynomial<K>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| ring.eq(p, q))
}

/// Build the algebra of `variant` for the columns of `matrix`, over the field of `matrix`.
pub fn zonotopal_algebra<K: ExactField + 'static>(
    matrix: &Matrix<K>,
    variant: Variant,
    config: &ZonotopalConfig<K>,
) -> Result<Box<dyn ZonotopalAlgebra<K>>> {
    Ok(match variant {
        Variant::Central => Box::new(CentralZonotopalAlgebra::new(matrix, config)?),
        Variant::Internal => Box::new(InternalZonotopalAlgebra::new(matrix, config)?),
        Variant::External => Box::new(ExternalZonotopalAlgebra::new(matrix, config)?),
        Variant::ForwardExchange => Box::new(ForwardExchangeZonotopalAlgebra::new(matrix, config)?),
    })
}

/// Memo cells for the four collections.
struct Spaces<K: ExactField> {
    i: OnceCell<Vec<Polynomial<K>>>,
    j: OnceCell<Vec<Polynomial<K>>>,
    p: OnceCell<PolyMap<K>>,
    d: OnceCell<PolyMap<K>>,
}

impl<K: ExactField> Spaces<K> {
    fn new() -> Self {
        Spaces {
            i: OnceCell::new(),
            j: OnceCell::new(),
            p: OnceCell::new(),
            d: OnceCell::new(),
        }
    }
}

/// State shared by all variants: ring, ordered matroid, facets and caches.
struct AlgebraCore<K: ExactField> {
    ring: PolyRing<K>,
    ordered: OrderedMatroid<VectorMatroid<K>>,
    facets: OnceCell<FacetGeometry<K>>,
    d_strategy: DStrategy,
    spaces: Spaces<K>,
}

impl<K: ExactField> AlgebraCore<K> {
    /// Validate the input and set up the ordered matroid and ring
    fn new(matrix: &Matrix<K>, config: &ZonotopalConfig<K>) -> Result<Self> {
        let (rows, cols) = (matrix.nrows(), matrix.ncols());
        if rows == 0 || cols == 0 {
            return Err(ZonotopalError::EmptyMatrix { rows, cols });
        }
        if cols > config.max_groundset {
            return Err(ZonotopalError::GroundSetTooLarge {
                size: cols,
                limit: config.max_groundset,
            });
        }
        let matroid = VectorMatroid::new(matrix);
        if matroid.full_rank() < rows {
            return Err(ZonotopalError::RankDeficient {
                rank: matroid.full_rank(),
                rows,
            });
        }
        let field = matrix.field().clone();
        let ring = match &config.variable_names {
            Some(names) if names.len() != rows => {
                return Err(ZonotopalError::VariableNames {
                    expected: rows,
                    found: names.len(),
                })
            }
            Some(names) => PolyRing::with_names(field, names.clone()),
            None => PolyRing::new(field, rows),
        };
        let ordered = OrderedMatroid::new(matroid, &config.order)?;
        Ok(AlgebraCore {
            ring,
            ordered,
            facets: OnceCell::new(),
            d_strategy: config.d_strategy,
            spaces: Spaces::new(),
        })
    }

    fn matroid(&self) -> &VectorMatroid<K> {
        self.ordered.matroid()
    }

    fn facets(&self) -> Result<&FacetGeometry<K>> {
        self.facets.get_or_try_init(|| FacetGeometry::new(self.matroid()))
    }

    /// `η(H)^k` for every hyperplane, with `k` given per facet
    fn normal_powers<F>(&self, exponent: F) -> Result<Vec<Polynomial<K>>>
    where
        F: Fn(&Facet<K>) -> usize,
    {
        Ok(self
            .facets()?
            .facets()
            .iter()
            .map(|facet| self.ring.pow(&self.ring.linear_form(&facet.normal), exponent(facet)))
            .collect())
    }

    /// Product of the linear forms of the columns in `s`
    fn pure_tensor(&self, s: &ElementSet) -> Polynomial<K> {
        let matroid = self.matroid();
        self.ring.pure_tensor(s.iter().map(|&e| matroid.column(e)))
    }

    /// `pure_tensor(passive(S) - S)` for each set
    fn passive_tensors(&self, sets: &[ElementSet]) -> PolyMap<K> {
        sets.iter()
            .map(|s| (s.clone(), self.pure_tensor(&self.ordered.external_passive(s))))
            .collect()
    }

    /// Compute D for `p` with the configured strategy (or `natural` on `Auto`)
    fn compute_d(
        &self,
        variant: Variant,
        p: &PolyMap<K>,
        pairs: &[(&Polynomial<K>, &Polynomial<K>)],
        j_gens: &[Polynomial<K>],
    ) -> Result<PolyMap<K>> {
        let strategy = match self.d_strategy {
            DStrategy::Auto => variant.natural_strategy(),
            chosen => chosen,
        };
        let _span = debug_span!("d_space_basis", %variant, ?strategy, keys = p.len()).entered();
        dual::check_field(&self.ring, p)?;
        let kernels = dual::degree_kernels(&self.ring, j_gens, p)?;
        match strategy {
            DStrategy::LatticeExtension => dual::lattice_extension(&self.ring, &self.ordered, p, j_gens, &kernels),
            _ => dual::global_dual(&self.ring, p, pairs, j_gens, &kernels),
        }
    }
}

/// Pair up I and J generators that belong to the same hyperplane
fn hyperplane_pairs<'a, K: ExactField>(
    i_gens: &'a [Polynomial<K>],
    j_gens: &'a [Polynomial<K>],
) -> Vec<(&'a Polynomial<K>, &'a Polynomial<K>)> {
    i_gens.iter().zip(j_gens).collect()
}

/// Implements the accessors every variant forwards to its [`AlgebraCore`].
macro_rules! core_accessors {
    ($variant:expr) => {
        fn variant(&self) -> Variant {
            $variant
        }

        fn ring(&self) -> &PolyRing<K> {
            &self.core.ring
        }

        fn ordered(&self) -> &OrderedMatroid<VectorMatroid<K>> {
            &self.core.ordered
        }
    };
}

pub(crate) use core_accessors;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matroid::GroundOrder;
    use crate::rational::{fraction, rational_field, QQField};

    fn triangle() -> Matrix<QQField> {
        Matrix::from_i64_rows(&rational_field(), &[vec![1, 0, 1], vec![0, 1, 1]]).unwrap()
    }

    // columns (1,0), (0,1), (1,1), (1,-1)
    fn four_lines() -> Matrix<QQField> {
        Matrix::from_i64_rows(&rational_field(), &[vec![1, 0, 1, 1], vec![0, 1, 1, -1]]).unwrap()
    }

    fn set(xs: &[usize]) -> ElementSet {
        xs.iter().copied().collect()
    }

    #[test]
    fn test_validation() {
        let q = rational_field();
        let config = ZonotopalConfig::new();

        let empty = Matrix::from_rows(q.clone(), vec![]).unwrap();
        assert!(matches!(
            zonotopal_algebra(&empty, Variant::Central, &config),
            Err(ZonotopalError::EmptyMatrix { .. })
        ));

        let deficient = Matrix::from_i64_rows(&q, &[vec![1, 2], vec![2, 4]]).unwrap();
        assert!(matches!(
            zonotopal_algebra(&deficient, Variant::Central, &config),
            Err(ZonotopalError::RankDeficient { rank: 1, rows: 2 })
        ));

        let limited = ZonotopalConfig::new().with_max_groundset(2);
        assert!(matches!(
            zonotopal_algebra(&triangle(), Variant::External, &limited),
            Err(ZonotopalError::GroundSetTooLarge { size: 3, limit: 2 })
        ));

        let names = ZonotopalConfig::new().with_variable_names(["x"]);
        assert!(matches!(
            zonotopal_algebra(&triangle(), Variant::Central, &names),
            Err(ZonotopalError::VariableNames { expected: 2, found: 1 })
        ));

        let bad_order = ZonotopalConfig::new().with_order(GroundOrder::Explicit(vec![0, 1]));
        assert!(matches!(
            zonotopal_algebra(&triangle(), Variant::Internal, &bad_order),
            Err(ZonotopalError::InvalidOrder(_))
        ));
    }

    #[test]
    fn test_factory_dispatch() {
        for variant in [
            Variant::Central,
            Variant::Internal,
            Variant::External,
            Variant::ForwardExchange,
        ] {
            let algebra = zonotopal_algebra(&triangle(), variant, &ZonotopalConfig::new()).unwrap();
            assert_eq!(algebra.variant(), variant);
            assert_eq!(algebra.ring().nvars(), 2);
            assert_eq!(algebra.matroid().groundset_size(), 3);
        }
        assert_eq!(Variant::ForwardExchange.to_string(), "forward-exchange");
        assert_eq!(Variant::External.natural_strategy(), DStrategy::LatticeExtension);
    }

    #[test]
    fn test_memoized_results_are_shared() {
        let algebra = zonotopal_algebra(&triangle(), Variant::Central, &ZonotopalConfig::new()).unwrap();
        let first = algebra.d_space_basis().unwrap() as *const PolyMap<_>;
        let second = algebra.d_space_basis().unwrap() as *const PolyMap<_>;
        assert_eq!(first, second);
    }

    #[test]
    fn test_p_space_coordinates_of_four_lines() {
        let q = rational_field();
        let algebra = zonotopal_algebra(&four_lines(), Variant::Central, &ZonotopalConfig::new()).unwrap();
        let r = algebra.ring();
        let p = algebra.p_space_basis().unwrap();

        // every basis element has a single unit coordinate
        for (key, pk) in p {
            let coords = algebra.p_space_coordinates(pk).unwrap();
            for (other, c) in &coords {
                assert_eq!(q.is_one(c), other == key);
                assert!(q.is_one(c) || q.is_zero(c));
            }
        }

        // 3 P[{1,2}] - 1/2 P[{0,1}]
        let minus_half = fraction(&q, -1, 2).unwrap();
        let poly = r.add(&r.scale(&p[&set(&[1, 2])], &q.from_i64(3)), &r.scale(&p[&set(&[0, 1])], &minus_half));
        let coords = algebra.p_space_coordinates(&poly).unwrap();
        assert_eq!(coords.len(), 6);
        assert!(q.eq_el(&coords[&set(&[1, 2])], &q.from_i64(3)));
        assert!(q.eq_el(&coords[&set(&[0, 1])], &minus_half));
        assert!(q.is_zero(&coords[&set(&[0, 2])]));

        // x^3 lives above the top degree of P
        let cube = r.pow(&r.variable(0), 3);
        assert!(matches!(
            algebra.p_space_coordinates(&cube),
            Err(ZonotopalError::NotInSpan(_))
        ));
    }

    #[test]
    fn test_d_space_coordinates() {
        let q = rational_field();
        let algebra = zonotopal_algebra(&four_lines(), Variant::Central, &ZonotopalConfig::new()).unwrap();
        let r = algebra.ring();
        let d = algebra.d_space_basis().unwrap();
        let key = set(&[0, 2]);
        let poly = r.add(&r.scale(&d[&key], &q.from_i64(-2)), &d[&set(&[2, 3])]);
        let coords = algebra.d_space_coordinates(&poly).unwrap();
        assert!(q.eq_el(&coords[&key], &q.from_i64(-2)));
        assert!(q.is_one(&coords[&set(&[2, 3])]));
        assert!(q.is_zero(&coords[&set(&[0, 1])]));

        // J(X) contains x*y*(x+y), so x^2*y is not in its kernel
        let outside = r.mul(&r.pow(&r.variable(0), 2), &r.variable(1));
        match algebra.d_space_coordinates(&outside) {
            Err(ZonotopalError::NotInSpan(shown)) => assert_eq!(shown, "x0^2*x1"),
            other => panic!("expected NotInSpan, got {:?}", other.err()),
        }
    }
}
