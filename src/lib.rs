//! # zonotopal-algebra
//!
//! Zonotopal algebras of a vector matroid over an exact field.
//!
//! A matrix `X` whose columns span `K^n` determines, for a chosen total
//! order on its columns, four related objects in `K[x_0, ..., x_{n-1}]`:
//!
//! - the ideal I(X), generated by powers of the hyperplane normals,
//! - the ideal J(X), generated by products of column linear forms over cocircuits,
//! - the P-space basis, products over externally passive elements of
//!   independent sets,
//! - the D-space basis, the unique basis of the kernel of J(X) dual to P
//!   under the differential pairing `<p, q> = p(∂) q |_{x=0}`.
//!
//! Four variants are provided: central, internal, external and
//! forward-exchange.
//!
//! ## Features
//!
//! - **Exact fields**: feanor-math's rationals, plus any arkworks field through [`ArkFieldWrapper`]
//! - **Polynomials**: feanor-math's multivariate rings, with the differential pairing on top
//! - **Common fields**: pre-configured BN254 and BLS12-381 fields
//! - **Matroid layer**: ordered matroids, activities, hyperplane normals
//! - **Two D-space algorithms**: a global dual and a lattice extension
//!
//! ## Quick Start
//!
//! ```
//! use zonotopal_algebra::*;
//!
//! let q = rational_field();
//! // columns (1,0), (0,1), (1,1), (1,-1)
//! let x = Matrix::from_i64_rows(&q, &[vec![1, 0, 1, 1], vec![0, 1, 1, -1]]).unwrap();
//! let central = zonotopal_algebra(&x, Variant::Central, &ZonotopalConfig::new()).unwrap();
//! let spaces = central.zon_spaces().unwrap();
//! assert_eq!(spaces.dimension(), 6);
//! assert_eq!(spaces.degree_counts(), vec![1, 2, 3]);
//! ```
//!
//! ## Prime fields
//!
//! The differential pairing divides by factorials, so a field of
//! characteristic `p` only works while every P polynomial has degree below
//! `p`. Smaller characteristics fail with [`ZonotopalError::UnsupportedField`].
//!
//! ```
//! use zonotopal_algebra::*;
//!
//! let field = BN254_FR.clone();
//! let x = Matrix::from_i64_rows(&field, &[vec![1, 0, 1], vec![0, 1, 1]]).unwrap();
//! let internal = zonotopal_algebra(&x, Variant::Internal, &ZonotopalConfig::new()).unwrap();
//! assert_eq!(internal.d_space_basis().unwrap().len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/zonotopal-algebra/0.1.0")]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Fields
pub mod common_fields;
pub mod conversions;
pub mod field_wrapper;
pub mod homomorphisms;
pub mod prime_field;
pub mod rational;

// Linear algebra, polynomials, matroids
pub mod linalg;
pub mod matroid;
pub mod poly;

// Zonotopal constructions
pub mod algebra;
pub mod config;
pub mod error;

// Re-export main types
pub use algebra::{
    poly_lists_eq, poly_maps_eq, zonotopal_algebra, CentralZonotopalAlgebra, ExternalZonotopalAlgebra,
    ForwardExchangeZonotopalAlgebra, InternalZonotopalAlgebra, PolyMap, Variant, ZonSpaces, ZonotopalAlgebra,
};
pub use common_fields::*;
pub use config::{DStrategy, ZonotopalConfig, DEFAULT_MAX_GROUNDSET};
pub use conversions::{bigint_to_field, biguint_to_field, field_to_biguint, i64_to_field, limbs_to_biguint};
pub use error::{Result, ZonotopalError};
pub use field_wrapper::{ArkFieldWrapper, ExactField};
pub use homomorphisms::{ArkRing, RationalToFieldHom};
pub use linalg::Matrix;
pub use matroid::{ElementSet, GroundOrder, MatroidOracle, OrderConvention, OrderedMatroid, VectorMatroid};
pub use poly::{PolyRing, Polynomial};
pub use prime_field::FieldProperties;
pub use rational::{fraction, rational_field, QQField, Rational};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;
    use feanor_math::homomorphism::Homomorphism;
    use feanor_math::ring::*;

    #[test]
    fn test_library_basics() {
        let field = bn254_scalar_field();
        let a = field.int_hom().map(5);
        let b = field.int_hom().map(10);
        assert!(field.eq_el(&field.add(a, b), &field.int_hom().map(15)));

        let x = Matrix::from_i64_rows(&field, &[vec![1, 1, 1]]).unwrap();
        let algebra = zonotopal_algebra(&x, Variant::External, &ZonotopalConfig::new()).unwrap();
        assert_eq!(algebra.p_space_basis().unwrap().len(), 4);
    }

    #[test]
    fn test_version_info() {
        assert_eq!(NAME, "zonotopal-algebra");
        assert!(!VERSION.is_empty());
    }
}
