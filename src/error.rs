//! Error type shared by every stage of the zonotopal pipeline.

use num_bigint::BigUint;
use thiserror::Error;

/// Failures raised while building or evaluating a zonotopal algebra.
///
/// All of these are validation or domain errors: the computations are
/// deterministic, so none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZonotopalError {
    /// The input matrix has no rows or no columns.
    #[error("matrix must have at least one row and one column (got {rows}x{cols})")]
    EmptyMatrix { rows: usize, cols: usize },

    /// Rows of the input matrix have different lengths.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The columns do not span the ambient space.
    #[error("matrix has rank {rank} but {rows} rows; the quotient would be infinite dimensional")]
    RankDeficient { rank: usize, rows: usize },

    /// The ground set is too large to enumerate.
    #[error("ground set of size {size} exceeds the configured limit {limit}")]
    GroundSetTooLarge { size: usize, limit: usize },

    /// Field characteristic divides a factorial weight of the bilinear form.
    #[error("field of characteristic {characteristic} cannot pair polynomials of degree {degree}")]
    UnsupportedField {
        characteristic: BigUint,
        degree: usize,
    },

    /// Wrong number of variable names for the polynomial ring.
    #[error("expected {expected} variable names, got {found}")]
    VariableNames { expected: usize, found: usize },

    /// The supplied ground-set order is not a permutation of `0..m`.
    #[error("invalid ground-set order: {0}")]
    InvalidOrder(String),

    /// A set passed where a hyperplane was required.
    #[error("{0:?} is not a hyperplane of the matroid")]
    NotHyperplane(Vec<usize>),

    /// A set passed where an independent set was required.
    #[error("{0:?} is not independent")]
    NotIndependent(Vec<usize>),

    /// The extension basis of the external variant is unusable.
    #[error("extension basis mismatch: {0}")]
    ExtensionBasisMismatch(String),

    /// The candidate bases of the forward-exchange variant are unusable.
    #[error("invalid basis collection: {0}")]
    InvalidBasisCollection(String),

    /// The kernel of J has the wrong dimension in some degree.
    #[error("degree {degree}: kernel of J has dimension {kernel}, P has {expected} elements")]
    DimensionMismatch {
        degree: usize,
        kernel: usize,
        expected: usize,
    },

    /// P and ker J do not pair non-degenerately.
    #[error("pairing between P and ker J is singular in degree {degree}")]
    SingularPairing { degree: usize },

    /// A polynomial is not a combination of the basis it was expanded in.
    #[error("{0} is not spanned by the basis polynomials")]
    NotInSpan(String),

    /// A rational could not be mapped because its denominator vanishes.
    #[error("denominator {0} is not invertible in the target field")]
    NonInvertibleDenominator(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ZonotopalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ZonotopalError::RankDeficient { rank: 1, rows: 2 };
        assert!(err.to_string().contains("rank 1"));

        let err = ZonotopalError::UnsupportedField {
            characteristic: BigUint::from(3u32),
            degree: 3,
        };
        assert_eq!(
            err.to_string(),
            "field of characteristic 3 cannot pair polynomials of degree 3"
        );

        let err = ZonotopalError::NotInSpan("x0^2".to_string());
        assert_eq!(err.to_string(), "x0^2 is not spanned by the basis polynomials");
    }
}
