//! Construction options for zonotopal algebras.

use std::fmt;

use crate::field_wrapper::ExactField;
use crate::linalg::Matrix;
use crate::matroid::{ElementSet, GroundOrder};

/// Largest ground set accepted by default; every construction enumerates subsets.
pub const DEFAULT_MAX_GROUNDSET: usize = 16;

/// Algorithm used for the D-space basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DStrategy {
    /// The variant's natural choice: global dual for central and
    /// forward-exchange, lattice extension for internal and external
    #[default]
    Auto,
    /// Dual basis of P in its own span, projected into the kernel of J
    GlobalDual,
    /// Biorthogonal extension along chains of independent sets
    LatticeExtension,
}

/// Options for [`zonotopal_algebra`](crate::algebra::zonotopal_algebra).
pub struct ZonotopalConfig<K: ExactField> {
    /// Total order on the columns
    pub order: GroundOrder,

    /// Names of the polynomial ring variables (default `x0, x1, ...`)
    pub variable_names: Option<Vec<String>>,

    /// Square nonsingular matrix extending the columns (external variant, default identity)
    pub extension_basis: Option<Matrix<K>>,

    /// Bases defining a forward-exchange algebra (default all bases)
    pub candidate_bases: Option<Vec<ElementSet>>,

    /// Largest accepted number of columns
    pub max_groundset: usize,

    /// D-space algorithm
    pub d_strategy: DStrategy,
}

impl<K: ExactField> ZonotopalConfig<K> {
    /// Create a new default configuration
    pub fn new() -> Self {
        ZonotopalConfig {
            order: GroundOrder::Natural,
            variable_names: None,
            extension_basis: None,
            candidate_bases: None,
            max_groundset: DEFAULT_MAX_GROUNDSET,
            d_strategy: DStrategy::Auto,
        }
    }

    /// Set the column order
    pub fn with_order(mut self, order: GroundOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the variable names
    pub fn with_variable_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.variable_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the extension basis
    pub fn with_extension_basis(mut self, basis: Matrix<K>) -> Self {
        self.extension_basis = Some(basis);
        self
    }

    /// Set the forward-exchange bases
    pub fn with_candidate_bases(mut self, bases: Vec<ElementSet>) -> Self {
        self.candidate_bases = Some(bases);
        self
    }

    /// Set the ground set limit
    pub fn with_max_groundset(mut self, limit: usize) -> Self {
        self.max_groundset = limit;
        self
    }

    /// Set the D-space algorithm
    pub fn with_d_strategy(mut self, strategy: DStrategy) -> Self {
        self.d_strategy = strategy;
        self
    }
}

impl<K: ExactField> Default for ZonotopalConfig<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ExactField> Clone for ZonotopalConfig<K> {
    fn clone(&self) -> Self {
        ZonotopalConfig {
            order: self.order.clone(),
            variable_names: self.variable_names.clone(),
            extension_basis: self.extension_basis.clone(),
            candidate_bases: self.candidate_bases.clone(),
            max_groundset: self.max_groundset,
            d_strategy: self.d_strategy,
        }
    }
}

impl<K: ExactField> fmt::Debug for ZonotopalConfig<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZonotopalConfig")
            .field("order", &self.order)
            .field("variable_names", &self.variable_names)
            .field("extension_basis", &self.extension_basis)
            .field("candidate_bases", &self.candidate_bases)
            .field("max_groundset", &self.max_groundset)
            .field("d_strategy", &self.d_strategy)
            .finish()
    }
}
