//! A view of the four collections of an algebra, with a text report.

use std::fmt;

use super::{PolyMap, Variant};
use crate::field_wrapper::ExactField;
use crate::poly::{PolyRing, Polynomial};

/// I/J generators and P/D bases of one algebra, borrowed from its caches.
pub struct ZonSpaces<'a, K: ExactField> {
    /// Which variant produced these
    pub variant: Variant,
    /// Ring the polynomials live in
    pub ring: &'a PolyRing<K>,
    /// Generators of I(X)
    pub i_ideal_gens: &'a [Polynomial<K>],
    /// Generators of J(X)
    pub j_ideal_gens: &'a [Polynomial<K>],
    /// P-space basis
    pub p_space_basis: &'a PolyMap<K>,
    /// D-space basis
    pub d_space_basis: &'a PolyMap<K>,
}

impl<K: ExactField> ZonSpaces<'_, K> {
    /// Dimension of `K[x] / J(X)`
    pub fn dimension(&self) -> usize {
        self.p_space_basis.len()
    }

    /// Number of P-space basis elements in each degree, starting at 0
    pub fn degree_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for degree in self.p_space_basis.values().filter_map(|p| self.ring.degree(p)) {
            if counts.len() <= degree {
                counts.resize(degree + 1, 0);
            }
            counts[degree] += 1;
        }
        counts
    }
}

impl<K: ExactField> fmt::Display for ZonSpaces<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} zonotopal algebra over {} in {} variables, dimension {}",
            self.variant,
            self.ring.field().field_name(),
            self.ring.nvars(),
            self.dimension()
        )?;
        writeln!(f, "I generators:")?;
        for g in self.i_ideal_gens {
            writeln!(f, "  {}", self.ring.format(g))?;
        }
        writeln!(f, "J generators:")?;
        for g in self.j_ideal_gens {
            writeln!(f, "  {}", self.ring.format(g))?;
        }
        writeln!(f, "P basis:")?;
        for (key, p) in self.p_space_basis {
            writeln!(f, "  {:?}: {}", key, self.ring.format(p))?;
        }
        writeln!(f, "D basis:")?;
        for (key, d) in self.d_space_basis {
            writeln!(f, "  {:?}: {}", key, self.ring.format(d))?;
        }
        Ok(())
    }
}
