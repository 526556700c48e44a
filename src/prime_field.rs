//! Prime field specializations that enable division, and the characteristic
//! queries that decide whether a field can carry the differential pairing.

use ark_ff::{Field, PrimeField};
use feanor_math::divisibility::*;
use feanor_math::pid::*;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::conversions::limbs_to_biguint;
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ArkFieldWrapper;

// Implement DivisibilityRing for prime fields (allows division by non-zero elements)
impl<F: PrimeField> DivisibilityRing for ArkFieldWrapper<F> {
    fn checked_left_div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        rhs.inverse().map(|inv| *lhs * inv)
    }

    fn is_unit(&self, el: &Self::Element) -> bool {
        !el.is_zero()
    }
}

// Implement Domain (no zero divisors)
impl<F: PrimeField> Domain for ArkFieldWrapper<F> {}

// Implement PrincipalIdealRing (every ideal is principal)
impl<F: PrimeField> PrincipalIdealRing for ArkFieldWrapper<F> {
    fn ideal_gen(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        if lhs.is_zero() && rhs.is_zero() {
            F::zero()
        } else {
            F::one()
        }
    }

    fn extended_ideal_gen(
        &self,
        lhs: &Self::Element,
        rhs: &Self::Element,
    ) -> (Self::Element, Self::Element, Self::Element) {
        match (lhs.inverse(), rhs.inverse()) {
            // 1 = lhs * lhs^-1 + rhs * 0
            (Some(lhs_inv), _) => (lhs_inv, F::zero(), F::one()),
            (None, Some(rhs_inv)) => (F::zero(), rhs_inv, F::one()),
            (None, None) => (F::one(), F::zero(), F::zero()),
        }
    }

    fn checked_div_min(&self, lhs: &Self::Element, rhs: &Self::Element) -> Option<Self::Element> {
        self.checked_left_div(lhs, rhs)
    }
}

// Implement EuclideanRing
impl<F: PrimeField> EuclideanRing for ArkFieldWrapper<F> {
    fn euclidean_div_rem(&self, lhs: Self::Element, rhs: &Self::Element) -> (Self::Element, Self::Element) {
        match rhs.inverse() {
            Some(inv) => (lhs * inv, F::zero()),
            None => panic!("Division by zero"),
        }
    }

    fn euclidean_deg(&self, el: &Self::Element) -> Option<usize> {
        if el.is_zero() {
            None
        } else {
            Some(0)
        }
    }
}

// Finally, implement Field trait from feanor-math
impl<F: PrimeField> feanor_math::field::Field for ArkFieldWrapper<F> {
    fn div(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        match rhs.inverse() {
            Some(inv) => *lhs * inv,
            None => panic!("Division by zero"),
        }
    }
}

/// Helper trait to extract field properties
pub trait FieldProperties {
    /// Get the characteristic of the field as a BigUint, `0` for characteristic zero
    fn field_characteristic_biguint(&self) -> BigUint;

    /// Check if the field is a prime field
    fn is_prime_field(&self) -> bool;

    /// Short human readable name, e.g. `Q` or `GF(p)`
    fn field_name(&self) -> String {
        if self.is_characteristic_zero() {
            "Q".to_string()
        } else {
            format!("GF({})", self.field_characteristic_biguint())
        }
    }

    /// Whether the field has characteristic zero
    fn is_characteristic_zero(&self) -> bool {
        self.field_characteristic_biguint().is_zero()
    }

    /// Whether every factorial weight `α!` with `|α| <= degree` is invertible.
    ///
    /// This holds for characteristic zero and for characteristic `p > degree`.
    fn supports_degree(&self, degree: usize) -> bool {
        let p = self.field_characteristic_biguint();
        p.is_zero() || p > BigUint::from(degree)
    }

    /// Fail with [`ZonotopalError::UnsupportedField`] unless [`supports_degree`](Self::supports_degree) holds.
    fn check_degree(&self, degree: usize) -> Result<()> {
        if self.supports_degree(degree) {
            Ok(())
        } else {
            Err(ZonotopalError::UnsupportedField {
                characteristic: self.field_characteristic_biguint(),
                degree,
            })
        }
    }
}

impl<F: PrimeField> FieldProperties for ArkFieldWrapper<F> {
    fn field_characteristic_biguint(&self) -> BigUint {
        limbs_to_biguint(<F as Field>::characteristic())
    }

    fn is_prime_field(&self) -> bool {
        true
    }
}
