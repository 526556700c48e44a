//! The field of rational numbers, as feanor-math's `RationalField` over big integers.

use feanor_math::divisibility::DivisibilityRingStore;
use feanor_math::integer::{BigIntRing, IntegerRing};
use feanor_math::ring::*;
use feanor_math::rings::rational::{RationalField, RationalFieldBase};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::field_wrapper::ExactField;
use crate::prime_field::FieldProperties;

/// The rationals `Q` with arbitrary precision numerators and denominators.
pub type QQField = RationalField<BigIntRing>;

/// A rational element of [`QQField`].
pub type Rational = El<QQField>;

impl<I> FieldProperties for RationalFieldBase<I>
where
    I: RingStore,
    I::Type: IntegerRing,
{
    fn field_characteristic_biguint(&self) -> BigUint {
        BigUint::zero()
    }

    fn is_prime_field(&self) -> bool {
        false
    }
}

/// Create the rational field
pub fn rational_field() -> QQField {
    RationalField::new(BigIntRing::RING)
}

/// The rational `num / den`, `None` when `den` is zero.
pub fn fraction(field: &QQField, num: i64, den: i64) -> Option<Rational> {
    field.checked_div(&field.from_i64(num), &field.from_i64(den))
}
