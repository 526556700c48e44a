//! Type conversions between arkworks field elements, feanor-math integers and big integers.

use ark_ff::{BigInteger, Field, PrimeField};
use feanor_math::integer::IntegerRing;
use feanor_math::ordered::OrderedRing;
use num_bigint::{BigInt, BigUint};
use std::cmp::Ordering;

/// Assemble little-endian 64-bit limbs (as returned by `Field::characteristic`) into a BigUint.
pub fn limbs_to_biguint(limbs: &[u64]) -> BigUint {
    let bytes: Vec<u8> = limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect();
    BigUint::from_bytes_le(&bytes)
}

/// Convert a BigUint to an arkworks field element
///
/// This performs modular reduction if the value is larger than the field modulus.
pub fn biguint_to_field<F: PrimeField>(value: &BigUint) -> F {
    F::from_le_bytes_mod_order(&value.to_bytes_le())
}

/// Convert an arkworks field element to a BigUint
///
/// This returns the canonical representative in [0, p) where p is the field characteristic.
pub fn field_to_biguint<F: PrimeField>(el: &F) -> BigUint {
    let bytes = el.into_bigint().to_bytes_le();
    BigUint::from_bytes_le(&bytes)
}

/// Convert an i64 to an arkworks field element
///
/// This properly handles both positive and negative i64 values, including i64::MIN.
///
/// # Example
/// ```
/// use ark_bn254::Fr;
/// use zonotopal_algebra::i64_to_field;
///
/// let neg = i64_to_field::<Fr>(-100);
/// assert_eq!(neg, -Fr::from(100u64));
/// ```
pub fn i64_to_field<F: Field>(value: i64) -> F {
    let magnitude = F::from(value.unsigned_abs());
    if value < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Convert a signed BigInt to an arkworks field element
///
/// This performs modular reduction if the value is larger than the field modulus.
/// Negative values map to the additive inverse of their magnitude.
pub fn bigint_to_field<F: PrimeField>(value: &BigInt) -> F {
    let (sign, magnitude) = value.clone().into_parts();
    let field_elem = biguint_to_field::<F>(&magnitude);

    match sign {
        num_bigint::Sign::Minus => -field_elem,
        num_bigint::Sign::NoSign | num_bigint::Sign::Plus => field_elem,
    }
}

/// Absolute value of a feanor-math integer as a BigUint
pub fn feanor_int_to_biguint<I>(int_ring: &I, value: &I::Element) -> BigUint
where
    I: IntegerRing + ?Sized,
{
    let top = match int_ring.abs_highest_set_bit(value) {
        Some(top) => top,
        None => return BigUint::default(),
    };
    let mut bytes = vec![0u8; top / 8 + 1];
    for i in 0..=top {
        if int_ring.abs_is_bit_set(value, i) {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    BigUint::from_bytes_le(&bytes)
}

/// Convert a feanor-math integer to an arkworks field element
///
/// The absolute value is reduced modulo the field characteristic and the sign is reapplied.
pub fn feanor_int_to_field<F, I>(int_ring: &I, value: &I::Element) -> F
where
    F: PrimeField,
    I: IntegerRing + ?Sized,
{
    let magnitude: F = biguint_to_field(&feanor_int_to_biguint(int_ring, value));
    if OrderedRing::cmp(int_ring, value, &int_ring.zero()) == Ordering::Less {
        -magnitude
    } else {
        magnitude
    }
}
