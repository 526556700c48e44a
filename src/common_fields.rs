//! Common field type aliases for easy access to popular exact fields.
//!
//! The rationals are the reference field for zonotopal algebras; the curve
//! fields are large prime fields in which every factorial weight that can
//! occur in practice is invertible, so they give the same answers modulo p.

use ark_bls12_381::{Fq as BlsFq, Fr as BlsFr};
use ark_bn254::{Fq as BnFq, Fr as BnFr};
use feanor_math::ring::*;

use crate::field_wrapper::ArkFieldWrapper;
use crate::rational::{rational_field, QQField};

// Type aliases for BN254 curve fields
/// The scalar field of BN254 (Fr)
pub type BN254ScalarField = ArkFieldWrapper<BnFr>;
/// The base field of BN254 (Fq)
pub type BN254BaseField = ArkFieldWrapper<BnFq>;

// Type aliases for BLS12-381 curve fields
/// The scalar field of BLS12-381 (Fr)
pub type BLS12_381ScalarField = ArkFieldWrapper<BlsFr>;
/// The base field of BLS12-381 (Fq)
pub type BLS12_381BaseField = ArkFieldWrapper<BlsFq>;

// RingValue wrappers for convenient usage
/// BN254 Fr field as a RingValue
pub type BnFrRing = RingValue<ArkFieldWrapper<BnFr>>;
/// BN254 Fq field as a RingValue
pub type BnFqRing = RingValue<ArkFieldWrapper<BnFq>>;
/// BLS12-381 Fr field as a RingValue
pub type BlsFrRing = RingValue<ArkFieldWrapper<BlsFr>>;
/// BLS12-381 Fq field as a RingValue
pub type BlsFqRing = RingValue<ArkFieldWrapper<BlsFq>>;

lazy_static::lazy_static! {
    /// The rational numbers
    pub static ref QQ: QQField = rational_field();

    /// Pre-initialized BN254 scalar field (Fr)
    pub static ref BN254_FR: BnFrRing = RingValue::from(ArkFieldWrapper::<BnFr>::new());

    /// Pre-initialized BN254 base field (Fq)
    pub static ref BN254_FQ: BnFqRing = RingValue::from(ArkFieldWrapper::<BnFq>::new());

    /// Pre-initialized BLS12-381 scalar field (Fr)
    pub static ref BLS12_381_FR: BlsFrRing = RingValue::from(ArkFieldWrapper::<BlsFr>::new());

    /// Pre-initialized BLS12-381 base field (Fq)
    pub static ref BLS12_381_FQ: BlsFqRing = RingValue::from(ArkFieldWrapper::<BlsFq>::new());
}

/// Create a new BN254 scalar field instance
#[inline]
pub fn bn254_scalar_field() -> BnFrRing {
    RingValue::from(ArkFieldWrapper::new())
}

/// Create a new BN254 base field instance
#[inline]
pub fn bn254_base_field() -> BnFqRing {
    RingValue::from(ArkFieldWrapper::new())
}

/// Create a new BLS12-381 scalar field instance
#[inline]
pub fn bls12_381_scalar_field() -> BlsFrRing {
    RingValue::from(ArkFieldWrapper::new())
}

/// Create a new BLS12-381 base field instance
#[inline]
pub fn bls12_381_base_field() -> BlsFqRing {
    RingValue::from(ArkFieldWrapper::new())
}
