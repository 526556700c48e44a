//! Core field wrapper that implements feanor-math's RingBase trait for arkworks fields,
//! and the [`ExactField`] bound used by every zonotopal computation.

use ark_ff::Field;
use feanor_math::field::Field as FeanorField;
use feanor_math::homomorphism::Homomorphism;
use feanor_math::integer::IntegerRing;
use feanor_math::ring::*;
use num_bigint::BigUint;
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;

use crate::error::Result;
use crate::prime_field::FieldProperties;

/// A feanor-math field in which the differential pairing can be evaluated exactly.
///
/// This is an alias for "a cloneable ring store whose ring is a feanor
/// [`Field`](feanor_math::field::Field) with known characteristic"; it is
/// implemented automatically for `RingValue<ArkFieldWrapper<F>>` and for
/// feanor's rational field. Elements are plain `El<Self>` values and every
/// operation goes through the store.
pub trait ExactField: RingStore<Type: FeanorField + FieldProperties> + Clone {
    /// Image of a machine integer, including `i64::MIN`.
    fn from_i64(&self, value: i64) -> El<Self> {
        let hom = self.int_hom();
        let radix = hom.map(1 << 16);
        let magnitude = value.unsigned_abs();
        let mut acc = self.zero();
        for shift in [48, 32, 16, 0] {
            acc = self.mul_ref(&acc, &radix);
            self.add_assign(&mut acc, hom.map(((magnitude >> shift) & 0xffff) as i32));
        }
        if value < 0 {
            self.negate(acc)
        } else {
            acc
        }
    }

    /// `n (n-1) ... (n-k+1)` as a field element.
    fn falling_factorial(&self, n: usize, k: usize) -> El<Self> {
        let mut acc = self.one();
        for i in 0..k {
            acc = self.mul_ref(&acc, &self.from_i64(n as i64 - i as i64));
        }
        acc
    }

    /// `k!` as a field element. Vanishes when the characteristic is at most `k`.
    fn factorial(&self, k: usize) -> El<Self> {
        self.falling_factorial(k, k)
    }

    /// Characteristic of the field, `0` for characteristic zero.
    fn characteristic_biguint(&self) -> BigUint {
        self.get_ring().field_characteristic_biguint()
    }

    /// Human readable name.
    fn field_name(&self) -> String {
        self.get_ring().field_name()
    }

    /// Fail unless every factorial weight up to `degree` is invertible.
    fn check_degree(&self, degree: usize) -> Result<()> {
        self.get_ring().check_degree(degree)
    }
}

impl<R> ExactField for R
where
    R: RingStore + Clone,
    R::Type: FeanorField + FieldProperties,
{
}

/// Wrapper struct that allows arkworks `Field` types to be used as feanor-math rings.
///
/// This is a zero-sized type that acts as a bridge between the two type systems.
/// All arkworks field operations are mapped to their feanor-math equivalents.
#[derive(Clone, Copy)]
pub struct ArkFieldWrapper<F: Field> {
    _phantom: PhantomData<F>,
}

impl<F: Field> ArkFieldWrapper<F> {
    /// Create a new instance of the field wrapper.
    ///
    /// # Example
    /// ```
    /// use ark_bn254::Fr;
    /// use feanor_math::ring::*;
    /// use zonotopal_algebra::ArkFieldWrapper;
    ///
    /// let field = ArkFieldWrapper::<Fr>::new();
    /// assert!(field.is_one(&field.from_int(1)));
    /// ```
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<F: Field> Default for ArkFieldWrapper<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> Debug for ArkFieldWrapper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArkFieldWrapper<{}>", std::any::type_name::<F>())
    }
}

impl<F: Field> Display for ArkFieldWrapper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", std::any::type_name::<F>())
    }
}

// All instances of the same field type are considered equal
impl<F: Field> PartialEq for ArkFieldWrapper<F> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<F: Field> Eq for ArkFieldWrapper<F> {}

impl<F: Field> RingBase for ArkFieldWrapper<F> {
    type Element = F;

    fn clone_el(&self, el: &Self::Element) -> Self::Element {
        *el
    }

    fn add_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        *lhs += rhs;
    }

    fn add_ref(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        *lhs + *rhs
    }

    fn negate_inplace(&self, el: &mut Self::Element) {
        *el = -*el;
    }

    fn mul_assign(&self, lhs: &mut Self::Element, rhs: Self::Element) {
        *lhs *= rhs;
    }

    fn mul_ref(&self, lhs: &Self::Element, rhs: &Self::Element) -> Self::Element {
        *lhs * *rhs
    }

    fn from_int(&self, value: i32) -> Self::Element {
        if value >= 0 {
            F::from(value as u64)
        } else {
            -F::from(value.unsigned_abs() as u64)
        }
    }

    fn eq_el(&self, lhs: &Self::Element, rhs: &Self::Element) -> bool {
        lhs == rhs
    }

    fn is_zero(&self, el: &Self::Element) -> bool {
        el.is_zero()
    }

    fn is_one(&self, el: &Self::Element) -> bool {
        el.is_one()
    }

    fn is_neg_one(&self, el: &Self::Element) -> bool {
        *el == -F::one()
    }

    fn zero(&self) -> Self::Element {
        F::zero()
    }

    fn one(&self) -> Self::Element {
        F::one()
    }

    fn neg_one(&self) -> Self::Element {
        -F::one()
    }

    fn is_commutative(&self) -> bool {
        true
    }

    fn is_noetherian(&self) -> bool {
        true
    }

    fn is_approximate(&self) -> bool {
        false
    }

    fn dbg<'a>(&self, el: &Self::Element, out: &mut std::fmt::Formatter<'a>) -> std::fmt::Result {
        write!(out, "{}", el)
    }

    fn dbg_within<'a>(
        &self,
        el: &Self::Element,
        out: &mut std::fmt::Formatter<'a>,
        _env: EnvBindingStrength,
    ) -> std::fmt::Result {
        write!(out, "{}", el)
    }

    fn characteristic<I>(&self, int_ring: I) -> Option<<I::Type as RingBase>::Element>
    where
        I: RingStore + Copy,
        I::Type: IntegerRing,
    {
        // Built bit by bit from the little-endian limbs; None if `int_ring` is too small.
        let limbs = F::characteristic();
        let bits = limbs.len() * 64;
        if let Some(available) = int_ring.get_ring().representable_bits() {
            if available <= bits {
                return None;
            }
        }
        let mut acc = int_ring.zero();
        for i in (0..bits).rev() {
            acc = int_ring.add_ref(&acc, &acc);
            if (limbs[i / 64] >> (i % 64)) & 1 == 1 {
                int_ring.add_assign(&mut acc, int_ring.one());
            }
        }
        Some(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use feanor_math::integer::BigIntRing;

    #[test]
    fn test_basic_operations() {
        let field = ArkFieldWrapper::<Fr>::new();

        // Test zero and one
        assert!(field.is_zero(&field.zero()));
        assert!(field.is_one(&field.one()));

        // Test basic arithmetic
        let a = field.from_int(5);
        let b = field.from_int(3);
        assert!(field.eq_el(&field.add_ref(&a, &b), &field.from_int(8)));
        assert!(field.eq_el(&field.mul_ref(&a, &b), &field.from_int(15)));

        // Test negation
        let mut neg_a = field.clone_el(&a);
        field.negate_inplace(&mut neg_a);
        assert!(field.is_zero(&field.add_ref(&a, &neg_a)));
        assert!(field.is_neg_one(&field.from_int(-1)));
    }

    #[test]
    fn test_store_helpers() {
        let field = RingValue::from(ArkFieldWrapper::<Fr>::new());

        assert!(field.eq_el(&field.from_i64(-2), &field.int_hom().map(-2)));
        assert!(field.eq_el(&field.from_i64(1 << 40), &field.pow(field.int_hom().map(2), 40)));
        let min_plus_max = field.add(field.from_i64(i64::MIN), field.from_i64(i64::MAX));
        assert!(field.is_neg_one(&min_plus_max));

        assert!(field.is_one(&field.factorial(0)));
        assert!(field.eq_el(&field.factorial(5), &field.int_hom().map(120)));
        assert!(field.eq_el(&field.falling_factorial(5, 2), &field.int_hom().map(20)));
        assert!(field.is_one(&field.falling_factorial(3, 0)));
    }

    #[test]
    fn test_characteristic_in_big_integers() {
        let field = RingValue::from(ArkFieldWrapper::<Fr>::new());
        let zz = BigIntRing::RING;
        let p = field.characteristic(zz).unwrap();
        // p - 1 maps to -1
        let p_minus_one = zz.sub(p, zz.one());
        assert!(zz.get_ring().abs_highest_set_bit(&p_minus_one).unwrap() > 250);
        assert!(field.characteristic_biguint().bits() > 250);
    }

    #[test]
    fn test_display() {
        let field = RingValue::from(ArkFieldWrapper::<Fr>::new());
        assert_eq!(format!("{}", field.format(&field.int_hom().map(7))), "7");
    }
}
