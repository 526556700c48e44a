//! Homomorphisms from the rationals into arkworks prime fields.
//!
//! A zonotopal algebra over `Q` whose denominators are coprime to `p`
//! reduces modulo `p` to the algebra of the reduced matrix; these maps make
//! that comparison possible.

use ark_ff::PrimeField;
use feanor_math::divisibility::DivisibilityRingStore;
use feanor_math::pid::PrincipalIdealRingStore;
use feanor_math::ring::*;

use crate::common_fields::QQ;
use crate::conversions::feanor_int_to_field;
use crate::error::{Result, ZonotopalError};
use crate::field_wrapper::ArkFieldWrapper;
use crate::linalg::Matrix;
use crate::poly::{PolyRing, Polynomial};
use crate::rational::{QQField, Rational};

/// An arkworks prime field as a feanor-math ring
pub type ArkRing<F> = RingValue<ArkFieldWrapper<F>>;

/// The reduction map `Z_(p) -> F_p`, defined on rationals whose denominator is prime to `p`.
pub struct RationalToFieldHom<F: PrimeField> {
    codomain: ArkRing<F>,
}

impl<F: PrimeField> RationalToFieldHom<F> {
    /// Create the reduction map
    pub fn new() -> Self {
        Self {
            codomain: RingValue::from(ArkFieldWrapper::new()),
        }
    }

    /// The target field
    pub fn codomain(&self) -> &ArkRing<F> {
        &self.codomain
    }

    /// Image of `value`
    pub fn map(&self, value: &Rational) -> Result<F> {
        let zz = QQ.base_ring();
        let (num, den) = (QQ.get_ring().num(value), QQ.get_ring().den(value));
        let g = zz.ideal_gen(num, den);
        let (num, den) = match (zz.checked_div(num, &g), zz.checked_div(den, &g)) {
            (Some(n), Some(d)) => (n, d),
            _ => (zz.clone_el(num), zz.clone_el(den)),
        };
        let num_image: F = feanor_int_to_field(zz.get_ring(), &num);
        let den_image: F = feanor_int_to_field(zz.get_ring(), &den);
        self.codomain
            .checked_div(&num_image, &den_image)
            .ok_or_else(|| ZonotopalError::NonInvertibleDenominator(zz.format(&den).to_string()))
    }

    /// Entrywise image of a matrix
    pub fn map_matrix(&self, m: &Matrix<QQField>) -> Result<Matrix<ArkRing<F>>> {
        let rows = m
            .rows()
            .iter()
            .map(|r| r.iter().map(|v| self.map(v)).collect::<Result<Vec<F>>>())
            .collect::<Result<Vec<_>>>()?;
        Matrix::from_rows(self.codomain.clone(), rows)
    }

    /// Coefficientwise image of a polynomial of `from`, as an element of `to`
    pub fn map_polynomial(
        &self,
        from: &PolyRing<QQField>,
        to: &PolyRing<ArkRing<F>>,
        p: &Polynomial<QQField>,
    ) -> Result<Polynomial<ArkRing<F>>> {
        let pairs = from
            .terms(p)
            .into_iter()
            .map(|(m, c)| self.map(c).map(|v| (v, m)))
            .collect::<Result<Vec<_>>>()?;
        Ok(to.from_pairs(pairs))
    }
}

impl<F: PrimeField> Default for RationalToFieldHom<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_wrapper::ExactField;
    use crate::rational::fraction;
    use ark_bls12_381::Fr;
    use ark_ff::fields::{Fp64, MontBackend, MontConfig};

    #[derive(MontConfig)]
    #[modulus = "7"]
    #[generator = "3"]
    pub struct F7Config;
    pub type F7 = Fp64<MontBackend<F7Config, 1>>;

    #[test]
    fn test_map_fraction() {
        let q = &*QQ;
        let hom = RationalToFieldHom::<Fr>::new();
        let half = hom.map(&fraction(q, 1, 2).unwrap()).unwrap();
        assert_eq!(half * Fr::from(2u64), Fr::from(1u64));
        assert_eq!(hom.map(&q.from_i64(-3)).unwrap(), -Fr::from(3u64));
    }

    #[test]
    fn test_denominator_divisible_by_p() {
        let q = &*QQ;
        let hom = RationalToFieldHom::<F7>::new();
        assert!(matches!(
            hom.map(&fraction(q, 1, 14).unwrap()),
            Err(ZonotopalError::NonInvertibleDenominator(_))
        ));
        // 3/2 = 3 * 4 = 5 mod 7
        assert_eq!(hom.map(&fraction(q, 3, 2).unwrap()).unwrap(), F7::from(5u64));
        // 7/14 reduces to 1/2 before mapping
        assert_eq!(hom.map(&fraction(q, 7, 14).unwrap()).unwrap(), F7::from(4u64));
    }

    #[test]
    fn test_map_polynomial_and_matrix() {
        let q = QQ.clone();
        let hom = RationalToFieldHom::<Fr>::new();
        let qring = PolyRing::new(q.clone(), 2);
        let fring = PolyRing::new(hom.codomain().clone(), 2);

        let p = qring.add(&qring.variable(0), &qring.scale(&qring.variable(1), &fraction(&q, 1, 3).unwrap()));
        let image = hom.map_polynomial(&qring, &fring, &p).unwrap();
        let third = fring.field().invert(&Fr::from(3u64)).unwrap();
        let expected = fring.add(&fring.variable(0), &fring.scale(&fring.variable(1), &third));
        assert!(fring.eq(&image, &expected));

        let m = Matrix::from_i64_rows(&q, &[vec![1, -1], vec![0, 2]]).unwrap();
        let fm = hom.map_matrix(&m).unwrap();
        assert_eq!(fm, Matrix::from_i64_rows(fring.field(), &[vec![1, -1], vec![0, 2]]).unwrap());
    }
}
