use ff::PrimeField;
use lazy_static::lazy_static;

use super::fp::Fp;
use super::fp11::{FrobeniusTables, Fp11, FROBENIUS_TABLES};
use super::g2::{G2Affine, G2_A, G2_B};
use super::isogeny::T2;
use super::{SEED_ABS, SEED_IS_NEGATIVE, SEED_NAF};

/// Where the twist isomorphism puts the non-residue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwistType {
    /// `y^2 = x^3 + a x + b u^3`, multiplicative twist.
    MType,
    /// `y^2 = x^3 + a / u^2 x + b / u^3`, divisive twist.
    DType,
}

/// Constants of the curve read by the Miller loops and the isogeny.
#[derive(Debug)]
pub struct CurveParameters {
    pub a: Fp11,
    pub b: Fp11,
    pub generator: G2Affine,
    pub twist: TwistType,
    /// `T2 - u x` vanishes at the rational 2-torsion point of the untwisted
    /// curve.
    pub t2: Fp,
    pub half: Fp,
    pub frobenius: &'static FrobeniusTables,
    pub seed_abs: u64,
    pub seed_is_negative: bool,
    /// `|x|` in non-adjacent form, least significant digit first.
    pub seed_naf: &'static [i8],
}

lazy_static! {
    static ref PARAMETERS: CurveParameters = CurveParameters {
        a: G2_A,
        b: G2_B,
        generator: G2Affine::generator(),
        twist: TwistType::DType,
        t2: T2,
        half: Fp::TWO_INV,
        frobenius: &FROBENIUS_TABLES,
        seed_abs: SEED_ABS,
        seed_is_negative: SEED_IS_NEGATIVE,
        seed_naf: &SEED_NAF,
    };
}

impl CurveParameters {
    /// The parameters of GG22D7-457, built on first use.
    pub fn get() -> &'static CurveParameters {
        &PARAMETERS
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ff_ext::ExtField;
    use ff::Field;

    #[test]
    fn test_parameters() {
        let params = CurveParameters::get();
        assert_eq!(params.twist, TwistType::DType);
        assert_eq!(params.half.double(), Fp::ONE);
        assert_eq!(params.seed_naf.len(), 21);
        assert!(bool::from(crate::CurveAffine::is_on_curve(&params.generator)));

        let value = params
            .seed_naf
            .iter()
            .rev()
            .fold(0i64, |acc, digit| 2 * acc + i64::from(*digit));
        assert_eq!(value, params.seed_abs as i64);

        // the Frobenius rows match u^(p^j)
        let mut u = crate::gg22d7::U;
        for j in 0..10 {
            u.frobenius_map(1);
            assert_eq!(params.frobenius.plain[j][0], u);
        }
    }
}
