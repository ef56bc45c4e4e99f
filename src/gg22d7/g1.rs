use crate::ff::{Field, PrimeField};
use crate::group::Curve;
use crate::group::{prime::PrimeCurveAffine, Group, GroupEncoding};
use crate::new_curve_impl;
use crate::{Coordinates, CurveAffine, CurveExt};
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fr::Fr;

new_curve_impl!(
    (pub),
    G1,
    G1Affine,
    Fp,
    Fr,
    (G1_GENERATOR_X, G1_GENERATOR_Y),
    G1_A,
    G1_B,
    "gg22d7_g1",
);

pub(crate) const G1_A: Fp = Fp::zero().sub_const(&Fp::from_raw([3, 0, 0, 0, 0, 0, 0, 0]));
pub(crate) const G1_B: Fp = Fp::from_raw([
    0xd4fc_a348_cf82_3f00,
    0xfbc4_cb65_de0e_e39d,
    0x6216_a197_8b67_e2ef,
    0xbaca_2df5_c44c_bbd3,
    0x4653_0072_43dc_3e26,
    0xd59e_4cba_b3b7_5de2,
    0x1f59_4ba8_3f65_50f1,
    0x0000_0000_0000_0017,
]);
pub(crate) const G1_GENERATOR_X: Fp = Fp::from_raw([
    0x5ccc_c1c1_c28f_996d,
    0xdccf_0b1c_0b41_bb89,
    0x24ab_0fbd_39b2_fc05,
    0x4cac_b9f7_304b_d91d,
    0xbe6e_89f7_ed17_248d,
    0x9d2d_58c1_c61c_7cbb,
    0xa8de_7986_5282_68cd,
    0x0000_0000_0000_008d,
]);
pub(crate) const G1_GENERATOR_Y: Fp = Fp::from_raw([
    0xbf39_ed50_8437_4266,
    0xae1c_1c92_f580_d10e,
    0x443c_8fe1_59c7_d0e8,
    0xa3de_ef2b_2702_5e85,
    0x90d0_ae3e_1773_ee95,
    0xb0b3_da29_479e_bd76,
    0xda95_41d6_8066_8d4c,
    0x0000_0000_0000_00aa,
]);

#[cfg(test)]
mod test {
    use super::*;
    use ff::Field;

    crate::curve_testing_suite!(G1, "group_law", 20);
    crate::curve_testing_suite!(G1, "encoding", 10);
    crate::curve_testing_suite!(G1, "cofactor");

    #[test]
    fn test_curve_constants() {
        assert_eq!(G1_A, -Fp::from(3));
        assert!(bool::from(G1Affine::generator().is_on_curve()));
        assert!(bool::from(G1Affine::generator().is_torsion_free()));
        assert_eq!(G1::b(), G1_B);
    }

    #[test]
    fn test_from_slice() {
        use crate::Error;
        use rand_core::OsRng;

        let p = G1Affine::random(OsRng);
        let bytes = p.to_bytes();
        assert_eq!(G1Affine::from_slice(bytes.as_ref()), Ok(p));

        let invalid = Err(Error::InvalidEncoding("gg22d7_g1"));
        assert_eq!(G1Affine::from_slice(&bytes[..Fp::SIZE - 1]), invalid);
        assert_eq!(G1Affine::from_slice(&[0u8; 2 * Fp::SIZE]), invalid);

        let mut flagged = bytes;
        flagged[Fp::SIZE - 1] |= 0b1100_0000;
        assert_eq!(G1Affine::from_slice(flagged.as_ref()), invalid);
    }

    #[test]
    fn test_mul_naf() {
        use rand_core::OsRng;
        for _ in 0..10 {
            let a = G1::random(OsRng);
            assert_eq!(a.mul_small(3), a.double() + a);
            assert_eq!(a.mul_small(0), G1::identity());

            let k = Fr::random(OsRng);
            let limbs = k.to_repr()
                .chunks_exact(8)
                .map(|chunk| u64::from_le_bytes(chunk.try_into().unwrap()))
                .collect::<Vec<_>>();
            assert_eq!(a.mul_naf(&limbs), a * k);
            assert_eq!(a.blind(OsRng), a);
            assert_eq!(a.normalize().z, Fp::ONE);
            assert_eq!(a.normalize(), a);
        }
    }
}
