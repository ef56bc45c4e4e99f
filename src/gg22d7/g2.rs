use crate::ff::Field;
use crate::ff_ext::ExtField;
use crate::group::Curve;
use crate::group::{prime::PrimeCurveAffine, Group, GroupEncoding};
use crate::new_curve_impl;
use crate::{Coordinates, CurveAffine, CurveExt};
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};
use ff::PrimeField;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fp11::Fp11;
use super::fr::Fr;

new_curve_impl!(
    (pub),
    G2,
    G2Affine,
    Fp11,
    Fr,
    (G2_GENERATOR_X, G2_GENERATOR_Y),
    G2_A,
    G2_B,
    "gg22d7_g2",
);

impl G2 {
    /// Doubling that also returns `Y^2`, `Z^2` and the tangent numerator
    /// `beta = 3 (X + Z^2 / u) (X - Z^2 / u)`, which equals `3 X^2 + A Z^4`.
    ///
    /// Unlike [`Group::double`] the identity and points of order two are not
    /// special cased, the Miller loop never reaches them.
    pub fn shared_dbl(&self) -> (G2, Fp11, Fp11, Fp11) {
        let yy = self.y.square();
        let zz = self.z.square();
        let t0 = zz.mul_by_u_inv();
        let beta = (self.x + t0) * (self.x - t0);
        let beta = beta.double() + beta;
        (self.dbl_with(&beta, &yy, &zz), yy, zz, beta)
    }

    /// [`Self::shared_dbl`] for a point with `Z = 1`, returning `Y^2` and
    /// `beta`.
    pub fn shared_dbl1(&self) -> (G2, Fp11, Fp11) {
        let yy = self.y.square();
        let c = Fp11::ONE.mul_by_u_inv();
        let beta = (self.x + c) * (self.x - c);
        let beta = beta.double() + beta;
        (self.dbl_with(&beta, &yy, &Fp11::ONE), yy, beta)
    }

    /// Mixed addition `self + q` that also returns the chord numerator
    /// `alpha = q.y Z^3 - Y` and `Z H` for `H = q.x Z^2 - X`.
    ///
    /// The inputs must be distinct, non opposite, non identity points.
    pub fn shared_add(&self, q: &G2Affine) -> (G2, Fp11, Fp11) {
        let zz = self.z.square();
        let u = q.x * zz;
        let s = q.y * self.z * zz;
        let h = u - self.x;
        let i = h.double().square();
        let j = h * i;
        let alpha = s - self.y;
        let w = alpha.double();
        let v = self.x * i;
        let x3 = w.square() - j - v.double();
        let y3 = w * (v - x3) - (self.y * j).double();
        let ztq = self.z * h;
        (
            G2 {
                x: x3,
                y: y3,
                z: ztq.double(),
            },
            alpha,
            ztq,
        )
    }

    /// The `p^power` Frobenius image of the untwisted point, as Jacobian
    /// coordinates over `Fp11` with the y-coordinate divided by `w`.
    pub fn untwist_frobenius(&self, power: usize) -> (Fp11, Fp11, Fp11) {
        let mut x = self.x.mul_by_u();
        let mut y = self.y.mul_by_u();
        let mut z = self.z;
        x.frobenius_map(power);
        y.frobenius_map_twisted(power);
        z.frobenius_map(power);
        (x, y, z)
    }
}

pub(crate) const G2_A: Fp11 = Fp11([
    Fp::from_raw([
        0x5a28_78b8_e12f_3e78,
        0xa8e4_581b_79e1_ede0,
        0x9553_c2b3_b34c_f7ca,
        0xb091_1f58_f283_55f7,
        0xc03c_1a07_a8e5_4143,
        0x4f9f_7892_7722_6da3,
        0xd6ff_82b4_0513_5b17,
        0x0000_0000_0000_01d6,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x2d14_3c5c_7097_9f3c,
        0x5472_2c0d_bcf0_f6f0,
        0xcaa9_e159_d9a6_7be5,
        0xd848_8fac_7941_aafb,
        0xe01e_0d03_d472_a0a1,
        0xa7cf_bc49_3b91_36d1,
        0x6b7f_c15a_0289_ad8b,
        0x0000_0000_0000_00eb,
    ]),
    Fp::from_raw([
        0x2d14_3c5c_7097_9f3f,
        0x5472_2c0d_bcf0_f6f0,
        0xcaa9_e159_d9a6_7be5,
        0xd848_8fac_7941_aafb,
        0xe01e_0d03_d472_a0a1,
        0xa7cf_bc49_3b91_36d1,
        0x6b7f_c15a_0289_ad8b,
        0x0000_0000_0000_00eb,
    ]),
]);

pub(crate) const G2_B: Fp11 = Fp11([
    Fp::from_raw([
        0x852b_d570_11ac_ff7b,
        0xad1f_8cb5_9bd3_0a42,
        0x333d_211c_27e5_14da,
        0xf5c6_f163_2e36_9a24,
        0x79e9_1995_6509_031c,
        0x7a01_2bd7_c36b_0fc1,
        0xb7a6_370b_c5ae_0a25,
        0x0000_0000_0000_01bf,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ]),
    Fp::from_raw([
        0xea7e_51a4_67c1_1f80,
        0xfde2_65b2_ef07_71ce,
        0xb10b_50cb_c5b3_f177,
        0x5d65_16fa_e226_5de9,
        0x2329_8039_21ee_1f13,
        0xeacf_265d_59db_aef1,
        0x8fac_a5d4_1fb2_a878,
        0x0000_0000_0000_000b,
    ]),
    Fp::from_raw([
        0x6faa_2714_796e_1efb,
        0xab01_f268_8ada_7c11,
        0xe448_71e7_ed99_0652,
        0x532c_085e_105c_f80d,
        0x9d12_99ce_86f7_2230,
        0x64d0_5235_1d46_beb2,
        0x4752_dcdf_e560_b29e,
        0x0000_0000_0000_01cb,
    ]),
    Fp::from_raw([
        0xea7e_51a4_67c1_1f80,
        0xfde2_65b2_ef07_71ce,
        0xb10b_50cb_c5b3_f177,
        0x5d65_16fa_e226_5de9,
        0x2329_8039_21ee_1f13,
        0xeacf_265d_59db_aef1,
        0x8fac_a5d4_1fb2_a878,
        0x0000_0000_0000_000b,
    ]),
]);

const G2_GENERATOR_X: Fp11 = Fp11([
    Fp::from_raw([
        0xe664_a54b_a0e2_3c2a,
        0x1c59_d700_b589_10a2,
        0x3cb0_6da7_1970_2b9a,
        0xb506_59b1_df7a_1dc2,
        0xb757_ff5b_c6bb_d90d,
        0xd8fc_6e3c_4472_6ae5,
        0x67f9_6c3d_ec4d_0e01,
        0x0000_0000_0000_00ff,
    ]),
    Fp::from_raw([
        0x5c5a_19ca_e9d5_824e,
        0x9c32_6022_37e6_52d7,
        0xf944_e01c_e713_bda6,
        0xd582_c990_497c_53da,
        0x90ee_03f2_9f4e_d3db,
        0x3657_adda_9d91_e092,
        0x90aa_5869_5bc2_0808,
        0x0000_0000_0000_019c,
    ]),
    Fp::from_raw([
        0xdff3_bd48_bb78_ff45,
        0x599d_57c1_a36c_1900,
        0x09af_644f_2a21_6149,
        0xc9b3_5090_9be2_ec4d,
        0x2c81_01e8_70d6_a9f5,
        0xb29d_843b_e4ea_ecb4,
        0x1635_5def_4109_4c94,
        0x0000_0000_0000_016b,
    ]),
    Fp::from_raw([
        0xa7b8_4944_6ea3_c8e7,
        0xe49c_7bc5_e4da_e537,
        0x2e9c_0ed3_3a73_e7d4,
        0xc6ea_45e1_edf7_a30a,
        0xc3ac_2ad9_948d_2558,
        0x191f_c496_b72b_fd63,
        0xaa40_7e4f_6226_ee61,
        0x0000_0000_0000_0066,
    ]),
    Fp::from_raw([
        0x63ca_526f_9b52_cd94,
        0xcd27_1b47_0532_fdcd,
        0x9c08_10ac_8ada_ac15,
        0x329a_e1d1_6957_2a9e,
        0x1724_c99e_cf57_b503,
        0x3ca2_5d03_e0d8_2fe3,
        0x0424_1bee_3ea8_9810,
        0x0000_0000_0000_00e6,
    ]),
    Fp::from_raw([
        0x9e53_6ccf_084b_0ae1,
        0xa2f1_6541_7ec3_b3e7,
        0x6085_632b_f14f_4ed2,
        0x7b13_22b3_06ef_5dca,
        0x1e39_ad14_6e8a_9ffc,
        0x2e86_64f8_5d27_f868,
        0xea69_deaa_ac79_2ef2,
        0x0000_0000_0000_0185,
    ]),
    Fp::from_raw([
        0x3e34_1046_f46e_92e8,
        0xdacf_4e5b_c0df_ead8,
        0xed43_fe45_b6b2_0c73,
        0xc894_c6d4_7c8a_0d1e,
        0xe2ad_2b57_5a68_3c36,
        0x30da_4922_0029_9271,
        0xe0a0_8501_6c81_f6d7,
        0x0000_0000_0000_01ba,
    ]),
    Fp::from_raw([
        0xbf00_7fae_cf39_b544,
        0x1045_9afd_e62f_e3dd,
        0x54e7_af5e_cf99_abd3,
        0xfa8d_f3b2_28b0_6d34,
        0xa246_0739_d061_1aa2,
        0xc01a_c830_1cb5_e804,
        0x0081_08f1_be73_a284,
        0x0000_0000_0000_0064,
    ]),
    Fp::from_raw([
        0x4b37_493b_3d80_376f,
        0xe306_c39e_568d_72b0,
        0x991f_e5cc_448a_f033,
        0x6b65_f700_3d3e_23cd,
        0x6539_6f23_bcfa_2818,
        0x58f4_38a7_aa89_d8b6,
        0x4f3c_ca01_e35b_5a83,
        0x0000_0000_0000_0007,
    ]),
    Fp::from_raw([
        0x5b07_e82b_771c_bb49,
        0xa2df_e46b_a059_d4cc,
        0xa5ac_cd57_56f9_5e5d,
        0x196f_5982_d399_b5f0,
        0x94ff_7bad_c28e_416c,
        0x59dc_044f_3140_d43a,
        0x1e0e_c029_591d_1d6a,
        0x0000_0000_0000_0090,
    ]),
    Fp::from_raw([
        0xa388_6729_dbf4_32c4,
        0x1c4a_fcdc_f38b_bc9f,
        0xbc52_70e6_b8d2_b334,
        0x177e_e373_3266_fdd7,
        0x61bb_a358_050d_60a9,
        0x2c02_15ed_ec75_216b,
        0xef21_f522_4b0f_4f7e,
        0x0000_0000_0000_013b,
    ]),
]);

const G2_GENERATOR_Y: Fp11 = Fp11([
    Fp::from_raw([
        0x06a4_038a_2fad_0ec9,
        0xe6d0_fffe_4a67_1c0c,
        0xcef1_2ef4_6060_0ac6,
        0x25ca_b6d5_8f48_9cfe,
        0x1c1e_6fb1_7830_f4ef,
        0x55b3_a95f_0a63_be68,
        0xe159_6bde_449f_ab48,
        0x0000_0000_0000_0008,
    ]),
    Fp::from_raw([
        0x6af2_999c_96e7_6834,
        0x453c_08c4_cadb_ddf0,
        0x45a4_3049_bf67_7ecc,
        0xc9d9_0e27_1eca_d980,
        0x638e_cf28_02db_95cd,
        0x4bb2_629b_d5cd_44f0,
        0x09a0_6c03_629c_9cc3,
        0x0000_0000_0000_001c,
    ]),
    Fp::from_raw([
        0x75c0_c9be_0959_18d9,
        0x90b9_349b_0eee_4bd4,
        0xbd8d_032d_461f_bd5c,
        0xff65_1029_cab4_9c85,
        0x2d05_6da9_2ae2_571b,
        0xb7a7_8ade_3c1e_759d,
        0x4b4b_6717_cfe1_5347,
        0x0000_0000_0000_0018,
    ]),
    Fp::from_raw([
        0xce31_ae79_517c_addb,
        0xeb8d_5870_b66a_713d,
        0x665a_8d80_f3e4_bfda,
        0x989d_d092_d2ff_18ae,
        0xf63b_5381_8f23_f490,
        0x874f_5ba2_aae0_d6e8,
        0x6119_b751_a3f6_edc8,
        0x0000_0000_0000_01d4,
    ]),
    Fp::from_raw([
        0x3c58_9c5d_7464_9063,
        0xf254_2176_5733_c47d,
        0xf6cf_2ad9_c508_65f5,
        0xe20e_8165_ed55_753b,
        0x05c6_73da_606d_bb9b,
        0x1f1c_51e6_cb60_0490,
        0x1890_de05_1993_c270,
        0x0000_0000_0000_0193,
    ]),
    Fp::from_raw([
        0x413b_274c_be97_0260,
        0xbe7d_2a0d_7621_0d5d,
        0xcbe1_45e3_4889_6974,
        0x5285_1c38_f41e_909f,
        0x0137_1754_f460_36f0,
        0x513a_28b4_633c_1911,
        0xd2d7_3dc2_d491_ce75,
        0x0000_0000_0000_0162,
    ]),
    Fp::from_raw([
        0xfc15_0185_e37f_531c,
        0x8507_263d_a236_3b74,
        0x0297_bf8c_8f5d_d07c,
        0x3518_5486_8fb1_6bd4,
        0xbbf7_2b02_016e_7a48,
        0xe41a_6946_61cb_a782,
        0x1004_d34f_5df3_f91b,
        0x0000_0000_0000_003f,
    ]),
    Fp::from_raw([
        0x6479_8944_2066_8a88,
        0x7abc_105f_3bf9_80ca,
        0xd8fb_c5b1_a3d8_e253,
        0x97d2_1ed9_f85f_dba4,
        0x7900_a74a_7204_7da2,
        0xdb96_0975_5794_834b,
        0x7fe8_1cb0_a9d5_4829,
        0x0000_0000_0000_0075,
    ]),
    Fp::from_raw([
        0x90ff_0aa3_bdf9_17ef,
        0x45e2_76eb_2249_42ee,
        0x6dbb_c97f_2638_b814,
        0xa1e9_1d13_817a_8059,
        0x1717_ff8d_a66c_9fc1,
        0x7d49_7109_c101_9a98,
        0xf973_74a2_52e9_8761,
        0x0000_0000_0000_0102,
    ]),
    Fp::from_raw([
        0xc824_f799_5028_ab14,
        0xeaa7_33b4_7db1_00ba,
        0xbda0_4484_5887_baa0,
        0x7cbd_c5dc_73b5_cbc0,
        0x7b13_eb1d_4d4e_1649,
        0xcdb9_95d4_c87a_f715,
        0xa314_3421_0bcc_affc,
        0x0000_0000_0000_0056,
    ]),
    Fp::from_raw([
        0x3826_fb41_3cc9_836a,
        0x4fe5_ed33_b5bc_df10,
        0x9cbf_cb24_3883_2f65,
        0x8cb8_69a0_e0ec_1733,
        0x841d_5ef9_5bde_6ecd,
        0x0297_981b_12ed_de06,
        0x3dd0_9174_4e9d_81a9,
        0x0000_0000_0000_0011,
    ]),
]);

#[cfg(test)]
mod test {
    use super::*;
    use rand_core::OsRng;

    crate::curve_testing_suite!(G2, "group_law", 5);
    crate::curve_testing_suite!(G2, "encoding", 3);
    crate::curve_testing_suite!(G2, "cofactor");

    #[test]
    fn test_curve_constants() {
        // A = -3 / u^2 and B = b / u^3 for the base curve b
        let u_inv = Fp11::ONE.mul_by_u_inv();
        assert_eq!(G2_A, -Fp11::from(3) * u_inv.square());
        assert_eq!(
            G2_B,
            Fp11::from_base(super::super::g1::G1_B) * u_inv.square() * u_inv
        );
        assert!(bool::from(G2Affine::generator().is_on_curve()));
        assert!(bool::from(G2Affine::generator().is_torsion_free()));
    }

    #[test]
    fn test_shared_dbl() {
        for _ in 0..10 {
            let a = G2::random(OsRng);
            let (r, yy, zz, beta) = a.shared_dbl();
            assert_eq!(r, a.double());
            assert_eq!(r, a + a);
            assert_eq!(yy, a.y.square());
            assert_eq!(zz, a.z.square());
            assert_eq!(beta, a.x.square() * Fp11::from(3) + G2_A * zz.square());

            let a = a.normalize();
            let (r, yy, beta) = a.shared_dbl1();
            assert_eq!(r, a.double());
            assert_eq!(yy, a.y.square());
            let (_, _, _, expected) = a.shared_dbl();
            assert_eq!(beta, expected);
        }
    }

    #[test]
    fn test_shared_add() {
        for _ in 0..10 {
            let a = G2::random(OsRng);
            let b = G2Affine::random(OsRng);
            let (r, alpha, ztq) = a.shared_add(&b);
            assert_eq!(r, a + b);
            assert_eq!(alpha, b.y * a.z.square() * a.z - a.y);
            assert_eq!(ztq, a.z * (b.x * a.z.square() - a.x));
        }
    }

    #[test]
    fn test_mul_consistency() {
        for _ in 0..5 {
            let a = G2::random(OsRng);
            assert_eq!(a.mul_small(3), a.double() + a);
            assert_eq!(a * Fr::from(3), a.double() + a);
            assert_eq!(a.blind(OsRng), a);

            let z_inv = a.z.invert().unwrap();
            assert_eq!(a.normalize_with_inverse(&z_inv), a.normalize());
            assert_eq!(a.normalize(), a);
        }
        assert_eq!(G2::identity().normalize(), G2::identity());
    }

    #[test]
    fn test_untwist_frobenius() {
        let a = G2::random(OsRng);
        let (x, y, z) = a.untwist_frobenius(0);
        assert_eq!((x, y, z), (a.x.mul_by_u(), a.y.mul_by_u(), a.z));

        // eleven applications compose to the p^11 power, which negates y
        let mut pi = (a.x.mul_by_u(), a.y.mul_by_u(), a.z);
        for _ in 0..11 {
            let mut x = pi.0;
            let mut y = pi.1;
            let mut z = pi.2;
            x.frobenius_map(1);
            y.frobenius_map_twisted(1);
            z.frobenius_map(1);
            pi = (x, y, z);
        }
        assert_eq!(pi, (a.x.mul_by_u(), -a.y.mul_by_u(), a.z));
        assert_eq!(pi, a.untwist_frobenius(11));

        // period 22, with y negated across the halves
        for j in [1, 2, 5, 10] {
            let (x, y, z) = a.untwist_frobenius(j);
            assert_eq!(a.untwist_frobenius(j + 11), (x, -y, z));
            assert_eq!(a.untwist_frobenius(j + 22), (x, y, z));
        }

        let (x, y, z) = a.untwist_frobenius(1);
        let (mut x1, mut y1, mut z1) = (x, y, z);
        x1.frobenius_map(1);
        y1.frobenius_map_twisted(1);
        z1.frobenius_map(1);
        assert_eq!((x1, y1, z1), a.untwist_frobenius(2));
    }
}
