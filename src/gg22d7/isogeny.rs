//! The degree two endomorphism of the base curve used by the super-optimal
//! pairing, and the translations of twist points by the rational 2-torsion
//! point.
//!
//! `phihat` satisfies `phihat^2 + phihat + 2 = 0`, so its dual is
//! `phi = -(1 + phihat)` and `phihat(phi(P)) = [2]P`.

use ff::Field;
use subtle::CtOption;

use super::fp::Fp;
use super::fp11::Fp11;
use super::g1::{G1Affine, G1};
use super::g2::{G2Affine, G2};
use super::params::CurveParameters;

/// Returns `(phihat(P), [2]P)` with a single inversion.
///
/// Fails for the points where the rational maps have a pole, none of which
/// lie in the prime order subgroup. `P` must not be the identity.
pub fn phihat_2(p: &G1Affine) -> CtOption<(G1Affine, G1Affine)> {
    let (x, y) = (p.x, p.y);

    let t0 = x - ALPHA1;
    let t1 = t0.square();
    let r1x = t0 * x + ALPHA323;
    let r1y = (t1 - ALPHA323) * y;

    // [2]P in Jacobian coordinates with Z = 2y
    let xx = x.square();
    let yy = y.square();
    let yyyy = yy.square();
    let s = ((x + yy).square() - xx - yyyy).double();
    let m = xx - Fp::ONE;
    let m = m + m.double();
    let r2x = m.square() - s.double();
    let r2y = (s - r2x) * m - yyyy.double().double().double();

    let d1 = U13 * t1;
    let d2 = y.double();
    (d1 * d2).invert().map(|inv| {
        // 1 / d1 and 1 / d2
        let d1_inv = inv * d2;
        let d2_inv = inv * d1;

        let scale = d1_inv * U1 * t0;
        let phihat = G1Affine {
            x: r1x * scale,
            y: r1y * d1_inv,
        };

        let z_inv2 = d2_inv.square();
        let double = G1Affine {
            x: r2x * z_inv2,
            y: r2y * z_inv2 * d2_inv,
        };
        (phihat, double)
    })
}

/// The dual of [`phihat_2`], `phi(P) = -(P + phihat(P))`.
pub fn phi_2(p: &G1Affine) -> CtOption<G1Affine> {
    let images = phihat_2(p);
    let is_some = images.is_some();
    let (phihat, _) = Option::<(G1Affine, G1Affine)>::from(images).unwrap_or((*p, *p));
    CtOption::new((-(G1::from(p) + phihat)).into(), is_some)
}

/// `psi(Q) + T` for the rational 2-torsion point `T = (T2, 0)` of the
/// untwisted curve, as Jacobian coordinates in the form returned by
/// [`G2::untwist_frobenius`].
pub fn affine_plus_t2(params: &CurveParameters, q: &G2Affine) -> (Fp11, Fp11, Fp11) {
    let t0 = q.x.mul_by_u();
    let t1 = q.y.mul_by_u();
    let mut t2 = -t0;
    t2.0[0] += params.t2;

    let z = t2.double();
    let t3 = z.square();
    let t2 = t2 * t3;
    let t4 = t3 * t0;
    let t3 = t1.double();

    let t0 = t2 + t4;
    let x = t3.square().mul_by_u() - t0 - t4;
    let y = (x - t0) * t3;
    (x, y, z)
}

/// [`affine_plus_t2`] for a point in Jacobian coordinates.
pub fn jacobian_plus_t2(params: &CurveParameters, q: &G2) -> (Fp11, Fp11, Fp11) {
    let t0 = q.x.mul_by_u();
    let t1 = q.y.mul_by_u();
    let zz = q.z.square();
    let u = zz.mul_by_base(&params.t2);

    let h = u - t0;
    let k = h.double();
    let z = k * q.z;
    let i = k.square();
    let v = t0 * i;
    let j = h * i + v;

    let k = t1.double();
    let x = k.square().mul_by_u() - j - v;
    let y = (x - j) * k;
    (x, y, z)
}

pub(crate) const T2: Fp = Fp::from_raw([
    0xafe8_f847_3d74_ecfe,
    0x974f_7a61_3f6b_e3e0,
    0xf4a0_ceaf_3df4_8b29,
    0x2dd3_4499_d431_b045,
    0x8af0_165f_870e_41d4,
    0xa71c_175c_c621_f541,
    0xec4f_6e90_031b_9c57,
    0x0000_0000_0000_005d,
]);
pub(crate) const ALPHA1: Fp = Fp::from_raw([
    0x6859_e046_0597_1bd4,
    0x2b17_69db_4ae1_cdb8,
    0xeb54_8f1c_2dc0_01d0,
    0xe38b_4bee_4665_d039,
    0x8527_d0af_776c_c823,
    0xbffc_ce4b_1f0d_ccbd,
    0x3d25_5249_8a70_63d6,
    0x0000_0000_0000_00ef,
]);
pub(crate) const ALPHA323: Fp = Fp::from_raw([
    0x82e1_9f36_f864_eb1e,
    0x95b2_7996_8b16_1a14,
    0xe38e_2d88_2324_1648,
    0xfd60_3234_ce35_3d18,
    0x4e6a_5743_7dd3_ec75,
    0x988f_d90f_cc58_3bb5,
    0xac06_450c_1b58_6e69,
    0x0000_0000_0000_0025,
]);
pub(crate) const U1: Fp = Fp::from_raw([
    0x0905_9b85_3ffc_faaa,
    0x781a_e646_7489_cb88,
    0x26b6_6904_cc77_b27c,
    0x27be_f46b_322d_a709,
    0x0823_9446_31f5_1967,
    0x2ba8_82af_7ad2_5e15,
    0x81ad_e0c0_1202_fe2b,
    0x0000_0000_0000_011a,
]);
pub(crate) const U13: Fp = Fp::from_raw([
    0x5122_dd33_a132_43d3,
    0x30c9_71d5_0558_2258,
    0x6e9d_59ae_e6d5_454e,
    0x88d2_2aed_c055_aeee,
    0xb818_85c1_76f0_27dc,
    0x23f6_f5e2_fc50_0f8e,
    0x5551_a1f3_f310_5cec,
    0x0000_0000_0000_00bc,
]);

#[cfg(test)]
mod test {
    use super::*;
    use crate::group::{Curve, Group};
    use rand_core::OsRng;

    #[test]
    fn test_phihat() {
        for _ in 0..10 {
            let p = G1::random(OsRng);
            let (phihat, double) = phihat_2(&p.to_affine()).unwrap();
            assert_eq!(G1::from(double), p.double());
            assert!(bool::from(crate::CurveAffine::is_on_curve(&phihat)));

            // phihat^2 + phihat + 2 = 0
            let (phihat2, _) = phihat_2(&phihat).unwrap();
            assert!(bool::from((phihat2 + phihat + p.double()).is_identity()));

            let q = G1::random(OsRng);
            let (phihat_q, _) = phihat_2(&q.to_affine()).unwrap();
            let (phihat_sum, _) = phihat_2(&(p + q).to_affine()).unwrap();
            assert_eq!(G1::from(phihat_sum), phihat + phihat_q);
        }
    }

    #[test]
    fn test_dual_round_trip() {
        for _ in 0..10 {
            let p = G1::random(OsRng);
            let phi = phi_2(&p.to_affine()).unwrap();
            let (back, double) = phihat_2(&phi).unwrap();
            // phihat(phi(P)) = [2]P, while the second output doubles phi(P)
            assert_eq!(G1::from(back), p.double());
            assert_eq!(G1::from(double), G1::from(phi).double());
        }
    }

    /// `(x, y, z)` over the untwisted curve, with y divided by `w`.
    fn untwisted_on_curve((x, y, z): (Fp11, Fp11, Fp11)) -> bool {
        // (y w)^2 = x^3 - 3 x z^4 + b z^6
        let z2 = z.square();
        let z4 = z2.square();
        let b = Fp11::from_base(super::super::g1::G1_B);
        let lhs = y.square().mul_by_u();
        let rhs = (x.square() - Fp11::from(3) * z4) * x + b * z4 * z2;
        lhs == rhs
    }

    #[test]
    fn test_plus_t2() {
        let params = CurveParameters::get();
        for _ in 0..10 {
            let q = G2::random(OsRng);
            let affine = affine_plus_t2(params, &q.to_affine());
            assert!(untwisted_on_curve(affine));
            assert!(untwisted_on_curve(q.untwist_frobenius(0)));

            let jacobian = jacobian_plus_t2(params, &q);
            assert!(untwisted_on_curve(jacobian));

            // both give the same point
            let (x0, y0, z0) = affine;
            let (x1, y1, z1) = jacobian;
            assert_eq!(x0 * z1.square(), x1 * z0.square());
            assert_eq!(y0 * z1.square() * z1, y1 * z0.square() * z0);
        }
    }
}
