//! The super-optimal ate pairing, built on the degree two endomorphism
//! `phihat` of the base curve.
//!
//! A single pass over the NAF of `|x|` evaluates every line at both
//! `phihat(P)` and `[2]P`. The lines at `phihat(P)` are replayed in a second
//! accumulator, and a handful of correction lines through `Q + T`, `[|x|]Q + T`
//! and the Frobenius image of `[2]Q` finish the function. `T` is the
//! rational 2-torsion point of the untwisted curve.
//!
//! The result is a non-trivial power of the optimal ate pairing, not equal
//! to it.

use ark_std::{end_timer, start_timer};
use ff::Field;
use group::prime::PrimeCurveAffine;
use pairing::{Engine, MillerLoopResult, MultiMillerLoop};

use super::engine::{check_points, final_exponentiation, frobenius, untwisted_chord, Gt};
use super::fp11::Fp11;
use super::fp22::Fp22;
use super::fr::Fr;
use super::g1::{G1Affine, G1};
use super::g2::{G2Affine, G2};
use super::isogeny::{affine_plus_t2, jacobian_plus_t2, phihat_2};
use super::params::CurveParameters;
use crate::{Error, Result};

crate::impl_miller_loop_components!(
    GG22D7SuperOptimal,
    G1,
    G1Affine,
    G2,
    G2Affine,
    Fp22,
    Gt,
    Fr,
    super_optimal_miller_loop
);

impl GG22D7SuperOptimal {
    /// [`Engine::pairing`] for untrusted inputs.
    pub fn pairing_checked(p: &G1Affine, q: &G2Affine) -> Result<Gt> {
        check_points(p, q)?;
        let f = try_super_optimal_miller_loop(CurveParameters::get(), p, q)
            .ok_or(Error::NonInvertible("phihat"))?;
        Option::<Gt>::from(final_exponentiation(&f)).ok_or(Error::NonInvertible("Fp22"))
    }
}

/// The super-optimal Miller function of `(p, q)`, before the final
/// exponentiation. Either input being the identity gives one.
///
/// # Panics
///
/// If `p` is a pole of `phihat`. No point of the prime order subgroup is.
pub fn super_optimal_miller_loop(params: &CurveParameters, p: &G1Affine, q: &G2Affine) -> Fp22 {
    try_super_optimal_miller_loop(params, p, q).unwrap()
}

/// [`super_optimal_miller_loop`], returning `None` where `phihat(p)` is
/// undefined.
pub fn try_super_optimal_miller_loop(
    params: &CurveParameters,
    p: &G1Affine,
    q: &G2Affine,
) -> Option<Fp22> {
    if bool::from(p.is_identity() | q.is_identity()) {
        return Some(Fp22::ONE);
    }
    let (p1, p2) = Option::<(G1Affine, G1Affine)>::from(phihat_2(p))?;

    let timer = start_timer!(|| "super-optimal ate miller loop");
    let f = evaluate(params, q, &p1, &p2);
    end_timer!(timer);
    Some(f)
}

/// Correction factors collected along the shared loop.
struct Corrections {
    /// `[|x|]Q`, not normalized.
    r1: G2,
    /// `[2]Q`, not normalized.
    r2: G2,
    /// The first tangent at `phihat(P)`.
    m2: Fp22,
    /// The accumulator at `[2]P` after the loop.
    m31: Fp22,
    /// Frobenius of the first tangent at `[2]P`.
    m32: Fp22,
    /// `m31` raised to `p^21`.
    m41: Fp22,
}

fn evaluate(params: &CurveParameters, q: &G2Affine, p1: &G1Affine, p2: &G1Affine) -> Fp22 {
    let q_plus_t = affine_plus_t2(params, q);
    let m1 = tangent_at_plus_t2(&q_plus_t, p1);

    let (f, c) = shared_loop(params.seed_naf, q, p1, p2, &m1);
    let f = f.square();

    let r1_plus_t = jacobian_plus_t2(params, &c.r1);
    let m33 = untwisted_chord(&c.r1, &c.r2.untwist_frobenius(1), p2);
    let m34 = untwisted_chord(&c.r1, &q_plus_t, p1);
    let m42 = untwisted_chord(&q.to_curve(), &r1_plus_t, p1);

    let f = f * c.m2 * c.m31 * c.m32 * m33 * m34;
    f * (m1 * c.m41 * m42).conjugated()
}

/// Runs the NAF walk once, accumulating the lines at `p2` and replaying the
/// lines at `p1` with the `m1` correction folded in.
fn shared_loop(
    naf: &[i8],
    q: &G2Affine,
    p1: &G1Affine,
    p2: &G1Affine,
    m1: &Fp22,
) -> (Fp22, Corrections) {
    let n = naf.len();
    let neg_q = -q;

    let mut r = q.to_curve();
    let (m2, mut f) = first_doubling_step(&mut r, p1, p2);
    let mut g = m2;
    let m32 = frobenius(f, 1);
    let r2 = r;
    if let Some((l1, l2)) = signed_addition_step(&mut r, naf[n - 2], q, &neg_q, p1, p2) {
        f *= l2;
        g *= l1;
    }

    let (l1, l2) = doubling_step(&mut r, p1, p2);
    f = f.square() * l2;
    g = g.square() * l1;
    if let Some((l1, l2)) = signed_addition_step(&mut r, naf[n - 3], q, &neg_q, p1, p2) {
        f *= l2;
        g *= l1;
    }

    let mut lines = Vec::with_capacity(2 * (n - 3));
    for &digit in naf[..n - 3].iter().rev() {
        let (l1, l2) = doubling_step(&mut r, p1, p2);
        lines.push(l1);
        f = f.square() * l2;
        if let Some((l1, l2)) = signed_addition_step(&mut r, digit, q, &neg_q, p1, p2) {
            lines.push(l1);
            f *= l2;
        }
    }

    let m31 = f;
    let m41 = frobenius(f, 21);
    let h = m41.square() * m1 * m2.conjugated();
    let h_inv = h.conjugated();

    let mut f = h * g;
    let mut lines = lines.iter();
    for i in (0..n - 3).rev() {
        f = f.square();
        let steps = if naf[i] == 0 { 1 } else { 2 };
        for line in lines.by_ref().take(steps) {
            f *= line;
        }
        match naf[i + 2] {
            1 => f *= h,
            -1 => f *= h_inv,
            _ => {}
        }
    }

    let corrections = Corrections {
        r1: r,
        r2,
        m2,
        m31,
        m32,
        m41,
    };
    (f, corrections)
}

/// A line on the untwisted curve given by `c0 = e y` and `c1 = d - c x`,
/// evaluated at both points.
fn evaluate_at(e: &Fp11, d: &Fp11, c: &Fp11, p1: &G1Affine, p2: &G1Affine) -> (Fp22, Fp22) {
    let line = |p: &G1Affine| Fp22::new(e.mul_by_base(&p.y), *d - c.mul_by_base(&p.x));
    (line(p1), line(p2))
}

/// Doubles `r`, returning the tangent at `r` evaluated at `p1` and `p2`.
fn doubling_step(r: &mut G2, p1: &G1Affine, p2: &G1Affine) -> (Fp22, Fp22) {
    let (t, yy, zz, beta) = r.shared_dbl();
    let d = (beta * r.x - yy.double()).mul_by_u();
    let lines = evaluate_at(&(t.z * zz), &d, &(beta * zz), p1, p2);
    *r = t;
    lines
}

/// [`doubling_step`] for `r.z = 1`.
fn first_doubling_step(r: &mut G2, p1: &G1Affine, p2: &G1Affine) -> (Fp22, Fp22) {
    let (t, yy, beta) = r.shared_dbl1();
    let d = (beta * r.x - yy.double()).mul_by_u();
    let lines = evaluate_at(&t.z, &d, &beta, p1, p2);
    *r = t;
    lines
}

/// Sets `r = r + q`, returning the chord through `r` and `q` evaluated at
/// `p1` and `p2`.
fn addition_step(r: &mut G2, q: &G2Affine, p1: &G1Affine, p2: &G1Affine) -> (Fp22, Fp22) {
    let (t, alpha, ztq) = r.shared_add(q);
    let d = alpha * q.x.mul_by_u() - ztq * q.y.mul_by_u();
    let lines = evaluate_at(&ztq, &d, &alpha, p1, p2);
    *r = t;
    lines
}

fn signed_addition_step(
    r: &mut G2,
    digit: i8,
    q: &G2Affine,
    neg_q: &G2Affine,
    p1: &G1Affine,
    p2: &G1Affine,
) -> Option<(Fp22, Fp22)> {
    match digit {
        1 => Some(addition_step(r, q, p1, p2)),
        -1 => Some(addition_step(r, neg_q, p1, p2)),
        _ => None,
    }
}

/// The tangent at the untwisted Jacobian point `q`, evaluated at `p`.
fn tangent_at_plus_t2(q: &(Fp11, Fp11, Fp11), p: &G1Affine) -> Fp22 {
    let (x, y, z) = *q;
    let zz = z.square();
    let c0 = (y * zz * z).mul_by_u().mul_by_base(&p.y.double());

    // 3 (x^2 - z^4)
    let t = (zz + x) * (x - zz);
    let t = t.double() + t;
    let c1 = y.square().mul_by_u().double() + (zz.mul_by_base(&p.x) - x) * t;
    Fp22::new(c0, -c1)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gg22d7::GG22D7;
    use group::{Curve, Group};
    use pairing::PairingCurveAffine;
    use rand_core::{OsRng, RngCore, SeedableRng};
    use rand_xorshift::XorShiftRng;

    crate::test_pairing!(GG22D7SuperOptimal, G1, G1Affine, G2, G2Affine, Fp22, Gt, Fr);

    #[test]
    fn test_identity_short_circuits() {
        let params = CurveParameters::get();
        let p = G1Affine::random(OsRng);
        let q = G2Affine::random(OsRng);
        assert_eq!(
            super_optimal_miller_loop(params, &G1Affine::identity(), &q),
            Fp22::ONE
        );
        assert_eq!(
            super_optimal_miller_loop(params, &p, &G2Affine::identity()),
            Fp22::ONE
        );
    }

    #[test]
    fn test_differs_from_optimal_ate() {
        let p = G1Affine::generator();
        let q = G2Affine::generator();
        let e = GG22D7SuperOptimal::pairing(&p, &q);
        assert_ne!(e, Gt::identity());
        assert_ne!(e, GG22D7::pairing(&p, &q));
        assert_eq!(e.0.pow_vartime(Fr::MODULUS_LIMBS), Fp22::ONE);
    }

    #[test]
    fn test_phihat_pole() {
        // a rational 2-torsion point of the base curve
        let t = G1Affine {
            x: super::super::isogeny::T2,
            y: crate::gg22d7::Fp::ZERO,
        };
        let params = CurveParameters::get();
        let q = G2Affine::generator();
        assert!(try_super_optimal_miller_loop(params, &t, &q).is_none());
        assert_eq!(
            GG22D7SuperOptimal::pairing_checked(&t, &q),
            Err(Error::NonInvertible("phihat"))
        );
    }

    #[test]
    fn test_pairing_checked() {
        let p = G1Affine::generator();
        let q = G2Affine::generator();
        assert_eq!(
            GG22D7SuperOptimal::pairing_checked(&p, &q),
            Ok(GG22D7SuperOptimal::pairing(&p, &q))
        );
        let off = G2Affine {
            x: q.x.double(),
            y: q.y,
        };
        assert_eq!(
            GG22D7SuperOptimal::pairing_checked(&p, &off),
            Err(Error::NotOnCurve("gg22d7_g2"))
        );
    }
}
