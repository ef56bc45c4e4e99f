//! The optimal ate pairing on GG22D7-457.
//!
//! The Miller loop runs twice over the NAF of `|x|`: the first pass computes
//! `f = f_{|x|,Q}` and `R1 = [|x|]Q`, the second computes `f_{|x|,R1}` while
//! folding `f^{±1}` back in at every nonzero digit. Two extra lines, the
//! Frobenius of the first tangent and the chord through `R1` and the
//! Frobenius image of `[2]Q`, complete the function.

use core::borrow::Borrow;
use core::iter::Sum;
use core::ops::{Add, Mul, Neg, Sub};

use ark_std::{end_timer, start_timer};
use ff::{Field, PrimeField};
use group::{prime::PrimeCurveAffine, Curve, Group};
use lazy_static::lazy_static;
use pairing::{Engine, MillerLoopResult, MultiMillerLoop, PairingCurveAffine};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp11::Fp11;
use super::fp22::Fp22;
use super::fr::Fr;
use super::g1::{G1Affine, G1};
use super::g2::{G2Affine, G2};
use super::params::CurveParameters;
use crate::ff_ext::ExtField;
use crate::{CurveAffine, Error, Result};

crate::impl_gt!(Gt, Fp22, Fr, *GT_GENERATOR);
crate::impl_miller_loop_components!(
    GG22D7,
    G1,
    G1Affine,
    G2,
    G2Affine,
    Fp22,
    Gt,
    Fr,
    miller_loop,
    pairing_curve_affine
);

lazy_static! {
    static ref GT_GENERATOR: Gt = GG22D7::pairing(&G1Affine::generator(), &G2Affine::generator());
}

impl GG22D7 {
    /// [`Engine::pairing`] for untrusted inputs.
    pub fn pairing_checked(p: &G1Affine, q: &G2Affine) -> Result<Gt> {
        check_points(p, q)?;
        let f = miller_loop(CurveParameters::get(), p, q);
        Option::<Gt>::from(final_exponentiation(&f)).ok_or(Error::NonInvertible("Fp22"))
    }
}

pub(crate) fn check_points(p: &G1Affine, q: &G2Affine) -> Result<()> {
    if !bool::from(p.is_on_curve()) {
        return Err(Error::NotOnCurve("gg22d7_g1"));
    }
    if !bool::from(q.is_on_curve()) {
        return Err(Error::NotOnCurve("gg22d7_g2"));
    }
    Ok(())
}

/// The optimal ate Miller function of `(p, q)`, before the final
/// exponentiation. Either input being the identity gives one.
pub fn miller_loop(params: &CurveParameters, p: &G1Affine, q: &G2Affine) -> Fp22 {
    if bool::from(p.is_identity() | q.is_identity()) {
        return Fp22::ONE;
    }
    let timer = start_timer!(|| "optimal ate miller loop");

    let naf = params.seed_naf;
    let n = naf.len();
    let neg_q = -q;

    let mut r = q.to_curve();
    let mut f = first_doubling_step(&mut r, p);
    let mut l1 = f;
    l1.frobenius_map(2);
    let r2 = r;
    if let Some(line) = signed_addition_step(&mut r, naf[n - 2], q, &neg_q, p) {
        f *= line;
    }
    for &digit in naf[..n - 2].iter().rev() {
        f = f.square() * doubling_step(&mut r, p);
        if let Some(line) = signed_addition_step(&mut r, digit, q, &neg_q, p) {
            f *= line;
        }
    }

    let g = f;
    let g_inv = g.conjugated();
    let r1 = r.to_affine();
    let neg_r1 = -r1;

    let mut r = r1.to_curve();
    f = f.square() * first_doubling_step(&mut r, p);
    if let Some(line) = signed_addition_step(&mut r, naf[n - 2], &r1, &neg_r1, p) {
        f *= line;
    }
    for &digit in naf[..n - 2].iter().rev() {
        f = f.square() * doubling_step(&mut r, p);
        if let Some(line) = signed_addition_step(&mut r, digit, &r1, &neg_r1, p) {
            f *= line;
            f *= if digit > 0 { g } else { g_inv };
        }
    }
    let mut g = g;
    g.frobenius_map(1);
    f *= g;

    let mut l2 = untwisted_chord(&r1.to_curve(), &r2.untwist_frobenius(1), p);
    l2.frobenius_map(1);

    end_timer!(timer);
    f * l1 * l2
}

/// Doubles `r`, returning the tangent at `r` evaluated at `p`.
fn doubling_step(r: &mut G2, p: &G1Affine) -> Fp22 {
    let (t, yy, zz, beta) = r.shared_dbl();
    let c1 = beta * (r.x.mul_by_u() - zz.mul_by_base(&p.x)) - yy.mul_by_u().double();
    let c0 = (zz * t.z).mul_by_base(&p.y);
    *r = t;
    Fp22::new(c0, c1)
}

/// [`doubling_step`] for `r.z = 1`.
fn first_doubling_step(r: &mut G2, p: &G1Affine) -> Fp22 {
    let (t, yy, beta) = r.shared_dbl1();
    let c1 = beta * (r.x.mul_by_u() - Fp11::from_base(p.x)) - yy.mul_by_u().double();
    let c0 = t.z.mul_by_base(&p.y);
    *r = t;
    Fp22::new(c0, c1)
}

/// Sets `r = r + q`, returning the chord through `r` and `q` evaluated at
/// `p`.
fn addition_step(r: &mut G2, q: &G2Affine, p: &G1Affine) -> Fp22 {
    let (t, alpha, ztq) = r.shared_add(q);
    let c1 = (q.x.mul_by_u() - Fp11::from_base(p.x)) * alpha - ztq * q.y.mul_by_u();
    let c0 = ztq.mul_by_base(&p.y);
    *r = t;
    Fp22::new(c0, c1)
}

/// Adds `q` or `neg_q` to `r` as the NAF digit says.
fn signed_addition_step(
    r: &mut G2,
    digit: i8,
    q: &G2Affine,
    neg_q: &G2Affine,
    p: &G1Affine,
) -> Option<Fp22> {
    match digit {
        1 => Some(addition_step(r, q, p)),
        -1 => Some(addition_step(r, neg_q, p)),
        _ => None,
    }
}

/// The line through `r`, mapped to the untwisted curve, and the untwisted
/// Jacobian point `other`, evaluated at `p`.
pub(crate) fn untwisted_chord(r: &G2, other: &(Fp11, Fp11, Fp11), p: &G1Affine) -> Fp22 {
    let (x2, y2, z2) = *other;
    let x1 = r.x.mul_by_u();
    let y1 = r.y.mul_by_u();
    let zz1 = r.z.square();
    let zzz1 = zz1 * r.z;
    let zzz2 = z2.square() * z2;

    let t0 = x2 * z2 * zz1 - x1 * zzz2;
    let t1 = y2 * zzz1 - y1 * zzz2;
    let c0 = zzz1.mul_by_base(&p.y) * t0;
    let c1 = t1 * (x1 - zz1.mul_by_base(&p.x)) - t0 * y1;
    Fp22::new(c0, c1)
}

impl MillerLoopResult for Fp22 {
    type Gt = Gt;

    fn final_exponentiation(&self) -> Gt {
        // Miller functions of points on the curves never vanish.
        final_exponentiation(self).unwrap()
    }
}

/// Raises `f` to `(p^11 - 1)(p + 1) lambda`, a multiple of `(p^22 - 1) / r`.
///
/// Fails only for `f = 0`.
pub fn final_exponentiation(f: &Fp22) -> CtOption<Gt> {
    let timer = start_timer!(|| "final exponentiation");
    let mut t0 = *f;
    t0.frobenius_map(1);
    t0 *= f;
    let res = t0.invert().map(|inv| Gt(hard_part(t0.conjugated() * inv)));
    end_timer!(timer);
    res
}

pub(crate) fn frobenius(mut f: Fp22, power: usize) -> Fp22 {
    f.frobenius_map(power);
    f
}

fn square_n(mut f: Fp22, n: usize) -> Fp22 {
    for _ in 0..n {
        f = f.cyclotomic_square();
    }
    f
}

/// Exponentiation by `lambda` of a cyclotomic element: a fixed chain of
/// seed powers, squarings and Frobenius maps at offsets 1 and 9.
fn hard_part(m: Fp22) -> Fp22 {
    let m2 = m.cyclotomic_square();
    let mut a = m.cyclotomic_exp_by_seed();
    let t0 = a.cyclotomic_exp_by_seed();
    a = m2 * t0 * a.conjugated();

    let mut f = a;
    a = a.cyclotomic_exp_by_seed();
    f = frobenius(f.cyclotomic_square(), 1) * a;

    a = a.cyclotomic_exp_by_seed();
    f = frobenius(f.cyclotomic_square(), 1) * a.conjugated();

    a = a.cyclotomic_exp_by_seed();
    f = frobenius(f.cyclotomic_square(), 1) * (a.cyclotomic_square() * a).conjugated();

    a = a.cyclotomic_exp_by_seed();
    f = frobenius(f.cyclotomic_square(), 1) * a.conjugated();

    a = a.cyclotomic_exp_by_seed();
    f = frobenius(f.cyclotomic_square(), 1) * (square_n(a, 2) * a);

    a = a.cyclotomic_exp_by_seed();
    f = frobenius(f.cyclotomic_square(), 1) * (square_n(a, 3) * a.conjugated());

    a = a.cyclotomic_exp_by_seed();
    f = frobenius(f.cyclotomic_square(), 1) * (a.cyclotomic_square() * a).conjugated();

    a = a.cyclotomic_exp_by_seed();
    let mut g = frobenius(a * square_n(a, 4), 9);

    a = a.cyclotomic_exp_by_seed();
    f = (f.cyclotomic_square() * frobenius(g, 1)).cyclotomic_square();
    let t0 = (square_n(a, 2) * a).cyclotomic_square() * a;
    f = (f * frobenius(t0, 9)).cyclotomic_square();

    a = a.cyclotomic_exp_by_seed();
    a *= square_n(m * m2.cyclotomic_square(), 5) * m;

    g = square_n(a.cyclotomic_square() * a, 3).conjugated() * a;

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * ((square_n(a, 2) * a).cyclotomic_square() * a);

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * (square_n(a, 4) * a);

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * (a.cyclotomic_square() * a);

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * (square_n(a, 3).conjugated() * a);

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * (square_n(a, 2) * a).conjugated();

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * a;

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * (a.cyclotomic_square() * a);

    a = a.cyclotomic_exp_by_seed();
    g = frobenius(g, 1) * a;
    f *= g;

    a = a.cyclotomic_exp_by_seed();
    g = a;
    a = a.cyclotomic_exp_by_seed();
    g = frobenius(frobenius(g, 1) * a, 9);
    f * g
}
