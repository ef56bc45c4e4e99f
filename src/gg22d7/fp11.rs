//! `Fp11 = Fp[u] / (u^11 - 2u - 2)`, the field the twist is defined over.
//!
//! Products are computed with a recursive Karatsuba split into double width
//! accumulators and reduced once per coefficient at the end.

use ff::{Field, PrimeField};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use rand_core::RngCore;
use static_assertions::const_assert;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use crate::arithmetic::{adc, sbb};
use crate::encoding::endian::{Endian, EndianRepr};
use crate::ff_ext::ExtField;

const DEGREE: usize = 11;
const WIDE: usize = 2 * Fp::NUM_LIMBS;

// twice p * 2^512 still fits in the wide accumulators
const_assert!(Fp::MODULUS_LIMBS[Fp::NUM_LIMBS - 1] >> 63 == 0);

/// An unreduced product of two base field elements in Montgomery form.
///
/// Values are kept in `[0, p * 2^512)` so any sum of them can still be brought
/// back with [`Fp::montgomery_reduce`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpWide(pub(crate) [u64; WIDE]);

impl FpWide {
    #[inline]
    pub fn mul(a: &Fp, b: &Fp) -> Self {
        FpWide(a.mul_wide(b))
    }

    #[inline]
    pub fn add(&self, rhs: &Self) -> Self {
        let mut r = [0u64; WIDE];
        let mut carry = 0;
        for i in 0..WIDE {
            (r[i], carry) = adc(self.0[i], rhs.0[i], carry);
        }
        FpWide(r).subtract_modulus()
    }

    #[inline]
    pub fn double(&self) -> Self {
        self.add(self)
    }

    #[inline]
    pub fn sub(&self, rhs: &Self) -> Self {
        let mut r = [0u64; WIDE];
        let mut borrow = 0;
        for i in 0..WIDE {
            (r[i], borrow) = sbb(self.0[i], rhs.0[i], borrow);
        }
        // on underflow add p * 2^512 back, the low half of which is zero
        let mut carry = 0;
        for i in 0..Fp::NUM_LIMBS {
            let j = Fp::NUM_LIMBS + i;
            (r[j], carry) = adc(r[j], Fp::MODULUS_LIMBS[i] & borrow, carry);
        }
        FpWide(r)
    }

    #[inline]
    pub fn reduce(&self) -> Fp {
        Fp::montgomery_reduce(&self.0)
    }

    /// Subtracts `p * 2^512` once if the value is not below it.
    #[inline(always)]
    fn subtract_modulus(self) -> Self {
        let mut r = self.0;
        let mut borrow = 0;
        for i in 0..Fp::NUM_LIMBS {
            let j = Fp::NUM_LIMBS + i;
            (r[j], borrow) = sbb(r[j], Fp::MODULUS_LIMBS[i], borrow);
        }
        let mut carry = 0;
        for i in 0..Fp::NUM_LIMBS {
            let j = Fp::NUM_LIMBS + i;
            (r[j], carry) = adc(r[j], Fp::MODULUS_LIMBS[i] & borrow, carry);
        }
        FpWide(r)
    }
}

/// Karatsuba product of two equal length coefficient slices into the
/// `2 * len - 1` slots of `out`, without reduction.
///
/// An `n` coefficient operand is split into `n / 2` low and `n - n / 2` high
/// coefficients, so 11 goes through 5 + 6, then 2 + 3 and 3 + 3, down to
/// the 2 and 3 coefficient base cases.
fn karatsuba(a: &[Fp], b: &[Fp], out: &mut [FpWide]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(out.len(), 2 * a.len() - 1);

    match a.len() {
        1 => out[0] = FpWide::mul(&a[0], &b[0]),
        2 => {
            let p00 = FpWide::mul(&a[0], &b[0]);
            let p11 = FpWide::mul(&a[1], &b[1]);
            let m01 = FpWide::mul(&(a[0] + a[1]), &(b[0] + b[1]));
            out[0] = p00;
            out[1] = m01.sub(&p00).sub(&p11);
            out[2] = p11;
        }
        3 => {
            let p00 = FpWide::mul(&a[0], &b[0]);
            let p11 = FpWide::mul(&a[1], &b[1]);
            let p22 = FpWide::mul(&a[2], &b[2]);
            let m01 = FpWide::mul(&(a[0] + a[1]), &(b[0] + b[1]));
            let m02 = FpWide::mul(&(a[0] + a[2]), &(b[0] + b[2]));
            let m12 = FpWide::mul(&(a[1] + a[2]), &(b[1] + b[2]));
            out[0] = p00;
            out[1] = m01.sub(&p00).sub(&p11);
            out[2] = m02.sub(&p00).sub(&p22).add(&p11);
            out[3] = m12.sub(&p11).sub(&p22);
            out[4] = p22;
        }
        n => {
            let lo = n / 2;
            let hi = n - lo;
            let (a0, a1) = a.split_at(lo);
            let (b0, b1) = b.split_at(lo);

            let mut sa = [Fp::zero(); (DEGREE + 1) / 2];
            let mut sb = [Fp::zero(); (DEGREE + 1) / 2];
            sa[..hi].copy_from_slice(a1);
            sb[..hi].copy_from_slice(b1);
            for i in 0..lo {
                sa[i] += a0[i];
                sb[i] += b0[i];
            }

            let mut p0 = [FpWide::default(); DEGREE];
            let mut p1 = [FpWide::default(); DEGREE];
            let mut m = [FpWide::default(); DEGREE];
            karatsuba(a0, b0, &mut p0[..2 * lo - 1]);
            karatsuba(a1, b1, &mut p1[..2 * hi - 1]);
            karatsuba(&sa[..hi], &sb[..hi], &mut m[..2 * hi - 1]);

            out.iter_mut().for_each(|o| *o = FpWide::default());
            for i in 0..2 * lo - 1 {
                out[i] = out[i].add(&p0[i]);
                m[i] = m[i].sub(&p0[i]);
            }
            for i in 0..2 * hi - 1 {
                out[2 * lo + i] = out[2 * lo + i].add(&p1[i]);
                m[i] = m[i].sub(&p1[i]);
            }
            for i in 0..2 * hi - 1 {
                out[lo + i] = out[lo + i].add(&m[i]);
            }
        }
    }
}

/// Karatsuba square of a coefficient slice into the `2 * len - 1` slots of
/// `out`, split the same way as [`karatsuba`].
///
/// The base cases take cross terms as `2 a_i a_j` in place of the
/// Karatsuba sums.
fn karatsuba_square(a: &[Fp], out: &mut [FpWide]) {
    debug_assert_eq!(out.len(), 2 * a.len() - 1);

    match a.len() {
        1 => out[0] = FpWide::mul(&a[0], &a[0]),
        2 => {
            out[0] = FpWide::mul(&a[0], &a[0]);
            out[1] = FpWide::mul(&a[0].double(), &a[1]);
            out[2] = FpWide::mul(&a[1], &a[1]);
        }
        3 => {
            let a0_2 = a[0].double();
            out[0] = FpWide::mul(&a[0], &a[0]);
            out[1] = FpWide::mul(&a0_2, &a[1]);
            out[2] = FpWide::mul(&a0_2, &a[2]).add(&FpWide::mul(&a[1], &a[1]));
            out[3] = FpWide::mul(&a[1].double(), &a[2]);
            out[4] = FpWide::mul(&a[2], &a[2]);
        }
        n => {
            let lo = n / 2;
            let hi = n - lo;
            let (a0, a1) = a.split_at(lo);

            let mut sa = [Fp::zero(); (DEGREE + 1) / 2];
            sa[..hi].copy_from_slice(a1);
            for i in 0..lo {
                sa[i] += a0[i];
            }

            let mut p0 = [FpWide::default(); DEGREE];
            let mut p1 = [FpWide::default(); DEGREE];
            let mut m = [FpWide::default(); DEGREE];
            karatsuba_square(a0, &mut p0[..2 * lo - 1]);
            karatsuba_square(a1, &mut p1[..2 * hi - 1]);
            karatsuba_square(&sa[..hi], &mut m[..2 * hi - 1]);

            out.iter_mut().for_each(|o| *o = FpWide::default());
            for i in 0..2 * lo - 1 {
                out[i] = out[i].add(&p0[i]);
                m[i] = m[i].sub(&p0[i]);
            }
            for i in 0..2 * hi - 1 {
                out[2 * lo + i] = out[2 * lo + i].add(&p1[i]);
                m[i] = m[i].sub(&p1[i]);
            }
            for i in 0..2 * hi - 1 {
                out[lo + i] = out[lo + i].add(&m[i]);
            }
        }
    }
}

/// An unreduced element of `Fp11`, one [`FpWide`] per coefficient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fp11Wide(pub(crate) [FpWide; DEGREE]);

impl Fp11Wide {
    /// Folds a degree 20 product back with `u^11 = 2u + 2`.
    fn fold(mut w: [FpWide; 2 * DEGREE - 1]) -> Self {
        for k in (DEGREE..2 * DEGREE - 1).rev() {
            let t = w[k].double();
            w[k - DEGREE] = w[k - DEGREE].add(&t);
            w[k - DEGREE + 1] = w[k - DEGREE + 1].add(&t);
        }
        let mut out = [FpWide::default(); DEGREE];
        out.copy_from_slice(&w[..DEGREE]);
        Fp11Wide(out)
    }

    pub fn add(&self, rhs: &Self) -> Self {
        let mut out = self.0;
        out.iter_mut().zip(rhs.0.iter()).for_each(|(a, b)| *a = a.add(b));
        Fp11Wide(out)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        let mut out = self.0;
        out.iter_mut().zip(rhs.0.iter()).for_each(|(a, b)| *a = a.sub(b));
        Fp11Wide(out)
    }

    /// Multiplies by `u`.
    pub fn mul_by_nonresidue(&self) -> Self {
        let mut out = [FpWide::default(); DEGREE];
        out[1..].copy_from_slice(&self.0[..DEGREE - 1]);
        let top = self.0[DEGREE - 1].double();
        out[0] = top;
        out[1] = out[1].add(&top);
        Fp11Wide(out)
    }

    pub fn reduce(&self) -> Fp11 {
        let mut out = [Fp::zero(); DEGREE];
        out.iter_mut()
            .zip(self.0.iter())
            .for_each(|(o, w)| *o = w.reduce());
        Fp11(out)
    }
}

/// Element of `Fp[u] / (u^11 - 2u - 2)` in the power basis `1, u, ..., u^10`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fp11(pub(crate) [Fp; DEGREE]);

/// `u`, the generator of the power basis.
pub const U: Fp11 = {
    let mut c = [Fp::zero(); DEGREE];
    c[1] = Fp::one();
    Fp11(c)
};

impl Fp11 {
    /// Number of bytes of the encoding, one base field element per coefficient.
    pub const SIZE: usize = DEGREE * Fp::SIZE;

    #[inline]
    pub const fn zero() -> Self {
        Fp11([Fp::zero(); DEGREE])
    }

    #[inline]
    pub const fn one() -> Self {
        Self::from_base(Fp::one())
    }

    #[inline]
    pub const fn new(coeffs: [Fp; DEGREE]) -> Self {
        Fp11(coeffs)
    }

    #[inline]
    pub const fn from_base(c0: Fp) -> Self {
        let mut c = [Fp::zero(); DEGREE];
        c[0] = c0;
        Fp11(c)
    }

    pub fn coeffs(&self) -> &[Fp; DEGREE] {
        &self.0
    }

    pub fn add(&self, rhs: &Self) -> Self {
        let mut out = self.0;
        out.iter_mut().zip(rhs.0.iter()).for_each(|(a, b)| *a += b);
        Fp11(out)
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        let mut out = self.0;
        out.iter_mut().zip(rhs.0.iter()).for_each(|(a, b)| *a -= b);
        Fp11(out)
    }

    pub fn neg(&self) -> Self {
        let mut out = self.0;
        out.iter_mut().for_each(|a| *a = -*a);
        Fp11(out)
    }

    /// Unreduced product, for callers that combine several products before
    /// reducing.
    pub fn mul_wide(&self, rhs: &Self) -> Fp11Wide {
        let mut w = [FpWide::default(); 2 * DEGREE - 1];
        karatsuba(&self.0, &rhs.0, &mut w);
        Fp11Wide::fold(w)
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        self.mul_wide(rhs).reduce()
    }

    /// Unreduced square.
    pub fn square_wide(&self) -> Fp11Wide {
        let mut w = [FpWide::default(); 2 * DEGREE - 1];
        karatsuba_square(&self.0, &mut w);
        Fp11Wide::fold(w)
    }

    pub fn square(&self) -> Self {
        self.square_wide().reduce()
    }

    /// Multiplies every coefficient by `k`.
    pub fn mul_by_base(&self, k: &Fp) -> Self {
        let mut out = self.0;
        out.iter_mut().for_each(|a| *a *= k);
        Fp11(out)
    }

    /// Multiplies by `u`: shifts the basis up by one and folds `u^11` back.
    pub fn mul_by_u(&self) -> Self {
        let mut out = [Fp::zero(); DEGREE];
        out[1..].copy_from_slice(&self.0[..DEGREE - 1]);
        let top = self.0[DEGREE - 1].double();
        out[0] = top;
        out[1] += top;
        Fp11(out)
    }

    /// Multiplies by `u^-1 = u^10 / 2 - 1`.
    pub fn mul_by_u_inv(&self) -> Self {
        let mut out = [Fp::zero(); DEGREE];
        out[..DEGREE - 1].copy_from_slice(&self.0[1..]);
        out[DEGREE - 1] = self.0[0] * Fp::TWO_INV;
        out[0] -= self.0[0];
        Fp11(out)
    }

    /// `a^(p^power) * u^((p^power - 1) / 2)`, which is the Frobenius image of
    /// `a * w` divided by `w` for `w^2 = u`.
    ///
    /// The map has period 22 in `power`: `u^((p^11 - 1) / 2) = -1`, so powers
    /// from 11 on negate the image of `power - 11`.
    pub fn frobenius_map_twisted(&mut self, power: usize) {
        let j = power % (2 * DEGREE);
        if j % DEGREE != 0 {
            *self = combine(&self.0, &FROBENIUS_TABLES.twisted[j % DEGREE - 1]).reduce();
        }
        if j >= DEGREE {
            *self = -*self;
        }
    }

    /// Product of the ten nontrivial conjugates, `a^(p + p^2 + ... + p^10)`.
    fn conjugates_product(&self) -> Self {
        (1..DEGREE).fold(Self::one(), |acc, j| {
            let mut c = *self;
            c.frobenius_map(j);
            acc * c
        })
    }

    /// Norm down to the base field, `a^((p^11 - 1) / (p - 1))`.
    pub fn norm(&self) -> Fp {
        (self.conjugates_product() * self).0[0]
    }

    /// Inverse through the norm: `a^-1 = (a^p ... a^(p^10)) / N(a)`.
    pub fn invert(&self) -> CtOption<Self> {
        let t = self.conjugates_product();
        let n = (t * self).0[0];
        n.invert().map(|n| t.mul_by_base(&n))
    }

    /// Sign of the element, the parity of its first nonzero coefficient.
    pub fn sgn0(&self) -> Choice {
        let (sign, _) = self
            .0
            .iter()
            .fold((Choice::from(0), Choice::from(1)), |(sign, zero), c| {
                (sign | (zero & c.sgn0()), zero & c.is_zero())
            });
        sign
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut res = [0u8; Self::SIZE];
        res.chunks_exact_mut(Fp::SIZE)
            .zip(self.0.iter())
            .for_each(|(chunk, c)| chunk.copy_from_slice(&c.to_bytes()));
        res
    }

    /// Fails unless every coefficient is canonical.
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> CtOption<Self> {
        let mut out = [Fp::zero(); DEGREE];
        let mut is_some = Choice::from(1);
        bytes
            .chunks_exact(Fp::SIZE)
            .zip(out.iter_mut())
            .for_each(|(chunk, c)| {
                let mut buf = [0u8; Fp::SIZE];
                buf.copy_from_slice(chunk);
                let el = Fp::from_bytes(&buf);
                is_some &= el.is_some();
                *c = el.unwrap_or(Fp::zero());
            });
        CtOption::new(Fp11(out), is_some)
    }
}

/// `Σ coeffs[i] * basis[i]` with a single reduction per coefficient.
fn combine(coeffs: &[Fp], basis: &[Fp11]) -> Fp11Wide {
    let mut acc = [FpWide::default(); DEGREE];
    for (c, b) in coeffs.iter().zip(basis.iter()) {
        acc.iter_mut()
            .zip(b.0.iter())
            .for_each(|(acc, b)| *acc = acc.add(&FpWide::mul(c, b)));
    }
    Fp11Wide(acc)
}

/// Frobenius constants for `j = 1..=10`, one row per power.
#[derive(Debug)]
pub struct FrobeniusTables {
    /// `plain[j - 1][i - 1] = u^(i * p^j)` for `i = 1..=10`.
    pub(crate) plain: [[Fp11; DEGREE - 1]; DEGREE - 1],
    /// `twisted[j - 1][i] = u^(i * p^j) * u^((p^j - 1) / 2)` for `i = 0..=10`.
    pub(crate) twisted: [[Fp11; DEGREE]; DEGREE - 1],
}

impl FrobeniusTables {
    fn new() -> Self {
        let p = Fp::MODULUS_LIMBS;
        // (p - 1) / 2, p being odd
        let mut half_p = [0u64; Fp::NUM_LIMBS];
        for i in 0..Fp::NUM_LIMBS {
            half_p[i] = p[i] >> 1;
            if i + 1 < Fp::NUM_LIMBS {
                half_p[i] |= p[i + 1] << 63;
            }
        }

        let mut plain = [[Fp11::zero(); DEGREE - 1]; DEGREE - 1];
        let mut twisted = [[Fp11::zero(); DEGREE]; DEGREE - 1];

        // u^(p^j), and c_j = u^((p^j - 1) / 2) = c_{j-1}^p * u^((p - 1) / 2)
        let g = U.pow_vartime(half_p);
        let mut u_p = U.pow_vartime(p);
        let mut c = g;
        for j in 0..DEGREE - 1 {
            if j > 0 {
                u_p = combine_with_one(&u_p, &plain[0]);
                c = combine_with_one(&c, &plain[0]) * g;
            }

            let mut acc = u_p;
            for i in 0..DEGREE - 1 {
                plain[j][i] = acc;
                acc *= u_p;
            }

            twisted[j][0] = c;
            for i in 1..DEGREE {
                twisted[j][i] = plain[j][i - 1] * c;
            }
        }

        FrobeniusTables { plain, twisted }
    }
}

/// `a_0 + Σ a_i * row[i - 1]`, the Frobenius image of `a` for the given row.
fn combine_with_one(a: &Fp11, row: &[Fp11; DEGREE - 1]) -> Fp11 {
    let mut out = combine(&a.0[1..], row).reduce();
    out.0[0] += a.0[0];
    out
}

lazy_static! {
    /// Frobenius constants, computed from `u` on first use.
    pub static ref FROBENIUS_TABLES: FrobeniusTables = FrobeniusTables::new();

    /// `(p^11 + 1) / 4`, the square root exponent of `Fp11`.
    static ref SQRT_EXP: Vec<u64> = {
        let p = BigUint::from_bytes_le(&Fp::MODULUS_LIMBS
            .iter()
            .flat_map(|limb| limb.to_le_bytes())
            .collect::<Vec<_>>());
        let exp: BigUint = (p.pow(DEGREE as u32) + 1u32) >> 2;
        exp.to_u64_digits()
    };
}

crate::impl_binops_calls!(Fp11);
crate::impl_binops_additive!(Fp11, Fp11);
crate::impl_binops_multiplicative!(Fp11, Fp11);
crate::impl_sum_prod!(Fp11);

impl ConstantTimeEq for Fp11 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl ConditionallySelectable for Fp11 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [Fp::zero(); DEGREE];
        out.iter_mut()
            .zip(a.0.iter().zip(b.0.iter()))
            .for_each(|(o, (a, b))| *o = Fp::conditional_select(a, b, choice));
        Fp11(out)
    }
}

impl From<Fp> for Fp11 {
    fn from(c0: Fp) -> Self {
        Fp11::from_base(c0)
    }
}

impl From<u64> for Fp11 {
    fn from(val: u64) -> Self {
        Fp11::from_base(Fp::from(val))
    }
}

impl Field for Fp11 {
    const ZERO: Self = Self::zero();
    const ONE: Self = Self::one();

    fn random(mut rng: impl RngCore) -> Self {
        let mut out = [Fp::zero(); DEGREE];
        out.iter_mut().for_each(|c| *c = Fp::random(&mut rng));
        Fp11(out)
    }

    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    fn square(&self) -> Self {
        self.square()
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn sqrt(&self) -> CtOption<Self> {
        // p^11 = 3 mod 4
        let t = self.pow_vartime(SQRT_EXP.as_slice());
        CtOption::new(t, t.square().ct_eq(self))
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        crate::ff_ext::sqrt_ratio(num, div, &U)
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }
}

impl ExtField for Fp11 {
    const NON_RESIDUE: Self = U;

    fn mul_by_nonresidue(&self) -> Self {
        self.mul_by_u()
    }

    fn frobenius_map(&mut self, power: usize) {
        let j = power % DEGREE;
        if j == 0 {
            return;
        }
        *self = combine_with_one(self, &FROBENIUS_TABLES.plain[j - 1]);
    }
}

impl EndianRepr for Fp11 {
    const ENDIAN: Endian = Endian::LE;

    fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != Self::SIZE {
            return CtOption::new(Self::zero(), Choice::from(0));
        }
        let mut buf = [0u8; Self::SIZE];
        buf.copy_from_slice(bytes);
        Fp11::from_bytes(&buf)
    }
}

#[cfg(feature = "derive_serde")]
impl serde::Serialize for Fp11 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&crate::encoding::Repr::from(self.to_bytes()), serializer)
    }
}

#[cfg(feature = "derive_serde")]
impl<'de> serde::Deserialize<'de> for Fp11 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        let repr =
            <crate::encoding::Repr<{ Fp11::SIZE }> as serde::Deserialize>::deserialize(deserializer)?;
        Option::from(Fp11::from_bytes(repr.inner()))
            .ok_or_else(|| D::Error::custom("deserialized bytes don't encode an Fp11 element"))
    }
}
