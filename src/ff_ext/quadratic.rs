use ff::Field;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::ExtField;

/// Square root in `F[w] / (w² − β)` for `|F| = q ≡ 3 mod 4`.
///
/// Algorithm 9 of https://eprint.iacr.org/2012/685.pdf. The `q`-power
/// Frobenius of the extension is conjugation, and `sqrt_minus_one` is a square
/// root of −1, which lies outside of `F` since −1 is a non-residue there.
pub fn sqrt_algo9<F: ExtField, S: AsRef<[u64]>>(
    e: &QuadExtField<F>,
    q_minus_3_over_4: S,
    q_minus_1_over_2: S,
    sqrt_minus_one: &QuadExtField<F>,
) -> CtOption<QuadExtField<F>>
where
    QuadExtField<F>: QuadExtFieldArith<Base = F> + ExtField,
{
    if e.is_zero().into() {
        return CtOption::new(QuadExtField::ZERO, Choice::from(1));
    }

    let mut a1 = e.pow(q_minus_3_over_4);
    let alpha = a1.square() * e;
    let a0 = alpha.conjugated() * alpha;

    let neg1 = -QuadExtField::<F>::ONE;
    if a0 == neg1 {
        return CtOption::new(a0, Choice::from(0));
    }

    a1 *= e;
    if alpha == neg1 {
        a1 *= sqrt_minus_one;
    } else {
        a1 *= (alpha + QuadExtField::ONE).pow(q_minus_1_over_2);
    }
    CtOption::new(a1, Choice::from(1))
}

/// Arithmetic of a quadratic extension `F[w] / (w² − F::NON_RESIDUE)`.
pub trait QuadExtFieldArith {
    type Base: ExtField;

    /// Karatsuba, three base multiplications.
    fn mul_assign(lhs: &mut QuadExtField<Self::Base>, rhs: &QuadExtField<Self::Base>) {
        let QuadExtField { c0: a0, c1: a1 } = *lhs;
        let (lo, hi) = (a0 * rhs.c0, a1 * rhs.c1);
        let cross = (a0 + a1) * (rhs.c0 + rhs.c1);
        *lhs = QuadExtField::new(lo + hi.mul_by_nonresidue(), cross - lo - hi);
    }

    /// Complex squaring, two base multiplications.
    fn square_assign(el: &mut QuadExtField<Self::Base>) {
        let QuadExtField { c0: a0, c1: a1 } = *el;
        let ab = a0 * a1;
        let t = (a0 + a1) * (a0 + a1.mul_by_nonresidue());
        *el = QuadExtField::new(t - ab - ab.mul_by_nonresidue(), ab.double());
    }

    fn sqrt(el: &QuadExtField<Self::Base>) -> CtOption<QuadExtField<Self::Base>>;

    /// A fixed non-square of the extension, the `z` of `sqrt_ratio`.
    const NON_SQUARE: QuadExtField<Self::Base>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadExtField<F: ff::Field> {
    pub(crate) c0: F,
    pub(crate) c1: F,
}

impl<F: ff::Field> QuadExtField<F> {
    #[inline]
    pub const fn new(c0: F, c1: F) -> Self {
        Self { c0, c1 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self {
            c0: F::ZERO,
            c1: F::ZERO,
        }
    }

    #[inline]
    pub const fn one() -> Self {
        Self {
            c0: F::ONE,
            c1: F::ZERO,
        }
    }

    #[inline]
    pub fn c0(&self) -> &F {
        &self.c0
    }

    #[inline]
    pub fn c1(&self) -> &F {
        &self.c1
    }

    fn map(&self, f: impl Fn(&F) -> F) -> Self {
        Self::new(f(&self.c0), f(&self.c1))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(&F, &F) -> F) -> Self {
        Self::new(f(&self.c0, &other.c0), f(&self.c1, &other.c1))
    }

    #[inline]
    pub fn double(&self) -> Self {
        self.map(F::double)
    }

    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| *a + b)
    }

    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| *a - b)
    }

    #[inline]
    pub fn neg(&self) -> Self {
        self.map(|a| -*a)
    }

    /// Negates `c1`, the `q`-power Frobenius over the base field.
    #[inline]
    pub fn conjugate(&mut self) {
        self.c1 = -self.c1;
    }

    #[inline]
    #[must_use]
    pub fn conjugated(&self) -> Self {
        let mut out = *self;
        out.conjugate();
        out
    }
}

impl<F: ExtField> QuadExtField<F>
where
    Self: QuadExtFieldArith<Base = F>,
{
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut lhs = *self;
        Self::mul_assign(&mut lhs, rhs);
        lhs
    }

    pub fn mul_assign(&mut self, rhs: &Self) {
        <Self as QuadExtFieldArith>::mul_assign(self, rhs);
    }

    pub fn square(el: &Self) -> Self {
        let mut el = *el;
        Self::square_assign(&mut el);
        el
    }

    pub fn square_assign(&mut self) {
        <Self as QuadExtFieldArith>::square_assign(self);
    }

    /// `c0² − β·c1²`, the norm down to the base field.
    pub fn norm(&self) -> F {
        self.c0.square() - self.c1.square().mul_by_nonresidue()
    }
}

impl<F: ExtField> Field for QuadExtField<F>
where
    QuadExtField<F>: QuadExtFieldArith<Base = F> + ExtField,
{
    const ZERO: Self = Self::zero();
    const ONE: Self = Self::one();

    fn random(mut rng: impl rand_core::RngCore) -> Self {
        Self::new(F::random(&mut rng), F::random(&mut rng))
    }

    fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    fn square(&self) -> Self {
        QuadExtField::square(self)
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn sqrt(&self) -> CtOption<Self> {
        <Self as QuadExtFieldArith>::sqrt(self)
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        super::sqrt_ratio(num, div, &<Self as QuadExtFieldArith>::NON_SQUARE)
    }

    // conj(a) / N(a)
    fn invert(&self) -> CtOption<Self> {
        let conj = self.conjugated();
        self.norm().invert().map(|t| conj.map(|c| *c * t))
    }
}

impl<F: ff::Field> ConditionallySelectable for QuadExtField<F> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        a.zip_with(b, |x, y| F::conditional_select(x, y, choice))
    }
}

impl<F: ff::Field> ConstantTimeEq for QuadExtField<F> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}
