use ff::Field;
use lazy_static::lazy_static;
use num_bigint::BigUint;
use subtle::CtOption;

use super::fp::Fp;
use super::fp11::Fp11;
use super::SEED_NAF;
use crate::ff_ext::quadratic::{sqrt_algo9, QuadExtField, QuadExtFieldArith};
use crate::ff_ext::ExtField;

/// `Fp22 = Fp11[w] / (w^2 - u)`, the target field of the pairings.
pub type Fp22 = QuadExtField<Fp11>;

crate::impl_binops_additive!(Fp22, Fp22);
crate::impl_binops_multiplicative!(Fp22, Fp22);
crate::impl_binops_calls!(Fp22);
crate::impl_sum_prod!(Fp22);

struct SqrtParams {
    q_minus_3_over_4: Vec<u64>,
    q_minus_1_over_2: Vec<u64>,
    sqrt_minus_one: Fp22,
}

lazy_static! {
    // q = p^11
    static ref SQRT_PARAMS: SqrtParams = {
        let p = BigUint::from_bytes_le(
            &Fp::MODULUS_LIMBS
                .iter()
                .flat_map(|limb| limb.to_le_bytes())
                .collect::<Vec<_>>(),
        );
        let q = p.pow(11);
        // (c w)^2 = -1 for c^2 = -1 / u, a square since both -1 and u are not
        let c = (-Fp11::ONE.mul_by_u_inv()).sqrt().unwrap();
        let q_minus_3_over_4: BigUint = (&q - 3u32) >> 2;
        let q_minus_1_over_2: BigUint = (&q - 1u32) >> 1;
        SqrtParams {
            q_minus_3_over_4: q_minus_3_over_4.to_u64_digits(),
            q_minus_1_over_2: q_minus_1_over_2.to_u64_digits(),
            sqrt_minus_one: Fp22::new(Fp11::ZERO, c),
        }
    };
}

impl QuadExtFieldArith for Fp22 {
    type Base = Fp11;

    // N(1 + w) = 1 - u, whose norm down to Fp is -3, a non-residue mod p
    const NON_SQUARE: Fp22 = Fp22::new(Fp11::one(), Fp11::one());

    fn mul_assign(lhs: &mut Fp22, rhs: &Fp22) {
        let t0 = lhs.c0.mul_wide(&rhs.c0);
        let t1 = lhs.c1.mul_wide(&rhs.c1);
        let t2 = (lhs.c0 + lhs.c1).mul_wide(&(rhs.c0 + rhs.c1));
        lhs.c0 = t0.add(&t1.mul_by_nonresidue()).reduce();
        lhs.c1 = t2.sub(&t0).sub(&t1).reduce();
    }

    fn square_assign(el: &mut Fp22) {
        let ab = el.c0.mul_wide(&el.c1);
        let t = (el.c0 + el.c1).mul_wide(&(el.c0 + el.c1.mul_by_u()));
        el.c0 = t.sub(&ab).sub(&ab.mul_by_nonresidue()).reduce();
        el.c1 = ab.add(&ab).reduce();
    }

    fn sqrt(el: &Fp22) -> CtOption<Fp22> {
        sqrt_algo9(
            el,
            SQRT_PARAMS.q_minus_3_over_4.as_slice(),
            SQRT_PARAMS.q_minus_1_over_2.as_slice(),
            &SQRT_PARAMS.sqrt_minus_one,
        )
    }
}

impl ExtField for Fp22 {
    const NON_RESIDUE: Self = Fp22::new(Fp11::zero(), Fp11::one());

    /// Multiplies by `w`.
    fn mul_by_nonresidue(&self) -> Self {
        Fp22::new(self.c1.mul_by_u(), self.c0)
    }

    fn frobenius_map(&mut self, power: usize) {
        // w^(p^11) = -w is carried by the twisted map of c1
        self.c0.frobenius_map(power);
        self.c1.frobenius_map_twisted(power);
    }
}

impl Fp22 {
    /// Squaring in the cyclotomic subgroup, where `c0^2 - u c1^2 = 1`.
    ///
    /// Only valid on elements of norm one, such as the output of the easy part
    /// of the final exponentiation.
    pub fn cyclotomic_square(&self) -> Self {
        let c1 = (self.c0 * self.c1).double();
        let c0 = self.c0.square().double() - Fp11::ONE;
        Fp22::new(c0, c1)
    }

    /// Inverse of an element of norm one.
    pub fn cyclotomic_inverse(&self) -> Self {
        self.conjugated()
    }

    /// Raises a cyclotomic element to the curve seed `x = -779523`.
    pub fn cyclotomic_exp_by_seed(&self) -> Self {
        let inv = self.cyclotomic_inverse();
        // the leading digit is 1
        let mut res = *self;
        for digit in SEED_NAF.iter().rev().skip(1) {
            res = res.cyclotomic_square();
            match *digit {
                1 => res *= self,
                -1 => res *= inv,
                _ => {}
            }
        }
        res.cyclotomic_inverse()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gg22d7::SEED_ABS;
    use rand_core::OsRng;

    crate::field_testing_suite!(Fp22, "field_arithmetic", 100);
    crate::field_testing_suite!(Fp22, "sqrt", 5);
    crate::field_testing_suite!(Fp22, "sqrt_ratio", 10);
    crate::field_testing_suite!(Fp22, "frobenius", Fp::MODULUS_LIMBS, 22);

    /// `a^(p^11 - 1)` has norm one.
    fn random_cyclotomic() -> Fp22 {
        let a = Fp22::random(OsRng);
        a.conjugated() * a.invert().unwrap()
    }

    #[test]
    fn test_w_squared() {
        let w = Fp22::NON_RESIDUE;
        assert_eq!(w.square(), Fp22::new(crate::gg22d7::U, Fp11::ZERO));
        assert_eq!(SQRT_PARAMS.sqrt_minus_one.square(), -Fp22::ONE);
        for _ in 0..10 {
            let a = Fp22::random(OsRng);
            assert_eq!(a.mul_by_nonresidue(), a * w);
        }
    }

    #[test]
    fn test_conjugate_is_frobenius_11() {
        for _ in 0..10 {
            let a = Fp22::random(OsRng);
            let mut b = a;
            b.frobenius_map(11);
            assert_eq!(b, a.conjugated());
        }
    }

    #[test]
    fn test_cyclotomic_square() {
        for _ in 0..50 {
            let a = random_cyclotomic();
            assert_eq!(a.norm(), Fp11::ONE);
            assert_eq!(a.cyclotomic_square(), a.square());
            assert_eq!(a * a.cyclotomic_inverse(), Fp22::ONE);
        }
    }

    #[test]
    fn test_cyclotomic_exp_by_seed() {
        for _ in 0..5 {
            let a = random_cyclotomic();
            let expected = a.pow_vartime([SEED_ABS]).invert().unwrap();
            assert_eq!(a.cyclotomic_exp_by_seed(), expected);
        }
    }

    #[test]
    fn test_invert() {
        for _ in 0..20 {
            let a = Fp22::random(OsRng);
            assert_eq!(a * a.invert().unwrap(), Fp22::ONE);
        }
        assert!(bool::from(Fp22::ZERO.invert().is_none()));
    }
}
