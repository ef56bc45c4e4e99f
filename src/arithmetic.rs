//! This module provides common utilities, traits and structures for group and
//! field arithmetic.

mod curves;
pub use curves::*;

/// Compute a + b + carry, returning the result and the new carry over.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a - (b + borrow), returning the result and the new borrow.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a + (b * c) + carry, returning the result and the new carry over.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Non-adjacent form of the little-endian integer `k`.
///
/// Digits are in `{-1, 0, 1}`, least significant first, and no two adjacent
/// digits are nonzero. The length of the returned vector is the number of
/// digits actually used, so the last digit is always nonzero unless `k = 0`.
pub fn naf(k: &[u64]) -> Vec<i8> {
    let mut k = k.to_vec();
    let mut digits = Vec::with_capacity(k.len() * 64 + 1);

    let is_zero = |k: &[u64]| k.iter().all(|limb| *limb == 0);
    while !is_zero(&k) {
        let digit = if k[0] & 1 == 1 {
            // 2 - (k mod 4) is 1 for k = 1 mod 4 and -1 for k = 3 mod 4
            let d: i8 = if k[0] & 2 == 0 { 1 } else { -1 };
            if d == 1 {
                k[0] &= !1;
            } else {
                // k + 1 clears the two low bits, propagate the carry
                let mut carry = 1u64;
                for limb in k.iter_mut() {
                    let (r, c) = adc(*limb, 0, carry);
                    *limb = r;
                    carry = c;
                    if carry == 0 {
                        break;
                    }
                }
                if carry != 0 {
                    k.push(carry);
                }
            }
            d
        } else {
            0
        };
        digits.push(digit);

        // k >>= 1
        let mut high = 0u64;
        for limb in k.iter_mut().rev() {
            let next_high = *limb & 1;
            *limb = (*limb >> 1) | (high << 63);
            high = next_high;
        }
    }
    digits
}
