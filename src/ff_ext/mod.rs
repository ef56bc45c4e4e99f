use subtle::{Choice, ConditionallySelectable};

pub mod quadratic;

/// A field with a distinguished non-residue, used to build the next level of
/// an extension tower on top of it.
pub trait ExtField: ff::Field {
    /// The element whose square root generates the next extension.
    const NON_RESIDUE: Self;

    /// Multiplies by `NON_RESIDUE`.
    fn mul_by_nonresidue(&self) -> Self;

    /// Raises to the `power`-th iterate of the base field Frobenius,
    /// `x ↦ x^(p^power)`.
    fn frobenius_map(&mut self, power: usize);
}

/// `ff::Field::sqrt_ratio` for a field without a two-adic root of unity,
/// built from `sqrt` and a fixed non-square `z`.
///
/// Returns `(1, sqrt(num / div))` when the ratio is a square and
/// `(0, sqrt(z * num / div))` otherwise. A zero `div` gives `(0, 0)`
/// unless `num` is zero as well.
pub fn sqrt_ratio<F: ff::Field>(num: &F, div: &F, z: &F) -> (Choice, F) {
    let ratio = div.invert().unwrap_or(F::ZERO) * num;
    let root = ratio.sqrt();
    let is_square = root.is_some();
    let twisted = (ratio * z).sqrt().unwrap_or(F::ZERO);
    let res = F::conditional_select(&twisted, &root.unwrap_or(F::ZERO), is_square);
    (is_square & (!div.is_zero() | num.is_zero()), res)
}
