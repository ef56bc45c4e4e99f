#![cfg_attr(not(feature = "std"), no_std)]

mod field;
mod utils;

/// Generates a Montgomery-form prime field with `⌈log2(modulus)/64⌉` limbs.
///
/// ```ignore
/// impl_field!(
///     gg22d7_base,
///     Fp,
///     modulus = "...",
///     mul_gen = "...",
///     zeta = "...", // optional, only when 3 | modulus - 1
///     from_uniform = [64, 128],
///     endian = "little",
/// );
/// ```
#[proc_macro]
pub fn impl_field(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    field::impl_field(input)
}
