use num_bigint::BigUint;

/// Little-endian 64-bit limbs of `e`, zero padded to `number_of_limbs`.
pub(crate) fn big_to_limbs(e: &BigUint, number_of_limbs: usize) -> Vec<u64> {
    let mut limbs = e.to_u64_digits();
    assert!(
        limbs.len() <= number_of_limbs,
        "value does not fit in {} limbs",
        number_of_limbs
    );
    limbs.resize(number_of_limbs, 0);
    limbs
}

pub(crate) fn big_to_token(e: &BigUint, number_of_limbs: usize) -> proc_macro2::TokenStream {
    let limbs = big_to_limbs(e, number_of_limbs);
    quote::quote! {[#(#limbs,)*]}
}

pub(crate) fn mod_inv(e: &BigUint, modulus: &BigUint) -> BigUint {
    e.modpow(&(modulus - BigUint::from(2u64)), modulus)
}
