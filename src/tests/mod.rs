use ff::PrimeField;
use num_bigint::BigUint;
use num_traits::Num;
use std::borrow::Cow;

pub mod curve;
pub mod pairing;

pub(crate) const SEED: [u8; 16] = [
    0x59, 0x62, 0xbe, 0x5d, 0x76, 0x3d, 0x31, 0x8d, 0x17, 0xdb, 0x37, 0x32, 0x54, 0x06, 0xbc, 0xe5,
];

pub(crate) fn fe_from_str<F: PrimeField>(string: impl AsRef<str>) -> F {
    let string = string.as_ref();
    let oct = if let Some(hex) = string.strip_prefix("0x") {
        Cow::Owned(BigUint::from_str_radix(hex, 16).unwrap().to_string())
    } else {
        Cow::Borrowed(string)
    };
    F::from_str_vartime(&oct).unwrap()
}

pub(crate) fn modulus<F: PrimeField>() -> BigUint {
    BigUint::from_str_radix(F::MODULUS.trim_start_matches("0x"), 16).unwrap()
}

pub(crate) fn big_to_fe<F: PrimeField>(e: &BigUint) -> F {
    let e = e % modulus::<F>();
    F::from_str_vartime(&e.to_str_radix(10)).unwrap()
}
