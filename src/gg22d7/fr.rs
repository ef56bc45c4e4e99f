use gg22derive::impl_field;

impl_field!(
    gg22d7_scalar,
    Fr,
    modulus = "544dace03351e476c00d591f5a370fc93d2c9666c22874c2514c2ee109931ef6c130bb95a1df04dd7764b0a22f1f0fdd",
    mul_gen = "2",
    zeta = "22034090c0c742df789f85bcf870cf24c4b3983376856d2b41b01b60f8bd792757506a7100193a5d9782d425844fb16d",
    from_uniform = [48, 64, 96],
    endian = "little",
);

crate::impl_binops_calls!(Fr);
crate::impl_binops_additive!(Fr, Fr);
crate::impl_binops_multiplicative!(Fr, Fr);
crate::impl_from_u64!(Fr);
crate::serialize_deserialize_primefield!(Fr);

#[cfg(test)]
mod test {
    use super::*;

    crate::field_testing_suite!(Fr, "field_arithmetic");
    crate::field_testing_suite!(Fr, "conversion");
    crate::field_testing_suite!(Fr, "serialization");
    crate::field_testing_suite!(Fr, "quadratic_residue");
    crate::field_testing_suite!(Fr, "bits");
    crate::field_testing_suite!(Fr, "constants");
    crate::field_testing_suite!(Fr, "sqrt");
    crate::field_testing_suite!(Fr, "zeta");
    crate::field_testing_suite!(Fr, "from_uniform_bytes", 48, 64, 96);

    #[test]
    fn test_size() {
        use ff::PrimeField;
        assert_eq!(Fr::NUM_BITS, 383);
        assert_eq!(Fr::SIZE, 48);
        assert_eq!(Fr::NUM_LIMBS, 6);
    }
}
