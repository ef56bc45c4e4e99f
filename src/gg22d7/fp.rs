use gg22derive::impl_field;
use subtle::Choice;

impl_field!(
    gg22d7_base,
    Fp,
    modulus = "1d6d6ff82b405135b174f9f789277226da3c03c1a07a8e54143b0911f58f28355f79553c2b3b34cf7caa8e4581b79e1ede05a2878b8e12f3e7b",
    mul_gen = "2",
    from_uniform = [64, 128],
    endian = "little",
);

crate::impl_binops_calls!(Fp);
crate::impl_binops_additive!(Fp, Fp);
crate::impl_binops_multiplicative!(Fp, Fp);
crate::impl_from_u64!(Fp);
crate::serialize_deserialize_primefield!(Fp);

impl Fp {
    /// Sign of the element, its parity outside of Montgomery form.
    pub fn sgn0(&self) -> Choice {
        use ff::PrimeField;
        self.is_odd()
    }
}
