mod arith;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{Num, One};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::Token;

use crate::utils::{big_to_limbs, big_to_token, mod_inv};

struct FieldConfig {
    field: syn::Ident,
    modulus: BigUint,
    mul_gen: BigUint,
    zeta: Option<BigUint>,
    from_uniform: Vec<usize>,
    little_endian: bool,
}

/// Consumes `key =`.
fn expect_key(input: ParseStream<'_>, key: &str) -> syn::Result<()> {
    let found: syn::Ident = input.parse()?;
    if found != key {
        let msg = format!("expected `{key}`, found `{found}`");
        return Err(syn::Error::new(found.span(), msg));
    }
    input.parse::<Token![=]>()?;
    Ok(())
}

fn next_key_is(input: ParseStream<'_>, key: &str) -> bool {
    matches!(input.fork().parse::<syn::Ident>(), Ok(ident) if ident == key)
}

/// `key = "hex",`
fn hex_entry(input: ParseStream<'_>, key: &str) -> syn::Result<BigUint> {
    expect_key(input, key)?;
    let lit: syn::LitStr = input.parse()?;
    let value = BigUint::from_str_radix(&lit.value(), 16)
        .map_err(|err| syn::Error::new(lit.span(), err.to_string()))?;
    input.parse::<Token![,]>()?;
    Ok(value)
}

/// `key = [a, b, ...],`
fn list_entry(input: ParseStream<'_>, key: &str) -> syn::Result<Vec<usize>> {
    expect_key(input, key)?;
    let content;
    syn::bracketed!(content in input);
    let values = content
        .parse_terminated::<syn::LitInt, Token![,]>(syn::LitInt::parse)?
        .iter()
        .map(syn::LitInt::base10_parse::<usize>)
        .collect::<syn::Result<Vec<_>>>()?;
    input.parse::<Token![,]>()?;
    Ok(values)
}

impl Parse for FieldConfig {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        // the leading name is only a label for the invocation
        let _label: syn::Ident = input.parse()?;
        input.parse::<Token![,]>()?;
        let field: syn::Ident = input.parse()?;
        input.parse::<Token![,]>()?;

        let modulus = hex_entry(input, "modulus")?;
        let mul_gen = hex_entry(input, "mul_gen")?;
        let zeta = match next_key_is(input, "zeta") {
            true => Some(hex_entry(input, "zeta")?),
            false => None,
        };
        let from_uniform = list_entry(input, "from_uniform")?;

        expect_key(input, "endian")?;
        let endian: syn::LitStr = input.parse()?;
        input.parse::<Token![,]>()?;
        let little_endian = match endian.value().as_str() {
            "little" => true,
            "big" => false,
            _ => {
                return Err(syn::Error::new(
                    endian.span(),
                    "endian must be \"little\" or \"big\"",
                ))
            }
        };

        if !input.is_empty() {
            return Err(input.error("unexpected trailing tokens"));
        }
        Ok(FieldConfig {
            field,
            modulus,
            mul_gen,
            zeta,
            from_uniform,
            little_endian,
        })
    }
}

/// Everything derived from the modulus that the generated code embeds.
struct Constants {
    num_bits: u32,
    num_limbs: usize,
    modulus_limbs: Vec<u64>,
    /// `-p^-1 mod 2^64`
    inv: u64,
    /// `2^(64 * num_limbs) mod p`, the Montgomery radix.
    r: BigUint,
    two_adicity: u32,
    /// Odd part of `p - 1`.
    odd_part: BigUint,
}

impl Constants {
    fn new(modulus: &BigUint) -> Self {
        let num_bits = modulus.bits() as u32;
        let num_limbs = (num_bits as usize + 63) / 64;
        let modulus_limbs = big_to_limbs(modulus, num_limbs);

        // Newton iteration for p^-1 mod 2^64
        let inv = (0..63)
            .fold(1u64, |inv, _| inv.wrapping_mul(inv).wrapping_mul(modulus_limbs[0]))
            .wrapping_neg();

        let r = (BigUint::one() << (64 * num_limbs)) % modulus;

        let p_minus_one = modulus - 1u64;
        let two_adicity = p_minus_one.trailing_zeros().unwrap_or(0) as u32;
        let odd_part = &p_minus_one >> two_adicity;
        debug_assert!(odd_part.is_odd());

        Constants {
            num_bits,
            num_limbs,
            modulus_limbs,
            inv,
            r,
            two_adicity,
            odd_part,
        }
    }

    fn limbs(&self, value: &BigUint) -> TokenStream2 {
        big_to_token(value, self.num_limbs)
    }

    /// Limbs of `value` in Montgomery form.
    fn mont(&self, value: &BigUint, modulus: &BigUint) -> TokenStream2 {
        self.limbs(&((value * &self.r) % modulus))
    }
}

pub(crate) fn impl_field(input: TokenStream) -> TokenStream {
    let config = syn::parse_macro_input!(input as FieldConfig);
    let consts = Constants::new(&config.modulus);

    let field = &config.field;
    let arith = arith::impl_arith(field, consts.num_limbs, consts.inv);
    let arith_const = arith::impl_arith_always_const(field, consts.num_limbs, consts.inv);
    let storage = impl_storage(&config, &consts);
    let ff = impl_ff(&config, &consts);
    let uniform = impl_from_uniform_bytes(&config, &consts);

    let zeta = config.zeta.as_ref().map(|zeta| {
        let zeta = consts.mont(zeta, &config.modulus);
        quote! {
            impl ff::WithSmallOrderMulGroup<3> for #field {
                const ZETA: Self = Self(#zeta);
            }
        }
    });

    quote! {
        #arith
        #arith_const
        #storage
        #ff
        #uniform
        #zeta
    }
    .into()
}

/// The limb struct, its comparisons and its byte encodings.
fn impl_storage(config: &FieldConfig, consts: &Constants) -> TokenStream2 {
    let field = &config.field;
    let modulus = &config.modulus;
    let num_limbs = consts.num_limbs;
    let modulus_limbs = &consts.modulus_limbs;

    let r1 = consts.limbs(&consts.r);
    let r2 = consts.mont(&consts.r, modulus);
    let r3 = consts.mont(&((&consts.r * &consts.r) % modulus), modulus);
    let half_modulus = consts.limbs(&((modulus - 1u64) >> 1));
    let endian = match config.little_endian {
        true => quote!(LE),
        false => quote!(BE),
    };

    quote! {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct #field(pub(crate) [u64; #num_limbs]);

        impl core::fmt::Debug for #field {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                use ff::PrimeField;
                let hex: String = self
                    .to_repr()
                    .as_ref()
                    .iter()
                    .rev()
                    .map(|b| format!("{b:02x}"))
                    .collect();
                write!(f, "0x{hex}")
            }
        }

        impl subtle::ConstantTimeEq for #field {
            fn ct_eq(&self, other: &Self) -> subtle::Choice {
                let mut acc = subtle::Choice::from(1u8);
                for i in 0..#num_limbs {
                    acc &= <u64 as subtle::ConstantTimeEq>::ct_eq(&self.0[i], &other.0[i]);
                }
                acc
            }
        }

        impl subtle::ConditionallySelectable for #field {
            fn conditional_select(a: &Self, b: &Self, choice: subtle::Choice) -> Self {
                let mut out = *a;
                for i in 0..#num_limbs {
                    out.0[i] = <u64 as subtle::ConditionallySelectable>::conditional_select(
                        &a.0[i], &b.0[i], choice,
                    );
                }
                out
            }
        }

        impl core::cmp::PartialOrd for #field {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        // integer order of the canonical representatives
        impl core::cmp::Ord for #field {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                let (lhs, rhs) = (self.from_mont(), other.from_mont());
                lhs.iter().rev().cmp(rhs.iter().rev())
            }
        }

        impl<T: ::core::borrow::Borrow<#field>> ::core::iter::Sum<T> for #field {
            fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, item| acc + item.borrow())
            }
        }

        impl<T: ::core::borrow::Borrow<#field>> ::core::iter::Product<T> for #field {
            fn product<I: Iterator<Item = T>>(iter: I) -> Self {
                iter.fold(Self::one(), |acc, item| acc * item.borrow())
            }
        }

        impl crate::encoding::endian::EndianRepr for #field {
            const ENDIAN: crate::encoding::endian::Endian = crate::encoding::endian::Endian::#endian;

            fn to_bytes(&self) -> Vec<u8> {
                self.to_bytes().to_vec()
            }

            fn from_bytes(bytes: &[u8]) -> subtle::CtOption<Self> {
                match <&[u8; #field::SIZE]>::try_from(bytes) {
                    Ok(bytes) => #field::from_bytes(bytes),
                    Err(_) => subtle::CtOption::new(#field::zero(), subtle::Choice::from(0u8)),
                }
            }
        }

        impl #field {
            pub const SIZE: usize = #num_limbs * 8;
            pub const NUM_LIMBS: usize = #num_limbs;
            pub const MODULUS_LIMBS: [u64; Self::NUM_LIMBS] = [#(#modulus_limbs,)*];
            const R: Self = Self(#r1);
            const R2: Self = Self(#r2);
            const R3: Self = Self(#r3);

            #[inline(always)]
            pub const fn zero() -> #field {
                #field([0; Self::NUM_LIMBS])
            }

            #[inline(always)]
            pub const fn one() -> #field {
                Self::R
            }

            /// The element congruent to the little-endian integer `val`, which
            /// need not be reduced.
            pub const fn from_raw(val: [u64; Self::NUM_LIMBS]) -> Self {
                Self(val).mul_const(&Self::R2)
            }

            /// Decodes `SIZE` bytes in the field's byte order, rejecting
            /// non-canonical values.
            pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> subtle::CtOption<Self> {
                use crate::encoding::endian::EndianRepr;
                let mut limbs = [0u64; Self::NUM_LIMBS];
                #field::ENDIAN.from_bytes(bytes, &mut limbs);
                let canonical = subtle::Choice::from(Self::is_less_than_modulus(&limbs) as u8);
                subtle::CtOption::new(#field(limbs) * Self::R2, canonical)
            }

            /// Encodes the canonical value in the field's byte order.
            pub fn to_bytes(&self) -> [u8; Self::SIZE] {
                use crate::encoding::endian::EndianRepr;
                let mut out = [0u8; Self::SIZE];
                #field::ENDIAN.to_bytes(&mut out, &self.from_mont());
                out
            }

            #[inline(always)]
            pub(crate) fn is_less_than_modulus(limbs: &[u64; Self::NUM_LIMBS]) -> bool {
                let mut borrow = 0;
                for i in 0..Self::NUM_LIMBS {
                    borrow = crate::arithmetic::sbb(limbs[i], Self::MODULUS_LIMBS[i], borrow).1;
                }
                borrow >> 63 == 1
            }

            /// Set when the canonical value exceeds `(p - 1) / 2`, that is
            /// when it is larger than its negation.
            pub fn lexicographically_largest(&self) -> subtle::Choice {
                const HALF_MODULUS: [u64; #num_limbs] = #half_modulus;
                let limbs = self.from_mont();
                let mut borrow = 0;
                for i in 0..#num_limbs {
                    borrow = crate::arithmetic::sbb(limbs[i], HALF_MODULUS[i], borrow).1;
                }
                subtle::Choice::from((borrow >> 63) as u8 ^ 1)
            }
        }
    }
}

/// `ff::Field`, `ff::PrimeField` and friends.
fn impl_ff(config: &FieldConfig, consts: &Constants) -> TokenStream2 {
    let field = &config.field;
    let modulus = &config.modulus;
    let mul_gen = &config.mul_gen;
    let num_limbs = consts.num_limbs;
    let num_bits = consts.num_bits;
    let s = consts.two_adicity;
    let modulus_str = format!("0x{}", modulus.to_str_radix(16));

    let root_of_unity = mul_gen.modpow(&consts.odd_part, modulus);
    let root_of_unity_inv = mod_inv(&root_of_unity, modulus);
    let delta = mul_gen.modpow(&(BigUint::one() << s), modulus);
    let two_inv = mod_inv(&BigUint::from(2u64), modulus);

    let root_of_unity = consts.mont(&root_of_unity, modulus);
    let root_of_unity_inv = consts.mont(&root_of_unity_inv, modulus);
    let delta = consts.mont(&delta, modulus);
    let two_inv = consts.mont(&two_inv, modulus);
    let generator = consts.mont(mul_gen, modulus);
    let p_minus_2 = consts.limbs(&(modulus - 2u64));

    let sqrt = if modulus % 4u64 == BigUint::from(3u64) {
        // a^((p + 1) / 4)
        let exp = consts.limbs(&((modulus + 1u64) >> 2));
        quote! {
            fn sqrt(&self) -> subtle::CtOption<Self> {
                use subtle::ConstantTimeEq;
                let root = ff::Field::pow(self, #exp);
                subtle::CtOption::new(root, root.square().ct_eq(self))
            }
        }
    } else {
        let exp = consts.limbs(&((&consts.odd_part - 1u64) >> 1));
        quote! {
            fn sqrt(&self) -> subtle::CtOption<Self> {
                ff::helpers::sqrt_tonelli_shanks(self, #exp)
            }
        }
    };

    let bits = quote! {
        #[cfg(feature = "bits")]
        impl ff::PrimeFieldBits for #field {
            type ReprBits = [u64; #num_limbs];

            fn to_le_bits(&self) -> ff::FieldBits<Self::ReprBits> {
                ff::FieldBits::new(self.from_mont())
            }

            fn char_le_bits() -> ff::FieldBits<Self::ReprBits> {
                ff::FieldBits::new(Self::MODULUS_LIMBS)
            }
        }
    };

    quote! {
        impl ff::Field for #field {
            const ZERO: Self = Self::zero();
            const ONE: Self = Self::one();

            fn random(mut rng: impl rand_core::RngCore) -> Self {
                let mut wide = [0u8; Self::SIZE * 2];
                rng.fill_bytes(&mut wide);
                <#field as ff::FromUniformBytes<{ #field::SIZE * 2 }>>::from_uniform_bytes(&wide)
            }

            #[inline(always)]
            fn double(&self) -> Self {
                self.double()
            }

            #[inline(always)]
            fn square(&self) -> Self {
                self.square()
            }

            // a^(p - 2)
            fn invert(&self) -> subtle::CtOption<Self> {
                use subtle::ConstantTimeEq;
                let inverse = ff::Field::pow(self, #p_minus_2);
                subtle::CtOption::new(inverse, !self.ct_eq(&Self::zero()))
            }

            #sqrt

            fn sqrt_ratio(num: &Self, div: &Self) -> (subtle::Choice, Self) {
                ff::helpers::sqrt_ratio_generic(num, div)
            }
        }

        impl From<#field> for crate::encoding::Repr<{ #field::SIZE }> {
            fn from(value: #field) -> Self {
                ff::PrimeField::to_repr(&value)
            }
        }

        impl<'a> From<&'a #field> for crate::encoding::Repr<{ #field::SIZE }> {
            fn from(value: &'a #field) -> Self {
                ff::PrimeField::to_repr(value)
            }
        }

        impl ff::PrimeField for #field {
            const NUM_BITS: u32 = #num_bits;
            const CAPACITY: u32 = #num_bits - 1;
            const TWO_INV: Self = Self(#two_inv);
            const MULTIPLICATIVE_GENERATOR: Self = Self(#generator);
            const S: u32 = #s;
            const ROOT_OF_UNITY: Self = Self(#root_of_unity);
            const ROOT_OF_UNITY_INV: Self = Self(#root_of_unity_inv);
            const DELTA: Self = Self(#delta);
            const MODULUS: &'static str = #modulus_str;

            type Repr = crate::encoding::Repr<{ #field::SIZE }>;

            fn from_u128(v: u128) -> Self {
                let mut limbs = [0u64; #num_limbs];
                limbs[..2].copy_from_slice(&[v as u64, (v >> 64) as u64]);
                #field(limbs) * Self::R2
            }

            // always little-endian, whatever the field's byte order
            fn from_repr(repr: Self::Repr) -> subtle::CtOption<Self> {
                let mut limbs = [0u64; #num_limbs];
                crate::encoding::endian::Endian::LE.from_bytes(repr.as_ref(), &mut limbs);
                let canonical = subtle::Choice::from(Self::is_less_than_modulus(&limbs) as u8);
                subtle::CtOption::new(#field(limbs) * Self::R2, canonical)
            }

            fn to_repr(&self) -> Self::Repr {
                let mut out = [0u8; Self::SIZE];
                crate::encoding::endian::Endian::LE.to_bytes(&mut out, &self.from_mont());
                out.into()
            }

            fn is_odd(&self) -> subtle::Choice {
                subtle::Choice::from((self.from_mont()[0] & 1) as u8)
            }
        }

        #bits
    }
}

/// Reduction of `n` uniform bytes, for each accepted `n` between one and two
/// field sizes.
fn impl_from_uniform_bytes(config: &FieldConfig, consts: &Constants) -> TokenStream2 {
    let field = &config.field;
    let size = consts.num_limbs * 8;
    config
        .from_uniform
        .iter()
        .map(|&len| {
            assert!(
                (size..=2 * size).contains(&len),
                "from_uniform length {len} outside {size}..={}",
                2 * size
            );
            quote! {
                impl ff::FromUniformBytes<#len> for #field {
                    fn from_uniform_bytes(bytes: &[u8; #len]) -> Self {
                        let mut wide = [0u8; Self::SIZE * 2];
                        wide[..#len].copy_from_slice(bytes);

                        let mut limbs = [[0u64; Self::NUM_LIMBS]; 2];
                        for (limb, chunk) in limbs.iter_mut().flatten().zip(wide.chunks_exact(8)) {
                            let mut buf = [0u8; 8];
                            buf.copy_from_slice(chunk);
                            *limb = u64::from_le_bytes(buf);
                        }

                        // lo R + hi R^2, both in Montgomery form
                        let [lo, hi] = limbs;
                        #field(lo).mul_const(&Self::R2) + #field(hi).mul_const(&Self::R3)
                    }
                }
            }
        })
        .collect()
}
