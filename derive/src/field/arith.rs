//! Unrolled limb arithmetic for the generated prime fields.
//!
//! Every routine is emitted as straight-line `const` code over the
//! `adc`/`sbb`/`mac` helpers of the host crate, with one named local per
//! limb.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

/// What the schoolbook product is turned into.
#[derive(Clone, Copy)]
enum Reduction {
    Montgomery,
    /// Through `montgomery_reduce_const`, usable from constant initializers.
    MontgomeryConst,
    /// Left double width, for callers that accumulate before reducing.
    Wide,
}

fn pick(cond: bool, yes: TokenStream, no: TokenStream) -> TokenStream {
    if cond {
        yes
    } else {
        no
    }
}

fn locals(prefix: &str, count: usize) -> Vec<Ident> {
    (0..count).map(|i| format_ident!("{}_{}", prefix, i)).collect()
}

/// Incoming link of position `i` in a carry chain.
fn link_in(i: usize, link: &str) -> TokenStream {
    let link = format_ident!("{}", link);
    pick(i == 0, quote!(0), quote!(#link))
}

/// Outgoing link of position `i` in a chain of `len`, discarded at the top.
fn link_out(i: usize, len: usize, link: &str) -> TokenStream {
    let link = format_ident!("{}", link);
    pick(i + 1 == len, quote!(_), quote!(#link))
}

/// `d = src - p`, leaving `borrow` all ones iff `top:src < p`.
fn sub_modulus(d: &[Ident], src: &[TokenStream], top: TokenStream) -> TokenStream {
    let steps: Vec<_> = d
        .iter()
        .zip(src)
        .enumerate()
        .map(|(i, (d_i, s_i))| {
            let borrow = link_in(i, "borrow");
            quote! { let (#d_i, borrow) = sbb(#s_i, Self::MODULUS_LIMBS[#i], #borrow); }
        })
        .collect();
    quote! {
        #(#steps)*
        let (_, borrow) = sbb(#top, 0, borrow);
    }
}

/// `d += p & borrow`.
fn add_masked_modulus(d: &[Ident]) -> TokenStream {
    let steps: Vec<_> = d
        .iter()
        .enumerate()
        .map(|(i, d_i)| {
            let carry_in = link_in(i, "carry");
            let carry_out = link_out(i, d.len(), "carry");
            quote! { let (#d_i, #carry_out) = adc(#d_i, Self::MODULUS_LIMBS[#i] & borrow, #carry_in); }
        })
        .collect();
    quote! { #(#steps)* }
}

pub(crate) fn impl_arith(field: &syn::Ident, num_limbs: usize, inv: u64) -> TokenStream {
    let wide = num_limbs * 2;
    let add = impl_add(field, num_limbs);
    let sub = impl_sub(field, num_limbs);
    let neg = impl_neg(field, num_limbs);
    let mul = impl_mul(field, num_limbs, Reduction::Montgomery);
    let mul_wide = impl_mul(field, num_limbs, Reduction::Wide);
    let square = impl_square(field, num_limbs);
    let reduce = impl_montgomery_reduce(field, num_limbs, inv);
    let from_mont = impl_from_mont(field, num_limbs, inv);

    quote! {
        impl #field {
            #[inline(always)]
            pub const fn add(&self, rhs: &Self) -> Self {
                #add
            }

            #[inline]
            pub const fn double(&self) -> Self {
                self.add(self)
            }

            #[inline(always)]
            pub const fn sub(&self, rhs: &Self) -> Self {
                #sub
            }

            #[inline(always)]
            pub const fn neg(&self) -> Self {
                #neg
            }

            #[inline(always)]
            pub const fn mul(&self, rhs: &Self) -> Self {
                #mul
            }

            /// Full `2 * NUM_LIMBS` product of the Montgomery representations,
            /// to be brought back with [`Self::montgomery_reduce`].
            #[inline(always)]
            pub const fn mul_wide(&self, rhs: &Self) -> [u64; #wide] {
                #mul_wide
            }

            #[inline(always)]
            pub const fn square(&self) -> Self {
                #square
            }

            /// Montgomery reduction of a double-width value below `p * 2^(64 * NUM_LIMBS)`.
            #[inline(always)]
            pub const fn montgomery_reduce(r: &[u64; #wide]) -> Self {
                #reduce
            }

            #[inline(always)]
            pub(crate) const fn from_mont(&self) -> [u64; #num_limbs] {
                #from_mont
            }
        }
    }
}

/// Copies of `sub`, `mul` and the reduction that constant initializers such
/// as the derived Montgomery constants call.
pub(crate) fn impl_arith_always_const(
    field: &syn::Ident,
    num_limbs: usize,
    inv: u64,
) -> TokenStream {
    let wide = num_limbs * 2;
    let sub = impl_sub(field, num_limbs);
    let mul = impl_mul(field, num_limbs, Reduction::MontgomeryConst);
    let reduce = impl_montgomery_reduce(field, num_limbs, inv);

    quote! {
        impl #field {
            #[inline(always)]
            pub(crate) const fn sub_const(&self, rhs: &Self) -> Self {
                #sub
            }

            #[inline(always)]
            pub(crate) const fn mul_const(&self, rhs: &Self) -> Self {
                #mul
            }

            #[inline(always)]
            pub(crate) const fn montgomery_reduce_const(r: &[u64; #wide]) -> Self {
                #reduce
            }
        }
    }
}

fn impl_add(field: &syn::Ident, n: usize) -> TokenStream {
    let d = locals("d", n);
    let sum: Vec<_> = d
        .iter()
        .enumerate()
        .map(|(i, d_i)| {
            let carry = link_in(i, "carry");
            quote! { let (#d_i, carry) = adc(self.0[#i], rhs.0[#i], #carry); }
        })
        .collect();
    let src: Vec<_> = d.iter().map(|d_i| quote!(#d_i)).collect();
    let reduce = sub_modulus(&d, &src, quote!(carry));
    let restore = add_masked_modulus(&d);

    quote! {
        use crate::arithmetic::{adc, sbb};
        #(#sum)*
        #reduce
        #restore
        #field([#(#d),*])
    }
}

fn impl_sub(field: &syn::Ident, n: usize) -> TokenStream {
    let d = locals("d", n);
    let diff: Vec<_> = d
        .iter()
        .enumerate()
        .map(|(i, d_i)| {
            let borrow = link_in(i, "borrow");
            quote! { let (#d_i, borrow) = sbb(self.0[#i], rhs.0[#i], #borrow); }
        })
        .collect();
    let restore = add_masked_modulus(&d);

    quote! {
        use crate::arithmetic::{adc, sbb};
        #(#diff)*
        #restore
        #field([#(#d),*])
    }
}

fn impl_neg(field: &syn::Ident, n: usize) -> TokenStream {
    let d = locals("d", n);
    let diff: Vec<_> = d
        .iter()
        .enumerate()
        .map(|(i, d_i)| {
            let borrow_in = link_in(i, "borrow");
            let borrow_out = link_out(i, n, "borrow");
            quote! { let (#d_i, #borrow_out) = sbb(Self::MODULUS_LIMBS[#i], self.0[#i], #borrow_in); }
        })
        .collect();
    let limbs: Vec<_> = (0..n).map(|i| quote!(self.0[#i])).collect();

    // zero maps to zero rather than p
    quote! {
        use crate::arithmetic::sbb;
        #(#diff)*
        let mask = (((#(#limbs)|*) == 0) as u64).wrapping_sub(1);
        #field([#(#d & mask),*])
    }
}

fn impl_mul(field: &syn::Ident, n: usize, reduction: Reduction) -> TokenStream {
    let r = locals("r", 2 * n);
    let mut rows = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let (lo, hi) = (&r[i + j], &r[i + j + 1]);
            let acc = pick(i == 0, quote!(0), quote!(#lo));
            let carry_in = link_in(j, "carry");
            let carry_out = pick(j + 1 == n, quote!(#hi), quote!(carry));
            rows.push(quote! { let (#lo, #carry_out) = mac(#acc, self.0[#i], rhs.0[#j], #carry_in); });
        }
    }

    let out = match reduction {
        Reduction::Montgomery => quote! { #field::montgomery_reduce(&[#(#r),*]) },
        Reduction::MontgomeryConst => quote! { #field::montgomery_reduce_const(&[#(#r),*]) },
        Reduction::Wide => quote! { [#(#r),*] },
    };
    quote! {
        use crate::arithmetic::mac;
        #(#rows)*
        #out
    }
}

fn impl_square(field: &syn::Ident, n: usize) -> TokenStream {
    let r = locals("r", 2 * n);
    let mut rows = Vec::new();

    // cross products a_i a_j for i < j
    for i in 0..n - 1 {
        let len = n - i - 1;
        for k in 0..len {
            let j = i + k + 1;
            let (lo, hi) = (&r[i + j], &r[i + j + 1]);
            let acc = pick(i == 0, quote!(0), quote!(#lo));
            let carry_in = link_in(k, "carry");
            let carry_out = pick(k + 1 == len, quote!(#hi), quote!(carry));
            rows.push(quote! { let (#lo, #carry_out) = mac(#acc, self.0[#i], self.0[#j], #carry_in); });
        }
    }

    // doubled, one bit up
    for i in (1..2 * n).rev() {
        let (cur, below) = (&r[i], &r[i - 1]);
        rows.push(if i == 2 * n - 1 {
            quote! { let #cur = #below >> 63; }
        } else if i == 1 {
            quote! { let #cur = #cur << 1; }
        } else {
            quote! { let #cur = (#cur << 1) | (#below >> 63); }
        });
    }

    // squares on the diagonal
    for i in 0..n {
        let (lo, hi) = (&r[2 * i], &r[2 * i + 1]);
        let acc = pick(i == 0, quote!(0), quote!(#lo));
        let carry_in = link_in(i, "carry");
        let carry_out = link_out(i, n, "carry");
        rows.push(quote! {
            let (#lo, carry) = mac(#acc, self.0[#i], self.0[#i], #carry_in);
            let (#hi, #carry_out) = adc(0, #hi, carry);
        });
    }

    quote! {
        use crate::arithmetic::{adc, mac};
        #(#rows)*
        #field::montgomery_reduce(&[#(#r),*])
    }
}

fn impl_montgomery_reduce(field: &syn::Ident, n: usize, inv: u64) -> TokenStream {
    let r = locals("r", 2 * n);
    let mut rows = Vec::new();
    for i in 0..n {
        // the first row reads straight from the input
        let read = |m: usize| {
            let r_m = &r[m];
            pick(i == 0, quote!(r[#m]), quote!(#r_m))
        };
        let low = read(i);
        rows.push(quote! { let k = #low.wrapping_mul(#inv); });
        for j in 0..n {
            let m = i + j;
            let src = read(m);
            let r_m = &r[m];
            let dst = pick(j == 0, quote!(_), quote!(#r_m));
            let carry = link_in(j, "carry");
            rows.push(quote! { let (#dst, carry) = mac(#src, k, Self::MODULUS_LIMBS[#j], #carry); });
        }
        let top = n + i;
        let r_top = &r[top];
        let carry2 = link_in(i, "carry2");
        rows.push(quote! { let (#r_top, carry2) = adc(r[#top], #carry2, carry); });
    }

    let d = locals("d", n);
    let src: Vec<_> = r[n..].iter().map(|r_i| quote!(#r_i)).collect();
    let reduce = sub_modulus(&d, &src, quote!(carry2));
    let restore = add_masked_modulus(&d);

    quote! {
        use crate::arithmetic::{adc, sbb, mac};
        #(#rows)*
        #reduce
        #restore
        #field([#(#d),*])
    }
}

/// Montgomery reduction of `self` with an implicit zero upper half, giving
/// the canonical limbs.
fn impl_from_mont(field: &syn::Ident, n: usize, inv: u64) -> TokenStream {
    let r = locals("r", n);
    let mut rows = Vec::new();
    for (i, r_i) in r.iter().enumerate() {
        let low = pick(i == 0, quote!(self.0[0]), quote!(#r_i));
        rows.push(quote! { let k = #low.wrapping_mul(#inv); });
        for j in 0..n {
            let r_m = &r[(i + j) % n];
            let dst = pick(j == 0, quote!(_), quote!(#r_m));
            let src = pick(i == 0, quote!(self.0[#j]), quote!(#r_m));
            let carry = pick(j == 0, quote!(0), quote!(#r_i));
            rows.push(quote! { let (#dst, #r_i) = mac(#src, k, Self::MODULUS_LIMBS[#j], #carry); });
        }
    }

    quote! {
        use crate::arithmetic::mac;
        #(#rows)*
        #field([#(#r),*]).sub(&#field(Self::MODULUS_LIMBS)).0
    }
}
