// **Compressed format**
// The encoding of the x-coordinate is inherited from the base field encoding,
// which is little endian for both `Fp` and `Fp11`. The two most significant
// bits of the last byte are always unused by the base field, and hold the
// flags.
//
//     |                  | sign      | ident    | x-coordinate |
//     | Byte pos. (LE)   | BS-1                 | BS-1  ..   0 |
//     | Bit pos.         | 7         | 6        |              |
//     | ---------------- | --------- | -------- | ------------ |
//     | Identity         | 0         | 1        | 0            |
//     | Non-identity $P$ | $sgn0(y)$ | 0        | $P.x$        |
//
// `BS` is the base size: the number of bytes required to encode a coordinate.
//
// **Uncompressed format**
// Both coordinates, with every flag bit clear.
//
//     |                  | x-coordinate | y-coordinate |
//     | Byte pos. (LE)   | BS-1  ..   0 | 2*BS-1 .. BS |
//     | ---------------- | ------------ | ------------ |
//     | Identity         | 0            | 0            |
//     | Non-identity $P$ | $P.x$        | $P.y$        |
pub(crate) const SIGN_MASK: u8 = 0b1000_0000;
pub(crate) const SIGN_SHIFT: u8 = 7;
pub(crate) const IDENTITY_MASK: u8 = 0b0100_0000;
pub(crate) const IDENTITY_SHIFT: u8 = 6;

/// Short Weierstrass curve `y^2 = x^3 + a x + b` in Jacobian coordinates,
/// together with its affine form.
///
/// The base field must provide `SIZE`, inherent `to_bytes`/`from_bytes` over
/// `[u8; SIZE]` and `sgn0`. The scalar field must provide `MODULUS_LIMBS`,
/// which is the order of the subgroup generated by `$generator`.
#[macro_export]
macro_rules! new_curve_impl {
    (($($privacy:tt)*),
    $name:ident,
    $name_affine:ident,
    $base:ident,
    $scalar:ident,
    $generator:expr,
    $constant_a:expr,
    $constant_b:expr,
    $curve_id:literal,
    ) => {

        #[derive(Copy, Clone, Debug)]
        $($privacy)* struct $name {
            pub x: $base,
            pub y: $base,
            pub z: $base,
        }

        #[derive(Copy, Clone, PartialEq)]
        $($privacy)* struct $name_affine {
            pub x: $base,
            pub y: $base,
        }

        #[cfg(feature = "derive_serde")]
        impl ::serde::Serialize for $name_affine {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&GroupEncoding::to_bytes(self), serializer)
            }
        }

        #[cfg(feature = "derive_serde")]
        impl<'de> ::serde::Deserialize<'de> for $name_affine {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use ::serde::de::Error as _;
                let bytes = <<Self as GroupEncoding>::Repr as ::serde::Deserialize>::deserialize(deserializer)?;
                Option::from(<Self as GroupEncoding>::from_bytes(&bytes)).ok_or_else(|| {
                    D::Error::custom("deserialized bytes don't encode a valid point")
                })
            }
        }

        #[cfg(feature = "derive_serde")]
        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&self.to_affine(), serializer)
            }
        }

        #[cfg(feature = "derive_serde")]
        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <$name_affine as ::serde::Deserialize>::deserialize(deserializer).map(Self::from)
            }
        }

        impl $name {
            pub fn generator() -> Self {
                let generator = $name_affine::generator();
                Self {
                    x: generator.x,
                    y: generator.y,
                    z: $base::one(),
                }
            }

            /// `2 * self` given the tangent numerator `m = 3 X^2 + a Z^4` and
            /// the squares `Y^2`, `Z^2`, which line function callers share.
            #[inline]
            pub(crate) fn dbl_with(&self, m: &$base, yy: &$base, zz: &$base) -> Self {
                let s = (self.x * yy).double().double();
                let x3 = m.square() - s.double();
                let yyyy = yy.square().double().double().double();
                let y3 = *m * (s - x3) - yyyy;
                let z3 = (self.y + self.z).square() - yy - zz;
                $name { x: x3, y: y3, z: z3 }
            }

            /// Affine form, keeping the Jacobian type: `(X / Z^2, Y / Z^3, 1)`.
            pub fn normalize(&self) -> Self {
                let z_inv = self.z.invert().unwrap_or($base::zero());
                self.normalize_with_inverse(&z_inv)
            }

            /// Same as [`Self::normalize`] for a caller that already holds
            /// `1 / Z`.
            pub fn normalize_with_inverse(&self, z_inv: &$base) -> Self {
                self.to_affine_with_inverse(z_inv).to_curve()
            }

            fn to_affine_with_inverse(&self, z_inv: &$base) -> $name_affine {
                let z_inv2 = z_inv.square();
                let p = $name_affine {
                    x: self.x * z_inv2,
                    y: self.y * z_inv2 * z_inv,
                };
                $name_affine::conditional_select(&p, &$name_affine::identity(), self.is_identity())
            }

            /// Same point with coordinates `(l^2 X, l^3 Y, l Z)` for a random
            /// nonzero `l`.
            pub fn blind(&self, mut rng: impl RngCore) -> Self {
                let l = loop {
                    let l = $base::random(&mut rng);
                    if !bool::from(l.is_zero()) {
                        break l;
                    }
                };
                let l2 = l.square();
                $name {
                    x: self.x * l2,
                    y: self.y * l2 * l,
                    z: self.z * l,
                }
            }

            /// Variable time multiplication by a little endian multi-limb
            /// integer, processed in non-adjacent form.
            pub fn mul_naf(&self, k: &[u64]) -> Self {
                let digits = $crate::arithmetic::naf(k);
                let neg = -self;
                let mut acc = $name::identity();
                for digit in digits.iter().rev() {
                    acc = acc.double();
                    match *digit {
                        1 => acc += self,
                        -1 => acc += neg,
                        _ => {}
                    }
                }
                acc
            }

            /// Variable time multiplication by a small integer.
            pub fn mul_small(&self, k: u64) -> Self {
                self.mul_naf(&[k])
            }

            /// Whether the point lies in the subgroup of order `$scalar`.
            pub fn is_torsion_free(&self) -> Choice {
                self.mul_naf(&$scalar::MODULUS_LIMBS).is_identity()
            }
        }

        impl $name_affine {
            pub fn generator() -> Self {
                Self {
                    x: $generator.0,
                    y: $generator.1,
                }
            }

            /// Right hand side of the curve equation, `x^3 + a x + b`.
            #[inline(always)]
            pub fn rhs(x: &$base) -> $base {
                (x.square() + $constant_a) * x + $constant_b
            }

            pub fn random(rng: impl RngCore) -> Self {
                $name::random(rng).to_affine()
            }

            pub fn is_torsion_free(&self) -> Choice {
                self.to_curve().is_torsion_free()
            }

            /// Decodes a compressed point from a byte slice of exactly the
            /// encoded length, rejecting points outside the prime order
            /// subgroup.
            pub fn from_slice(bytes: &[u8]) -> $crate::Result<Self> {
                let invalid = $crate::Error::InvalidEncoding($curve_id);
                if bytes.len() != $base::SIZE {
                    return Err(invalid);
                }
                let repr = $crate::encoding::Repr::from(bytes);
                Option::<Self>::from(<Self as group::GroupEncoding>::from_bytes(&repr)).ok_or(invalid)
            }
        }

        impl group::GroupEncoding for $name {
            type Repr = $crate::encoding::Repr<{ $base::SIZE }>;

            fn from_bytes(bytes: &Self::Repr) -> CtOption<Self> {
                $name_affine::from_bytes(bytes).map(Self::from)
            }

            fn from_bytes_unchecked(bytes: &Self::Repr) -> CtOption<Self> {
                $name_affine::from_bytes_unchecked(bytes).map(Self::from)
            }

            fn to_bytes(&self) -> Self::Repr {
                $name_affine::from(self).to_bytes()
            }
        }

        impl group::GroupEncoding for $name_affine {
            type Repr = $crate::encoding::Repr<{ $base::SIZE }>;

            fn from_bytes(bytes: &Self::Repr) -> CtOption<Self> {
                Self::from_bytes_unchecked(bytes).and_then(|p| CtOption::new(p, p.is_torsion_free()))
            }

            /// Decodes a point on the curve, skipping the subgroup check.
            fn from_bytes_unchecked(bytes: &Self::Repr) -> CtOption<Self> {
                use $crate::derive::curve::{IDENTITY_MASK, IDENTITY_SHIFT, SIGN_MASK, SIGN_SHIFT};

                let mut tmp = **bytes;
                let flag_byte = tmp[$base::SIZE - 1];
                let identity_flag = Choice::from((flag_byte & IDENTITY_MASK) >> IDENTITY_SHIFT);
                let sign_flag = Choice::from((flag_byte & SIGN_MASK) >> SIGN_SHIFT);
                tmp[$base::SIZE - 1] &= !(SIGN_MASK | IDENTITY_MASK);

                $base::from_bytes(&tmp).and_then(|x| {
                    let y = $name_affine::rhs(&x).sqrt();
                    let has_y = y.is_some();
                    let y = y.unwrap_or($base::zero());
                    let y = $base::conditional_select(&y, &-y, y.sgn0() ^ sign_flag);

                    // The identity carries no sign and a zero x-coordinate.
                    // A point with y = 0 cannot have its sign flag set.
                    let is_valid = (identity_flag & !sign_flag & x.is_zero())
                        | (!identity_flag & has_y & !(sign_flag & y.is_zero()));

                    let p = $name_affine::conditional_select(
                        &$name_affine { x, y },
                        &$name_affine::identity(),
                        identity_flag,
                    );
                    CtOption::new(p, is_valid)
                })
            }

            fn to_bytes(&self) -> Self::Repr {
                use $crate::derive::curve::{IDENTITY_MASK, SIGN_MASK};

                let x = $base::conditional_select(&self.x, &$base::zero(), self.is_identity());
                let mut res = x.to_bytes();
                res[$base::SIZE - 1] |= u8::conditional_select(&0u8, &IDENTITY_MASK, self.is_identity());
                res[$base::SIZE - 1] |=
                    u8::conditional_select(&0u8, &SIGN_MASK, !self.is_identity() & self.y.sgn0());
                res.into()
            }
        }

        impl group::UncompressedEncoding for $name_affine {
            type Uncompressed = $crate::encoding::Repr<{ 2 * $base::SIZE }>;

            fn from_uncompressed(bytes: &Self::Uncompressed) -> CtOption<Self> {
                Self::from_uncompressed_unchecked(bytes)
                    .and_then(|p| CtOption::new(p, p.is_on_curve() & p.is_torsion_free()))
            }

            /// Decodes `x || y`, checking neither the curve equation nor the
            /// subgroup.
            fn from_uncompressed_unchecked(bytes: &Self::Uncompressed) -> CtOption<Self> {
                use $crate::derive::curve::{IDENTITY_MASK, SIGN_MASK};

                // The flag bits of both coordinates must be clear.
                let bytes = bytes.inner();
                let flags = (bytes[$base::SIZE - 1] | bytes[2 * $base::SIZE - 1])
                    & (SIGN_MASK | IDENTITY_MASK);

                let mut repr = [0u8; $base::SIZE];
                repr.copy_from_slice(&bytes[..$base::SIZE]);
                let x = $base::from_bytes(&repr);
                repr.copy_from_slice(&bytes[$base::SIZE..]);
                let y = $base::from_bytes(&repr);

                x.and_then(|x| {
                    y.and_then(|y| CtOption::new($name_affine { x, y }, flags.ct_eq(&0u8)))
                })
            }

            /// `x || y`, all zero for the identity.
            fn to_uncompressed(&self) -> Self::Uncompressed {
                let mut res = [0u8; 2 * $base::SIZE];
                res[..$base::SIZE].copy_from_slice(&self.x.to_bytes());
                res[$base::SIZE..].copy_from_slice(&self.y.to_bytes());
                res.into()
            }
        }

        // Jacobian implementations

        impl<'a> From<&'a $name_affine> for $name {
            fn from(p: &'a $name_affine) -> $name {
                p.to_curve()
            }
        }

        impl From<$name_affine> for $name {
            fn from(p: $name_affine) -> $name {
                p.to_curve()
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name::identity()
            }
        }

        impl subtle::ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> Choice {
                // (X / Z^2, Y / Z^3) == (X' / Z'^2, Y' / Z'^3)
                // <=> X Z'^2 == X' Z^2 and Y Z'^3 == Y' Z^3
                let z1z1 = self.z.square();
                let z2z2 = other.z.square();

                let x1 = self.x * z2z2;
                let x2 = other.x * z1z1;
                let y1 = self.y * z2z2 * other.z;
                let y2 = other.y * z1z1 * self.z;

                let self_is_zero = self.is_identity();
                let other_is_zero = other.is_identity();

                (self_is_zero & other_is_zero)
                    | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
            }
        }

        impl subtle::ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                $name {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                    z: $base::conditional_select(&a.z, &b.z, choice),
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.ct_eq(other).into()
            }
        }

        impl Eq for $name {}

        impl CurveExt for $name {
            type ScalarExt = $scalar;
            type Base = $base;
            type AffineExt = $name_affine;

            const CURVE_ID: &'static str = $curve_id;

            fn jacobian_coordinates(&self) -> ($base, $base, $base) {
                (self.x, self.y, self.z)
            }

            fn is_on_curve(&self) -> Choice {
                // Y^2 = X^3 + a X Z^4 + b Z^6
                let z2 = self.z.square();
                let z4 = z2.square();
                let z6 = z4 * z2;
                (self.y.square() - (self.x.square() + $constant_a * z4) * self.x)
                    .ct_eq(&(z6 * $constant_b))
                    | self.z.is_zero()
            }

            fn b() -> Self::Base {
                $constant_b
            }

            fn a() -> Self::Base {
                $constant_a
            }

            fn new_jacobian(x: Self::Base, y: Self::Base, z: Self::Base) -> CtOption<Self> {
                let p = $name { x, y, z };
                let p = $name::conditional_select(&p, &$name::identity(), z.is_zero());
                CtOption::new(p, p.is_on_curve())
            }
        }

        impl group::Curve for $name {
            type AffineRepr = $name_affine;

            fn batch_normalize(p: &[Self], q: &mut [Self::AffineRepr]) {
                assert_eq!(p.len(), q.len());

                // identities take part with z = 1
                let zs: Vec<$base> = p
                    .iter()
                    .map(|p| $base::conditional_select(&p.z, &$base::one(), p.is_identity()))
                    .collect();
                let mut prefix = Vec::with_capacity(zs.len());
                let product = zs.iter().fold($base::one(), |acc, z| {
                    prefix.push(acc);
                    acc * z
                });

                let mut inv = product.invert().unwrap_or($base::zero());
                for ((p, q), (z, before)) in p.iter().zip(q.iter_mut()).zip(zs.iter().zip(prefix)).rev() {
                    *q = p.to_affine_with_inverse(&(before * inv));
                    inv *= z;
                }
            }

            fn to_affine(&self) -> Self::AffineRepr {
                self.to_affine_with_inverse(&self.z.invert().unwrap_or($base::zero()))
            }
        }

        impl group::Group for $name {
            type Scalar = $scalar;

            fn random(mut rng: impl RngCore) -> Self {
                $name::generator() * $scalar::random(&mut rng)
            }

            fn double(&self) -> Self {
                // dbl-2007-bl
                let xx = self.x.square();
                let yy = self.y.square();
                let zz = self.z.square();
                let m = xx.double() + xx + $constant_a * zz.square();
                let tmp = self.dbl_with(&m, &yy, &zz);

                $name::conditional_select(&tmp, &$name::identity(), self.is_identity() | self.y.is_zero())
            }

            fn generator() -> Self {
                $name::generator()
            }

            fn identity() -> Self {
                Self {
                    x: $base::zero(),
                    y: $base::one(),
                    z: $base::zero(),
                }
            }

            fn is_identity(&self) -> Choice {
                self.z.is_zero()
            }
        }

        impl group::prime::PrimeGroup for $name {}

        impl group::prime::PrimeCurve for $name {
            type Affine = $name_affine;
        }

        // Affine implementations

        impl std::fmt::Debug for $name_affine {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
                if self.is_identity().into() {
                    write!(f, "Infinity")
                } else {
                    write!(f, "({:?}, {:?})", self.x, self.y)
                }
            }
        }

        impl<'a> From<&'a $name> for $name_affine {
            fn from(p: &'a $name) -> $name_affine {
                p.to_affine()
            }
        }

        impl From<$name> for $name_affine {
            fn from(p: $name) -> $name_affine {
                p.to_affine()
            }
        }

        impl Default for $name_affine {
            fn default() -> $name_affine {
                $name_affine::identity()
            }
        }

        impl subtle::ConstantTimeEq for $name_affine {
            fn ct_eq(&self, other: &Self) -> Choice {
                let z1 = self.is_identity();
                let z2 = other.is_identity();

                (z1 & z2) | ((!z1) & (!z2) & (self.x.ct_eq(&other.x)) & (self.y.ct_eq(&other.y)))
            }
        }

        impl subtle::ConditionallySelectable for $name_affine {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                $name_affine {
                    x: $base::conditional_select(&a.x, &b.x, choice),
                    y: $base::conditional_select(&a.y, &b.y, choice),
                }
            }
        }

        impl Eq for $name_affine {}

        impl group::prime::PrimeCurveAffine for $name_affine {
            type Curve = $name;
            type Scalar = $scalar;

            fn generator() -> Self {
                $name_affine::generator()
            }

            fn identity() -> Self {
                Self {
                    x: $base::zero(),
                    y: $base::zero(),
                }
            }

            fn is_identity(&self) -> Choice {
                self.x.is_zero() & self.y.is_zero()
            }

            fn to_curve(&self) -> Self::Curve {
                let tmp = $name {
                    x: self.x,
                    y: self.y,
                    z: $base::one(),
                };
                $name::conditional_select(&tmp, &$name::identity(), self.is_identity())
            }
        }

        impl CurveAffine for $name_affine {
            type ScalarExt = $scalar;
            type Base = $base;
            type CurveExt = $name;

            fn is_on_curve(&self) -> Choice {
                // y^2 - x^3 - ax ?= b
                (self.y.square() - (self.x.square() + $constant_a) * self.x).ct_eq(&$constant_b)
                    | self.is_identity()
            }

            fn coordinates(&self) -> CtOption<Coordinates<Self>> {
                Coordinates::from_xy(self.x, self.y).and_then(|c| CtOption::new(c, !self.is_identity()))
            }

            fn from_xy(x: Self::Base, y: Self::Base) -> CtOption<Self> {
                let p = $name_affine { x, y };
                CtOption::new(p, p.is_on_curve())
            }

            fn a() -> Self::Base {
                $constant_a
            }

            fn b() -> Self::Base {
                $constant_b
            }
        }

        $crate::impl_binops_additive!($name, $name);
        $crate::impl_binops_additive!($name, $name_affine);
        $crate::impl_binops_additive_specify_output!($name_affine, $name_affine, $name);
        $crate::impl_binops_additive_specify_output!($name_affine, $name, $name);
        $crate::impl_binops_multiplicative!($name, $scalar);
        $crate::impl_binops_multiplicative_mixed!($name_affine, $scalar, $name);

        impl<'a> Neg for &'a $name {
            type Output = $name;

            fn neg(self) -> $name {
                $name {
                    x: self.x,
                    y: -self.y,
                    z: self.z,
                }
            }
        }

        impl Neg for $name {
            type Output = $name;

            fn neg(self) -> $name {
                -&self
            }
        }

        impl<T> Sum<T> for $name
        where
            T: core::borrow::Borrow<$name>,
        {
            fn sum<I>(iter: I) -> Self
            where
                I: Iterator<Item = T>,
            {
                iter.fold(Self::identity(), |acc, item| acc + item.borrow())
            }
        }

        impl<'a, 'b> Add<&'a $name> for &'b $name {
            type Output = $name;

            fn add(self, rhs: &'a $name) -> $name {
                // add-2007-bl
                let z1z1 = self.z.square();
                let z2z2 = rhs.z.square();
                let u1 = self.x * z2z2;
                let u2 = rhs.x * z1z1;
                let s1 = self.y * rhs.z * z2z2;
                let s2 = rhs.y * self.z * z1z1;
                let h = u2 - u1;
                let i = h.double().square();
                let j = h * i;
                let r = (s2 - s1).double();
                let v = u1 * i;
                let x3 = r.square() - j - v.double();
                let y3 = r * (v - x3) - (s1 * j).double();
                let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;

                let tmp = $name { x: x3, y: y3, z: z3 };

                // h = 0 means the inputs share x, either equal or opposite.
                let same_x = h.is_zero();
                let tmp = $name::conditional_select(&tmp, &self.double(), same_x & r.is_zero());
                let tmp = $name::conditional_select(&tmp, &$name::identity(), same_x & !r.is_zero());
                let tmp = $name::conditional_select(&tmp, rhs, self.is_identity());
                $name::conditional_select(&tmp, self, rhs.is_identity())
            }
        }

        impl<'a, 'b> Add<&'a $name_affine> for &'b $name {
            type Output = $name;

            fn add(self, rhs: &'a $name_affine) -> $name {
                // madd-2007-bl
                let z1z1 = self.z.square();
                let u2 = rhs.x * z1z1;
                let s2 = rhs.y * self.z * z1z1;
                let h = u2 - self.x;
                let hh = h.square();
                let i = hh.double().double();
                let j = h * i;
                let r = (s2 - self.y).double();
                let v = self.x * i;
                let x3 = r.square() - j - v.double();
                let y3 = r * (v - x3) - (self.y * j).double();
                let z3 = (self.z + h).square() - z1z1 - hh;

                let tmp = $name { x: x3, y: y3, z: z3 };

                let same_x = h.is_zero();
                let tmp = $name::conditional_select(&tmp, &self.double(), same_x & r.is_zero());
                let tmp = $name::conditional_select(&tmp, &$name::identity(), same_x & !r.is_zero());
                let tmp = $name::conditional_select(&tmp, &rhs.to_curve(), self.is_identity());
                $name::conditional_select(&tmp, self, rhs.is_identity())
            }
        }

        impl<'a, 'b> Sub<&'a $name> for &'b $name {
            type Output = $name;

            fn sub(self, other: &'a $name) -> $name {
                self + (-other)
            }
        }

        impl<'a, 'b> Sub<&'a $name_affine> for &'b $name {
            type Output = $name;

            fn sub(self, other: &'a $name_affine) -> $name {
                self + (-other)
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<'a, 'b> Mul<&'b $scalar> for &'a $name {
            type Output = $name;

            // constant time double and add, most significant bit first
            fn mul(self, other: &'b $scalar) -> Self::Output {
                let mut acc = $name::identity();
                for byte in other.to_repr().as_ref().iter().rev() {
                    for i in (0..8).rev() {
                        acc = acc.double();
                        let sum = acc + self;
                        acc.conditional_assign(&sum, Choice::from((byte >> i) & 1));
                    }
                }
                acc
            }
        }

        impl<'a> Neg for &'a $name_affine {
            type Output = $name_affine;

            fn neg(self) -> $name_affine {
                $name_affine {
                    x: self.x,
                    y: -self.y,
                }
            }
        }

        impl Neg for $name_affine {
            type Output = $name_affine;

            fn neg(self) -> $name_affine {
                -&self
            }
        }

        impl<'a, 'b> Add<&'a $name> for &'b $name_affine {
            type Output = $name;

            fn add(self, rhs: &'a $name) -> $name {
                rhs + self
            }
        }

        impl<'a, 'b> Add<&'a $name_affine> for &'b $name_affine {
            type Output = $name;

            fn add(self, rhs: &'a $name_affine) -> $name {
                self.to_curve() + rhs
            }
        }

        impl<'a, 'b> Sub<&'a $name_affine> for &'b $name_affine {
            type Output = $name;

            fn sub(self, other: &'a $name_affine) -> $name {
                self + (-other)
            }
        }

        impl<'a, 'b> Sub<&'a $name> for &'b $name_affine {
            type Output = $name;

            fn sub(self, other: &'a $name) -> $name {
                self + (-other)
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<'a, 'b> Mul<&'b $scalar> for &'a $name_affine {
            type Output = $name;

            fn mul(self, other: &'b $scalar) -> Self::Output {
                self.to_curve() * other
            }
        }
    };
}
