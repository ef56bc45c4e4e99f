/// Declares a pairing engine over a per-pair Miller loop.
///
/// `$miller_loop` has the signature
/// `fn(&CurveParameters, &$g1affine, &$g2affine) -> $base`; the multi Miller
/// loop is the product of its outputs. Appending `pairing_curve_affine` also
/// routes [`pairing::PairingCurveAffine`] of both affine types through this
/// engine, which a curve can only do once.
#[macro_export]
macro_rules! impl_miller_loop_components {
    (
    $engine:ident,
    $g1:ident,
    $g1affine:ident,
    $g2:ident,
    $g2affine:ident,
    $base:ident,
    $target:ident,
    $scalar:ident,
    $miller_loop:path
    ) => {
        #[derive(Clone, Debug)]
        pub struct $engine;

        impl Engine for $engine {
            type Fr = $scalar;
            type G1 = $g1;
            type G1Affine = $g1affine;
            type G2 = $g2;
            type G2Affine = $g2affine;
            type Gt = $target;

            fn pairing(p: &Self::G1Affine, q: &Self::G2Affine) -> Self::Gt {
                $engine::multi_miller_loop(&[(p, q)]).final_exponentiation()
            }
        }

        impl MultiMillerLoop for $engine {
            type G2Prepared = $g2affine;
            type Result = $base;

            fn multi_miller_loop(terms: &[(&Self::G1Affine, &Self::G2Prepared)]) -> Self::Result {
                let params = CurveParameters::get();
                terms
                    .iter()
                    .fold($base::one(), |acc, (p, q)| acc * $miller_loop(params, p, q))
            }
        }
    };
    (
    $engine:ident,
    $g1:ident,
    $g1affine:ident,
    $g2:ident,
    $g2affine:ident,
    $base:ident,
    $target:ident,
    $scalar:ident,
    $miller_loop:path,
    pairing_curve_affine
    ) => {
        $crate::impl_miller_loop_components!(
            $engine,
            $g1,
            $g1affine,
            $g2,
            $g2affine,
            $base,
            $target,
            $scalar,
            $miller_loop
        );

        impl PairingCurveAffine for $g1affine {
            type Pair = $g2affine;
            type PairingResult = $target;

            fn pairing_with(&self, other: &Self::Pair) -> Self::PairingResult {
                $engine::pairing(&self, &other)
            }
        }

        impl PairingCurveAffine for $g2affine {
            type Pair = $g1affine;
            type PairingResult = $target;

            fn pairing_with(&self, other: &Self::Pair) -> Self::PairingResult {
                $engine::pairing(&other, &self)
            }
        }
    };
}

/// The target group: the order `r` subgroup of `$base^*`, written additively.
///
/// `$generator` is an expression evaluating to the pairing of the two
/// curve generators.
#[macro_export]
macro_rules! impl_gt {
    (
        $target:ident,
        $base:ident,
        $scalar:ident,
        $generator:expr
    ) => {
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $target(pub(crate) $base);

        impl std::fmt::Display for $target {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{self:?}")
            }
        }

        impl ConstantTimeEq for $target {
            fn ct_eq(&self, other: &Self) -> Choice {
                self.0.ct_eq(&other.0)
            }
        }

        impl ConditionallySelectable for $target {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                $target($base::conditional_select(&a.0, &b.0, choice))
            }
        }

        impl PartialEq for $target {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl Eq for $target {}

        impl $target {
            /// Returns the group identity, which is $1$.
            pub fn identity() -> $target {
                $target($base::one())
            }

            /// Doubles this group element.
            pub fn double(&self) -> $target {
                use ff::Field;
                $target(self.0.square())
            }

            /// The underlying element of the target field.
            pub fn inner(&self) -> &$base {
                &self.0
            }
        }

        // inverse of a unitary element
        impl<'a> Neg for &'a $target {
            type Output = $target;

            #[inline]
            fn neg(self) -> $target {
                $target(self.0.conjugated())
            }
        }

        impl Neg for $target {
            type Output = $target;

            #[inline]
            fn neg(self) -> $target {
                -&self
            }
        }

        impl<'a, 'b> Add<&'b $target> for &'a $target {
            type Output = $target;

            #[inline]
            #[allow(clippy::suspicious_arithmetic_impl)]
            fn add(self, rhs: &'b $target) -> $target {
                $target(self.0 * rhs.0)
            }
        }

        impl<'a, 'b> Sub<&'b $target> for &'a $target {
            type Output = $target;

            #[inline]
            fn sub(self, rhs: &'b $target) -> $target {
                self + (-rhs)
            }
        }

        // square and multiply over the canonical scalar, most significant
        // bit first
        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<'a, 'b> Mul<&'b $scalar> for &'a $target {
            type Output = $target;

            fn mul(self, other: &'b $scalar) -> Self::Output {
                let mut acc = $target::identity();
                for byte in other.to_repr().as_ref().iter().rev() {
                    for i in (0..8).rev() {
                        acc = acc.double();
                        let prod = acc + self;
                        acc.conditional_assign(&prod, Choice::from((byte >> i) & 1));
                    }
                }
                acc
            }
        }

        $crate::impl_binops_additive!($target, $target);
        $crate::impl_binops_multiplicative!($target, $scalar);

        impl<T: Borrow<$target>> Sum<T> for $target {
            fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
                $target(iter.fold($base::one(), |acc, item| acc * item.borrow().0))
            }
        }

        impl Group for $target {
            type Scalar = $scalar;

            fn random(rng: impl RngCore) -> Self {
                use ff::Field;
                $base::random(rng).final_exponentiation()
            }

            fn identity() -> Self {
                Self::identity()
            }

            fn generator() -> Self {
                $generator
            }

            fn is_identity(&self) -> Choice {
                self.ct_eq(&Self::identity())
            }

            #[must_use]
            fn double(&self) -> Self {
                self.double()
            }
        }
    };
}
