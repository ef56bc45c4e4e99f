#![allow(clippy::eq_op)]

use crate::ff::Field;
use crate::group::prime::PrimeCurveAffine;
use crate::group::{Curve, GroupEncoding, UncompressedEncoding};
use crate::{CurveAffine, CurveExt};
use rand_core::RngCore;

#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};

pub fn is_on_curve<G: CurveExt>(mut rng: impl RngCore, n: usize) {
    assert!(bool::from(G::identity().is_on_curve()));
    assert!(bool::from(G::generator().is_on_curve()));

    for _ in 0..n {
        let point = G::random(&mut rng);
        assert!(bool::from(point.is_on_curve()));
        let affine_point: G::AffineExt = point.into();
        assert!(bool::from(affine_point.is_on_curve()));
    }
}

pub fn equality<G: CurveExt>(mut rng: impl RngCore, n: usize) {
    let a = G::generator();
    let b = G::identity();

    assert!(a == a);
    assert!(b == b);
    assert!(a != b);
    assert!(b != a);

    for _ in 0..n {
        let a = G::random(&mut rng);
        let b = G::random(&mut rng);

        assert!(a == a);
        assert!(b == b);
        assert!(a != b);
        assert!(b != a);

        // same point, different z
        let (x, y, z) = a.jacobian_coordinates();
        let l = G::Base::random(&mut rng);
        let l2 = l.square();
        let c = G::new_jacobian(x * l2, y * l2 * l, z * l).unwrap();
        assert!(a == c);

        let a: G::AffineExt = a.into();
        let b: G::AffineExt = b.into();

        assert!(a == a);
        assert!(b == b);
        assert!(a != b);
        assert!(b != a);
    }
}

pub fn projective_to_affine_affine_to_projective<G: CurveExt>() {
    let a = G::generator();
    let b = G::identity();

    assert!(bool::from(G::AffineExt::from(a).is_on_curve()));
    assert!(!bool::from(G::AffineExt::from(a).is_identity()));
    assert!(bool::from(G::AffineExt::from(b).is_on_curve()));
    assert!(bool::from(G::AffineExt::from(b).is_identity()));

    let a = G::AffineExt::generator();
    let b = G::AffineExt::identity();

    assert!(bool::from(G::from(a).is_on_curve()));
    assert!(!bool::from(G::from(a).is_identity()));
    assert!(bool::from(G::from(b).is_on_curve()));
    assert!(bool::from(G::from(b).is_identity()));

    assert!(bool::from(a.coordinates().is_some()));
    assert!(bool::from(b.coordinates().is_none()));
}

pub fn projective_addition<G: CurveExt>(mut rng: impl RngCore) {
    let a = G::identity();
    let b = G::identity();
    let c = a + b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));
    let c = a - b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));

    let a = G::identity();
    let a = -a;
    assert!(bool::from(a.is_on_curve()));
    assert!(bool::from(a.is_identity()));

    let a = G::random(&mut rng);
    assert!(a == a + G::identity());
    assert!(a == G::identity() + a);
    assert!(-a == G::identity() - a);
    assert!(bool::from((a - a).is_identity()));
    assert!(bool::from((a + (-a)).is_on_curve()));

    let a = G::identity();
    let a = a.double();
    assert!(bool::from(a.is_on_curve()));
    assert!(bool::from(a.is_identity()));

    let a = G::generator();
    let a = a.double();
    assert!(bool::from(a.is_on_curve()));
    assert_eq!(a, G::generator() + G::generator());

    let a = G::random(&mut rng);
    assert_eq!(a.double(), a + a);
    assert!(a.double() - a == a);

    let a = G::random(&mut rng);
    let b = G::random(&mut rng);
    let c = G::random(&mut rng);
    assert!(a + b == b + a);
    assert!(a - b == -(b - a));
    assert!(c + (a + b) == a + (c + b));
    assert!((a - b) - c == (a - c) - b);

    let a = G::generator().double().double(); // 4P
    let b = G::generator().double(); // 2P
    let c = a + b;

    let mut d = G::generator();
    for _ in 0..5 {
        d += G::generator();
    }

    assert!(c == d);
    assert!(!bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));
    assert!(!bool::from(d.is_identity()));
    assert!(bool::from(d.is_on_curve()));
}

pub fn mixed_addition<G: CurveExt>(mut rng: impl RngCore) {
    let a = G::identity();
    let b = G::AffineRepr::identity();
    let c = a + b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));
    let c = a - b;
    assert!(bool::from(c.is_identity()));
    assert!(bool::from(c.is_on_curve()));

    let a = G::AffineExt::identity();
    let a = -a;
    assert!(bool::from(a.is_on_curve()));
    assert!(bool::from(a.is_identity()));

    let a: G::AffineExt = G::random(&mut rng).into();
    assert!(a.to_curve() == a + G::AffineExt::identity());
    assert!(a.to_curve() == G::identity() + a);
    assert_eq!(a.to_curve() + a, a.to_curve().double());
    assert!(bool::from((a.to_curve() - a).is_identity()));

    let a = G::random(&mut rng);
    let b: G::AffineExt = G::random(&mut rng).into();
    let c0 = a + b;
    let c1 = a + G::from(b);
    assert_eq!(c0, c1);
}

pub fn batch_normalize<G: CurveExt>() {
    let a = G::generator().double();
    let b = a.double();
    let c = b.double();

    for a_identity in (0..2).map(|n| n == 1) {
        for b_identity in (0..2).map(|n| n == 1) {
            for c_identity in (0..2).map(|n| n == 1) {
                let mut v = [a, b, c];
                if a_identity {
                    v[0] = G::identity()
                }
                if b_identity {
                    v[1] = G::identity()
                }
                if c_identity {
                    v[2] = G::identity()
                }

                let mut t = [
                    G::AffineExt::identity(),
                    G::AffineExt::identity(),
                    G::AffineExt::identity(),
                ];
                let expected = [
                    G::AffineExt::from(v[0]),
                    G::AffineExt::from(v[1]),
                    G::AffineExt::from(v[2]),
                ];

                G::batch_normalize(&v[..], &mut t[..]);

                assert_eq!(&t[..], &expected[..]);
            }
        }
    }
}

pub fn multiplication<G: CurveExt>(mut rng: impl RngCore, n: usize) {
    for _ in 0..n {
        let s1 = G::ScalarExt::random(&mut rng);
        let s2 = G::ScalarExt::random(&mut rng);

        let t0 = G::identity() * s1;
        assert!(bool::from(t0.is_identity()));

        let a = G::random(&mut rng);
        let t0 = a * G::ScalarExt::ONE;
        assert_eq!(a, t0);

        let t0 = a * G::ScalarExt::ZERO;
        assert!(bool::from(t0.is_identity()));

        let t0 = a * G::ScalarExt::from(3);
        assert_eq!(t0, a.double() + a);

        let t0 = a * s1 + a * s2;

        let s3 = s1 + s2;
        let t1 = a * s3;

        assert_eq!(t0, t1);

        let mut t0 = a * s1;
        let mut t1 = a * s2;
        t0 += t1;
        let s3 = s1 + s2;
        t1 = a * s3;
        assert_eq!(t0, t1);

        // the group has the order of the scalar field
        let t0 = a * (-s1);
        assert!(bool::from((t0 + a * s1).is_identity()));
    }
}

pub fn serdes<G: CurveExt>(mut rng: impl RngCore, n: usize) {
    assert!(bool::from(
        G::from_bytes(&G::identity().to_bytes())
            .unwrap()
            .is_identity()
    ));
    assert!(bool::from(
        G::AffineExt::from_bytes(&G::AffineExt::identity().to_bytes())
            .unwrap()
            .is_identity()
    ));
    for _ in 0..n {
        let projective_point = G::random(&mut rng);
        let affine_point: G::AffineExt = projective_point.into();
        let projective_repr = projective_point.to_bytes();
        let affine_repr = affine_point.to_bytes();
        assert_eq!(projective_repr.as_ref(), affine_repr.as_ref());

        let projective_point_rec = G::from_bytes(&projective_repr).unwrap();
        let projective_point_rec_unchecked = G::from_bytes_unchecked(&projective_repr).unwrap();
        let affine_point_rec = G::AffineExt::from_bytes(&affine_repr).unwrap();
        let affine_point_rec_unchecked = G::AffineExt::from_bytes_unchecked(&affine_repr).unwrap();

        assert_eq!(projective_point, projective_point_rec);
        assert_eq!(projective_point, projective_point_rec_unchecked);
        assert_eq!(affine_point, affine_point_rec);
        assert_eq!(affine_point, affine_point_rec_unchecked);

        // flipping the sign flag gives the negated point
        let mut repr = affine_repr;
        let last = repr.as_ref().len() - 1;
        repr.as_mut()[last] ^= 0b1000_0000;
        assert_eq!(G::AffineExt::from_bytes(&repr).unwrap(), -affine_point);

        // both flags at once are never produced
        repr.as_mut()[last] |= 0b0100_0000;
        assert!(bool::from(G::AffineExt::from_bytes(&repr).is_none()));
    }
}

pub fn serdes_uncompressed<G: CurveExt>(mut rng: impl RngCore, n: usize)
where
    G::AffineExt: UncompressedEncoding,
{
    let identity = G::AffineExt::identity().to_uncompressed();
    assert!(identity.as_ref().iter().all(|b| *b == 0));
    assert!(bool::from(
        G::AffineExt::from_uncompressed(&identity)
            .unwrap()
            .is_identity()
    ));
    for _ in 0..n {
        let point: G::AffineExt = G::random(&mut rng).into();
        let repr = point.to_uncompressed();
        assert_eq!(G::AffineExt::from_uncompressed(&repr).unwrap(), point);
        assert_eq!(G::AffineExt::from_uncompressed_unchecked(&repr).unwrap(), point);

        // the negated point differs in y only
        let neg = (-point).to_uncompressed();
        let half = repr.as_ref().len() / 2;
        assert_eq!(neg.as_ref()[..half], repr.as_ref()[..half]);
        assert_eq!(G::AffineExt::from_uncompressed(&neg).unwrap(), -point);

        // flag bits are rejected in either coordinate
        for idx in [half - 1, 2 * half - 1] {
            let mut flagged = point.to_uncompressed();
            flagged.as_mut()[idx] |= 0b1000_0000;
            assert!(bool::from(G::AffineExt::from_uncompressed_unchecked(&flagged).is_none()));
        }

        // a perturbed y leaves the curve
        let mut off_curve = point.to_uncompressed();
        off_curve.as_mut()[half] ^= 1;
        assert!(bool::from(G::AffineExt::from_uncompressed(&off_curve).is_none()));
    }
}

#[cfg(feature = "derive_serde")]
pub fn random_serde_test<G>(mut rng: impl RngCore, n: usize)
where
    G: CurveExt + Serialize + for<'de> Deserialize<'de>,
    G::AffineExt: Serialize + for<'de> Deserialize<'de>,
{
    for _ in 0..n {
        let projective_point = G::random(&mut rng);
        let affine_point: G::AffineExt = projective_point.into();
        {
            let affine_bytes = bincode::serialize(&affine_point).unwrap();
            let reader = std::io::Cursor::new(affine_bytes);
            let affine_point_rec: G::AffineExt = bincode::deserialize_from(reader).unwrap();
            assert_eq!(projective_point.to_affine(), affine_point_rec);
            assert_eq!(affine_point, affine_point_rec);
        }
        {
            let affine_json = serde_json::to_string(&affine_point).unwrap();
            let reader = std::io::Cursor::new(affine_json);
            let affine_point_rec: G::AffineExt = serde_json::from_reader(reader).unwrap();
            assert_eq!(affine_point, affine_point_rec);
        }
        {
            let projective_bytes = bincode::serialize(&projective_point).unwrap();
            let reader = std::io::Cursor::new(projective_bytes);
            let projective_point_rec: G = bincode::deserialize_from(reader).unwrap();
            assert_eq!(projective_point, projective_point_rec);
        }
        {
            let projective_json = serde_json::to_string(&projective_point).unwrap();
            let reader = std::io::Cursor::new(projective_json);
            let projective_point_rec: G = serde_json::from_reader(reader).unwrap();
            assert_eq!(projective_point, projective_point_rec);
        }
    }
}

#[macro_export]
macro_rules! curve_test {
    ($curve:ident, $test:ident) => {
        #[test]
        fn $test() {
            $crate::tests::curve::$test::<$curve>();
        }
    };
    ($curve:ident, $test:ident, rng) => {
        #[test]
        fn $test() {
            use rand_core::SeedableRng;
            let mut rng = rand_xorshift::XorShiftRng::from_seed($crate::tests::SEED);
            $crate::tests::curve::$test::<$curve>(&mut rng);
        }
    };
    ($curve:ident, $test:ident, $n:expr) => {
        #[test]
        fn $test() {
            use rand_core::SeedableRng;
            let mut rng = rand_xorshift::XorShiftRng::from_seed($crate::tests::SEED);
            $crate::tests::curve::$test::<$curve>(&mut rng, $n);
        }
    };
}

#[macro_export]
macro_rules! curve_testing_suite {
    ($curve:ident, "group_law", $n:expr) => {
        $crate::curve_test!($curve, is_on_curve, $n);
        $crate::curve_test!($curve, equality, $n);
        $crate::curve_test!($curve, projective_to_affine_affine_to_projective);
        $crate::curve_test!($curve, projective_addition, rng);
        $crate::curve_test!($curve, mixed_addition, rng);
        $crate::curve_test!($curve, batch_normalize);
        $crate::curve_test!($curve, multiplication, $n);
    };
    ($curve:ident, "encoding", $n:expr) => {
        $crate::curve_test!($curve, serdes, $n);
        $crate::curve_test!($curve, serdes_uncompressed, $n);
        #[cfg(feature = "derive_serde")]
        $crate::curve_test!($curve, random_serde_test, $n);
    };
    // Points of the full curve group decode unchecked, but not through the
    // subgroup checked path.
    ($curve:ident, "cofactor") => {
        #[test]
        fn torsion_points_rejected() {
            use rand_core::SeedableRng;
            use $crate::ff::Field;
            use $crate::group::prime::PrimeCurveAffine;
            use $crate::group::GroupEncoding;

            type Affine = <$curve as $crate::group::prime::PrimeCurve>::Affine;
            let mut rng = rand_xorshift::XorShiftRng::from_seed($crate::tests::SEED);
            let p = loop {
                let x = <$curve as $crate::CurveExt>::Base::random(&mut rng);
                let y = Affine::rhs(&x).sqrt();
                if bool::from(y.is_some()) {
                    break Affine { x, y: y.unwrap() };
                }
            };
            assert!(bool::from($crate::CurveAffine::is_on_curve(&p)));
            assert!(!bool::from(p.is_torsion_free()));

            let repr = p.to_bytes();
            assert_eq!(Affine::from_bytes_unchecked(&repr).unwrap(), p);
            assert!(bool::from(Affine::from_bytes(&repr).is_none()));

            let repr = $crate::group::UncompressedEncoding::to_uncompressed(&p);
            let unchecked = <Affine as $crate::group::UncompressedEncoding>::from_uncompressed_unchecked(&repr);
            assert_eq!(unchecked.unwrap(), p);
            let checked = <Affine as $crate::group::UncompressedEncoding>::from_uncompressed(&repr);
            assert!(bool::from(checked.is_none()));
            assert!(bool::from(Affine::generator().is_torsion_free()));
        }
    };
}
