//! Benchmark pairing.
//! It measures the optimal ate and super-optimal ate pairings of GG22D7-457,
//! and their final exponentiation separately.
//!
//! To run this benchmark:
//!
//!     cargo bench --bench pairing

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ff::Field;
use gg22curves::gg22d7::{final_exponentiation, GG22D7SuperOptimal, GG22D7};
use group::prime::PrimeCurveAffine;
use pairing::{Engine, MultiMillerLoop};
use rand_core::SeedableRng;
use rand_xorshift::XorShiftRng;

const SEED: [u8; 16] = [
    0x59, 0x62, 0xbe, 0x5d, 0x76, 0x3d, 0x31, 0x8d, 0x17, 0xdb, 0x37, 0x32, 0x54, 0x06, 0xbc, 0xe5,
];

fn bench_pairing<E>(c: &mut Criterion, name: &'static str)
where
    E: MultiMillerLoop<G2Prepared = <E as Engine>::G2Affine>,
{
    let mut rng = XorShiftRng::from_seed(SEED);
    let mut group = c.benchmark_group(format!("{} Pairing", name));

    group.significance_level(0.1).sample_size(10);
    group.throughput(Throughput::Elements(1));

    let a = E::Fr::random(&mut rng);
    let b = E::Fr::random(&mut rng);

    let g1 = E::G1Affine::generator();
    let g1_affine = (g1 * a).into();

    let g2 = E::G2Affine::generator();
    let g2_affine = (g2 * b).into();

    group.bench_function(format!("{} miller loop", name), |bencher| {
        bencher.iter(|| E::multi_miller_loop(&[(&black_box(g1_affine), &black_box(g2_affine))]))
    });
    group.bench_function(format!("{} pairing", name), |bencher| {
        bencher.iter(|| E::pairing(&black_box(g1_affine), &black_box(g2_affine)))
    });
    group.finish()
}

fn bench_optimal_ate(c: &mut Criterion) {
    bench_pairing::<GG22D7>(c, "GG22D7 optimal ate");
}

fn bench_super_optimal_ate(c: &mut Criterion) {
    bench_pairing::<GG22D7SuperOptimal>(c, "GG22D7 super-optimal ate");
}

fn bench_final_exponentiation(c: &mut Criterion) {
    let mut rng = XorShiftRng::from_seed(SEED);
    let f = gg22curves::gg22d7::Fp22::random(&mut rng);

    let mut group = c.benchmark_group("GG22D7 final exponentiation");
    group.significance_level(0.1).sample_size(10);
    group.bench_function("final exponentiation", |bencher| {
        bencher.iter(|| final_exponentiation(black_box(&f)))
    });
    group.finish()
}

criterion_group!(
    benches,
    bench_optimal_ate,
    bench_super_optimal_ate,
    bench_final_exponentiation
);
criterion_main!(benches);
