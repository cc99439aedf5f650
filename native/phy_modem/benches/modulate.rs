//! Modulation benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phy_modem::*;

fn benchmark_qam64_modulate(c: &mut Criterion) {
    let source = source_alphabet(AlphabetFamily::Discrete, 1000, 1);
    let mut modulator = build_modulator(Scheme::Qam64, ModulatorParams::default()).unwrap();

    c.bench_function("qam64_modulate_1000_symbols", |b| {
        b.iter(|| {
            modulator.reset();
            black_box(modulator.modulate(&source).unwrap())
        })
    });
}

fn benchmark_gfsk_modulate(c: &mut Criterion) {
    let source = source_alphabet(AlphabetFamily::Discrete, 1000, 1);
    let params = ModulatorParams {
        samples_per_symbol: Some(8),
        excess_bw: Some(0.35),
    };
    let mut modulator = build_modulator(Scheme::Gfsk, params).unwrap();

    c.bench_function("gfsk_modulate_1000_symbols", |b| {
        b.iter(|| {
            modulator.reset();
            black_box(modulator.modulate(&source).unwrap())
        })
    });
}

fn benchmark_am_ssb_modulate(c: &mut Criterion) {
    let source = source_alphabet(AlphabetFamily::Continuous, 10_000, 1);
    let mut modulator = build_modulator(Scheme::AmSsb, ModulatorParams::default()).unwrap();

    c.bench_function("am_ssb_modulate_10000_samples", |b| {
        b.iter(|| black_box(modulator.modulate(&source).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_qam64_modulate,
    benchmark_gfsk_modulate,
    benchmark_am_ssb_modulate
);
criterion_main!(benches);
