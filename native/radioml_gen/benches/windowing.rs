//! Windowing benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_complex::Complex32;
use phy_modem::Scheme;
use radioml_gen::{
    normalize_window, AcquisitionRequest, ModulationSpec, WaveformRealization, WindowSampler,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn realization(len: usize) -> WaveformRealization {
    let request = AcquisitionRequest {
        modulation: ModulationSpec::for_scheme(Scheme::Qam64),
        snr_db: 0,
        apply_channel: false,
        samples_per_symbol: None,
        excess_bw: None,
        realization_index: 1,
    };
    let samples = (0..len)
        .map(|i| Complex32::from_polar(1.0 + (i % 5) as f32, i as f32 * 0.37))
        .collect();
    WaveformRealization::new(&request, samples)
}

fn bench_windowing(c: &mut Criterion) {
    let r = realization(240_000);

    c.bench_function("normalize_window_128", |b| {
        let window = &r.samples[4000..4128];
        b.iter(|| normalize_window(black_box(window)))
    });

    c.bench_function("sample_windows_qam64_realization", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(2016);
            WindowSampler::new(black_box(&r), 128, 1000, &mut rng).count()
        })
    });
}

criterion_group!(benches, bench_windowing);
criterion_main!(benches);
