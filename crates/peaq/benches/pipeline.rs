//! Benchmarks for the PEAQ MOV accumulation pipeline.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use peaq::{Comparison, Config};
use peaq_movs::kernels::EhsKernel;

const Z: usize = 109;
const SPECTRUM_LEN: usize = 1025;

fn band_pattern(seed: f64) -> Vec<f64> {
    (0..Z).map(|k| 1.0 + seed * (k as f64 * 0.05).sin().abs()).collect()
}

fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_frame");

    let mod_ref = band_pattern(0.3);
    let mod_test = band_pattern(0.31);
    let avg_loud = band_pattern(0.5);
    let noise = vec![0.02_f64; Z];
    let adapted_ref = band_pattern(0.4);
    let adapted_test = band_pattern(0.41);
    let power_ref: Vec<f64> = (0..1024).map(|i| 1.0 + (i as f64 * 0.001).cos().abs()).collect();
    let power_test = power_ref.clone();

    group.bench_function("modulation_difference_and_noise_loudness", |b| {
        let mut cmp = Comparison::new(Config::default()).unwrap();
        b.iter(|| {
            cmp.movs_mut().process_modulation_difference(
                0,
                black_box(&mod_ref),
                black_box(&mod_test),
                &avg_loud,
                &noise,
            );
            cmp.movs_mut().process_rms_noise_loudness(
                0,
                &mod_ref,
                &mod_test,
                &adapted_ref,
                &adapted_test,
                &noise,
            );
        });
    });

    group.bench_function("bandwidth", |b| {
        let mut cmp = Comparison::new(Config::default()).unwrap();
        b.iter(|| {
            cmp.movs_mut()
                .process_bandwidth(0, black_box(&power_ref), black_box(&power_test));
        });
    });

    group.finish();
}

fn bench_ehs(c: &mut Criterion) {
    let mut group = c.benchmark_group("ehs");
    let mut kernel = EhsKernel::new();
    let spectrum_ref: Vec<f64> = (0..SPECTRUM_LEN).map(|i| 1.0 + (i as f64 * 0.01).sin().abs()).collect();
    let spectrum_test: Vec<f64> = (0..SPECTRUM_LEN)
        .map(|i| 1.0 + (i as f64 * 0.011).sin().abs())
        .collect();

    group.bench_function("channel_ehs", |b| {
        b.iter(|| {
            let mut mov = peaq_accum::MovAccumulator::new();
            mov.set_channels(1);
            mov.set_mode(peaq_accum::MovAccumMode::Avg);
            kernel.accumulate(0, black_box(&spectrum_ref), black_box(&spectrum_test), &mut mov);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_process_frame, bench_ehs);
criterion_main!(benches);
