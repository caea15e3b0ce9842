//! Property-based tests for the quantified invariants of the accumulator.

use peaq_accum::{MovAccumMode, MovAccumulator};
use proptest::prelude::*;

fn build(mode: MovAccumMode, samples: &[(f64, f64)]) -> MovAccumulator {
    let mut acc = MovAccumulator::new();
    acc.set_channels(1);
    acc.set_mode(mode);
    for &(x, w) in samples {
        acc.accumulate(0, x, w);
    }
    acc
}

proptest! {
    /// Scaling all weights by a positive constant leaves `get_value()`
    /// unchanged for AVG, AVG_LOG and RMS.
    #[test]
    fn weight_scaling_invariance(
        samples in prop::collection::vec((1.0f64..100.0, 0.1f64..10.0), 1..20),
        scale in 0.01f64..100.0,
    ) {
        for mode in [MovAccumMode::Avg, MovAccumMode::AvgLog, MovAccumMode::Rms] {
            let unscaled = build(mode, &samples);
            let scaled_samples: Vec<_> = samples.iter().map(|&(x, w)| (x, w * scale)).collect();
            let scaled = build(mode, &scaled_samples);
            prop_assert!((unscaled.get_value() - scaled.get_value()).abs() < 1e-9);
        }
    }

    /// AVG with constant x and any non-zero weights returns x exactly.
    #[test]
    fn avg_constant_is_exact(
        x in -1000.0f64..1000.0,
        weights in prop::collection::vec(0.01f64..50.0, 1..20),
    ) {
        let samples: Vec<_> = weights.iter().map(|&w| (x, w)).collect();
        let acc = build(MovAccumMode::Avg, &samples);
        prop_assert!((acc.get_value() - x).abs() < 1e-9);
    }

    /// FILTERED_MAX with constant x converges to x from below and never
    /// exceeds it.
    #[test]
    fn filtered_max_constant_is_bounded(x in 0.0f64..1000.0, steps in 1usize..500) {
        let mut acc = MovAccumulator::new();
        acc.set_channels(1);
        acc.set_mode(MovAccumMode::FilteredMax);
        let mut prev = f64::NEG_INFINITY;
        for _ in 0..steps {
            acc.accumulate(0, x, 1.0);
            let v = acc.get_value();
            prop_assert!(v <= x + 1e-9);
            prop_assert!(v + 1e-9 >= prev);
            prev = v;
        }
    }

    /// Committing a tentative suffix is bit-identical to accumulating the
    /// concatenated sequence directly.
    #[test]
    fn tentative_commit_matches_direct_accumulation(
        prefix in prop::collection::vec((1.0f64..100.0, 0.1f64..10.0), 0..10),
        suffix in prop::collection::vec((1.0f64..100.0, 0.1f64..10.0), 0..10),
    ) {
        let mut staged = MovAccumulator::new();
        staged.set_channels(1);
        staged.set_mode(MovAccumMode::Avg);
        for &(x, w) in &prefix {
            staged.accumulate(0, x, w);
        }
        staged.set_tentative(true);
        for &(x, w) in &suffix {
            staged.accumulate(0, x, w);
        }
        staged.set_tentative(false);

        let mut direct = MovAccumulator::new();
        direct.set_channels(1);
        direct.set_mode(MovAccumMode::Avg);
        for &(x, w) in prefix.iter().chain(suffix.iter()) {
            direct.accumulate(0, x, w);
        }

        prop_assert_eq!(staged.get_value(), direct.get_value());
    }
}
