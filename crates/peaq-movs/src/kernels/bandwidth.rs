//! Bandwidth MOV. Ported from `peaq_mov_bandwidth` in `movs.c`.

use peaq_accum::MovAccumulator;

/// `10^(5/10)`, the power-domain five-decibel factor used for the test
/// spectrum's bandwidth threshold.
const FIVE_DB_POWER_FACTOR: f64 = 3.16227766016838;

/// Computes and accumulates this channel's bandwidth contribution.
/// Accumulates nothing when the reference bandwidth gate (`bw_ref > 346`)
/// fails — a silent-frame gate, not an error.
pub fn bandwidth(
    channel: usize,
    power_spectrum_ref: &[f64],
    power_spectrum_test: &[f64],
    mov_ref: &mut MovAccumulator,
    mov_test: &mut MovAccumulator,
) {
    debug_assert!(power_spectrum_ref.len() >= 1024);
    debug_assert!(power_spectrum_test.len() >= 1024);

    let zero_threshold = power_spectrum_test[921..=1023]
        .iter()
        .copied()
        .fold(f64::MIN, f64::max);

    let mut bw_ref = 0usize;
    for i in (1..=921).rev() {
        if power_spectrum_ref[i - 1] > 10.0 * zero_threshold {
            bw_ref = i;
            break;
        }
    }

    if bw_ref <= 346 {
        return;
    }

    let mut bw_test = 0usize;
    for i in (1..=bw_ref).rev() {
        if power_spectrum_test[i - 1] >= FIVE_DB_POWER_FACTOR * zero_threshold {
            bw_test = i;
            break;
        }
    }

    mov_ref.accumulate(channel, bw_ref as f64, 1.0);
    mov_test.accumulate(channel, bw_test as f64, 1.0);
}
