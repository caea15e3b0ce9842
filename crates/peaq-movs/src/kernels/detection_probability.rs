//! Detection Probability MOVs: Average Distorted Block (ADB) and Maximum
//! Filtered Probability of Detection (MFPD). Ported from
//! `peaq_mov_prob_detect` in `movs.c`.

use peaq_accum::MovAccumulator;

/// Computes the binaural detection probability/steps across all channels
/// for this frame and accumulates into `mov_adb`/`mov_mfpd` (both read
/// only channel 0, per the accumulator contract for channel-reduced
/// modes).
///
/// `excitation_ref`/`excitation_test` are one slice per channel, each of
/// length `Z`.
pub fn detection_probability(
    excitation_ref: &[&[f64]],
    excitation_test: &[&[f64]],
    mov_adb: &mut MovAccumulator,
    mov_mfpd: &mut MovAccumulator,
) {
    let channels = excitation_ref.len();
    debug_assert_eq!(excitation_test.len(), channels);
    debug_assert!(channels > 0);
    let z = excitation_ref[0].len();

    let mut p_bin_complement = 1.0;
    let mut q_bin_sum = 0.0;

    for k in 0..z {
        let mut p_bin = 0.0;
        let mut q_bin = 0.0;
        for c in 0..channels {
            let er_db = 10.0 * excitation_ref[c][k].log10();
            let et_db = 10.0 * excitation_test[c][k].log10();
            let l = 0.3 * er_db.max(et_db) + 0.7 * et_db;
            let s = if l <= 0.0 {
                1e30
            } else {
                5.95072 * (6.39468 / l).powf(1.71332)
                    + 9.01033e-11 * l.powi(4)
                    + 5.05622e-6 * l.powi(3)
                    - 0.00102438 * l * l
                    + 0.0550197 * l
                    - 0.198719
            };
            let e = er_db - et_db;
            let b = if er_db > et_db { 4.0 } else { 6.0 };
            let p_c = 1.0 - 0.5_f64.powf((e / s).powf(b));
            let q_c = e.trunc().abs() / s;

            if c == 0 || p_c > p_bin {
                p_bin = p_c;
            }
            if c == 0 || q_c > q_bin {
                q_bin = q_c;
            }
        }
        p_bin_complement *= 1.0 - p_bin;
        q_bin_sum += q_bin;
    }

    let p_bin = 1.0 - p_bin_complement;
    mov_mfpd.accumulate(0, p_bin, 1.0);
    if p_bin > 0.5 {
        mov_adb.accumulate(0, q_bin_sum, 1.0);
    }
}
