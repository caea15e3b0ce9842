//! Noise Loudness, Asymmetric Noise Loudness and Average Linear Distortion
//! MOVs, which all share the `calc_noise_loudness` helper. Ported from
//! `peaq_mov_noise_loudness`, `peaq_mov_noise_loud_asym`,
//! `peaq_mov_lin_dist` and the shared `calc_noise_loudness` in `movs.c`.

use peaq_accum::MovAccumulator;

/// Shared per-band noise-loudness integral.
///
/// `mod_ref`/`mod_test` select the modulation-pattern pair and
/// `exc_ref`/`exc_test` the excitation pair; callers choose which concrete
/// patterns to pass for each of the three MOVs below. Clamped to 0 when
/// below `nl_min`.
pub(crate) fn calc_noise_loudness(
    alpha: f64,
    thres_fac: f64,
    s0: f64,
    nl_min: f64,
    mod_ref: &[f64],
    mod_test: &[f64],
    exc_ref: &[f64],
    exc_test: &[f64],
    internal_noise: &[f64],
) -> f64 {
    let z = mod_ref.len();
    debug_assert_eq!(mod_test.len(), z);
    debug_assert_eq!(exc_ref.len(), z);
    debug_assert_eq!(exc_test.len(), z);
    debug_assert_eq!(internal_noise.len(), z);

    let mut nl = 0.0;
    for k in 0..z {
        let s_ref = thres_fac * mod_ref[k] + s0;
        let s_test = thres_fac * mod_test[k] + s0;
        let e_t = internal_noise[k];
        let beta = (-alpha * (exc_test[k] - exc_ref[k]) / exc_ref[k]).exp();
        let num = (s_test * exc_test[k] - s_ref * exc_ref[k]).max(0.0);
        let den = e_t + s_ref * exc_ref[k] * beta;
        nl += (e_t / s_test).powf(0.23) * ((1.0 + num / den).powf(0.23) - 1.0);
    }
    nl *= 24.0 / z as f64;
    if nl < nl_min { 0.0 } else { nl }
}

/// RMS Noise Loudness (`NLoud`). Accumulates with weight 1.
pub fn rms_noise_loudness(
    channel: usize,
    mod_ref: &[f64],
    mod_test: &[f64],
    adapted_ref: &[f64],
    adapted_test: &[f64],
    internal_noise: &[f64],
    mov: &mut MovAccumulator,
) {
    let nl = calc_noise_loudness(
        1.5,
        0.15,
        0.5,
        0.0,
        mod_ref,
        mod_test,
        adapted_ref,
        adapted_test,
        internal_noise,
    );
    mov.accumulate(channel, nl, 1.0);
}

/// Asymmetric RMS Noise Loudness (`NLoudAsym`). The secondary
/// "missing components" term swaps the excitation arguments — per the
/// pinned `SWAP_MOD_PATTS` decision, the modulation arguments are *not*
/// swapped. Accumulates `(NL, MC)` with `mov` expected to be in RMS_ASYM
/// mode.
pub fn rms_noise_loud_asym(
    channel: usize,
    mod_ref: &[f64],
    mod_test: &[f64],
    adapted_ref: &[f64],
    adapted_test: &[f64],
    internal_noise: &[f64],
    mov: &mut MovAccumulator,
) {
    let nl = calc_noise_loudness(
        2.5,
        0.3,
        1.0,
        0.1,
        mod_ref,
        mod_test,
        adapted_ref,
        adapted_test,
        internal_noise,
    );
    let mc = calc_noise_loudness(
        1.5,
        0.15,
        1.0,
        0.0,
        mod_ref,
        mod_test,
        adapted_test,
        adapted_ref,
        internal_noise,
    );
    mov.accumulate(channel, nl, mc);
}

/// Average Linear Distortion (`AvgLinDist`). The modulation arguments are
/// not swapped, per the pinned `SWAP_MOD_PATTS` decision; the excitations
/// are the adapted reference against the raw reference excitation.
pub fn avg_lin_dist(
    channel: usize,
    mod_ref: &[f64],
    mod_test: &[f64],
    adapted_ref: &[f64],
    excitation_ref: &[f64],
    internal_noise: &[f64],
    mov: &mut MovAccumulator,
) {
    let nl = calc_noise_loudness(
        1.5,
        0.15,
        1.0,
        0.0,
        mod_ref,
        mod_test,
        adapted_ref,
        excitation_ref,
        internal_noise,
    );
    mov.accumulate(channel, nl, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use peaq_accum::MovAccumMode;

    #[test]
    fn identical_ref_and_test_clamps_to_zero() {
        // β = 1, max(sTest·e − sRef·e, 0) = 0 when ref == test, so NL = 0
        // before clamping, and stays 0 after.
        let pattern = vec![0.2; 8];
        let exc = vec![1.0; 8];
        let noise = vec![0.05; 8];
        let mut mov = MovAccumulator::new();
        mov.set_channels(1);
        mov.set_mode(MovAccumMode::Avg);
        rms_noise_loudness(0, &pattern, &pattern, &exc, &exc, &noise, &mut mov);
        assert_eq!(mov.get_value(), 0.0);
    }

    #[test]
    fn below_threshold_is_clamped() {
        // Small perturbation keeps the unclamped integral positive but
        // small; with nl_min well above it, the result must clamp to 0.
        let mod_ref = vec![0.01; 4];
        let mod_test = vec![0.02; 4];
        let exc_ref = vec![1.0; 4];
        let exc_test = vec![1.001; 4];
        let noise = vec![0.5; 4];
        let nl = calc_noise_loudness(1.5, 0.15, 0.5, 10.0, &mod_ref, &mod_test, &exc_ref, &exc_test, &noise);
        assert_eq!(nl, 0.0);
    }
}
