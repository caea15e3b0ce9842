//! Noise-to-Mask Ratio and Relative Disturbed Frames MOVs. Ported from
//! `peaq_mov_nmr` in `movs.c`.

use crate::contracts::FftEarModel;
use peaq_accum::{MovAccumMode, MovAccumulator};

/// `10^(1.5/10)`, the power-domain 1.5 dB factor a frame's peak
/// noise-to-mask ratio must exceed to count as "disturbed".
const ONE_POINT_FIVE_DB_POWER_FACTOR: f64 = 1.41253754462275;

/// Computes and accumulates this channel's NMR (and, if given, Relative
/// Disturbed Frames) contribution.
pub fn nmr(
    channel: usize,
    ear_model: &dyn FftEarModel,
    weighted_power_spectrum_ref: &[f64],
    weighted_power_spectrum_test: &[f64],
    excitation_ref: &[f64],
    mov_nmr: &mut MovAccumulator,
    mov_rdf: Option<&mut MovAccumulator>,
) {
    let n = weighted_power_spectrum_ref.len();
    debug_assert_eq!(weighted_power_spectrum_test.len(), n);

    let noise_spectrum: Vec<f64> = (0..n)
        .map(|i| {
            let fr = weighted_power_spectrum_ref[i];
            let ft = weighted_power_spectrum_test[i];
            fr + ft - 2.0 * (fr * ft).sqrt()
        })
        .collect();

    let noise_in_bands = ear_model.group_into_bands(&noise_spectrum);
    let masking_difference = ear_model.masking_difference();
    let z = excitation_ref.len();
    debug_assert_eq!(noise_in_bands.len(), z);
    debug_assert_eq!(masking_difference.len(), z);

    let mut nmr_sum = 0.0;
    let mut nmr_max = 0.0_f64;
    for k in 0..z {
        let mask = excitation_ref[k] / masking_difference[k];
        let curr_nmr = noise_in_bands[k] / mask;
        nmr_sum += curr_nmr;
        nmr_max = nmr_max.max(curr_nmr);
    }
    nmr_sum /= z as f64;

    if mov_nmr.mode() == Some(MovAccumMode::AvgLog) {
        mov_nmr.accumulate(channel, nmr_sum, 1.0);
    } else {
        mov_nmr.accumulate(channel, 10.0 * nmr_sum.log10(), 1.0);
    }

    if let Some(mov_rdf) = mov_rdf {
        let disturbed = if nmr_max > ONE_POINT_FIVE_DB_POWER_FACTOR { 1.0 } else { 0.0 };
        mov_rdf.accumulate(channel, disturbed, 1.0);
    }
}
