//! Modulation Difference MOV. Ported from `peaq_mov_modulation_difference`
//! in `movs.c`.

use peaq_accum::{MovAccumMode, MovAccumulator};

/// Computes and accumulates one channel's modulation-difference
/// contribution for this frame.
///
/// `mov2` is `Some` for the windowed/unwindowed distinction upstream makes
/// by giving the secondary MOV a heavier masking weight (`levWt = 100`
/// instead of `1`); `mov_win` additionally folds `md1` into an
/// unweighted accumulator when present.
pub fn modulation_difference(
    channel: usize,
    mod_ref: &[f64],
    mod_test: &[f64],
    avg_loud_ref: &[f64],
    internal_noise: &[f64],
    mov1: &mut MovAccumulator,
    mov2: Option<&mut MovAccumulator>,
    mov_win: Option<&mut MovAccumulator>,
) {
    let z = mod_ref.len();
    debug_assert_eq!(mod_test.len(), z);
    debug_assert_eq!(avg_loud_ref.len(), z);
    debug_assert_eq!(internal_noise.len(), z);

    let lev_wt = if mov2.is_some() { 100.0 } else { 1.0 };

    let mut md1 = 0.0;
    let mut md2 = 0.0;
    let mut temp_wt = 0.0;
    for k in 0..z {
        let diff = (mod_ref[k] - mod_test[k]).abs();
        md1 += diff / (1.0 + mod_ref[k]);
        let w = if mod_test[k] >= mod_ref[k] { 1.0 } else { 0.1 };
        md2 += w * diff / (0.01 + mod_ref[k]);
        temp_wt += avg_loud_ref[k] / (avg_loud_ref[k] + lev_wt * internal_noise[k].powf(0.3));
    }

    md1 *= 100.0
        / if mov1.mode() == Some(MovAccumMode::Rms) {
            (z as f64).sqrt()
        } else {
            z as f64
        };
    md2 *= 100.0 / z as f64;

    mov1.accumulate(channel, md1, temp_wt);
    if let Some(mov2) = mov2 {
        mov2.accumulate(channel, md2, temp_wt);
    }
    if let Some(mov_win) = mov_win {
        mov_win.accumulate(channel, md1, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_signals_give_zero_difference() {
        let mod_pattern = vec![0.5, 1.0, 2.0, 0.25];
        let avg_loud = vec![1.0, 1.0, 1.0, 1.0];
        let noise = vec![0.01, 0.01, 0.01, 0.01];
        let mut mov1 = MovAccumulator::new();
        mov1.set_channels(1);
        mov1.set_mode(MovAccumMode::Avg);
        modulation_difference(0, &mod_pattern, &mod_pattern, &avg_loud, &noise, &mut mov1, None, None);
        assert!((mov1.get_value()).abs() < 1e-9);
    }
}
