//! Error Harmonic Structure MOV. Ported from `peaq_mov_ehs` and the
//! correlation-window setup in `movs.c`.
//!
//! The four compile-time switches the reference implementation exposes
//! around this kernel (window centring, DC-subtraction timing, and the
//! two noise-loudness/detection-probability switches handled elsewhere)
//! are pinned rather than parameterized; see the crate root docs.

use peaq_accum::MovAccumulator;
use peaq_fft::{CorrelationKernel, MAXLAG};
use std::f64::consts::PI;

const XCORR_LEN: usize = 2 * MAXLAG;

/// Owns the precomputed correlation window and FFT plans for one
/// channel's EHS computation across the lifetime of a comparison.
pub struct EhsKernel {
    window: [f64; MAXLAG],
    correlation: CorrelationKernel,
}

impl std::fmt::Debug for EhsKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EhsKernel").finish_non_exhaustive()
    }
}

impl EhsKernel {
    /// Builds the window and FFT plans once; reuse across frames and
    /// channels (the kernel holds no per-channel state between calls).
    pub fn new() -> Self {
        let mut window = [0.0; MAXLAG];
        for (i, w) in window.iter_mut().enumerate() {
            *w = 0.81649658092773 * (1.0 - (2.0 * PI * i as f64 / (MAXLAG as f64 - 1.0)).cos())
                / MAXLAG as f64;
        }
        Self {
            window,
            correlation: CorrelationKernel::new(),
        }
    }

    /// Computes one channel's raw EHS value (before the `1000·` scaling
    /// and accumulation spec.md §4.2.6 step 7 applies). Both spectra must
    /// have at least `2·MAXLAG` entries.
    fn channel_ehs(&mut self, weighted_ref: &[f64], weighted_test: &[f64]) -> f64 {
        debug_assert!(weighted_ref.len() >= XCORR_LEN);
        debug_assert!(weighted_test.len() >= XCORR_LEN);

        let mut d = [0.0_f64; XCORR_LEN];
        for n in 0..XCORR_LEN {
            let fr = weighted_ref[n];
            let ft = weighted_test[n];
            d[n] = if fr == 0.0 && ft == 0.0 { 0.0 } else { (ft / fr).ln() };
        }

        let mut c = self.correlation.xcorr(&d);
        let d0 = c[0];
        let mut dk = d0;
        for i in 0..MAXLAG {
            c[i] = c[i] * self.window[i] / (d0 * dk).sqrt();
            dk += d[i + MAXLAG] * d[i + MAXLAG] - d[i] * d[i];
        }

        let power = self.correlation.cepstrum_power(&c);
        let mut s = power[0]; // zero: the DC bin was zeroed inside cepstrum_power
        let mut ehs = 0.0;
        for &new_s in &power[1..] {
            if new_s > s && new_s > ehs {
                ehs = new_s;
            }
            s = new_s;
        }
        ehs
    }

    /// Computes and accumulates this channel's EHS contribution. Callers
    /// are responsible for the frame-level gate (spec.md §4.2.6's "Frame
    /// gating": skip the whole frame, across every channel, unless at
    /// least one channel's energy threshold was reached).
    pub fn accumulate(
        &mut self,
        channel: usize,
        weighted_ref: &[f64],
        weighted_test: &[f64],
        mov: &mut MovAccumulator,
    ) {
        let ehs = self.channel_ehs(weighted_ref, weighted_test);
        mov.accumulate(channel, 1000.0 * ehs, 1.0);
    }
}

impl Default for EhsKernel {
    fn default() -> Self {
        Self::new()
    }
}
