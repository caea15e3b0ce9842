//! Real-valued FFT correlation kernel for the Error Harmonic Structure MOV.
//!
//! Two fixed-size real transforms are needed per channel per frame: a
//! length-512 forward/inverse pair implementing the length-256
//! autocorrelation-like sequence via the standard "multiply spectra, then
//! inverse transform" trick, and a length-256 forward transform used for
//! cepstral peak picking. Ported from the `do_xcorr` static function and
//! the FFT setup in `movs.c`.
//!
//! Plans are constructed once and reused across calls; per-call scratch
//! buffers are owned by [`CorrelationKernel`] so no allocation happens on
//! the hot path after construction.

use realfft::num_complex::Complex64;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Fixed autocorrelation length used throughout EHS.
pub const MAXLAG: usize = 256;

const XCORR_LEN: usize = 2 * MAXLAG;
const XCORR_BINS: usize = XCORR_LEN / 2 + 1;
const CEPSTRUM_BINS: usize = MAXLAG / 2 + 1;

/// Owns the FFT plans and scratch buffers needed for one channel's EHS
/// correlation and cepstral analysis.
///
/// Not shared across channels: each channel that runs EHS concurrently
/// should own its own kernel, since the scratch buffers are mutated in
/// place.
pub struct CorrelationKernel {
    xcorr_forward: Arc<dyn RealToComplex<f64>>,
    xcorr_inverse: Arc<dyn ComplexToReal<f64>>,
    cepstrum_forward: Arc<dyn RealToComplex<f64>>,

    time_a: Vec<f64>,
    time_b: Vec<f64>,
    freq_a: Vec<Complex64>,
    freq_b: Vec<Complex64>,
    time_out: Vec<f64>,
    cepstrum_time: Vec<f64>,
    cepstrum_freq: Vec<Complex64>,
    forward_scratch: Vec<Complex64>,
    inverse_scratch: Vec<Complex64>,
    cepstrum_scratch: Vec<Complex64>,
}

impl std::fmt::Debug for CorrelationKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrelationKernel")
            .field("xcorr_len", &XCORR_LEN)
            .field("maxlag", &MAXLAG)
            .finish()
    }
}

impl CorrelationKernel {
    /// Builds the FFT plans and scratch buffers. Expensive relative to a
    /// single call; intended to be constructed once per channel and reused.
    pub fn new() -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let xcorr_forward = planner.plan_fft_forward(XCORR_LEN);
        let xcorr_inverse = planner.plan_fft_inverse(XCORR_LEN);
        let cepstrum_forward = planner.plan_fft_forward(MAXLAG);

        let forward_scratch = xcorr_forward.make_scratch_vec();
        let inverse_scratch = xcorr_inverse.make_scratch_vec();
        let cepstrum_scratch = cepstrum_forward.make_scratch_vec();

        Self {
            time_a: vec![0.0; XCORR_LEN],
            time_b: vec![0.0; XCORR_LEN],
            freq_a: xcorr_forward.make_output_vec(),
            freq_b: xcorr_forward.make_output_vec(),
            time_out: vec![0.0; XCORR_LEN],
            cepstrum_time: vec![0.0; MAXLAG],
            cepstrum_freq: cepstrum_forward.make_output_vec(),
            xcorr_forward,
            xcorr_inverse,
            cepstrum_forward,
            forward_scratch,
            inverse_scratch,
            cepstrum_scratch,
        }
    }

    /// Computes `c[i] = Σ_{k=0..MAXLAG-1} d[k]·d[k+i]` for `i` in
    /// `0..MAXLAG`, given `d` of length `2·MAXLAG`.
    ///
    /// Implemented as: forward FFT of `d`, forward FFT of `d`'s first half
    /// zero-padded to the same length, conjugate spectral product scaled by
    /// `1/(2·MAXLAG)` (this scaling also serves as the inverse-FFT
    /// normalization, since `realfft` does not normalize), inverse FFT, and
    /// the first `MAXLAG` samples of the result.
    pub fn xcorr(&mut self, d: &[f64; XCORR_LEN]) -> [f64; MAXLAG] {
        self.time_a.copy_from_slice(d);
        self.time_b[..MAXLAG].copy_from_slice(&d[..MAXLAG]);
        self.time_b[MAXLAG..].fill(0.0);

        self.xcorr_forward
            .process_with_scratch(&mut self.time_a, &mut self.freq_a, &mut self.forward_scratch)
            .expect("xcorr forward FFT of `d` failed");
        self.xcorr_forward
            .process_with_scratch(&mut self.time_b, &mut self.freq_b, &mut self.forward_scratch)
            .expect("xcorr forward FFT of zero-padded half failed");

        let scale = 1.0 / XCORR_LEN as f64;
        for k in 0..XCORR_BINS {
            self.freq_a[k] = self.freq_a[k] * self.freq_b[k].conj() * scale;
        }

        self.xcorr_inverse
            .process_with_scratch(&mut self.freq_a, &mut self.time_out, &mut self.inverse_scratch)
            .expect("xcorr inverse FFT failed");

        let mut out = [0.0; MAXLAG];
        out.copy_from_slice(&self.time_out[..MAXLAG]);
        out
    }

    /// Forward real FFT of length `MAXLAG`, with the DC bin's real part
    /// zeroed (equivalent to subtracting the mean after windowing), returning
    /// squared magnitudes for bins `0..=MAXLAG/2`.
    pub fn cepstrum_power(&mut self, c: &[f64; MAXLAG]) -> [f64; CEPSTRUM_BINS] {
        self.cepstrum_time.copy_from_slice(c);
        self.cepstrum_forward
            .process_with_scratch(
                &mut self.cepstrum_time,
                &mut self.cepstrum_freq,
                &mut self.cepstrum_scratch,
            )
            .expect("cepstrum forward FFT failed");
        self.cepstrum_freq[0].re = 0.0;

        let mut power = [0.0; CEPSTRUM_BINS];
        for (p, bin) in power.iter_mut().zip(self.cepstrum_freq.iter()) {
            *p = bin.norm_sqr();
        }
        power
    }
}

impl Default for CorrelationKernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xcorr_of_zero_is_zero() {
        let mut kernel = CorrelationKernel::new();
        let d = [0.0; XCORR_LEN];
        let c = kernel.xcorr(&d);
        assert!(c.iter().all(|&v| v.abs() < 1e-9));
    }

    #[test]
    fn xcorr_lag_zero_is_energy_of_first_half() {
        let mut kernel = CorrelationKernel::new();
        let mut d = [0.0; XCORR_LEN];
        for (i, v) in d.iter_mut().take(MAXLAG).enumerate() {
            *v = (i as f64 * 0.1).sin();
        }
        let c = kernel.xcorr(&d);
        let expected: f64 = d[..MAXLAG].iter().map(|v| v * v).sum();
        assert!((c[0] - expected).abs() < 1e-6, "c[0]={}, expected={expected}", c[0]);
    }

    #[test]
    fn cepstrum_power_zeroes_dc() {
        let mut kernel = CorrelationKernel::new();
        let c = [1.0; MAXLAG];
        let power = kernel.cepstrum_power(&c);
        assert_eq!(power[0], 0.0);
    }
}
