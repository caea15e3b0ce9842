//! Per-comparison driver owning the eleven basic-version MOV accumulators
//! and dispatching each kernel, per spec.md §4.3's invocation contract.
//!
//! The reference implementation leaves this wiring to its GObject-based
//! `PeaqDModel`; here it is a plain struct so a caller needs no dynamic
//! dispatch beyond the ear-model contracts in [`crate::contracts`].

use crate::kernels::{self, EhsKernel};
use peaq_accum::{MovAccumMode, MovAccumulator};

fn accumulator(channels: usize, mode: MovAccumMode) -> MovAccumulator {
    let mut acc = MovAccumulator::new();
    acc.set_channels(channels);
    acc.set_mode(mode);
    acc
}

/// The eleven basic-version Model Output Variables, read once at
/// end-of-stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovValues {
    pub bandwidth_ref: f64,
    pub bandwidth_test: f64,
    pub total_nmr: f64,
    pub win_mod_diff1: f64,
    pub adb: f64,
    pub ehs: f64,
    pub avg_mod_diff1: f64,
    pub avg_mod_diff2: f64,
    pub rms_noise_loud: f64,
    pub mfpd: f64,
    pub rel_dist_frames: f64,
}

/// Owns one accumulator per basic-version MOV and fans per-frame kernel
/// calls out to them.
#[derive(Debug)]
pub struct MovSet {
    channels: usize,
    avg_mod_diff1: MovAccumulator,
    avg_mod_diff2: MovAccumulator,
    win_mod_diff1: MovAccumulator,
    rms_noise_loud: MovAccumulator,
    bandwidth_ref: MovAccumulator,
    bandwidth_test: MovAccumulator,
    total_nmr: MovAccumulator,
    rel_dist_frames: MovAccumulator,
    adb: MovAccumulator,
    mfpd: MovAccumulator,
    ehs: MovAccumulator,
    ehs_kernels: Vec<EhsKernel>,
}

impl MovSet {
    /// Builds a fresh set of accumulators for a comparison with `channels`
    /// audio channels (1 for mono, 2 for stereo).
    pub fn new(channels: usize) -> Self {
        assert!(channels > 0, "channel count must be positive");
        Self {
            channels,
            avg_mod_diff1: accumulator(channels, MovAccumMode::Avg),
            avg_mod_diff2: accumulator(channels, MovAccumMode::Avg),
            win_mod_diff1: accumulator(channels, MovAccumMode::AvgWindow),
            rms_noise_loud: accumulator(channels, MovAccumMode::Rms),
            bandwidth_ref: accumulator(channels, MovAccumMode::Avg),
            bandwidth_test: accumulator(channels, MovAccumMode::Avg),
            total_nmr: accumulator(channels, MovAccumMode::AvgLog),
            rel_dist_frames: accumulator(channels, MovAccumMode::Avg),
            // ADB/MFPD fold the binaural reduction over channels inside
            // the kernel itself, so these accumulators see only channel 0.
            adb: accumulator(1, MovAccumMode::Adb),
            mfpd: accumulator(1, MovAccumMode::FilteredMax),
            ehs: accumulator(channels, MovAccumMode::Avg),
            ehs_kernels: (0..channels).map(|_| EhsKernel::new()).collect(),
        }
    }

    /// Number of audio channels this set was configured for.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Toggles provisional accumulation across every owned accumulator.
    pub fn set_tentative(&mut self, tentative: bool) {
        for acc in [
            &mut self.avg_mod_diff1,
            &mut self.avg_mod_diff2,
            &mut self.win_mod_diff1,
            &mut self.rms_noise_loud,
            &mut self.bandwidth_ref,
            &mut self.bandwidth_test,
            &mut self.total_nmr,
            &mut self.rel_dist_frames,
            &mut self.adb,
            &mut self.mfpd,
            &mut self.ehs,
        ] {
            acc.set_tentative(tentative);
        }
    }

    /// Modulation Difference: feeds `AvgModDiff1`, `AvgModDiff2` and
    /// `WinModDiff1`.
    pub fn process_modulation_difference(
        &mut self,
        channel: usize,
        mod_ref: &[f64],
        mod_test: &[f64],
        avg_loud_ref: &[f64],
        internal_noise: &[f64],
    ) {
        kernels::modulation_difference(
            channel,
            mod_ref,
            mod_test,
            avg_loud_ref,
            internal_noise,
            &mut self.avg_mod_diff1,
            Some(&mut self.avg_mod_diff2),
            Some(&mut self.win_mod_diff1),
        );
    }

    /// RMS Noise Loudness: feeds `RmsNoiseLoud`.
    pub fn process_rms_noise_loudness(
        &mut self,
        channel: usize,
        mod_ref: &[f64],
        mod_test: &[f64],
        adapted_ref: &[f64],
        adapted_test: &[f64],
        internal_noise: &[f64],
    ) {
        kernels::rms_noise_loudness(
            channel,
            mod_ref,
            mod_test,
            adapted_ref,
            adapted_test,
            internal_noise,
            &mut self.rms_noise_loud,
        );
    }

    /// Bandwidth: feeds `BandwidthRef`/`BandwidthTest`. Silently
    /// contributes nothing when the frame fails the bandwidth gate.
    pub fn process_bandwidth(
        &mut self,
        channel: usize,
        power_spectrum_ref: &[f64],
        power_spectrum_test: &[f64],
    ) {
        kernels::bandwidth(
            channel,
            power_spectrum_ref,
            power_spectrum_test,
            &mut self.bandwidth_ref,
            &mut self.bandwidth_test,
        );
    }

    /// Noise-to-Mask Ratio: feeds `TotalNmr` and `RelDistFrames`.
    pub fn process_nmr(
        &mut self,
        channel: usize,
        ear_model: &dyn crate::contracts::FftEarModel,
        weighted_power_spectrum_ref: &[f64],
        weighted_power_spectrum_test: &[f64],
        excitation_ref: &[f64],
    ) {
        kernels::nmr(
            channel,
            ear_model,
            weighted_power_spectrum_ref,
            weighted_power_spectrum_test,
            excitation_ref,
            &mut self.total_nmr,
            Some(&mut self.rel_dist_frames),
        );
    }

    /// Detection Probability: feeds `Adb` and `Mfpd`. `excitation_ref`/
    /// `excitation_test` hold one slice per channel.
    pub fn process_detection_probability(
        &mut self,
        excitation_ref: &[&[f64]],
        excitation_test: &[&[f64]],
    ) {
        debug_assert_eq!(excitation_ref.len(), self.channels);
        kernels::detection_probability(excitation_ref, excitation_test, &mut self.adb, &mut self.mfpd);
    }

    /// Error Harmonic Structure: feeds `Ehs`. Applies the frame-level gate
    /// (spec.md §4.2.6) across every channel before accumulating anything;
    /// `energy_reached` holds one `(ref, test)` pair per channel.
    pub fn process_ehs(
        &mut self,
        weighted_power_spectrum: &[(&[f64], &[f64])],
        energy_reached: &[(bool, bool)],
    ) {
        debug_assert_eq!(weighted_power_spectrum.len(), self.channels);
        debug_assert_eq!(energy_reached.len(), self.channels);
        let gate_open = energy_reached.iter().any(|&(r, t)| r || t);
        if !gate_open {
            return;
        }
        for (c, &(weighted_ref, weighted_test)) in weighted_power_spectrum.iter().enumerate() {
            self.ehs_kernels[c].accumulate(c, weighted_ref, weighted_test, &mut self.ehs);
        }
    }

    /// Reads every accumulator once and packages the eleven MOVs. Does not
    /// mutate any accumulator state, and may be called repeatedly.
    pub fn finalize(&self) -> MovValues {
        MovValues {
            bandwidth_ref: self.bandwidth_ref.get_value(),
            bandwidth_test: self.bandwidth_test.get_value(),
            total_nmr: self.total_nmr.get_value(),
            win_mod_diff1: self.win_mod_diff1.get_value(),
            adb: self.adb.get_value(),
            ehs: self.ehs.get_value(),
            avg_mod_diff1: self.avg_mod_diff1.get_value(),
            avg_mod_diff2: self.avg_mod_diff2.get_value(),
            rms_noise_loud: self.rms_noise_loud.get_value(),
            mfpd: self.mfpd.get_value(),
            rel_dist_frames: self.rel_dist_frames.get_value(),
        }
    }
}
