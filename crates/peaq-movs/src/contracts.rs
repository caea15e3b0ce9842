//! Collaborator contracts consumed by the MOV kernels.
//!
//! The reference implementation dispatches through a runtime object system
//! with dynamically-typed ear-model subclasses. Here the FFT-capable and
//! filter-bank ear models (the latter unimplemented, see the crate's
//! top-level docs) are modelled as a small, fixed set of traits instead:
//! kernels that only make sense for the FFT variant take `&dyn
//! FftEarModel` directly, so no dynamic type query is ever needed.

/// Per-frame, per-channel outputs common to every ear-model variant.
pub trait EarModel {
    /// Number of critical bands, `Z`.
    fn band_count(&self) -> usize;

    /// Frame size in samples, `N`.
    fn frame_size(&self) -> usize;

    /// Time-invariant per-band internal hearing-threshold noise.
    fn internal_noise(&self, k: usize) -> f64;

    /// Linear-domain excitation pattern, length `Z`.
    fn excitation(&self) -> &[f64];
}

/// FFT-ear-model-only outputs needed by Bandwidth, NMR and EHS.
pub trait FftEarModel: EarModel {
    /// Unweighted power spectrum, length `N/2 + 1`.
    fn power_spectrum(&self) -> &[f64];

    /// Outer/middle-ear-weighted power spectrum, length `N/2 + 1`.
    fn weighted_power_spectrum(&self) -> &[f64];

    /// Groups a `N/2+1`-bin spectrum into `Z` critical-band powers, using
    /// the same grouping weights the ear model uses internally.
    fn group_into_bands(&self, spectrum: &[f64]) -> Vec<f64>;

    /// Time-invariant per-band masking offset.
    fn masking_difference(&self) -> &[f64];

    /// Whether this frame's energy exceeded the activity threshold.
    fn is_energy_threshold_reached(&self) -> bool;
}

/// The modulation processor's per-frame outputs for one channel.
pub trait ModulationProcessor {
    /// Modulation pattern, length `Z`, non-negative.
    fn modulation(&self) -> &[f64];

    /// Low-passed excitation used for temporal weighting, length `Z`.
    fn average_loudness(&self) -> &[f64];
}

/// The level adapter's per-frame outputs for a reference/test pair.
pub trait LevelAdapter {
    /// Spectrally level-adapted reference pattern, length `Z`.
    fn adapted_ref(&self) -> &[f64];

    /// Spectrally level-adapted test pattern, length `Z`.
    fn adapted_test(&self) -> &[f64];
}
