//! Top-level configuration for a PEAQ comparison.

/// Configuration for one reference/test [`crate::Comparison`].
///
/// ```
/// use peaq::config::{Config, EarModelKind};
///
/// let config = Config::default();
/// assert_eq!(config.channels, 1);
/// assert_eq!(config.ear_model, EarModelKind::Fft);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of audio channels being compared (1 for mono, 2 for
    /// stereo).
    pub channels: usize,

    /// Which ear-model variant supplies this comparison's per-frame
    /// inputs. Determines which MOVs can be computed: see
    /// [`MovSelection`].
    pub ear_model: EarModelKind,

    /// Which basic-version MOVs to compute. Defaults to every MOV the
    /// configured ear model can support.
    pub which_movs: MovSelection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channels: 1,
            ear_model: EarModelKind::Fft,
            which_movs: MovSelection::default(),
        }
    }
}

/// Which psychoacoustic ear model supplies this comparison's per-frame
/// outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EarModelKind {
    /// The FFT-based critical-band model (BS.1387's basic version). The
    /// only variant this crate implements; supports every basic-version
    /// MOV.
    #[default]
    Fft,
    /// The filter-bank-based model (BS.1387's advanced version).
    /// Unimplemented: a [`crate::Comparison`] configured with this kind
    /// cannot compute the FFT-only MOVs (Bandwidth, NMR, EHS), and its
    /// ear model must not be asked for `power_spectrum`/
    /// `weighted_power_spectrum`.
    FilterBank,
}

/// Selects which basic-version MOVs a [`crate::Comparison`] computes.
///
/// Bandwidth, NMR (and Relative Disturbed Frames) and EHS require
/// FFT-ear-model outputs (spec.md §6); a caller using the (unimplemented)
/// filter-bank ear model should disable them rather than feed kernels
/// data the model cannot supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovSelection {
    pub modulation_difference: bool,
    pub noise_loudness: bool,
    pub bandwidth: bool,
    pub nmr: bool,
    pub detection_probability: bool,
    pub ehs: bool,
}

impl Default for MovSelection {
    fn default() -> Self {
        Self {
            modulation_difference: true,
            noise_loudness: true,
            bandwidth: true,
            nmr: true,
            detection_probability: true,
            ehs: true,
        }
    }
}

impl MovSelection {
    /// The subset of MOVs computable without FFT-ear-model outputs.
    pub fn fft_only_disabled() -> Self {
        Self {
            modulation_difference: true,
            noise_loudness: true,
            bandwidth: false,
            nmr: false,
            detection_probability: true,
            ehs: false,
        }
    }
}
