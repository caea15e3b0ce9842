//! Model Output Variable accumulator.
//!
//! Folds a per-channel time series of `(value, weight)` pairs into a single
//! scalar per channel according to one of seven reduction modes, then
//! reduces across channels. Ported from `movaccum.h`/`movaccum.c` in the
//! GstPEAQ reference implementation.
//!
//! Contract violations (accumulating before configuration, or an
//! out-of-range channel index) panic rather than return a `Result`: they
//! are programmer errors, not recoverable runtime conditions.

use std::collections::VecDeque;

/// Reduction mode selecting both the per-channel formula and the
/// cross-channel aggregation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovAccumMode {
    /// `Σ wᵢxᵢ / Σ wᵢ`, averaged across channels.
    Avg,
    /// `10·log₁₀(Σ wᵢxᵢ / Σ wᵢ)`, averaged across channels.
    AvgLog,
    /// `√(Σ wᵢ²xᵢ² / Σ wᵢ²)`, averaged across channels.
    Rms,
    /// `√(Σxᵢ²/N) + ½·√(Σwᵢ²/N)`, averaged across channels.
    RmsAsym,
    /// Windowed RMS of a sliding 4-tap average of `√x`, averaged across channels.
    AvgWindow,
    /// IIR running max, channel 0 only.
    FilteredMax,
    /// Average Distorted Block measure, channel 0 only.
    Adb,
}

impl MovAccumMode {
    fn channel_reduced(self) -> bool {
        matches!(self, Self::FilteredMax | Self::Adb)
    }
}

#[derive(Debug, Clone)]
struct ChannelState {
    // AVG / AVG_LOG
    sum_wx: f64,
    sum_w: f64,
    // RMS
    sum_w2x2: f64,
    sum_w2: f64,
    // RMS_ASYM (reuses sum_w2 above for Σwᵢ²)
    sum_x2: f64,
    count: u64,
    // AVG_WINDOW
    window: VecDeque<f64>,
    sum_pow4: f64,
    window_count: u64,
    // FILTERED_MAX
    y: f64,
    max: f64,
    touched: bool,
}

impl ChannelState {
    fn new() -> Self {
        Self {
            sum_wx: 0.0,
            sum_w: 0.0,
            sum_w2x2: 0.0,
            sum_w2: 0.0,
            sum_x2: 0.0,
            count: 0,
            window: VecDeque::with_capacity(3),
            sum_pow4: 0.0,
            window_count: 0,
            y: 0.0,
            max: 0.0,
            touched: false,
        }
    }

    fn accumulate(&mut self, mode: MovAccumMode, x: f64, w: f64) {
        debug_assert!(w >= 0.0, "accumulator weights must be non-negative");
        debug_assert!(x.is_finite() && w.is_finite(), "accumulator inputs must be finite");
        self.touched = true;
        match mode {
            MovAccumMode::Avg | MovAccumMode::AvgLog | MovAccumMode::Adb => {
                self.sum_wx += w * x;
                self.sum_w += w;
            }
            MovAccumMode::Rms => {
                self.sum_w2x2 += w * w * x * x;
                self.sum_w2 += w * w;
            }
            MovAccumMode::RmsAsym => {
                self.sum_x2 += x * x;
                self.sum_w2 += w * w;
                self.count += 1;
            }
            MovAccumMode::AvgWindow => {
                let sqrt_x = x.sqrt();
                // Window is valid once three priors have accumulated (the
                // 4th call onward); the FIFO always holds min(i, 3) priors.
                if self.window.len() == 3 {
                    let sum: f64 = self.window.iter().copied().sum::<f64>() + sqrt_x;
                    let term = (sum / 4.0).powi(4);
                    self.sum_pow4 += term;
                    self.window_count += 1;
                }
                self.window.push_back(sqrt_x);
                if self.window.len() > 3 {
                    self.window.pop_front();
                }
            }
            MovAccumMode::FilteredMax => {
                self.y = 0.9 * self.y + 0.1 * x;
                if self.y > self.max || self.count == 0 {
                    self.max = self.y;
                }
                self.count += 1;
            }
        }
    }

    fn value(&self, mode: MovAccumMode) -> f64 {
        match mode {
            MovAccumMode::Avg => {
                if self.sum_w == 0.0 {
                    0.0
                } else {
                    self.sum_wx / self.sum_w
                }
            }
            MovAccumMode::AvgLog => {
                if self.sum_w == 0.0 {
                    0.0
                } else {
                    10.0 * (self.sum_wx / self.sum_w).log10()
                }
            }
            MovAccumMode::Rms => {
                if self.sum_w2 == 0.0 {
                    0.0
                } else {
                    (self.sum_w2x2 / self.sum_w2).sqrt()
                }
            }
            MovAccumMode::RmsAsym => {
                if self.count == 0 {
                    0.0
                } else {
                    let n = self.count as f64;
                    (self.sum_x2 / n).sqrt() + 0.5 * (self.sum_w2 / n).sqrt()
                }
            }
            MovAccumMode::AvgWindow => {
                if self.window_count == 0 {
                    0.0
                } else {
                    (self.sum_pow4 / self.window_count as f64).sqrt()
                }
            }
            MovAccumMode::FilteredMax => self.max,
            MovAccumMode::Adb => {
                if self.sum_w == 0.0 {
                    0.0
                } else if self.sum_wx == 0.0 {
                    -0.5
                } else {
                    (self.sum_wx / self.sum_w).log10()
                }
            }
        }
    }
}

/// A single Model Output Variable accumulator.
///
/// Must be configured with [`MovAccumulator::set_channels`] and
/// [`MovAccumulator::set_mode`] before the first call to
/// [`MovAccumulator::accumulate`].
#[derive(Debug)]
pub struct MovAccumulator {
    mode: Option<MovAccumMode>,
    channels: Option<usize>,
    committed: Vec<ChannelState>,
    shadow: Vec<ChannelState>,
    tentative: bool,
    started: bool,
}

impl Default for MovAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MovAccumulator {
    /// Creates an empty, unconfigured accumulator.
    pub fn new() -> Self {
        Self {
            mode: None,
            channels: None,
            committed: Vec::new(),
            shadow: Vec::new(),
            tentative: false,
            started: false,
        }
    }

    /// Fixes the channel count and allocates per-channel state.
    ///
    /// # Panics
    /// Panics if called after the first [`accumulate`](Self::accumulate).
    pub fn set_channels(&mut self, channels: usize) {
        assert!(
            !self.started,
            "set_channels called after accumulation began"
        );
        assert!(channels > 0, "channel count must be positive");
        self.channels = Some(channels);
        self.committed = (0..channels).map(|_| ChannelState::new()).collect();
        self.shadow = self.committed.clone();
    }

    /// Sets the reduction mode. Must be called before the first
    /// [`accumulate`](Self::accumulate).
    pub fn set_mode(&mut self, mode: MovAccumMode) {
        assert!(!self.started, "set_mode called after accumulation began");
        self.mode = Some(mode);
    }

    /// Returns the configured mode, if any.
    pub fn mode(&self) -> Option<MovAccumMode> {
        self.mode
    }

    /// Toggles provisional ("tentative") accumulation.
    ///
    /// Enabling tentative mode resets the shadow state from the committed
    /// state (discarding any previously staged, uncommitted accumulations).
    /// Disabling it promotes the shadow state into the committed state.
    pub fn set_tentative(&mut self, tentative: bool) {
        if tentative {
            self.shadow.clone_from(&self.committed);
        } else if self.tentative {
            self.committed.clone_from(&self.shadow);
        }
        self.tentative = tentative;
    }

    /// Folds sample `(x, w)` into channel `c`.
    ///
    /// # Panics
    /// Panics if called before [`set_channels`](Self::set_channels) or
    /// [`set_mode`](Self::set_mode), or if `c` is out of range.
    pub fn accumulate(&mut self, c: usize, x: f64, w: f64) {
        let mode = self.mode.expect("accumulate called before set_mode");
        let channels = self
            .channels
            .expect("accumulate called before set_channels");
        assert!(c < channels, "channel index {c} out of range (0..{channels})");
        self.started = true;
        let state = if self.tentative {
            &mut self.shadow[c]
        } else {
            &mut self.committed[c]
        };
        state.accumulate(mode, x, w);
    }

    /// Returns the aggregated scalar across all channels. Pure: never
    /// mutates state and may be called any number of times.
    ///
    /// Reflects committed state only; staged (tentative) accumulations are
    /// not visible until [`set_tentative(false)`](Self::set_tentative)
    /// promotes them.
    pub fn get_value(&self) -> f64 {
        let mode = self.mode.expect("get_value called before set_mode");
        if self.committed.is_empty() {
            return 0.0;
        }
        if mode.channel_reduced() {
            self.committed[0].value(mode)
        } else {
            let sum: f64 = self.committed.iter().map(|s| s.value(mode)).sum();
            sum / self.committed.len() as f64
        }
    }
}
