//! Drives one reference/test comparison's MOV accumulation across frames.

use crate::config::Config;
use crate::error::Error;
use peaq_movs::{MovSet, MovValues};
use tracing::{debug, trace};

/// Owns the [`MovSet`] for one reference/test comparison and adds the
/// ambient concerns (validated construction, structured logging) the
/// bare `peaq-movs` accumulator set doesn't carry.
#[derive(Debug)]
pub struct Comparison {
    config: Config,
    movs: MovSet,
}

impl Comparison {
    /// Validates `config` and builds a fresh, empty comparison.
    pub fn new(config: Config) -> Result<Self, Error> {
        if config.channels == 0 {
            return Err(Error::ZeroChannels);
        }
        debug!(channels = config.channels, ear_model = ?config.ear_model, "starting PEAQ comparison");
        Ok(Self {
            config,
            movs: MovSet::new(config.channels),
        })
    }

    /// The configuration this comparison was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the underlying accumulator set, for driving the
    /// per-frame kernel calls directly (spec.md §4.3's orchestration
    /// contract: kernels may be invoked in any order within a frame).
    pub fn movs_mut(&mut self) -> &mut MovSet {
        &mut self.movs
    }

    /// Toggles provisional accumulation for the current frame across
    /// every MOV, logging the transition.
    pub fn set_tentative(&mut self, tentative: bool) {
        debug!(tentative, "toggling tentative frame state");
        self.movs.set_tentative(tentative);
    }

    /// Reads every accumulator once and returns the final MOV values.
    /// Does not mutate state; safe to call repeatedly, though it is
    /// normally called once at end-of-stream.
    pub fn finalize(&self) -> MovValues {
        let values = self.movs.finalize();
        trace!(?values, "finalized MOV readout");
        values
    }
}
