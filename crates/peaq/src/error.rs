//! Errors raised at the orchestration boundary.
//!
//! The MOV kernels themselves never return a `Result` (contract
//! violations panic; degenerate numerics have explicit, non-error
//! results — see `peaq_movs`). This crate's `Error` only covers what the
//! facade can detect before calling into the kernels at all: mismatched
//! configuration.

use thiserror::Error;

/// Errors a [`crate::Comparison`] can return when it cannot be
/// constructed or driven as configured.
#[derive(Debug, Error)]
pub enum Error {
    /// [`crate::Config::channels`] was zero.
    #[error("channel count must be positive")]
    ZeroChannels,

    /// A caller-supplied slice did not have the expected length for the
    /// configured channel count or band count.
    #[error("expected {expected} channels/bands, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
