//! Model Output Variable kernels and ear-model contracts for the ITU-R
//! BS.1387 PEAQ basic version.
//!
//! Ported from `movs.c` and `movaccum.h` in the GstPEAQ reference
//! implementation. The ear model, modulation processor and level adapter
//! are external collaborators: this crate defines their contracts in
//! [`contracts`] and consumes them through `&dyn` references, never owns
//! or constructs one.

pub mod contracts;
pub mod kernels;
pub mod orchestration;

pub use orchestration::{MovSet, MovValues};
