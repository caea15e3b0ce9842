#![doc = include_str!("../README.md")]

pub mod comparison;
pub mod config;
pub mod error;

pub use comparison::Comparison;
pub use config::Config;
pub use error::Error;
pub use peaq_movs::MovValues;
