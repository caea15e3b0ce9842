//! The seven per-frame MOV kernels.

mod bandwidth;
mod detection_probability;
mod ehs;
mod modulation_difference;
mod nmr;
mod noise_loudness;

pub use bandwidth::bandwidth;
pub use detection_probability::detection_probability;
pub use ehs::EhsKernel;
pub use modulation_difference::modulation_difference;
pub use nmr::nmr;
pub use noise_loudness::{avg_lin_dist, rms_noise_loud_asym, rms_noise_loudness};
