//! Signal generation, transform and spectrum summary.

pub mod fft;
pub mod summary;
pub mod traits;
pub mod wave;
