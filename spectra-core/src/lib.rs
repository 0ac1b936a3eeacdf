//! Numeric primitives shared by the `spectra` transform kernels.
//!
//! The only type exported today is [`Complex`], a double-precision complex
//! value with the handful of operations a radix-2 transform needs.

mod complex;

pub use complex::*;
