//! Radix-2 FFT engine with a bounded single-pass spectral summary.
//!
//! The crate is organised the same way as its kernels run:
//!
//! - [`signal::wave`] builds deterministic test signals,
//! - [`signal::fft`] computes the forward DFT of power-of-two length input,
//! - [`signal::summary`] tracks the `K` largest bin magnitudes and an
//!   order-sensitive checksum in one pass,
//! - [`report`] chains the three and renders the result.
//!
//! Every stage exists both as a validated kernel (`*Config` →
//! [`KernelLifecycle::try_new`](kernel::KernelLifecycle::try_new) →
//! `run_into`/`run_alloc`) and as a free function returning [`Result`].
//!
//! ```
//! use spectra::report::{run_report, ReportConfig};
//!
//! let report = run_report(&ReportConfig { size: 64, bins: 3, ..Default::default() }).unwrap();
//! assert_eq!(report.top.len(), 3);
//! print!("{report}");
//! ```

#![warn(missing_docs)]

mod error;
pub use error::*;

pub mod kernel;
pub mod logging;
pub mod report;
pub mod signal;

pub use spectra_core::Complex;
