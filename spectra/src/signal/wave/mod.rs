//! Deterministic test signals fed to the transform.

use crate::kernel::KernelLifecycle;
use crate::signal::traits::{SignalGenerate1D, UnitImpulse1D};
use spectra_core::Complex;

mod kernels;
pub use kernels::*;

/// Return `len` samples of the default benchmark mix ([`DEFAULT_HARMONICS`]).
///
/// # Examples
/// ```
/// use spectra::signal::wave::harmonic_signal;
///
/// let x = harmonic_signal(8).unwrap();
/// assert_eq!(x.len(), 8);
/// assert!(x.iter().all(|v| v.im == 0.0));
/// ```
pub fn harmonic_signal(len: usize) -> crate::Result<Vec<Complex>> {
    harmonic_signal_with(len, &DEFAULT_HARMONICS)
}

/// Return `len` samples of an arbitrary harmonic mix.
pub fn harmonic_signal_with(len: usize, harmonics: &[Harmonic]) -> crate::Result<Vec<Complex>> {
    let kernel = HarmonicSignalKernel::try_new(HarmonicSignalConfig {
        len,
        harmonics: harmonics.to_vec(),
    })?;
    Ok(kernel.run_alloc()?)
}

/// Return a complex unit impulse (Kronecker delta) of length `len` at `idx`.
pub fn unit_impulse(len: usize, idx: usize) -> crate::Result<Vec<Complex>> {
    let kernel = UnitImpulseKernel::try_new(UnitImpulseConfig { len, idx })?;
    let out: Vec<Complex> = kernel.run_alloc()?;
    Ok(out)
}
