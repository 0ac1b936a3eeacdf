//! Forward discrete Fourier transform for power-of-two lengths.
//!
//! Computes `X[k] = Σ x[n]·exp(-2πi·k·n/N)` with the radix-2 decimation in
//! time algorithm. Only power-of-two lengths are supported; anything else is
//! rejected before the transform touches memory.

use crate::error::Result;
use crate::kernel::KernelLifecycle;
use crate::signal::traits::Fft1D;
use spectra_core::Complex;

mod kernels;
pub use kernels::*;

/// Forward transform of `x` using the recursive strategy.
///
/// # Errors
/// [`Error::InvalidInputSize`](crate::Error::InvalidInputSize) when `x.len()` is
/// not a power of two (an empty slice included). No output is produced in
/// that case.
///
/// # Examples
/// ```
/// use spectra::signal::fft::fft;
/// use spectra_core::Complex;
///
/// let x = [Complex::ONE, Complex::ZERO, Complex::ZERO, Complex::ZERO];
/// let y = fft(&x).unwrap();
/// assert!(y.iter().all(|bin| *bin == Complex::ONE));
///
/// assert!(fft(&x[..3]).is_err());
/// ```
pub fn fft(x: &[Complex]) -> Result<Vec<Complex>> {
    fft_with(x, FftStrategy::Recursive)
}

/// Forward transform of `x` with an explicit evaluation `strategy`.
///
/// Both strategies agree to within floating point rounding; see
/// [`FftStrategy`].
pub fn fft_with(x: &[Complex], strategy: FftStrategy) -> Result<Vec<Complex>> {
    let kernel = FftKernel::try_new(FftConfig {
        len: x.len(),
        strategy,
    })?;
    Ok(kernel.run_alloc(x)?)
}
