//! Trait interfaces for signal-processing capabilities.
//!
//! These traits define the trait-first API shape shared by the transform,
//! summary and waveform kernels.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use crate::signal::summary::SpectrumSummary;

/// 1D forward discrete Fourier transform capability.
pub trait Fft1D<T> {
    /// Transform `input` into a caller-provided output buffer.
    ///
    /// `input` is never written to.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Transform `input` and allocate the spectrum.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Bounded single-pass spectrum summary capability.
pub trait SpectrumSummary1D<T> {
    /// Write the top magnitudes into `top` and return the traversal checksum.
    fn run_into<I, O>(&self, input: &I, top: &mut O) -> Result<f64, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<f64> + ?Sized;

    /// Summarize `input` and allocate the tracker.
    fn run_alloc<I>(&self, input: &I) -> Result<SpectrumSummary, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Deterministic 1D signal generation capability.
pub trait SignalGenerate1D<T> {
    /// Generate the signal into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate the signal and allocate output.
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}

/// 1D unit-impulse generation capability.
pub trait UnitImpulse1D<T> {
    /// Generate a unit impulse into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate a unit impulse and allocate output.
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}
