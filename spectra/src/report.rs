//! Generator → transform → summary pipeline and its printable report.

use crate::kernel::KernelLifecycle;
use crate::signal::fft::{FftConfig, FftKernel, FftStrategy};
use crate::signal::summary::{SpectrumSummaryConfig, SpectrumSummaryKernel};
use crate::signal::traits::{Fft1D, SignalGenerate1D, SpectrumSummary1D};
use crate::signal::wave::{Harmonic, HarmonicSignalConfig, HarmonicSignalKernel, DEFAULT_HARMONICS};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Default transform length.
pub const DEFAULT_SIZE: usize = 4096;
/// Default number of reported magnitudes.
pub const DEFAULT_BINS: usize = 10;

/// Inputs of one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Signal and transform length `N`.
    pub size: usize,
    /// Number of tracked magnitudes `K`.
    pub bins: usize,
    /// Harmonic mix of the generated signal.
    pub harmonics: Vec<Harmonic>,
    /// Transform evaluation order.
    pub strategy: FftStrategy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            bins: DEFAULT_BINS,
            harmonics: DEFAULT_HARMONICS.to_vec(),
            strategy: FftStrategy::Recursive,
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumReport {
    /// Transform length.
    pub size: usize,
    /// Top magnitudes in tracker slot order.
    pub top: Vec<f64>,
    /// Order-sensitive spectrum checksum.
    pub checksum: f64,
}

impl fmt::Display for SpectrumReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FFT size: {}", self.size)?;
        writeln!(f, "Top frequency magnitudes:")?;
        for (i, v) in self.top.iter().enumerate() {
            writeln!(f, "  {i}: {v:.6}")?;
        }
        writeln!(f, "Spectrum checksum: {:.6}", self.checksum)
    }
}

/// Run generator, transform and summarizer for `config`.
///
/// Every kernel is validated before the signal is generated, so an invalid
/// size or bin count fails without doing any numeric work.
///
/// # Errors
/// [`Error::InvalidInputSize`](crate::Error::InvalidInputSize) when
/// `config.size` is not a power of two, [`Error::InvalidArg`](crate::Error::InvalidArg)
/// for a zero bin count or an unusable harmonic mix.
pub fn run_report(config: &ReportConfig) -> crate::Result<SpectrumReport> {
    let fft = FftKernel::try_new(FftConfig {
        len: config.size,
        strategy: config.strategy,
    })?;
    let summary = SpectrumSummaryKernel::try_new(SpectrumSummaryConfig { bins: config.bins })?;
    let generator = HarmonicSignalKernel::try_new(HarmonicSignalConfig {
        len: config.size,
        harmonics: config.harmonics.clone(),
    })?;

    let signal = generator.run_alloc()?;
    tracing::debug!(len = signal.len(), "signal generated");
    let spectrum = fft.run_alloc(&signal)?;
    tracing::debug!(strategy = %config.strategy, "spectrum computed");
    let summary = summary.run_alloc(&spectrum)?;
    tracing::debug!(bins = config.bins, checksum = summary.checksum, "spectrum summarized");

    Ok(SpectrumReport {
        size: config.size,
        top: summary.top,
        checksum: summary.checksum,
    })
}
