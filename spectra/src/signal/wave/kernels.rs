//! Trait-first kernels for deterministic test-signal generation.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use crate::signal::traits::{SignalGenerate1D, UnitImpulse1D};
use core::f64::consts::PI;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use spectra_core::Complex;

/// Periodic shape of a [`Harmonic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicShape {
    /// `sin(θ)`
    #[default]
    Sine,
    /// `cos(θ)`
    Cosine,
}

/// One term of a harmonic mix: `amplitude · shape(2π·cycles·i/len)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    /// Whole periods across the signal length.
    pub cycles: u32,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Periodic shape.
    #[serde(default)]
    pub shape: HarmonicShape,
}

impl Harmonic {
    /// Sine term.
    pub const fn sine(cycles: u32, amplitude: f64) -> Self {
        Self {
            cycles,
            amplitude,
            shape: HarmonicShape::Sine,
        }
    }

    /// Cosine term.
    pub const fn cosine(cycles: u32, amplitude: f64) -> Self {
        Self {
            cycles,
            amplitude,
            shape: HarmonicShape::Cosine,
        }
    }

    #[inline]
    fn sample(&self, i: usize, len: usize) -> f64 {
        let theta = 2.0 * self.cycles as f64 * PI * i as f64 / len as f64;
        let wave = match self.shape {
            HarmonicShape::Sine => theta.sin(),
            HarmonicShape::Cosine => theta.cos(),
        };
        self.amplitude * wave
    }
}

/// The benchmark mix
/// `sin(2πi/N) + 0.5·sin(4πi/N) + 0.25·cos(6πi/N) + 0.125·sin(8πi/N)`.
pub const DEFAULT_HARMONICS: [Harmonic; 4] = [
    Harmonic::sine(1, 1.0),
    Harmonic::sine(2, 0.5),
    Harmonic::cosine(3, 0.25),
    Harmonic::sine(4, 0.125),
];

/// Constructor config for [`HarmonicSignalKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicSignalConfig {
    /// Number of output samples.
    pub len: usize,
    /// Terms summed left to right into every sample.
    pub harmonics: Vec<Harmonic>,
}

impl Default for HarmonicSignalConfig {
    fn default() -> Self {
        Self {
            len: 4096,
            harmonics: DEFAULT_HARMONICS.to_vec(),
        }
    }
}

/// Trait-first generator of a real multi-harmonic signal as complex samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicSignalKernel {
    len: usize,
    harmonics: Vec<Harmonic>,
}

impl HarmonicSignalKernel {
    /// Return configured signal length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return whether the configured signal is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return configured harmonic mix.
    pub fn harmonics(&self) -> &[Harmonic] {
        &self.harmonics
    }

    fn sample(&self, i: usize) -> Complex {
        let mut terms = self.harmonics.iter().map(|h| h.sample(i, self.len));
        let first = terms.next().unwrap_or(0.0);
        Complex::from_real(terms.fold(first, |acc, v| acc + v))
    }
}

impl KernelLifecycle for HarmonicSignalKernel {
    type Config = HarmonicSignalConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.harmonics.is_empty() {
            return Err(ConfigError::EmptyInput { arg: "harmonics" });
        }
        if config.harmonics.iter().any(|h| !h.amplitude.is_finite()) {
            return Err(ConfigError::InvalidArgument {
                arg: "harmonics",
                reason: "harmonic amplitudes must be finite",
            });
        }
        Ok(Self {
            len: config.len,
            harmonics: config.harmonics,
        })
    }
}

impl SignalGenerate1D<Complex> for HarmonicSignalKernel {
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<Complex> + ?Sized,
    {
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out.len() != self.len {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.len,
                got: out.len(),
            });
        }
        out.iter_mut()
            .enumerate()
            .for_each(|(i, out)| *out = self.sample(i));
        Ok(())
    }

    fn run_alloc(&self) -> Result<Vec<Complex>, ExecInvariantViolation> {
        Ok((0..self.len).map(|i| self.sample(i)).collect())
    }
}

/// Constructor config for [`UnitImpulseKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitImpulseConfig {
    /// Number of output samples.
    pub len: usize,
    /// Index at which the impulse is set to one.
    pub idx: usize,
}

/// Trait-first 1D unit-impulse generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitImpulseKernel {
    len: usize,
    idx: usize,
}

impl UnitImpulseKernel {
    /// Return configured impulse length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return whether configured impulse length is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return configured impulse index.
    pub fn idx(&self) -> usize {
        self.idx
    }
}

impl KernelLifecycle for UnitImpulseKernel {
    type Config = UnitImpulseConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.len == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "len",
                reason: "impulse length must be > 0",
            });
        }
        if config.idx >= config.len {
            return Err(ConfigError::InvalidArgument {
                arg: "idx",
                reason: "impulse index must be within [0, len)",
            });
        }
        Ok(Self {
            len: config.len,
            idx: config.idx,
        })
    }
}

impl<T> UnitImpulse1D<T> for UnitImpulseKernel
where
    T: Zero + One + Copy,
{
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized,
    {
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out.len() != self.len {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.len,
                got: out.len(),
            });
        }
        out.fill(T::zero());
        out[self.idx] = T::one();
        Ok(())
    }

    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation> {
        let mut out = vec![T::zero(); self.len];
        out[self.idx] = T::one();
        Ok(out)
    }
}
