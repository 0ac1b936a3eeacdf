//! Trait-first kernels for the radix-2 forward transform.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::Fft1D;
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};
use spectra_core::Complex;

/// Evaluation order used by [`FftKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FftStrategy {
    /// Top-down decimation in time over strided views of the input.
    ///
    /// Twiddle factors are recomputed with `sin`/`cos` at every combine step.
    #[default]
    Recursive,
    /// Bottom-up butterflies after a bit-reversal permutation, using a
    /// twiddle table built once at kernel construction.
    Iterative,
}

impl core::fmt::Display for FftStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftStrategy::Recursive => write!(f, "recursive"),
            FftStrategy::Iterative => write!(f, "iterative"),
        }
    }
}

impl core::str::FromStr for FftStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recursive" => Ok(FftStrategy::Recursive),
            "iterative" => Ok(FftStrategy::Iterative),
            _ => Err(ConfigError::InvalidArgument {
                arg: "strategy",
                reason: "expected `recursive` or `iterative`",
            }),
        }
    }
}

/// Constructor config for [`FftKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FftConfig {
    /// Transform length. Must be a power of two.
    pub len: usize,
    /// Evaluation order.
    pub strategy: FftStrategy,
}

/// Trait-first radix-2 Cooley–Tukey forward transform of a fixed length.
#[derive(Debug, Clone, PartialEq)]
pub struct FftKernel {
    len: usize,
    strategy: FftStrategy,
    /// `exp(-2πi·j/len)` for `j` in `[0, len/2)`. Empty for [`FftStrategy::Recursive`].
    twiddles: Vec<Complex>,
}

impl FftKernel {
    /// Return configured transform length.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return configured evaluation order.
    pub fn strategy(&self) -> FftStrategy {
        self.strategy
    }

    fn transform(&self, input: &[Complex], out: &mut [Complex]) {
        match self.strategy {
            FftStrategy::Recursive => recursive_strided(input, 0, 1, out),
            FftStrategy::Iterative => iterative_in_place(input, &self.twiddles, out),
        }
    }

    fn check_input<'a, I>(&self, input: &'a I) -> Result<&'a [Complex], ExecInvariantViolation>
    where
        I: Read1D<Complex> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        if input.len() != self.len {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "input",
                expected: self.len,
                got: input.len(),
            });
        }
        Ok(input)
    }
}

impl KernelLifecycle for FftKernel {
    type Config = FftConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.len.is_power_of_two() {
            return Err(ConfigError::InvalidInputSize {
                arg: "len",
                len: config.len,
            });
        }
        let twiddles = match config.strategy {
            FftStrategy::Recursive => Vec::new(),
            FftStrategy::Iterative => twiddle_table(config.len),
        };
        tracing::debug!(
            len = config.len,
            strategy = %config.strategy,
            "fft kernel constructed"
        );
        Ok(Self {
            len: config.len,
            strategy: config.strategy,
            twiddles,
        })
    }
}

impl Fft1D<Complex> for FftKernel {
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex> + ?Sized,
        O: Write1D<Complex> + ?Sized,
    {
        let input = self.check_input(input)?;
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
        self.transform(input, out);
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex>, ExecInvariantViolation>
    where
        I: Read1D<Complex> + ?Sized,
    {
        let input = self.check_input(input)?;
        let mut out = vec![Complex::ZERO; self.len];
        self.transform(input, &mut out);
        Ok(out)
    }
}

/// Twiddle for bin `k` of a length-`n` combine step.
#[inline]
fn twiddle(k: usize, n: usize) -> Complex {
    Complex::from_polar(1.0, -2.0 * PI * k as f64 / n as f64)
}

fn twiddle_table(n: usize) -> Vec<Complex> {
    (0..n / 2).map(|k| twiddle(k, n)).collect()
}

/// Transform the `out.len()` samples `input[offset], input[offset + stride], ...`
/// into `out`.
///
/// The even-index half lands in `out[..n/2]` and the odd-index half in
/// `out[n/2..]`, which are exactly the slots `X[k]` and `X[k + n/2]` the
/// butterfly writes back to.
fn recursive_strided(input: &[Complex], offset: usize, stride: usize, out: &mut [Complex]) {
    let n = out.len();
    if n == 1 {
        out[0] = input[offset];
        return;
    }

    let half = n / 2;
    let (even, odd) = out.split_at_mut(half);
    recursive_strided(input, offset, stride * 2, even);
    recursive_strided(input, offset + stride, stride * 2, odd);

    for k in 0..half {
        let t = twiddle(k, n).mul(odd[k]);
        let e = even[k];
        even[k] = e.add(t);
        odd[k] = e.sub(t);
    }
}

fn bit_reverse_copy(input: &[Complex], out: &mut [Complex]) {
    let n = out.len();
    let bits = n.trailing_zeros();
    if bits == 0 {
        out.copy_from_slice(input);
        return;
    }
    for (i, x) in input.iter().enumerate() {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        out[j] = *x;
    }
}

fn iterative_in_place(input: &[Complex], twiddles: &[Complex], out: &mut [Complex]) {
    let n = out.len();
    bit_reverse_copy(input, out);

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let step = n / size;
        for block in out.chunks_exact_mut(size) {
            let (even, odd) = block.split_at_mut(half);
            for k in 0..half {
                let t = twiddles[k * step].mul(odd[k]);
                let e = even[k];
                even[k] = e.add(t);
                odd[k] = e.sub(t);
            }
        }
        size *= 2;
    }
}
