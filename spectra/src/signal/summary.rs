//! Bounded single-pass spectrum summary.
//!
//! Keeps the `K` largest bin magnitudes seen so far in an unsorted tracker and
//! accumulates an order-sensitive checksum of `sqrt(|X[k]|)` over every bin.
//! The spectrum is never sorted and every bin is visited exactly once.

use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use crate::signal::traits::SpectrumSummary1D;
use core::cmp::Ordering;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use spectra_core::Complex;

/// Result of summarizing one spectrum.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpectrumSummary {
    /// The `K` largest magnitudes in tracker slot order (not sorted).
    pub top: Vec<f64>,
    /// Running sum of `sqrt(magnitude)` in traversal order.
    pub checksum: f64,
}

/// Fixed-size tracker of the largest magnitudes observed so far.
///
/// Slots start at `0.0` and carry no ordering. Each observation replaces the
/// smallest slot (lowest index on ties) when strictly greater than it.
#[derive(Debug, Clone, PartialEq)]
pub struct TopMagnitudes {
    slots: Vec<f64>,
}

impl TopMagnitudes {
    /// Create a tracker with `bins` zeroed slots.
    pub fn new(bins: usize) -> Self {
        Self {
            slots: vec![0.0; bins],
        }
    }

    /// Offer magnitude `m`, returning the index of the slot it replaced.
    pub fn observe(&mut self, m: f64) -> Option<usize> {
        let (idx, min) = self.min_slot()?;
        if m > min {
            self.slots[idx] = m;
            Some(idx)
        } else {
            None
        }
    }

    /// Index and value of the smallest slot, first one on ties.
    fn min_slot(&self) -> Option<(usize, f64)> {
        self.slots
            .iter()
            .position_min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|idx| (idx, self.slots[idx]))
    }

    /// Current slot values.
    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }

    /// Consume the tracker, returning its slots.
    pub fn into_vec(self) -> Vec<f64> {
        self.slots
    }
}

/// Order-sensitive running sum of `sqrt(magnitude)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpectrumChecksum {
    value: f64,
}

impl SpectrumChecksum {
    /// Fold magnitude `m` into the sum.
    #[inline]
    pub fn add(&mut self, m: f64) {
        self.value += m.sqrt();
    }

    /// Current sum.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Constructor config for [`SpectrumSummaryKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumSummaryConfig {
    /// Number of tracker slots `K`.
    pub bins: usize,
}

/// Trait-first top-K magnitude and checksum summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumSummaryKernel {
    bins: usize,
}

impl SpectrumSummaryKernel {
    /// Return configured number of tracker slots.
    pub fn bins(&self) -> usize {
        self.bins
    }

    fn scan(&self, spectrum: &[Complex]) -> (TopMagnitudes, SpectrumChecksum) {
        let mut top = TopMagnitudes::new(self.bins);
        let mut checksum = SpectrumChecksum::default();
        for bin in spectrum {
            let m = bin.magnitude();
            checksum.add(m);
            top.observe(m);
        }
        (top, checksum)
    }
}

impl KernelLifecycle for SpectrumSummaryKernel {
    type Config = SpectrumSummaryConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.bins == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "bins",
                reason: "bin count must be greater than zero",
            });
        }
        Ok(Self { bins: config.bins })
    }
}

impl SpectrumSummary1D<Complex> for SpectrumSummaryKernel {
    fn run_into<I, O>(&self, input: &I, top: &mut O) -> Result<f64, ExecInvariantViolation>
    where
        I: Read1D<Complex> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let top = top.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if top.len() != self.bins {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "top",
                expected: self.bins,
                got: top.len(),
            });
        }
        let (tracker, checksum) = self.scan(input);
        top.copy_from_slice(tracker.as_slice());
        Ok(checksum.value())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<SpectrumSummary, ExecInvariantViolation>
    where
        I: Read1D<Complex> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let (tracker, checksum) = self.scan(input);
        Ok(SpectrumSummary {
            top: tracker.into_vec(),
            checksum: checksum.value(),
        })
    }
}

/// Summarize `spectrum` into `bins` top magnitudes and a checksum.
///
/// # Examples
/// ```
/// use spectra::signal::summary::summarize;
/// use spectra_core::Complex;
///
/// let spectrum = [Complex::new(3., 4.), Complex::new(0., 1.), Complex::new(6., 8.)];
/// let summary = summarize(&spectrum, 2).unwrap();
/// assert_eq!(summary.top, vec![5., 10.]);
/// ```
pub fn summarize(spectrum: &[Complex], bins: usize) -> crate::Result<SpectrumSummary> {
    let kernel = SpectrumSummaryKernel::try_new(SpectrumSummaryConfig { bins })?;
    Ok(kernel.run_alloc(spectrum)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn duplicates_fill_first_k_slots_only() {
        let mut top = TopMagnitudes::new(5);
        for i in 0..20 {
            let replaced = top.observe(1.0);
            if i < 5 {
                assert_eq!(replaced, Some(i));
            } else {
                assert_eq!(replaced, None);
            }
        }
        assert_eq!(top.as_slice(), &[1.0; 5]);
    }

    #[test]
    fn fewer_bins_than_slots_leaves_zeros() {
        let spectrum = [Complex::new(2.0, 0.0), Complex::new(0.0, 3.0), Complex::new(1.0, 0.0)];
        let summary = summarize(&spectrum, 10).expect("valid bins");
        assert_eq!(&summary.top[..3], &[2.0, 3.0, 1.0]);
        assert!(summary.top[3..].iter().all(|v| *v == 0.0));
        assert_eq!(summary.top.iter().filter(|v| **v != 0.0).count(), 3);
    }

    #[test]
    fn smallest_slot_is_replaced_lowest_index_first() {
        let mut top = TopMagnitudes::new(3);
        top.observe(5.0);
        top.observe(2.0);
        top.observe(2.0);
        assert_eq!(top.as_slice(), &[5.0, 2.0, 2.0]);
        assert_eq!(top.observe(3.0), Some(1));
        assert_eq!(top.as_slice(), &[5.0, 3.0, 2.0]);
        assert_eq!(top.observe(2.0), None);
        assert_eq!(top.observe(4.0), Some(2));
        assert_eq!(top.as_slice(), &[5.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_magnitudes_never_displace_initial_slots() {
        let mut top = TopMagnitudes::new(2);
        assert_eq!(top.observe(0.0), None);
        assert_eq!(top.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn nan_is_rejected_by_tracker_but_reaches_checksum() {
        let spectrum = [Complex::new(f64::NAN, 0.0), Complex::new(1.0, 0.0)];
        let summary = summarize(&spectrum, 2).expect("valid bins");
        assert_eq!(summary.top, vec![1.0, 0.0]);
        assert!(summary.checksum.is_nan());
    }

    #[test]
    fn checksum_sums_root_magnitudes_in_order() {
        let spectrum = [Complex::new(3.0, 4.0), Complex::new(0.0, 9.0), Complex::new(16.0, 0.0)];
        let summary = summarize(&spectrum, 1).expect("valid bins");
        assert_abs_diff_eq!(summary.checksum, 5f64.sqrt() + 3.0 + 4.0, epsilon = 1e-15);
        assert_eq!(summary.top, vec![16.0]);
    }

    #[test]
    fn run_into_checks_tracker_length() {
        let kernel =
            SpectrumSummaryKernel::try_new(SpectrumSummaryConfig { bins: 4 }).expect("valid");
        let spectrum = vec![Complex::ONE; 8];
        let mut top = vec![0.0; 3];
        let err = kernel
            .run_into(&spectrum, &mut top)
            .expect_err("mismatched tracker length");
        assert!(matches!(err, ExecInvariantViolation::LengthMismatch { arg: "top", .. }));

        let mut top = vec![0.0; 4];
        let checksum = kernel.run_into(&spectrum, &mut top).expect("run");
        assert_eq!(checksum, 8.0);
        assert_eq!(top, vec![1.0; 4]);
    }

    #[test]
    fn zero_bins_is_rejected() {
        assert!(matches!(
            summarize(&[Complex::ONE], 0),
            Err(crate::Error::InvalidArg { .. })
        ));
    }
}
