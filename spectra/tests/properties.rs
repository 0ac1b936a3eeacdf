use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::FftPlanner;
use spectra::kernel::KernelLifecycle;
use spectra::report::{run_report, ReportConfig};
use spectra::signal::fft::{fft, fft_with, FftConfig, FftKernel, FftStrategy};
use spectra::signal::summary::{summarize, TopMagnitudes};
use spectra::signal::traits::Fft1D;
use spectra::signal::wave::{harmonic_signal, unit_impulse};
use spectra::{Complex, Error};

fn random_signal(rng: &mut StdRng, n: usize) -> Vec<Complex> {
    (0..n)
        .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect()
}

/// `|a - b| <= 1e-9 · max(|a|, |b|)`, with an absolute floor for values near zero.
fn assert_component_close(a: f64, b: f64) {
    assert_relative_eq!(a, b, max_relative = 1e-9, epsilon = 1e-9);
}

#[test]
fn impulse_transforms_to_flat_unit_spectrum() {
    for n in [1usize, 2, 4, 8, 64] {
        let x = unit_impulse(n, 0).expect("valid impulse");
        for strategy in [FftStrategy::Recursive, FftStrategy::Iterative] {
            let y = fft_with(&x, strategy).expect("power of two");
            assert_eq!(y.len(), n);
            for bin in &y {
                assert_abs_diff_eq!(bin.magnitude(), 1.0, epsilon = 1e-15);
                assert_abs_diff_eq!(bin.arg(), 0.0, epsilon = 1e-15);
            }
        }
    }
}

#[test]
fn transform_is_linear() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let n = 512;
    let x = random_signal(&mut rng, n);
    let y = random_signal(&mut rng, n);
    let (a, b) = (1.75, -0.6);

    let mixed: Vec<Complex> = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| xi.scale(a).add(yi.scale(b)))
        .collect();

    let lhs = fft(&mixed).expect("power of two");
    let fx = fft(&x).expect("power of two");
    let fy = fft(&y).expect("power of two");
    for ((l, px), py) in lhs.iter().zip(fx.iter()).zip(fy.iter()) {
        let rhs = px.scale(a).add(py.scale(b));
        assert_component_close(l.re, rhs.re);
        assert_component_close(l.im, rhs.im);
    }
}

#[test]
fn parseval_energy_is_preserved() {
    let mut rng = StdRng::seed_from_u64(256);
    let n = 256;
    let x = random_signal(&mut rng, n);
    let y = fft(&x).expect("power of two");

    let time_energy: f64 = x.iter().map(|v| v.norm_sqr()).sum();
    let freq_energy: f64 = y.iter().map(|v| v.norm_sqr()).sum::<f64>() / n as f64;
    assert_relative_eq!(time_energy, freq_energy, max_relative = 1e-6);
}

#[test]
fn non_power_of_two_lengths_are_rejected() {
    for len in [0usize, 3, 5, 6, 100] {
        let x = vec![Complex::ONE; len];
        let before = x.clone();
        assert_eq!(fft(&x), Err(Error::InvalidInputSize { len }));
        assert_eq!(x, before);
        assert_eq!(
            FftKernel::try_new(FftConfig {
                len,
                strategy: FftStrategy::Iterative,
            })
            .expect_err("invalid length")
            .to_string(),
            format!("Invalid input size on `len`: length {len} is not a power of two.")
        );
    }
}

#[test]
fn top_k_keeps_first_k_of_equal_magnitudes() {
    let units = [
        Complex::ONE,
        Complex::new(0.0, 1.0),
        Complex::new(-1.0, 0.0),
        Complex::new(0.0, -1.0),
    ];
    let spectrum: Vec<Complex> = (0..20).map(|i| units[i % 4]).collect();

    let mut tracker = TopMagnitudes::new(5);
    let mut frozen = None;
    for (i, bin) in spectrum.iter().enumerate() {
        tracker.observe(bin.magnitude());
        if i == 4 {
            frozen = Some(tracker.clone());
        }
    }
    assert_eq!(Some(tracker.clone()), frozen);
    assert_eq!(tracker.as_slice(), &[1.0; 5]);

    let summary = summarize(&spectrum, 5).expect("valid bins");
    assert_eq!(summary.top, tracker.into_vec());
}

#[test]
fn top_k_larger_than_spectrum_leaves_zero_slots() {
    let spectrum = [
        Complex::new(0.0, 2.0),
        Complex::new(3.0, 4.0),
        Complex::new(-1.0, 0.0),
    ];
    let summary = summarize(&spectrum, 10).expect("valid bins");
    assert_eq!(summary.top.len(), 10);
    assert_eq!(summary.top.iter().filter(|m| **m != 0.0).count(), 3);
    assert_eq!(&summary.top[..3], &[2.0, 5.0, 1.0]);
    assert_eq!(summary.top.iter().filter(|m| **m == 0.0).count(), 7);
}

#[test]
fn full_pipeline_is_deterministic() {
    let config = ReportConfig::default();
    let first = run_report(&config).expect("default config").to_string();
    let second = run_report(&config).expect("default config").to_string();
    assert_eq!(first, second);
    assert!(first.starts_with("FFT size: 4096\nTop frequency magnitudes:\n  0: "));
    assert!(first.contains("\n  9: "));
    assert!(first.lines().last().expect("lines").starts_with("Spectrum checksum: "));
    assert_eq!(first.lines().count(), 13);
}

#[test]
fn default_report_matches_reference_output() {
    let report = run_report(&ReportConfig::default()).expect("default config");
    assert_eq!(
        report.to_string(),
        "FFT size: 4096\n\
         Top frequency magnitudes:\n  \
         0: 2048.000000\n  \
         1: 2048.000000\n  \
         2: 1024.000000\n  \
         3: 512.000000\n  \
         4: 256.000000\n  \
         5: 512.000000\n  \
         6: 1024.000000\n  \
         7: 0.000000\n  \
         8: 0.000000\n  \
         9: 256.000000\n\
         Spectrum checksum: 231.764906\n"
    );
}

#[test]
fn conjugate_trick_inverts_the_transform() {
    let mut rng = StdRng::seed_from_u64(64);
    let n = 64;
    let x = random_signal(&mut rng, n);
    let spectrum = fft(&x).expect("power of two");

    let conjugated: Vec<Complex> = spectrum.iter().map(|v| v.conj()).collect();
    let recovered: Vec<Complex> = fft(&conjugated)
        .expect("power of two")
        .iter()
        .map(|v| v.conj().scale(1.0 / n as f64))
        .collect();
    for (orig, back) in x.iter().zip(recovered.iter()) {
        assert_abs_diff_eq!(orig.re, back.re, epsilon = 1e-12);
        assert_abs_diff_eq!(orig.im, back.im, epsilon = 1e-12);
    }
}

#[test]
fn default_report_finds_the_four_harmonics() {
    let report = run_report(&ReportConfig::default()).expect("default config");
    let n = 4096.0;
    let mut top = report.top.clone();
    top.sort_by(|a, b| b.total_cmp(a));
    // Each real harmonic of amplitude A shows up twice with magnitude A·N/2.
    let expected = [1.0, 1.0, 0.5, 0.5, 0.25, 0.25, 0.125, 0.125];
    for (got, amp) in top.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*got, amp * n / 2.0, epsilon = 1e-6);
    }
    assert!(top[8] < 1e-6);
}

#[test]
fn matches_rustfft_reference() {
    let x = harmonic_signal(1024).expect("default mix");
    let mut planner = FftPlanner::<f64>::new();
    let plan = planner.plan_fft_forward(x.len());
    let mut reference: Vec<num_complex::Complex<f64>> = x.iter().map(|c| (*c).into()).collect();
    plan.process(&mut reference);

    for strategy in [FftStrategy::Recursive, FftStrategy::Iterative] {
        let kernel = FftKernel::try_new(FftConfig {
            len: x.len(),
            strategy,
        })
        .expect("power of two");
        let y = kernel.run_alloc(&x).expect("run");
        for (ours, theirs) in y.iter().zip(reference.iter()) {
            assert_abs_diff_eq!(ours.re, theirs.re, epsilon = 1e-9);
            assert_abs_diff_eq!(ours.im, theirs.im, epsilon = 1e-9);
        }
    }
}
