use anyhow::{anyhow, bail, Context, Result};
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use serde_json::json;
use spectra::kernel::KernelLifecycle;
use spectra::report::DEFAULT_BINS;
use spectra::signal::fft::{FftConfig, FftKernel, FftStrategy};
use spectra::signal::summary::summarize;
use spectra::signal::traits::Fft1D;
use spectra::signal::wave::{harmonic_signal, unit_impulse};
use spectra_core::Complex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const DEFAULT_PYTHON_BIN: &str = "python";

const PY_FFT_SCRIPT: &str = r#"
import json
import sys
import time
import numpy as np

env = json.loads(sys.stdin.read())
iters = int(env["iters"])
x = np.asarray([complex(s["re"], s["im"]) for s in env["signal"]], dtype=complex)

y = np.fft.fft(x)
t0 = time.perf_counter_ns()
for _ in range(iters):
    np.fft.fft(x)
t1 = time.perf_counter_ns()

print(json.dumps({
    "output": np.column_stack([y.real, y.imag]).reshape(-1).tolist(),
    "avg_ns": (t1 - t0) / max(iters, 1),
    "python_version": sys.version.split()[0],
    "numpy_version": np.__version__
}))
"#;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct PythonEval {
    output: Vec<f64>,
    avg_ns: f64,
    python_version: String,
    numpy_version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    max_abs_vs_baseline: f64,
    rust_candidate_ns: f64,
    rust_baseline_ns: f64,
    python_ns: f64,
    speedup_vs_baseline: f64,
    speedup_vs_python: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    python_executable: String,
    python_version: String,
    numpy_version: String,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("contracts") => run_contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

fn run_contracts() -> Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let out_dir = PathBuf::from(format!("target/contracts/{ts}"));
    fs::create_dir_all(&out_dir).context("creating contract output directory")?;

    let python_bin = detect_python_bin();
    let mut rows = Vec::new();
    let mut versions = None;

    let cases: Vec<(String, Vec<Complex>)> = vec![
        (
            "harmonic_mix_4096".to_string(),
            harmonic_signal(4096).map_err(|e| anyhow!("generating harmonic mix: {e}"))?,
        ),
        (
            "harmonic_mix_256".to_string(),
            harmonic_signal(256).map_err(|e| anyhow!("generating harmonic mix: {e}"))?,
        ),
        (
            "impulse_64".to_string(),
            unit_impulse(64, 0).map_err(|e| anyhow!("generating impulse: {e}"))?,
        ),
    ];

    for (signal_id, signal) in &cases {
        let py = python_fft_eval(&python_bin, signal, 50)?;
        let baseline = rustfft_forward(signal);
        let baseline_ns = benchmark_avg_ns(50, || {
            let _ = rustfft_forward(signal);
            Ok(())
        })?;

        for strategy in [FftStrategy::Recursive, FftStrategy::Iterative] {
            let case_id = format!("{signal_id}_{strategy}");
            let kernel = FftKernel::try_new(FftConfig {
                len: signal.len(),
                strategy,
            })
            .map_err(|e| anyhow!("{case_id} kernel construction failed: {e}"))?;
            let candidate = kernel
                .run_alloc(signal)
                .map_err(|e| anyhow!("{case_id} candidate execution failed: {e}"))?;
            let candidate_ns = benchmark_avg_ns(50, || {
                kernel
                    .run_alloc(signal)
                    .map(|_| ())
                    .map_err(|e| anyhow!("{case_id} candidate benchmark failed: {e}"))
            })?;

            let candidate = interleave(&candidate);
            ensure_same_length(&case_id, &candidate, &baseline)?;
            ensure_same_length(&case_id, &candidate, &py.output)?;
            rows.push(build_row(RowBuildInput {
                case_id: &case_id,
                rust_candidate: &candidate,
                rust_baseline: &baseline,
                python_reference: &py.output,
                rust_candidate_ns: candidate_ns,
                rust_baseline_ns: baseline_ns,
                python_ns: py.avg_ns,
            }));
        }
        if versions.is_none() {
            versions = Some((py.python_version.clone(), py.numpy_version.clone()));
        }
    }

    let (python_version, numpy_version) = versions.context("no contract cases were run")?;
    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        python_executable: python_bin.to_string_lossy().into_owned(),
        python_version,
        numpy_version,
        rows,
    };

    let summary_json = out_dir.join("summary.json");
    fs::write(
        &summary_json,
        serde_json::to_vec_pretty(&bundle).context("serializing contract bundle")?,
    )
    .with_context(|| format!("writing {}", summary_json.display()))?;
    write_summary_csv(&out_dir.join("summary.csv"), &bundle.rows)?;

    let default_summary = summarize(&cases[0].1, DEFAULT_BINS)
        .map_err(|e| anyhow!("summarizing default case: {e}"))?;
    println!(
        "default case checksum: {:.6} ({} rows written to {})",
        default_summary.checksum,
        bundle.rows.len(),
        out_dir.display()
    );
    Ok(())
}

fn detect_python_bin() -> PathBuf {
    std::env::var_os("PYTHON")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PYTHON_BIN))
}

fn rustfft_forward(signal: &[Complex]) -> Vec<f64> {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(signal.len());
    let mut buf: Vec<rustfft::num_complex::Complex<f64>> =
        signal.iter().map(|c| (*c).into()).collect();
    fft.process(&mut buf);
    buf.iter().flat_map(|c| [c.re, c.im]).collect()
}

fn interleave(spectrum: &[Complex]) -> Vec<f64> {
    spectrum.iter().flat_map(|c| [c.re, c.im]).collect()
}

fn python_fft_eval(python_bin: &Path, signal: &[Complex], iters: usize) -> Result<PythonEval> {
    let mut child = Command::new(python_bin)
        .arg("-c")
        .arg(PY_FFT_SCRIPT)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning python interpreter at {}", python_bin.display()))?;

    {
        let stdin = child.stdin.as_mut().context("opening python stdin")?;
        let payload = json!({ "iters": iters, "signal": signal });
        let payload_bytes = serde_json::to_vec(&payload).context("serializing python payload")?;
        stdin
            .write_all(&payload_bytes)
            .context("writing payload to python stdin")?;
    }

    let output = child
        .wait_with_output()
        .context("waiting for python process")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("python execution failed: {stderr}");
    }
    let stdout = String::from_utf8(output.stdout).context("parsing python stdout utf8")?;
    let parsed: PythonEval = serde_json::from_str(stdout.trim()).context("parsing python json")?;
    Ok(parsed)
}

fn ensure_same_length(case_id: &str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        bail!(
            "case {case_id} has mismatched output lengths: left={}, right={}",
            a.len(),
            b.len()
        );
    }
    Ok(())
}

fn benchmark_avg_ns<F>(iters: usize, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let start = Instant::now();
    for _ in 0..iters {
        f()?;
    }
    Ok(start.elapsed().as_nanos() as f64 / iters as f64)
}

struct RowBuildInput<'a> {
    case_id: &'a str,
    rust_candidate: &'a [f64],
    rust_baseline: &'a [f64],
    python_reference: &'a [f64],
    rust_candidate_ns: f64,
    rust_baseline_ns: f64,
    python_ns: f64,
}

fn build_row(args: RowBuildInput<'_>) -> ContractRow {
    ContractRow {
        case_id: args.case_id.to_string(),
        pearson_r: pearson(args.rust_candidate, args.python_reference),
        mae: mean_abs_error(args.rust_candidate, args.python_reference),
        rmse: root_mean_squared_error(args.rust_candidate, args.python_reference),
        max_abs: max_abs_error(args.rust_candidate, args.python_reference),
        max_abs_vs_baseline: max_abs_error(args.rust_candidate, args.rust_baseline),
        rust_candidate_ns: args.rust_candidate_ns,
        rust_baseline_ns: args.rust_baseline_ns,
        python_ns: args.python_ns,
        speedup_vs_baseline: args.rust_baseline_ns / args.rust_candidate_ns,
        speedup_vs_python: args.python_ns / args.rust_candidate_ns,
    }
}

fn mean_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / a.len() as f64
}

fn root_mean_squared_error(a: &[f64], b: &[f64]) -> f64 {
    (a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        / a.len() as f64)
        .sqrt()
}

fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = *x - mean_a;
        let db = *y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        if a == b {
            1.0
        } else {
            0.0
        }
    } else {
        cov / (var_a.sqrt() * var_b.sqrt())
    }
}

fn write_summary_csv(path: &Path, rows: &[ContractRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str("case_id,pearson_r,mae,rmse,max_abs,max_abs_vs_baseline,rust_candidate_ns,rust_baseline_ns,python_ns,speedup_vs_baseline,speedup_vs_python\n");
    for row in rows {
        out.push_str(&format!(
            "{},{:.12},{:.12},{:.12},{:.12},{:.12},{:.3},{:.3},{:.3},{:.6},{:.6}\n",
            row.case_id,
            row.pearson_r,
            row.mae,
            row.rmse,
            row.max_abs,
            row.max_abs_vs_baseline,
            row.rust_candidate_ns,
            row.rust_baseline_ns,
            row.python_ns,
            row.speedup_vs_baseline,
            row.speedup_vs_python,
        ));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}
