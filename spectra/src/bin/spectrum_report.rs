use anyhow::{anyhow, bail, Context, Result};
use spectra::logging::{init_logging, LogLevel};
use spectra::report::{run_report, ReportConfig};
use spectra::signal::fft::FftStrategy;
use spectra::signal::wave::{Harmonic, HarmonicShape};

const USAGE: &str = "\
Usage: spectrum_report [OPTIONS]

Generate a deterministic harmonic signal, transform it and print the largest
bin magnitudes with a traversal checksum.

Options:
  --size N                          signal and FFT length, a power of two [default: 4096]
  --bins K                          number of reported magnitudes [default: 10]
  --harmonic CYCLES:AMP[:sin|cos]   add a term to the mix; replaces the default mix
  --strategy recursive|iterative    transform evaluation order [default: recursive]
  --json                            print the report as JSON
  --log-level LEVEL                 stderr log level [default: warn]
  -h, --help                        print this message";

#[derive(Debug, PartialEq)]
enum Command {
    Report {
        config: ReportConfig,
        json: bool,
        log_level: LogLevel,
    },
    Help,
}

fn main() -> Result<()> {
    match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Report {
            config,
            json,
            log_level,
        } => {
            init_logging(log_level);
            tracing::info!(size = config.size, bins = config.bins, "running spectrum report");
            let report = run_report(&config)
                .with_context(|| format!("spectrum report failed for FFT size {}", config.size))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("serializing report")?
                );
            } else {
                print!("{report}");
            }
            Ok(())
        }
    }
}

fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut config = ReportConfig::default();
    let mut harmonics = Vec::new();
    let mut json = false;
    let mut log_level = LogLevel::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--json" => json = true,
            "--size" => config.size = parse_usize("--size", args.next())?,
            "--bins" => config.bins = parse_usize("--bins", args.next())?,
            "--harmonic" => harmonics.push(parse_harmonic(&required("--harmonic", args.next())?)?),
            "--strategy" => {
                config.strategy = required("--strategy", args.next())?.parse::<FftStrategy>()?
            }
            "--log-level" => {
                log_level = required("--log-level", args.next())?.parse::<LogLevel>()?
            }
            other => bail!("unknown argument `{other}`\n\n{USAGE}"),
        }
    }

    if !harmonics.is_empty() {
        config.harmonics = harmonics;
    }
    Ok(Command::Report {
        config,
        json,
        log_level,
    })
}

fn required(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow!("missing value for `{flag}`"))
}

fn parse_usize(flag: &str, value: Option<String>) -> Result<usize> {
    let value = required(flag, value)?;
    value
        .parse()
        .with_context(|| format!("`{flag}` expects a non-negative integer, got `{value}`"))
}

fn parse_harmonic(spec: &str) -> Result<Harmonic> {
    let mut parts = spec.split(':');
    let cycles = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("harmonic `{spec}` is missing its cycle count"))?
        .parse::<u32>()
        .with_context(|| format!("harmonic `{spec}` has an invalid cycle count"))?;
    let amplitude = parts
        .next()
        .ok_or_else(|| anyhow!("harmonic `{spec}` is missing its amplitude"))?
        .parse::<f64>()
        .with_context(|| format!("harmonic `{spec}` has an invalid amplitude"))?;
    let shape = match parts.next() {
        None | Some("sin") => HarmonicShape::Sine,
        Some("cos") => HarmonicShape::Cosine,
        Some(other) => bail!("harmonic shape must be `sin` or `cos`, got `{other}`"),
    };
    if parts.next().is_some() {
        bail!("harmonic `{spec}` has too many fields");
    }
    Ok(Harmonic {
        cycles,
        amplitude,
        shape,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_flags_yields_default_report() {
        assert_eq!(
            parse_args(args(&[])).expect("parse"),
            Command::Report {
                config: ReportConfig::default(),
                json: false,
                log_level: LogLevel::Warn,
            }
        );
    }

    #[test]
    fn flags_override_defaults() {
        let cmd = parse_args(args(&[
            "--size",
            "256",
            "--bins",
            "3",
            "--harmonic",
            "5:0.5:cos",
            "--harmonic",
            "7:2",
            "--strategy",
            "iterative",
            "--json",
        ]))
        .expect("parse");
        let Command::Report { config, json, .. } = cmd else {
            panic!("expected report command");
        };
        assert_eq!(config.size, 256);
        assert_eq!(config.bins, 3);
        assert_eq!(config.strategy, FftStrategy::Iterative);
        assert_eq!(
            config.harmonics,
            vec![Harmonic::cosine(5, 0.5), Harmonic::sine(7, 2.0)]
        );
        assert!(json);
    }

    #[test]
    fn malformed_flags_are_rejected() {
        assert!(parse_args(args(&["--size"])).is_err());
        assert!(parse_args(args(&["--size", "-4"])).is_err());
        assert!(parse_args(args(&["--harmonic", "3:x"])).is_err());
        assert!(parse_args(args(&["--harmonic", "3:1:tan"])).is_err());
        assert!(parse_args(args(&["--strategy", "radix4"])).is_err());
        assert!(parse_args(args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(
            parse_args(args(&["--size", "7", "--help"])).expect("parse"),
            Command::Help
        );
    }
}
