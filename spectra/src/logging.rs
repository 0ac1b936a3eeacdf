//! Structured logging setup for the `spectra` binaries.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the host program. Log output always goes to stderr so stdout
//! carries nothing but the report.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level (default)
    #[default]
    Warn,
    /// Error level (least verbose)
    Error,
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl core::str::FromStr for LogLevel {
    type Err = crate::kernel::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(crate::kernel::ConfigError::InvalidArgument {
                arg: "log-level",
                reason: "expected one of trace, debug, info, warn, error",
            }),
        }
    }
}

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it is set and parses.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr),
    );

    // Already installed by an earlier call.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
