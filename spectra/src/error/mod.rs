use crate::kernel::{ConfigError, ExecInvariantViolation};
use core::fmt;

/// Errors raised by the `spectra` free-function API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The transform received a sequence whose length is not a power of two.
    InvalidInputSize {
        /// Offending length.
        len: usize,
    },
    /// Argument parsed into function were invalid.
    InvalidArg {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
    /// Execution was attempted with a violated kernel invariant.
    ExecInvariantViolation {
        /// Why execution could not proceed.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInputSize { len } => {
                write!(
                    f,
                    "Invalid input size: FFT length {len} is not a power of two"
                )
            }
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            Error::ExecInvariantViolation { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::InvalidInputSize { len, .. } => Error::InvalidInputSize { len },
            ConfigError::EmptyInput { arg } => Error::InvalidArg {
                arg: arg.to_string(),
                reason: "must not be empty".to_string(),
            },
            ConfigError::InvalidArgument { arg, reason } => Error::InvalidArg {
                arg: arg.to_string(),
                reason: reason.to_string(),
            },
            other @ ConfigError::NonContiguous { .. } => Error::ExecInvariantViolation {
                reason: other.to_string(),
            },
        }
    }
}

impl From<ExecInvariantViolation> for Error {
    fn from(value: ExecInvariantViolation) -> Self {
        match value {
            ExecInvariantViolation::Config(err) => err.into(),
            other => Error::ExecInvariantViolation {
                reason: other.to_string(),
            },
        }
    }
}

/// Result alias over [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
