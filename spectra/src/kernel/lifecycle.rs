use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
///
/// Every kernel validates its whole configuration up front so the run
/// methods only have to check buffer shapes.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}
