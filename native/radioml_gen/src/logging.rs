//! Log subscriber setup for the binary
//!
//! Logging never affects generated data. `RUST_LOG`, when set, takes
//! precedence over the command-line verbosity.

use tracing_subscriber::EnvFilter;

/// Command-line verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only
    #[default]
    Quiet,
    /// Per-SNR and per-key progress
    Verbose,
    /// Per-realization detail
    Debug,
}

impl Verbosity {
    /// `debug` wins over `verbose`
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        match (verbose, debug) {
            (_, true) => Self::Debug,
            (true, false) => Self::Verbose,
            (false, false) => Self::Quiet,
        }
    }

    pub fn filter_directive(&self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Install the global fmt subscriber; later calls are ignored
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Debug);
    }

    #[test]
    fn test_default_is_warn() {
        assert_eq!(Verbosity::default().filter_directive(), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(Verbosity::Debug);
        init_logging(Verbosity::Quiet);
        tracing::debug!("still running");
    }
}
