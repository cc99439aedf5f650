//! Modem error type

use thiserror::Error;

/// Errors raised while building or driving a modulator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModemError {
    /// The scheme does not take this keyword parameter at all
    #[error("{scheme} does not accept parameter `{parameter}`")]
    UnsupportedParameter {
        scheme: &'static str,
        parameter: &'static str,
    },

    /// The parameter is accepted but the value is out of range
    #[error("invalid {parameter} for {scheme}: {value}")]
    InvalidParameter {
        scheme: &'static str,
        parameter: &'static str,
        value: f64,
    },

    /// Discrete modulator fed audio, or analog modulator fed symbols
    #[error("{scheme} expects a {expected} source stream")]
    SourceMismatch {
        scheme: &'static str,
        expected: &'static str,
    },
}
