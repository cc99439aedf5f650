//! Generator error type

use channel_physics::ChannelError;
use phy_modem::ModemError;
use thiserror::Error;

/// Errors that abort a generation run
///
/// Window exhaustion and silent windows are ordinary control flow and
/// never surface here.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Invalid configuration or unsupported modulation/parameter combination
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A collaborator failed while producing a realization
    #[error("simulation error: {0}")]
    Simulation(String),

    /// Rows disagree with the declared column layout
    #[error("schema inference error: {0}")]
    SchemaInference(String),

    #[error("generation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("header encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed dataset container on read
    #[error("invalid dataset file: {0}")]
    Format(String),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

impl From<ModemError> for GenerateError {
    fn from(err: ModemError) -> Self {
        match err {
            ModemError::UnsupportedParameter { .. } | ModemError::InvalidParameter { .. } => {
                GenerateError::Configuration(err.to_string())
            }
            ModemError::SourceMismatch { .. } => GenerateError::Simulation(err.to_string()),
        }
    }
}

impl From<ChannelError> for GenerateError {
    fn from(err: ChannelError) -> Self {
        GenerateError::Simulation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modem_parameter_errors_are_configuration() {
        let err: GenerateError = ModemError::UnsupportedParameter {
            scheme: "WBFM",
            parameter: "samples_per_symbol",
        }
        .into();
        assert!(matches!(err, GenerateError::Configuration(_)));
        assert!(err.to_string().contains("WBFM"));
    }

    #[test]
    fn test_source_mismatch_is_simulation() {
        let err: GenerateError = ModemError::SourceMismatch {
            scheme: "BPSK",
            expected: "discrete",
        }
        .into();
        assert!(matches!(err, GenerateError::Simulation(_)));
    }

    #[test]
    fn test_channel_error_is_simulation() {
        let err: GenerateError = ChannelError::InvalidProfile("bad".into()).into();
        assert!(matches!(err, GenerateError::Simulation(_)));
    }
}
