//! Error types for simulator construction and stepping.

use thiserror::Error;

/// Errors raised by the simulator and the environment wrapper.
///
/// Leaving the flight volume and touching the ground are normal episode
/// endings and are reported through [`crate::sim::Termination`], not here.
#[derive(Debug, Error)]
pub enum SimError {
    /// Malformed call input or an inconsistent parameter set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Scenario file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a scenario or writing a flight log failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidArgument(msg.into())
    }
}

/// Result type for simulator operations.
pub type SimResult<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::invalid("expected 4 rotor speeds, got 3");
        assert_eq!(
            format!("{err}"),
            "Invalid argument: expected 4 rotor speeds, got 3"
        );
    }

    #[test]
    fn toml_error_converts() {
        let parse: Result<toml::Table, _> = toml::from_str("dt = ");
        let err: SimError = parse.unwrap_err().into();
        assert!(matches!(err, SimError::Config(_)));
    }
}
