//! CLI error types.

use crate::config::ConfigError;
use crate::domain::InvalidStationId;

/// Bad user input. Recoverable: interactive sessions ask again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// Surcharge amount is not a number
    #[error("invalid amount {input:?}: expected a number")]
    InvalidAmount { input: String },

    /// Station name failed to parse
    #[error(transparent)]
    InvalidStation(#[from] InvalidStationId),

    /// Only one end of the trip was given
    #[error("missing {0}: give both --from and --to, or neither for an interactive session")]
    MissingStation(&'static str),

    /// Surcharge name given without an amount or the other way round
    #[error("--surcharge-name and --surcharge-amount must be given together")]
    IncompleteSurcharge,
}

/// Anything that can stop the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal read/write failed, or input ended early
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode quote: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Input(_) => 2,
            _ => 1,
        }
    }
}
