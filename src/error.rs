//! Error types.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of one call to an external collaborator.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no user id or auth token configured")]
    MissingCredentials,

    #[error("{0} unavailable")]
    Unavailable(String),
}

/// The three external writes made when a reward is claimed, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettlementStep {
    TaskCompletion,
    Battery,
    ProgressLedger,
}

impl SettlementStep {
    pub const ORDER: [SettlementStep; 3] = [
        SettlementStep::TaskCompletion,
        SettlementStep::Battery,
        SettlementStep::ProgressLedger,
    ];
}

impl fmt::Display for SettlementStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettlementStep::TaskCompletion => "task completion",
            SettlementStep::Battery => "battery update",
            SettlementStep::ProgressLedger => "coin/xp ledger",
        };
        f.write_str(name)
    }
}

/// A reward claim that did not go through. The claim stays open for retry.
#[derive(Debug, Error)]
#[error("reward settlement failed at {step}: {source}")]
pub struct SettlementError {
    pub step: SettlementStep,
    #[source]
    pub source: BackendError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
