//! Error type shared by the procedure, configuration and record store

use thiserror::Error;

/// Errors raised by staircase operations
#[derive(Error, Debug)]
pub enum StaircaseError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("run already terminal after {turnarounds} turnarounds; call reset() to start over")]
    RunTerminal { turnarounds: usize },

    #[error("no turnarounds recorded yet, cannot compute a threshold")]
    InsufficientData,

    #[error("invalid answer character {0:?}")]
    InvalidAnswer(char),

    #[error("I/O error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StaircaseError>;
