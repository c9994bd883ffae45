//! Error types for checkpoint recording and querying
//!
//! Every variant is a local contract violation surfaced straight to the
//! caller. Nothing here is transient, so nothing is worth retrying.

use crate::checkpoint::CheckerId;
use thiserror::Error;

/// Errors returned by [`TimeChecker`](crate::TimeChecker) operations
#[derive(Error, Debug)]
pub enum TimeCheckerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported time unit '{0}': not implemented")]
    UnsupportedUnit(String),

    #[error("Can not interact with check point '{description}': it was created by {owner}, not {checker}")]
    ForeignCheckpoint {
        description: String,
        owner: CheckerId,
        checker: CheckerId,
    },

    #[error("Check point '{description}' was not recorded by this checker")]
    CheckpointNotFound { description: String },

    #[error("No check points recorded yet")]
    EmptySequence,

    #[error("Invalid timestamp format: {0}")]
    InvalidFormat(String),

    #[error("Invalid report config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TimeCheckerError>;
