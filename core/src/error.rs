//! Loop error types

use std::path::PathBuf;
use std::time::Duration;

/// Errors returned by the loop runtime and its configuration helpers
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    /// `run` was called while a loop is already running
    #[error("loop is already running")]
    AlreadyRunning,

    /// A queued configuration option failed.
    ///
    /// Display and source are those of the option's own error.
    #[error(transparent)]
    OptionFailed(#[from] anyhow::Error),

    /// A fixed time step of zero was requested
    #[error("invalid time step {0:?} (must be non-zero)")]
    InvalidStep(Duration),

    /// A tick rate of zero was requested
    #[error("invalid tick rate {0} (must be non-zero)")]
    InvalidTickRate(u32),

    /// Loop configuration failed validation
    #[error("invalid loop config: {0}")]
    Config(String),

    /// Config file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`LoopConfig`](crate::LoopConfig)
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}
