//! Error types for Loop Core
//!
//! Activation and reset cannot fail for well-formed scenarios; an unknown
//! trigger is reported as an ignored activation, not an error. What remains:
//! - Malformed patch sets (a bug in a scenario)
//! - Configuration loading failures

use loop_scenario::PatchError;
use std::path::PathBuf;

/// Simulation store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A scenario produced a patch set that failed validation
    #[error("malformed patch set: {0}")]
    Patch(#[from] PatchError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`LoopConfig`](crate::LoopConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
