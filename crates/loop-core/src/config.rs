//! Store configuration

use crate::error::ConfigError;
use loop_model::CollectionKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which collections `reset()` restores to baseline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Every collection
    #[default]
    Full,
    /// The dashboard's original subset: throughput, chaos experiments,
    /// deployments, audit entries, cost items and logs survive a reset
    Legacy,
    /// Explicit list
    Custom(Vec<CollectionKind>),
}

impl ResetPolicy {
    /// Collections restored by this policy
    #[must_use]
    pub fn collections(&self) -> Vec<CollectionKind> {
        match self {
            ResetPolicy::Full => CollectionKind::ALL.to_vec(),
            ResetPolicy::Legacy => vec![
                CollectionKind::Services,
                CollectionKind::Incidents,
                CollectionKind::CpuMetrics,
                CollectionKind::MemoryMetrics,
                CollectionKind::LatencyMetrics,
                CollectionKind::ErrorRateMetrics,
                CollectionKind::Remediations,
                CollectionKind::RcaData,
                CollectionKind::DatabaseQueries,
            ],
            ResetPolicy::Custom(kinds) => {
                let mut kinds = kinds.clone();
                kinds.sort_unstable();
                kinds.dedup();
                kinds
            }
        }
    }
}

/// Loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// RNG seed for baseline noise and spikes; entropy when unset
    pub seed: Option<u64>,
    /// Collections restored by `reset()`
    pub reset_policy: ResetPolicy,
    /// `tracing` filter directive used by binaries
    pub log_filter: String,
}

impl LoopConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With fixed seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With reset policy
    #[inline]
    #[must_use]
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on invalid TOML or unknown values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reset_policy: ResetPolicy::Full,
            log_filter: "info".to_string(),
        }
    }
}
