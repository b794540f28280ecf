//! Monitored services

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete health status of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Operating normally
    Healthy,
    /// Elevated error rate or latency
    Warning,
    /// Failing
    Critical,
    /// Partially available
    Degraded,
}

impl ServiceStatus {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Healthy => "healthy",
            ServiceStatus::Warning => "warning",
            ServiceStatus::Critical => "critical",
            ServiceStatus::Degraded => "degraded",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A monitored service and its current vitals
///
/// `risk_score` and `status` are set independently; neither is derived from
/// the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service identifier (`svc-N`)
    pub id: String,
    /// Service name
    pub name: String,
    /// Health status
    pub status: ServiceStatus,
    /// Uptime percentage
    pub uptime: f64,
    /// Latency in milliseconds
    pub latency: f64,
    /// Error rate percentage
    pub error_rate: f64,
    /// CPU utilisation percentage
    pub cpu: f64,
    /// Memory utilisation percentage
    pub memory: f64,
    /// Predicted instability, 0..=100
    pub risk_score: u8,
    /// ETA of a predicted failure, e.g. `"18 min"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_failure: Option<String>,
    /// Prediction confidence percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// Names of the services this one depends on
    pub dependencies: Vec<String>,
}

impl Service {
    /// Whether a failure is predicted for this service
    #[inline]
    #[must_use]
    pub fn has_predicted_failure(&self) -> bool {
        self.predicted_failure.is_some()
    }

    /// Whether this service lists `name` as a dependency
    #[inline]
    #[must_use]
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d == name)
    }
}
