//! Incidents

use serde::{Deserialize, Serialize};
use std::fmt;

/// Incident severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Customer-facing outage
    Critical,
    /// Significant degradation
    High,
    /// Limited impact
    Medium,
    /// Cosmetic or internal
    Low,
}

impl Severity {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Incident lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    /// Ongoing
    Active,
    /// Ongoing, under diagnosis
    Investigating,
    /// Closed
    Resolved,
    /// Forecast, not yet happened
    Predicted,
}

impl IncidentStatus {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Active => "active",
            IncidentStatus::Investigating => "investigating",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Predicted => "predicted",
        }
    }

    /// Active or investigating
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, IncidentStatus::Active | IncidentStatus::Investigating)
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An incident record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Identifier, unique within the incident collection
    pub id: String,
    /// Headline
    pub title: String,
    /// Severity
    pub severity: Severity,
    /// Lifecycle status
    pub status: IncidentStatus,
    /// Name of the affected service
    pub service: String,
    /// Display string, e.g. `"2 min ago"`
    pub started_at: String,
    /// Display string for resolution time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    /// Minutes to recovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mttr: Option<u32>,
    /// Whether the fix was applied without a human
    pub auto_remediated: bool,
    /// Root cause, once known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_statuses() {
        assert!(IncidentStatus::Active.is_open());
        assert!(IncidentStatus::Investigating.is_open());
        assert!(!IncidentStatus::Resolved.is_open());
        assert!(!IncidentStatus::Predicted.is_open());
    }

    #[test]
    fn incident_deserializes_without_optionals() {
        let json = r#"{
            "id": "inc-2",
            "title": "Payment latency spike detected",
            "severity": "high",
            "status": "predicted",
            "service": "payment-service",
            "startedAt": "Predicted in 18 min",
            "autoRemediated": false
        }"#;
        let incident: Incident = serde_json::from_str(json).unwrap();
        assert_eq!(incident.severity, Severity::High);
        assert_eq!(incident.status, IncidentStatus::Predicted);
        assert!(incident.root_cause.is_none());
        assert!(incident.mttr.is_none());
    }
}
