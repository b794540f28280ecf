//! Operational records: deployments, audit trail, chaos experiments, costs,
//! remediations and database query findings

use serde::{Deserialize, Serialize};

/// Deployment rollout status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentStatus {
    /// Rolling update in progress
    Rolling,
    /// Canary phase
    Canary,
    /// Fully rolled out
    Completed,
    /// Reverted
    RolledBack,
}

impl DeploymentStatus {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Rolling => "rolling",
            DeploymentStatus::Canary => "canary",
            DeploymentStatus::Completed => "completed",
            DeploymentStatus::RolledBack => "rolled-back",
        }
    }
}

/// A deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Identifier
    pub id: String,
    /// Deployed service name
    pub service: String,
    /// Version label
    pub version: String,
    /// Rollout status
    pub status: DeploymentStatus,
    /// Rollout progress percentage
    pub progress: u8,
    /// Display string
    pub started_at: String,
    /// Health score percentage
    pub health_score: u8,
}

/// An immutable audit trail entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Identifier
    pub id: String,
    /// What happened
    pub action: String,
    /// Who did it
    pub actor: String,
    /// What it was done to
    pub target: String,
    /// Display string
    pub timestamp: String,
    /// Abbreviated ledger hash
    pub hash: String,
    /// Whether the hash verified
    pub verified: bool,
}

/// Kind of fault a chaos experiment injects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChaosType {
    /// Kill pods
    PodKill,
    /// Inject latency
    Latency,
    /// Drop network traffic
    NetworkDrop,
    /// Saturate CPU
    CpuStress,
}

/// Chaos experiment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChaosStatus {
    /// In progress
    Running,
    /// Finished
    Completed,
    /// Queued
    Scheduled,
}

/// A chaos engineering experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosExperiment {
    /// Identifier
    pub id: String,
    /// Experiment name
    pub name: String,
    /// Fault kind
    #[serde(rename = "type")]
    pub kind: ChaosType,
    /// Target service name
    pub target: String,
    /// Status
    pub status: ChaosStatus,
    /// Resilience percentage
    pub resilience: u8,
    /// Recovery time in seconds
    pub recovery_time: u32,
}

/// A cloud cost line with its optimisation opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    /// Cost centre
    pub service: String,
    /// Current monthly cost
    pub current_cost: u64,
    /// Cost after optimisation
    pub optimized_cost: u64,
    /// Monthly savings
    pub savings: u64,
    /// How to realise the savings
    pub recommendation: String,
}

/// Remediation execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationStatus {
    /// Running now
    Executing,
    /// Done
    Completed,
    /// Awaiting approval
    Ready,
    /// Did not succeed
    Failed,
}

impl RemediationStatus {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationStatus::Executing => "executing",
            RemediationStatus::Completed => "completed",
            RemediationStatus::Ready => "ready",
            RemediationStatus::Failed => "failed",
        }
    }
}

/// Remediation action family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationType {
    /// Restart or kill processes
    Restart,
    /// Add capacity
    Scale,
    /// Shift traffic
    Reroute,
    /// Revert a release
    Rollback,
}

/// An automated remediation action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remediation {
    /// Numeric identifier
    pub id: u64,
    /// Action label
    pub action: String,
    /// Target service name
    pub target: String,
    /// Execution status
    pub status: RemediationStatus,
    /// Action family
    #[serde(rename = "type")]
    pub kind: RemediationType,
    /// Display string
    pub time: String,
    /// Why the action was taken
    pub reason: String,
}

/// A slow query finding and its proposed fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseQuery {
    /// SQL text
    pub query: String,
    /// Observed duration
    pub time: String,
    /// Duration after the fix
    pub optimized: String,
    /// Improvement label
    pub improvement: String,
    /// Proposed fix
    pub fix: String,
    /// Whether the fix has been applied
    pub applied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_tags() {
        assert_eq!(
            serde_json::to_string(&DeploymentStatus::RolledBack).unwrap(),
            "\"rolled-back\""
        );
        assert_eq!(DeploymentStatus::RolledBack.as_str(), "rolled-back");
        assert_eq!(
            serde_json::to_string(&ChaosType::NetworkDrop).unwrap(),
            "\"network-drop\""
        );
    }

    #[test]
    fn remediation_type_field_name() {
        let r = Remediation {
            id: 7,
            action: "Traffic reroute".into(),
            target: "payment-service".into(),
            status: RemediationStatus::Ready,
            kind: RemediationType::Reroute,
            time: "Pending".into(),
            reason: "Predicted failure".into(),
        };
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["type"], "reroute");
        assert_eq!(value["status"], "ready");
    }
}
