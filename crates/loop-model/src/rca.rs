//! Root-cause analysis record

use serde::{Deserialize, Serialize};

/// One step on an RCA timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Relative time label, e.g. `"T-5min"`
    pub time: String,
    /// What was observed
    pub event: String,
    /// Signal kind (`deploy`, `metric`, `alert`, `trace`, `incident`)
    #[serde(rename = "type")]
    pub kind: String,
}

impl TimelineEvent {
    /// Create timeline event
    #[inline]
    #[must_use]
    pub fn new(time: impl Into<String>, event: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            event: event.into(),
            kind: kind.into(),
        }
    }
}

/// The current root-cause analysis
///
/// There is exactly one; scenarios replace it wholesale and never merge into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RcaData {
    /// Incident headline
    pub incident: String,
    /// Originating service name
    pub service: String,
    /// Oldest-first timeline
    pub timeline: Vec<TimelineEvent>,
    /// Root cause statement
    pub root_cause: String,
    /// Services impacted
    pub affected_services: Vec<String>,
    /// Recommended fix
    pub recommendation: String,
}
