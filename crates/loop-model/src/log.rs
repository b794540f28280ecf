//! Detailed log entries that act as scenario triggers

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Debug
    Debug,
}

impl LogLevel {
    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Diagnostic report attached to a log entry
///
/// Request parameters, context and performance metrics are free-form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogReport {
    /// Stack trace text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    /// Request parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_params: Option<Value>,
    /// Acting user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Surrounding context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    /// Timings and thresholds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_metrics: Option<Value>,
}

/// A log entry a user can click to activate a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedLog {
    /// Identifier, doubles as the scenario trigger id
    pub id: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    /// Level
    pub level: LogLevel,
    /// Emitting service name
    pub source: String,
    /// Message
    pub message: String,
    /// Attached report
    pub report: LogReport,
}
