//! The full set of simulation collections

use crate::incident::Incident;
use crate::log::DetailedLog;
use crate::metric::{MetricKind, Metrics};
use crate::ops::{AuditEntry, ChaosExperiment, CostItem, DatabaseQuery, Deployment, Remediation};
use crate::rca::RcaData;
use crate::service::Service;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Addresses one collection of a [`Dataset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Services
    Services,
    /// Incidents (most recent first)
    Incidents,
    /// CPU metric series
    CpuMetrics,
    /// Memory metric series
    MemoryMetrics,
    /// Latency metric series
    LatencyMetrics,
    /// Error rate metric series
    ErrorRateMetrics,
    /// Throughput metric series
    ThroughputMetrics,
    /// Deployments
    Deployments,
    /// Audit trail
    AuditEntries,
    /// Chaos experiments (most recent first)
    ChaosExperiments,
    /// Cost items
    CostItems,
    /// Trigger logs
    DetailedLogs,
    /// Remediations (most recent first)
    Remediations,
    /// Root-cause analysis singleton
    RcaData,
    /// Database query findings (most recent first)
    DatabaseQueries,
}

impl CollectionKind {
    /// Every collection kind
    pub const ALL: [CollectionKind; 15] = [
        CollectionKind::Services,
        CollectionKind::Incidents,
        CollectionKind::CpuMetrics,
        CollectionKind::MemoryMetrics,
        CollectionKind::LatencyMetrics,
        CollectionKind::ErrorRateMetrics,
        CollectionKind::ThroughputMetrics,
        CollectionKind::Deployments,
        CollectionKind::AuditEntries,
        CollectionKind::ChaosExperiments,
        CollectionKind::CostItems,
        CollectionKind::DetailedLogs,
        CollectionKind::Remediations,
        CollectionKind::RcaData,
        CollectionKind::DatabaseQueries,
    ];

    /// Collection holding the series for `kind`
    #[inline]
    #[must_use]
    pub fn for_metric(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Cpu => CollectionKind::CpuMetrics,
            MetricKind::Memory => CollectionKind::MemoryMetrics,
            MetricKind::Latency => CollectionKind::LatencyMetrics,
            MetricKind::ErrorRate => CollectionKind::ErrorRateMetrics,
            MetricKind::Throughput => CollectionKind::ThroughputMetrics,
        }
    }

    /// Stable name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Services => "services",
            CollectionKind::Incidents => "incidents",
            CollectionKind::CpuMetrics => "cpu_metrics",
            CollectionKind::MemoryMetrics => "memory_metrics",
            CollectionKind::LatencyMetrics => "latency_metrics",
            CollectionKind::ErrorRateMetrics => "error_rate_metrics",
            CollectionKind::ThroughputMetrics => "throughput_metrics",
            CollectionKind::Deployments => "deployments",
            CollectionKind::AuditEntries => "audit_entries",
            CollectionKind::ChaosExperiments => "chaos_experiments",
            CollectionKind::CostItems => "cost_items",
            CollectionKind::DetailedLogs => "detailed_logs",
            CollectionKind::Remediations => "remediations",
            CollectionKind::RcaData => "rca_data",
            CollectionKind::DatabaseQueries => "database_queries",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Every collection the simulation owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Services
    pub services: Vec<Service>,
    /// Incidents, most recent first
    pub incidents: Vec<Incident>,
    /// Metric series
    pub metrics: Metrics,
    /// Deployments
    pub deployments: Vec<Deployment>,
    /// Audit trail
    pub audit_entries: Vec<AuditEntry>,
    /// Chaos experiments, most recent first
    pub chaos_experiments: Vec<ChaosExperiment>,
    /// Cost items
    pub cost_items: Vec<CostItem>,
    /// Trigger logs
    pub detailed_logs: Vec<DetailedLog>,
    /// Remediations, most recent first
    pub remediations: Vec<Remediation>,
    /// Current root-cause analysis
    pub rca_data: RcaData,
    /// Database query findings, most recent first
    pub database_queries: Vec<DatabaseQuery>,
}

impl Dataset {
    /// Service by id
    #[inline]
    #[must_use]
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Service by name
    #[inline]
    #[must_use]
    pub fn service_named(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Overwrite one collection with the value held by `source`
    pub fn copy_collection(&mut self, source: &Dataset, kind: CollectionKind) {
        match kind {
            CollectionKind::Services => self.services.clone_from(&source.services),
            CollectionKind::Incidents => self.incidents.clone_from(&source.incidents),
            CollectionKind::CpuMetrics => self.metrics.cpu.clone_from(&source.metrics.cpu),
            CollectionKind::MemoryMetrics => self.metrics.memory.clone_from(&source.metrics.memory),
            CollectionKind::LatencyMetrics => {
                self.metrics.latency.clone_from(&source.metrics.latency);
            }
            CollectionKind::ErrorRateMetrics => {
                self.metrics.error_rate.clone_from(&source.metrics.error_rate);
            }
            CollectionKind::ThroughputMetrics => {
                self.metrics.throughput.clone_from(&source.metrics.throughput);
            }
            CollectionKind::Deployments => self.deployments.clone_from(&source.deployments),
            CollectionKind::AuditEntries => self.audit_entries.clone_from(&source.audit_entries),
            CollectionKind::ChaosExperiments => {
                self.chaos_experiments.clone_from(&source.chaos_experiments);
            }
            CollectionKind::CostItems => self.cost_items.clone_from(&source.cost_items),
            CollectionKind::DetailedLogs => self.detailed_logs.clone_from(&source.detailed_logs),
            CollectionKind::Remediations => self.remediations.clone_from(&source.remediations),
            CollectionKind::RcaData => self.rca_data.clone_from(&source.rca_data),
            CollectionKind::DatabaseQueries => {
                self.database_queries.clone_from(&source.database_queries);
            }
        }
    }

    /// Whether one collection is value-equal between `self` and `other`
    #[must_use]
    pub fn collection_eq(&self, other: &Dataset, kind: CollectionKind) -> bool {
        match kind {
            CollectionKind::Services => self.services == other.services,
            CollectionKind::Incidents => self.incidents == other.incidents,
            CollectionKind::CpuMetrics => self.metrics.cpu == other.metrics.cpu,
            CollectionKind::MemoryMetrics => self.metrics.memory == other.metrics.memory,
            CollectionKind::LatencyMetrics => self.metrics.latency == other.metrics.latency,
            CollectionKind::ErrorRateMetrics => self.metrics.error_rate == other.metrics.error_rate,
            CollectionKind::ThroughputMetrics => {
                self.metrics.throughput == other.metrics.throughput
            }
            CollectionKind::Deployments => self.deployments == other.deployments,
            CollectionKind::AuditEntries => self.audit_entries == other.audit_entries,
            CollectionKind::ChaosExperiments => self.chaos_experiments == other.chaos_experiments,
            CollectionKind::CostItems => self.cost_items == other.cost_items,
            CollectionKind::DetailedLogs => self.detailed_logs == other.detailed_logs,
            CollectionKind::Remediations => self.remediations == other.remediations,
            CollectionKind::RcaData => self.rca_data == other.rca_data,
            CollectionKind::DatabaseQueries => self.database_queries == other.database_queries,
        }
    }

    /// Collections whose values differ between `self` and `other`
    #[must_use]
    pub fn changed_collections(&self, other: &Dataset) -> Vec<CollectionKind> {
        CollectionKind::ALL
            .into_iter()
            .filter(|kind| !self.collection_eq(other, *kind))
            .collect()
    }
}
