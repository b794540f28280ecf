//! Read-only access to store state

use crate::stats::DerivedStats;
use loop_model::{
    AuditEntry, ChaosExperiment, CostItem, DatabaseQuery, Dataset, Deployment, DetailedLog,
    Incident, Metrics, RcaData, Remediation, Service,
};
use serde::{Deserialize, Serialize};

/// Borrowed, read-only view of every collection
///
/// Obtained from [`SimulationStore::state`](crate::SimulationStore::state);
/// cannot be used to mutate the store.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    dataset: &'a Dataset,
}

impl<'a> StateView<'a> {
    #[inline]
    pub(crate) fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Services
    #[inline]
    #[must_use]
    pub fn services(&self) -> &'a [Service] {
        &self.dataset.services
    }

    /// Incidents, most recent first
    #[inline]
    #[must_use]
    pub fn incidents(&self) -> &'a [Incident] {
        &self.dataset.incidents
    }

    /// Metric series
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> &'a Metrics {
        &self.dataset.metrics
    }

    /// Deployments
    #[inline]
    #[must_use]
    pub fn deployments(&self) -> &'a [Deployment] {
        &self.dataset.deployments
    }

    /// Audit trail
    #[inline]
    #[must_use]
    pub fn audit_entries(&self) -> &'a [AuditEntry] {
        &self.dataset.audit_entries
    }

    /// Chaos experiments, most recent first
    #[inline]
    #[must_use]
    pub fn chaos_experiments(&self) -> &'a [ChaosExperiment] {
        &self.dataset.chaos_experiments
    }

    /// Cost items
    #[inline]
    #[must_use]
    pub fn cost_items(&self) -> &'a [CostItem] {
        &self.dataset.cost_items
    }

    /// Trigger logs
    #[inline]
    #[must_use]
    pub fn detailed_logs(&self) -> &'a [DetailedLog] {
        &self.dataset.detailed_logs
    }

    /// Remediations, most recent first
    #[inline]
    #[must_use]
    pub fn remediations(&self) -> &'a [Remediation] {
        &self.dataset.remediations
    }

    /// Current root-cause analysis
    #[inline]
    #[must_use]
    pub fn rca_data(&self) -> &'a RcaData {
        &self.dataset.rca_data
    }

    /// Database query findings, most recent first
    #[inline]
    #[must_use]
    pub fn database_queries(&self) -> &'a [DatabaseQuery] {
        &self.dataset.database_queries
    }

    /// Derived stats, computed now
    #[inline]
    #[must_use]
    pub fn stats(&self) -> DerivedStats {
        DerivedStats::compute(self.dataset)
    }

    /// The whole dataset
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Owned copy of this view
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            dataset: self.dataset.clone(),
            stats: self.stats(),
        }
    }
}

/// Owned copy of every collection plus derived stats
///
/// Serializes as one flat object: the collections followed by `stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Collections
    #[serde(flatten)]
    pub dataset: Dataset,
    /// Stats at the time of the snapshot
    pub stats: DerivedStats,
}
