//! Summary numbers derived from the current dataset

use loop_model::{Dataset, ServiceStatus};
use serde::{Deserialize, Serialize};

/// Mean time to recovery shown on the overview (minutes)
pub const AVG_MTTR_MINUTES: f64 = 14.2;
/// Share of incidents closed by automated remediation (%)
pub const AUTO_REMEDIATION_RATE: f64 = 83.0;
/// Ingest rate shown on the overview (events per second)
pub const EVENTS_PER_SEC: u64 = 4_200_000;
/// Share of alerts that turned out to be noise (%)
pub const FALSE_POSITIVE_RATE: f64 = 3.8;

/// Headline numbers for the dashboard overview
///
/// Never stored; recomputed from the collections on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    /// Number of services
    pub total_services: usize,
    /// Services with status `healthy`
    pub healthy_services: usize,
    /// Incidents that are `active` or `investigating`
    pub active_incidents: usize,
    /// Services with a predicted failure
    pub predicted_failures: usize,
    /// Mean service uptime percentage, 0 when there are no services
    pub uptime: f64,
    /// Sum of cost item savings
    pub total_cost_savings: u64,
    /// Mean time to recovery (minutes), fixed at [`AVG_MTTR_MINUTES`]
    #[serde(rename = "avgMTTR")]
    pub avg_mttr: f64,
    /// Automated remediation rate (%), fixed at [`AUTO_REMEDIATION_RATE`]
    pub auto_remediation_rate: f64,
    /// Ingest rate, fixed at [`EVENTS_PER_SEC`]
    pub events_per_sec: u64,
    /// False positive rate (%), fixed at [`FALSE_POSITIVE_RATE`]
    pub false_positive_rate: f64,
}

impl DerivedStats {
    /// Compute from `dataset`
    #[must_use]
    pub fn compute(dataset: &Dataset) -> Self {
        let services = &dataset.services;

        #[allow(clippy::cast_precision_loss)]
        let uptime = if services.is_empty() {
            0.0
        } else {
            services.iter().map(|s| s.uptime).sum::<f64>() / services.len() as f64
        };

        Self {
            total_services: services.len(),
            healthy_services: services
                .iter()
                .filter(|s| s.status == ServiceStatus::Healthy)
                .count(),
            active_incidents: dataset
                .incidents
                .iter()
                .filter(|i| i.status.is_open())
                .count(),
            predicted_failures: services.iter().filter(|s| s.has_predicted_failure()).count(),
            uptime,
            total_cost_savings: dataset.cost_items.iter().map(|c| c.savings).sum(),
            avg_mttr: AVG_MTTR_MINUTES,
            auto_remediation_rate: AUTO_REMEDIATION_RATE,
            events_per_sec: EVENTS_PER_SEC,
            false_positive_rate: FALSE_POSITIVE_RATE,
        }
    }

    /// Ingest rate in millions with one decimal, e.g. `4.2M`
    #[must_use]
    pub fn events_per_sec_label(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let millions = self.events_per_sec as f64 / 1_000_000.0;
        format!("{millions:.1}M")
    }
}
