//! Page-level queries over a [`StateView`]

use crate::view::StateView;
use loop_model::{DetailedLog, Incident, IncidentStatus, Service};
use serde::Serialize;

/// Services with a risk score above this are listed as at risk
pub const AT_RISK_THRESHOLD: u8 = 40;

/// Incidents partitioned for the incident board
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncidentBoard<'a> {
    /// `active` and `investigating`, in collection order
    pub active: Vec<&'a Incident>,
    /// `predicted`
    pub predicted: Vec<&'a Incident>,
    /// `resolved`
    pub resolved: Vec<&'a Incident>,
}

/// Totals over the cost items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    /// Sum of current costs
    pub total_current: u64,
    /// Sum of optimized costs
    pub total_optimized: u64,
    /// Sum of savings
    pub total_savings: u64,
    /// Savings as a rounded percentage of current cost
    pub savings_rate: u64,
}

impl<'a> StateView<'a> {
    /// Incidents grouped by lifecycle
    #[must_use]
    pub fn incident_board(&self) -> IncidentBoard<'a> {
        let mut board = IncidentBoard::default();
        for incident in self.incidents() {
            match incident.status {
                IncidentStatus::Active | IncidentStatus::Investigating => {
                    board.active.push(incident);
                }
                IncidentStatus::Predicted => board.predicted.push(incident),
                IncidentStatus::Resolved => board.resolved.push(incident),
            }
        }
        board
    }

    /// Services above [`AT_RISK_THRESHOLD`], highest risk first
    #[must_use]
    pub fn at_risk_services(&self) -> Vec<&'a Service> {
        let mut services: Vec<_> = self
            .services()
            .iter()
            .filter(|s| s.risk_score > AT_RISK_THRESHOLD)
            .collect();
        services.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
        services
    }

    /// Cost totals
    #[must_use]
    pub fn cost_summary(&self) -> CostSummary {
        let items = self.cost_items();
        let total_current: u64 = items.iter().map(|c| c.current_cost).sum();
        let total_savings: u64 = items.iter().map(|c| c.savings).sum();

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let savings_rate = if total_current == 0 {
            0
        } else {
            (total_savings as f64 / total_current as f64 * 100.0).round() as u64
        };

        CostSummary {
            total_current,
            total_optimized: items.iter().map(|c| c.optimized_cost).sum(),
            total_savings,
            savings_rate,
        }
    }

    /// Service by name
    #[inline]
    #[must_use]
    pub fn service_named(&self, name: &str) -> Option<&'a Service> {
        self.dataset().service_named(name)
    }

    /// Trigger log by id
    #[must_use]
    pub fn log(&self, id: &str) -> Option<&'a DetailedLog> {
        self.detailed_logs().iter().find(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loop_scenario::baseline;

    #[test]
    fn board_partitions_baseline() {
        let dataset = baseline::dataset_with_seed(5);
        let board = StateView::new(&dataset).incident_board();

        let ids = |v: &[&Incident]| v.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&board.active), vec!["inc-1", "inc-3"]);
        assert_eq!(ids(&board.predicted), vec!["inc-2"]);
        assert_eq!(board.resolved.len(), 4);
    }

    #[test]
    fn at_risk_sorted_descending() {
        let dataset = baseline::dataset_with_seed(5);
        let names: Vec<_> = StateView::new(&dataset)
            .at_risk_services()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["redis-cache", "payment-service", "notification-service"]);
    }

    #[test]
    fn baseline_cost_summary() {
        let dataset = baseline::dataset_with_seed(5);
        let summary = StateView::new(&dataset).cost_summary();
        assert_eq!(
            summary,
            CostSummary {
                total_current: 29_000,
                total_optimized: 20_000,
                total_savings: 9_000,
                savings_rate: 31,
            }
        );
    }

    #[test]
    fn empty_costs_have_zero_rate() {
        let mut dataset = baseline::dataset_with_seed(5);
        dataset.cost_items.clear();
        assert_eq!(StateView::new(&dataset).cost_summary(), CostSummary::default());
    }

    #[test]
    fn lookups() {
        let dataset = baseline::dataset_with_seed(5);
        let view = StateView::new(&dataset);
        assert_eq!(view.service_named("cdn-edge").map(|s| s.id.as_str()), Some("svc-10"));
        assert!(view.service_named("mainframe").is_none());
        assert_eq!(view.log("log-104").map(|l| l.source.as_str()), Some("database-primary"));
        assert!(view.log("log-999").is_none());
    }
}
