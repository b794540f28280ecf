//! Plain-text rendering for terminal output

use loop_core::model::ServiceStatus;
use loop_core::{ActivationOutcome, ScenarioCatalog, StateView};
use std::fmt::Write as _;

/// Overview: stats, open incidents, at-risk services and current RCA
pub(crate) fn summary(state: &StateView<'_>) -> String {
    let stats = state.stats();
    let costs = state.cost_summary();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Services:   {}/{} healthy, mean uptime {:.3}%",
        stats.healthy_services, stats.total_services, stats.uptime
    );
    let _ = writeln!(
        out,
        "Incidents:  {} active, {} predicted failures",
        stats.active_incidents, stats.predicted_failures
    );
    let _ = writeln!(
        out,
        "Response:   MTTR {}m, {}% auto-remediated, {}% false positives, {} events/sec",
        stats.avg_mttr,
        stats.auto_remediation_rate,
        stats.false_positive_rate,
        stats.events_per_sec_label()
    );
    let _ = writeln!(
        out,
        "Costs:      ${} saved of ${} ({}%)",
        costs.total_savings, costs.total_current, costs.savings_rate
    );
    let _ = writeln!(
        out,
        "RCA:        {} ({})",
        state.rca_data().incident,
        state.rca_data().service
    );

    let board = state.incident_board();
    if !board.active.is_empty() {
        out.push_str("\nOpen incidents:\n");
        for incident in &board.active {
            let _ = writeln!(
                out,
                "  {:<18} {:<8} {:<13} {:<22} {}",
                incident.id, incident.severity, incident.status, incident.service, incident.title
            );
        }
    }

    let at_risk = state.at_risk_services();
    if !at_risk.is_empty() {
        out.push_str("\nAt risk:\n");
        for service in at_risk {
            let _ = writeln!(
                out,
                "  {:<22} risk {:>3}  {:<8} {}",
                service.name,
                service.risk_score,
                service.status,
                service.predicted_failure.as_deref().unwrap_or("-")
            );
        }
    }

    let down: Vec<_> = state
        .services()
        .iter()
        .filter(|s| s.status == ServiceStatus::Critical)
        .map(|s| s.name.as_str())
        .collect();
    if !down.is_empty() {
        let _ = write!(out, "\nCritical: {}\n", down.join(", "));
    }

    out
}

/// One line per trigger log with the scenario it activates and its effect
pub(crate) fn logs(state: &StateView<'_>, catalog: &ScenarioCatalog) -> String {
    let mut out = String::new();
    for log in state.detailed_logs() {
        let info = catalog.resolve(&log.id).map(|id| id.info());
        let _ = writeln!(
            out,
            "{:<8} {:<7} {:<22} {:<28} {}",
            log.id,
            log.level,
            log.source,
            info.map_or("-", |i| i.title),
            info.map_or("no scenario", |i| i.summary)
        );
    }
    out
}

/// One line per activation attempt
pub(crate) fn outcome(outcome: &ActivationOutcome) -> String {
    match outcome {
        ActivationOutcome::Applied(activation) => {
            let touched: Vec<_> = activation.touched.iter().map(|k| k.as_str()).collect();
            format!(
                "activated {} (stamp {}): {}",
                activation.scenario,
                activation.stamp,
                touched.join(", ")
            )
        }
        ActivationOutcome::Ignored { trigger } => format!("ignored unknown trigger {trigger:?}"),
    }
}
