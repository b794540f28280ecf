//! ChatOps responder
//!
//! Keyword-routed, markdown-formatted answers computed from a [`StateView`].
//! Routing is checked in order: service status, deployments, costs, then a
//! general summary.

use crate::view::StateView;
use loop_model::{DeploymentStatus, IncidentStatus, Service, ServiceStatus};
use std::fmt::Write as _;

/// Prompts offered before the first question
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Why is payment-service unstable?",
    "Rollback last deployment",
    "Show cost savings this week",
    "What's the MTTR trend?",
];

/// Service reported on when the question names none
pub const DEFAULT_SERVICE: &str = "payment-service";

/// Answer `text` against the current state
#[must_use]
pub fn respond(view: &StateView<'_>, text: &str) -> String {
    let lower = text.to_lowercase();

    if lower.contains("unstable") || lower.contains("status") {
        if let Some(service) = mentioned_service(view, &lower) {
            return service_report(view, service);
        }
    }

    if lower.contains("rollback") || lower.contains("deployment") {
        if let Some(reply) = deployment_report(view) {
            return reply;
        }
    }

    if lower.contains("cost") || lower.contains("savings") {
        return cost_report(view);
    }

    let active = view
        .incidents()
        .iter()
        .filter(|i| i.status == IncidentStatus::Active)
        .count();
    let healthy = view
        .services()
        .iter()
        .filter(|s| s.status == ServiceStatus::Healthy)
        .count();

    format!(
        "I analyzed your request: \"{text}\"\n\n\
         **System Status:** {active} active incidents.\n\
         **Healthy Services:** {healthy}/{total}\n\n\
         Ask me about specific services or incidents.",
        total = view.services().len(),
    )
}

fn mentioned_service<'a>(view: &StateView<'a>, lower: &str) -> Option<&'a Service> {
    let name = view
        .services()
        .iter()
        .find(|s| lower.contains(s.name.as_str()))
        .map_or(DEFAULT_SERVICE, |s| s.name.as_str());
    view.service_named(name)
}

fn service_report(view: &StateView<'_>, service: &Service) -> String {
    if service.status == ServiceStatus::Healthy {
        return format!(
            "**{name}** is currently **healthy**.\n\n\
             - Uptime: {uptime}%\n\
             - Latency: {latency}ms\n\
             - Error Rate: {error_rate}%\n\n\
             No issues detected.",
            name = service.name,
            uptime = service.uptime,
            latency = service.latency,
            error_rate = service.error_rate,
        );
    }

    let incident = view
        .incidents()
        .iter()
        .find(|i| i.service == service.name && i.status == IncidentStatus::Active)
        .map_or("None", |i| i.title.as_str());

    format!(
        "**{name}** is showing **{status}** status (Risk Score: {risk}).\n\n\
         1. **Latency**: {latency}ms\n\
         2. **Error Rate**: {error_rate}%\n\
         3. **Active Incident**: {incident}\n\n\
         **Predicted failure**: {predicted}\n\n\
         **Recommended Action**: Check logs for errors and consider rolling back recent changes.",
        name = service.name,
        status = service.status,
        risk = service.risk_score,
        latency = service.latency,
        error_rate = service.error_rate,
        predicted = service.predicted_failure.as_deref().unwrap_or("None"),
    )
}

fn deployment_report(view: &StateView<'_>) -> Option<String> {
    let deployment = view.deployments().first()?;
    let outcome = if deployment.status == DeploymentStatus::RolledBack {
        "⚠️ This deployment was automatically rolled back due to error rate thresholds."
    } else {
        "Deployment is stable."
    };

    Some(format!(
        "**Last deployment:** {service} {version}\n\n\
         **Status:** {status}\n\
         **Health Score:** {health}%\n\n\
         {outcome}",
        service = deployment.service,
        version = deployment.version,
        status = deployment.status.as_str().to_uppercase(),
        health = deployment.health_score,
    ))
}

fn cost_report(view: &StateView<'_>) -> String {
    let mut reply = format!(
        "**💰 Cost Optimization Report:**\n\n\
         Total identified savings: **${}**\n\n\
         Top recommendations:",
        grouped(view.cost_summary().total_savings),
    );
    for item in view.cost_items() {
        let _ = write!(
            reply,
            "\n- **{}**: Save ${} ({})",
            item.service, item.savings, item.recommendation
        );
    }
    reply
}

/// `9000` -> `"9,000"`
fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
