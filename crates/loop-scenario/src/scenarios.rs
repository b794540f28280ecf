//! Patch functions for each catalogued scenario
//!
//! Every function follows the same arc: detection (service vitals and a
//! metric spike), diagnosis (incident and, where known, a new RCA) and
//! remediation.

use crate::catalog::ActivationContext;
use crate::patch::{CollectionPatch, MetricPatch, PatchSet, ServiceUpdate};
use loop_model::{
    ChaosExperiment, ChaosStatus, ChaosType, DatabaseQuery, Dataset, Incident, IncidentStatus,
    MetricKind, RcaData, Remediation, RemediationStatus, RemediationType, ServiceStatus, Severity,
    TimelineEvent,
};

const JUST_NOW: &str = "Just now";

fn new_incident(
    ctx: &ActivationContext,
    title: &str,
    severity: Severity,
    status: IncidentStatus,
    service: &str,
    root_cause: &str,
) -> Incident {
    Incident {
        id: ctx.incident_id(),
        title: title.to_string(),
        severity,
        status,
        service: service.to_string(),
        started_at: JUST_NOW.to_string(),
        resolved_at: None,
        mttr: None,
        auto_remediated: false,
        root_cause: Some(root_cause.to_string()),
    }
}

fn new_remediation(
    ctx: &ActivationContext,
    action: &str,
    target: &str,
    status: RemediationStatus,
    kind: RemediationType,
    reason: &str,
) -> Remediation {
    Remediation {
        id: ctx.remediation_id(),
        action: action.to_string(),
        target: target.to_string(),
        status,
        kind,
        time: JUST_NOW.to_string(),
        reason: reason.to_string(),
    }
}

fn spike(kind: MetricKind, magnitude: f64) -> CollectionPatch {
    CollectionPatch::Metric {
        kind,
        patch: MetricPatch::Spike { magnitude },
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// `log-101`: upstream payment provider outage
pub(crate) fn payment_failure(_dataset: &Dataset, ctx: &ActivationContext) -> PatchSet {
    PatchSet::new()
        .with(CollectionPatch::UpdateServices(vec![
            (
                "svc-2".into(),
                ServiceUpdate::new()
                    .with_status(ServiceStatus::Critical)
                    .with_error_rate(15.5)
                    .with_latency(450.0)
                    .with_risk_score(98),
            ),
            (
                "svc-1".into(),
                ServiceUpdate::new()
                    .with_status(ServiceStatus::Warning)
                    .with_error_rate(2.1),
            ),
        ]))
        .with(CollectionPatch::PrependIncident(new_incident(
            ctx,
            "Payment Gateway Latency Spike",
            Severity::Critical,
            IncidentStatus::Active,
            "payment-service",
            "3rd Party API Timeout",
        )))
        .with(spike(MetricKind::ErrorRate, 25.0))
        .with(CollectionPatch::PrependRemediation(new_remediation(
            ctx,
            "Reroute to Backup Gateway",
            "payment-service",
            RemediationStatus::Executing,
            RemediationType::Reroute,
            "Primary gateway unresponsive (504 Gateway Timeout)",
        )))
        .with(CollectionPatch::ReplaceRca(RcaData {
            incident: "Payment Service Outcome Failure".into(),
            service: "payment-service".into(),
            timeline: vec![
                TimelineEvent::new("T-2min", "Gateway response time > 5000ms", "metric"),
                TimelineEvent::new("T-1min", "Circuit breaker status: OPEN", "alert"),
                TimelineEvent::new("T-0", "Transaction failures detected", "incident"),
            ],
            root_cause: "Upstream provider 'Stripe' experiencing regional outage in us-east-1."
                .into(),
            affected_services: strings(&["payment-service", "checkout-frontend", "order-service"]),
            recommendation: "Failover to PayPal/Square for 100% of traffic until recovery.".into(),
        }))
}

/// `log-102`: search traffic spike outruns the autoscaler
pub(crate) fn gateway_latency(_dataset: &Dataset, ctx: &ActivationContext) -> PatchSet {
    PatchSet::new()
        .with(CollectionPatch::UpdateServices(vec![
            (
                "svc-1".into(),
                ServiceUpdate::new()
                    .with_status(ServiceStatus::Warning)
                    .with_latency(850.0)
                    .with_risk_score(75),
            ),
            (
                "svc-6".into(),
                ServiceUpdate::new()
                    .with_status(ServiceStatus::Degraded)
                    .with_latency(400.0),
            ),
        ]))
        .with(CollectionPatch::PrependIncident(new_incident(
            ctx,
            "High Latency on Search API",
            Severity::High,
            IncidentStatus::Investigating,
            "api-gateway",
            "Unexpected Traffic Spike",
        )))
        .with(spike(MetricKind::Latency, 600.0))
        .with(CollectionPatch::PrependRemediation(new_remediation(
            ctx,
            "Scale up api-gateway (3->6 replicas)",
            "api-gateway",
            RemediationStatus::Executing,
            RemediationType::Scale,
            "P99 Latency > 800ms threshold breached",
        )))
        .with(CollectionPatch::ReplaceRca(RcaData {
            incident: "Search API Latency Degradation".into(),
            service: "api-gateway".into(),
            timeline: vec![
                TimelineEvent::new("T-10min", "Traffic spike: +400% RPS", "metric"),
                TimelineEvent::new("T-5min", "HPA max replicas reached (3)", "alert"),
                TimelineEvent::new("T-0", "Client timeout increase detected", "incident"),
            ],
            root_cause: "Marketing campaign 'Summer Sale' triggered unpredicted load. \
                         Autoscaler config too conservative."
                .into(),
            affected_services: strings(&["api-gateway", "search-service"]),
            recommendation: "Increase HPA max replicas to 10 and adjust CPU target to 60%.".into(),
        }))
}

/// `log-103`: login surge absorbed by pre-emptive scaling
///
/// Every service goes healthy at full uptime with 20 points more CPU than it
/// currently has. No incident is opened.
pub(crate) fn high_load_healthy(dataset: &Dataset, ctx: &ActivationContext) -> PatchSet {
    let updates = dataset
        .services
        .iter()
        .map(|s| {
            (
                s.id.clone(),
                ServiceUpdate::new()
                    .with_status(ServiceStatus::Healthy)
                    .with_cpu(s.cpu + 20.0)
                    .with_uptime(100.0),
            )
        })
        .collect();

    PatchSet::new()
        .with(CollectionPatch::UpdateServices(updates))
        .with(spike(MetricKind::Throughput, 5000.0))
        .with(CollectionPatch::PrependRemediation(new_remediation(
            ctx,
            "Pre-emptive scaling",
            "auth-service",
            RemediationStatus::Completed,
            RemediationType::Scale,
            "Login spike detected (10k auth/sec)",
        )))
}

/// `log-104`: connection pool exhausted by a locking query
pub(crate) fn database_timeout(_dataset: &Dataset, ctx: &ActivationContext) -> PatchSet {
    let critical = || ServiceUpdate::new().with_status(ServiceStatus::Critical);

    PatchSet::new()
        .with(CollectionPatch::UpdateServices(vec![
            (
                "svc-7".into(),
                critical().with_uptime(0.0).with_error_rate(100.0),
            ),
            ("svc-3".into(), critical()),
            ("svc-4".into(), critical()),
        ]))
        .with(CollectionPatch::PrependIncident(new_incident(
            ctx,
            "Database Connection Pool Exhaustion",
            Severity::Critical,
            IncidentStatus::Active,
            "database-primary",
            "Blocked Queries",
        )))
        .with(CollectionPatch::PrependDatabaseQuery(DatabaseQuery {
            query: "SELECT * FROM large_table WHERE unindexed_col = ? FOR UPDATE".into(),
            time: "45.2s".into(),
            optimized: "Pending".into(),
            improvement: "TBD".into(),
            fix: "Kill process & Add Index".into(),
            applied: false,
        }))
        .with(CollectionPatch::PrependRemediation(new_remediation(
            ctx,
            "Kill blocking queries (PID: 9921)",
            "database-primary",
            RemediationStatus::Ready,
            RemediationType::Restart,
            "Active queries > Max Pool Size (100)",
        )))
        .with(CollectionPatch::ReplaceRca(RcaData {
            incident: "Database Outage (Pool Exhaustion)".into(),
            service: "database-primary".into(),
            timeline: vec![
                TimelineEvent::new("T-20min", "Bad deployment: v3.4.0", "deploy"),
                TimelineEvent::new("T-5min", "Active connections: 100/100", "metric"),
                TimelineEvent::new("T-0", "New connections rejected", "incident"),
            ],
            root_cause: "Deployment v3.4.0 introduced a 'SELECT * FOR UPDATE' lock on the main \
                         user table without an index."
                .into(),
            affected_services: strings(&["database-primary", "user-service", "auth-service"]),
            recommendation: "Immediate rollback of v3.4.0 and detailed query review.".into(),
        }))
}

/// `log-105`: email queue backlog starves notification workers
pub(crate) fn notification_backlog(_dataset: &Dataset, ctx: &ActivationContext) -> PatchSet {
    PatchSet::new()
        .with(CollectionPatch::UpdateServices(vec![(
            "svc-5".into(),
            ServiceUpdate::new()
                .with_status(ServiceStatus::Degraded)
                .with_latency(1200.0)
                .with_risk_score(45),
        )]))
        .with(CollectionPatch::PrependIncident(new_incident(
            ctx,
            "Email Delivery Delay",
            Severity::Medium,
            IncidentStatus::Investigating,
            "notification-service",
            "Queue Backlog",
        )))
        .with(CollectionPatch::PrependChaosExperiment(ChaosExperiment {
            id: ctx.chaos_id(),
            name: "Worker Starvation Test".into(),
            kind: ChaosType::CpuStress,
            target: "notification-service".into(),
            status: ChaosStatus::Running,
            resilience: 60,
            recovery_time: 0,
        }))
        .with(CollectionPatch::PrependRemediation(new_remediation(
            ctx,
            "Add Worker Pods (+5)",
            "notification-service",
            RemediationStatus::Executing,
            RemediationType::Scale,
            "Queue depth > 5000 messages",
        )))
}
