//! Baseline dataset
//!
//! The fixed initial value of every collection. Scenarios refer to the
//! service ids defined here (`svc-1` .. `svc-10`).

use loop_metrics::{generate, Spike};
use loop_model::{
    AuditEntry, ChaosExperiment, ChaosStatus, ChaosType, CostItem, DatabaseQuery, Dataset,
    Deployment, DeploymentStatus, DetailedLog, Incident, IncidentStatus, LogLevel, LogReport,
    MetricKind, Metrics, RcaData, Remediation, RemediationStatus, RemediationType, Service,
    ServiceStatus, Severity, TimelineEvent,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::json;

/// Generator parameters for one baseline series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesProfile {
    /// Series
    pub kind: MetricKind,
    /// Centre value
    pub base: f64,
    /// Peak-to-peak noise
    pub variance: f64,
    /// Historical anomaly, if any
    pub spike: Option<Spike>,
}

/// Profiles used to build the baseline metric series
pub const SERIES_PROFILES: [SeriesProfile; 5] = [
    SeriesProfile {
        kind: MetricKind::Cpu,
        base: 45.0,
        variance: 15.0,
        spike: Some(Spike { at: 48, magnitude: 40.0 }),
    },
    SeriesProfile {
        kind: MetricKind::Memory,
        base: 62.0,
        variance: 10.0,
        spike: Some(Spike { at: 50, magnitude: 25.0 }),
    },
    SeriesProfile {
        kind: MetricKind::Latency,
        base: 35.0,
        variance: 20.0,
        spike: Some(Spike { at: 45, magnitude: 200.0 }),
    },
    SeriesProfile {
        kind: MetricKind::ErrorRate,
        base: 0.5,
        variance: 0.8,
        spike: Some(Spike { at: 47, magnitude: 8.0 }),
    },
    SeriesProfile {
        kind: MetricKind::Throughput,
        base: 8500.0,
        variance: 2000.0,
        spike: None,
    },
];

/// Full baseline dataset, drawing metric noise from `rng`
pub fn dataset<R: Rng + ?Sized>(rng: &mut R) -> Dataset {
    Dataset {
        services: services(),
        incidents: incidents(),
        metrics: metrics(rng),
        deployments: deployments(),
        audit_entries: audit_entries(),
        chaos_experiments: chaos_experiments(),
        cost_items: cost_items(),
        detailed_logs: detailed_logs(),
        remediations: remediations(),
        rca_data: rca_data(),
        database_queries: database_queries(),
    }
}

/// Full baseline dataset with reproducible metric noise
#[must_use]
pub fn dataset_with_seed(seed: u64) -> Dataset {
    dataset(&mut StdRng::seed_from_u64(seed))
}

/// Baseline metric series
pub fn metrics<R: Rng + ?Sized>(rng: &mut R) -> Metrics {
    let mut metrics = Metrics::default();
    for profile in &SERIES_PROFILES {
        *metrics.get_mut(profile.kind) =
            generate(profile.base, profile.variance, profile.spike, rng);
    }
    metrics
}

#[allow(clippy::too_many_arguments)]
fn service(
    n: u8,
    name: &str,
    status: ServiceStatus,
    uptime: f64,
    latency: f64,
    error_rate: f64,
    cpu: f64,
    memory: f64,
    risk_score: u8,
    prediction: Option<(&str, u8)>,
    dependencies: &[&str],
) -> Service {
    Service {
        id: format!("svc-{n}"),
        name: name.to_string(),
        status,
        uptime,
        latency,
        error_rate,
        cpu,
        memory,
        risk_score,
        predicted_failure: prediction.map(|(eta, _)| eta.to_string()),
        confidence: prediction.map(|(_, confidence)| confidence),
        dependencies: dependencies.iter().map(ToString::to_string).collect(),
    }
}

/// Baseline services
#[must_use]
#[rustfmt::skip]
pub fn services() -> Vec<Service> {
    use ServiceStatus::{Critical, Degraded, Healthy, Warning};

    let db_cache = ["database-primary", "redis-cache"];
    vec![
        service(1, "api-gateway", Healthy, 99.99, 12.0, 0.01, 34.0, 52.0, 5, None,
            &["auth-service", "user-service", "payment-service"]),
        service(2, "payment-service", Warning, 99.91, 245.0, 2.3, 78.0, 81.0, 72, Some(("18 min", 89)),
            &db_cache),
        service(3, "user-service", Healthy, 99.98, 18.0, 0.05, 22.0, 38.0, 8, None, &db_cache),
        service(4, "auth-service", Healthy, 99.97, 24.0, 0.12, 28.0, 44.0, 12, None, &db_cache),
        service(5, "notification-service", Degraded, 99.82, 156.0, 1.8, 65.0, 72.0, 58, Some(("42 min", 76)),
            &["message-queue", "email-provider"]),
        service(6, "search-service", Healthy, 99.95, 45.0, 0.2, 41.0, 55.0, 15, None, &["elasticsearch"]),
        service(7, "database-primary", Healthy, 99.999, 3.0, 0.001, 45.0, 68.0, 3, None, &[]),
        service(8, "redis-cache", Critical, 98.5, 890.0, 12.5, 95.0, 94.0, 95, Some(("3 min", 97)), &[]),
        service(9, "message-queue", Healthy, 99.96, 8.0, 0.03, 30.0, 42.0, 7, None, &[]),
        service(10, "cdn-edge", Healthy, 99.99, 5.0, 0.005, 15.0, 25.0, 2, None, &[]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn incident(
    n: u8,
    title: &str,
    severity: Severity,
    status: IncidentStatus,
    service: &str,
    started_at: &str,
    resolution: Option<(&str, u32)>,
    auto_remediated: bool,
    root_cause: Option<&str>,
) -> Incident {
    Incident {
        id: format!("inc-{n}"),
        title: title.to_string(),
        severity,
        status,
        service: service.to_string(),
        started_at: started_at.to_string(),
        resolved_at: resolution.map(|(at, _)| at.to_string()),
        mttr: resolution.map(|(_, mttr)| mttr),
        auto_remediated,
        root_cause: root_cause.map(ToString::to_string),
    }
}

/// Baseline incidents, most recent first
#[must_use]
pub fn incidents() -> Vec<Incident> {
    use IncidentStatus::{Active, Investigating, Predicted, Resolved};

    vec![
        incident(1, "Redis cache memory exhaustion", Severity::Critical, Active, "redis-cache",
            "2 min ago", None, false, Some("Memory leak in session handler")),
        incident(2, "Payment latency spike detected", Severity::High, Predicted, "payment-service",
            "Predicted in 18 min", None, false, None),
        incident(3, "Notification delivery delays", Severity::Medium, Investigating,
            "notification-service", "12 min ago", None, false, None),
        incident(4, "Auth token refresh failure", Severity::High, Resolved, "auth-service",
            "1h ago", Some(("45 min ago", 15)), true, Some("Certificate expiry")),
        incident(5, "Search index corruption", Severity::Medium, Resolved, "search-service",
            "3h ago", Some(("2h ago", 60)), true, Some("Disk space threshold")),
        incident(6, "API gateway 502 errors", Severity::Critical, Resolved, "api-gateway",
            "6h ago", Some(("5.5h ago", 30)), true, Some("Upstream timeout")),
        incident(7, "CDN cache invalidation storm", Severity::Low, Resolved, "cdn-edge",
            "1d ago", Some(("1d ago", 8)), true, Some("Config push")),
    ]
}

fn cost(service: &str, current_cost: u64, optimized_cost: u64, recommendation: &str) -> CostItem {
    CostItem {
        service: service.to_string(),
        current_cost,
        optimized_cost,
        savings: current_cost - optimized_cost,
        recommendation: recommendation.to_string(),
    }
}

/// Baseline cost items
#[must_use]
pub fn cost_items() -> Vec<CostItem> {
    vec![
        cost("compute-cluster-prod", 12400, 8900, "Right-size 12 overprovisioned instances"),
        cost("storage-s3-archives", 4200, 1800, "Move cold data to Glacier"),
        cost("database-replicas", 6800, 5100, "Consolidate 3 idle read replicas"),
        cost("load-balancers", 2100, 1400, "Remove 4 unused ALBs"),
        cost("logging-pipeline", 3500, 2800, "Reduce log retention to 30 days"),
    ]
}

fn deployment(
    n: u8,
    service: &str,
    version: &str,
    status: DeploymentStatus,
    progress: u8,
    started_at: &str,
    health_score: u8,
) -> Deployment {
    Deployment {
        id: format!("dep-{n}"),
        service: service.to_string(),
        version: version.to_string(),
        status,
        progress,
        started_at: started_at.to_string(),
        health_score,
    }
}

/// Baseline deployments, most recent first
#[must_use]
pub fn deployments() -> Vec<Deployment> {
    use DeploymentStatus::{Canary, Completed, RolledBack, Rolling};

    vec![
        deployment(1, "payment-service", "v2.14.3", Canary, 25, "10 min ago", 94),
        deployment(2, "user-service", "v3.8.1", Rolling, 72, "25 min ago", 99),
        deployment(3, "api-gateway", "v5.2.0", Completed, 100, "2h ago", 100),
        deployment(4, "search-service", "v1.12.0", RolledBack, 45, "4h ago", 42),
    ]
}

fn audit(
    n: u8,
    action: &str,
    actor: &str,
    target: &str,
    timestamp: &str,
    hash: &str,
) -> AuditEntry {
    AuditEntry {
        id: format!("aud-{n}"),
        action: action.to_string(),
        actor: actor.to_string(),
        target: target.to_string(),
        timestamp: timestamp.to_string(),
        hash: hash.to_string(),
        verified: true,
    }
}

/// Baseline audit trail, most recent first
#[must_use]
pub fn audit_entries() -> Vec<AuditEntry> {
    vec![
        audit(1, "Auto-remediation: Service restart", "Loop AI", "redis-cache", "2 min ago",
            "0xa3f2...8b1c"),
        audit(2, "Deployment initiated", "CI/CD Pipeline", "payment-service v2.14.3", "10 min ago",
            "0xb7d1...4e2a"),
        audit(3, "Auto-scale up", "Loop AI", "notification-service (3→5 pods)", "15 min ago",
            "0xc9e4...7f3b"),
        audit(4, "Config change", "admin@company.com", "api-gateway rate limits", "1h ago",
            "0xd2f8...1a5c"),
        audit(5, "Rollback executed", "Loop AI", "search-service v1.12.0 → v1.11.8", "4h ago",
            "0xe5a3...9d4e"),
    ]
}

fn chaos(
    n: u8,
    name: &str,
    kind: ChaosType,
    target: &str,
    status: ChaosStatus,
    resilience: u8,
    recovery_time: u32,
) -> ChaosExperiment {
    ChaosExperiment {
        id: format!("chaos-{n}"),
        name: name.to_string(),
        kind,
        target: target.to_string(),
        status,
        resilience,
        recovery_time,
    }
}

/// Baseline chaos experiments
#[must_use]
#[rustfmt::skip]
pub fn chaos_experiments() -> Vec<ChaosExperiment> {
    vec![
        chaos(1, "Redis failover test", ChaosType::PodKill, "redis-cache", ChaosStatus::Running, 72, 45),
        chaos(2, "Payment latency injection", ChaosType::Latency, "payment-service",
            ChaosStatus::Completed, 88, 12),
        chaos(3, "Network partition sim", ChaosType::NetworkDrop, "database-primary",
            ChaosStatus::Completed, 95, 8),
        chaos(4, "CPU stress test", ChaosType::CpuStress, "api-gateway", ChaosStatus::Scheduled, 0, 0),
    ]
}

/// Trigger logs; each id activates the scenario of the same trigger
#[must_use]
pub fn detailed_logs() -> Vec<DetailedLog> {
    vec![
        DetailedLog {
            id: "log-101".into(),
            timestamp: "2024-05-20T10:30:00Z".into(),
            level: LogLevel::Error,
            source: "payment-service".into(),
            message: "Upstream Payment Gateway Timeout (504)".into(),
            report: LogReport {
                stack_trace: Some(
                    "GatewayTimeoutError: Upstream provider failed to respond within 5000ms\n    \
                     at PaymentProvider.charge (src/providers/stripe.ts:112:7)\n    \
                     at process.metrics (src/monitoring/latency.ts:45:3)"
                        .into(),
                ),
                request_params: Some(json!({
                    "amount": 1250.00,
                    "currency": "USD",
                    "provider": "Stripe-US"
                })),
                user_id: Some("user-8821".into()),
                context: Some(json!({
                    "transactionId": "tx-9928-xkw",
                    "region": "us-east-1",
                    "attempt": 3
                })),
                performance_metrics: None,
            },
        },
        DetailedLog {
            id: "log-102".into(),
            timestamp: "2024-05-20T10:32:15Z".into(),
            level: LogLevel::Warning,
            source: "api-gateway".into(),
            message: "High latency detected on /api/v1/search (P99 > 800ms)".into(),
            report: LogReport {
                performance_metrics: Some(json!({
                    "duration": 2500,
                    "threshold": 800,
                    "p95": 2100
                })),
                context: Some(json!({
                    "endpoint": "/api/v1/search",
                    "query": "?q=summer+sale",
                    "clientIp": "192.168.1.105"
                })),
                ..LogReport::default()
            },
        },
        DetailedLog {
            id: "log-103".into(),
            timestamp: "2024-05-20T10:35:42Z".into(),
            level: LogLevel::Info,
            source: "auth-service".into(),
            message: "Auth Traffic Spike Detected (10k req/sec)".into(),
            report: LogReport {
                user_id: Some("system".into()),
                context: Some(json!({
                    "provider": "google-oauth",
                    "region": "global",
                    "activeSessions": 85000
                })),
                ..LogReport::default()
            },
        },
        DetailedLog {
            id: "log-104".into(),
            timestamp: "2024-05-20T10:40:05Z".into(),
            level: LogLevel::Error,
            source: "database-primary".into(),
            message: "Connection timeout: Active connections limit reached (100/100)".into(),
            report: LogReport {
                stack_trace: Some(
                    "TimeoutError: ResourceRequest timed out\n    \
                     at internal/pool/ResourceRequest.js:52:9\n    \
                     at Object.callback (internal/pool/ResourceRequest.js:45:10)"
                        .into(),
                ),
                context: Some(json!({
                    "poolSize": 100,
                    "activeConnections": 100,
                    "waitingRequests": 250
                })),
                performance_metrics: Some(json!({ "waitTime": 5005, "timeout": 5000 })),
                ..LogReport::default()
            },
        },
        DetailedLog {
            id: "log-105".into(),
            timestamp: "2024-05-20T10:45:00Z".into(),
            level: LogLevel::Warning,
            source: "notification-service".into(),
            message: "Email Queue Backlog Critical (>5000 pending)".into(),
            report: LogReport {
                context: Some(json!({
                    "queue": "email-delivery",
                    "dlq_size": 15,
                    "oldest_message": "45000ms"
                })),
                performance_metrics: Some(json!({ "queueDepth": 5240, "processingTime": 15 })),
                ..LogReport::default()
            },
        },
    ]
}

fn remediation(
    id: u64,
    action: &str,
    target: &str,
    status: RemediationStatus,
    kind: RemediationType,
    time: &str,
    reason: &str,
) -> Remediation {
    Remediation {
        id,
        action: action.to_string(),
        target: target.to_string(),
        status,
        kind,
        time: time.to_string(),
        reason: reason.to_string(),
    }
}

/// Baseline remediations, most recent first
#[must_use]
pub fn remediations() -> Vec<Remediation> {
    use RemediationStatus::{Completed, Executing, Ready};
    use RemediationType::{Reroute, Restart, Rollback, Scale};

    vec![
        remediation(1, "Service restart", "redis-cache", Executing, Restart, "Now",
            "Memory exhaustion detected (94% usage, OOM threshold breach)"),
        remediation(2, "Auto-scale up (3→5 pods)", "notification-service", Completed, Scale,
            "15 min ago", "Latency spike: P99 > 150ms threshold"),
        remediation(3, "Traffic reroute", "payment-service", Ready, Reroute, "Pending",
            "Predicted failure in 18 min (89% confidence)"),
        remediation(4, "Rollback v1.12.0 → v1.11.8", "search-service", Completed, Rollback,
            "4h ago", "Error rate exceeded 5% post-deploy"),
        remediation(5, "Certificate renewal", "auth-service", Completed, Restart, "1h ago",
            "TLS certificate expired, auto-renewed from vault"),
    ]
}

/// Baseline root-cause analysis
#[must_use]
pub fn rca_data() -> RcaData {
    RcaData {
        incident: "Redis cache memory exhaustion".into(),
        service: "redis-cache".into(),
        timeline: vec![
            TimelineEvent::new("T-45min", "Deploy: session-handler v2.3.1", "deploy"),
            TimelineEvent::new("T-30min", "Memory growth rate +12%/min detected", "metric"),
            TimelineEvent::new("T-15min", "Cache eviction rate spiked 400%", "metric"),
            TimelineEvent::new("T-5min", "OOM warning threshold (90%) breached", "alert"),
            TimelineEvent::new("T-2min", "Connection pool saturation", "trace"),
            TimelineEvent::new("T-0", "Service degradation — latency >800ms", "incident"),
        ],
        root_cause: "Memory leak in session-handler v2.3.1: Sessions not released after JWT \
                     refresh flow. Commit abc1234 introduced unbounded session map."
            .into(),
        affected_services: vec![
            "redis-cache".into(),
            "auth-service".into(),
            "payment-service".into(),
            "user-service".into(),
        ],
        recommendation: "Rollback session-handler to v2.3.0 or apply hotfix for session cleanup \
                         on JWT refresh."
            .into(),
    }
}

fn query(
    sql: &str,
    time: &str,
    optimized: &str,
    improvement: &str,
    fix: &str,
    applied: bool,
) -> DatabaseQuery {
    DatabaseQuery {
        query: sql.to_string(),
        time: time.to_string(),
        optimized: optimized.to_string(),
        improvement: improvement.to_string(),
        fix: fix.to_string(),
        applied,
    }
}

/// Baseline database query findings
#[must_use]
#[rustfmt::skip]
pub fn database_queries() -> Vec<DatabaseQuery> {
    vec![
        query("SELECT * FROM orders WHERE user_id = ? AND status = 'pending'", "2.4s", "45ms", "98%",
            "Add composite index on (user_id, status)", true),
        query("SELECT COUNT(*) FROM logs WHERE timestamp > NOW() - INTERVAL 1 DAY", "8.2s", "120ms",
            "98.5%", "Add partitioned index on timestamp", false),
        query("SELECT u.*, o.* FROM users u JOIN orders o ON u.id = o.user_id", "1.8s", "90ms", "95%",
            "Add covering index, limit columns", true),
        query("UPDATE sessions SET last_active = NOW() WHERE session_id = ?", "450ms", "12ms", "97%",
            "Add primary key index on session_id", false),
    ]
}
