use loop_core::model::{
    CollectionKind, IncidentStatus, MetricKind, RemediationStatus, ServiceStatus, Severity,
    SERIES_LEN,
};
use loop_core::{ActivationOutcome, ScenarioId, StoreEvent, StoreHandle};
use loop_test_utils::{
    activate_all, current, setup_legacy_store, setup_test_store, RecordingObserver, ALL_TRIGGERS,
    INCIDENT_TRIGGERS,
};
use pretty_assertions::assert_eq;

#[test]
fn test_database_timeout_end_to_end() {
    let mut store = setup_test_store();
    let baseline = store.baseline().clone();

    let outcome = store.activate("log-104").unwrap();
    let activation = outcome.activation().unwrap().clone();
    assert_eq!(activation.scenario, ScenarioId::DatabaseTimeout);

    let state = store.state();
    let db = state.service_named("database-primary").unwrap();
    assert_eq!(db.status, ServiceStatus::Critical);
    assert!(db.uptime.abs() < f64::EPSILON);
    assert!((db.error_rate - 100.0).abs() < f64::EPSILON);
    for name in ["user-service", "auth-service"] {
        assert_eq!(state.service_named(name).unwrap().status, ServiceStatus::Critical);
    }

    let incident = &state.incidents()[0];
    assert_eq!(incident.id, format!("inc-{}", activation.stamp));
    assert_eq!(incident.severity, Severity::Critical);
    assert_eq!(incident.status, IncidentStatus::Active);
    assert_eq!(incident.service, "database-primary");
    assert_eq!(incident.started_at, "Just now");

    let query = &state.database_queries()[0];
    assert!(!query.applied);
    assert_eq!(state.database_queries().len(), baseline.database_queries.len() + 1);

    let remediation = &state.remediations()[0];
    assert_eq!(remediation.status, RemediationStatus::Ready);
    assert_eq!(remediation.target, "database-primary");

    assert_eq!(state.rca_data().service, "database-primary");

    // untouched collections keep their baseline values
    assert_eq!(state.deployments(), baseline.deployments.as_slice());
    assert_eq!(state.audit_entries(), baseline.audit_entries.as_slice());
    assert_eq!(state.chaos_experiments(), baseline.chaos_experiments.as_slice());
    assert_eq!(state.metrics().cpu, baseline.metrics.cpu);
}

#[test]
fn test_payment_failure_structure() {
    let mut store = setup_test_store();
    let before = current(&store);

    store.activate("log-101").unwrap();
    let after = current(&store);

    assert_eq!(after.incidents.len(), before.incidents.len() + 1);
    assert_eq!(after.remediations.len(), before.remediations.len() + 1);
    assert_eq!(after.incidents[1..], before.incidents[..]);
    assert_ne!(after.rca_data, before.rca_data);
    assert_eq!(
        before.changed_collections(&after),
        vec![
            CollectionKind::Services,
            CollectionKind::Incidents,
            CollectionKind::ErrorRateMetrics,
            CollectionKind::Remediations,
            CollectionKind::RcaData,
        ]
    );

    let errors = after.metrics.get(MetricKind::ErrorRate);
    assert_eq!(errors.len(), SERIES_LEN);
    let head = SERIES_LEN - 9;
    assert_eq!(
        errors.points()[..head],
        before.metrics.get(MetricKind::ErrorRate).points()[..head]
    );
}

#[test]
fn test_every_scenario_changes_exactly_its_collections() {
    use CollectionKind::*;

    // trigger, changed collections, added incidents, remediations, experiments, queries
    let table = [
        (
            "log-101",
            vec![Services, Incidents, ErrorRateMetrics, Remediations, RcaData],
            (1, 1, 0, 0),
        ),
        (
            "log-102",
            vec![Services, Incidents, LatencyMetrics, Remediations, RcaData],
            (1, 1, 0, 0),
        ),
        ("log-103", vec![Services, ThroughputMetrics, Remediations], (0, 1, 0, 0)),
        (
            "log-104",
            vec![Services, Incidents, Remediations, RcaData, DatabaseQueries],
            (1, 1, 0, 1),
        ),
        (
            "log-105",
            vec![Services, Incidents, ChaosExperiments, Remediations],
            (1, 1, 1, 0),
        ),
    ];

    for (trigger, changed, (incidents, remediations, experiments, queries)) in table {
        let mut store = setup_test_store();
        let before = current(&store);

        let outcome = store.activate(trigger).unwrap();
        let after = current(&store);

        assert_eq!(before.changed_collections(&after), changed, "{trigger}");
        assert_eq!(outcome.activation().unwrap().touched.len(), changed.len(), "{trigger}");
        assert_eq!(after.incidents.len() - before.incidents.len(), incidents, "{trigger}");
        assert_eq!(
            after.remediations.len() - before.remediations.len(),
            remediations,
            "{trigger}"
        );
        assert_eq!(
            after.chaos_experiments.len() - before.chaos_experiments.len(),
            experiments,
            "{trigger}"
        );
        assert_eq!(
            after.database_queries.len() - before.database_queries.len(),
            queries,
            "{trigger}"
        );
        assert_eq!(after.services.len(), before.services.len(), "{trigger}");
    }
}

#[test]
fn test_high_load_opens_no_incident() {
    let mut store = setup_test_store();
    let before = current(&store);

    store.activate("log-103").unwrap();
    let state = store.state();

    assert_eq!(state.incidents(), before.incidents.as_slice());
    assert_eq!(state.stats().healthy_services, state.services().len());
    for (now, then) in state.services().iter().zip(&before.services) {
        assert!((now.cpu - (then.cpu + 20.0)).abs() < 1e-9);
        assert!((now.uptime - 100.0).abs() < f64::EPSILON);
        assert_eq!(now.risk_score, then.risk_score);
    }
    assert_eq!(state.remediations()[0].status, RemediationStatus::Completed);
}

#[test]
fn test_reset_is_idempotent() {
    let mut store = setup_test_store();
    activate_all(&mut store, &ALL_TRIGGERS);

    store.reset();
    let once = current(&store);
    store.reset();
    let twice = current(&store);

    assert_eq!(once, twice);
    assert_eq!(&twice, store.baseline());
}

#[test]
fn test_legacy_reset_keeps_unlisted_collections() {
    let mut store = setup_legacy_store();
    activate_all(&mut store, &["log-103", "log-105"]);
    let activated = current(&store);

    store.reset();
    let after = current(&store);
    let baseline = store.baseline();

    assert_eq!(after.services, baseline.services);
    assert_eq!(after.incidents, baseline.incidents);
    assert_eq!(after.remediations, baseline.remediations);
    assert_eq!(after.metrics.throughput, activated.metrics.throughput);
    assert_eq!(after.chaos_experiments, activated.chaos_experiments);
    assert_ne!(after.chaos_experiments, baseline.chaos_experiments);
}

#[test]
fn test_incidents_most_recent_first() {
    let mut store = setup_test_store();
    let baseline_incidents = store.baseline().incidents.clone();

    let mut stamps = Vec::new();
    for trigger in INCIDENT_TRIGGERS.iter().chain(INCIDENT_TRIGGERS.iter()) {
        let outcome = store.activate(trigger).unwrap();
        stamps.push(outcome.activation().unwrap().stamp);
    }

    let state = store.state();
    let n = stamps.len();
    let expected: Vec<_> = stamps.iter().rev().map(|s| format!("inc-{s}")).collect();
    let actual: Vec<_> = state.incidents()[..n].iter().map(|i| i.id.clone()).collect();
    assert_eq!(actual, expected);
    assert_eq!(state.incidents()[n..], baseline_incidents[..]);
}

#[test]
fn test_unknown_trigger_is_noop() {
    let mut store = setup_test_store();
    let observer = RecordingObserver::new();
    store.subscribe(observer.clone());
    activate_all(&mut store, &["log-102"]);
    let before = store.snapshot();

    let outcome = store.activate("not-a-real-id").unwrap();
    assert!(matches!(outcome, ActivationOutcome::Ignored { .. }));
    assert_eq!(store.snapshot(), before);
    assert_eq!(observer.len(), 1);
}

#[test]
fn test_subscribers_notified_once_per_change() {
    let mut store = setup_test_store();
    let observer = RecordingObserver::new();
    store.subscribe(observer.clone());

    let baseline_count = store.baseline().incidents.len();
    activate_all(&mut store, &["log-101", "log-103", "unknown", "log-105"]);
    store.reset();

    assert_eq!(observer.activations(), 3);
    assert_eq!(observer.resets(), 1);
    // post-change state is visible to the observer
    assert_eq!(
        observer.incident_counts(),
        vec![baseline_count + 1, baseline_count + 1, baseline_count + 2, baseline_count]
    );

    match observer.events().last() {
        Some(StoreEvent::Reset { collections }) => {
            assert_eq!(collections.len(), CollectionKind::ALL.len());
        }
        other => panic!("expected reset event, got {other:?}"),
    }
}

#[test]
fn test_handle_across_threads() {
    let handle = StoreHandle::new(setup_test_store());
    let observer = RecordingObserver::new();
    handle.subscribe(observer.clone());

    let workers: Vec<_> = INCIDENT_TRIGGERS
        .iter()
        .map(|&trigger| {
            let handle = handle.clone();
            std::thread::spawn(move || handle.activate(trigger).unwrap())
        })
        .collect();
    for worker in workers {
        assert!(worker.join().unwrap().is_applied());
    }

    let snapshot = handle.snapshot();
    assert_eq!(observer.activations(), INCIDENT_TRIGGERS.len());
    assert_eq!(snapshot.dataset.incidents.len(), 7 + INCIDENT_TRIGGERS.len());

    let mut ids: Vec<_> = snapshot.dataset.incidents.iter().map(|i| &i.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), snapshot.dataset.incidents.len());
}
