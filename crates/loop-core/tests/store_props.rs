use loop_core::model::{IncidentStatus, SERIES_LEN};
use loop_core::{LoopConfig, SimulationStore};
use proptest::prelude::*;

fn trigger() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("log-101"),
        Just("log-102"),
        Just("log-103"),
        Just("log-104"),
        Just("log-105"),
        Just("log-999"),
        Just(""),
    ]
}

proptest! {
    #[test]
    fn prop_activation_sequences_keep_invariants(
        seed in any::<u64>(),
        triggers in proptest::collection::vec(trigger(), 0..12),
    ) {
        let mut store = SimulationStore::new(LoopConfig::new().with_seed(seed));
        let baseline = store.baseline().clone();

        let mut applied = 0;
        for trigger in &triggers {
            let outcome = store.activate(trigger).unwrap();
            if outcome.is_applied() {
                applied += 1;
            }
        }

        let state = store.state();
        prop_assert!(state.incidents().len() >= baseline.incidents.len());
        prop_assert!(state.remediations().len() == baseline.remediations.len() + applied);

        for kind in loop_core::model::MetricKind::ALL {
            let series = state.metrics().get(kind);
            prop_assert_eq!(series.len(), SERIES_LEN);
            prop_assert!(series.values().all(|v| v >= 0.0));
        }

        for service in state.services() {
            prop_assert!(service.risk_score <= 100);
        }

        let stats = state.stats();
        let open = state.incidents().iter().filter(|i| i.status.is_open()).count();
        prop_assert_eq!(stats.active_incidents, open);
        prop_assert!(state
            .incidents()
            .iter()
            .all(|i| i.status != IncidentStatus::Resolved || i.resolved_at.is_some()));

        store.reset();
        prop_assert_eq!(store.state().dataset(), &baseline);
    }
}
