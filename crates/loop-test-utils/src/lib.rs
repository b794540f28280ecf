//! Testing utilities for Loop workspace
//!
//! Shared fixtures and observers for integration tests.

#![allow(missing_docs)]

use loop_core::{
    LoopConfig, ResetPolicy, SimulationStore, StateView, StoreEvent, StoreObserver,
};
use loop_model::Dataset;
use parking_lot::Mutex;
use std::sync::Arc;

pub const TEST_SEED: u64 = 42;

/// Every default trigger, in catalog order
pub const ALL_TRIGGERS: [&str; 5] = ["log-101", "log-102", "log-103", "log-104", "log-105"];

/// Triggers whose scenario opens an incident
pub const INCIDENT_TRIGGERS: [&str; 4] = ["log-101", "log-102", "log-104", "log-105"];

pub fn test_config() -> LoopConfig {
    LoopConfig::new().with_seed(TEST_SEED)
}

pub fn setup_test_store() -> SimulationStore {
    SimulationStore::new(test_config())
}

pub fn setup_legacy_store() -> SimulationStore {
    SimulationStore::new(test_config().with_reset_policy(ResetPolicy::Legacy))
}

/// Activate each trigger in order, panicking on a malformed patch set
pub fn activate_all(store: &mut SimulationStore, triggers: &[&str]) {
    for trigger in triggers {
        store.activate(trigger).unwrap();
    }
}

/// Clone of the current dataset
pub fn current(store: &SimulationStore) -> Dataset {
    store.state().dataset().clone()
}

/// Records every event with the incident count seen at the time
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<(StoreEvent, usize)>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().iter().map(|(e, _)| e.clone()).collect()
    }

    /// Incident counts observed alongside each event
    pub fn incident_counts(&self) -> Vec<usize> {
        self.events.lock().iter().map(|(_, n)| *n).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn activations(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|(e, _)| matches!(e, StoreEvent::Activated(_)))
            .count()
    }

    pub fn resets(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|(e, _)| matches!(e, StoreEvent::Reset { .. }))
            .count()
    }
}

impl StoreObserver for RecordingObserver {
    fn on_change(&self, event: &StoreEvent, state: &StateView<'_>) {
        self.events.lock().push((event.clone(), state.incidents().len()));
    }
}
