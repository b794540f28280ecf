//! Simulation store
//!
//! Owns the baseline and current datasets. The only mutations are
//! [`SimulationStore::activate`] and [`SimulationStore::reset`]; every patch
//! is applied to a working copy that replaces the current dataset only once
//! the whole patch set has been applied, so readers never observe a partially
//! applied scenario.

use crate::clock::StampClock;
use crate::config::LoopConfig;
use crate::error::StoreError;
use crate::view::{Snapshot, StateView};
use loop_model::{CollectionKind, Dataset};
use loop_scenario::{baseline, ActivationContext, ScenarioCatalog, ScenarioId};
use parking_lot::RwLock;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Handle returned by [`SimulationStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A scenario that was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    /// Scenario applied
    pub scenario: ScenarioId,
    /// Stamp used for the ids of created entities
    pub stamp: u64,
    /// Collections the scenario replaced, in application order
    pub touched: Vec<CollectionKind>,
}

/// Result of [`SimulationStore::activate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActivationOutcome {
    /// Trigger resolved and the scenario was applied
    Applied(Activation),
    /// Trigger not in the catalog; nothing changed
    Ignored {
        /// The unresolved trigger
        trigger: String,
    },
}

impl ActivationOutcome {
    /// Whether state changed
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, ActivationOutcome::Applied(_))
    }

    /// The applied activation, if any
    #[inline]
    #[must_use]
    pub fn activation(&self) -> Option<&Activation> {
        match self {
            ActivationOutcome::Applied(activation) => Some(activation),
            ActivationOutcome::Ignored { .. } => None,
        }
    }
}

/// State change delivered to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A scenario was applied
    Activated(Activation),
    /// Collections were restored to baseline
    Reset {
        /// Restored collections
        collections: Vec<CollectionKind>,
    },
}

/// Receives a callback after every state change
///
/// Called with the post-change state while the store is still borrowed, so
/// observers must read through the given view rather than the store.
/// Closures of the matching signature implement this trait.
pub trait StoreObserver: Send + Sync {
    /// Handle one change
    fn on_change(&self, event: &StoreEvent, state: &StateView<'_>);
}

impl<F> StoreObserver for F
where
    F: Fn(&StoreEvent, &StateView<'_>) + Send + Sync,
{
    fn on_change(&self, event: &StoreEvent, state: &StateView<'_>) {
        self(event, state);
    }
}

/// In-memory simulation store
pub struct SimulationStore {
    config: LoopConfig,
    catalog: ScenarioCatalog,
    baseline: Dataset,
    current: Dataset,
    rng: StdRng,
    clock: StampClock,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
    next_subscription: u64,
}

impl SimulationStore {
    /// Create a store holding the baseline dataset
    ///
    /// Baseline metric noise and later spikes draw from one RNG, seeded from
    /// `config.seed` when set.
    #[must_use]
    pub fn new(config: LoopConfig) -> Self {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let baseline = baseline::dataset(&mut rng);

        info!(
            seed = ?config.seed,
            reset_policy = ?config.reset_policy,
            "simulation store initialised"
        );

        Self {
            current: baseline.clone(),
            baseline,
            catalog: ScenarioCatalog::with_defaults(),
            config,
            rng,
            clock: StampClock::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replace the trigger catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: ScenarioCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use `clock` for activation stamps
    #[must_use]
    pub fn with_clock(mut self, clock: StampClock) -> Self {
        self.clock = clock;
        self
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Trigger catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    /// Dataset restored by [`reset`](Self::reset)
    #[inline]
    #[must_use]
    pub fn baseline(&self) -> &Dataset {
        &self.baseline
    }

    /// Read-only view of the current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> StateView<'_> {
        StateView::new(&self.current)
    }

    /// Owned copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state().to_snapshot()
    }

    /// Activate the scenario registered for `trigger`
    ///
    /// Unknown triggers are ignored: state is unchanged and observers are not
    /// notified.
    ///
    /// # Errors
    /// Returns [`StoreError::Patch`] if the scenario produced a malformed
    /// patch set; state is unchanged
    pub fn activate(&mut self, trigger: &str) -> Result<ActivationOutcome, StoreError> {
        let Some(scenario) = self.catalog.resolve(trigger) else {
            warn!(trigger, "unknown trigger, activation ignored");
            return Ok(ActivationOutcome::Ignored {
                trigger: trigger.to_string(),
            });
        };

        self.activate_scenario(scenario)
            .map(ActivationOutcome::Applied)
    }

    /// Apply `scenario` to the current state
    ///
    /// # Errors
    /// Returns [`StoreError::Patch`] if the scenario produced a malformed
    /// patch set; state is unchanged
    pub fn activate_scenario(&mut self, scenario: ScenarioId) -> Result<Activation, StoreError> {
        let stamp = self.clock.next_stamp();
        let patch = scenario.patch(&self.current, &ActivationContext::new(stamp));

        let mut working = self.current.clone();
        let touched = patch.apply(&mut working, &mut self.rng)?;
        self.current = working;

        info!(
            scenario = %scenario,
            stamp,
            collections = touched.len(),
            "scenario activated"
        );

        let activation = Activation {
            scenario,
            stamp,
            touched,
        };
        self.notify(&StoreEvent::Activated(activation.clone()));
        Ok(activation)
    }

    /// Restore the collections named by the reset policy to baseline
    pub fn reset(&mut self) {
        let collections = self.config.reset_policy.collections();
        for kind in &collections {
            self.current.copy_collection(&self.baseline, *kind);
        }

        info!(collections = collections.len(), "state reset to baseline");
        self.notify(&StoreEvent::Reset { collections });
    }

    /// Register `observer` for every subsequent change
    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&self, event: &StoreEvent) {
        let view = self.state();
        for (_, observer) in &self.observers {
            observer.on_change(event, &view);
        }
    }
}

impl fmt::Debug for SimulationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationStore")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("clock", &self.clock)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

/// Shared handle to a [`SimulationStore`]
///
/// Cloning is cheap; every clone refers to the same store. Writers are
/// serialised. Observers run while the write lock is held and must not call
/// back into the handle.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    inner: Arc<RwLock<SimulationStore>>,
}

impl StoreHandle {
    /// Wrap `store`
    #[must_use]
    pub fn new(store: SimulationStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` against the current state
    pub fn read<T>(&self, f: impl FnOnce(&StateView<'_>) -> T) -> T {
        let store = self.inner.read();
        f(&store.state())
    }

    /// Owned copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().snapshot()
    }

    /// See [`SimulationStore::activate`]
    ///
    /// # Errors
    /// Returns [`StoreError::Patch`] for a malformed patch set
    pub fn activate(&self, trigger: &str) -> Result<ActivationOutcome, StoreError> {
        self.inner.write().activate(trigger)
    }

    /// See [`SimulationStore::reset`]
    pub fn reset(&self) {
        self.inner.write().reset();
    }

    /// See [`SimulationStore::subscribe`]
    pub fn subscribe(&self, observer: impl StoreObserver + 'static) -> SubscriptionId {
        self.inner.write().subscribe(observer)
    }

    /// See [`SimulationStore::unsubscribe`]
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.write().unsubscribe(id)
    }
}

impl From<SimulationStore> for StoreHandle {
    fn from(store: SimulationStore) -> Self {
        Self::new(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResetPolicy;
    use loop_model::{IncidentStatus, ServiceStatus};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> SimulationStore {
        SimulationStore::new(LoopConfig::new().with_seed(42))
    }

    #[test]
    fn starts_at_baseline() {
        let store = store();
        assert_eq!(store.state().dataset(), store.baseline());
        assert_eq!(store.state().stats().total_services, 10);
    }

    #[test]
    fn seed_fixes_baseline_metrics() {
        assert_eq!(store().baseline(), store().baseline());
    }

    #[test]
    fn activate_applies_scenario() {
        let mut store = store().with_clock(StampClock::starting_after(1_000));
        let outcome = store.activate("log-101").unwrap();

        let activation = outcome.activation().unwrap();
        assert_eq!(activation.scenario, ScenarioId::PaymentFailure);
        assert!(activation.stamp > 1_000);

        let state = store.state();
        let incident = &state.incidents()[0];
        assert_eq!(incident.id, format!("inc-{}", activation.stamp));
        assert_eq!(incident.status, IncidentStatus::Active);
        assert_eq!(
            state.service_named("payment-service").unwrap().status,
            ServiceStatus::Critical
        );
        assert_eq!(state.remediations()[0].id, activation.stamp);
    }

    #[test]
    fn unknown_trigger_is_ignored() {
        let mut store = store();
        let before = store.snapshot();

        let outcome = store.activate("not-a-real-id").unwrap();
        assert_eq!(
            outcome,
            ActivationOutcome::Ignored {
                trigger: "not-a-real-id".into()
            }
        );
        assert!(!outcome.is_applied());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn custom_catalog() {
        let mut catalog = ScenarioCatalog::new();
        catalog.register("page-oncall", ScenarioId::DatabaseTimeout);
        let mut store = store().with_catalog(catalog);

        assert!(!store.activate("log-104").unwrap().is_applied());
        assert!(store.activate("page-oncall").unwrap().is_applied());
        assert_eq!(store.state().rca_data().service, "database-primary");
    }

    #[test]
    fn reset_restores_baseline() {
        let mut store = store();
        store.activate("log-104").unwrap();
        store.activate("log-105").unwrap();
        assert_ne!(store.state().dataset(), store.baseline());

        store.reset();
        assert_eq!(store.state().dataset(), store.baseline());
    }

    #[test]
    fn legacy_reset_keeps_chaos_experiments() {
        let config = LoopConfig::new()
            .with_seed(1)
            .with_reset_policy(ResetPolicy::Legacy);
        let mut store = SimulationStore::new(config);
        store.activate("log-105").unwrap();
        let chaos = store.state().chaos_experiments().to_vec();

        store.reset();
        assert_eq!(store.state().chaos_experiments(), chaos.as_slice());
        assert_eq!(store.state().incidents(), store.baseline().incidents.as_slice());
    }

    #[test]
    fn observers_see_post_change_state() {
        let mut store = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let id = store.subscribe(move |event: &StoreEvent, state: &StateView<'_>| {
            if let StoreEvent::Activated(activation) = event {
                assert_eq!(state.incidents()[0].id, format!("inc-{}", activation.stamp));
            }
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.activate("log-102").unwrap();
        store.activate("nope").unwrap();
        store.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.activate("log-102").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handle_shares_store() {
        let handle = StoreHandle::from(store());
        let other = handle.clone();

        other.activate("log-104").unwrap();
        let status = handle.read(|state| state.service_named("database-primary").unwrap().status);
        assert_eq!(status, ServiceStatus::Critical);

        handle.reset();
        assert_eq!(other.snapshot().stats.active_incidents, 2);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = ActivationOutcome::Ignored {
            trigger: "x".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "ignored");
        assert_eq!(json["trigger"], "x");
    }
}
