//! Scenario catalog
//!
//! Maps trigger log ids to [`ScenarioId`]s. Dispatch from a scenario to its
//! patch function is an exhaustive `match`, so a new variant cannot be added
//! without a handler.

use crate::patch::PatchSet;
use crate::scenarios;
use loop_model::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Inputs a scenario needs besides the current dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationContext {
    /// Strictly increasing, timestamp-derived stamp for new entity ids
    pub stamp: u64,
}

impl ActivationContext {
    /// Create context
    #[inline]
    #[must_use]
    pub fn new(stamp: u64) -> Self {
        Self { stamp }
    }

    /// Id for an incident created under this context
    #[inline]
    #[must_use]
    pub fn incident_id(&self) -> String {
        format!("inc-{}", self.stamp)
    }

    /// Id for a remediation created under this context
    #[inline]
    #[must_use]
    pub fn remediation_id(&self) -> u64 {
        self.stamp
    }

    /// Id for a chaos experiment created under this context
    #[inline]
    #[must_use]
    pub fn chaos_id(&self) -> String {
        format!("chaos-{}", self.stamp)
    }
}

/// Catalogued scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    /// Critical payment failure
    PaymentFailure,
    /// High latency on the API gateway
    GatewayLatency,
    /// High load, all services healthy
    HighLoadHealthy,
    /// Database connection timeout
    DatabaseTimeout,
    /// Notification queue backlog
    NotificationBacklog,
}

impl ScenarioId {
    /// Every scenario
    pub const ALL: [ScenarioId; 5] = [
        ScenarioId::PaymentFailure,
        ScenarioId::GatewayLatency,
        ScenarioId::HighLoadHealthy,
        ScenarioId::DatabaseTimeout,
        ScenarioId::NotificationBacklog,
    ];

    /// Log id that triggers this scenario by default
    #[inline]
    #[must_use]
    pub fn trigger(&self) -> &'static str {
        match self {
            ScenarioId::PaymentFailure => "log-101",
            ScenarioId::GatewayLatency => "log-102",
            ScenarioId::HighLoadHealthy => "log-103",
            ScenarioId::DatabaseTimeout => "log-104",
            ScenarioId::NotificationBacklog => "log-105",
        }
    }

    /// Scenario whose default trigger is `trigger`
    #[must_use]
    pub fn from_trigger(trigger: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.trigger() == trigger)
    }

    /// Short title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ScenarioId::PaymentFailure => "Critical payment failure",
            ScenarioId::GatewayLatency => "High latency",
            ScenarioId::HighLoadHealthy => "High load but healthy",
            ScenarioId::DatabaseTimeout => "Database connection timeout",
            ScenarioId::NotificationBacklog => "Notification queue backlog",
        }
    }

    /// One-line description of the effect
    #[inline]
    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            ScenarioId::PaymentFailure => {
                "payment-service critical, api-gateway warning, error-rate spike, reroute, new RCA"
            }
            ScenarioId::GatewayLatency => {
                "api-gateway warning, search-service degraded, latency spike, scale-up, new RCA"
            }
            ScenarioId::HighLoadHealthy => {
                "all services healthy with +20 CPU, throughput spike, completed scale-up"
            }
            ScenarioId::DatabaseTimeout => {
                "database-primary and dependants critical, slow query, \
                 kill awaiting approval, new RCA"
            }
            ScenarioId::NotificationBacklog => {
                "notification-service degraded, chaos experiment running, worker scale-up"
            }
        }
    }

    /// Compute this scenario's patch set
    #[must_use]
    pub fn patch(&self, dataset: &Dataset, ctx: &ActivationContext) -> PatchSet {
        match self {
            ScenarioId::PaymentFailure => scenarios::payment_failure(dataset, ctx),
            ScenarioId::GatewayLatency => scenarios::gateway_latency(dataset, ctx),
            ScenarioId::HighLoadHealthy => scenarios::high_load_healthy(dataset, ctx),
            ScenarioId::DatabaseTimeout => scenarios::database_timeout(dataset, ctx),
            ScenarioId::NotificationBacklog => scenarios::notification_backlog(dataset, ctx),
        }
    }

    /// Descriptive record
    #[must_use]
    pub fn info(&self) -> ScenarioInfo {
        ScenarioInfo {
            id: *self,
            trigger: self.trigger(),
            title: self.title(),
            summary: self.summary(),
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Descriptive record of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioInfo {
    /// Scenario
    pub id: ScenarioId,
    /// Default trigger log id
    pub trigger: &'static str,
    /// Title
    pub title: &'static str,
    /// Effect summary
    pub summary: &'static str,
}

/// Lookup table from trigger ids to scenarios
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    triggers: BTreeMap<String, ScenarioId>,
}

impl ScenarioCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: BTreeMap::new(),
        }
    }

    /// Create catalog with every scenario under its default trigger
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for id in ScenarioId::ALL {
            catalog.register(id.trigger(), id);
        }
        catalog
    }

    /// Map `trigger` to `scenario`, returning the previous mapping
    pub fn register(&mut self, trigger: &str, scenario: ScenarioId) -> Option<ScenarioId> {
        self.triggers.insert(trigger.to_string(), scenario)
    }

    /// Remove a trigger
    #[inline]
    pub fn remove(&mut self, trigger: &str) -> Option<ScenarioId> {
        self.triggers.remove(trigger)
    }

    /// Scenario for `trigger`; `None` for unknown triggers
    #[inline]
    #[must_use]
    pub fn resolve(&self, trigger: &str) -> Option<ScenarioId> {
        self.triggers.get(trigger).copied()
    }

    /// Check if trigger is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, trigger: &str) -> bool {
        self.triggers.contains_key(trigger)
    }

    /// Number of registered triggers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Iterate over `(trigger, scenario)` pairs in trigger order
    pub fn iter(&self) -> impl Iterator<Item = (&str, ScenarioId)> {
        self.triggers.iter().map(|(t, id)| (t.as_str(), *id))
    }
}
