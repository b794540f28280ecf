//! Loop Core
//!
//! The simulation store behind the Loop operations dashboard: a single
//! in-memory dataset that scenarios mutate and every page reads.
//!
//! # Core Concepts
//!
//! - [`SimulationStore`]: owns baseline and current state; mutated only by
//!   `activate(trigger)` and `reset()`
//! - [`StateView`]: borrowed read access plus [`DerivedStats`] and page
//!   queries (incident board, at-risk services, cost summary)
//! - [`StoreHandle`]: shared, lock-guarded store for multiple consumers
//! - [`StoreObserver`]: change notifications after each activation or reset
//! - [`assistant::respond`]: ChatOps answers computed from a view
//!
//! # Example
//!
//! ```rust,ignore
//! use loop_core::{LoopConfig, SimulationStore};
//!
//! let mut store = SimulationStore::new(LoopConfig::new().with_seed(7));
//! store.activate("log-104")?;
//!
//! let state = store.state();
//! assert_eq!(state.rca_data().service, "database-primary");
//! println!("{} active incidents", state.stats().active_incidents);
//!
//! store.reset();
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod assistant;
mod clock;
mod config;
mod error;
mod stats;
mod store;
mod view;
mod views;

pub use clock::StampClock;
pub use config::{LoopConfig, ResetPolicy};
pub use error::{ConfigError, StoreError};
pub use stats::{
    DerivedStats, AUTO_REMEDIATION_RATE, AVG_MTTR_MINUTES, EVENTS_PER_SEC, FALSE_POSITIVE_RATE,
};
pub use store::{
    Activation, ActivationOutcome, SimulationStore, StoreEvent, StoreHandle, StoreObserver,
    SubscriptionId,
};
pub use view::{Snapshot, StateView};
pub use views::{CostSummary, IncidentBoard, AT_RISK_THRESHOLD};

pub use loop_model as model;
pub use loop_scenario::{ScenarioCatalog, ScenarioId, ScenarioInfo};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
