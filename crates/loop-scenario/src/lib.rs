//! Loop Scenario
//!
//! Incident storylines expressed as coordinated patches over the simulation
//! dataset.
//!
//! # Core Concepts
//!
//! - [`ScenarioId`]: the catalogued scenarios, each a pure function from the
//!   current [`Dataset`](loop_model::Dataset) to a [`PatchSet`]
//! - [`ScenarioCatalog`]: lookup table from trigger log ids to scenarios
//! - [`PatchSet`]: per-collection updates, validated as a whole and then
//!   applied together
//! - [`baseline`]: the fixed initial dataset the scenarios are written against
//!
//! # Example
//!
//! ```rust,ignore
//! use loop_scenario::{baseline, ActivationContext, ScenarioCatalog};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut dataset = baseline::dataset(&mut rng);
//!
//! let catalog = ScenarioCatalog::with_defaults();
//! if let Some(scenario) = catalog.resolve("log-104") {
//!     let patch = scenario.patch(&dataset, &ActivationContext::new(1));
//!     patch.apply(&mut dataset, &mut rng)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod baseline;
mod catalog;
mod error;
mod patch;
mod scenarios;

pub use catalog::{ActivationContext, ScenarioCatalog, ScenarioId, ScenarioInfo};
pub use error::PatchError;
pub use patch::{CollectionPatch, MetricPatch, PatchSet, ServiceUpdate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
