//! Loop Metrics
//!
//! Synthetic metric series for the simulation.
//!
//! # Core Concepts
//!
//! - [`generate`]: a fresh 60-point series around a base value, with an optional
//!   decaying bump ([`Spike`]) centred on one index
//! - [`trigger_spike`]: random elevation of the trailing points of an existing
//!   series, used when a scenario fires
//!
//! Both draw from a caller-supplied [`rand::Rng`]; pass a seeded
//! `StdRng` where reproducibility matters.
//!
//! # Example
//!
//! ```rust,ignore
//! use loop_metrics::{generate, trigger_spike, Spike};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut cpu = generate(45.0, 15.0, Some(Spike::new(48, 40.0)), &mut rng);
//! trigger_spike(&mut cpu, 25.0, &mut rng);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod generator;
mod spike;

pub use generator::{generate, spike_contribution, Spike, SPIKE_RADIUS};
pub use spike::{trigger_spike, SPIKE_TAIL};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
