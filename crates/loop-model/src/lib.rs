//! Loop Model
//!
//! Entity types shared by every Loop crate.
//!
//! # Core Concepts
//!
//! - [`Service`], [`Incident`], [`Remediation`] and the other entities shown on
//!   the operations dashboard
//! - [`MetricSeries`]: fixed-length, oldest-first metric samples
//! - [`Dataset`]: every collection the simulation owns, addressable by
//!   [`CollectionKind`]
//!
//! All types serialize with the dashboard's wire names (camelCase fields,
//! lower/kebab-case tags).

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod dataset;
mod incident;
mod log;
mod metric;
mod ops;
mod rca;
mod service;

pub use dataset::{CollectionKind, Dataset};
pub use incident::{Incident, IncidentStatus, Severity};
pub use log::{DetailedLog, LogLevel, LogReport};
pub use metric::{MetricDataPoint, MetricKind, MetricSeries, Metrics, SERIES_LEN};
pub use ops::{
    AuditEntry, ChaosExperiment, ChaosStatus, ChaosType, CostItem, DatabaseQuery, Deployment,
    DeploymentStatus, Remediation, RemediationStatus, RemediationType,
};
pub use rca::{RcaData, TimelineEvent};
pub use service::{Service, ServiceStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
