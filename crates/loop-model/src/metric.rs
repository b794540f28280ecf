//! Metric time series

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of points in every generated series (one per minute)
pub const SERIES_LEN: usize = 60;

/// A single labelled sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDataPoint {
    /// Time label, `"{i}m"`
    pub time: String,
    /// Sample value, never negative
    pub value: f64,
}

impl MetricDataPoint {
    /// Create data point
    #[inline]
    #[must_use]
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// Oldest-first sequence of samples
///
/// Series are never appended to or truncated once built; spikes mutate values
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSeries(Vec<MetricDataPoint>);

impl MetricSeries {
    /// Wrap points, oldest first
    #[inline]
    #[must_use]
    pub fn from_points(points: Vec<MetricDataPoint>) -> Self {
        Self(points)
    }

    /// All points, oldest first
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[MetricDataPoint] {
        &self.0
    }

    /// Mutable access to values; the length cannot change through this slice
    #[inline]
    pub fn points_mut(&mut self) -> &mut [MetricDataPoint] {
        &mut self.0
    }

    /// Number of points
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no points
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent sample
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<&MetricDataPoint> {
        self.0.last()
    }

    /// Highest value in the series
    #[must_use]
    pub fn peak(&self) -> Option<f64> {
        self.0.iter().map(|p| p.value).reduce(f64::max)
    }

    /// Values only, oldest first
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|p| p.value)
    }
}

/// The dashboard's metric series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    /// CPU utilisation
    Cpu,
    /// Memory utilisation
    Memory,
    /// Request latency
    Latency,
    /// Error rate
    ErrorRate,
    /// Request throughput
    Throughput,
}

impl MetricKind {
    /// Every metric kind
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Cpu,
        MetricKind::Memory,
        MetricKind::Latency,
        MetricKind::ErrorRate,
        MetricKind::Throughput,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "cpu",
            MetricKind::Memory => "memory",
            MetricKind::Latency => "latency",
            MetricKind::ErrorRate => "errorRate",
            MetricKind::Throughput => "throughput",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One series per [`MetricKind`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// CPU series
    pub cpu: MetricSeries,
    /// Memory series
    pub memory: MetricSeries,
    /// Latency series
    pub latency: MetricSeries,
    /// Error rate series
    pub error_rate: MetricSeries,
    /// Throughput series
    pub throughput: MetricSeries,
}

impl Metrics {
    /// Series for `kind`
    #[inline]
    #[must_use]
    pub fn get(&self, kind: MetricKind) -> &MetricSeries {
        match kind {
            MetricKind::Cpu => &self.cpu,
            MetricKind::Memory => &self.memory,
            MetricKind::Latency => &self.latency,
            MetricKind::ErrorRate => &self.error_rate,
            MetricKind::Throughput => &self.throughput,
        }
    }

    /// Mutable series for `kind`
    #[inline]
    pub fn get_mut(&mut self, kind: MetricKind) -> &mut MetricSeries {
        match kind {
            MetricKind::Cpu => &mut self.cpu,
            MetricKind::Memory => &mut self.memory,
            MetricKind::Latency => &mut self.latency,
            MetricKind::ErrorRate => &mut self.error_rate,
            MetricKind::Throughput => &mut self.throughput,
        }
    }
}
