//! Spike injection on an existing series

use loop_model::MetricSeries;
use rand::Rng;

/// Number of trailing points a triggered spike touches
pub const SPIKE_TAIL: usize = 9;

/// Raise the last [`SPIKE_TAIL`] points of `series` by `magnitude * uniform(0, 1)`
///
/// Earlier points are left untouched. With a non-negative `magnitude` no
/// point decreases.
pub fn trigger_spike<R: Rng + ?Sized>(series: &mut MetricSeries, magnitude: f64, rng: &mut R) {
    let points = series.points_mut();
    let start = points.len().saturating_sub(SPIKE_TAIL);
    for point in &mut points[start..] {
        point.value += magnitude * rng.gen::<f64>();
    }
}
