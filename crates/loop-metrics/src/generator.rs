//! Series generator

use loop_model::{MetricDataPoint, MetricSeries, SERIES_LEN};
use rand::Rng;

/// A bump only affects indices strictly closer than this to its centre
pub const SPIKE_RADIUS: usize = 3;

/// Decaying bump centred on one index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spike {
    /// Centre index
    pub at: usize,
    /// Height at the centre
    pub magnitude: f64,
}

impl Spike {
    /// Create spike
    #[inline]
    #[must_use]
    pub fn new(at: usize, magnitude: f64) -> Self {
        Self { at, magnitude }
    }
}

/// Contribution of `spike` at index `i`: `magnitude * e^-|i - at|` inside the
/// radius, zero outside
#[inline]
#[must_use]
pub fn spike_contribution(spike: &Spike, i: usize) -> f64 {
    let distance = i.abs_diff(spike.at);
    if distance < SPIKE_RADIUS {
        #[allow(clippy::cast_precision_loss)]
        let d = distance as f64;
        spike.magnitude * (-d).exp()
    } else {
        0.0
    }
}

/// Generate a [`SERIES_LEN`]-point series
///
/// Point `i` is labelled `"{i}m"` and holds
/// `max(0, round2(base + uniform(-variance/2, variance/2) + spike(i)))`.
pub fn generate<R: Rng + ?Sized>(
    base: f64,
    variance: f64,
    spike: Option<Spike>,
    rng: &mut R,
) -> MetricSeries {
    let points = (0..SERIES_LEN)
        .map(|i| {
            let mut value = base + (rng.gen::<f64>() - 0.5) * variance;
            if let Some(spike) = &spike {
                value += spike_contribution(spike, i);
            }
            MetricDataPoint::new(format!("{i}m"), round2(value).max(0.0))
        })
        .collect();
    MetricSeries::from_points(points)
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn contribution_decays_and_is_confined() {
        let spike = Spike::new(10, 100.0);
        assert!((spike_contribution(&spike, 10) - 100.0).abs() < 1e-9);
        assert!((spike_contribution(&spike, 11) - 100.0 * (-1.0f64).exp()).abs() < 1e-9);
        assert!((spike_contribution(&spike, 8) - 100.0 * (-2.0f64).exp()).abs() < 1e-9);
        assert_eq!(spike_contribution(&spike, 13), 0.0);
        assert_eq!(spike_contribution(&spike, 7), 0.0);
    }

    #[test]
    fn zero_variance_is_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = generate(5.0, 0.0, Some(Spike::new(0, 10.0)), &mut rng);
        assert_eq!(series.points()[0].value, 15.0);
        assert_eq!(series.points()[1].value, round2(5.0 + 10.0 * (-1.0f64).exp()));
        assert_eq!(series.points()[3].value, 5.0);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = generate(-50.0, 1.0, None, &mut rng);
        assert!(series.values().all(|v| v == 0.0));
    }

    #[test]
    fn values_have_two_decimals() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = generate(0.5, 0.8, Some(Spike::new(47, 8.0)), &mut rng);
        for v in series.values() {
            assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate(45.0, 15.0, None, &mut StdRng::seed_from_u64(9));
        let b = generate(45.0, 15.0, None, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_generator_shape(
            base in -100.0f64..10_000.0,
            variance in 0.0f64..5_000.0,
            at in 0usize..80,
            magnitude in 0.0f64..1_000.0,
            with_spike in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let spike = with_spike.then(|| Spike::new(at, magnitude));
            let series = generate(base, variance, spike, &mut rng);

            prop_assert_eq!(series.len(), SERIES_LEN);
            for (i, point) in series.points().iter().enumerate() {
                prop_assert_eq!(&point.time, &format!("{i}m"));
                prop_assert!(point.value >= 0.0);
            }
        }
    }
}
