//! Stamp source for scenario-created entity ids

use chrono::Utc;

/// Strictly increasing millisecond stamps
///
/// Stamps follow the wall clock, but two activations within the same
/// millisecond (or a clock step backwards) still receive distinct,
/// increasing values.
#[derive(Debug, Clone, Default)]
pub struct StampClock {
    last: u64,
}

impl StampClock {
    /// Create a clock with no stamps issued
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock whose next stamp is greater than `last`
    #[inline]
    #[must_use]
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Last stamp issued, 0 if none
    #[inline]
    #[must_use]
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Issue the next stamp
    pub fn next_stamp(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}
