//! Synthetic solar output for test mode
//!
//! Produces a repeating day curve: dark for the first and last quarter of
//! the period, then a linear ramp up to the installed capacity at noon and
//! back down. Deterministic, so test runs are reproducible.

use sunmeter_config::WattPeak;

use crate::report::Reading;

/// Ticks per synthetic day (15 minute slots)
pub const DEFAULT_PERIOD: u32 = 96;

/// Shortest period that still has a ramp on both sides of noon
pub const MIN_PERIOD: u32 = 4;

/// Deterministic local data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticSource {
    capacity: WattPeak,
    period: u32,
    tick: u32,
}

impl SyntheticSource {
    /// Create a source with the default period, starting at midnight
    pub fn new(capacity: WattPeak) -> Self {
        Self::with_period(capacity, DEFAULT_PERIOD)
    }

    /// Create a source with a custom period (at least [`MIN_PERIOD`])
    pub fn with_period(capacity: WattPeak, period: u32) -> Self {
        Self {
            capacity,
            period: period.max(MIN_PERIOD),
            tick: 0,
        }
    }

    /// Ticks per day
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Output in watts at `tick`
    pub fn power_at(&self, tick: u32) -> u32 {
        let t = u64::from(tick % self.period);
        let period = u64::from(self.period);
        let capacity = u64::from(self.capacity.watts());

        let sunrise = period / 4;
        let noon = period / 2;
        let sunset = period * 3 / 4;

        let watts = if t <= sunrise || t >= sunset {
            0
        } else if t <= noon {
            capacity * (t - sunrise) / (noon - sunrise)
        } else {
            capacity * (sunset - t) / (sunset - noon)
        };

        // Ramp fractions are <= 1, so this never exceeds capacity
        watts as u32
    }

    /// Produce the next reading and advance one tick
    pub fn next_reading(&mut self) -> Reading {
        let power_w = self.power_at(self.tick);
        self.tick = (self.tick + 1) % self.period;
        Reading::new(self.capacity, power_w, true)
    }
}
