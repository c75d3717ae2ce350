//! Timed runner configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Highest speed value.
pub const MAX_SPEED: u8 = 100;

/// Timed runner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Pace between 0 (slowest) and 100 (fastest).
    pub speed: u8,
    /// Delay between steps at full speed.
    pub min_delay: Duration,
    /// Delay between steps at speed 0.
    pub max_delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            speed: 50,
            min_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2000),
        }
    }
}

impl RunnerConfig {
    /// Create new runner configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the speed (clamped to 100).
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed.min(MAX_SPEED);
        self
    }

    /// Set the delay range.
    pub fn with_delay_range(mut self, min_delay: Duration, max_delay: Duration) -> Self {
        self.min_delay = min_delay.min(max_delay);
        self.max_delay = max_delay.max(min_delay);
        self
    }

    /// Delay between steps at the configured speed.
    pub fn delay(&self) -> Duration {
        self.delay_at(self.speed)
    }

    /// Delay between steps at an arbitrary speed.
    ///
    /// Interpolates exponentially, so each speed increment shortens the delay
    /// by the same factor: `max * (min / max) ^ (speed / 100)`.
    pub fn delay_at(&self, speed: u8) -> Duration {
        let min = self.min_delay.as_secs_f64();
        let max = self.max_delay.as_secs_f64();
        if max <= 0.0 || min <= 0.0 {
            return self.min_delay;
        }
        let t = f64::from(speed.min(MAX_SPEED)) / f64::from(MAX_SPEED);
        let delay = max * (min / max).powf(t);
        Duration::from_secs_f64(delay.clamp(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_endpoints() {
        let config = RunnerConfig::new();
        assert_eq!(config.delay_at(0), Duration::from_millis(2000));
        assert_eq!(config.delay_at(100), Duration::from_millis(1));
        assert_eq!(config.delay_at(200), Duration::from_millis(1));
    }

    #[test]
    fn test_delay_is_non_linear_and_monotonic() {
        let config = RunnerConfig::new();
        let mid = config.delay_at(50).as_secs_f64() * 1000.0;
        // Geometric mean of 1 ms and 2000 ms.
        assert!((mid - 2000f64.sqrt()).abs() < 0.01);

        let mut previous = config.delay_at(0);
        for speed in 1..=100 {
            let delay = config.delay_at(speed);
            assert!(delay <= previous);
            previous = delay;
        }
    }

    #[test]
    fn test_builder() {
        let config = RunnerConfig::new()
            .with_speed(250)
            .with_delay_range(Duration::from_millis(10), Duration::from_millis(5));
        assert_eq!(config.speed, 100);
        assert_eq!(config.min_delay, Duration::from_millis(5));
        assert_eq!(config.max_delay, Duration::from_millis(10));
    }
}
