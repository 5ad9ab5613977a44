use std::time::Duration;

/// Adaptive cadence for polling the event bus.
///
/// Polls fast right after activity and backs off to the slow interval once
/// `idle_threshold` consecutive polls came back empty.
#[derive(Debug, Clone)]
pub(super) struct MicroTicker {
    fast_interval:    Duration,
    slow_interval:    Duration,
    idle_threshold:   u8,
    idle_ticks:       u8,
    current_interval: Duration,
}

impl MicroTicker {
    pub(super) fn new(fast_interval: Duration, slow_interval: Duration, idle_threshold: u8) -> Self {
        Self {
            fast_interval,
            slow_interval,
            idle_threshold,
            idle_ticks: 0,
            current_interval: fast_interval,
        }
    }

    pub(super) fn interval(&self) -> Duration {
        self.current_interval
    }

    pub(super) fn record_activity(&mut self) {
        self.idle_ticks = 0;
        self.current_interval = self.fast_interval;
    }

    pub(super) fn record_idle(&mut self) {
        if self.idle_ticks < self.idle_threshold {
            self.idle_ticks += 1;
        }

        if self.idle_ticks >= self.idle_threshold {
            self.current_interval = self.slow_interval;
        }
    }
}

impl Default for MicroTicker {
    /// The slow interval stays well under a clock second so a tick is never shown late by
    /// more than a tenth of it.
    fn default() -> Self {
        Self::new(Duration::from_millis(16), Duration::from_millis(100), 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backs_off_after_idle_polls() {
        let mut ticker = MicroTicker::default();
        assert_eq!(ticker.interval(), Duration::from_millis(16));

        ticker.record_idle();
        ticker.record_idle();
        assert_eq!(ticker.interval(), Duration::from_millis(16));

        ticker.record_idle();
        assert_eq!(ticker.interval(), Duration::from_millis(100));
    }

    #[test]
    fn activity_restores_fast_cadence() {
        let mut ticker = MicroTicker::new(Duration::from_millis(5), Duration::from_millis(50), 1);

        ticker.record_idle();
        assert_eq!(ticker.interval(), Duration::from_millis(50));

        ticker.record_activity();
        assert_eq!(ticker.interval(), Duration::from_millis(5));
    }
}
