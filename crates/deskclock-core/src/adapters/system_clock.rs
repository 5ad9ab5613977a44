use deskclock_proto::ports::clock::{ClockPort, ClockReading};

/// [`ClockPort`] backed by the host's local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> ClockReading {
        ClockReading::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;

    #[test]
    fn reads_the_local_offset() {
        let reading = SystemClock::new().now();
        let local = Local::now();

        assert_eq!(reading.at().offset(), local.fixed_offset().offset());
        assert!((local.fixed_offset() - *reading.at()).num_seconds().abs() < 5);
    }
}
