use std::fmt;

use chrono::{DateTime, FixedOffset, Local};

/// Instantaneous local date-time captured by a [`ClockPort`].
///
/// Readings are immutable. A newer reading supersedes an older one, it never mutates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockReading(DateTime<FixedOffset>);

impl ClockReading {
    /// Wrap a date-time that is already expressed in the offset it should be displayed in.
    pub const fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    /// Capture the host's local wall clock right now.
    pub fn now() -> Self {
        Self::from(Local::now())
    }

    /// The wrapped date-time, in the offset it was captured with.
    pub const fn at(&self) -> &DateTime<FixedOffset> {
        &self.0
    }
}

impl From<DateTime<Local>> for ClockReading {
    fn from(value: DateTime<Local>) -> Self {
        Self(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for ClockReading {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}

/// Source of [`ClockReading`] values.
///
/// The production adapter reads the host clock; DST transitions and manual clock changes are
/// reflected as-is. No monotonic guarantee is implied.
pub trait ClockPort: Send + Sync + fmt::Debug {
    /// Return the current reading.
    fn now(&self) -> ClockReading;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn display_uses_iso_like_layout() {
        let at = FixedOffset::east_opt(3600)
            .expect("offset")
            .with_ymd_and_hms(2024, 1, 1, 9, 5, 3)
            .single()
            .expect("valid date");

        assert_eq!(
            ClockReading::new(at).to_string(),
            "2024-01-01 09:05:03 +01:00"
        );
    }

    #[test]
    fn readings_order_by_instant() {
        let offset = FixedOffset::east_opt(0).expect("offset");
        let earlier = ClockReading::new(
            offset
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid date"),
        );
        let later = ClockReading::new(
            offset
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 1)
                .single()
                .expect("valid date"),
        );

        assert!(earlier < later);
    }
}
