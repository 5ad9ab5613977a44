use std::{fmt, sync::Arc};

use chrono::{
    Locale, Timelike,
    format::{Item, StrftimeItems},
};
use deskclock_proto::{
    config::{DEFAULT_DATE_FORMAT, DisplayMode},
    ports::clock::ClockReading,
};
use masterror::Error;

/// Half of the day a 12-hour reading falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Zero-padded time segments ready for display.
///
/// `hours`, `minutes` and `seconds` are always two characters long. `period` is `None` in
/// 24-hour mode and `Some` in 12-hour mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTime {
    pub hours:   String,
    pub minutes: String,
    pub seconds: String,
    pub period:  Option<Period>,
}

impl FormattedTime {
    /// `"AM"`, `"PM"`, or `""` when no period applies.
    pub fn period_str(&self) -> &'static str {
        self.period.map(Period::as_str).unwrap_or("")
    }
}

impl fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)?;

        match self.period {
            Some(period) => write!(f, " {}", period.as_str()),
            None => Ok(()),
        }
    }
}

/// Map a 0-23 hour onto the value shown for `mode`.
pub fn display_hour(hour: u32, mode: DisplayMode) -> (u32, Option<Period>) {
    if mode.is_24_hour() {
        return (hour, None);
    }

    let period = if hour < 12 { Period::Am } else { Period::Pm };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };

    (h12, Some(period))
}

/// Split `time` into padded segments for `mode`.
pub fn format_time<T: Timelike>(time: &T, mode: DisplayMode) -> FormattedTime {
    let (hour, period) = display_hour(time.hour(), mode);

    FormattedTime {
        hours: pad(hour),
        minutes: pad(time.minute()),
        seconds: pad(time.second()),
        period,
    }
}

fn pad(value: u32) -> String {
    format!("{value:02}")
}

/// Locale-formatted long date, e.g. `Monday, January 1, 2024`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDate(String);

impl FormattedDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormattedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised while building a [`DateFormatter`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateFormatError {
    /// The strftime pattern contains an unknown or malformed specifier.
    #[error("invalid date pattern `{pattern}`")]
    InvalidPattern { pattern: Arc<str> },
    /// The locale name is not known to chrono.
    #[error("unknown locale `{locale}`")]
    UnknownLocale { locale: Arc<str> },
}

/// Renders the long-form date line of a reading.
///
/// Patterns are validated up front so [`format`](DateFormatter::format) cannot fail.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    pattern: String,
    locale:  Locale,
}

impl DateFormatter {
    /// Build a formatter for a strftime `pattern` and a locale name such as `en_US`.
    ///
    /// # Errors
    ///
    /// Returns [`DateFormatError::InvalidPattern`] if chrono cannot parse the pattern and
    /// [`DateFormatError::UnknownLocale`] if the locale name is not recognised.
    pub fn new(pattern: &str, locale: &str) -> Result<Self, DateFormatError> {
        if pattern.trim().is_empty()
            || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(DateFormatError::InvalidPattern {
                pattern: Arc::from(pattern),
            });
        }

        let locale = Locale::try_from(locale).map_err(|_| DateFormatError::UnknownLocale {
            locale: Arc::from(locale),
        })?;

        Ok(Self {
            pattern: pattern.to_owned(),
            locale,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, reading: &ClockReading) -> FormattedDate {
        FormattedDate(
            reading
                .at()
                .format_localized(&self.pattern, self.locale)
                .to_string(),
        )
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_owned(),
            locale:  Locale::en_US,
        }
    }
}

/// Everything the clock view needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    pub time: FormattedTime,
    pub date: FormattedDate,
    pub mode: DisplayMode,
}

impl ClockFace {
    pub fn render(reading: &ClockReading, mode: DisplayMode, dates: &DateFormatter) -> Self {
        Self {
            time: format_time(reading.at(), mode),
            date: dates.format(reading),
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveTime, TimeZone};

    use super::*;

    fn reading(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> ClockReading {
        ClockReading::new(
            FixedOffset::east_opt(0)
                .expect("offset")
                .with_ymd_and_hms(year, month, day, h, m, s)
                .single()
                .expect("valid date"),
        )
    }

    fn at_hour(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time")
    }

    #[test]
    fn twenty_four_hour_passes_hours_through() {
        for hour in 0..24 {
            let time = format_time(&at_hour(hour), DisplayMode::TwentyFourHour);
            assert_eq!(time.hours, format!("{hour:02}"));
            assert_eq!(time.period, None);
            assert_eq!(time.period_str(), "");
        }
    }

    #[test]
    fn twelve_hour_maps_reference_hours() {
        let cases = [
            (0, "12", Period::Am),
            (1, "01", Period::Am),
            (11, "11", Period::Am),
            (12, "12", Period::Pm),
            (13, "01", Period::Pm),
            (23, "11", Period::Pm),
        ];

        for (hour, expected, period) in cases {
            let time = format_time(&at_hour(hour), DisplayMode::TwelveHour);
            assert_eq!(time.hours, expected, "hour {hour}");
            assert_eq!(time.period, Some(period), "hour {hour}");
        }
    }

    #[test]
    fn twelve_hour_range_stays_within_one_to_twelve() {
        for hour in 0..24 {
            let (shown, period) = display_hour(hour, DisplayMode::TwelveHour);
            assert!((1..=12).contains(&shown), "hour {hour} rendered as {shown}");
            assert!(period.is_some());
        }
    }

    #[test]
    fn single_digit_minutes_and_seconds_are_padded() {
        for value in 0..10 {
            let time = NaiveTime::from_hms_opt(10, value, value).expect("valid time");
            let formatted = format_time(&time, DisplayMode::TwentyFourHour);
            assert_eq!(formatted.minutes, format!("0{value}"));
            assert_eq!(formatted.seconds, format!("0{value}"));
        }
    }

    #[test]
    fn segments_are_always_two_characters() {
        for hour in 0..24 {
            for mode in [DisplayMode::TwelveHour, DisplayMode::TwentyFourHour] {
                let time = NaiveTime::from_hms_opt(hour, 59, 5).expect("valid time");
                let formatted = format_time(&time, mode);
                assert_eq!(formatted.hours.len(), 2);
                assert_eq!(formatted.minutes.len(), 2);
                assert_eq!(formatted.seconds.len(), 2);
            }
        }
    }

    #[test]
    fn display_joins_segments() {
        let time = NaiveTime::from_hms_opt(13, 5, 9).expect("valid time");
        assert_eq!(
            format_time(&time, DisplayMode::TwentyFourHour).to_string(),
            "13:05:09"
        );
        assert_eq!(
            format_time(&time, DisplayMode::TwelveHour).to_string(),
            "01:05:09 PM"
        );
    }

    #[test]
    fn default_date_format_matches_us_long_date() {
        let formatter = DateFormatter::default();
        let date = formatter.format(&reading(2024, 1, 1, 8, 0, 0));
        assert_eq!(date.as_str(), "Monday, January 1, 2024");
    }

    #[test]
    fn explicit_en_us_formatter_matches_default() {
        let formatter = DateFormatter::new(DEFAULT_DATE_FORMAT, "en_US").expect("valid");
        let date = formatter.format(&reading(2024, 2, 29, 23, 59, 59));
        assert_eq!(date.to_string(), "Thursday, February 29, 2024");
    }

    #[test]
    fn localized_names_follow_locale() {
        let formatter = DateFormatter::new("%A %-d %B %Y", "fr_FR").expect("valid");
        let date = formatter.format(&reading(2024, 1, 1, 8, 0, 0));
        assert_eq!(date.as_str(), "lundi 1 janvier 2024");
    }

    #[test]
    fn rejects_malformed_pattern() {
        assert!(matches!(
            DateFormatter::new("%Q", "en_US"),
            Err(DateFormatError::InvalidPattern { .. })
        ));
        assert!(matches!(
            DateFormatter::new("", "en_US"),
            Err(DateFormatError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!(matches!(
            DateFormatter::new(DEFAULT_DATE_FORMAT, "xx_NOPE"),
            Err(DateFormatError::UnknownLocale { .. })
        ));
    }

    #[test]
    fn clock_face_combines_time_and_date() {
        let face = ClockFace::render(
            &reading(2024, 1, 1, 0, 7, 3),
            DisplayMode::TwelveHour,
            &DateFormatter::default(),
        );

        assert_eq!(face.time.to_string(), "12:07:03 AM");
        assert_eq!(face.date.as_str(), "Monday, January 1, 2024");
        assert_eq!(face.mode, DisplayMode::TwelveHour);
    }
}
