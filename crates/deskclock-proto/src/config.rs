use serde::Deserialize;

mod appearance;
mod validation;

pub use appearance::{Appearance, ThemeName};
pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/deskclock/config.toml";

pub const DEFAULT_DATE_FORMAT: &str = "%A, %B %-d, %Y";

pub const DEFAULT_LOCALE: &str = "en_US";

/// Which flavour of the application to run.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Clock with a 12/24-hour toggle, no sign-in.
    #[default]
    Standalone,
    /// Clock shown only once the session provider reports a signed-in user.
    Gated,
}

/// How hours are rendered.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl DisplayMode {
    pub fn is_24_hour(self) -> bool {
        matches!(self, Self::TwentyFourHour)
    }

    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::TwelveHour => Self::TwentyFourHour,
            Self::TwentyFourHour => Self::TwelveHour,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::default(),
            date_format:  default_date_format(),
            locale:       default_locale(),
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_owned()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

/// Profile served by the local session provider once the user signs in.
///
/// Credits accept integers or fractions, e.g. `remaining_credits = 12.5`.
#[derive(Deserialize, Clone, Default, Debug, PartialEq)]
pub struct SessionConfig {
    pub email:             Option<String>,
    pub avatar_url:        Option<String>,
    pub plan:              Option<String>,
    pub status:            Option<String>,
    pub remaining_credits: Option<f64>,
    pub allocated_credits: Option<f64>,
    pub subscribe_command: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level:  default_log_level(),
            variant:    Variant::default(),
            clock:      ClockConfig::default(),
            appearance: Appearance::default(),
            session:    SessionConfig::default(),
        }
    }
}
