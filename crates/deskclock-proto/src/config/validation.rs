use masterror::Error;

use super::Config;

/// Errors returned when validating a [`Config`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("clock date_format must not be empty")]
    EmptyDateFormat,
    #[error("clock locale must not be empty")]
    EmptyLocale,
    /// The scale factor is not a positive finite number.
    #[error("appearance scale_factor must be a positive number, got {value}")]
    InvalidScaleFactor { value: f64 },
}

impl Config {
    /// Validates the configuration.
    ///
    /// A usage record where remaining credits exceed allocated credits is accepted; the
    /// usage bar clamps its fill instead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] if the clock pattern or locale is blank, or if the
    /// scale factor is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use deskclock_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.clock.date_format.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDateFormat);
        }

        if self.clock.locale.trim().is_empty() {
            return Err(ConfigValidationError::EmptyLocale);
        }

        let scale_factor = self.appearance.scale_factor;
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(ConfigValidationError::InvalidScaleFactor {
                value: scale_factor,
            });
        }

        Ok(())
    }
}
