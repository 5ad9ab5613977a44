use flexi_logger::{FlexiLoggerError, LogSpecification};

mod style;
mod views;

pub mod app;

pub use app::{App, Message};

/// Parse `log_level`, letting `RUST_LOG` take precedence when set.
///
/// # Errors
///
/// Returns the parser error when neither source parses as a log filter.
pub fn get_log_spec(log_level: &str) -> Result<LogSpecification, FlexiLoggerError> {
    LogSpecification::env_or_parse(log_level)
}
