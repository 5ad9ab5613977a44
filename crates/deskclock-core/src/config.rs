use std::{
    fs,
    path::{Path, PathBuf},
};

pub use deskclock_proto::config::*;

use log::{info, warn};
use masterror::Error;
use shellexpand::full;

/// Failures while locating or loading the configuration file.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The path contains an unknown variable or `~` cannot be resolved.
    #[error("cannot expand config path `{path}`: {context}")]
    Expand { path: String, context: String },
    /// An explicitly requested file does not exist.
    #[error("config file does not exist: {}", path.display())]
    NotFound { path: PathBuf },
    /// Reading the file or creating its directory failed.
    #[error("cannot access {}: {context}", path.display())]
    Read { path: PathBuf, context: String },
    /// The file is not valid TOML for [`Config`].
    #[error("cannot parse {}: {context}", path.display())]
    Parse { path: PathBuf, context: String },
    /// The file parsed but is logically inconsistent.
    #[error("invalid configuration: {0}")]
    Validation(ConfigValidationError),
}

/// Load the configuration.
///
/// An explicit `path` must exist. Without one the default location is used and its
/// directory created when missing. In both cases an unreadable, malformed or invalid file
/// falls back to [`Config::default`] with a warning.
///
/// # Errors
///
/// Returns [`ConfigError::Expand`] when the path cannot be expanded,
/// [`ConfigError::NotFound`] when an explicit path is missing and [`ConfigError::Read`] when
/// the default directory cannot be created.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigError> {
    match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigError::NotFound { path: expanded });
            }

            Ok((load_or_default(&expanded), expanded))
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|err| ConfigError::Read {
                    path:    parent.to_path_buf(),
                    context: err.to_string(),
                })?;
            }

            Ok((load_or_default(&expanded), expanded))
        }
    }
}

fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file at {path:?}, using defaults");
        return Config::default();
    }

    read_config(path).unwrap_or_else(|err| {
        warn!("{err}; using defaults");
        Config::default()
    })
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|err| ConfigError::Expand {
        path:    str_path.to_string(),
        context: err.to_string(),
    })?;

    Ok(PathBuf::from(expanded.as_ref()))
}

/// Read, decode and validate the file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Read`], [`ConfigError::Parse`] or [`ConfigError::Validation`].
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path:    path.to_path_buf(),
        context: err.to_string(),
    })?;

    info!("Decoding config file {path:?}");

    let config: Config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path:    path.to_path_buf(),
        context: err.to_string(),
    })?;

    config.validate().map_err(ConfigError::Validation)?;

    info!("Config file loaded successfully");
    Ok(config)
}
