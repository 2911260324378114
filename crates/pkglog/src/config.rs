//! crates/pkglog/src/config.rs
//! The `pkg=level` configuration language.

use std::collections::HashMap;

use thiserror::Error;

use crate::level::{Level, ParseLevelError, parse_level};

/// Package name that addresses every package of a repository.
///
/// [`RepoLogger::set_log_level`](crate::RepoLogger::set_log_level) applies it
/// before any named package, so it acts as a baseline.
pub const WILDCARD: &str = "*";

/// Requested level per package name, as produced by [`parse_log_level_config`].
pub type LevelConfig = HashMap<String, Level>;

/// Errors produced while parsing a `pkg=level` configuration string.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// A comma-separated setting did not have the `pkg=level` shape.
    #[error("oddly structured `pkg=level` option: {setting}")]
    MalformedSetting {
        /// The offending setting, verbatim.
        setting: String,
    },
    /// The level part of a setting was not a recognised level.
    #[error(transparent)]
    Level(#[from] ParseLevelError),
}

impl ConfigError {
    /// Returns the malformed setting, when that is what failed.
    #[must_use]
    pub fn setting(&self) -> Option<&str> {
        match self {
            Self::MalformedSetting { setting } => Some(setting),
            Self::Level(_) => None,
        }
    }
}

/// Parses a comma-separated list of `package=level` settings.
///
/// Settings are processed in input order; a later setting for the same package
/// replaces an earlier one. Each setting must contain exactly one `=`. The
/// level part accepts everything [`parse_level`] accepts. The first bad setting
/// aborts the parse and nothing is returned for the settings before it.
/// Whitespace is significant.
///
/// # Examples
///
/// ```
/// use pkglog::{Level, parse_log_level_config};
///
/// let config = parse_log_level_config("*=WARNING,server=D").unwrap();
/// assert_eq!(config["*"], Level::Warning);
/// assert_eq!(config["server"], Level::Debug);
///
/// let err = parse_log_level_config("server").unwrap_err();
/// assert_eq!(err.setting(), Some("server"));
/// ```
pub fn parse_log_level_config(conf: &str) -> Result<LevelConfig, ConfigError> {
    let mut out = LevelConfig::new();
    for setting in conf.split(',') {
        let (pkg, level) = split_setting(setting)?;
        out.insert(pkg.to_owned(), parse_level(level)?);
    }
    Ok(out)
}

/// Splits `pkg=level`, rejecting settings with zero or several `=`.
fn split_setting(setting: &str) -> Result<(&str, &str), ConfigError> {
    let mut parts = setting.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(pkg), Some(level), None) => Ok((pkg, level)),
        _ => Err(ConfigError::MalformedSetting {
            setting: setting.to_owned(),
        }),
    }
}
