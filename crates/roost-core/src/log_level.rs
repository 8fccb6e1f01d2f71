//! Log verbosity levels
//!
//! The `loglevel` option accepts the level names used throughout the
//! document-server ecosystem, from the chattiest (`silly`) to `silent`.
//! Each name maps onto a tracing `LevelFilter` so the host can build its
//! subscriber from the resolved config.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;

/// Log verbosity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum LogLevel {
    Silly,
    Verbose,
    Info,
    Http,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    /// All level names, most verbose first
    pub const NAMES: &'static [&'static str] =
        &["silly", "verbose", "info", "http", "warn", "error", "silent"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Silly => "silly",
            LogLevel::Verbose => "verbose",
            LogLevel::Info => "info",
            LogLevel::Http => "http",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }

    /// The tracing filter equivalent to this level
    ///
    /// `http` has no tracing counterpart and is treated as `info`.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Silly => LevelFilter::TRACE,
            LogLevel::Verbose => LevelFilter::DEBUG,
            LogLevel::Info | LogLevel::Http => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Silent => LevelFilter::OFF,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silly" => Ok(LogLevel::Silly),
            "verbose" => Ok(LogLevel::Verbose),
            "info" => Ok(LogLevel::Info),
            "http" => Ok(LogLevel::Http),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" => Ok(LogLevel::Silent),
            _ => Err(ConfigError::InvalidLogLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}
