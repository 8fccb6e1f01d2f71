//! User-supplied options
//!
//! Options are flat. They are gathered from, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. Config file (~/.config/roost/config.toml, or ROOST_CONFIG)
//! 3. Environment variables (ROOST_* prefix)
//! 4. Command-line flags (layered on by the host)
//!
//! The merged record is what `resolver::resolve` turns into a grouped
//! config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::log_level::LogLevel;

/// Environment variable prefix
const ENV_PREFIX: &str = "ROOST";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = ".roost";

/// Default directory for static public files
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default adapter for local storage
pub const DEFAULT_DB_ADAPTER: &str = "fs";

/// Keys accepted by `RawOptions::set`
pub const KEYS: &[&str] = &[
    "loglevel",
    "data",
    "public",
    "in_memory",
    "url",
    "admin_password",
    "db_url",
    "db_adapter",
];

/// Flat options record, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOptions {
    /// Log verbosity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loglevel: Option<LogLevel>,

    /// Base directory for local storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    /// Directory of static public files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<PathBuf>,

    /// Keep all data in memory (any truthy value)
    #[serde(
        default,
        alias = "inMemory",
        deserialize_with = "deserialize_truthy",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_memory: Option<bool>,

    /// Public URL of the application, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Admin password, passed through untouched
    #[serde(default, alias = "adminPassword", skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,

    /// Remote database URL with embedded credentials
    #[serde(default, alias = "dbUrl", skip_serializing_if = "Option::is_none")]
    pub db_url: Option<String>,

    /// Registered adapter name for local storage
    #[serde(default, alias = "dbAdapter", skip_serializing_if = "Option::is_none")]
    pub db_adapter: Option<String>,
}

impl RawOptions {
    /// Built-in defaults
    pub fn defaults() -> Self {
        Self {
            loglevel: Some(LogLevel::default()),
            data: Some(PathBuf::from(DEFAULT_DATA_DIR)),
            public: Some(PathBuf::from(DEFAULT_PUBLIC_DIR)),
            in_memory: Some(false),
            url: None,
            admin_password: None,
            db_url: None,
            db_adapter: Some(DEFAULT_DB_ADAPTER.to_string()),
        }
    }

    /// Fill every unset field from `lower`
    pub fn layer(self, lower: RawOptions) -> Self {
        Self {
            loglevel: self.loglevel.or(lower.loglevel),
            data: self.data.or(lower.data),
            public: self.public.or(lower.public),
            in_memory: self.in_memory.or(lower.in_memory),
            url: self.url.or(lower.url),
            admin_password: self.admin_password.or(lower.admin_password),
            db_url: self.db_url.or(lower.db_url),
            db_adapter: self.db_adapter.or(lower.db_adapter),
        }
    }

    /// Load options from the default config file, over defaults, with
    /// environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Like `load`, but reading `config_path` when one is given
    pub fn load_with_override(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load options from a specific config file
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut options = Self::from_file(path)?.layer(Self::defaults());
        options.apply_env_overrides()?;
        Ok(options)
    }

    /// Read only what the config file sets
    ///
    /// A missing file yields empty options.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse options from a TOML string (useful for testing)
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        toml::from_str(toml_content).context("Failed to parse options TOML")
    }

    /// Apply environment variable overrides
    ///
    /// An empty value clears the field.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = env_var("LOGLEVEL") {
            self.loglevel = match val {
                Some(val) => Some(
                    val.parse::<LogLevel>()
                        .with_context(|| format!("Invalid {}_LOGLEVEL", ENV_PREFIX))?,
                ),
                None => None,
            };
        }

        if let Some(val) = env_var("DATA") {
            self.data = val.map(PathBuf::from);
        }

        if let Some(val) = env_var("PUBLIC") {
            self.public = val.map(PathBuf::from);
        }

        if let Some(val) = env_var("IN_MEMORY") {
            self.in_memory = val.map(|v| is_truthy(&v));
        }

        if let Some(val) = env_var("URL") {
            self.url = val;
        }

        if let Some(val) = env_var("ADMIN_PASSWORD") {
            self.admin_password = val;
        }

        if let Some(val) = env_var("DB_URL") {
            self.db_url = val;
        }

        if let Some(val) = env_var("DB_ADAPTER") {
            self.db_adapter = val;
        }

        Ok(())
    }

    /// Set a single option from its string form
    ///
    /// An empty value or `none` clears the option.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = if value.is_empty() || value == "none" {
            None
        } else {
            Some(value.to_string())
        };

        match key {
            "loglevel" => {
                self.loglevel = value.map(|v| v.parse::<LogLevel>()).transpose()?;
            }
            "data" => self.data = value.map(PathBuf::from),
            "public" => self.public = value.map(PathBuf::from),
            "in_memory" => self.in_memory = value.map(|v| is_truthy(&v)),
            "url" => self.url = value,
            "admin_password" => self.admin_password = value,
            "db_url" => self.db_url = value,
            "db_adapter" => self.db_adapter = value,
            _ => {
                anyhow::bail!(
                    "Unknown option: '{}'\nValid options: {}",
                    key,
                    KEYS.join(", ")
                );
            }
        }

        Ok(())
    }

    /// Save options to a specific file
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
            }
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize options")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with ROOST_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roost")
            .join("config.toml")
    }
}

/// Read `ROOST_<name>`: `None` when unset, `Some(None)` when empty
fn env_var(name: &str) -> Option<Option<String>> {
    std::env::var(format!("{}_{}", ENV_PREFIX, name))
        .ok()
        .map(|val| if val.is_empty() { None } else { Some(val) })
}

/// Whether a string counts as a true flag
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value == "1"
        || value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("yes")
        || value.eq_ignore_ascii_case("on")
}

fn deserialize_truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Truthy {
        Bool(bool),
        Int(i64),
        Float(f64),
        Str(String),
    }

    let value = Option::<Truthy>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Truthy::Bool(b) => b,
        Truthy::Int(i) => i != 0,
        Truthy::Float(f) => f != 0.0,
        Truthy::Str(s) => is_truthy(&s),
    }))
}
