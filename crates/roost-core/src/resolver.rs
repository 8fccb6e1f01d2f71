//! Option resolution
//!
//! Turns the flat `RawOptions` record into a grouped `ResolvedConfig` and
//! picks one storage mode:
//!
//! 1. **Remote**, when `db_url` is set. The URL must carry credentials.
//! 2. **In-memory**, when `in_memory` is truthy.
//! 3. **Local** otherwise, using the `db_adapter` registered by the host
//!    and a prefix of `<data>/data/`.
//!
//! The remote and in-memory modes always use the built-in `http` and
//! `memory` adapters; only local mode consults the registry.
//!
//! Resolution reads the registry and returns new values. It never changes
//! process state; the host configures logging from `ResolvedConfig::loglevel`.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::log_level::LogLevel;
use crate::options::RawOptions;
use crate::storage::{
    Adapter, AdapterKind, AdapterRegistry, DbOptions, Plugin, StorageFactory, StorageMode,
};

/// Filesystem locations used by the application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Paths {
    /// Base directory for local storage
    pub data: Option<PathBuf>,
    /// Directory of static public files
    pub public: Option<PathBuf>,
}

/// Grouped configuration produced by `resolve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub loglevel: LogLevel,
    pub paths: Paths,
    /// True when data is kept in memory only
    pub in_memory: bool,
    /// Present only when the option was given
    pub url: Option<String>,
    /// Present only when the option was given
    pub admin_password: Option<String>,
    pub storage_mode: StorageMode,
    pub storage_factory: StorageFactory,
}

/// Resolve options against the adapters the host registered
///
/// # Errors
///
/// - Validation errors when `db_url` is unparseable or has no credentials,
///   or when local storage is selected without a data path
/// - Resolution errors when the selected adapter is not registered with
///   the right kind
pub fn resolve(options: &RawOptions, registry: &AdapterRegistry) -> ConfigResult<ResolvedConfig> {
    let loglevel = options.loglevel.unwrap_or_default();
    let paths = Paths {
        data: options.data.clone(),
        public: options.public.clone(),
    };
    let mut in_memory = options.in_memory.unwrap_or(false);

    let mut plugins = vec![Plugin::MapReduce];

    let (storage_mode, defaults) = if let Some(db_url) = non_empty(&options.db_url) {
        let parsed = check_credentials(db_url)?;
        let adapter = Adapter::http();

        info!("Storing all data in {}", redact_password(&parsed));

        let defaults = DbOptions {
            adapter: adapter.name.clone(),
            prefix: Some(db_url.to_string()),
        };
        plugins.push(Plugin::Adapter(adapter));
        (
            StorageMode::Remote {
                url: db_url.to_string(),
            },
            defaults,
        )
    } else if in_memory {
        let adapter = Adapter::memory();
        in_memory = true;

        info!("Storing all data in memory only");

        let defaults = DbOptions {
            adapter: adapter.name.clone(),
            prefix: None,
        };
        plugins.push(Plugin::Adapter(adapter));
        (StorageMode::InMemory, defaults)
    } else {
        let name = non_empty(&options.db_adapter).ok_or(ConfigError::MissingAdapter)?;
        let adapter = registry.require(name, AdapterKind::Local)?;
        let data = paths.data.as_ref().ok_or(ConfigError::MissingDataPath)?;
        let prefix = format!(
            "{}{}",
            normalize(&data.join("data")).display(),
            MAIN_SEPARATOR
        );

        info!("Storing all data in {} using {}", prefix, adapter.name);

        let defaults = DbOptions {
            adapter: adapter.name.clone(),
            prefix: Some(prefix.clone()),
        };
        plugins.push(Plugin::Adapter(adapter));
        (
            StorageMode::Local {
                adapter: name.to_string(),
                prefix,
            },
            defaults,
        )
    };

    debug!(
        "Storage plugins: {}",
        plugins
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(ResolvedConfig {
        loglevel,
        paths,
        in_memory,
        url: non_empty(&options.url).map(str::to_string),
        admin_password: non_empty(&options.admin_password).map(str::to_string),
        storage_mode,
        storage_factory: StorageFactory::new(plugins, defaults),
    })
}

/// Parse a database URL and require a user-info component
pub fn check_credentials(db_url: &str) -> ConfigResult<Url> {
    let parsed = Url::parse(db_url).map_err(|source| ConfigError::InvalidDbUrl {
        url: db_url.to_string(),
        source,
    })?;

    if parsed.username().is_empty() && parsed.password().is_none() {
        return Err(ConfigError::MissingCredentials {
            url: db_url.to_string(),
        });
    }

    Ok(parsed)
}

/// Replace the password of a URL string with `***`
///
/// Strings that don't parse as URLs are returned unchanged.
pub fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => redact_password(&parsed),
        Err(_) => raw.to_string(),
    }
}

fn redact_password(url: &Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }

    let mut redacted = url.clone();
    // Only fails for URLs that cannot have credentials, which have no password
    let _ = redacted.set_password(Some("***"));
    redacted.to_string()
}

/// Lexically clean a path: drop `.` segments and fold `..` into its parent
///
/// Leading `..` is kept on relative paths and dropped at the root. Nothing
/// is looked up on disk, so symlinks are not followed.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Treat empty strings as unset
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
