//! Storage factory
//!
//! A `StorageFactory` is what the rest of the application uses to open
//! databases. It is built fresh by every resolution and carries:
//! - the plugins composed into the storage engine (query support, then the
//!   selected adapter)
//! - the default database options for the selected mode (adapter, prefix)
//!
//! The factory never touches disk or network. `open` only computes where a
//! database lives and which adapter serves it.

use std::fmt;

use serde::Serialize;

use super::adapter::Adapter;

/// A capability composed into the storage engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Plugin {
    /// Map/reduce secondary-index queries
    MapReduce,
    /// A storage adapter
    Adapter(Adapter),
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plugin::MapReduce => f.write_str("mapreduce"),
            Plugin::Adapter(adapter) => write!(f, "adapter:{}", adapter.name),
        }
    }
}

/// Default options applied to every database opened through a factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbOptions {
    /// Adapter name
    pub adapter: String,
    /// Prepended to database names to form their location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// A database as it would be opened by the storage engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageHandle {
    pub name: String,
    pub adapter: String,
    /// Prefix followed by the name, or just the name without a prefix
    pub location: String,
}

/// Storage engine constructor pre-bound with mode-specific defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageFactory {
    plugins: Vec<Plugin>,
    defaults: DbOptions,
}

impl StorageFactory {
    pub(crate) fn new(plugins: Vec<Plugin>, defaults: DbOptions) -> Self {
        Self { plugins, defaults }
    }

    /// Plugins in the order they were composed
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn has_plugin(&self, plugin: &Plugin) -> bool {
        self.plugins.contains(plugin)
    }

    /// Default adapter name
    pub fn adapter(&self) -> &str {
        &self.defaults.adapter
    }

    /// Default location prefix, if the mode has one
    pub fn prefix(&self) -> Option<&str> {
        self.defaults.prefix.as_deref()
    }

    /// Describe the database `name` opened with this factory's defaults
    pub fn open(&self, name: &str) -> StorageHandle {
        let location = match &self.defaults.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        };

        StorageHandle {
            name: name.to_string(),
            adapter: self.defaults.adapter.clone(),
            location,
        }
    }
}
