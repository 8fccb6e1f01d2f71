//! Storage adapter registration
//!
//! The `http` and `memory` adapters are built in. The host application
//! decides which local adapters exist. It fills an `AdapterRegistry` at
//! startup and hands it to the resolver, which only reads it. Nothing is
//! registered globally, so two resolutions never see each other's adapters.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{ConfigError, ConfigResult};

/// Name of the built-in adapter used for remote databases
pub const HTTP_ADAPTER: &str = "http";

/// Name of the built-in adapter used for in-memory storage
pub const MEMORY_ADAPTER: &str = "memory";

/// Which storage mode an adapter serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    /// Talks to a remote database over HTTP
    Http,
    /// Keeps everything in process memory
    Memory,
    /// Stores data on disk under a local prefix
    Local,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdapterKind::Http => "http",
            AdapterKind::Memory => "memory",
            AdapterKind::Local => "local",
        };
        f.write_str(name)
    }
}

/// A registered storage adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adapter {
    pub name: String,
    pub kind: AdapterKind,
}

impl Adapter {
    /// The built-in adapter for remote databases
    pub fn http() -> Self {
        Self {
            name: HTTP_ADAPTER.to_string(),
            kind: AdapterKind::Http,
        }
    }

    /// The built-in adapter for in-memory storage
    pub fn memory() -> Self {
        Self {
            name: MEMORY_ADAPTER.to_string(),
            kind: AdapterKind::Memory,
        }
    }

    /// Whether `name` belongs to a built-in adapter
    pub fn is_builtin(name: &str) -> bool {
        name == HTTP_ADAPTER || name == MEMORY_ADAPTER
    }
}

/// Table of adapters available to the resolver
///
/// Always holds the built-in `http` and `memory` adapters; their names are
/// reserved. Local adapters are left to the host.
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    adapters: BTreeMap<String, AdapterKind>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        let adapters = [Adapter::http(), Adapter::memory()]
            .into_iter()
            .map(|adapter| (adapter.name, adapter.kind))
            .collect();
        Self { adapters }
    }
}

impl AdapterRegistry {
    /// Create a registry holding only the built-in adapters
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter, replacing any previous entry with the same name
    ///
    /// Built-in names cannot be registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        kind: AdapterKind,
    ) -> ConfigResult<&mut Self> {
        let name = name.into();
        if Adapter::is_builtin(&name) {
            return Err(ConfigError::ReservedAdapter { name });
        }

        self.adapters.insert(name, kind);
        Ok(self)
    }

    /// Look up the kind of a registered adapter
    pub fn get(&self, name: &str) -> Option<AdapterKind> {
        self.adapters.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adapters.contains_key(name)
    }

    /// Registered adapter names, sorted
    pub fn names(&self) -> Vec<String> {
        self.adapters.keys().cloned().collect()
    }

    /// All registered adapters, sorted by name
    pub fn adapters(&self) -> Vec<Adapter> {
        self.adapters
            .iter()
            .map(|(name, kind)| Adapter {
                name: name.clone(),
                kind: *kind,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Resolve an adapter by name, checking it serves the expected mode
    pub fn require(&self, name: &str, expected: AdapterKind) -> ConfigResult<Adapter> {
        let actual = self.get(name).ok_or_else(|| ConfigError::UnknownAdapter {
            name: name.to_string(),
            available: self.names(),
        })?;

        if actual != expected {
            return Err(ConfigError::AdapterKindMismatch {
                name: name.to_string(),
                expected,
                actual,
            });
        }

        Ok(Adapter {
            name: name.to_string(),
            kind: actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_always_present() {
        let registry = AdapterRegistry::new();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(HTTP_ADAPTER), Some(AdapterKind::Http));
        assert_eq!(registry.get(MEMORY_ADAPTER), Some(AdapterKind::Memory));
        assert!(!registry.contains("fs"));
    }

    #[test]
    fn test_register_chains_and_sorts() {
        let mut registry = AdapterRegistry::new();
        registry
            .register("leveldb", AdapterKind::Local)
            .unwrap()
            .register("fs", AdapterKind::Local)
            .unwrap();

        assert_eq!(registry.names(), vec!["fs", "http", "leveldb", "memory"]);
        assert_eq!(registry.adapters()[0].kind, AdapterKind::Local);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = AdapterRegistry::new();
        registry.register("custom", AdapterKind::Memory).unwrap();
        registry.register("custom", AdapterKind::Local).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("custom"), Some(AdapterKind::Local));
    }

    #[test]
    fn test_builtin_names_reserved() {
        let mut registry = AdapterRegistry::new();

        let err = registry.register(HTTP_ADAPTER, AdapterKind::Local).unwrap_err();
        assert!(matches!(err, ConfigError::ReservedAdapter { .. }));
        assert!(registry.register(MEMORY_ADAPTER, AdapterKind::Local).is_err());

        assert_eq!(registry.get(HTTP_ADAPTER), Some(AdapterKind::Http));
        assert_eq!(registry.get(MEMORY_ADAPTER), Some(AdapterKind::Memory));
    }

    #[test]
    fn test_require_unknown() {
        let registry = AdapterRegistry::new();
        let err = registry.require("rocksdb", AdapterKind::Local).unwrap_err();

        match err {
            ConfigError::UnknownAdapter { name, available } => {
                assert_eq!(name, "rocksdb");
                assert_eq!(available, vec!["http", "memory"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_require_wrong_kind() {
        let registry = AdapterRegistry::new();
        let err = registry.require("memory", AdapterKind::Local).unwrap_err();
        assert!(matches!(err, ConfigError::AdapterKindMismatch { .. }));
    }

    #[test]
    fn test_require_ok() {
        let mut registry = AdapterRegistry::new();
        registry.register("fs", AdapterKind::Local).unwrap();

        let adapter = registry.require("fs", AdapterKind::Local).unwrap();
        assert_eq!(adapter.name, "fs");
        assert_eq!(adapter.kind, AdapterKind::Local);
    }
}
