//! Roost Core Library
//!
//! This crate turns the flat options a user passes to a document server
//! into a grouped configuration, and decides where documents are stored.
//!
//! # Storage modes
//!
//! - **Remote**: a database reached over HTTP (`db_url`, with credentials)
//! - **In-memory**: nothing is persisted (`in_memory`)
//! - **Local**: an on-disk adapter rooted at `<data>/data/` (`db_adapter`)
//!
//! # Quick Start
//!
//! ```text
//! let mut registry = AdapterRegistry::new();
//! registry.register("fs", AdapterKind::Local)?;
//!
//! let options = RawOptions::load()?;
//! let config = resolve(&options, &registry)?;
//!
//! let users = config.storage_factory.open("_users");
//! ```
//!
//! # Modules
//!
//! - `options`: Flat options record and its layering (defaults, file, env)
//! - `resolver`: Options to grouped config, storage mode selection
//! - `storage`: Adapter registry, storage factory, storage modes
//! - `log_level`: Log verbosity names
//! - `error`: Validation and resolution errors

pub mod error;
pub mod log_level;
pub mod options;
pub mod resolver;
pub mod storage;

pub use error::{ConfigError, ConfigResult};
pub use log_level::LogLevel;
pub use options::RawOptions;
pub use resolver::{resolve, Paths, ResolvedConfig};
pub use storage::{
    Adapter, AdapterKind, AdapterRegistry, DbOptions, Plugin, StorageFactory, StorageHandle,
    StorageMode,
};
