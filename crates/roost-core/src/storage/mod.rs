//! Storage backend selection
//!
//! Describes the storage engine the application should use, without
//! implementing any storage itself.
//!
//! ## Parts
//!
//! - **AdapterRegistry**: host-supplied table of adapter names and kinds
//! - **StorageMode**: the closed set of modes (remote, in-memory, local)
//! - **StorageFactory**: plugins plus default options, built per resolution

pub mod adapter;
pub mod factory;
pub mod mode;

pub use adapter::{Adapter, AdapterKind, AdapterRegistry, HTTP_ADAPTER, MEMORY_ADAPTER};
pub use factory::{DbOptions, Plugin, StorageFactory, StorageHandle};
pub use mode::StorageMode;
