//! Storage mode selection result

use serde::Serialize;

/// Where all data is stored
///
/// Exactly one mode is active per resolved config. Precedence when
/// resolving is remote, then in-memory, then local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StorageMode {
    /// A remote database reached over HTTP, credentials embedded in `url`
    Remote { url: String },
    /// Process-local, non-persistent storage
    InMemory,
    /// On-disk storage rooted at `prefix`, served by `adapter`
    Local { adapter: String, prefix: String },
}

impl StorageMode {
    pub fn name(&self) -> &'static str {
        match self {
            StorageMode::Remote { .. } => "remote",
            StorageMode::InMemory => "in-memory",
            StorageMode::Local { .. } => "local",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, StorageMode::Remote { .. })
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self, StorageMode::InMemory)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, StorageMode::Local { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        let remote = StorageMode::Remote {
            url: "https://a:b@host/db".to_string(),
        };
        let local = StorageMode::Local {
            adapter: "fs".to_string(),
            prefix: "/srv/data/".to_string(),
        };

        assert_eq!(remote.name(), "remote");
        assert_eq!(StorageMode::InMemory.name(), "in-memory");
        assert_eq!(local.name(), "local");
        assert!(remote.is_remote() && !remote.is_local());
        assert!(StorageMode::InMemory.is_in_memory());
    }

    #[test]
    fn test_serialize_tagged() {
        let local = StorageMode::Local {
            adapter: "fs".to_string(),
            prefix: "/srv/data/".to_string(),
        };
        let json = serde_json::to_value(&local).unwrap();
        assert_eq!(json["mode"], "local");
        assert_eq!(json["adapter"], "fs");

        let json = serde_json::to_value(StorageMode::InMemory).unwrap();
        assert_eq!(json["mode"], "in_memory");
    }
}
