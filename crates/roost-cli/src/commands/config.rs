//! Config command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use roost_core::RawOptions;

use crate::output::Output;

/// The config file to read and write
pub fn effective_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(RawOptions::config_file_path)
}

/// Show the layered options
pub fn show(options: &RawOptions, config_path: Option<&Path>, output: &Output) -> Result<()> {
    output.print_options(options, &effective_path(config_path));
    Ok(())
}

/// Set a value in the config file
///
/// Only what the file already holds is rewritten; defaults and environment
/// overrides are never persisted.
pub fn set(key: &str, value: &str, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let path = effective_path(config_path);
    let mut options = RawOptions::from_file(&path).context("Failed to load config file")?;

    options.set(key, value)?;
    options
        .save_to_path(&path)
        .context("Failed to save configuration")?;

    if key == "admin_password" {
        output.success(&format!("Set {}", key));
    } else {
        output.success(&format!("Set {} = {}", key, value));
    }

    Ok(())
}

/// Print the config file path
pub fn path(config_path: Option<&Path>, output: &Output) -> Result<()> {
    output.print_path(&effective_path(config_path));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_set_writes_only_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set("db_adapter", "leveldb", Some(&path), &output).unwrap();
        set("in_memory", "true", Some(&path), &output).unwrap();

        let saved = RawOptions::from_file(&path).unwrap();
        assert_eq!(saved.db_adapter.as_deref(), Some("leveldb"));
        assert_eq!(saved.in_memory, Some(true));
        // Defaults are not written back
        assert!(saved.data.is_none());
        assert!(saved.loglevel.is_none());
    }

    #[test]
    fn test_set_none_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set("url", "https://app.example.com", Some(&path), &output).unwrap();
        set("url", "none", Some(&path), &output).unwrap();

        let saved = RawOptions::from_file(&path).unwrap();
        assert!(saved.url.is_none());
    }

    #[test]
    fn test_set_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        let err = set("port", "8080", Some(&path), &output).unwrap_err();
        assert!(err.to_string().contains("Unknown option"));
        assert!(!path.exists());
    }

    #[test]
    fn test_effective_path_prefers_flag() {
        let path = PathBuf::from("/etc/roost/config.toml");
        assert_eq!(effective_path(Some(&path)), path);
    }
}
