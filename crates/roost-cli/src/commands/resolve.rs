//! Resolve command handler

use anyhow::{Context, Result};

use roost_core::{resolve, AdapterRegistry, RawOptions, ResolvedConfig};

use crate::output::Output;

/// Resolve options and print the resulting configuration
pub fn run(options: &RawOptions, registry: &AdapterRegistry, output: &Output) -> Result<()> {
    let config = resolve_with_hint(options, registry, output)?;
    output.print_resolved(&config);
    Ok(())
}

/// Resolve options, printing a recovery hint on failure
pub fn resolve_with_hint(
    options: &RawOptions,
    registry: &AdapterRegistry,
    output: &Output,
) -> Result<ResolvedConfig> {
    match resolve(options, registry) {
        Ok(config) => Ok(config),
        Err(e) => {
            if let Some(hint) = e.recovery_suggestion() {
                output.hint(hint);
            }
            Err(e).context("Failed to resolve storage configuration")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use roost_core::{AdapterKind, ConfigError};

    #[test]
    fn test_error_keeps_config_error() {
        let output = Output::new(OutputFormat::Quiet);
        let options = RawOptions {
            db_url: Some("https://couch:5984/".to_string()),
            ..Default::default()
        };

        let err = resolve_with_hint(&options, &AdapterRegistry::new(), &output)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to resolve"));
        let source = err.downcast_ref::<ConfigError>().unwrap();
        assert!(source.is_validation());
    }

    #[test]
    fn test_resolves_local() {
        let output = Output::new(OutputFormat::Quiet);
        let mut registry = AdapterRegistry::new();
        registry.register("fs", AdapterKind::Local).unwrap();

        let config = resolve_with_hint(&RawOptions::defaults(), &registry, &output).unwrap();
        assert!(config.storage_mode.is_local());
        assert_eq!(config.storage_factory.adapter(), "fs");
    }
}
