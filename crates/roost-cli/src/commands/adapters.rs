//! Adapters command handler

use anyhow::Result;

use roost_core::AdapterRegistry;

use crate::output::Output;

/// List registered storage adapters
pub fn list(registry: &AdapterRegistry, output: &Output) -> Result<()> {
    output.print_adapters(&registry.adapters());
    Ok(())
}
