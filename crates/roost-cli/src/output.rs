//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! Secrets never reach the terminal: admin passwords are masked and
//! database URLs have their password replaced.

use std::path::Path;

use roost_core::resolver::redact_url;
use roost_core::{Adapter, RawOptions, ResolvedConfig, StorageMode};

const MASK: &str = "********";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a resolved configuration
    pub fn print_resolved(&self, config: &ResolvedConfig) {
        match self.format {
            OutputFormat::Human => {
                let factory = &config.storage_factory;
                println!("Storage:");
                println!("  mode:     {}", config.storage_mode.name());
                println!("  adapter:  {}", factory.adapter());
                println!("  location: {}", storage_location(&config.storage_mode));
                let plugins: Vec<String> = factory.plugins().iter().map(|p| p.to_string()).collect();
                println!("  plugins:  {}", plugins.join(", "));
                println!();
                println!("Paths:");
                println!("  data:     {}", display_path(config.paths.data.as_deref()));
                println!("  public:   {}", display_path(config.paths.public.as_deref()));
                println!();
                println!("loglevel:       {}", config.loglevel);
                println!("in_memory:      {}", config.in_memory);
                println!("url:            {}", config.url.as_deref().unwrap_or("(not set)"));
                println!(
                    "admin_password: {}",
                    if config.admin_password.is_some() {
                        MASK
                    } else {
                        "(not set)"
                    }
                );
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&resolved_json(config))
                        .unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Quiet => {
                println!("{}", storage_location(&config.storage_mode));
            }
        }
    }

    /// Print layered options before resolution
    pub fn print_options(&self, options: &RawOptions, config_file: &Path) {
        match self.format {
            OutputFormat::Human => {
                println!("Options:");
                println!("  loglevel:       {}", display_opt(options.loglevel));
                println!("  data:           {}", display_path(options.data.as_deref()));
                println!("  public:         {}", display_path(options.public.as_deref()));
                println!("  in_memory:      {}", display_opt(options.in_memory));
                println!("  url:            {}", display_opt(options.url.as_ref()));
                println!(
                    "  admin_password: {}",
                    display_opt(options.admin_password.as_ref().map(|_| MASK))
                );
                println!(
                    "  db_url:         {}",
                    display_opt(options.db_url.as_deref().map(redact_url))
                );
                println!("  db_adapter:     {}", display_opt(options.db_adapter.as_ref()));
                println!();
                println!("Config file: {}", config_file.display());
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "options": options_json(options),
                        "config_file": config_file,
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", config_file.display());
            }
        }
    }

    /// Print the adapters the resolver can select
    pub fn print_adapters(&self, adapters: &[Adapter]) {
        match self.format {
            OutputFormat::Human => {
                if adapters.is_empty() {
                    println!("No adapters registered.");
                    return;
                }
                for adapter in adapters {
                    println!("{:<10} {}", adapter.name, adapter.kind);
                }
                println!("\n{} adapter(s)", adapters.len());
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(adapters).unwrap_or_else(|_| "[]".to_string())
                );
            }
            OutputFormat::Quiet => {
                for adapter in adapters {
                    println!("{}", adapter.name);
                }
            }
        }
    }

    /// Print a path on its own
    pub fn print_path(&self, path: &Path) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "path": path }));
            }
            OutputFormat::Human | OutputFormat::Quiet => {
                println!("{}", path.display());
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a hint to stderr (suppressed in quiet mode)
    pub fn hint(&self, hint: &str) {
        if !self.is_quiet() {
            eprintln!("hint: {}", hint);
        }
    }
}

/// Where the selected mode keeps its data, with credentials redacted
pub fn storage_location(mode: &StorageMode) -> String {
    match mode {
        StorageMode::Remote { url } => redact_url(url),
        StorageMode::InMemory => "memory".to_string(),
        StorageMode::Local { prefix, .. } => prefix.clone(),
    }
}

/// JSON view of a resolved config, secrets redacted
pub fn resolved_json(config: &ResolvedConfig) -> serde_json::Value {
    let factory = &config.storage_factory;
    let plugins: Vec<String> = factory.plugins().iter().map(|p| p.to_string()).collect();

    serde_json::json!({
        "loglevel": config.loglevel,
        "paths": config.paths,
        "in_memory": config.in_memory,
        "url": config.url,
        "admin_password": config.admin_password.as_ref().map(|_| MASK),
        "storage": {
            "mode": config.storage_mode.name(),
            "adapter": factory.adapter(),
            "location": storage_location(&config.storage_mode),
            "plugins": plugins,
        }
    })
}

fn options_json(options: &RawOptions) -> serde_json::Value {
    serde_json::json!({
        "loglevel": options.loglevel,
        "data": options.data,
        "public": options.public,
        "in_memory": options.in_memory,
        "url": options.url,
        "admin_password": options.admin_password.as_ref().map(|_| MASK),
        "db_url": options.db_url.as_deref().map(redact_url),
        "db_adapter": options.db_adapter,
    })
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}
