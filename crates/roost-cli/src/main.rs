//! Roost CLI
//!
//! Command-line interface for Roost - resolves storage configuration for a
//! document server and reports which backend it would use.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use roost_core::{AdapterKind, AdapterRegistry, LogLevel, RawOptions};

mod commands;
mod logging;
mod output;

use output::{Output, OutputFormat};

/// Local adapters this host provides
const LOCAL_ADAPTERS: &[&str] = &["fs", "leveldb"];

#[derive(Parser)]
#[command(name = "roost")]
#[command(about = "Roost - storage configuration for document servers")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (defaults to ~/.config/roost/config.toml or ROOST_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    options: OptionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Option flags, highest precedence layer
#[derive(Args, Debug, Default)]
struct OptionArgs {
    /// Log level (silly, verbose, info, http, warn, error, silent)
    #[arg(long, global = true)]
    loglevel: Option<LogLevel>,

    /// Base directory for local storage
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Directory of static public files
    #[arg(long, global = true)]
    public: Option<PathBuf>,

    /// Keep all data in memory (`--in-memory=false` overrides the config file)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    in_memory: Option<bool>,

    /// Public URL of the application
    #[arg(long, global = true)]
    url: Option<String>,

    /// Admin password
    #[arg(long, global = true)]
    admin_password: Option<String>,

    /// Remote database URL, with credentials
    #[arg(long, global = true)]
    db_url: Option<String>,

    /// Adapter for local storage
    #[arg(long, global = true)]
    db_adapter: Option<String>,
}

impl OptionArgs {
    fn into_options(self) -> RawOptions {
        RawOptions {
            loglevel: self.loglevel,
            data: self.data,
            public: self.public,
            in_memory: self.in_memory,
            url: self.url,
            admin_password: self.admin_password,
            db_url: self.db_url,
            db_adapter: self.db_adapter,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve options and show the storage configuration (default)
    Resolve,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// List registered storage adapters
    Adapters,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show options after layering defaults, config file, env and flags
    Show,
    /// Set a value in the config file
    Set {
        /// Option name (loglevel, data, public, in_memory, url,
        /// admin_password, db_url, db_adapter)
        key: String,
        /// Option value (`none` clears it)
        value: String,
    },
    /// Show the config file path
    Path,
}

fn main() -> Result<()> {
    let Cli {
        json,
        quiet,
        config,
        options,
        command,
    } = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(json, quiet));
    let config_path = config.as_deref();
    let registry = adapter_registry()?;

    match command.unwrap_or(Commands::Resolve) {
        Commands::Resolve => {
            let options = load_options(config_path, options)?;
            logging::init_logging(options.loglevel.unwrap_or_default());
            debug!(
                "Options loaded, config file {}",
                commands::config::effective_path(config_path).display()
            );
            commands::resolve::run(&options, &registry, &output)
        }
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => {
                let options = load_options(config_path, options)?;
                commands::config::show(&options, config_path, &output)
            }
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(&key, &value, config_path, &output)
            }
            Some(ConfigCommands::Path) => commands::config::path(config_path, &output),
        },
        Commands::Adapters => commands::adapters::list(&registry, &output),
    }
}

/// Flags over config file, environment and defaults
fn load_options(config_path: Option<&Path>, flags: OptionArgs) -> Result<RawOptions> {
    let loaded = RawOptions::load_with_override(config_path)?;
    Ok(flags.into_options().layer(loaded))
}

/// Adapters available to the resolver in this host
fn adapter_registry() -> Result<AdapterRegistry> {
    let mut registry = AdapterRegistry::new();
    for name in LOCAL_ADAPTERS {
        registry.register(*name, AdapterKind::Local)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_into_options() {
        let cli = Cli::try_parse_from([
            "roost",
            "--db-url",
            "https://admin:pw@couch:5984",
            "--in-memory",
            "--loglevel",
            "info",
            "resolve",
        ])
        .unwrap();

        let options = cli.options.into_options();
        assert_eq!(
            options.db_url.as_deref(),
            Some("https://admin:pw@couch:5984")
        );
        assert_eq!(options.in_memory, Some(true));
        assert_eq!(options.loglevel, Some(LogLevel::Info));
        assert!(options.data.is_none());
    }

    #[test]
    fn test_absent_in_memory_flag_is_unset() {
        let cli = Cli::try_parse_from(["roost"]).unwrap();
        let options = cli.options.into_options();
        assert!(options.in_memory.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_in_memory_flag_values() {
        let cli = Cli::try_parse_from(["roost", "--in-memory=false"]).unwrap();
        assert_eq!(cli.options.in_memory, Some(false));

        let cli = Cli::try_parse_from(["roost", "--in-memory=yes", "resolve"]).unwrap();
        assert_eq!(cli.options.in_memory, Some(true));

        assert!(Cli::try_parse_from(["roost", "--in-memory=maybe"]).is_err());
    }

    #[test]
    fn test_in_memory_false_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "in_memory = true\n").unwrap();

        let cli = Cli::try_parse_from(["roost", "--in-memory=false"]).unwrap();
        let options = load_options(Some(&path), cli.options).unwrap();
        assert_eq!(options.in_memory, Some(false));

        let options = load_options(Some(&path), OptionArgs::default()).unwrap();
        assert_eq!(options.in_memory, Some(true));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["roost", "config", "show", "--data", "/srv/app", "--json"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.options.data, Some(PathBuf::from("/srv/app")));
    }

    #[test]
    fn test_invalid_loglevel_rejected() {
        assert!(Cli::try_parse_from(["roost", "--loglevel", "loud"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data = \"/from/file\"\ndb_adapter = \"leveldb\"\n").unwrap();

        let flags = OptionArgs {
            data: Some(PathBuf::from("/from/flag")),
            ..Default::default()
        };
        let options = load_options(Some(&path), flags).unwrap();

        assert_eq!(options.data, Some(PathBuf::from("/from/flag")));
        assert_eq!(options.db_adapter.as_deref(), Some("leveldb"));
        assert_eq!(options.public, Some(PathBuf::from("public")));
    }

    #[test]
    fn test_host_registry() {
        let registry = adapter_registry().unwrap();
        assert_eq!(registry.get("fs"), Some(AdapterKind::Local));
        assert_eq!(registry.get("leveldb"), Some(AdapterKind::Local));
        assert_eq!(registry.get("http"), Some(AdapterKind::Http));
        assert_eq!(registry.get("memory"), Some(AdapterKind::Memory));
    }
}
