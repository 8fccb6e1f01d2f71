//! Logging setup
//!
//! Logs go to stderr so `--json` output on stdout stays parseable. The
//! filter comes from the resolved `loglevel` unless ROOST_LOG is set, in
//! which case ROOST_LOG is used as a full `EnvFilter` directive.

use roost_core::LogLevel;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter
const LOG_ENV: &str = "ROOST_LOG";

/// Initialize logging for the CLI
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: LogLevel) {
    let env_filter = match std::env::var(LOG_ENV) {
        Ok(filter) if !filter.is_empty() => EnvFilter::new(filter),
        _ => EnvFilter::new(filter_directive(level)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Filter directive covering this workspace's crates at `level`
fn filter_directive(level: LogLevel) -> String {
    let filter = level.level_filter();
    format!("roost_core={},roost_cli={}", filter, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(
            filter_directive(LogLevel::Info).to_lowercase(),
            "roost_core=info,roost_cli=info"
        );
        assert_eq!(
            filter_directive(LogLevel::Silent).to_lowercase(),
            "roost_core=off,roost_cli=off"
        );
        assert_eq!(
            filter_directive(LogLevel::Silly).to_lowercase(),
            "roost_core=trace,roost_cli=trace"
        );
    }
}
