// Rust guideline compliant 2026-02-06

//! Tracing subscriber setup for the CLI.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

/// Installs a global `fmt` subscriber writing to stderr.
///
/// # Arguments
///
/// * `level` - error, warn, info, debug, or trace
/// * `json` - Emit JSON lines instead of human-readable text
///
/// # Errors
///
/// Returns an error if the level is unknown.
pub fn init_tracing(level: &str, json: bool) -> Result<()> {
    let level = parse_log_level(level)?;
    let builder = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when embedded in tests.
    if json {
        let _ = tracing::subscriber::set_global_default(builder.json().finish());
    } else {
        let _ = tracing::subscriber::set_global_default(builder.finish());
    }
    Ok(())
}

/// Parses a log level name.
///
/// # Errors
///
/// Returns an error if the name is not a known level.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        other => anyhow::bail!("Unknown log level: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert!(parse_log_level("verbose").is_err());
    }
}
