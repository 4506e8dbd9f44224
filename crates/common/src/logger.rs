use crate::error::ScenescribeError;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log to stderr and to `<log_dir>/scenescribe.log`
///
/// Stdout is left to the scene listing.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<(), ScenescribeError> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        ScenescribeError::file_system(format!("Failed to create log directory {}: {}", log_dir.display(), e))
    })?;

    let log_file_path = log_dir.join("scenescribe.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| {
            ScenescribeError::file_system(format!("Failed to open log file {}: {}", log_file_path.display(), e))
        })?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(env_filter(log_level)))
        .with(
            fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_filter(env_filter(log_level)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("Logging to {}", log_file_path.display());
    Ok(())
}

/// Log to stderr only
pub fn setup_console_logging(log_level: &str) -> Result<(), ScenescribeError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(log_level))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;
    Ok(())
}

/// RUST_LOG wins over `--log-level`
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_directive(log_level)))
}

/// Directive for a level name; unknown names fall back to `info`
fn level_directive(log_level: &str) -> String {
    let level = match log_level.trim() {
        "warning" | "WARNING" => Level::WARN,
        name => name.parse::<Level>().unwrap_or_else(|_| {
            eprintln!("Unknown log level '{}', using info", log_level);
            Level::INFO
        }),
    };
    level.as_str().to_ascii_lowercase()
}
