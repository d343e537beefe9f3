//! # Observability
//!
//! Logging setup for the upvotes workspace.
//!
//! Library crates only emit `tracing` events. Binaries call
//! [`init_with_config`] once at startup; events are then written as JSONL to
//! a central file (`~/.upvotes/logs/dev.jsonl` unless overridden) and,
//! optionally, in compact form to stderr.
//!
//! ```rust,ignore
//! fn main() {
//!     upvotes_observability::init_with_config(upvotes_observability::LogConfig {
//!         service_name: "upvotes".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     })?;
//!     tracing::info!("ready");
//! }
//! ```

mod writer;

use std::io;
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use writer::{CentralLogWriter, WriterFactory};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, attached to the startup event.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG` environment variable.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.upvotes/logs/dev.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

fn default_log_path() -> io::Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".upvotes").join("logs").join("dev.jsonl"))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "home directory not found"))
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>(default_level: &str) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_writer(io::stderr)
        .with_filter(env_filter(default_level))
}

/// Initialize the logging system with the given configuration.
///
/// Returns the path of the JSONL log file. Calling this a second time in the
/// same process leaves the first subscriber in place. When the log file
/// cannot be opened and `also_stderr` is set, the stderr layer is still
/// installed before the error is returned.
pub fn init_with_config(config: LogConfig) -> io::Result<PathBuf> {
    let log_path = match config.log_path.clone() {
        Some(path) => path,
        None => default_log_path()?,
    };

    let writer = match CentralLogWriter::new(&log_path) {
        Ok(writer) => writer,
        Err(err) => {
            if config.also_stderr {
                let installed = tracing_subscriber::registry()
                    .with(stderr_layer(&config.default_level))
                    .try_init()
                    .is_ok();
                if installed {
                    tracing::warn!(
                        service = %config.service_name,
                        log_path = %log_path.display(),
                        error = %err,
                        "log file unavailable, logging to stderr only"
                    );
                }
            }
            return Err(err);
        }
    };

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_target(true)
        .with_writer(WriterFactory::new(writer))
        .with_filter(env_filter(&config.default_level));

    let stderr_layer = config
        .also_stderr
        .then(|| stderr_layer(&config.default_level));

    let installed = tracing_subscriber::registry()
        .with(json_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service_name,
            pid = std::process::id(),
            log_path = %log_path.display(),
            "observability initialized"
        );
    }

    Ok(log_path)
}

/// Parse a log level name. `None` for anything that is not a level.
pub fn parse_level(level: &str) -> Option<tracing::Level> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Some(tracing::Level::TRACE),
        "debug" => Some(tracing::Level::DEBUG),
        "info" => Some(tracing::Level::INFO),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "error" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.service_name, "unknown");
        assert_eq!(config.default_level, "info");
        assert!(config.log_path.is_none());
        assert!(!config.also_stderr);
    }

    #[test]
    fn parse_level_all_variants() {
        assert_eq!(parse_level("trace"), Some(tracing::Level::TRACE));
        assert_eq!(parse_level("Debug"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_level(" INFO "), Some(tracing::Level::INFO));
        assert_eq!(parse_level("warning"), Some(tracing::Level::WARN));
        assert_eq!(parse_level("error"), Some(tracing::Level::ERROR));
        assert_eq!(parse_level("nonsense"), None);
    }

    #[test]
    fn init_creates_log_file_at_custom_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("test.jsonl");

        let returned = init_with_config(LogConfig {
            service_name: "test".into(),
            log_path: Some(path.clone()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(returned, path);
        assert!(path.exists());
    }
}
