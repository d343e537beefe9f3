//! Logging initialization for the upvotes binaries.

use crate::Paths;
use upvotes_observability::LogConfig;

/// Initialize structured logging.
///
/// JSONL goes to `<base>/logs/dev.jsonl`; compact lines are mirrored to
/// stderr. `RUST_LOG` takes precedence over `level`. A log file that cannot
/// be opened is reported on stderr and only the stderr output stays active.
pub fn init_logging(paths: &Paths, level: &str) {
    let result = upvotes_observability::init_with_config(LogConfig {
        service_name: "upvotes".into(),
        default_level: level.into(),
        log_path: Some(paths.log_file()),
        also_stderr: true,
    });

    if let Err(err) = result {
        eprintln!(
            "failed to open log file {}: {}",
            paths.log_file().display(),
            err
        );
    }
}
