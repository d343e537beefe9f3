//! Configuration, runtime paths and logging entry point for the upvotes clients.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, EnvSource, ProcessEnv, DEFAULT_CLERK_API_URL, DEFAULT_LOG_LEVEL};
pub use error::{ConfigError, ConfigResult};
pub use logging::init_logging;
pub use paths::Paths;
