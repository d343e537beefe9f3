//! Configuration for the Clerk and Supabase clients.

use crate::{ConfigError, ConfigResult, Paths};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// Default Clerk Backend API base URL.
pub const DEFAULT_CLERK_API_URL: &str = "https://api.clerk.com";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_CLERK_PUBLISHABLE_KEY: [&str; 2] =
    ["CLERK_PUBLISHABLE_KEY", "VITE_CLERK_PUBLISHABLE_KEY"];
const ENV_SUPABASE_URL: [&str; 2] = ["SUPABASE_URL", "VITE_SUPABASE_URL"];
const ENV_SUPABASE_ANON_KEY: [&str; 2] = ["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"];
const ENV_CLERK_SECRET_KEY: &str = "CLERK_SECRET_KEY";
const ENV_CLERK_API_URL: &str = "CLERK_API_URL";
const ENV_CLERK_FRONTEND_API_URL: &str = "CLERK_FRONTEND_API_URL";
const ENV_LOG_LEVEL: &str = "UPVOTES_LOG_LEVEL";

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn first_var(env: &dyn EnvSource, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| env.var(key).and_then(non_empty))
}

/// Client configuration.
///
/// Values come from `<base>/config.json` when present and are overridden by
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Clerk publishable key (`pk_test_...` / `pk_live_...`).
    pub clerk_publishable_key: String,
    /// Clerk secret key used for Backend API user lookups.
    pub clerk_secret_key: Option<String>,
    /// Clerk Backend API base URL.
    pub clerk_api_url: String,
    /// Overrides the Frontend API host decoded from the publishable key.
    pub clerk_frontend_api_url: Option<String>,
    /// Supabase project URL.
    pub supabase_url: String,
    /// Supabase anonymous API key.
    pub supabase_anon_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            clerk_publishable_key: String::new(),
            clerk_secret_key: None,
            clerk_api_url: DEFAULT_CLERK_API_URL.to_string(),
            clerk_frontend_api_url: None,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment only.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_source(&ProcessEnv)
    }

    /// Build the configuration from the given environment source only.
    pub fn from_env_source(env: &dyn EnvSource) -> ConfigResult<Self> {
        let mut config = Self::default();
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Load `<base>/config.json` if it exists, then apply the environment.
    pub fn load(paths: &Paths, env: &dyn EnvSource) -> ConfigResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env(env);
        config.validate()?;

        tracing::debug!(
            config_file = %config_path.display(),
            supabase_url = %config.supabase_url,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Load configuration from a specific file without validating it.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to `<base>/config.json`.
    pub fn save(&self, paths: &Paths) -> ConfigResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    fn apply_env(&mut self, env: &dyn EnvSource) {
        if let Some(key) = first_var(env, &ENV_CLERK_PUBLISHABLE_KEY) {
            self.clerk_publishable_key = key;
        }
        if let Some(url) = first_var(env, &ENV_SUPABASE_URL) {
            self.supabase_url = url;
        }
        if let Some(key) = first_var(env, &ENV_SUPABASE_ANON_KEY) {
            self.supabase_anon_key = key;
        }
        if let Some(key) = first_var(env, &[ENV_CLERK_SECRET_KEY]) {
            self.clerk_secret_key = Some(key);
        }
        if let Some(url) = first_var(env, &[ENV_CLERK_API_URL]) {
            self.clerk_api_url = url;
        }
        if let Some(url) = first_var(env, &[ENV_CLERK_FRONTEND_API_URL]) {
            self.clerk_frontend_api_url = Some(url);
        }
        if let Some(level) = first_var(env, &[ENV_LOG_LEVEL]) {
            self.log_level = level;
        }
    }

    /// Check that every required value is present and every URL parses.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.clerk_publishable_key.trim().is_empty() {
            return Err(ConfigError::MissingEnv(ENV_CLERK_PUBLISHABLE_KEY[0]));
        }
        if self.supabase_url.trim().is_empty() {
            return Err(ConfigError::MissingEnv(ENV_SUPABASE_URL[0]));
        }
        if self.supabase_anon_key.trim().is_empty() {
            return Err(ConfigError::MissingEnv(ENV_SUPABASE_ANON_KEY[0]));
        }

        if upvotes_observability::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        self.supabase_url()?;
        Url::parse(&self.clerk_api_url)?;
        if let Some(url) = &self.clerk_frontend_api_url {
            Url::parse(url)?;
        }
        Ok(())
    }

    /// Get the Supabase URL as a parsed URL.
    pub fn supabase_url(&self) -> ConfigResult<Url> {
        Url::parse(&self.supabase_url).map_err(ConfigError::from)
    }
}
