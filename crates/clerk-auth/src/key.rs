//! Clerk publishable key parsing.
//!
//! A publishable key is `pk_test_<b64>` or `pk_live_<b64>`, where `<b64>` is
//! the base64 encoding of the Frontend API host followed by `$`.

use crate::error::{AuthError, AuthResult};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Clerk instance kind encoded in the key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instance {
    Development,
    Production,
}

/// A validated publishable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishableKey {
    raw: String,
    instance: Instance,
    frontend_api: String,
}

impl PublishableKey {
    /// Parse and validate a publishable key.
    pub fn parse(raw: &str) -> AuthResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AuthError::MissingPublishableKey);
        }

        let (instance, encoded) = if let Some(rest) = raw.strip_prefix("pk_test_") {
            (Instance::Development, rest)
        } else if let Some(rest) = raw.strip_prefix("pk_live_") {
            (Instance::Production, rest)
        } else {
            return Err(AuthError::InvalidPublishableKey(
                "expected pk_test_ or pk_live_ prefix".to_string(),
            ));
        };

        let decoded = KEY_ENGINE
            .decode(encoded)
            .map_err(|e| AuthError::InvalidPublishableKey(format!("not base64: {e}")))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| AuthError::InvalidPublishableKey("not UTF-8".to_string()))?;
        let host = decoded.strip_suffix('$').ok_or_else(|| {
            AuthError::InvalidPublishableKey("missing '$' terminator".to_string())
        })?;

        if host.is_empty() {
            return Err(AuthError::InvalidPublishableKey(
                "empty Frontend API host".to_string(),
            ));
        }

        Ok(Self {
            raw: raw.to_string(),
            instance,
            frontend_api: host.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instance(&self) -> Instance {
        self.instance
    }

    /// Frontend API host, e.g. `clerk.example.com`.
    pub fn frontend_api(&self) -> &str {
        &self.frontend_api
    }

    /// Frontend API base URL, e.g. `https://clerk.example.com`.
    pub fn frontend_api_url(&self) -> String {
        format!("https://{}", self.frontend_api)
    }
}
