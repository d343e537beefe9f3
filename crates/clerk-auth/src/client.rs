//! HTTP client for the Clerk Frontend and Backend APIs.

use crate::error::{AuthError, AuthResult};
use crate::key::PublishableKey;
use crate::user::ClerkUser;
use reqwest::StatusCode;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use upvotes_config::{Config, DEFAULT_CLERK_API_URL};
use url::Url;

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Settings needed to build a [`ClerkClient`].
#[derive(Debug, Clone)]
pub struct ClerkSettings {
    /// Publishable key (`pk_test_...` / `pk_live_...`).
    pub publishable_key: String,
    /// Secret key sent as bearer token on Backend API calls.
    pub secret_key: Option<String>,
    /// Backend API base URL.
    pub api_url: String,
    /// Overrides the Frontend API URL decoded from the publishable key.
    pub frontend_api_url: Option<String>,
}

impl ClerkSettings {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
            secret_key: None,
            api_url: DEFAULT_CLERK_API_URL.to_string(),
            frontend_api_url: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            publishable_key: config.clerk_publishable_key.clone(),
            secret_key: config.clerk_secret_key.clone(),
            api_url: config.clerk_api_url.clone(),
            frontend_api_url: config.clerk_frontend_api_url.clone(),
        }
    }
}

/// Clerk API client bound to one publishable key.
#[derive(Clone, Debug)]
pub struct ClerkClient {
    http_client: reqwest::Client,
    key: PublishableKey,
    secret_key: Option<String>,
    frontend_api_url: String,
    api_url: String,
}

impl ClerkClient {
    /// Build a client. Fails before any network access when the publishable
    /// key is missing or malformed.
    pub fn new(settings: ClerkSettings) -> AuthResult<Self> {
        Self::with_http_client(reqwest::Client::new(), settings)
    }

    /// Build a client that shares an existing connection pool.
    pub fn with_http_client(
        http_client: reqwest::Client,
        settings: ClerkSettings,
    ) -> AuthResult<Self> {
        let key = PublishableKey::parse(&settings.publishable_key)?;

        let frontend_api_url = settings
            .frontend_api_url
            .unwrap_or_else(|| key.frontend_api_url());
        Url::parse(&frontend_api_url)?;
        Url::parse(&settings.api_url)?;

        Ok(Self {
            http_client,
            key,
            secret_key: settings.secret_key,
            frontend_api_url: frontend_api_url.trim_end_matches('/').to_string(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn publishable_key(&self) -> &PublishableKey {
        &self.key
    }

    pub fn frontend_api_url(&self) -> &str {
        &self.frontend_api_url
    }

    /// Load step: fetch the instance environment from the Frontend API.
    pub async fn load(&self) -> AuthResult<serde_json::Value> {
        let url = format!("{}/v1/environment", self.frontend_api_url);

        tracing::debug!(frontend_api = %self.key.frontend_api(), "Loading Clerk environment");

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body_summary = summarize_response_body(&body);
            tracing::error!(status = %status, body_summary = %body_summary, "Failed to load Clerk environment");
            return Err(AuthError::Load(format!("{} ({})", status, body_summary)));
        }

        let environment: serde_json::Value = response.json().await?;
        if !environment.is_object() {
            return Err(AuthError::Load(
                "environment response is not a JSON object".to_string(),
            ));
        }

        tracing::info!(frontend_api = %self.key.frontend_api(), "Clerk loaded");
        Ok(environment)
    }

    fn user_url(&self, user_id: &str) -> AuthResult<Url> {
        let mut url = Url::parse(&self.api_url)?;
        url.path_segments_mut()
            .map_err(|_| AuthError::UnusableApiUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(["v1", "users", user_id]);
        Ok(url)
    }

    /// Look a user up by id. `Ok(None)` when Clerk has no such user.
    pub async fn fetch_user(&self, user_id: &str) -> AuthResult<Option<ClerkUser>> {
        let url = self.user_url(user_id)?;

        tracing::debug!(user_id, "Fetching Clerk user");

        let mut request = self
            .http_client
            .get(url)
            .header("Accept", "application/json");
        if let Some(secret_key) = &self.secret_key {
            request = request.header("Authorization", format!("Bearer {}", secret_key));
        }

        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(user_id, "Clerk user not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let body_summary = summarize_response_body(&body);
            tracing::error!(status, body_summary = %body_summary, "Clerk API error");
            return Err(AuthError::Api {
                status,
                message: format!("upstream error ({body_summary})"),
            });
        }

        Ok(Some(response.json().await?))
    }
}
